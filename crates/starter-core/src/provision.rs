//! Blank base provisioning
//!
//! Scaffolding is best-effort: when the external command or the tsconfig
//! patch fails, the outcome carries the reason and the caller decides whether
//! to continue.

use crate::config::{self, tsconfig};
use crate::error::{Error, Result};
use crate::progress::{Progress, ProgressEvent, Step};
use crate::project::{Layout, ProjectConfig};
use crate::runtime::{CommandRunner, ExternalCommand};
use crate::templates::copier;
use std::path::Path;
use tracing::warn;

/// Result of provisioning the blank base
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Provisioned,
    ProvisionedWithWarning(String),
}

impl ProvisionOutcome {
    pub fn warning(&self) -> Option<&str> {
        match self {
            ProvisionOutcome::Provisioned => None,
            ProvisionOutcome::ProvisionedWithWarning(reason) => Some(reason),
        }
    }
}

/// Scaffold the blank base and patch its tsconfig with path-alias defaults
///
/// Only a failure to clear a stale base is returned as an error.
pub async fn provision_blank_base<C, R>(
    config: &C,
    layout: &Layout,
    runner: &R,
    progress: &dyn Progress,
) -> Result<ProvisionOutcome>
where
    C: ProjectConfig,
    R: CommandRunner,
{
    copier::remove_dir_if_exists(&layout.blank_base).await?;

    progress.report(ProgressEvent::StepStarted(Step::ScaffoldBase));
    let scaffold = ExternalCommand::new(config.package_manager())
        .args(config.scaffold_args(config.blank_base_name()))
        .current_dir(&layout.scripts_dir);

    if let Err(e) = runner.run(&scaffold).await {
        progress.report(ProgressEvent::StepFailed(Step::ScaffoldBase));
        return Ok(downgrade("Failed to create a blank template", &e));
    }
    progress.report(ProgressEvent::StepFinished(Step::ScaffoldBase));

    progress.report(ProgressEvent::StepStarted(Step::PatchTsconfig));
    if let Err(e) = patch_tsconfig(&layout.blank_base.join("tsconfig.json")).await {
        progress.report(ProgressEvent::StepFailed(Step::PatchTsconfig));
        return Ok(downgrade("Failed to update tsconfig.json", &e));
    }
    progress.report(ProgressEvent::StepFinished(Step::PatchTsconfig));

    Ok(ProvisionOutcome::Provisioned)
}

fn downgrade(context: &str, error: &Error) -> ProvisionOutcome {
    let reason = format!("{}: {}", context, error);
    warn!("{}", reason);
    ProvisionOutcome::ProvisionedWithWarning(reason)
}

/// Merge the path-alias defaults into an existing tsconfig
pub async fn patch_tsconfig(path: &Path) -> Result<()> {
    let mut tsconfig = config::read_json(path).await?;
    tsconfig::merge_defaults(&mut tsconfig, &tsconfig::path_alias_defaults());
    config::write_json(path, &tsconfig).await
}
