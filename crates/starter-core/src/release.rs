//! Release orchestration
//!
//! Stages run in a fixed order:
//! `Clean → Provision → Load → Generate → RootReadme → Cleanup → [LintFix → Commit] → Done`.
//! The bracketed tail only runs in [`ReleaseMode::Publish`]. Nothing is rolled
//! back on failure; partial output stays on disk.

use crate::error::{Error, Result};
use crate::progress::{Progress, ProgressEvent, Stage};
use crate::project::{Layout, ProjectConfig};
use crate::provision::{self, ProvisionOutcome};
use crate::readme;
use crate::runtime::{CommandRunner, ExternalCommand};
use crate::templates::{copier, load_templates, Generator, Template};
use chrono::{Local, NaiveDateTime};
use tokio::fs;
use tracing::info;

/// How far a release goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseMode {
    /// Build everything and stop after removing the blank base
    Build,
    /// Build, fix lint and commit the result
    Publish,
}

/// What a finished release produced
#[derive(Debug, Clone)]
pub struct ReleaseReport {
    pub templates: Vec<Template>,
    pub provision: ProvisionOutcome,
    /// Set when the release was committed
    pub version: Option<String>,
}

/// Version string derived from a timestamp, e.g. `2026.10.18-093000`
pub fn timestamp_version(at: NaiveDateTime) -> String {
    at.format("%Y.%m.%d-%H%M%S").to_string()
}

pub fn commit_message(version: &str) -> String {
    format!("chore: 🎉 Release {}", version)
}

/// One release run
pub struct Release<'a, C, R> {
    config: &'a C,
    layout: Layout,
    runner: &'a R,
    progress: &'a dyn Progress,
    mode: ReleaseMode,
    started_at: NaiveDateTime,
}

impl<'a, C, R> Release<'a, C, R>
where
    C: ProjectConfig,
    R: CommandRunner,
{
    pub fn new(
        config: &'a C,
        layout: Layout,
        runner: &'a R,
        progress: &'a dyn Progress,
        mode: ReleaseMode,
    ) -> Self {
        Self {
            config,
            layout,
            runner,
            progress,
            mode,
            started_at: Local::now().naive_local(),
        }
    }

    /// Override the timestamp used for the README date and the version
    pub fn started_at(mut self, at: NaiveDateTime) -> Self {
        self.started_at = at;
        self
    }

    /// Run every stage in order
    pub async fn run(&self) -> Result<ReleaseReport> {
        self.stage(Stage::Clean);
        self.clean().await?;

        self.stage(Stage::Provision);
        let provision =
            provision::provision_blank_base(self.config, &self.layout, self.runner, self.progress)
                .await?;
        if let Some(reason) = provision.warning() {
            self.progress.report(ProgressEvent::Warning(reason));
        }

        self.stage(Stage::Load);
        let templates = load_templates(&self.layout.sources_dir, self.config.schema()).await?;
        info!(
            "Loaded {} {}(s) from {}",
            templates.len(),
            self.config.schema().entity(),
            self.layout.sources_dir.display()
        );

        self.stage(Stage::Generate);
        self.generate_all(&templates).await?;

        self.stage(Stage::RootReadme);
        self.write_index_readme(&templates).await?;

        self.stage(Stage::Cleanup);
        copier::remove_dir_if_exists(&self.layout.blank_base).await?;

        let version = match self.mode {
            ReleaseMode::Build => None,
            ReleaseMode::Publish => Some(self.publish().await?),
        };

        self.stage(Stage::Done);
        Ok(ReleaseReport {
            templates,
            provision,
            version,
        })
    }

    fn stage(&self, stage: Stage) {
        self.progress.report(ProgressEvent::StageStarted(stage));
    }

    /// Remove the stale blank base and previous build output
    async fn clean(&self) -> Result<()> {
        copier::remove_dir_if_exists(&self.layout.blank_base).await?;
        copier::remove_dir_if_exists(&self.layout.output_dir).await?;
        fs::create_dir_all(&self.layout.output_dir)
            .await
            .map_err(|e| Error::fs("Failed to create directory", &self.layout.output_dir, e))
    }

    async fn generate_all(&self, templates: &[Template]) -> Result<()> {
        let generator = Generator::new(self.config, self.runner, self.progress);
        let total = templates.len();

        for (index, template) in templates.iter().enumerate() {
            self.progress.report(ProgressEvent::TemplateStarted {
                title: &template.title,
                index,
                total,
            });

            generator
                .generate(
                    template,
                    &self.layout.destination(&template.name),
                    &self.layout.blank_base,
                )
                .await?;

            self.progress.report(ProgressEvent::TemplateFinished {
                title: &template.title,
            });
        }

        Ok(())
    }

    async fn write_index_readme(&self, templates: &[Template]) -> Result<()> {
        let path = &self.layout.index_readme;
        let contents = readme::render_index_readme(self.config, templates, self.started_at.date());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::fs("Failed to create directory", parent, e))?;
        }

        fs::write(path, contents)
            .await
            .map_err(|e| Error::fs("Failed to write", path, e))
    }

    /// Fix lint and commit; returns the released version
    async fn publish(&self) -> Result<String> {
        self.stage(Stage::LintFix);
        let lint = ExternalCommand::new(self.config.package_manager())
            .arg(self.config.lint_fix_script())
            .current_dir(&self.layout.root);
        self.runner.run(&lint).await?;

        self.stage(Stage::Commit);
        let version = timestamp_version(self.started_at);
        let commit = ExternalCommand::new("git")
            .args(["commit", "-am"])
            .arg(commit_message(&version))
            .current_dir(&self.layout.root);
        self.runner.run(&commit).await?;

        info!("Released {}", version);
        Ok(version)
    }
}
