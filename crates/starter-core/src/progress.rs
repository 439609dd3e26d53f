//! Progress reporting for the release pipeline
//!
//! The pipeline never prints directly. Each operation receives a [`Progress`]
//! and emits [`ProgressEvent`]s; the TUI turns them into spinners, tests
//! record them.

use std::fmt;

/// A pipeline stage, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Clean,
    Provision,
    Load,
    Generate,
    RootReadme,
    Cleanup,
    LintFix,
    Commit,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Clean => "Cleaning previous build",
            Stage::Provision => "Provisioning blank base",
            Stage::Load => "Loading declarations",
            Stage::Generate => "Generating",
            Stage::RootReadme => "Writing root README",
            Stage::Cleanup => "Removing blank base",
            Stage::LintFix => "Fixing lint issues",
            Stage::Commit => "Committing release",
            Stage::Done => "Done",
        };
        f.write_str(label)
    }
}

/// A step inside provisioning or generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ScaffoldBase,
    PatchTsconfig,
    CopyBase,
    Overlay,
    InstallDependencies,
    InstallDevDependencies,
    WriteReadme,
    UpdateManifest,
}

impl Step {
    /// Message shown while the step runs
    pub fn running(&self) -> &'static str {
        match self {
            Step::ScaffoldBase => "creating a blank template",
            Step::PatchTsconfig => "updating tsconfig.json",
            Step::CopyBase => "copying blank template",
            Step::Overlay => "copying template files",
            Step::InstallDependencies => "installing dependencies",
            Step::InstallDevDependencies => "installing dev dependencies",
            Step::WriteReadme => "creating readme",
            Step::UpdateManifest => "updating package.json",
        }
    }

    /// Message shown once the step completes
    pub fn finished(&self) -> &'static str {
        match self {
            Step::ScaffoldBase => "blank template created!",
            Step::PatchTsconfig => "tsconfig.json updated!",
            Step::CopyBase => "blank template copied!",
            Step::Overlay => "template files copied!",
            Step::InstallDependencies => "dependencies installed!",
            Step::InstallDevDependencies => "dev dependencies installed!",
            Step::WriteReadme => "readme created!",
            Step::UpdateManifest => "package.json updated!",
        }
    }
}

/// Something worth telling the user about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent<'a> {
    StageStarted(Stage),
    StepStarted(Step),
    StepFinished(Step),
    StepFailed(Step),
    TemplateStarted {
        title: &'a str,
        index: usize,
        total: usize,
    },
    TemplateFinished {
        title: &'a str,
    },
    Warning(&'a str),
}

/// Receiver for pipeline progress
pub trait Progress {
    fn report(&self, event: ProgressEvent<'_>);
}

/// Progress sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&self, _event: ProgressEvent<'_>) {}
}

/// Forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn report(&self, event: ProgressEvent<'_>) {
        match event {
            ProgressEvent::StageStarted(stage) => tracing::info!("{}", stage),
            ProgressEvent::StepStarted(step) => tracing::debug!("{}", step.running()),
            ProgressEvent::StepFinished(step) => tracing::debug!("{}", step.finished()),
            ProgressEvent::StepFailed(step) => tracing::warn!("{} failed", step.running()),
            ProgressEvent::TemplateStarted { title, index, total } => {
                tracing::info!("Creating {} ({}/{})", title, index + 1, total)
            }
            ProgressEvent::TemplateFinished { title } => tracing::info!("{} created!", title),
            ProgressEvent::Warning(message) => tracing::warn!("{}", message),
        }
    }
}
