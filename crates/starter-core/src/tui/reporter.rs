//! Spinner-based progress and the interactive release runner

use crate::progress::{Progress, ProgressEvent, Stage};
use crate::project::{Layout, ProjectConfig};
use crate::release::{Release, ReleaseMode, ReleaseReport};
use crate::runtime::{tool, ProcessRunner};
use anyhow::Result;
use cliclack::ProgressBar;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, info};

/// Renders pipeline events as cliclack spinners and log lines
#[derive(Default)]
pub struct ClackProgress {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ClackProgress {
    fn start_spinner(&self, message: &str) {
        let spinner = cliclack::spinner();
        spinner.start(message);
        if let Ok(mut current) = self.spinner.lock() {
            if let Some(previous) = current.replace(spinner) {
                previous.stop("");
            }
        }
    }

    fn stop_spinner(&self, message: &str) {
        if let Ok(mut current) = self.spinner.lock() {
            if let Some(spinner) = current.take() {
                spinner.stop(message);
            }
        }
    }
}

impl Progress for ClackProgress {
    fn report(&self, event: ProgressEvent<'_>) {
        let written = match event {
            ProgressEvent::StageStarted(Stage::Generate | Stage::Done) => Ok(()),
            ProgressEvent::StageStarted(stage) => cliclack::log::step(stage),
            ProgressEvent::StepStarted(step) => {
                self.start_spinner(step.running());
                Ok(())
            }
            ProgressEvent::StepFinished(step) => {
                self.stop_spinner(step.finished());
                Ok(())
            }
            ProgressEvent::StepFailed(step) => {
                self.stop_spinner(&format!("Failed while {}", step.running()));
                Ok(())
            }
            ProgressEvent::TemplateStarted { title, index, total } => {
                cliclack::log::info(format!("Creating {} ({}/{})", title, index + 1, total))
            }
            ProgressEvent::TemplateFinished { title } => {
                cliclack::log::success(format!("{} created!", title))
            }
            ProgressEvent::Warning(message) => cliclack::log::warning(message),
        };
        if let Err(e) = written {
            debug!("Failed to write progress: {}", e);
        }
    }
}

/// Run a full release with terminal output
pub async fn run<C: ProjectConfig>(config: &C, root: PathBuf, mode: ReleaseMode) -> Result<ReleaseReport> {
    cliclack::intro(format!(" {} ", config.display_name()).on_cyan().black().bold())?;

    // Step 1: Make sure the external tools are there
    check_tools(mode)?;

    // Step 2: Resolve paths
    let layout = Layout::from_config(config, root);
    info!(project = config.name(), root = %layout.root.display(), "Starting release");
    cliclack::log::info(format!(
        "Building {}s from {}",
        config.schema().entity(),
        layout.sources_dir.display()
    ))?;

    // Step 3: Run the pipeline
    let progress = ClackProgress::default();
    let report = match Release::new(config, layout, &ProcessRunner, &progress, mode)
        .run()
        .await
    {
        Ok(report) => report,
        Err(e) => {
            cliclack::log::error(format!("{} release aborted", config.display_name()))?;
            return Err(e.into());
        }
    };

    // Step 4: Summary
    let summary = match &report.version {
        Some(version) => format!("{} New version: {}", "Done!".green().bold(), version),
        None => format!(
            "{} Built {} {}(s)",
            "Done!".green().bold(),
            report.templates.len(),
            config.schema().entity()
        ),
    };
    cliclack::outro(summary)?;

    Ok(report)
}

fn check_tools(mode: ReleaseMode) -> Result<()> {
    let tools: &[tool::Tool] = match mode {
        ReleaseMode::Build => &[tool::PNPM],
        ReleaseMode::Publish => &[tool::PNPM, tool::GIT],
    };

    let spinner = cliclack::spinner();
    spinner.start("Checking tools...");

    match tool::check_tools(tools) {
        Ok(found) => {
            let info: Vec<String> = found
                .iter()
                .map(|t| format!("{} ({})", t.name, t.version.as_deref().unwrap_or("unknown")))
                .collect();
            spinner.stop(format!("Detected tools: {}", info.join(", ")));
            Ok(())
        }
        Err(e) => {
            spinner.stop("Missing tools");
            cliclack::log::error(format!("{}", e))?;
            anyhow::bail!("Please install the missing tools and try again.");
        }
    }
}
