//! Fakes shared by the unit tests

use crate::error::{Error, Result};
use crate::progress::{Progress, ProgressEvent};
use crate::project::ProjectConfig;
use crate::runtime::{CommandRunner, ExternalCommand};
use crate::templates::SchemaProfile;
use std::cell::RefCell;
use std::path::Path;

#[derive(Clone)]
pub struct TestProject;

impl ProjectConfig for TestProject {
    fn name(&self) -> &'static str {
        "test-starters"
    }

    fn display_name(&self) -> &'static str {
        "Test Starters"
    }

    fn tagline(&self) -> &'static str {
        "Starter templates for tests"
    }

    fn repository(&self) -> &'static str {
        "test/starters"
    }

    fn schema(&self) -> SchemaProfile {
        SchemaProfile::Template
    }

    fn root_env(&self) -> &'static str {
        "TEST_STARTERS_ROOT"
    }

    fn sources_dir(&self) -> &'static str {
        "templates"
    }

    fn output_dir(&self) -> &'static str {
        "apps"
    }
}

/// Same as [`TestProject`] but reading `feature.json` declarations
#[derive(Clone)]
pub struct TestFeatures;

impl ProjectConfig for TestFeatures {
    fn name(&self) -> &'static str {
        "test-features"
    }

    fn display_name(&self) -> &'static str {
        "Test Features"
    }

    fn tagline(&self) -> &'static str {
        "Feature packages for tests"
    }

    fn repository(&self) -> &'static str {
        "test/starters"
    }

    fn schema(&self) -> SchemaProfile {
        SchemaProfile::Feature
    }

    fn root_env(&self) -> &'static str {
        "TEST_FEATURES_ROOT"
    }

    fn sources_dir(&self) -> &'static str {
        "features"
    }

    fn output_dir(&self) -> &'static str {
        "packages"
    }
}

/// Records every command; optionally emulates `pnpm create` and fails on a chosen subcommand
#[derive(Default)]
pub struct RecordingRunner {
    commands: RefCell<Vec<ExternalCommand>>,
    scaffold: bool,
    fail_on: Option<&'static str>,
}

impl RecordingRunner {
    /// A runner whose `create` writes a minimal Astro project
    pub fn scaffolding() -> Self {
        Self {
            scaffold: true,
            ..Self::default()
        }
    }

    /// A runner that fails any command whose first argument is `subcommand`
    pub fn failing_on(subcommand: &'static str) -> Self {
        Self {
            scaffold: true,
            fail_on: Some(subcommand),
            ..Self::default()
        }
    }

    pub fn commands(&self) -> Vec<ExternalCommand> {
        self.commands.borrow().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.commands.borrow().iter().map(ToString::to_string).collect()
    }
}

pub fn write_file(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// Lay down the files `pnpm create astro --template minimal` would produce
pub fn write_minimal_astro(dir: &Path) {
    write_file(
        &dir.join("package.json"),
        r#"{
  "name": "blank",
  "type": "module",
  "version": "0.0.1",
  "scripts": {
    "dev": "astro dev",
    "build": "astro build"
  },
  "dependencies": {
    "astro": "^5.0.0"
  }
}
"#,
    );
    write_file(
        &dir.join("tsconfig.json"),
        r#"{
  "extends": "astro/tsconfigs/strict",
  "include": [".astro/types.d.ts", "**/*"],
  "exclude": ["dist"]
}
"#,
    );
    write_file(&dir.join("src/pages/index.astro"), "<h1>Astro</h1>\n");
    write_file(&dir.join("README.md"), "# Astro Starter Kit: Minimal\n");
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &ExternalCommand) -> Result<()> {
        self.commands.borrow_mut().push(command.clone());

        let subcommand = command.args.first().map(String::as_str);
        if self.fail_on.is_some() && subcommand == self.fail_on {
            return Err(Error::ExternalCommand {
                command: command.to_string(),
                status: "exit code 1".to_string(),
            });
        }

        if self.scaffold && subcommand == Some("create") {
            let cwd = command.cwd.clone().unwrap_or_default();
            let name = command.args.last().cloned().unwrap_or_default();
            write_minimal_astro(&cwd.join(name));
        }

        Ok(())
    }
}

/// Records events as short strings
#[derive(Default)]
pub struct RecordingProgress {
    events: RefCell<Vec<String>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}

impl Progress for RecordingProgress {
    fn report(&self, event: ProgressEvent<'_>) {
        let line = match event {
            ProgressEvent::StageStarted(stage) => format!("stage: {}", stage),
            ProgressEvent::StepStarted(step) => format!("started: {}", step.running()),
            ProgressEvent::StepFinished(step) => format!("finished: {}", step.finished()),
            ProgressEvent::StepFailed(step) => format!("failed: {}", step.running()),
            ProgressEvent::TemplateStarted { title, index, total } => {
                format!("template: {} ({}/{})", title, index + 1, total)
            }
            ProgressEvent::TemplateFinished { title } => format!("created: {}", title),
            ProgressEvent::Warning(message) => format!("warning: {}", message),
        };
        self.events.borrow_mut().push(line);
    }
}
