//! Start Astro - Builds every starter template and commits the release

use anyhow::Result;
use clap::Parser;
use starter_core::{ProjectConfig, ReleaseMode, SchemaProfile};
use tracing_subscriber::EnvFilter;

/// Start Astro template collection
#[derive(Clone)]
pub struct StartAstroConfig;

impl ProjectConfig for StartAstroConfig {
    fn name(&self) -> &'static str {
        "start-astro"
    }

    fn display_name(&self) -> &'static str {
        "Start Astro"
    }

    fn tagline(&self) -> &'static str {
        "Starter templates for Astro"
    }

    fn repository(&self) -> &'static str {
        "vfshera/start-astro"
    }

    fn schema(&self) -> SchemaProfile {
        SchemaProfile::Template
    }

    fn root_env(&self) -> &'static str {
        "START_ASTRO_ROOT"
    }

    fn sources_dir(&self) -> &'static str {
        "templates"
    }

    fn output_dir(&self) -> &'static str {
        "apps"
    }
}

#[derive(Parser, Debug)]
#[command(name = "start-astro")]
#[command(about = "Build every Start Astro template, then lint and commit the release")]
#[command(version)]
pub struct Args {}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let _args = Args::parse();
    let config = StartAstroConfig;
    let root = config.resolve_root(&std::env::current_dir()?);

    let result = starter_core::run(&config, root, ReleaseMode::Publish).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result.map(|_| ())
}
