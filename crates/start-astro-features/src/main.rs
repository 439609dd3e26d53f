//! Start Astro Features - Builds the shared feature packages for local development

use anyhow::Result;
use clap::Parser;
use starter_core::{ProjectConfig, ReleaseMode, SchemaProfile};
use tracing_subscriber::EnvFilter;

/// Start Astro feature-package collection
#[derive(Clone)]
pub struct FeaturesConfig;

impl ProjectConfig for FeaturesConfig {
    fn name(&self) -> &'static str {
        "start-astro-features"
    }

    fn display_name(&self) -> &'static str {
        "Start Astro Features"
    }

    fn tagline(&self) -> &'static str {
        "Reusable feature packages for Astro starters"
    }

    fn repository(&self) -> &'static str {
        "vfshera/start-astro"
    }

    fn schema(&self) -> SchemaProfile {
        SchemaProfile::Feature
    }

    fn root_env(&self) -> &'static str {
        "START_ASTRO_FEATURES_ROOT"
    }

    fn sources_dir(&self) -> &'static str {
        "features"
    }

    fn output_dir(&self) -> &'static str {
        "packages"
    }

    fn index_readme(&self) -> &'static str {
        "packages/README.md"
    }
}

#[derive(Parser, Debug)]
#[command(name = "start-astro-features")]
#[command(about = "Build every Start Astro feature package (for development use)")]
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
    let config = FeaturesConfig;
    let root = config.resolve_root(&std::env::current_dir()?);

    // Developer build: stops after removing the blank base, no lint or commit
    let result = starter_core::run(&config, root, ReleaseMode::Build).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use starter_core::Layout;
    use std::path::PathBuf;

    #[test]
    fn test_layout_points_at_packages() {
        let layout = Layout::from_config(&FeaturesConfig, "/repo");
        assert_eq!(layout.sources_dir, PathBuf::from("/repo/scripts/features"));
        assert_eq!(layout.blank_base, PathBuf::from("/repo/scripts/blank"));
        assert_eq!(
            layout.destination("with-eslint-prettier"),
            PathBuf::from("/repo/packages/with-eslint-prettier")
        );
        assert_eq!(layout.index_readme, PathBuf::from("/repo/packages/README.md"));
    }

    #[test]
    fn test_reads_feature_declarations() {
        assert_eq!(FeaturesConfig.schema().declaration_file(), "feature.json");
    }
}
