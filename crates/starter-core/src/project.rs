//! Project configuration trait for release binaries
//!
//! This trait defines the interface that each release profile (templates,
//! features) implements to configure the pipeline for its collection.

use crate::templates::SchemaProfile;
use std::path::{Path, PathBuf};

/// Configuration trait for different release profiles
///
/// Each binary implements this trait to define:
/// - Collection identity (name, display name, repository)
/// - Which declaration schema it reads
/// - Where sources, the blank base and the build output live
/// - Which external commands scaffold the base and fix lint
pub trait ProjectConfig: Clone + Send + Sync + 'static {
    /// Internal name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name, also the root README heading
    fn display_name(&self) -> &'static str;

    /// One-line summary under the root README heading
    fn tagline(&self) -> &'static str;

    /// GitHub `owner/repo` slug used in README links
    fn repository(&self) -> &'static str;

    /// Declaration schema this collection uses
    fn schema(&self) -> SchemaProfile;

    /// Environment variable overriding the repository root
    fn root_env(&self) -> &'static str;

    /// Directory holding the release scripts, relative to the root
    fn scripts_dir(&self) -> &'static str {
        "scripts"
    }

    /// Directory of declaration folders, relative to the scripts directory
    fn sources_dir(&self) -> &'static str;

    /// Build output directory, relative to the root
    fn output_dir(&self) -> &'static str;

    /// Name of the transient blank base inside the scripts directory
    fn blank_base_name(&self) -> &'static str {
        "blank"
    }

    /// Aggregate README location, relative to the root
    fn index_readme(&self) -> &'static str {
        "README.md"
    }

    /// Package manager executable
    fn package_manager(&self) -> &'static str {
        "pnpm"
    }

    /// Arguments passed to the package manager to scaffold the blank base
    fn scaffold_args(&self, base_name: &str) -> Vec<String> {
        [
            "create",
            "astro@latest",
            "--no-git",
            "--no-install",
            "--template",
            "minimal",
            base_name,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    /// Package script that fixes lint issues before a release commit
    fn lint_fix_script(&self) -> &'static str {
        "lint:fix"
    }

    /// Link to the framework documentation shown in generated READMEs
    fn docs_url(&self) -> &'static str {
        "https://docs.astro.build"
    }

    /// Link to the framework community shown in generated READMEs
    fn community_url(&self) -> &'static str {
        "https://astro.build/chat"
    }

    /// Resolve the repository root from the environment, falling back to `fallback`
    fn resolve_root(&self, fallback: &Path) -> PathBuf {
        std::env::var_os(self.root_env())
            .map(PathBuf::from)
            .unwrap_or_else(|| fallback.to_path_buf())
    }
}

/// Paths used by one release run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub root: PathBuf,
    pub scripts_dir: PathBuf,
    pub sources_dir: PathBuf,
    pub blank_base: PathBuf,
    pub output_dir: PathBuf,
    pub index_readme: PathBuf,
}

impl Layout {
    /// Resolve every path from a repository root
    pub fn from_config<C: ProjectConfig>(config: &C, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let scripts_dir = root.join(config.scripts_dir());

        Self {
            sources_dir: scripts_dir.join(config.sources_dir()),
            blank_base: scripts_dir.join(config.blank_base_name()),
            output_dir: root.join(config.output_dir()),
            index_readme: root.join(config.index_readme()),
            scripts_dir,
            root,
        }
    }

    /// Build output directory for one template
    pub fn destination(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }
}
