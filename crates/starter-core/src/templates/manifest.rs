//! Template descriptor types

use std::path::{Path, PathBuf};

/// Shape of the declaration files a deployment reads
///
/// The two profiles are separate schemas used by separate binaries; they are
/// never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaProfile {
    /// `template.json` with a required `title` and an optional `extends` list
    Template,
    /// `feature.json` without `title` or `extends`
    Feature,
}

impl SchemaProfile {
    /// File name of the declaration inside each source directory
    pub fn declaration_file(&self) -> &'static str {
        match self {
            SchemaProfile::Template => "template.json",
            SchemaProfile::Feature => "feature.json",
        }
    }

    /// Singular noun used in user-facing messages
    pub fn entity(&self) -> &'static str {
        match self {
            SchemaProfile::Template => "template",
            SchemaProfile::Feature => "feature",
        }
    }

    pub(crate) fn has_title(&self) -> bool {
        matches!(self, SchemaProfile::Template)
    }

    pub(crate) fn has_extends(&self) -> bool {
        matches!(self, SchemaProfile::Template)
    }
}

/// A validated declaration, before it is tied to a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Lowercase identifier, also the output directory name
    pub name: String,

    /// Display label; the feature profile reuses `name`
    pub title: String,

    pub description: String,

    /// Packages passed to `add`
    pub dependencies: Vec<String>,

    /// Packages passed to `add -D`
    pub dev_dependencies: Vec<String>,

    /// Names of templates this one builds upon (informational only)
    pub extends: Vec<String>,
}

impl Declaration {
    /// Attach the directory the declaration was loaded from
    pub fn located_at(self, path: impl Into<PathBuf>) -> Template {
        Template {
            name: self.name,
            title: self.title,
            description: self.description,
            dependencies: self.dependencies,
            dev_dependencies: self.dev_dependencies,
            extends: self.extends,
            path: path.into(),
        }
    }
}

/// A loaded template (or feature) descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub title: String,
    pub description: String,
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
    pub extends: Vec<String>,

    /// Source directory; never written back to the declaration
    pub path: PathBuf,
}

impl Template {
    /// Source directory holding the overlay files
    pub fn source_dir(&self) -> &Path {
        &self.path
    }
}
