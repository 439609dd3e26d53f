//! Error types for the release pipeline

use crate::templates::schema::ValidationError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a release
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(
        "Duplicate template name '{name}' declared in {} and {}",
        .first.display(),
        .second.display()
    )]
    DuplicateName {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("`{command}` exited with {status}")]
    ExternalCommand { command: String, status: String },

    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("{action} {}: {source}", .path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected contents in {}: {message}", .path.display())]
    Manifest { path: PathBuf, message: String },

    #[error("Missing required tools:\n{}", .0.join("\n"))]
    MissingTools(Vec<String>),
}

impl Error {
    /// Wrap an io error with the action and path that produced it
    pub fn fs(action: &'static str, path: &Path, source: io::Error) -> Self {
        Error::Filesystem {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Wrap a JSON syntax error for the file it was read from
    pub fn json(path: &Path, source: serde_json::Error) -> Self {
        Error::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}
