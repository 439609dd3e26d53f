//! Starter Core - Shared library for building starter template collections
//!
//! This library assembles per-template project directories from a shared blank
//! base, validates template declarations, writes README documentation and cuts
//! timestamped releases. It is used by multiple CLI binaries that share the
//! pipeline but differ in their [`ProjectConfig`].
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Declaration validation, discovery, copying, config-file rewriting
//! - **Layer 2: Workflow Orchestration** - Provisioning, per-template generation and the [`Release`] pipeline
//! - **Layer 3: CLI Interface** - Optional cliclack-based progress output (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based progress reporter and runner
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use starter_core::{Layout, LogProgress, ProcessRunner, Release, ReleaseMode};
//!
//! let layout = Layout::from_config(&MyConfig, "/path/to/repo");
//! let report = Release::new(&MyConfig, layout, &ProcessRunner, &LogProgress, ReleaseMode::Build)
//!     .run()
//!     .await?;
//! ```

pub mod config;
pub mod error;
pub mod progress;
pub mod project;
pub mod provision;
pub mod readme;
pub mod release;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use progress::{LogProgress, NoProgress, Progress, ProgressEvent, Stage, Step};
pub use project::{Layout, ProjectConfig};
pub use provision::ProvisionOutcome;
pub use release::{Release, ReleaseMode, ReleaseReport};
pub use runtime::{CommandRunner, ExternalCommand, ProcessRunner};
pub use templates::{load_templates, Generator, SchemaProfile, Template, ValidationError};

#[cfg(feature = "tui")]
pub use tui::run;
