//! External processes and tool detection
//!
//! This module provides:
//! - A [`CommandRunner`] seam for the package manager, scaffolder and git
//! - Tool availability checks run before a release

pub mod command;
pub mod tool;

pub use command::{CommandRunner, ExternalCommand, ProcessRunner};
pub use tool::{check_tool, check_tools, Tool, ToolInfo, GIT, PNPM};
