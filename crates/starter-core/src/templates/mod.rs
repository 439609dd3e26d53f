//! Template declarations, discovery and generation
//!
//! This module provides:
//! - Descriptor types and the two schema profiles
//! - Declaration validation that reports every violated rule
//! - Discovery of declaration folders under a sources directory
//! - Copying the blank base and overlaying template files
//! - Per-template project generation

pub mod copier;
pub mod generator;
pub mod loader;
pub mod manifest;
pub mod schema;

pub use generator::Generator;
pub use loader::load_templates;
pub use manifest::{Declaration, SchemaProfile, Template};
pub use schema::{validate, Issue, IssueKind, ValidationError};
