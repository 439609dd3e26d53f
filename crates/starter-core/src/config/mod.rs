//! Configuration file utilities
//!
//! JSON helpers for the two files the pipeline rewrites: the generated
//! project's `package.json` and the blank base's `tsconfig.json`.

pub mod package_json;
pub mod tsconfig;

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;
use tokio::fs;

/// Read and parse a JSON file
pub async fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| Error::fs("Failed to read", path, e))?;
    serde_json::from_str(&content).map_err(|e| Error::json(path, e))
}

/// Write a JSON value with two-space indentation and a trailing newline
pub async fn write_json(path: &Path, value: &Value) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value).map_err(|e| Error::json(path, e))?;
    content.push('\n');
    fs::write(path, content)
        .await
        .map_err(|e| Error::fs("Failed to write", path, e))
}
