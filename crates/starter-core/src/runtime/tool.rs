//! Tool detection for pnpm and git

use crate::error::{Error, Result};
use std::process::Command;

/// A tool the release shells out to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tool {
    /// Executable name
    pub name: &'static str,
    /// Where to get it when missing
    pub install_hint: &'static str,
}

pub const PNPM: Tool = Tool {
    name: "pnpm",
    install_hint: "install from https://pnpm.io/installation",
};

pub const GIT: Tool = Tool {
    name: "git",
    install_hint: "install from https://git-scm.com/downloads",
};

/// Tool detection result
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Check whether a tool answers `--version`
pub fn check_tool(tool: &Tool) -> ToolInfo {
    let output = Command::new(tool.name).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            ToolInfo {
                name: tool.name,
                version: Some(version),
                available: true,
            }
        }
        _ => ToolInfo {
            name: tool.name,
            version: None,
            available: false,
        },
    }
}

/// Check every tool, failing with one error that lists all missing ones
pub fn check_tools(tools: &[Tool]) -> Result<Vec<ToolInfo>> {
    let mut results = Vec::new();
    let mut missing = Vec::new();

    for tool in tools {
        let info = check_tool(tool);
        if info.available {
            results.push(info);
        } else {
            missing.push(format!("  - {} ({})", tool.name, tool.install_hint));
        }
    }

    if !missing.is_empty() {
        return Err(Error::MissingTools(missing));
    }

    Ok(results)
}
