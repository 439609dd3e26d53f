//! Directory copying for the blank base and template overlays

use super::manifest::Template;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

/// Files under `root`, as paths relative to it, skipping anything `exclude` rejects
fn relative_files(root: &Path, exclude: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::fs("Failed to read directory", &path, e.into())
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| entry.path().to_path_buf());

        if !exclude(&relative) {
            files.push(relative);
        }
    }

    Ok(files)
}

/// Copy the given relative files from `from` into `to`, creating parent directories
async fn copy_files(from: &Path, to: &Path, files: &[PathBuf]) -> Result<()> {
    for relative in files {
        let source = from.join(relative);
        let target = to.join(relative);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::fs("Failed to create directory", parent, e))?;
        }

        fs::copy(&source, &target)
            .await
            .map_err(|e| Error::fs("Failed to copy", &source, e))?;
        debug!("Copied {} -> {}", source.display(), target.display());
    }

    Ok(())
}

/// Recursively copy a directory tree, returning the number of files copied
pub async fn copy_dir(from: &Path, to: &Path) -> Result<usize> {
    if !from.is_dir() {
        return Err(Error::fs(
            "Directory not found",
            from,
            std::io::Error::from(std::io::ErrorKind::NotFound),
        ));
    }

    fs::create_dir_all(to)
        .await
        .map_err(|e| Error::fs("Failed to create directory", to, e))?;

    let files = relative_files(from, |_| false)?;
    copy_files(from, to, &files).await?;

    Ok(files.len())
}

/// Copy a template's own files over the destination, skipping its declaration file
///
/// Files that already exist in the destination are replaced.
pub async fn overlay_template(
    template: &Template,
    destination: &Path,
    declaration_file: &str,
) -> Result<Vec<PathBuf>> {
    let files = relative_files(template.source_dir(), |relative| {
        relative == Path::new(declaration_file)
    })?;

    copy_files(template.source_dir(), destination, &files).await?;

    Ok(files)
}

/// Remove a directory tree if it exists
pub async fn remove_dir_if_exists(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => {
            debug!("Removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::fs("Failed to remove", path, e)),
    }
}
