//! Template discovery

use super::manifest::{SchemaProfile, Template};
use super::schema;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Load every declaration found in the immediate child directories of `root`
///
/// The returned order follows directory enumeration and is only meaningful for
/// display. One malformed declaration fails the whole load.
pub async fn load_templates(root: &Path, profile: SchemaProfile) -> Result<Vec<Template>> {
    let declaration_file = profile.declaration_file();

    if !root.is_dir() {
        return Err(Error::fs(
            "Template directory not found",
            root,
            std::io::Error::from(std::io::ErrorKind::NotFound),
        ));
    }

    let mut templates: Vec<Template> = Vec::new();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::fs("Failed to read directory", &path, e.into())
        })?;

        if !entry.file_type().is_dir() {
            continue;
        }

        let dir = entry.path();
        let declaration_path = dir.join(declaration_file);
        if !declaration_path.is_file() {
            debug!("Skipping {} (no {})", dir.display(), declaration_file);
            continue;
        }

        let template = load_template(dir, &declaration_path, profile).await?;

        if let Some(first) = seen.get(&template.name) {
            return Err(Error::DuplicateName {
                name: template.name,
                first: first.clone(),
                second: dir.to_path_buf(),
            });
        }
        seen.insert(template.name.clone(), dir.to_path_buf());

        info!("Loaded {}: {} ({})", profile.entity(), template.title, template.name);
        templates.push(template);
    }

    Ok(templates)
}

/// Read, parse and validate one declaration file
async fn load_template(dir: &Path, declaration_path: &Path, profile: SchemaProfile) -> Result<Template> {
    let content = fs::read_to_string(declaration_path)
        .await
        .map_err(|e| Error::fs("Failed to read", declaration_path, e))?;

    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| Error::json(declaration_path, e))?;

    let declaration = schema::validate(&value, profile).map_err(|e| e.with_file(declaration_path))?;

    Ok(declaration.located_at(dir))
}
