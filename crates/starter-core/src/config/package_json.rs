//! `package.json` rewriting

use crate::error::{Error, Result};
use crate::templates::Template;
use serde_json::{Map, Value};
use std::path::Path;

/// Top-level keys in the order they should appear
pub const PREFERRED_KEY_ORDER: &[&str] = &[
    "name",
    "description",
    "version",
    "type",
    "main",
    "scripts",
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "keywords",
    "author",
    "license",
];

fn key_rank(key: &str) -> usize {
    PREFERRED_KEY_ORDER
        .iter()
        .position(|preferred| *preferred == key)
        .unwrap_or(usize::MAX)
}

/// Reorder top-level keys; keys outside the preferred list keep their relative order at the end
pub fn sort_package_json(package: Map<String, Value>) -> Map<String, Value> {
    let mut entries: Vec<(String, Value)> = package.into_iter().collect();
    // sort_by_key is stable, so unknown keys stay in insertion order
    entries.sort_by_key(|(key, _)| key_rank(key));
    entries.into_iter().collect()
}

/// Set the template's name and description and return the reordered manifest
pub fn apply_template(package: Value, template: &Template, path: &Path) -> Result<Value> {
    let Value::Object(mut package) = package else {
        return Err(Error::Manifest {
            path: path.to_path_buf(),
            message: "expected a JSON object at the top level".to_string(),
        });
    };

    package.insert("name".to_string(), Value::String(template.name.clone()));
    package.insert(
        "description".to_string(),
        Value::String(template.description.clone()),
    );

    Ok(Value::Object(sort_package_json(package)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::Declaration;
    use serde_json::json;

    fn keys(value: &Map<String, Value>) -> Vec<&str> {
        value.keys().map(String::as_str).collect()
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_preferred_keys_come_first() {
        let sorted = sort_package_json(object(json!({
            "scripts": { "dev": "astro dev" },
            "packageManager": "pnpm@9.0.0",
            "type": "module",
            "dependencies": { "astro": "^5.0.0" },
            "name": "blank",
            "private": true,
            "version": "0.0.1"
        })));

        assert_eq!(
            keys(&sorted),
            vec![
                "name",
                "version",
                "type",
                "scripts",
                "dependencies",
                "packageManager",
                "private"
            ]
        );
    }

    #[test]
    fn test_sorting_is_idempotent() {
        let once = sort_package_json(object(json!({
            "license": "MIT",
            "engines": { "node": ">=18" },
            "name": "blog",
            "devDependencies": {},
            "description": "A simple blog",
            "files": []
        })));
        let twice = sort_package_json(once.clone());

        assert_eq!(keys(&once), keys(&twice));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply_template_sets_name_and_description() {
        let template = Declaration {
            name: "blog".to_string(),
            title: "Blog".to_string(),
            description: "A simple blog".to_string(),
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
            extends: Vec::new(),
        }
        .located_at("templates/blog");

        let updated = apply_template(
            json!({ "type": "module", "name": "blank", "version": "0.0.1" }),
            &template,
            Path::new("package.json"),
        )
        .unwrap();

        let updated = object(updated);
        assert_eq!(keys(&updated), vec!["name", "description", "version", "type"]);
        assert_eq!(updated["name"], "blog");
        assert_eq!(updated["description"], "A simple blog");
    }

    #[test]
    fn test_apply_template_rejects_non_object() {
        let template = Declaration {
            name: "blog".to_string(),
            title: "Blog".to_string(),
            description: "A simple blog".to_string(),
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
            extends: Vec::new(),
        }
        .located_at("templates/blog");

        let err = apply_template(json!([]), &template, Path::new("package.json")).unwrap_err();
        assert!(matches!(err, Error::Manifest { .. }));
    }
}
