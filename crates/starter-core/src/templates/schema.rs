//! Declaration validation
//!
//! Every rule is checked and every violation collected, so a broken
//! `template.json` is reported in one pass instead of one error per run.

use super::manifest::{Declaration, SchemaProfile};
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

const MIN_NAME_LEN: usize = 4;
const MIN_TITLE_LEN: usize = 4;
const MIN_DESCRIPTION_LEN: usize = 10;
const MIN_DESCRIPTION_WORDS: usize = 2;
const MIN_EXTENDS_LEN: usize = 4;

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9-]+$").expect("name pattern is valid"))
}

/// What was wrong with a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    NotAnObject,
    Required,
    ExpectedString,
    ExpectedArray,
    TooShort { min: usize },
    InvalidName,
    TooFewWords { min: usize },
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::NotAnObject => write!(f, "Expected an object"),
            IssueKind::Required => write!(f, "Required"),
            IssueKind::ExpectedString => write!(f, "Expected a string"),
            IssueKind::ExpectedArray => write!(f, "Expected an array of strings"),
            IssueKind::TooShort { min } => {
                write!(f, "Must contain at least {} character(s)", min)
            }
            IssueKind::InvalidName => write!(
                f,
                "Name must be lowercase, without spaces, and can only contain letters, numbers, and hyphens"
            ),
            IssueKind::TooFewWords { min } => {
                write!(f, "Description must contain at least {} words", min)
            }
        }
    }
}

/// A single rule violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Field path, e.g. `name` or `dependencies[2]`
    pub field: String,
    pub kind: IssueKind,
}

/// All rule violations found in one declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Declaration file, when known
    pub file: Option<PathBuf>,
    pub issues: Vec<Issue>,
}

impl ValidationError {
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Whether any issue concerns the given field
    pub fn has_issue(&self, field: &str, kind: &IssueKind) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.field == field && &issue.kind == kind)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "Invalid declaration in {}:", file.display())?,
            None => write!(f, "Invalid declaration:")?,
        }
        for issue in &self.issues {
            write!(f, "\n  - {}: {}", issue.field, issue.kind)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Default)]
struct Issues(Vec<Issue>);

impl Issues {
    fn push(&mut self, field: impl Into<String>, kind: IssueKind) {
        self.0.push(Issue {
            field: field.into(),
            kind,
        });
    }

    fn required_string<'a>(&mut self, object: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
        match object.get(field) {
            None | Some(Value::Null) => {
                self.push(field, IssueKind::Required);
                None
            }
            Some(Value::String(s)) => Some(s),
            Some(_) => {
                self.push(field, IssueKind::ExpectedString);
                None
            }
        }
    }

    fn min_len(&mut self, field: &str, value: &str, min: usize) {
        if value.chars().count() < min {
            self.push(field, IssueKind::TooShort { min });
        }
    }

    fn string_list(&mut self, object: &Map<String, Value>, field: &str, min: usize) -> Vec<String> {
        let items = match object.get(field) {
            None | Some(Value::Null) => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                self.push(field, IssueKind::ExpectedArray);
                return Vec::new();
            }
        };

        let mut list = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            let item_field = format!("{}[{}]", field, idx);
            match item {
                Value::String(s) => {
                    self.min_len(&item_field, s, min);
                    list.push(s.clone());
                }
                _ => self.push(item_field, IssueKind::ExpectedString),
            }
        }
        list
    }
}

/// Validate a parsed declaration against a schema profile
pub fn validate(value: &Value, profile: SchemaProfile) -> Result<Declaration, ValidationError> {
    let Some(object) = value.as_object() else {
        return Err(ValidationError {
            file: None,
            issues: vec![Issue {
                field: "(root)".to_string(),
                kind: IssueKind::NotAnObject,
            }],
        });
    };

    let mut issues = Issues::default();

    // Case is accepted on input; the pattern only ever sees the lowercased name
    let name = issues.required_string(object, "name").map(|name| {
        issues.min_len("name", name, MIN_NAME_LEN);
        let name = name.to_lowercase();
        if !name_pattern().is_match(&name) {
            issues.push("name", IssueKind::InvalidName);
        }
        name
    });

    let title = if profile.has_title() {
        issues.required_string(object, "title").map(|title| {
            issues.min_len("title", title, MIN_TITLE_LEN);
            title.to_string()
        })
    } else {
        name.clone()
    };

    let description = issues.required_string(object, "description").map(|description| {
        issues.min_len("description", description, MIN_DESCRIPTION_LEN);
        if description.split_whitespace().count() < MIN_DESCRIPTION_WORDS {
            issues.push(
                "description",
                IssueKind::TooFewWords {
                    min: MIN_DESCRIPTION_WORDS,
                },
            );
        }
        description.to_string()
    });

    let dependencies = issues.string_list(object, "dependencies", 0);
    let dev_dependencies = issues.string_list(object, "devDependencies", 0);
    let extends = if profile.has_extends() {
        issues.string_list(object, "extends", MIN_EXTENDS_LEN)
    } else {
        Vec::new()
    };

    match (name, title, description) {
        (Some(name), Some(title), Some(description)) if issues.0.is_empty() => Ok(Declaration {
            name,
            title,
            description,
            dependencies,
            dev_dependencies,
            extends,
        }),
        _ => Err(ValidationError {
            file: None,
            issues: issues.0,
        }),
    }
}
