//! Declarative classification rules.
//!
//! Rules are evaluated in declaration order and the first match wins. Every
//! condition list a rule declares must be satisfied (AND across fields); one
//! hit inside a list is enough (OR within a field). An empty list means the
//! rule does not care about that field.

use crate::error::InventoryError;
use crate::inventory::config::ClassifyConfig;
use crate::inventory::walker::DocFile;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RuleSpec {
    name: Option<String>,
    path_contains: Vec<String>,
    name_contains: Vec<String>,
    stem_equals: Vec<String>,
    directories: Vec<String>,
    extensions: Vec<String>,
    category: Option<String>,
    lifecycle: Option<String>,
    tags: Vec<String>,
}

/// A rule with its match conditions already lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub path_contains: Vec<String>,
    pub name_contains: Vec<String>,
    pub stem_equals: Vec<String>,
    pub directories: Vec<String>,
    pub extensions: Vec<String>,
    pub category: Option<String>,
    pub lifecycle: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub category: String,
    pub lifecycle: String,
    pub tags: Vec<String>,
    /// Name of the rule that matched; `None` when the defaults applied.
    pub rule: Option<String>,
}

impl Classification {
    pub fn tags_joined(&self) -> String {
        self.tags.join(",")
    }
}

fn lowered(values: Vec<String>) -> Vec<String> {
    values.into_iter().map(|v| v.to_lowercase()).collect()
}

fn normalize_extension(raw: String) -> String {
    let lower = raw.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<RuleSpec> for Rule {
    fn from(spec: RuleSpec) -> Self {
        Self {
            name: spec.name.unwrap_or_else(|| "unnamed".to_string()),
            path_contains: lowered(spec.path_contains),
            name_contains: lowered(spec.name_contains),
            stem_equals: lowered(spec.stem_equals),
            directories: lowered(spec.directories),
            extensions: spec.extensions.into_iter().map(normalize_extension).collect(),
            category: non_empty(spec.category),
            lifecycle: non_empty(spec.lifecycle),
            tags: spec.tags,
        }
    }
}

impl Rule {
    pub fn matches(&self, file: &DocFile) -> bool {
        if !self.extensions.is_empty() && !self.extensions.contains(&file.extension) {
            return false;
        }
        let rel_lower = file.rel_path.to_lowercase();
        if !self.path_contains.is_empty()
            && !self
                .path_contains
                .iter()
                .any(|piece| rel_lower.contains(piece.as_str()))
        {
            return false;
        }
        let stem_lower = file.stem.to_lowercase();
        if !self.name_contains.is_empty()
            && !self
                .name_contains
                .iter()
                .any(|piece| stem_lower.contains(piece.as_str()))
        {
            return false;
        }
        if !self.stem_equals.is_empty() && !self.stem_equals.contains(&stem_lower) {
            return false;
        }
        if !self.directories.is_empty()
            && !file
                .directories
                .iter()
                .any(|dir| self.directories.contains(dir))
        {
            return false;
        }
        true
    }
}

pub fn classify(file: &DocFile, rules: &[Rule], defaults: &ClassifyConfig) -> Classification {
    match rules.iter().find(|rule| rule.matches(file)) {
        Some(rule) => Classification {
            category: rule
                .category
                .clone()
                .unwrap_or_else(|| defaults.default_category.clone()),
            lifecycle: rule
                .lifecycle
                .clone()
                .unwrap_or_else(|| defaults.default_lifecycle.clone()),
            tags: rule.tags.clone(),
            rule: Some(rule.name.clone()),
        },
        None => Classification {
            category: defaults.default_category.clone(),
            lifecycle: defaults.default_lifecycle.clone(),
            tags: Vec::new(),
            rule: None,
        },
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

pub fn parse_rules(raw: &str, origin: &Path) -> Result<Vec<Rule>> {
    let value: Value = serde_json::from_str(raw).map_err(|err| {
        InventoryError::InvalidRules(format!("failed to parse {}: {err}", origin.display()))
    })?;
    let Value::Array(items) = value else {
        return Err(InventoryError::InvalidRules(format!(
            "{} must contain a list, got {}",
            origin.display(),
            json_kind(&value)
        ))
        .into());
    };

    let mut rules = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        let spec: RuleSpec = serde_json::from_value(item).map_err(|err| {
            InventoryError::InvalidRules(format!(
                "rule #{idx} in {} is malformed: {err}",
                origin.display()
            ))
        })?;
        rules.push(Rule::from(spec));
    }
    Ok(rules)
}

/// A missing rules file is an empty rule list.
pub fn load_rules(path: &Path) -> Result<Vec<Rule>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_rules(&raw, path)
}
