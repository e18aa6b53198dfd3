use crate::inventory::catalog::{Catalog, CatalogEntry};
use crate::inventory::category::Lifecycle;
use crate::inventory::config::ClassifyConfig;
use crate::inventory::rules::{Classification, Rule, classify};
use crate::inventory::title::extract_title;
use crate::inventory::util::format_review_date;
use crate::inventory::walker::DocFile;
use chrono::NaiveDate;
use serde::Serialize;

/// A document on disk with no catalog row, plus what the rules suggest.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub path: String,
    pub title: String,
    #[serde(flatten)]
    pub classification: Classification,
}

impl Suggestion {
    pub fn summary_line(&self) -> String {
        format!(
            "{} | title='{}' | category={} | lifecycle={} | tags={}",
            self.path,
            self.title,
            self.classification.category,
            self.classification.lifecycle,
            self.classification.tags_joined()
        )
    }

    pub fn into_entry(self, today: NaiveDate) -> CatalogEntry {
        let review_date = if self.classification.lifecycle == Lifecycle::Archive.as_str() {
            String::new()
        } else {
            format_review_date(today)
        };
        CatalogEntry {
            path: self.path,
            title: self.title,
            category: self.classification.category.clone(),
            lifecycle: self.classification.lifecycle.clone(),
            review_date,
            tags: self.classification.tags_joined(),
            notes: String::new(),
        }
    }
}

/// Uncatalogued files with their suggested metadata, sorted by path.
pub fn find_uncatalogued(
    catalog: &Catalog,
    files: impl IntoIterator<Item = DocFile>,
    rules: &[Rule],
    defaults: &ClassifyConfig,
) -> Vec<Suggestion> {
    let mut out: Vec<Suggestion> = files
        .into_iter()
        .filter(|doc| !catalog.contains_key(&doc.rel_path))
        .map(|doc| Suggestion {
            title: extract_title(&doc),
            classification: classify(&doc, rules, defaults),
            path: doc.rel_path,
        })
        .collect();
    out.sort_by(|a, b| a.path.cmp(&b.path));
    out
}

/// Merges new rows for every suggestion into `catalog`; returns the added paths.
/// Existing rows are never touched.
pub fn apply_update(
    catalog: &mut Catalog,
    suggestions: Vec<Suggestion>,
    today: NaiveDate,
) -> Vec<String> {
    let mut added = Vec::with_capacity(suggestions.len());
    for suggestion in suggestions {
        if catalog.contains_key(&suggestion.path) {
            continue;
        }
        let entry = suggestion.into_entry(today);
        added.push(entry.path.clone());
        catalog.insert(entry.path.clone(), entry);
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::rules::parse_rules;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn docs(root: &Path, files: &[(&str, &str)]) -> Vec<DocFile> {
        files
            .iter()
            .map(|(rel, body)| {
                let path = root.join(rel);
                fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
                fs::write(&path, body).expect("write");
                DocFile::new(root, &path).expect("doc")
            })
            .collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).expect("date")
    }

    #[test]
    fn update_adds_missing_entries_once() {
        let tmp = tempdir().expect("tempdir");
        let files = docs(
            tmp.path(),
            &[
                ("ops/runbook-deploy.md", "# Deploy Runbook\n"),
                ("archive/old-plan.md", "# Old Plan\n"),
                ("guide/intro.txt", "hello\n"),
            ],
        );
        let rules = parse_rules(
            r#"[
                {"path_contains": ["runbook"], "category": "50-ops", "lifecycle": "status", "tags": ["ops", "deploy"]},
                {"directories": ["archive"], "category": "90-archive", "lifecycle": "archive"}
            ]"#,
            Path::new(".rules.json"),
        )
        .expect("rules");
        let defaults = ClassifyConfig::default();
        let mut catalog = Catalog::new();

        let suggestions = find_uncatalogued(&catalog, files.clone(), &rules, &defaults);
        let added = apply_update(&mut catalog, suggestions, today());
        assert_eq!(
            added,
            vec!["archive/old-plan.md", "guide/intro.txt", "ops/runbook-deploy.md"]
        );

        let runbook = &catalog["ops/runbook-deploy.md"];
        assert_eq!(runbook.title, "Deploy Runbook");
        assert_eq!(runbook.category, "50-ops");
        assert_eq!(runbook.review_date, "2026-10-16");
        assert_eq!(runbook.tags, "ops,deploy");
        assert_eq!(runbook.notes, "");

        let archived = &catalog["archive/old-plan.md"];
        assert_eq!(archived.lifecycle, "archive");
        assert_eq!(archived.review_date, "");

        assert_eq!(catalog["guide/intro.txt"].title, "intro");

        let again = find_uncatalogued(&catalog, files, &rules, &defaults);
        assert!(again.is_empty());
        assert!(apply_update(&mut catalog, again, today()).is_empty());
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn existing_rows_are_left_alone() {
        let tmp = tempdir().expect("tempdir");
        let files = docs(tmp.path(), &[("guide/intro.md", "# Intro\n")]);
        let mut catalog = Catalog::new();
        catalog.insert(
            "guide/intro.md".to_string(),
            CatalogEntry {
                path: "guide/intro.md".to_string(),
                title: "Hand edited".to_string(),
                ..CatalogEntry::default()
            },
        );

        let suggestions = find_uncatalogued(&catalog, files, &[], &ClassifyConfig::default());
        assert!(suggestions.is_empty());
        assert_eq!(catalog["guide/intro.md"].title, "Hand edited");
    }

    #[test]
    fn summary_line_lists_suggestion_fields() {
        let suggestion = Suggestion {
            path: "ops/runbook.md".to_string(),
            title: "Runbook".to_string(),
            classification: Classification {
                category: "50-ops".to_string(),
                lifecycle: "status".to_string(),
                tags: vec!["ops".to_string(), "oncall".to_string()],
                rule: Some("runbooks".to_string()),
            },
        };
        assert_eq!(
            suggestion.summary_line(),
            "ops/runbook.md | title='Runbook' | category=50-ops | lifecycle=status | tags=ops,oncall"
        );
    }
}
