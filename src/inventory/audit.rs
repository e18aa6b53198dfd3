//! Read-only consistency checks between the catalog and the docs tree.

use crate::inventory::catalog::Catalog;
use crate::inventory::category::{Category, Lifecycle};
use crate::inventory::config::ClassifyConfig;
use crate::inventory::rules::{Classification, Rule, classify};
use crate::inventory::util::parse_review_date;
use crate::inventory::walker::DocFile;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UncataloguedFile {
    pub path: String,
    pub suggested: Classification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgedStatusDoc {
    pub path: String,
    pub age_days: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditFindings {
    pub missing_files: Vec<String>,
    pub uncatalogued: Vec<UncataloguedFile>,
    pub invalid_categories: Vec<String>,
    pub stale_reviews: Vec<String>,
    pub lifecycle_age_flags: Vec<AgedStatusDoc>,
    pub duplicates: Vec<String>,
}

impl AuditFindings {
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    pub fn total(&self) -> usize {
        self.missing_files.len()
            + self.uncatalogued.len()
            + self.invalid_categories.len()
            + self.stale_reviews.len()
            + self.lifecycle_age_flags.len()
            + self.duplicates.len()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AuditContext<'a> {
    pub rules: &'a [Rule],
    pub defaults: &'a ClassifyConfig,
    pub today: NaiveDate,
    pub status_max_age_days: i64,
}

pub fn audit(
    catalog: &Catalog,
    files: impl IntoIterator<Item = DocFile>,
    ctx: &AuditContext<'_>,
) -> AuditFindings {
    let on_disk: BTreeMap<String, DocFile> = files
        .into_iter()
        .map(|doc| (doc.rel_path.clone(), doc))
        .collect();

    let missing_files = catalog
        .keys()
        .filter(|path| !on_disk.contains_key(*path))
        .cloned()
        .collect();

    let uncatalogued = on_disk
        .iter()
        .filter(|(path, _)| !catalog.contains_key(*path))
        .map(|(path, doc)| UncataloguedFile {
            path: path.clone(),
            suggested: classify(doc, ctx.rules, ctx.defaults),
        })
        .collect();

    let mut title_counts: HashMap<&str, usize> = HashMap::new();
    for entry in catalog.values().filter(|e| !e.title.is_empty()) {
        *title_counts.entry(entry.title.as_str()).or_default() += 1;
    }

    let mut findings = AuditFindings {
        missing_files,
        uncatalogued,
        ..AuditFindings::default()
    };
    let mut duplicates = BTreeSet::new();

    for entry in catalog.values() {
        if !entry.category.is_empty() && Category::parse(&entry.category).is_none() {
            findings.invalid_categories.push(entry.path.clone());
        }

        if let Some(reviewed) = parse_review_date(&entry.review_date) {
            if reviewed < ctx.today {
                findings.stale_reviews.push(entry.path.clone());
            }
            let age_days = (ctx.today - reviewed).num_days();
            if entry.lifecycle == Lifecycle::Status.as_str() && age_days > ctx.status_max_age_days
            {
                findings.lifecycle_age_flags.push(AgedStatusDoc {
                    path: entry.path.clone(),
                    age_days,
                });
            }
        }

        if title_counts.get(entry.title.as_str()).copied().unwrap_or(0) > 1 {
            duplicates.insert(entry.path.clone());
        }
    }
    findings.duplicates = duplicates.into_iter().collect();

    findings
}
