use crate::inventory::catalog::{Catalog, CatalogEntry};
use crate::inventory::category::Category;
use crate::inventory::warn::{self, WarnEvent};
use std::collections::BTreeMap;

pub const INDEX_TITLE: &str = "# Documentation Index";

fn table_row(entry: &CatalogEntry) -> String {
    let title = if entry.title.is_empty() {
        &entry.path
    } else {
        &entry.title
    };
    format!(
        "| `{}` | {} | {} | {} | {} | {} |",
        entry.path, title, entry.lifecycle, entry.tags, entry.review_date, entry.notes
    )
}

/// Renders the grouped Markdown index, or `None` for an empty catalog.
///
/// Blank categories count as `default_category`; rows whose category is not
/// one of the known sections are left out with a warning.
pub fn render_index(catalog: &Catalog, default_category: Category) -> Option<String> {
    if catalog.is_empty() {
        return None;
    }

    let mut grouped: BTreeMap<Category, Vec<&CatalogEntry>> = BTreeMap::new();
    for entry in catalog.values() {
        let category = if entry.category.is_empty() {
            Some(default_category)
        } else {
            Category::parse(&entry.category)
        };
        match category {
            Some(category) => grouped.entry(category).or_default().push(entry),
            None => warn::emit(WarnEvent {
                code: "INDEX_SKIP",
                stage: "markdown-index",
                path: &entry.path,
                reason: "unknown category",
                err: &entry.category,
            }),
        }
    }

    let mut lines = vec![INDEX_TITLE.to_string(), String::new()];
    for (category, entries) in &grouped {
        lines.push(format!("## {} ({})", category.title(), category.as_str()));
        lines.push(String::new());
        lines.push("| Path | Title | Lifecycle | Tags | Review | Notes |".to_string());
        lines.push("| --- | --- | --- | --- | --- | --- |".to_string());
        lines.extend(entries.iter().map(|entry| table_row(entry)));
        lines.push(String::new());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, title: &str, category: &str) -> CatalogEntry {
        CatalogEntry {
            path: path.to_string(),
            title: title.to_string(),
            category: category.to_string(),
            lifecycle: "longterm".to_string(),
            review_date: "2026-10-01".to_string(),
            tags: "a,b".to_string(),
            notes: String::new(),
        }
    }

    fn catalog(entries: Vec<CatalogEntry>) -> Catalog {
        entries.into_iter().map(|e| (e.path.clone(), e)).collect()
    }

    #[test]
    fn empty_catalog_renders_nothing() {
        assert_eq!(render_index(&Catalog::new(), Category::Product), None);
    }

    #[test]
    fn sections_follow_category_order_and_rows_sort_by_path() {
        let cat = catalog(vec![
            entry("zeta/ops.md", "Ops Z", "50-ops"),
            entry("alpha/ops.md", "", "50-ops"),
            entry("meta/style.md", "Style Guide", "00-meta"),
            entry("misc/loose.md", "Loose", ""),
        ]);
        let got = render_index(&cat, Category::Product).expect("rendered");
        let want = "\
# Documentation Index

## Meta & Guidelines (00-meta)

| Path | Title | Lifecycle | Tags | Review | Notes |
| --- | --- | --- | --- | --- | --- |
| `meta/style.md` | Style Guide | longterm | a,b | 2026-10-01 |  |

## Product & Experience (30-product)

| Path | Title | Lifecycle | Tags | Review | Notes |
| --- | --- | --- | --- | --- | --- |
| `misc/loose.md` | Loose | longterm | a,b | 2026-10-01 |  |

## Operations & Runbooks (50-ops)

| Path | Title | Lifecycle | Tags | Review | Notes |
| --- | --- | --- | --- | --- | --- |
| `alpha/ops.md` | alpha/ops.md | longterm | a,b | 2026-10-01 |  |
| `zeta/ops.md` | Ops Z | longterm | a,b | 2026-10-01 |  |

";
        assert_eq!(got, want);
    }

    #[test]
    fn unknown_categories_are_left_out() {
        let cat = catalog(vec![
            entry("ok.md", "Ok", "10-strategy"),
            entry("odd.md", "Odd", "99-misc"),
        ]);
        let got = render_index(&cat, Category::Product).expect("rendered");
        assert!(got.contains("## Strategy (10-strategy)"));
        assert!(!got.contains("odd.md"));
    }
}
