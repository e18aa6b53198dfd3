use crate::inventory::util::write_atomic;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

pub const CATALOG_HEADER: [&str; 7] = [
    "path",
    "title",
    "category",
    "lifecycle",
    "review_date",
    "tags",
    "notes",
];

/// One catalog row. Category and lifecycle stay raw strings so bad values
/// survive a load/save cycle and surface as audit findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogEntry {
    pub path: String,
    pub title: String,
    pub category: String,
    pub lifecycle: String,
    pub review_date: String,
    pub tags: String,
    pub notes: String,
}

pub type Catalog = BTreeMap<String, CatalogEntry>;

/// Catalog paths as written by hand (`./guide//intro.md`) reduced to the
/// form the walker produces (`guide/intro.md`).
pub fn normalize_path(raw: &str) -> String {
    let joined = raw
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/");
    if raw.starts_with('/') {
        format!("/{joined}")
    } else {
        joined
    }
}

/// A missing file is an empty catalog. Short rows leave trailing columns
/// empty. Later rows override earlier ones with the same path; rows without
/// a path are dropped.
pub fn load(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Ok(Catalog::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read header of {}", path.display()))?
        .clone();

    let mut entries = Catalog::new();
    for (idx, row) in reader.records().enumerate() {
        let row_context = || format!("failed to parse row {} of {}", idx + 2, path.display());
        let mut record = row.with_context(row_context)?;
        while record.len() < headers.len() {
            record.push_field("");
        }
        let mut entry: CatalogEntry = record
            .deserialize(Some(&headers))
            .with_context(row_context)?;
        entry.path = normalize_path(&entry.path);
        if entry.path.is_empty() {
            continue;
        }
        entries.insert(entry.path.clone(), entry);
    }
    Ok(entries)
}

fn write_rows<'a, W: Write>(
    out: W,
    entries: impl Iterator<Item = &'a CatalogEntry>,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(out);
    writer.write_record(CATALOG_HEADER)?;
    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    Ok(())
}

/// Serialises entries sorted by path.
pub fn render(entries: &Catalog) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_rows(&mut buf, entries.values())?;
    Ok(buf)
}

pub fn save(path: &Path, entries: &Catalog) -> Result<()> {
    let bytes = render(entries)?;
    write_atomic(path, &bytes)
}

/// Writes a header-only catalog when none exists yet. Returns whether it did.
pub fn ensure_header(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save(path, &Catalog::new())?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn entry(path: &str, title: &str) -> CatalogEntry {
        CatalogEntry {
            path: path.to_string(),
            title: title.to_string(),
            category: "50-ops".to_string(),
            lifecycle: "status".to_string(),
            review_date: "2026-10-01".to_string(),
            tags: "ops,deploy".to_string(),
            notes: "needs \"owner\", soon".to_string(),
        }
    }

    #[test]
    fn save_then_load_reproduces_entries() {
        let tmp = tempdir().expect("tempdir");
        let file = tmp.path().join("_catalog.csv");
        let mut catalog = Catalog::new();
        for e in [entry("ops/b.md", "B"), entry("guide/a.md", "A, with comma")] {
            catalog.insert(e.path.clone(), e);
        }

        save(&file, &catalog).expect("save");
        let loaded = load(&file).expect("load");
        assert_eq!(loaded, catalog);

        let first = fs::read(&file).expect("read");
        save(&file, &loaded).expect("save again");
        assert_eq!(fs::read(&file).expect("read again"), first);
    }

    #[test]
    fn save_sorts_by_path_with_header_first() {
        let tmp = tempdir().expect("tempdir");
        let file = tmp.path().join("_catalog.csv");
        let mut catalog = Catalog::new();
        for e in [entry("z.md", "Z"), entry("a.md", "A")] {
            catalog.insert(e.path.clone(), e);
        }
        save(&file, &catalog).expect("save");

        let raw = fs::read_to_string(&file).expect("read");
        let lines: Vec<&str> = raw.split("\r\n").collect();
        assert_eq!(lines[0], "path,title,category,lifecycle,review_date,tags,notes");
        assert!(lines[1].starts_with("a.md,"));
        assert!(lines[2].starts_with("z.md,"));
    }

    #[test]
    fn load_skips_pathless_rows_and_keeps_last_duplicate() {
        let tmp = tempdir().expect("tempdir");
        let file = tmp.path().join("_catalog.csv");
        fs::write(
            &file,
            "path,title,category,lifecycle,review_date,tags,notes\n\
             a.md,First,30-product,longterm,,,\n\
             ,Orphan,30-product,longterm,,,\n\
             a.md,Second,50-ops,status,2026-01-01,x,\n",
        )
        .expect("write");

        let loaded = load(&file).expect("load");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded["a.md"].title, "Second");
        assert_eq!(loaded["a.md"].category, "50-ops");
    }

    #[test]
    fn load_tolerates_missing_and_reordered_columns() {
        let tmp = tempdir().expect("tempdir");
        let file = tmp.path().join("_catalog.csv");
        fs::write(&file, "title,path\nHello,guide/hello.md\n").expect("write");

        let loaded = load(&file).expect("load");
        let got = &loaded["guide/hello.md"];
        assert_eq!(got.title, "Hello");
        assert_eq!(got.category, "");
        assert_eq!(got.review_date, "");
    }

    #[test]
    fn load_fills_trailing_columns_of_short_rows() {
        let tmp = tempdir().expect("tempdir");
        let file = tmp.path().join("_catalog.csv");
        fs::write(
            &file,
            "path,title,category,lifecycle,review_date,tags,notes\n\
             short.md,Short\n\
             long.md,Long,50-ops,status,2026-01-01,x,note,extra\n",
        )
        .expect("write");

        let loaded = load(&file).expect("load");
        assert_eq!(loaded.len(), 2);
        let short = &loaded["short.md"];
        assert_eq!(short.title, "Short");
        assert_eq!(short.category, "");
        assert_eq!(short.notes, "");
        assert_eq!(loaded["long.md"].notes, "note");
    }

    #[test]
    fn load_normalizes_hand_written_paths() {
        let tmp = tempdir().expect("tempdir");
        let file = tmp.path().join("_catalog.csv");
        fs::write(
            &file,
            "path,title\n./guide//intro.md,Intro\n./,Dot only\n",
        )
        .expect("write");

        let loaded = load(&file).expect("load");
        assert_eq!(loaded.keys().collect::<Vec<_>>(), vec!["guide/intro.md"]);
        assert_eq!(loaded["guide/intro.md"].path, "guide/intro.md");
    }

    #[test]
    fn normalize_path_keeps_clean_paths() {
        assert_eq!(normalize_path("guide/intro.md"), "guide/intro.md");
        assert_eq!(normalize_path("./a/./b.md"), "a/b.md");
        assert_eq!(normalize_path("/abs//x.md"), "/abs/x.md");
    }

    #[test]
    fn ensure_header_only_creates_once() {
        let tmp = tempdir().expect("tempdir");
        let file = tmp.path().join("_catalog.csv");

        assert!(ensure_header(&file).expect("create"));
        assert_eq!(
            fs::read_to_string(&file).expect("read"),
            "path,title,category,lifecycle,review_date,tags,notes\r\n"
        );
        assert!(load(&file).expect("load").is_empty());

        fs::write(&file, "path\nkeep.md\n").expect("overwrite");
        assert!(!ensure_header(&file).expect("noop"));
        assert_eq!(load(&file).expect("load").len(), 1);
    }

    #[test]
    fn missing_catalog_loads_empty() {
        let tmp = tempdir().expect("tempdir");
        assert!(load(&tmp.path().join("nope.csv")).expect("load").is_empty());
    }
}
