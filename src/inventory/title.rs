use crate::inventory::walker::DocFile;
use crate::inventory::warn::{self, WarnEvent};
use std::fs::File;
use std::io::{BufRead, BufReader};

const HEADING_EXTENSIONS: &[&str] = &[".md", ".mdx"];

/// Display title for a new catalog entry.
///
/// Markdown files use their first `#` line; a `#` inside a fenced code block
/// also counts. Everything else, and any read or decode failure, falls back
/// to the file stem.
pub fn extract_title(doc: &DocFile) -> String {
    if !HEADING_EXTENSIONS.contains(&doc.extension.as_str()) {
        return doc.stem.clone();
    }

    let file = match File::open(&doc.abs_path) {
        Ok(file) => file,
        Err(err) => {
            warn_fallback(doc, "unreadable", &err.to_string());
            return doc.stem.clone();
        }
    };

    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn_fallback(doc, "undecodable", &err.to_string());
                return doc.stem.clone();
            }
        };
        let stripped = line.trim();
        if stripped.starts_with('#') {
            return stripped.trim_start_matches(['#', ' ']).to_string();
        }
    }
    doc.stem.clone()
}

fn warn_fallback(doc: &DocFile, reason: &str, err: &str) {
    warn::emit(WarnEvent {
        code: "TITLE_FALLBACK",
        stage: "title",
        path: &doc.rel_path,
        reason,
        err,
    });
}
