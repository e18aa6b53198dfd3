use crate::inventory::paths::InventoryPaths;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

pub const SUPPORTED_EXTENSIONS: &[&str] = &[".md", ".mdx", ".docx", ".json", ".txt", ".rtf"];

/// Hidden files that are still considered besides the rules file itself.
const HIDDEN_ALLOWLIST: &[&str] = &[".gitkeep"];

/// A candidate document, described relative to the docs root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocFile {
    pub abs_path: PathBuf,
    /// Forward-slash separated path below the docs root.
    pub rel_path: String,
    pub stem: String,
    /// Lower-cased, with a leading dot; empty when the name has none.
    pub extension: String,
    /// Lower-cased directory names between the root and the file.
    pub directories: Vec<String>,
}

impl DocFile {
    pub fn new(docs_root: &Path, abs_path: &Path) -> Option<Self> {
        let rel = abs_path.strip_prefix(docs_root).ok()?;
        let parts: Vec<String> = rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        let (_, dirs) = parts.split_last()?;

        let stem = abs_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = abs_path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();

        Some(Self {
            abs_path: abs_path.to_path_buf(),
            rel_path: parts.join("/"),
            stem,
            extension,
            directories: dirs.iter().map(|d| d.to_lowercase()).collect(),
        })
    }

    /// Builds a descriptor from a catalog-style relative path.
    #[cfg(test)]
    pub fn from_relative(docs_root: &Path, rel_path: &str) -> Self {
        let abs = rel_path
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(docs_root.to_path_buf(), |acc, part| acc.join(part));
        Self::new(docs_root, &abs).unwrap_or_else(|| Self {
            abs_path: abs,
            rel_path: rel_path.to_string(),
            stem: String::new(),
            extension: String::new(),
            directories: Vec::new(),
        })
    }
}

fn is_supported_extension(extension: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&extension)
}

fn is_excluded(paths: &InventoryPaths, path: &Path) -> bool {
    if path == paths.catalog_path
        || path == paths.rules_path
        || path == paths.index_path
        || path == paths.readme_path
    {
        return true;
    }
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return true;
    };
    if name.starts_with('.') {
        let rules_name = paths.rules_path.file_name().and_then(|n| n.to_str());
        let allowed = Some(name) == rules_name || HIDDEN_ALLOWLIST.contains(&name);
        if !allowed {
            return true;
        }
    }
    false
}

/// Lazily walks the docs root and yields supported document files.
///
/// Unreadable entries are skipped. Order is whatever the filesystem returns.
pub fn iter_doc_files(paths: &InventoryPaths) -> impl Iterator<Item = DocFile> + '_ {
    WalkDir::new(&paths.docs_root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(move |entry| !is_excluded(paths, entry.path()))
        .filter_map(move |entry| DocFile::new(&paths.docs_root, entry.path()))
        .filter(|doc| is_supported_extension(&doc.extension))
}
