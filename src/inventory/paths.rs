use crate::inventory::config::InventoryConfig;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Every location a command touches, resolved once at startup.
#[derive(Debug, Clone)]
pub struct InventoryPaths {
    pub docs_root: PathBuf,
    pub catalog_path: PathBuf,
    pub rules_path: PathBuf,
    pub index_path: PathBuf,
    pub readme_path: PathBuf,
    pub logs_dir: Option<PathBuf>,
}

/// Locations given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub docs_root: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub rules: Option<PathBuf>,
    pub index: Option<PathBuf>,
}

fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

pub fn resolve_paths_from(
    cwd: &Path,
    cfg: &InventoryConfig,
    overrides: &PathOverrides,
) -> InventoryPaths {
    let docs_root = absolutize(
        cwd,
        overrides
            .docs_root
            .as_deref()
            .unwrap_or_else(|| Path::new(&cfg.layout.docs_root)),
    );
    let in_root = |explicit: &Option<PathBuf>, file_name: &str| match explicit {
        Some(path) => absolutize(cwd, path),
        None => docs_root.join(file_name),
    };

    InventoryPaths {
        catalog_path: in_root(&overrides.catalog, &cfg.layout.catalog_file),
        rules_path: in_root(&overrides.rules, &cfg.layout.rules_file),
        index_path: in_root(&overrides.index, &cfg.layout.index_file),
        readme_path: docs_root.join(&cfg.layout.readme_file),
        logs_dir: cfg
            .logs_dir
            .as_deref()
            .map(|dir| absolutize(cwd, Path::new(dir))),
        docs_root,
    }
}

pub fn resolve_paths(cfg: &InventoryConfig, overrides: &PathOverrides) -> Result<InventoryPaths> {
    let cwd = env::current_dir().context("failed to resolve current directory")?;
    Ok(resolve_paths_from(&cwd, cfg, overrides))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_live_under_docs_root() {
        let cfg = InventoryConfig::default();
        let paths = resolve_paths_from(Path::new("/repo"), &cfg, &PathOverrides::default());
        assert_eq!(paths.docs_root, PathBuf::from("/repo/docs"));
        assert_eq!(paths.catalog_path, PathBuf::from("/repo/docs/_catalog.csv"));
        assert_eq!(paths.rules_path, PathBuf::from("/repo/docs/.rules.json"));
        assert_eq!(paths.index_path, PathBuf::from("/repo/docs/INDEX.md"));
        assert_eq!(paths.readme_path, PathBuf::from("/repo/docs/README.md"));
        assert!(paths.logs_dir.is_none());
    }

    #[test]
    fn overrides_take_precedence_and_resolve_against_cwd() {
        let cfg = InventoryConfig::default();
        let overrides = PathOverrides {
            docs_root: Some(PathBuf::from("handbook")),
            catalog: Some(PathBuf::from("/data/catalog.csv")),
            rules: None,
            index: Some(PathBuf::from("out/INDEX.md")),
        };
        let paths = resolve_paths_from(Path::new("/repo"), &cfg, &overrides);
        assert_eq!(paths.docs_root, PathBuf::from("/repo/handbook"));
        assert_eq!(paths.catalog_path, PathBuf::from("/data/catalog.csv"));
        assert_eq!(paths.rules_path, PathBuf::from("/repo/handbook/.rules.json"));
        assert_eq!(paths.index_path, PathBuf::from("/repo/out/INDEX.md"));
    }
}
