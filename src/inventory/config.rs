use crate::error::InventoryError;
use crate::inventory::category::{Category, Lifecycle};
use anyhow::Result;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

include!(concat!(env!("OUT_DIR"), "/docinv_env_allowlist.rs"));

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub docs_root: String,
    pub catalog_file: String,
    pub rules_file: String,
    pub index_file: String,
    pub readme_file: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            docs_root: "docs".to_string(),
            catalog_file: "_catalog.csv".to_string(),
            rules_file: ".rules.json".to_string(),
            index_file: "INDEX.md".to_string(),
            readme_file: "README.md".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    pub default_category: String,
    pub default_lifecycle: String,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            default_category: Category::Product.as_str().to_string(),
            default_lifecycle: Lifecycle::Longterm.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub status_max_age_days: i64,
    pub timezone: Option<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            status_max_age_days: 90,
            timezone: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InventoryConfig {
    pub layout: LayoutConfig,
    pub classify: ClassifyConfig,
    pub audit: AuditConfig,
    pub logs_dir: Option<String>,
}

impl InventoryConfig {
    /// Parsed form of `audit.timezone`; `validate` guarantees it parses.
    pub fn timezone(&self) -> Option<Tz> {
        self.audit
            .timezone
            .as_deref()
            .and_then(|name| name.parse::<Tz>().ok())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PartialInventoryConfig {
    layout: Option<LayoutConfig>,
    classify: Option<ClassifyConfig>,
    audit: Option<AuditConfig>,
    logs_dir: Option<String>,
}

fn env_or_i64(var: &str, fallback: i64) -> i64 {
    match env::var(var) {
        Ok(v) => v.trim().parse::<i64>().ok().unwrap_or(fallback),
        Err(_) => fallback,
    }
}

fn env_or_string(var: &str, fallback: &str) -> String {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

fn env_or_optional_string(var: &str, fallback: Option<String>) -> Option<String> {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => fallback,
    }
}

fn invalid(msg: String) -> anyhow::Error {
    InventoryError::InvalidConfig(msg).into()
}

fn validate(cfg: &InventoryConfig) -> Result<()> {
    if Category::parse(&cfg.classify.default_category).is_none() {
        return Err(invalid(format!(
            "unknown default category `{}`",
            cfg.classify.default_category
        )));
    }
    if Lifecycle::parse(&cfg.classify.default_lifecycle).is_none() {
        return Err(invalid(format!(
            "unknown default lifecycle `{}`",
            cfg.classify.default_lifecycle
        )));
    }
    if cfg.audit.status_max_age_days < 1 {
        return Err(invalid("status max age must be >= 1 day".to_string()));
    }
    if let Some(tz) = cfg.audit.timezone.as_deref()
        && tz.parse::<Tz>().is_err()
    {
        return Err(invalid(format!("unknown timezone `{tz}`")));
    }
    for (name, value) in [
        ("docs root", &cfg.layout.docs_root),
        ("catalog file", &cfg.layout.catalog_file),
        ("rules file", &cfg.layout.rules_file),
        ("index file", &cfg.layout.index_file),
    ] {
        if value.trim().is_empty() {
            return Err(invalid(format!("{name} cannot be empty")));
        }
    }
    Ok(())
}

pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(custom) = env::var("DOCINV_CONFIG_PATH") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    let base = dirs::config_dir()?;
    Some(base.join("doc-inventory").join("config.toml"))
}

fn merge_file_config(base: &mut InventoryConfig) -> Result<()> {
    let Some(path) = resolve_config_path() else {
        return Ok(());
    };
    if !path.exists() {
        return Ok(());
    }

    let raw = fs::read_to_string(&path)
        .map_err(|err| invalid(format!("failed to read {}: {err}", path.display())))?;
    let parsed: PartialInventoryConfig = toml::from_str(&raw)
        .map_err(|err| invalid(format!("failed to parse {}: {err}", path.display())))?;
    if let Some(layout) = parsed.layout {
        base.layout = layout;
    }
    if let Some(classify) = parsed.classify {
        base.classify = classify;
    }
    if let Some(audit) = parsed.audit {
        base.audit = audit;
    }
    if parsed.logs_dir.is_some() {
        base.logs_dir = parsed.logs_dir;
    }
    Ok(())
}

fn apply_env_overrides(cfg: &mut InventoryConfig) {
    cfg.layout.docs_root = env_or_string("DOCINV_DOCS_ROOT", &cfg.layout.docs_root);
    cfg.layout.catalog_file = env_or_string("DOCINV_CATALOG_FILE", &cfg.layout.catalog_file);
    cfg.layout.rules_file = env_or_string("DOCINV_RULES_FILE", &cfg.layout.rules_file);
    cfg.layout.index_file = env_or_string("DOCINV_INDEX_FILE", &cfg.layout.index_file);
    cfg.classify.default_category =
        env_or_string("DOCINV_DEFAULT_CATEGORY", &cfg.classify.default_category);
    cfg.classify.default_lifecycle =
        env_or_string("DOCINV_DEFAULT_LIFECYCLE", &cfg.classify.default_lifecycle);
    cfg.audit.status_max_age_days =
        env_or_i64("DOCINV_STATUS_MAX_AGE_DAYS", cfg.audit.status_max_age_days);
    cfg.audit.timezone = env_or_optional_string("DOCINV_TIMEZONE", cfg.audit.timezone.take());
    cfg.logs_dir = env_or_optional_string("DOCINV_LOGS_DIR", cfg.logs_dir.take());
}

pub fn load_config() -> Result<InventoryConfig> {
    let mut cfg = InventoryConfig::default();
    merge_file_config(&mut cfg)?;
    apply_env_overrides(&mut cfg);
    validate(&cfg)?;
    Ok(cfg)
}

/// `DOCINV_*` variables present in the environment that nothing reads.
pub fn unknown_env_keys() -> Vec<String> {
    let mut out: Vec<String> = env::vars()
        .map(|(key, _)| key)
        .filter(|key| key.starts_with("DOCINV_"))
        .filter(|key| !GENERATED_ENV_ALLOWLIST.contains(&key.as_str()))
        .collect();
    out.sort();
    out
}
