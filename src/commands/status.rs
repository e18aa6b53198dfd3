use anyhow::Result;

use crate::commands::{CommandContext, CommandReport};
use crate::inventory::catalog;
use crate::inventory::config::{resolve_config_path, unknown_env_keys};
use crate::inventory::rules::load_rules;
use crate::inventory::util::today;
use crate::inventory::walker::iter_doc_files;

pub fn run(ctx: &CommandContext) -> Result<CommandReport> {
    let paths = &ctx.paths;
    let mut report = CommandReport::new("status");

    report.detail(format!("build={}", env!("BUILD_UUID")));
    match resolve_config_path() {
        Some(path) if path.exists() => report.detail(format!("config_path={}", path.display())),
        Some(path) => report.detail(format!("config_path={} (absent)", path.display())),
        None => report.detail("config_path=none"),
    }
    report.detail(format!("docs_root={}", paths.docs_root.display()));
    report.detail(format!("catalog_path={}", paths.catalog_path.display()));
    report.detail(format!("rules_path={}", paths.rules_path.display()));
    report.detail(format!("index_path={}", paths.index_path.display()));
    match &paths.logs_dir {
        Some(dir) => report.detail(format!("logs_dir={}", dir.display())),
        None => report.detail("logs_dir=disabled"),
    }
    report.detail(format!(
        "default_category={}",
        ctx.cfg.classify.default_category
    ));
    report.detail(format!(
        "default_lifecycle={}",
        ctx.cfg.classify.default_lifecycle
    ));
    report.detail(format!(
        "status_max_age_days={}",
        ctx.cfg.audit.status_max_age_days
    ));
    report.detail(format!("today={}", today(ctx.cfg.timezone())));

    for key in unknown_env_keys() {
        report.issue(format!("unrecognised environment variable {key}"));
    }

    if !paths.docs_root.is_dir() {
        report.issue(format!(
            "docs root does not exist ({})",
            paths.docs_root.display()
        ));
        return Ok(report);
    }

    let catalog = catalog::load(&paths.catalog_path)?;
    let rules = load_rules(&paths.rules_path)?;
    let files = iter_doc_files(paths).count();
    report.detail(format!("catalog_entries={}", catalog.len()));
    report.detail(format!("rules={}", rules.len()));
    report.detail(format!("candidate_files={files}"));

    Ok(report)
}
