use anyhow::Result;

use crate::commands::{CommandContext, CommandReport};
use crate::inventory::audit::{AuditContext, audit};
use crate::inventory::catalog;
use crate::inventory::rules::load_rules;
use crate::inventory::util::today;
use crate::inventory::walker::iter_doc_files;

pub fn run(ctx: &CommandContext) -> Result<CommandReport> {
    let mut report = CommandReport::new("audit");

    let catalog = catalog::load(&ctx.paths.catalog_path)?;
    let rules = load_rules(&ctx.paths.rules_path)?;
    let audit_ctx = AuditContext {
        rules: &rules,
        defaults: &ctx.cfg.classify,
        today: today(ctx.cfg.timezone()),
        status_max_age_days: ctx.cfg.audit.status_max_age_days,
    };
    let findings = audit(&catalog, iter_doc_files(&ctx.paths), &audit_ctx);

    report.add_findings(
        "missing_files",
        "Catalog references missing files:",
        findings.missing_files.iter().cloned(),
    );
    report.add_findings(
        "uncatalogued",
        "Files not present in catalog:",
        findings.uncatalogued.iter().map(|u| {
            format!(
                "{} (suggested category={}, lifecycle={}, tags={})",
                u.path,
                u.suggested.category,
                u.suggested.lifecycle,
                u.suggested.tags_joined()
            )
        }),
    );
    report.add_findings(
        "invalid_categories",
        "Entries with invalid categories:",
        findings.invalid_categories.iter().cloned(),
    );
    report.add_findings(
        "stale_reviews",
        "Entries past their review date:",
        findings.stale_reviews.iter().cloned(),
    );
    report.add_findings(
        "lifecycle_age_flags",
        "Status documents older than threshold:",
        findings
            .lifecycle_age_flags
            .iter()
            .map(|f| format!("{} ({} days since review)", f.path, f.age_days)),
    );
    report.add_findings(
        "duplicates",
        "Duplicate titles detected:",
        findings.duplicates.iter().cloned(),
    );

    if findings.is_clean() {
        report.detail("No audit findings.");
    }
    report.data = Some(serde_json::to_value(&findings)?);
    Ok(report)
}
