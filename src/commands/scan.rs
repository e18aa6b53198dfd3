use anyhow::Result;

use crate::commands::{CommandContext, CommandReport};
use crate::inventory::catalog;
use crate::inventory::reconcile::{Suggestion, find_uncatalogued};
use crate::inventory::rules::load_rules;
use crate::inventory::walker::iter_doc_files;

pub fn run(ctx: &CommandContext) -> Result<CommandReport> {
    let mut report = CommandReport::new("scan");

    let catalog = catalog::load(&ctx.paths.catalog_path)?;
    let rules = load_rules(&ctx.paths.rules_path)?;
    let suggestions = find_uncatalogued(
        &catalog,
        iter_doc_files(&ctx.paths),
        &rules,
        &ctx.cfg.classify,
    );

    if suggestions.is_empty() {
        report.detail("No uncatalogued documents found.");
        return Ok(report);
    }

    report.add_findings(
        "uncatalogued",
        "Uncatalogued documents:",
        suggestions.iter().map(Suggestion::summary_line),
    );
    report.data = Some(serde_json::to_value(&suggestions)?);
    Ok(report)
}
