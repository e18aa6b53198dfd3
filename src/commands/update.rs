use anyhow::Result;

use crate::commands::{CommandContext, CommandReport};
use crate::inventory::catalog;
use crate::inventory::reconcile::{apply_update, find_uncatalogued};
use crate::inventory::rules::load_rules;
use crate::inventory::util::today;
use crate::inventory::walker::iter_doc_files;

pub fn run(ctx: &CommandContext) -> Result<CommandReport> {
    let mut report = CommandReport::new("update");

    let mut catalog = catalog::load(&ctx.paths.catalog_path)?;
    let rules = load_rules(&ctx.paths.rules_path)?;
    let suggestions = find_uncatalogued(
        &catalog,
        iter_doc_files(&ctx.paths),
        &rules,
        &ctx.cfg.classify,
    );

    let added = apply_update(&mut catalog, suggestions, today(ctx.cfg.timezone()));
    if added.is_empty() {
        report.detail("Catalog already up to date.");
        return Ok(report);
    }

    catalog::save(&ctx.paths.catalog_path, &catalog)?;
    report.detail(format!(
        "Added {} entries to {}.",
        added.len(),
        ctx.paths.catalog_path.display()
    ));
    for path in &added {
        report.detail(format!("+ {path}"));
    }
    report.data = Some(serde_json::to_value(&added)?);
    Ok(report)
}
