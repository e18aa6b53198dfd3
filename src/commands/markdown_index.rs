use anyhow::Result;

use crate::commands::{CommandContext, CommandReport};
use crate::inventory::catalog;
use crate::inventory::category::Category;
use crate::inventory::index::render_index;
use crate::inventory::util::write_atomic;

pub fn run(ctx: &CommandContext) -> Result<CommandReport> {
    let mut report = CommandReport::new("markdown-index");

    let catalog = catalog::load(&ctx.paths.catalog_path)?;
    let default_category =
        Category::parse(&ctx.cfg.classify.default_category).unwrap_or(Category::Product);

    let Some(markdown) = render_index(&catalog, default_category) else {
        report.issue("Catalog is empty; nothing to index.");
        return Ok(report);
    };

    write_atomic(&ctx.paths.index_path, markdown.as_bytes())?;
    report.detail(format!(
        "Wrote index to {}",
        ctx.paths.index_path.display()
    ));
    Ok(report)
}
