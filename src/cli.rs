use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{self, CommandContext, CommandReport};
use crate::error::InventoryError;
use crate::inventory::catalog;
use crate::inventory::config::load_config;
use crate::inventory::events;
use crate::inventory::paths::{PathOverrides, resolve_paths};

#[derive(Debug, Parser)]
#[command(
    name = "doc-inventory",
    version,
    about = "Manage documentation inventory metadata."
)]
struct Cli {
    /// Docs root to inventory (defaults to `docs` under the working directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,
    /// Catalog CSV location
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Rules JSON location
    #[arg(long, global = true)]
    rules: Option<PathBuf>,
    /// Generated index location
    #[arg(long, global = true)]
    index: Option<PathBuf>,
    /// Print the command report as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Command {
    /// List uncatalogued documents
    Scan,
    /// Add uncatalogued documents to the catalog
    Update,
    /// Validate catalog entries against the filesystem
    Audit,
    /// Generate the Markdown index from the catalog
    MarkdownIndex,
    /// Show resolved configuration and inventory counts
    Status,
}

fn print_report(report: &CommandReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for line in &report.details {
        println!("{line}");
    }
    for section in &report.findings {
        println!("{}", section.heading);
        for item in &section.items {
            println!("- {item}");
        }
        println!();
    }
    for issue in &report.issues {
        eprintln!("{issue}");
    }
    Ok(())
}

pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(1);
    };

    let cfg = load_config()?;
    let overrides = PathOverrides {
        docs_root: cli.root,
        catalog: cli.catalog,
        rules: cli.rules,
        index: cli.index,
    };
    let paths = resolve_paths(&cfg, &overrides)?;

    if command != Command::Status {
        if !paths.docs_root.is_dir() {
            return Err(InventoryError::DocsRootMissing(paths.docs_root).into());
        }
        catalog::ensure_header(&paths.catalog_path)?;
    }

    let ctx = CommandContext { cfg, paths };
    let report = match command {
        Command::Scan => commands::scan::run(&ctx)?,
        Command::Update => commands::update::run(&ctx)?,
        Command::Audit => commands::audit::run(&ctx)?,
        Command::MarkdownIndex => commands::markdown_index::run(&ctx)?,
        Command::Status => commands::status::run(&ctx)?,
    };

    print_report(&report, cli.json)?;
    let status = if report.ok { "ok" } else { "failed" };
    events::record(&ctx.paths, &report.command, status, &report.summary());
    Ok(report.exit_code())
}
