//! Generate the workflows catalog.
//!
//! Usage:
//!   flowcat
//!   flowcat --workflows-dir workflows --catalog workflows/metadata/workflows_catalog.yaml
//!   flowcat --update-ownership

use anyhow::Result;
use clap::Parser;
use flowcat::{
    BuilderConfig, CatalogFile, generate_catalog, load_existing_catalog, merge_catalogs,
    save_catalog, scan_workflows,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "flowcat")]
#[command(about = "Generate the workflows catalog from workflow definition files")]
struct Cli {
    /// Workflows tree to scan; discovered via FLOWCAT_ROOT or an upward
    /// search from the current directory when omitted.
    #[arg(long)]
    workflows_dir: Option<PathBuf>,
    /// Catalog output path; defaults to metadata/workflows_catalog.yaml
    /// under the workflows tree.
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Also update ownership.yaml (not implemented yet).
    #[arg(long)]
    update_ownership: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.workflows_dir {
        Some(dir) => BuilderConfig::for_workflows_dir(dir),
        None => BuilderConfig::discover()?,
    };
    if let Some(path) = cli.catalog {
        config.catalog_path = path;
    }

    println!("Scanning workflow files...");
    let workflows = scan_workflows(&config)?;
    if workflows.is_empty() {
        // Leave whatever catalog already exists untouched.
        eprintln!(
            "flowcat: warning: no workflow files found under {}",
            config.workflows_dir.display()
        );
        return Ok(());
    }
    println!("Found {} workflows", workflows.len());

    let fresh = generate_catalog(workflows);
    let existing = load_existing_catalog(&config.catalog_path);
    let merged = merge_catalogs(existing.map(|file| file.catalog), fresh);
    let total = merged.total_workflows;
    save_catalog(&CatalogFile { catalog: merged }, &config.catalog_path)?;

    println!("Catalog generated: {}", config.catalog_path.display());
    println!("Total workflows: {total}");

    if cli.update_ownership {
        println!("Note: --update-ownership not yet implemented");
    }

    println!("Catalog generation complete");
    Ok(())
}
