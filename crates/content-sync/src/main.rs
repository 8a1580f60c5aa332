//! Synchronize a MonoGame content manifest with the asset directories next to it.
//!
//! Usage:
//!   content-sync                       # sync the current directory
//!   content-sync --root game/Content   # sync another content root
//!   content-sync --dry-run --report sync.json

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use content_sync::pipeline::{run, SyncConfig, DEFAULT_INDEX_FILE, DEFAULT_NAMESPACE};
use content_sync::SyncError;

#[derive(Parser)]
#[command(name = "content-sync")]
#[command(about = "Reconcile a .mgcb manifest with the asset tree and generate a content index")]
struct Cli {
    /// Content root holding the manifest and the category directories
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Namespace of the generated index
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,
    /// Generated index file, relative to the root
    #[arg(long, default_value = DEFAULT_INDEX_FILE)]
    output: PathBuf,
    /// Reconcile and report without writing anything
    #[arg(long)]
    dry_run: bool,
    /// Write the run report as JSON to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = SyncConfig {
        root: cli.root,
        namespace: cli.namespace,
        index_file: cli.output,
        dry_run: cli.dry_run,
    };

    let report = match run(&config) {
        Ok(report) => report,
        Err(SyncError::ManifestNotFound { .. }) => {
            println!("No content file in directory");
            return Ok(());
        }
        Err(err) => {
            tracing::error!(stage = %err.stage(), error = %err, "content sync failed");
            return Err(err.into());
        }
    };

    if let Some(path) = cli.report {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    println!(
        "{}: {} kept, {} added, {} removed",
        report.manifest.display(),
        report.kept.len(),
        report.synthesized.len(),
        report.orphaned.len()
    );
    Ok(())
}
