//! One complete synchronization run.
//!
//! [`plan`] does all the reading and computing and holds the results in
//! memory; [`SyncPlan::apply`] performs the writes. [`run`] is both in
//! sequence. Nothing is written unless planning succeeded as a whole.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use content_manifest::category::Category;
use content_manifest::manifest::{Manifest, ManifestEntry, ManifestHeader};
use content_manifest::writer::ManifestWriter;
use serde::Serialize;

use crate::codegen::{generate, CodegenOptions};
use crate::reconcile::{reconcile, Reconciliation};
use crate::scanner::{scan, ScanResult};
use crate::{Stage, SyncError};

/// Extension identifying the manifest file.
pub const MANIFEST_EXTENSION: &str = "mgcb";

/// File name of the generated index, relative to the content root.
pub const DEFAULT_INDEX_FILE: &str = "ContentIndex.cs";

/// Namespace of the generated index.
pub const DEFAULT_NAMESPACE: &str = "Content";

// ---------------------------------------------------------------------------
// SyncConfig
// ---------------------------------------------------------------------------

/// Configuration for a sync run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Content root holding the manifest and the category directories.
    pub root: PathBuf,
    /// Namespace of the generated index.
    pub namespace: String,
    /// Path of the generated index, relative to `root`.
    pub index_file: PathBuf,
    /// Compute and report, but write nothing.
    pub dry_run: bool,
}

impl Default for SyncConfig {
    /// The current directory, `ContentIndex.cs`, namespace `Content`.
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            namespace: DEFAULT_NAMESPACE.to_owned(),
            index_file: PathBuf::from(DEFAULT_INDEX_FILE),
            dry_run: false,
        }
    }
}

impl SyncConfig {
    pub fn index_path(&self) -> PathBuf {
        self.root.join(&self.index_file)
    }
}

// ---------------------------------------------------------------------------
// SyncReport
// ---------------------------------------------------------------------------

/// Summary of a sync run, serializable to JSON.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub manifest: PathBuf,
    /// Backup of the pre-run manifest; `None` on a dry run.
    pub backup: Option<PathBuf>,
    pub index: PathBuf,
    pub dry_run: bool,
    /// Asset count per scanned category.
    pub categories: BTreeMap<String, usize>,
    pub kept: Vec<String>,
    pub synthesized: Vec<String>,
    pub orphaned: Vec<String>,
    /// blake3 of the rewritten manifest text.
    pub manifest_digest: String,
    /// blake3 of the generated index text.
    pub index_digest: String,
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// The fully computed result of a run, not yet written to disk.
#[derive(Debug, Clone)]
pub struct SyncPlan {
    pub manifest_path: PathBuf,
    /// The manifest text as read, written verbatim to the backup.
    pub original: String,
    pub header: ManifestHeader,
    pub scan: ScanResult,
    pub reconciliation: Reconciliation,
    pub rendered_manifest: String,
    pub rendered_index: String,
}

/// The first `*.mgcb` file directly under `root`, by file name.
pub fn find_manifest(root: &Path) -> crate::Result<PathBuf> {
    let mut candidates = Vec::new();
    for entry in fs::read_dir(root).map_err(SyncError::io(Stage::Locate, root))? {
        let path = entry.map_err(SyncError::io(Stage::Locate, root))?.path();
        let is_manifest = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(MANIFEST_EXTENSION));
        if is_manifest && path.is_file() {
            candidates.push(path);
        }
    }

    candidates.sort();
    if candidates.len() > 1 {
        tracing::warn!(count = candidates.len(), "several manifests found, using the first");
    }
    candidates
        .into_iter()
        .next()
        .ok_or_else(|| SyncError::ManifestNotFound {
            root: root.to_path_buf(),
        })
}

/// Locate, parse, scan, reconcile and render, without touching the disk.
pub fn plan(config: &SyncConfig) -> crate::Result<SyncPlan> {
    let manifest_path = find_manifest(&config.root)?;
    tracing::info!(manifest = %manifest_path.display(), "found content manifest");

    let original = fs::read_to_string(&manifest_path)
        .map_err(SyncError::io(Stage::Parse, &manifest_path))?;
    let manifest = Manifest::from_text(&original).map_err(|source| SyncError::Manifest {
        stage: Stage::Parse,
        source,
    })?;
    let (header, entries, line_ending) = manifest.into_parts();
    tracing::info!(entries = entries.len(), "parsed manifest");

    let scan = scan(&config.root, &Category::ALL)?;
    let reconciliation = reconcile(entries, &scan);

    let rendered_manifest =
        ManifestWriter::render(&header, reconciliation.surviving(), line_ending);
    let rendered_index = generate(
        &scan,
        &CodegenOptions {
            namespace: config.namespace.clone(),
            line_ending,
        },
    );

    Ok(SyncPlan {
        manifest_path,
        original,
        header,
        scan,
        reconciliation,
        rendered_manifest,
        rendered_index,
    })
}

impl SyncPlan {
    /// Write the manifest (backup first) and the index, unless `config`
    /// asks for a dry run.
    pub fn apply(&self, config: &SyncConfig) -> crate::Result<SyncReport> {
        let index_path = config.index_path();
        if config.dry_run {
            tracing::info!("dry run, nothing written");
            return Ok(self.report(None, index_path, true));
        }

        let writer = ManifestWriter::new(&self.manifest_path);
        let backup = writer
            .write(&self.original, &self.rendered_manifest)
            .map_err(|source| SyncError::Manifest {
                stage: Stage::WriteManifest,
                source,
            })?;

        // A failed index write rolls the manifest back so neither output changes.
        if let Err(source) = fs::write(&index_path, &self.rendered_index) {
            if let Err(err) = writer.restore() {
                tracing::error!(
                    error = %err,
                    "could not restore manifest after index write failure"
                );
            }
            return Err(SyncError::io(Stage::WriteIndex, &index_path)(source));
        }
        tracing::info!(
            path = %index_path.display(),
            bytes = self.rendered_index.len(),
            "wrote content index"
        );

        Ok(self.report(Some(backup), index_path, false))
    }

    fn report(&self, backup: Option<PathBuf>, index: PathBuf, dry_run: bool) -> SyncReport {
        let names = |entries: &[ManifestEntry]| -> Vec<String> {
            entries.iter().map(|e| e.name().to_owned()).collect()
        };
        SyncReport {
            manifest: self.manifest_path.clone(),
            backup,
            index,
            dry_run,
            categories: self
                .scan
                .groups()
                .iter()
                .map(|g| (g.category.dir_name().to_owned(), g.assets.len()))
                .collect(),
            kept: names(&self.reconciliation.kept),
            synthesized: names(&self.reconciliation.synthesized),
            orphaned: names(&self.reconciliation.orphaned),
            manifest_digest: blake3::hash(self.rendered_manifest.as_bytes()).to_hex().to_string(),
            index_digest: blake3::hash(self.rendered_index.as_bytes()).to_hex().to_string(),
        }
    }
}

/// Run a complete sync: [`plan`] then [`SyncPlan::apply`].
pub fn run(config: &SyncConfig) -> crate::Result<SyncReport> {
    let plan = plan(config)?;
    let report = plan.apply(config)?;
    tracing::info!(
        kept = report.kept.len(),
        synthesized = report.synthesized.len(),
        orphaned = report.orphaned.len(),
        manifest_digest = %report.manifest_digest,
        "content sync complete"
    );
    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
