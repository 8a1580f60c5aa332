//! Content Sync -- Keeps a MonoGame content manifest in step with the asset tree.
//!
//! This crate drives one synchronization run over a content root:
//!
//! 1. [`pipeline::find_manifest`] -- locate the `.mgcb` manifest under the root.
//! 2. [`content_manifest::manifest::Manifest::from_text`] -- parse it.
//! 3. [`scanner::scan`] -- list the files of every category directory.
//! 4. [`reconcile::reconcile`] -- keep entries backed by files, synthesize
//!    entries for new files, classify the rest as orphans.
//! 5. [`codegen::generate`] -- render the C# content index.
//! 6. Back up and rewrite the manifest, then write the index.
//!
//! Everything up to step 6 happens in memory, so a failure in any earlier
//! stage leaves the files on disk exactly as they were.
//!
//! # Example
//!
//! ```no_run
//! use content_sync::pipeline::{run, SyncConfig};
//!
//! let config = SyncConfig {
//!     root: "game/Content".into(),
//!     ..Default::default()
//! };
//! let report = run(&config).unwrap();
//! println!("{} new entries", report.synthesized.len());
//! ```

#![deny(unsafe_code)]

use std::fmt;
use std::path::PathBuf;

use content_manifest::ManifestError;

pub mod codegen;
pub mod pipeline;
pub mod reconcile;
pub mod scanner;

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// The step of a sync run an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Locate,
    Parse,
    Scan,
    WriteManifest,
    WriteIndex,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Locate => "locate",
            Stage::Parse => "parse",
            Stage::Scan => "scan",
            Stage::WriteManifest => "write-manifest",
            Stage::WriteIndex => "write-index",
        })
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by a sync run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// No `.mgcb` file directly under the content root. Not fatal: there is
    /// simply nothing to synchronize.
    #[error("no content manifest found in '{}'", root.display())]
    ManifestNotFound { root: PathBuf },

    /// The manifest could not be parsed or written.
    #[error("{stage} stage failed")]
    Manifest {
        stage: Stage,
        #[source]
        source: ManifestError,
    },

    /// A directory or file could not be read or written.
    #[error("{stage} stage failed: i/o error on '{}'", path.display())]
    Io {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An asset file name is not valid UTF-8 and cannot become an identifier.
    #[error("scan stage failed: file name of '{}' is not valid UTF-8", path.display())]
    InvalidFileName { path: PathBuf },
}

impl SyncError {
    /// The stage the run failed in.
    pub fn stage(&self) -> Stage {
        match self {
            SyncError::ManifestNotFound { .. } => Stage::Locate,
            SyncError::Manifest { stage, .. } | SyncError::Io { stage, .. } => *stage,
            SyncError::InvalidFileName { .. } => Stage::Scan,
        }
    }

    pub(crate) fn io(
        stage: Stage,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| SyncError::Io {
            stage,
            path,
            source,
        }
    }
}

/// Convenience result alias for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::codegen::{generate, sanitize_identifier, CodegenOptions};
    pub use crate::pipeline::{find_manifest, plan, run, SyncConfig, SyncPlan, SyncReport};
    pub use crate::reconcile::{reconcile, Reconciliation};
    pub use crate::scanner::{scan, CategoryAssets, DiscoveredAsset, ScanResult};
    pub use crate::{Stage, SyncError};
    pub use content_manifest::prelude::*;
}
