//! Content Manifest -- Model, parser and writer for MonoGame `.mgcb` build manifests.
//!
//! This crate owns everything that touches manifest text: the asset
//! [`Category`](category::Category) vocabulary, the line-oriented
//! [`Manifest`](manifest::Manifest) model and its parser, the per-category
//! entry templates used to synthesize build blocks for new assets, and the
//! backup-then-overwrite [`ManifestWriter`](writer::ManifestWriter).
//!
//! # Modules
//!
//! - [`category`]: The closed set of asset categories and their directory names.
//! - [`manifest`]: Header + ordered build entries, parsing and rendering.
//! - [`template`]: Fail-closed registry of default entry builders.
//! - [`writer`]: Two-step backup and overwrite of the manifest file.
//!
//! # Example
//!
//! ```
//! use content_manifest::prelude::*;
//!
//! let text = "#---- Content ----#\n\n#begin Song/theme.mp3\n/build:Song/theme.mp3\n";
//! let manifest = Manifest::from_text(text).unwrap();
//! assert_eq!(manifest.entries().len(), 1);
//! assert_eq!(manifest.entries()[0].name(), "Song/theme.mp3");
//! ```

#![deny(unsafe_code)]

use std::path::PathBuf;

pub mod category;
pub mod manifest;
pub mod template;
pub mod writer;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced while reading, synthesizing or writing manifest data.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The manifest text does not follow the block format.
    #[error("malformed manifest at line {line}: {reason}")]
    Format {
        /// 1-based line number the problem was detected at.
        line: usize,
        /// What was wrong.
        reason: String,
    },

    /// A category name outside the supported set was requested.
    #[error("unsupported asset category '{name}' (expected one of: Effect, Song, SoundEffect, SpriteFont, Texture2D)")]
    UnsupportedCategory {
        /// The rejected category name.
        name: String,
    },

    /// The backup copy could not be written; the manifest was left untouched.
    #[error("failed to write manifest backup '{}'", path.display())]
    BackupWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing the manifest file failed.
    #[error("manifest i/o error on '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience result alias for manifest operations.
pub type Result<T> = std::result::Result<T, ManifestError>;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::category::Category;
    pub use crate::manifest::{LineEnding, Manifest, ManifestEntry, ManifestHeader};
    pub use crate::template::{builder_for, builder_for_name, EntryBuilder};
    pub use crate::writer::{ManifestWriter, BACKUP_SUFFIX};
    pub use crate::ManifestError;
}
