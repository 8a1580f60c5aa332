//! Rendering and safe rewriting of the manifest file.
//!
//! [`ManifestWriter::write`] is a two-step operation: the original manifest
//! text is first copied to `<manifest>.old`, and only once that copy is on
//! disk is the manifest itself overwritten. A failed backup aborts the write
//! with the manifest untouched.

use std::fs;
use std::path::{Path, PathBuf};

use crate::manifest::{LineEnding, ManifestEntry, ManifestHeader};
use crate::ManifestError;

/// Suffix appended to the manifest path to form the backup path.
pub const BACKUP_SUFFIX: &str = ".old";

/// Writes manifests back to disk.
#[derive(Debug, Clone)]
pub struct ManifestWriter {
    path: PathBuf,
}

impl ManifestWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<manifest>.old`.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(BACKUP_SUFFIX);
        PathBuf::from(name)
    }

    /// Render header and entries to manifest text.
    ///
    /// The header is followed by one blank line; every entry is followed by
    /// one blank line. Entries are written in the order given.
    pub fn render<'a, I>(header: &ManifestHeader, entries: I, line_ending: LineEnding) -> String
    where
        I: IntoIterator<Item = &'a ManifestEntry>,
    {
        let nl = line_ending.as_str();
        let mut out = header.lines().join(nl);
        out.push_str(nl);
        out.push_str(nl);
        for entry in entries {
            out.push_str(&entry.lines().join(nl));
            out.push_str(nl);
            out.push_str(nl);
        }
        out
    }

    /// Back up `original` and then replace the manifest with `rendered`.
    ///
    /// Returns the backup path. The manifest is only opened for writing
    /// after the backup has been written in full.
    pub fn write(&self, original: &str, rendered: &str) -> crate::Result<PathBuf> {
        let backup = self.backup_path();
        fs::write(&backup, original).map_err(|source| ManifestError::BackupWrite {
            path: backup.clone(),
            source,
        })?;
        tracing::debug!(path = %backup.display(), bytes = original.len(), "wrote manifest backup");

        fs::write(&self.path, rendered).map_err(|source| ManifestError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), bytes = rendered.len(), "rewrote manifest");

        Ok(backup)
    }

    /// Put the backup written by [`write`](Self::write) back in place.
    pub fn restore(&self) -> crate::Result<()> {
        let backup = self.backup_path();
        fs::copy(&backup, &self.path).map_err(|source| ManifestError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), "restored manifest from backup");
        Ok(())
    }
}
