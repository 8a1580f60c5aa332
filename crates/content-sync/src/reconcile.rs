//! Reconciliation of manifest entries against the files found on disk.
//!
//! Asset files are the source of truth. An entry whose build name matches a
//! discovered file is kept, a discovered file without an entry gets one
//! synthesized from its category's template, and an entry of a scanned
//! category with no file behind it is orphaned.
//!
//! Entries belonging to a category whose directory was not scanned (or
//! whose name does not start with a category directory at all) cannot be
//! checked against anything and are always kept.

use std::collections::HashMap;

use content_manifest::category::Category;
use content_manifest::manifest::ManifestEntry;
use content_manifest::template::builder_for;

use crate::scanner::ScanResult;

/// The outcome of a reconciliation: a partition of the original entries
/// plus the newly synthesized ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Original entries that survive, in manifest order.
    pub kept: Vec<ManifestEntry>,
    /// New entries, in discovery order.
    pub synthesized: Vec<ManifestEntry>,
    /// Original entries with no backing file, in manifest order.
    pub orphaned: Vec<ManifestEntry>,
}

impl Reconciliation {
    /// The entries of the rewritten manifest: kept entries, then synthesized ones.
    pub fn surviving(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.kept.iter().chain(self.synthesized.iter())
    }

    /// `true` if the rewritten manifest has the same entries as the original.
    pub fn is_unchanged(&self) -> bool {
        self.synthesized.is_empty() && self.orphaned.is_empty()
    }
}

/// Match `entries` against the assets in `scan`.
pub fn reconcile(entries: Vec<ManifestEntry>, scan: &ScanResult) -> Reconciliation {
    let mut matched = vec![false; entries.len()];
    let mut synthesized = Vec::new();

    {
        let index: HashMap<&str, usize> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.name(), i))
            .collect();

        for asset in scan.assets() {
            match index.get(asset.full_name.as_str()) {
                Some(&i) => matched[i] = true,
                None => {
                    tracing::debug!(entry = %asset.full_name, "synthesizing manifest entry");
                    synthesized.push(builder_for(asset.category).build(&asset.full_name));
                }
            }
        }
    }

    let mut kept = Vec::with_capacity(entries.len());
    let mut orphaned = Vec::new();
    for (entry, matched) in entries.into_iter().zip(matched) {
        let checked = Category::of_entry_name(entry.name()).is_some_and(|c| scan.is_scanned(c));
        if matched || !checked {
            kept.push(entry);
        } else {
            tracing::debug!(entry = %entry.name(), "orphaned manifest entry");
            orphaned.push(entry);
        }
    }

    tracing::info!(
        kept = kept.len(),
        synthesized = synthesized.len(),
        orphaned = orphaned.len(),
        "reconciled manifest"
    );

    Reconciliation {
        kept,
        synthesized,
        orphaned,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
