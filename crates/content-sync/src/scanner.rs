//! Discovery of asset files under the category directories of a content root.

use std::fs;
use std::io;
use std::path::Path;

use content_manifest::category::Category;

use crate::{Stage, SyncError};

// ---------------------------------------------------------------------------
// DiscoveredAsset
// ---------------------------------------------------------------------------

/// A file found in a category directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredAsset {
    pub category: Category,
    /// File name without its extension, e.g. `tiles`.
    pub base_name: String,
    /// Manifest build name, e.g. `Texture2D/tiles.png`.
    pub full_name: String,
    /// Runtime load identifier, e.g. `Texture2D/tiles`.
    pub identifier: String,
}

impl DiscoveredAsset {
    /// Describe the file `file_name` found in `category`'s directory.
    pub fn new(category: Category, file_name: &str) -> Self {
        let base_name = Path::new(file_name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(file_name)
            .to_owned();
        Self {
            category,
            full_name: format!("{category}/{file_name}"),
            identifier: format!("{category}/{base_name}"),
            base_name,
        }
    }
}

// ---------------------------------------------------------------------------
// ScanResult
// ---------------------------------------------------------------------------

/// The assets of one category directory, in directory-listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryAssets {
    pub category: Category,
    pub assets: Vec<DiscoveredAsset>,
}

/// Everything found by one scan. Only categories whose directory exists
/// appear; an existing but empty directory appears with no assets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    groups: Vec<CategoryAssets>,
}

impl ScanResult {
    pub fn from_groups(groups: Vec<CategoryAssets>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[CategoryAssets] {
        &self.groups
    }

    pub fn group(&self, category: Category) -> Option<&CategoryAssets> {
        self.groups.iter().find(|g| g.category == category)
    }

    /// Whether `category`'s directory was present.
    pub fn is_scanned(&self, category: Category) -> bool {
        self.group(category).is_some()
    }

    /// All assets, group by group.
    pub fn assets(&self) -> impl Iterator<Item = &DiscoveredAsset> {
        self.groups.iter().flat_map(|g| g.assets.iter())
    }

    pub fn asset_count(&self) -> usize {
        self.groups.iter().map(|g| g.assets.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Scanning
// ---------------------------------------------------------------------------

/// List the regular files directly inside each category directory under `root`.
///
/// Categories are visited in the order given; files keep the order the
/// directory listing returns them in. Missing directories are skipped.
pub fn scan(root: &Path, categories: &[Category]) -> crate::Result<ScanResult> {
    let mut groups = Vec::new();

    for &category in categories {
        let dir = root.join(category.dir_name());
        if !is_directory(&dir)? {
            tracing::debug!(
                category = %category,
                dir = %dir.display(),
                "category directory absent, skipping"
            );
            continue;
        }

        let mut assets = Vec::new();
        for entry in fs::read_dir(&dir).map_err(SyncError::io(Stage::Scan, &dir))? {
            let entry = entry.map_err(SyncError::io(Stage::Scan, &dir))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let file_name = entry
                .file_name()
                .into_string()
                .map_err(|_| SyncError::InvalidFileName { path: path.clone() })?;

            let asset = DiscoveredAsset::new(category, &file_name);
            tracing::debug!(asset = %asset.full_name, "discovered asset");
            assets.push(asset);
        }

        tracing::info!(category = %category, assets = assets.len(), "scanned category");
        groups.push(CategoryAssets { category, assets });
    }

    Ok(ScanResult { groups })
}

/// `Ok(false)` when nothing (or a non-directory) exists at `path`.
fn is_directory(path: &Path) -> crate::Result<bool> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(SyncError::io(Stage::Scan, path)(e)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
