//! Property tests for reconciliation and identifier sanitization.
//!
//! Random manifests and random asset listings are reconciled, and the
//! partition invariants are checked on the result.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use content_sync::prelude::*;
use proptest::prelude::*;

fn category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn file_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,6}\\.(png|wav|mp3|fx|spritefont)"
}

/// Manifest entry names, unique, possibly in categories that are never scanned.
fn entry_names() -> impl Strategy<Value = BTreeSet<(Category, String)>> {
    prop::collection::btree_set((category(), file_name()), 0..16)
}

/// Files on disk per scanned category.
fn scanned() -> impl Strategy<Value = BTreeMap<Category, BTreeSet<String>>> {
    prop::collection::btree_map(category(), prop::collection::btree_set(file_name(), 0..8), 0..5)
}

fn to_scan(files: &BTreeMap<Category, BTreeSet<String>>) -> ScanResult {
    ScanResult::from_groups(
        files
            .iter()
            .map(|(category, names)| CategoryAssets {
                category: *category,
                assets: names.iter().map(|n| DiscoveredAsset::new(*category, n)).collect(),
            })
            .collect(),
    )
}

fn to_entries(names: &BTreeSet<(Category, String)>) -> Vec<ManifestEntry> {
    names
        .iter()
        .map(|(category, file)| builder_for(*category).build(&format!("{category}/{file}")))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1_000))]

    #[test]
    fn reconciliation_partitions_entries(names in entry_names(), files in scanned()) {
        let entries = to_entries(&names);
        let scan = to_scan(&files);
        let result = reconcile(entries.clone(), &scan);

        // Every original entry lands in exactly one of kept / orphaned, in order.
        prop_assert_eq!(result.kept.len() + result.orphaned.len(), entries.len());
        let original: Vec<_> = entries.iter().map(|e| e.name()).collect();
        let kept: Vec<_> = result.kept.iter().map(|e| e.name()).collect();
        let mut expected_kept = original.clone();
        expected_kept.retain(|n| kept.contains(n));
        prop_assert_eq!(kept, expected_kept);

        // Every discovered asset is backed by exactly one surviving entry.
        let surviving: Vec<_> = result.surviving().map(|e| e.name()).collect();
        let unique: HashSet<_> = surviving.iter().collect();
        prop_assert_eq!(unique.len(), surviving.len());
        for asset in scan.assets() {
            prop_assert!(surviving.contains(&asset.full_name.as_str()));
        }

        // Orphans belong to scanned categories and have no file.
        for orphan in &result.orphaned {
            let category = Category::of_entry_name(orphan.name()).unwrap();
            prop_assert!(scan.is_scanned(category));
            prop_assert!(scan.assets().all(|a| a.full_name != orphan.name()));
        }

        // Entries of unscanned categories are always kept.
        for entry in &entries {
            let category = Category::of_entry_name(entry.name()).unwrap();
            if !scan.is_scanned(category) {
                prop_assert!(result.kept.contains(entry));
            }
        }
    }

    #[test]
    fn reconciling_the_result_again_changes_nothing(names in entry_names(), files in scanned()) {
        let scan = to_scan(&files);
        let first = reconcile(to_entries(&names), &scan);
        let surviving: Vec<_> = first.surviving().cloned().collect();

        let second = reconcile(surviving.clone(), &scan);
        prop_assert!(second.is_unchanged());
        prop_assert_eq!(second.kept, surviving);
    }

    #[test]
    fn sanitized_identifiers_are_word_characters(base in "\\PC{0,24}") {
        let sanitized = sanitize_identifier(&base);
        prop_assert_eq!(sanitized.chars().count(), base.chars().count());
        prop_assert!(sanitized.chars().all(|c| c.is_alphanumeric() || c == '_'));
        prop_assert_eq!(sanitize_identifier(&sanitized), sanitized.clone());
    }
}
