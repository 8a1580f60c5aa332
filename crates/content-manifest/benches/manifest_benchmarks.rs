//! Manifest parse/render benchmarks.
//!
//! Real `.mgcb` files for a jam-sized game hold a few hundred entries; the
//! largest case here is an order of magnitude above that.
//!
//! Run with: `cargo bench --bench manifest_benchmarks`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use content_manifest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build manifest text with `entry_count` synthesized entries spread over
/// every category.
fn manifest_text(entry_count: usize) -> String {
    let mut entries = Vec::with_capacity(entry_count);
    for i in 0..entry_count {
        let category = Category::ALL[i % Category::ALL.len()];
        entries.push(builder_for(category).build(&format!("{category}/asset_{i}.bin")));
    }
    let header = ManifestHeader::new(vec![
        "/outputDir:bin/$(Platform)".to_owned(),
        "/platform:DesktopGL".to_owned(),
        String::new(),
        "#---------------------------------- Content ---------------------------------#".to_owned(),
    ]);
    ManifestWriter::render(&header, &entries, LineEnding::CrLf)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("manifest_parse");
    for &count in &[100usize, 1_000, 5_000] {
        let text = manifest_text(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &text, |b, text| {
            b.iter(|| Manifest::from_text(black_box(text)).unwrap());
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("manifest_render");
    for &count in &[100usize, 1_000, 5_000] {
        let manifest = Manifest::from_text(&manifest_text(count)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(count), &manifest, |b, manifest| {
            b.iter(|| black_box(manifest.render()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_render);
criterion_main!(benches);
