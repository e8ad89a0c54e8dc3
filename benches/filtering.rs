//! Performance benchmarks for sift
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sift::{ControllerConfig, DiscreteFacet, RangeFacet, SearchFilterController, TextIndex, TextFn};

#[derive(Clone)]
struct Profile {
    name: String,
    kudos: i64,
    tier: u8,
}

/// Generate a synthetic collection with predictable token overlap
fn make_profiles(count: usize) -> Vec<Profile> {
    const FIRST: &[&str] = &["john", "jane", "alice", "bob", "carol", "dave", "erin", "frank"];
    const LAST: &[&str] = &["smith", "jones", "taylor", "brown", "wilson", "evans"];

    (0..count)
        .map(|i| Profile {
            name: format!("{} {}", FIRST[i % FIRST.len()], LAST[i % LAST.len()]),
            kudos: ((i * 37) % 1000) as i64,
            tier: (i % 4) as u8,
        })
        .collect()
}

fn make_controller(records: Vec<Profile>) -> SearchFilterController<Profile> {
    let mut c = SearchFilterController::new();
    c.add_text_field(|p: &Profile| p.name.clone());
    c.register_facet(DiscreteFacet::new("tier", "Tier", |p: &Profile| p.tier))
        .unwrap();
    c.register_range(RangeFacet::new("kudos", "Kudos", 0, 1000, 10, |p: &Profile| p.kudos))
        .unwrap();
    c.initialize_with_records(records);
    c
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    for size in [1_000, 10_000] {
        let records = make_profiles(size);
        let extractors: Vec<TextFn<Profile>> = vec![Box::new(|p: &Profile| p.name.clone())];
        let config = ControllerConfig::default();
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| TextIndex::build(black_box(records), &extractors, &config));
        });
    }
    group.finish();
}

fn bench_index_query(c: &mut Criterion) {
    let records = make_profiles(10_000);
    let extractors: Vec<TextFn<Profile>> = vec![Box::new(|p: &Profile| p.name.clone())];
    let index = TextIndex::build(&records, &extractors, &ControllerConfig::default());

    c.bench_function("index_query_conjunctive", |b| {
        b.iter(|| index.query(black_box("john smith")));
    });
    c.bench_function("index_query_prefix", |b| {
        b.iter(|| index.query(black_box("jo")));
    });
}

fn bench_recompute(c: &mut Criterion) {
    let mut controller = make_controller(make_profiles(10_000));

    c.bench_function("recompute_facet_toggle", |b| {
        b.iter(|| {
            // Two toggles: narrow then restore, each a full recomputation
            controller.toggle_facet("tier", black_box(1u8)).unwrap();
            controller.toggle_facet("tier", black_box(1u8)).unwrap();
        });
    });

    c.bench_function("recompute_range_narrow", |b| {
        b.iter(|| {
            controller.set_range("kudos", black_box(300), 1000).unwrap();
            controller.reset_range("kudos").unwrap();
        });
    });

    c.bench_function("facet_counts", |b| {
        b.iter(|| controller.facet_counts::<u8>(black_box("tier")).unwrap());
    });
}

criterion_group!(benches, bench_index_build, bench_index_query, bench_recompute);
criterion_main!(benches);
