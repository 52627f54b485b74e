//! # Projection Benchmarks
//!
//! Performance benchmarks for the store, the projections and the
//! persisted form.
//!
//! Run with: `cargo bench -p novel-hider-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use novel_hider_core::{
    ActionContext, CategorizationEngine, Category, Filter, NovelRecord, RecordStore, SortOrder,
    Timestamp, category_counts, filtered_sorted, hidden_set, records_from_bytes, records_to_bytes,
};
use std::hint::black_box;

/// Create a store with `size` records cycling through every category.
fn create_store(size: usize) -> RecordStore {
    RecordStore::from_records((0..size).map(|i| {
        let category = Category::ALL[i % Category::ALL.len()];
        let ts = (size - i) as u64;
        NovelRecord::new(
            format!("https://twkan.com/book/{i}.html"),
            format!("Novel {i}"),
            category,
            Timestamp(ts),
        )
    }))
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_to_store");

    for size in [100, 1000, 10000].iter() {
        let store = create_store(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut store = store.clone();
                CategorizationEngine::apply_to_store(
                    &mut store,
                    "https://twkan.com/book/0.html",
                    "Novel 0",
                    Category::Reading.into(),
                    &ActionContext::chapter("https://twkan.com/txt/0/1", "Ch 1"),
                    Timestamp(1),
                );
                black_box(store)
            });
        });
    }

    group.finish();
}

fn bench_projections(c: &mut Criterion) {
    let mut group = c.benchmark_group("projections");

    for size in [100, 1000, 10000].iter() {
        let store = create_store(*size);
        group.bench_with_input(BenchmarkId::new("hidden_set", size), size, |b, _| {
            b.iter(|| black_box(hidden_set(&store)));
        });
        group.bench_with_input(BenchmarkId::new("filtered_sorted", size), size, |b, _| {
            b.iter(|| {
                black_box(filtered_sorted(
                    &store,
                    Filter::Only(Category::Reading),
                    SortOrder::Descending,
                ))
            });
        });
        group.bench_with_input(BenchmarkId::new("category_counts", size), size, |b, _| {
            b.iter(|| black_box(category_counts(&store)));
        });
    }

    group.finish();
}

fn bench_persistence(c: &mut Criterion) {
    let mut group = c.benchmark_group("persistence");

    for size in [100, 1000, 10000].iter() {
        let store = create_store(*size);
        let bytes = records_to_bytes(&store).expect("encode");
        group.bench_with_input(BenchmarkId::new("encode", size), size, |b, _| {
            b.iter(|| black_box(records_to_bytes(&store)));
        });
        group.bench_with_input(BenchmarkId::new("decode", size), size, |b, _| {
            b.iter(|| black_box(records_from_bytes(&bytes)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_apply, bench_projections, bench_persistence);
criterion_main!(benches);
