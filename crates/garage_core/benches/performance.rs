//! Performance aggregator benchmarks.
//!
//! Run with: `cargo bench -p garage_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use garage_core::catalog::{PartCategory, PartStats, Vehicle};
use garage_core::garage::InstalledPart;
use garage_core::performance::calculate_performance;
use garage_test_utils::fixtures;

/// A vehicle with one part installed in every category.
fn fully_loaded() -> Vehicle {
    let mut vehicle = fixtures::skyline();
    for (i, category) in PartCategory::ALL.iter().enumerate() {
        let part = fixtures::universal_part(&format!("bench-{i}"), *category, 100).with_stats(
            PartStats {
                horsepower_add: Some(5.0),
                weight_reduction: Some(1.0),
                ..PartStats::default()
            },
        );
        vehicle.installed_parts.push(InstalledPart::new(part));
    }
    vehicle
}

pub fn aggregator_benchmark(c: &mut Criterion) {
    let stock = fixtures::skyline();
    c.bench_function("calculate_performance_stock", |b| {
        b.iter(|| calculate_performance(black_box(&stock)))
    });

    let loaded = fully_loaded();
    c.bench_function("calculate_performance_27_parts", |b| {
        b.iter(|| calculate_performance(black_box(&loaded)))
    });
}

criterion_group!(benches, aggregator_benchmark);
criterion_main!(benches);
