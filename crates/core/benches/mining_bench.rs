//! Mining pipeline benchmarks.
//!
//! Measures end-to-end `mine()` latency on synthetic point clouds of
//! increasing size, with and without the coarse-grid pruner, to track
//! the cost of the NeighborGraph build and the level-wise enumeration
//! loop as input density grows.
#![allow(missing_docs, reason = "Criterion macros generate undocumented items")]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use colocation_core::{MiningConfig, RawPoint};

const TYPE_NAMES: [&str; 4] = ["school", "hospital", "park", "cafe"];
const POINT_COUNTS: &[usize] = &[200, 1_000, 4_000];

/// Deterministic xorshift-based point cloud, clustered loosely around a
/// coarse grid so that a meaningful fraction of instances actually
/// neighbor each other at the chosen radius.
fn synthetic_points(count: usize, seed: u64) -> Vec<RawPoint> {
    let mut state = seed.max(1);
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    (0..count)
        .map(|i| {
            let type_name = TYPE_NAMES[i % TYPE_NAMES.len()];
            let x = (next() % 1000) as f64 / 10.0;
            let y = (next() % 1000) as f64 / 10.0;
            RawPoint::new(i as u64, type_name, x, y)
        })
        .collect()
}

fn bench_mine(c: &mut Criterion) {
    let mut group = c.benchmark_group("mine");
    group.sample_size(10);

    for &point_count in POINT_COUNTS {
        let points = synthetic_points(point_count, 42);

        for coarse_pruning in [false, true] {
            let config = MiningConfig::builder()
                .radius(5.0)
                .min_prevalence(0.1)
                .coarse_pruning(coarse_pruning)
                .build()
                .expect("bench config must be valid");

            let label = format!("{point_count}_coarse_{coarse_pruning}");
            group.bench_with_input(BenchmarkId::from_parameter(&label), &points, |b, points| {
                b.iter(|| colocation_core::mine(points, &config).expect("mine must succeed"));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_mine);
criterion_main!(benches);
