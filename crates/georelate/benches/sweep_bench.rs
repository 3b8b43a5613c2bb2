//! Criterion microbenches for the noding hot path.
//!
//! - Orientation predicate: well-conditioned vs near-collinear (exact fallback).
//! - Self-noding of random polylines: n in {16, 64, 256, 1024}; crossings grow ~n².

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use georelate::graph::GeometryGraph;
use georelate::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn bench_orientation(c: &mut Criterion) {
    let mut group = c.benchmark_group("orientation");
    group.bench_function(BenchmarkId::new("orientation_index", "random"), |b| {
        b.iter_batched(
            || {
                let mut rng = StdRng::seed_from_u64(7);
                let mut p = || Coordinate::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
                (p(), p(), p())
            },
            |(p1, p2, q)| {
                let _o = orientation_index(p1, p2, q);
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function(BenchmarkId::new("orientation_index", "near_collinear"), |b| {
        b.iter_batched(
            || {
                let p1 = Coordinate::new(0.1, 0.1);
                let p2 = Coordinate::new(7.3, 7.3);
                let q = Coordinate::new(3.3, f64::from_bits(3.3f64.to_bits() + 1));
                (p1, p2, q)
            },
            |(p1, p2, q)| {
                let _o = orientation_index(p1, p2, q);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_self_nodes(c: &mut Criterion) {
    let mut group = c.benchmark_group("self_nodes");
    let cfg = RelateCfg::default();
    for &n in &[16usize, 64, 256, 1024] {
        group.bench_with_input(BenchmarkId::new("random_polyline", n), &n, |b, &n| {
            b.iter_batched(
                || {
                    let pts = draw_line_string(
                        VertexCount::Fixed(n),
                        Coordinate::new(0.0, 0.0),
                        1.0,
                        0.0,
                        ReplayToken { seed: 2025, index: n as u64 },
                    )
                    .unwrap();
                    Geometry::LineString(pts)
                },
                |geom| {
                    let mut g = GeometryGraph::build(&geom, 0, &cfg).unwrap();
                    let _si = g.compute_self_nodes().unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_orientation, bench_self_nodes);
criterion_main!(benches);
