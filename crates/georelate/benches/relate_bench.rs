//! Criterion benchmarks for `relate` on radial polygons and random lines.
//! Focus sizes: n in {8, 32, 128, 512} vertices per operand.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use georelate::prelude::*;

fn radial(n: usize, centre: Coordinate, seed: u64) -> Geometry {
    let cfg = RadialCfg {
        vertex_count: VertexCount::Fixed(n),
        centre,
        ..RadialCfg::default()
    };
    let p = draw_polygon_radial(cfg, ReplayToken { seed, index: 0 }).unwrap();
    Geometry::Polygon(p)
}

fn bench_relate(c: &mut Criterion) {
    let mut group = c.benchmark_group("relate");
    for &n in &[8usize, 32, 128, 512] {
        group.bench_with_input(BenchmarkId::new("polygon_overlap", n), &n, |b, &n| {
            b.iter_batched(
                || (radial(n, Coordinate::new(0.0, 0.0), 41), radial(n, Coordinate::new(0.7, 0.2), 42)),
                |(a, p)| {
                    let _im = relate(&a, &p).unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("line_polygon", n), &n, |b, &n| {
            b.iter_batched(
                || {
                    let l = draw_line_string(
                        VertexCount::Fixed(n),
                        Coordinate::new(0.0, 0.0),
                        1.5,
                        0.0,
                        ReplayToken { seed: 43, index: 0 },
                    )
                    .unwrap();
                    (Geometry::LineString(l), radial(n, Coordinate::new(0.0, 0.0), 44))
                },
                |(l, p)| {
                    let _im = relate(&l, &p).unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("has_proper_intersection", n), &n, |b, &n| {
            b.iter_batched(
                || (radial(n, Coordinate::new(0.0, 0.0), 45), radial(n, Coordinate::new(0.9, 0.0), 46)),
                |(a, p)| {
                    let _hit = has_proper_intersection(&a, &p).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_relate);
criterion_main!(benches);
