//! Criterion microbenches for the planning hot paths.
//!
//! - racetrack: line ordering for both strategies over growing line counts.
//! - plan: full racetrack generation over seeded random AOIs.
//! - footprint: union of segment quads along a zig-zag line.
//!
//! Results live under `target/criterion`.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use flightplan::aoi::rand::{draw_aoi_radial, AoiCfg, ReplayToken, VertexCount};
use flightplan::prelude::*;

fn bench_line_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("racetrack");
    for n in [64usize, 512, 4096] {
        for strategy in Strategy::ALL {
            group.bench_with_input(
                BenchmarkId::new(strategy.name(), n),
                &n,
                |b, &n| b.iter(|| line_order(strategy, n, 5)),
            );
        }
    }
    group.finish();
}

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");
    let planner = Planner::new(PlanarService::new());
    let cfg = AoiCfg {
        vertex_count: VertexCount::Uniform { min: 6, max: 24 },
        aspect: 2.0,
        ..AoiCfg::default()
    };
    let sensor = Sensor {
        name: "bench".into(),
        opening_angle_deg: 60.0,
    };
    let mut index = 0u64;
    group.bench_function(BenchmarkId::new("generate_racetrack", "random"), |b| {
        b.iter_batched(
            || {
                index = index.wrapping_add(1);
                let tok = ReplayToken { seed: 42, index };
                Aoi::new(Crs::metric("LOCAL"), draw_aoi_radial(cfg, tok))
            },
            |aoi| {
                black_box(planner.generate_racetrack_with(
                    &aoi,
                    &sensor,
                    1500.0,
                    0.2,
                    4000.0,
                    Strategy::FlyToTopAndBack,
                ))
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_footprint(c: &mut Criterion) {
    let mut group = c.benchmark_group("footprint");
    let svc = PlanarService::new();
    for n in [8usize, 64] {
        let line: Vec<Point2> = (0..n)
            .map(|k| Point2::new(k as f64 * 100.0, if k % 2 == 0 { 0.0 } else { 80.0 }))
            .collect();
        let parts = vec![line];
        group.bench_with_input(BenchmarkId::new("build_footprint", n), &parts, |b, parts| {
            b.iter(|| build_footprint(&svc, parts, 30.0))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_line_order, bench_plan, bench_footprint);
criterion_main!(benches);
