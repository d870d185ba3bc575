//! Benchmarks for the per-frame deformation and for regeneration.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ribbons::prelude::*;
use ribbons::{GeometryParams, RibbonGeometryFactory};

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("controller_tick");

    for (ribbons, segments) in [(10, 50), (50, 100), (200, 200)] {
        let config = RibbonConfig::new()
            .with_ribbons_count(ribbons)
            .with_segment_count(segments);
        let mut controller = Controller::with_seed(config, 1);
        let mut frame = 0u32;

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", ribbons, segments)),
            &(ribbons, segments),
            |b, _| {
                b.iter(|| {
                    frame = frame.wrapping_add(1);
                    let t = frame as f32 * 0.05;
                    controller.set_pointer_target(Vec3::new(t.sin(), t.cos(), 0.0));
                    controller.tick(black_box(1.0 / 60.0));
                })
            },
        );
    }

    group.finish();
}

fn bench_regenerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("regenerate");

    group.bench_function("geometry_7x199", |b| {
        let params = GeometryParams {
            radius_near: 0.01,
            radius_far: 0.1,
            height: 2.0,
            radial_segments: 7,
            longitudinal_segments: 199,
            anchor_depth: 0.0,
        };
        b.iter(|| black_box(RibbonGeometryFactory.build(black_box(params))))
    });

    group.bench_function("set_100", |b| {
        let config = RibbonConfig::new().with_ribbons_count(100);
        let mut set = RibbonSet::with_seed(1);
        b.iter(|| set.regenerate(black_box(&config)))
    });

    group.finish();
}

criterion_group!(benches, bench_tick, bench_regenerate);
criterion_main!(benches);
