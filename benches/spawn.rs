use std::hint::black_box;

use criterion::*;

mod common;
use common::*;

fn spawn_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("spawn");

    group.bench_function("spawn_100k_bundles", |b| {
        b.iter(|| {
            let mut world = make_world(0);
            for i in 0..AGENTS_MED {
                world.spawn((Position { x: i as f32, y: 0.0 }, Wealth { value: 1.0 }));
            }
            black_box(world);
        });
    });

    group.bench_function("spawn_100k_bundles_reserved", |b| {
        b.iter(|| {
            let mut world = make_world(AGENTS_MED);
            for i in 0..AGENTS_MED {
                world.spawn((Position { x: i as f32, y: 0.0 }, Wealth { value: 1.0 }));
            }
            black_box(world);
        });
    });

    group.bench_function("create_then_add_100k", |b| {
        b.iter(|| {
            let mut world = make_world(0);
            for i in 0..AGENTS_MED {
                let e = world.create_entity();
                world.add_component(e, Position { x: i as f32, y: 0.0 });
                world.add_component(e, Wealth { value: 1.0 });
            }
            black_box(world);
        });
    });

    group.finish();
}

criterion_group!(benches, spawn_benchmark);
criterion_main!(benches);
