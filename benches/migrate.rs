use std::hint::black_box;

use criterion::*;

mod common;
use common::*;

fn migrate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("migrate");

    group.bench_function("add_component_10k", |b| {
        b.iter_batched(
            || {
                let mut world = make_world(AGENTS_SMALL);
                let entities = populate(&mut world, AGENTS_SMALL);
                (world, entities)
            },
            |(mut world, entities)| {
                for (i, e) in entities.into_iter().enumerate() {
                    if i % 4 != 0 {
                        world.add_component(e, Velocity { dx: 0.0, dy: 1.0 });
                    }
                }
                black_box(world);
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("remove_component_10k", |b| {
        b.iter_batched(
            || {
                let mut world = make_world(AGENTS_SMALL);
                let entities = populate(&mut world, AGENTS_SMALL);
                (world, entities)
            },
            |(mut world, entities)| {
                for e in entities {
                    world.remove_components::<(Productivity,)>(e);
                }
                black_box(world);
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("remove_entity_10k", |b| {
        b.iter_batched(
            || {
                let mut world = make_world(AGENTS_SMALL);
                let entities = populate(&mut world, AGENTS_SMALL);
                (world, entities)
            },
            |(mut world, entities)| {
                for e in entities {
                    world.remove_entity(e);
                }
                black_box(world);
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, migrate_benchmark);
criterion_main!(benches);
