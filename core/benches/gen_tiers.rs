use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mineswinger_core::*;
use std::hint::black_box;

const FIELDS: [FieldSize; 5] = [
    FieldSize::Tiny,
    FieldSize::Small,
    FieldSize::Medium,
    FieldSize::Large,
    FieldSize::Huge,
];

fn generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for field in FIELDS {
        for density in [0.02, DEFAULT_DENSITY, 0.6] {
            let side = field.side_length();
            group.bench_with_input(
                BenchmarkId::new(format!("{side}x{side}"), density),
                &density,
                |b, &density| {
                    let mut seed = 0;
                    b.iter(|| {
                        seed += 1;
                        black_box(Grid::new(side, density, seed).unwrap())
                    })
                },
            );
        }
    }
    group.finish();
}

fn flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");
    for field in FIELDS {
        let side = field.side_length();
        // a single mine in the far corner opens nearly the whole board
        let grid = Grid::from_mine_coords(side, &[(side - 1, side - 1)]).unwrap();
        group.bench_function(format!("{side}x{side}"), |b| {
            b.iter_batched_ref(
                || grid.clone(),
                |grid| {
                    let mut engine = RevealEngine::new(grid, (0, 0)).unwrap();
                    engine.flood_fill((0, 0)).unwrap();
                    black_box(engine.finish())
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, generate, flood_fill);
criterion_main!(benches);
