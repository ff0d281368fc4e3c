//! Criterion benchmarks for the colony step loop and neighbor queries.

use colony_forage::spatial::{SparseHashGrid, Torus};
use colony_forage::{Colony, ColonyConfig, Position};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

/// Benchmark: 100 steps of the reference scenario (100 agents).
fn bench_reference_100_steps(c: &mut Criterion) {
    c.bench_function("reference_100_steps", |b| {
        b.iter_batched(
            || Colony::new(ColonyConfig::default()).unwrap(),
            |mut colony| {
                colony.run(100).unwrap();
                black_box(colony.metrics().len());
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: one step with 5000 agents, sequential vs rayon neighbor queries.
fn bench_large_colony_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_colony_step");
    for (label, threshold) in [("sequential", usize::MAX), ("parallel", 1)] {
        let mut config = ColonyConfig::default().with_agent_count(5000);
        config.parallel_threshold = threshold;
        let mut colony = Colony::new(config).unwrap();
        // Spread agents out from the nest first
        colony.run(200).unwrap();

        group.bench_function(label, |b| {
            b.iter(|| {
                let entry = colony.step().unwrap();
                black_box(entry.uncommitted);
            });
        });
    }
    group.finish();
}

/// Benchmark: rebuild plus neighbor query for 2500 agents on a 50x50 torus.
fn bench_neighbor_queries(c: &mut Criterion) {
    let torus = Torus::new(50);
    let positions: Vec<Position> = (0..2500u64)
        .map(|i| {
            let x = (i.wrapping_mul(6364136223846793007) % 50) as i32;
            let y = (i.wrapping_mul(1442695040888963407) % 50) as i32;
            Position::new(x, y)
        })
        .collect();
    let mut grid = SparseHashGrid::new(torus);

    c.bench_function("neighbor_queries_2500", |b| {
        b.iter(|| {
            grid.rebuild(&positions);
            for (i, &pos) in positions.iter().enumerate() {
                black_box(grid.query_neighbors(pos, Some(i)));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_reference_100_steps,
    bench_large_colony_step,
    bench_neighbor_queries
);
criterion_main!(benches);
