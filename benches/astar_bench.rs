use criterion::{criterion_group, criterion_main, Criterion};
use grid_astar::{Cell, Grid, Pathfinder, SearchConfig};
use rand::prelude::*;
use std::hint::black_box;

fn random_scenarios(grid: &Grid, rng: &mut StdRng, n: usize) -> Vec<(Cell, Cell)> {
    let free = grid
        .cells()
        .filter(|c| grid.is_traversable(c))
        .collect::<Vec<Cell>>();
    (0..n)
        .map(|_| (*free.choose(rng).unwrap(), *free.choose(rng).unwrap()))
        .collect()
}

fn random_grid_bench(c: &mut Criterion) {
    for (size, density) in [(15, 0.1), (64, 0.2), (128, 0.3)] {
        let mut rng = StdRng::seed_from_u64(0);
        let grid = Grid::random(size, size, density, &mut rng).unwrap();
        let scenarios = random_scenarios(&grid, &mut rng, 100);
        for (name, config) in [
            ("standard", SearchConfig::standard()),
            ("reference", SearchConfig::reference()),
        ] {
            let mut pathfinder = Pathfinder::new(config);
            c.bench_function(format!("{size}x{size} ({density}), {name}").as_str(), |b| {
                b.iter(|| {
                    for (start, goal) in &scenarios {
                        black_box(pathfinder.find_path(&grid, *start, *goal).unwrap());
                    }
                })
            });
        }
    }
}

criterion_group!(benches, random_grid_bench);
criterion_main!(benches);
