use grid_astar::{
    Cell, Grid, PathResult, Pathfinder, SearchConfig, DEFAULT_BLOCKED_PROBABILITY,
    DEFAULT_GRID_SIZE,
};
use rand::prelude::*;
use std::collections::HashSet;

// In this example a path is searched on a random 15x15 grid in which every cell is
// blocked with a 10% chance. The grid is printed with
// - # marking an obstacle
// - S marking the start
// - G marking the goal
// - * marking the path
// once for the standard search and once for the reference configuration.

fn render(grid: &Grid, path: &[Cell]) -> String {
    let on_path = path.iter().copied().collect::<HashSet<Cell>>();
    let mut out = String::new();
    for cell in grid.cells() {
        let glyph = if Some(&cell) == path.first() {
            'S'
        } else if Some(&cell) == path.last() {
            'G'
        } else if on_path.contains(&cell) {
            '*'
        } else if grid.is_traversable(&cell) {
            '.'
        } else {
            '#'
        };
        out.push(glyph);
        if cell.col + 1 == grid.cols() {
            out.push('\n');
        }
    }
    out
}

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = Grid::random(
        DEFAULT_GRID_SIZE,
        DEFAULT_GRID_SIZE,
        DEFAULT_BLOCKED_PROBABILITY,
        &mut rng,
    )
    .unwrap();
    let start = Cell::new(0, 0);
    let goal = Cell::new(DEFAULT_GRID_SIZE - 1, DEFAULT_GRID_SIZE - 1);
    grid.set_blocked(start, false).unwrap();
    grid.set_blocked(goal, false).unwrap();
    println!("{}", grid);

    for (name, config) in [
        ("standard", SearchConfig::standard()),
        ("reference", SearchConfig::reference()),
    ] {
        let mut pathfinder = Pathfinder::new(config);
        match pathfinder.find_path(&grid, start, goal).unwrap() {
            PathResult::Found(path) => {
                println!(
                    "{name}: {} cells, cost {}, {} expansions",
                    path.len(),
                    grid_astar::path_cost(&path),
                    pathfinder.expanded()
                );
                println!("{}", render(&grid, &path));
            }
            PathResult::NotFound => println!("{name}: no path from {start} to {goal}"),
        }
    }
}
