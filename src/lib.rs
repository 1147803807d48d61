//! # grid_astar
//!
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) pathfinding on a fixed-size grid
//! of free and blocked cells with octile movement: every cell connects to its 8
//! neighbours, straight steps cost [STRAIGHT_COST] and diagonal steps [DIAGONAL_COST].
//!
//! The [Grid] only stores traversability (plus
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) used to
//! reject hopeless searches early) and is never mutated by a search. All per-run state lives
//! in a [Pathfinder], which can be reused across runs.
//!
//! ```
//! use grid_astar::{find_path, Cell, Grid};
//!
//! let grid: Grid = "...\n.#.\n...".parse().unwrap();
//! let result = find_path(&grid, Cell::new(0, 0), Cell::new(2, 2)).unwrap();
//! assert_eq!(result.len(), 4);
//! assert_eq!(result.cost(), Some(34));
//! ```
//!
//! [SearchConfig::reference] reproduces a simpler, non-optimal variant of the search (flat
//! step costs, unconditional relaxation, Manhattan heuristic) for comparison.
mod cell;
mod config;
mod error;
mod frontier;
mod grid;
mod pathfinder;
mod state;
mod visited;

use itertools::Itertools;

pub use crate::cell::Cell;
pub use crate::config::{CostModel, Heuristic, Relaxation, SearchConfig, StepRule};
pub use crate::error::{Error, Result};
pub use crate::frontier::Frontier;
pub use crate::grid::{Grid, DEFAULT_BLOCKED_PROBABILITY, DEFAULT_GRID_SIZE};
pub use crate::pathfinder::{PathResult, Pathfinder, PathfinderState};
pub use crate::state::{Entry, SearchState};
pub use crate::visited::Visited;

/// Integer path cost.
pub type Cost = i32;

/// Cost of a horizontal or vertical step.
pub const STRAIGHT_COST: Cost = 10;
/// Cost of a diagonal step, roughly `STRAIGHT_COST * sqrt(2)`.
pub const DIAGONAL_COST: Cost = 14;
/// `2 * STRAIGHT_COST - DIAGONAL_COST`, used by the octile distance.
pub(crate) const OCTILE_EXCESS: Cost = 2 * STRAIGHT_COST - DIAGONAL_COST;

/// Searches a path with a fresh [Pathfinder] using [SearchConfig::standard].
pub fn find_path(grid: &Grid, start: Cell, goal: Cell) -> Result<PathResult> {
    Pathfinder::default().find_path(grid, start, goal)
}

/// Sums the step costs along a path, charging [DIAGONAL_COST] for every step that changes
/// both row and column and [STRAIGHT_COST] otherwise.
pub fn path_cost(path: &[Cell]) -> Cost {
    path.iter()
        .tuple_windows()
        .map(|(a, b)| {
            if a.is_diagonal_to(b) {
                DIAGONAL_COST
            } else {
                STRAIGHT_COST
            }
        })
        .sum()
}

/// Converts the integer cost to an approximate floating point equivalent where straight
/// steps have cost 1.0.
pub fn unit_cost(cost: Cost) -> f64 {
    (cost as f64) / (STRAIGHT_COST as f64)
}
