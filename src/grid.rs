use core::fmt;
use std::str::FromStr;

use log::info;
use petgraph::unionfind::UnionFind;
use rand::Rng;

use crate::cell::Cell;
use crate::error::{Error, Result};

/// Chance of any single cell being blocked in a randomly generated grid.
pub const DEFAULT_BLOCKED_PROBABILITY: f64 = 0.1;
/// Side length of the square grids generated by the demo.
pub const DEFAULT_GRID_SIZE: usize = 15;

/// [Grid] holds the traversability of every cell as a row-major [bool] vector in which
/// `true` marks a blocked cell. In addition it maintains a [UnionFind] over free cells
/// under the 8-neighbourhood so that searches between disconnected cells can be rejected
/// without flood-filling. A grid carries no search state and can be shared between any
/// number of searches.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    blocked: Vec<bool>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl Grid {
    /// An entirely free grid.
    pub fn new(rows: usize, cols: usize) -> Grid {
        let mut grid = Grid {
            rows,
            cols,
            blocked: vec![false; rows * cols],
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    /// Builds a grid from row-major flags where `true` means blocked.
    pub fn from_flags(rows: usize, cols: usize, blocked: Vec<bool>) -> Result<Grid> {
        let expected = rows * cols;
        if blocked.len() != expected {
            return Err(Error::DimensionMismatch {
                rows,
                cols,
                expected,
                found: blocked.len(),
            });
        }
        let mut grid = Grid {
            rows,
            cols,
            blocked,
            components: UnionFind::new(expected),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    /// Blocks every cell independently with probability `blocked_probability`, which has to
    /// lie within `[0, 1]`.
    pub fn random<R: Rng>(
        rows: usize,
        cols: usize,
        blocked_probability: f64,
        rng: &mut R,
    ) -> Result<Grid> {
        if !(0.0..=1.0).contains(&blocked_probability) {
            return Err(Error::InvalidProbability {
                probability: blocked_probability,
            });
        }
        let blocked = (0..rows * cols)
            .map(|_| rng.gen_bool(blocked_probability))
            .collect::<Vec<bool>>();
        let mut grid = Grid {
            rows,
            cols,
            blocked,
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn in_bounds(&self, cell: &Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    pub fn check_bounds(&self, cell: &Cell) -> Result<()> {
        if self.in_bounds(cell) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                cell: *cell,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    fn ix(&self, cell: &Cell) -> usize {
        cell.row * self.cols + cell.col
    }

    /// False for blocked cells and for anything outside the grid.
    pub fn is_traversable(&self, cell: &Cell) -> bool {
        self.in_bounds(cell) && !self.blocked[self.ix(cell)]
    }

    pub fn is_blocked(&self, cell: &Cell) -> Result<bool> {
        self.check_bounds(cell)?;
        Ok(self.blocked[self.ix(cell)])
    }

    /// Checks whether a single step from `from` to the adjacent cell `to` is possible.
    /// Without corner cutting a diagonal step additionally requires both orthogonal cells
    /// it squeezes past to be free.
    pub fn can_step(&self, from: &Cell, to: &Cell, allow_corner_cutting: bool) -> bool {
        debug_assert!(from.is_adjacent(to));
        if !self.is_traversable(to) {
            return false;
        }
        allow_corner_cutting
            || !from.is_diagonal_to(to)
            || (self.is_traversable(&Cell::new(from.row, to.col))
                && self.is_traversable(&Cell::new(to.row, from.col)))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Cell::new(row, col)))
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|b| **b).count()
    }

    /// Updates a cell. Joins newly connected components and flags the components
    /// as dirty if they are (potentially) broken apart into multiple.
    pub fn set_blocked(&mut self, cell: Cell, blocked: bool) -> Result<()> {
        self.check_bounds(&cell)?;
        let ix = self.ix(&cell);
        let was_blocked = self.blocked[ix];
        self.blocked[ix] = blocked;
        if blocked {
            if !was_blocked {
                self.components_dirty = true;
            }
        } else {
            for n in cell.moore_neighborhood(self.rows, self.cols) {
                if self.is_traversable(&n) {
                    let n_ix = self.ix(&n);
                    self.components.union(ix, n_ix);
                }
            }
        }
        Ok(())
    }

    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free 8-neighbours into the same
    /// components. Corner cutting is assumed, so the components over-approximate
    /// connectivity for searches that forbid it.
    pub fn generate_components(&mut self) {
        let (rows, cols) = (self.rows, self.cols);
        self.components = UnionFind::new(rows * cols);
        self.components_dirty = false;
        for row in 0..rows {
            for col in 0..cols {
                let cell = Cell::new(row, col);
                if !self.is_traversable(&cell) {
                    continue;
                }
                let parent_ix = self.ix(&cell);
                // Only the forward half of the neighbourhood, the rest is covered when
                // visiting earlier cells.
                let mut forward = vec![
                    Cell::new(row, col + 1),
                    Cell::new(row + 1, col),
                    Cell::new(row + 1, col + 1),
                ];
                if col > 0 {
                    forward.push(Cell::new(row + 1, col - 1));
                }
                for n in forward {
                    if self.is_traversable(&n) {
                        let ix = self.ix(&n);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }

    /// Retrieves the component id a given [Cell] belongs to.
    pub fn get_component(&self, cell: &Cell) -> Result<usize> {
        self.check_bounds(cell)?;
        Ok(self.components.find(self.ix(cell)))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Cell, goal: &Cell) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Out of bounds cells are
    /// never reachable.
    pub fn unreachable(&self, start: &Cell, goal: &Cell) -> bool {
        if self.in_bounds(start) && self.in_bounds(goal) {
            !self.components.equiv(self.ix(start), self.ix(goal))
        } else {
            true
        }
    }
}

fn parse_glyph(ch: char) -> Option<bool> {
    match ch {
        '.' | ' ' | 'G' | '0' => Some(false),
        '#' | '@' | 'T' | '█' | '1' => Some(true),
        _ => None,
    }
}

impl FromStr for Grid {
    type Err = Error;

    /// Parses one line per row with `.` for free and `#` for blocked cells. Empty lines are
    /// skipped and the Moving AI map glyphs are accepted as well.
    fn from_str(s: &str) -> Result<Grid> {
        let mut blocked = Vec::new();
        let mut rows = 0;
        let mut cols = None;
        for line in s.lines().map(|l| l.trim_end_matches('\r')) {
            if line.is_empty() {
                continue;
            }
            let mut width = 0;
            for (col, ch) in line.chars().enumerate() {
                let flag = parse_glyph(ch).ok_or(Error::InvalidCharacter { ch, row: rows, col })?;
                blocked.push(flag);
                width += 1;
            }
            match cols {
                None => cols = Some(width),
                Some(expected) if expected != width => {
                    return Err(Error::RaggedRow {
                        row: rows,
                        expected,
                        found: width,
                    })
                }
                Some(_) => {}
            }
            rows += 1;
        }
        match cols {
            Some(cols) => Grid::from_flags(rows, cols, blocked),
            None => Err(Error::EmptyInput),
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows {
            let line = (0..self.cols)
                .map(|col| {
                    if self.blocked[row * self.cols + col] {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Tests whether cells are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // Corresponds to the following 2x3 grid:
        //  ___
        // |.#.|
        // |.#.|
        //  ___
        let grid: Grid = ".#.\n.#.".parse().unwrap();
        let p1 = Cell::new(0, 0);
        let p2 = Cell::new(1, 1);
        let p3 = Cell::new(1, 0);
        let p4 = Cell::new(0, 2);
        assert!(grid.unreachable(&p1, &p2));
        assert!(grid.reachable(&p1, &p3));
        assert!(grid.unreachable(&p1, &p4));
        assert_ne!(grid.get_component(&p1), grid.get_component(&p4));
    }

    #[test]
    fn diagonal_gap_connects_components() {
        // |.#|
        // |#.|
        let grid: Grid = ".#\n#.".parse().unwrap();
        assert!(grid.reachable(&Cell::new(0, 0), &Cell::new(1, 1)));
        // Anti-diagonal, exercises the backward-left link.
        let grid: Grid = "#.\n.#".parse().unwrap();
        assert!(grid.reachable(&Cell::new(0, 1), &Cell::new(1, 0)));
    }

    #[test]
    fn corner_cutting_rule() {
        let grid: Grid = ".#\n#.".parse().unwrap();
        let a = Cell::new(0, 0);
        let b = Cell::new(1, 1);
        assert!(grid.can_step(&a, &b, true));
        assert!(!grid.can_step(&a, &b, false));
        assert!(!grid.can_step(&a, &Cell::new(0, 1), true));
    }

    #[test]
    fn out_of_bounds() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.dimensions(), (3, 4));
        assert!(!grid.is_traversable(&Cell::new(3, 0)));
        assert!(!grid.is_traversable(&Cell::new(0, 4)));
        assert_eq!(
            grid.is_blocked(&Cell::new(5, 1)),
            Err(Error::OutOfBounds {
                cell: Cell::new(5, 1),
                rows: 3,
                cols: 4
            })
        );
        assert!(grid.unreachable(&Cell::new(0, 0), &Cell::new(9, 9)));
    }

    #[test]
    fn from_flags_checks_length() {
        assert!(matches!(
            Grid::from_flags(2, 2, vec![false; 3]),
            Err(Error::DimensionMismatch { expected: 4, found: 3, .. })
        ));
        let grid = Grid::from_flags(2, 2, vec![false, true, false, false]).unwrap();
        assert_eq!(grid.is_blocked(&Cell::new(0, 1)), Ok(true));
        assert_eq!(grid.blocked_count(), 1);
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Grid>().unwrap_err(), Error::EmptyInput);
        assert_eq!("\n\n".parse::<Grid>().unwrap_err(), Error::EmptyInput);
        assert_eq!(
            "..\n...".parse::<Grid>().unwrap_err(),
            Error::RaggedRow {
                row: 1,
                expected: 2,
                found: 3
            }
        );
        assert_eq!(
            "..\n.x".parse::<Grid>().unwrap_err(),
            Error::InvalidCharacter {
                ch: 'x',
                row: 1,
                col: 1
            }
        );
    }

    #[test]
    fn display_round_trips() {
        let text = "..#.\n#...\n.##.\n";
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid.to_string(), text);
        let again: Grid = grid.to_string().parse().unwrap();
        assert_eq!(again.to_string(), text);
    }

    #[test]
    fn random_density() {
        let mut rng = StdRng::seed_from_u64(0);
        let grid = Grid::random(100, 100, DEFAULT_BLOCKED_PROBABILITY, &mut rng).unwrap();
        let blocked = grid.blocked_count();
        // 10% of 10_000 cells with generous slack.
        assert!(blocked > 700 && blocked < 1300, "blocked = {blocked}");
        let empty = Grid::random(5, 5, 0.0, &mut rng).unwrap();
        assert_eq!(empty.blocked_count(), 0);
        let full = Grid::random(5, 5, 1.0, &mut rng).unwrap();
        assert_eq!(full.blocked_count(), 25);
    }

    #[test]
    fn random_rejects_invalid_probability() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            Grid::random(3, 3, 1.5, &mut rng).unwrap_err(),
            Error::InvalidProbability { probability: 1.5 }
        );
        assert!(Grid::random(3, 3, -0.1, &mut rng).is_err());
        assert!(Grid::random(3, 3, f64::NAN, &mut rng).is_err());
    }

    #[test]
    fn set_blocked_tracks_components() {
        // |...|
        let mut grid = Grid::new(1, 3);
        let left = Cell::new(0, 0);
        let right = Cell::new(0, 2);
        assert!(grid.reachable(&left, &right));

        grid.set_blocked(Cell::new(0, 1), true).unwrap();
        assert!(grid.components_dirty());
        grid.update();
        assert!(!grid.components_dirty());
        assert!(grid.unreachable(&left, &right));

        // Unblocking joins incrementally without dirtying.
        grid.set_blocked(Cell::new(0, 1), false).unwrap();
        assert!(!grid.components_dirty());
        assert!(grid.reachable(&left, &right));

        assert!(grid.set_blocked(Cell::new(1, 0), true).is_err());
    }
}
