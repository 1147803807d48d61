use core::fmt;
use smallvec::SmallVec;

/// A grid coordinate. Rows grow downwards, columns to the right, both 0-indexed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Cell {
        Cell { row, col }
    }

    /// The in-bounds cells of the 8-neighbourhood, scanned row by row starting at the
    /// upper left neighbour.
    pub fn moore_neighborhood(&self, rows: usize, cols: usize) -> SmallVec<[Cell; 8]> {
        let mut neighbours = SmallVec::new();
        for row in self.row.saturating_sub(1)..=self.row + 1 {
            if row >= rows {
                continue;
            }
            for col in self.col.saturating_sub(1)..=self.col + 1 {
                if col >= cols || (row == self.row && col == self.col) {
                    continue;
                }
                neighbours.push(Cell::new(row, col));
            }
        }
        neighbours
    }

    pub fn row_delta(&self, other: &Cell) -> usize {
        self.row.abs_diff(other.row)
    }

    pub fn col_delta(&self, other: &Cell) -> usize {
        self.col.abs_diff(other.col)
    }

    /// Number of king moves between the two cells.
    pub fn chebyshev_distance(&self, other: &Cell) -> usize {
        self.row_delta(other).max(self.col_delta(other))
    }

    pub fn manhattan_distance(&self, other: &Cell) -> usize {
        self.row_delta(other) + self.col_delta(other)
    }

    /// True if `other` differs in both row and column, i.e. reaching it from here is a
    /// diagonal move.
    pub fn is_diagonal_to(&self, other: &Cell) -> bool {
        self.row != other.row && self.col != other.col
    }

    /// Checks whether `other` is one of the 8 cells surrounding this one.
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self != other && self.chebyshev_distance(other) == 1
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Cell {
        Cell::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{},{}]", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighborhood_is_clipped_at_edges() {
        let corner = Cell::new(0, 0);
        let n = corner.moore_neighborhood(3, 3);
        assert_eq!(
            n.as_slice(),
            &[Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]
        );

        let centre = Cell::new(1, 1);
        assert_eq!(centre.moore_neighborhood(3, 3).len(), 8);

        let far = Cell::new(2, 2);
        assert_eq!(far.moore_neighborhood(3, 3).len(), 3);
        assert!(Cell::new(0, 0).moore_neighborhood(1, 1).is_empty());
    }

    #[test]
    fn distances() {
        let a = Cell::new(1, 4);
        let b = Cell::new(5, 2);
        assert_eq!(a.chebyshev_distance(&b), 4);
        assert_eq!(a.manhattan_distance(&b), 6);
        assert!(a.is_diagonal_to(&b));
        assert!(!a.is_diagonal_to(&Cell::new(1, 0)));
    }

    #[test]
    fn adjacency_excludes_self() {
        let c = Cell::new(2, 2);
        assert!(!c.is_adjacent(&c));
        assert!(c.is_adjacent(&Cell::new(3, 3)));
        assert!(c.is_adjacent(&Cell::new(2, 1)));
        assert!(!c.is_adjacent(&Cell::new(4, 2)));
    }

    #[test]
    fn display() {
        assert_eq!(Cell::from((3, 7)).to_string(), "[3,7]");
    }
}
