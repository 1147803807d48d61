use fxhash::FxHashSet;

use crate::cell::Cell;

/// The closed set: cells that have been expanded.
#[derive(Clone, Debug, Default)]
pub struct Visited {
    cells: FxHashSet<Cell>,
}

impl Visited {
    pub fn new() -> Visited {
        Visited::default()
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells.contains(cell)
    }

    /// Returns `true` if the cell was not visited before.
    pub fn add(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
