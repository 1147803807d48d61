use fxhash::FxBuildHasher;
use indexmap::IndexMap;

use crate::cell::Cell;
use crate::Cost;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Bookkeeping for a single reached cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub g_cost: Cost,
    pub h_cost: Cost,
    /// `None` only for the cell the search started from.
    pub predecessor: Option<Cell>,
}

impl Entry {
    /// Always derived, so it can never disagree with `g_cost + h_cost`.
    pub fn f_cost(&self) -> Cost {
        self.g_cost + self.h_cost
    }
}

/// Per-run search state keyed by [Cell]. Entries only exist for cells that have been
/// reached; predecessors are stored as coordinates so the search tree holds no references.
#[derive(Clone, Debug, Default)]
pub struct SearchState {
    entries: FxIndexMap<Cell, Entry>,
}

impl SearchState {
    pub fn new() -> SearchState {
        SearchState::default()
    }

    pub fn get(&self, cell: &Cell) -> Option<&Entry> {
        self.entries.get(cell)
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.entries.contains_key(cell)
    }

    /// Overwrites whatever is recorded for `cell`. Whether a relaxation is an improvement
    /// is decided by the caller.
    pub fn relax(&mut self, cell: Cell, g_cost: Cost, h_cost: Cost, predecessor: Option<Cell>) {
        self.entries.insert(
            cell,
            Entry {
                g_cost,
                h_cost,
                predecessor,
            },
        );
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Follows predecessor links back from `goal` and returns the cells in start to goal
    /// order. The walk visits at most one cell per recorded entry, so a cyclic chain ends
    /// the path early instead of looping.
    pub fn reconstruct_path(&self, goal: Cell) -> Vec<Cell> {
        let mut path = std::iter::successors(Some(goal), |cell| {
            self.entries.get(cell).and_then(|entry| entry.predecessor)
        })
        .take(self.entries.len().max(1))
        .collect::<Vec<Cell>>();
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f_cost_is_derived() {
        let mut state = SearchState::new();
        let c = Cell::new(1, 1);
        state.relax(c, 14, 20, Some(Cell::new(0, 0)));
        assert_eq!(state.get(&c).unwrap().f_cost(), 34);
        state.relax(c, 28, 20, Some(Cell::new(0, 1)));
        let entry = state.get(&c).unwrap();
        assert_eq!(entry.f_cost(), 48);
        assert_eq!(entry.predecessor, Some(Cell::new(0, 1)));
    }

    #[test]
    fn relax_overwrites_even_when_worse() {
        let mut state = SearchState::new();
        let c = Cell::new(2, 3);
        state.relax(c, 10, 0, None);
        state.relax(c, 50, 0, Some(Cell::new(2, 2)));
        assert_eq!(state.get(&c).unwrap().g_cost, 50);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn nothing_before_relax_and_after_reset() {
        let mut state = SearchState::new();
        let c = Cell::new(0, 0);
        assert!(state.get(&c).is_none());
        state.relax(c, 0, 0, None);
        assert!(state.contains(&c));
        state.reset();
        assert!(state.is_empty());
        assert!(!state.contains(&c));
    }

    #[test]
    fn reconstruct_follows_links() {
        let mut state = SearchState::new();
        let a = Cell::new(0, 0);
        let b = Cell::new(1, 1);
        let c = Cell::new(2, 1);
        state.relax(a, 0, 0, None);
        state.relax(b, 14, 0, Some(a));
        state.relax(c, 24, 0, Some(b));
        assert_eq!(state.reconstruct_path(c), vec![a, b, c]);
        assert_eq!(state.reconstruct_path(a), vec![a]);
    }

    #[test]
    fn reconstruct_terminates_on_cycle() {
        let mut state = SearchState::new();
        let a = Cell::new(0, 0);
        let b = Cell::new(0, 1);
        state.relax(a, 0, 0, Some(b));
        state.relax(b, 0, 0, Some(a));
        assert_eq!(state.reconstruct_path(b).len(), 2);
    }

    #[test]
    fn reconstruct_unknown_goal() {
        let state = SearchState::new();
        assert_eq!(state.reconstruct_path(Cell::new(4, 4)), vec![Cell::new(4, 4)]);
    }
}
