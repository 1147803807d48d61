use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::cell::Cell;

#[derive(Clone, Debug)]
struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    sequence: u64,
    cell: Cell,
}

impl<K: Ord> Eq for SmallestCostHolder<K> {}

impl<K: Ord> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per estimated cost, then favours the deepest node (largest cost),
        // then whatever was pushed first.
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| self.cost.cmp(&other.cost))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// The open set. Cells may be pushed any number of times; every push stays in the heap
/// until popped, so callers that care about stale entries compare the returned priority
/// against their own records.
#[derive(Clone, Debug)]
pub struct Frontier<C> {
    heap: BinaryHeap<SmallestCostHolder<C>>,
    pushed: u64,
}

impl<C: Ord + Copy> Frontier<C> {
    pub fn new() -> Frontier<C> {
        Frontier {
            heap: BinaryHeap::new(),
            pushed: 0,
        }
    }

    /// Queues `cell` with priority `f_cost`; `g_cost` only breaks ties.
    pub fn push(&mut self, cell: Cell, f_cost: C, g_cost: C) {
        self.heap.push(SmallestCostHolder {
            estimated_cost: f_cost,
            cost: g_cost,
            sequence: self.pushed,
            cell,
        });
        self.pushed += 1;
    }

    /// Removes the entry with the smallest `f_cost` and returns it with that priority.
    pub fn pop_min(&mut self) -> Option<(Cell, C)> {
        self.heap
            .pop()
            .map(|holder| (holder.cell, holder.estimated_cost))
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.pushed = 0;
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<C: Ord + Copy> Default for Frontier<C> {
    fn default() -> Self {
        Frontier::new()
    }
}
