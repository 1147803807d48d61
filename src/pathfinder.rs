use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, trace, warn};

use crate::cell::Cell;
use crate::config::{Relaxation, SearchConfig};
use crate::error::{Error, Result};
use crate::frontier::Frontier;
use crate::grid::Grid;
use crate::state::SearchState;
use crate::visited::Visited;
use crate::{path_cost, Cost};

/// Outcome of a search that ran to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathResult {
    /// Cells from start to goal, both inclusive.
    Found(Vec<Cell>),
    NotFound,
}

impl PathResult {
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }

    pub fn path(&self) -> Option<&[Cell]> {
        match self {
            PathResult::Found(path) => Some(path),
            PathResult::NotFound => None,
        }
    }

    pub fn into_path(self) -> Option<Vec<Cell>> {
        match self {
            PathResult::Found(path) => Some(path),
            PathResult::NotFound => None,
        }
    }

    /// Number of cells on the path, 0 if none was found.
    pub fn len(&self) -> usize {
        self.path().map_or(0, |path| path.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of straight and diagonal step costs along the path.
    pub fn cost(&self) -> Option<Cost> {
        self.path().map(path_cost)
    }
}

/// Where the [Pathfinder] is in its current or last run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PathfinderState {
    Idle,
    Searching,
    PathFound,
    NoSolution,
}

/// Runs A* searches over a [Grid]. The search state, open set and closed set are owned by
/// the pathfinder and cleared at the start of every run, so one instance can be reused for
/// any number of searches while the grid itself is only ever borrowed immutably. Concurrent
/// searches need one pathfinder each.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    config: SearchConfig,
    state: SearchState,
    frontier: Frontier<Cost>,
    visited: Visited,
    status: PathfinderState,
    expanded: usize,
}

impl Default for Pathfinder {
    fn default() -> Pathfinder {
        Pathfinder::new(SearchConfig::default())
    }
}

impl Pathfinder {
    pub fn new(config: SearchConfig) -> Pathfinder {
        Pathfinder {
            config,
            state: SearchState::new(),
            frontier: Frontier::new(),
            visited: Visited::new(),
            status: PathfinderState::Idle,
            expanded: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn state(&self) -> PathfinderState {
        self.status
    }

    /// Number of expansions performed by the last run.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Bookkeeping left behind by the last run.
    pub fn search_state(&self) -> &SearchState {
        &self.state
    }

    /// Searches a path from `start` to `goal`. Fails only if either cell lies outside the
    /// grid, in which case nothing about the pathfinder changes.
    ///
    /// Only traversable neighbours are ever entered, so a blocked goal yields
    /// [PathResult::NotFound] unless it is also the start. A blocked start is expanded like
    /// any other cell.
    pub fn find_path(&mut self, grid: &Grid, start: Cell, goal: Cell) -> Result<PathResult> {
        self.run(grid, start, goal, None)
    }

    /// Like [find_path](Self::find_path), but checks `cancel` before every expansion and
    /// gives up with [Error::Cancelled] once it is set. The pathfinder is left
    /// [Idle](PathfinderState::Idle).
    pub fn find_path_with_cancel(
        &mut self,
        grid: &Grid,
        start: Cell,
        goal: Cell,
        cancel: &AtomicBool,
    ) -> Result<PathResult> {
        self.run(grid, start, goal, Some(cancel))
    }

    fn reset(&mut self) {
        self.state.reset();
        self.frontier.clear();
        self.visited.clear();
        self.expanded = 0;
    }

    fn run(
        &mut self,
        grid: &Grid,
        start: Cell,
        goal: Cell,
        cancel: Option<&AtomicBool>,
    ) -> Result<PathResult> {
        grid.check_bounds(&start)?;
        grid.check_bounds(&goal)?;
        self.reset();
        self.status = PathfinderState::Searching;
        let config = self.config;

        let checked_components = config.component_check
            && start != goal
            && grid.is_traversable(&start)
            && grid.is_traversable(&goal);
        if checked_components {
            if grid.components_dirty() {
                debug!("Components are dirty, searching {} to {} without check", start, goal);
            } else if grid.unreachable(&start, &goal) {
                info!("{} is not reachable from {}", goal, start);
                self.status = PathfinderState::NoSolution;
                return Ok(PathResult::NotFound);
            }
        }

        let h = config.heuristic(&start, &goal);
        self.state.relax(start, 0, h, None);
        self.frontier.push(start, h, 0);

        let (rows, cols) = grid.dimensions();
        while let Some((current, f_cost)) = self.frontier.pop_min() {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                self.status = PathfinderState::Idle;
                return Err(Error::Cancelled {
                    expanded: self.expanded,
                });
            }
            let entry = match self.state.get(&current) {
                Some(entry) => *entry,
                None => continue,
            };
            // A cell may sit in the frontier several times. It is expanded at most once, and
            // when relaxing only improves entries, only the entry matching the best path counts.
            if self.visited.contains(&current)
                || (config.relaxation == Relaxation::Improving && f_cost > entry.f_cost())
            {
                continue;
            }
            if current == goal {
                let path = self.state.reconstruct_path(goal);
                debug!(
                    "Found path of {} cells from {} to {} after {} expansions",
                    path.len(),
                    start,
                    goal,
                    self.expanded
                );
                self.status = PathfinderState::PathFound;
                return Ok(PathResult::Found(path));
            }

            trace!("Expanding {} with g = {}, f = {}", current, entry.g_cost, f_cost);
            for next in current.moore_neighborhood(rows, cols) {
                if self.visited.contains(&next)
                    || !grid.can_step(&current, &next, config.allow_corner_cutting)
                {
                    continue;
                }
                let step = config.step_cost(&current, &next, &goal);
                let g_cost = config.tentative_g(entry.g_cost, step);
                let h_cost = match self.state.get(&next) {
                    Some(existing) => {
                        if config.relaxation == Relaxation::Improving && existing.g_cost <= g_cost
                        {
                            continue;
                        }
                        existing.h_cost
                    }
                    None => config.heuristic(&next, &goal),
                };
                self.state.relax(next, g_cost, h_cost, Some(current));
                self.frontier.push(next, g_cost + h_cost, g_cost);
            }
            self.visited.add(current);
            self.expanded += 1;
        }

        if checked_components && !grid.components_dirty() && config.allow_corner_cutting {
            warn!("Reachable goal {} could not be pathed to from {}", goal, start);
        } else {
            debug!(
                "No path from {} to {} after {} expansions",
                start, goal, self.expanded
            );
        }
        self.status = PathfinderState::NoSolution;
        Ok(PathResult::NotFound)
    }
}
