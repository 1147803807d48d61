use crate::cell::Cell;
use crate::{Cost, DIAGONAL_COST, OCTILE_EXCESS, STRAIGHT_COST};

/// How the cost-so-far of a neighbour is derived from the cell being expanded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CostModel {
    /// `g(neighbour) = g(current) + step`, regular A*.
    Cumulative,
    /// `g(neighbour) = step`. Costs do not accumulate along the path, which turns the search
    /// into a greedy best-first search driven by the heuristic.
    FlatStep,
}

/// Decides whether a step is charged [STRAIGHT_COST] or [DIAGONAL_COST].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepRule {
    /// Straight if the neighbour shares a row or column with the expanded cell.
    ParentAxis,
    /// Straight if the neighbour shares a row or column with the goal, regardless of the
    /// actual direction of the step.
    GoalAxis,
}

/// When an already reached cell gets a new cost and predecessor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Relaxation {
    /// Only when the new cost is strictly lower. Frontier entries superseded by a later
    /// improvement, and entries of cells that were already expanded, are skipped on pop.
    Improving,
    /// Every time the cell is seen from an expanding neighbour, even if the new cost is
    /// worse. Superseded frontier entries are not filtered by cost, but a cell is still
    /// expanded at most once.
    Overwrite,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Heuristic {
    /// Exact distance on an empty 8-connected grid. Admissible.
    Octile,
    /// `(|Δrow| + |Δcol|) * STRAIGHT_COST`. Overestimates whenever a diagonal step helps.
    Manhattan,
}

/// Tunables of a [Pathfinder](crate::Pathfinder) run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchConfig {
    pub cost_model: CostModel,
    pub step_rule: StepRule,
    pub relaxation: Relaxation,
    pub heuristic: Heuristic,
    /// Multiplies every heuristic value; above 1.0 trades optimality for fewer expansions.
    pub heuristic_factor: f32,
    /// Allow diagonal steps between two blocked orthogonal cells.
    pub allow_corner_cutting: bool,
    /// Reject start/goal pairs on different connected components before searching.
    pub component_check: bool,
}

impl SearchConfig {
    /// Textbook A*: cumulative costs, conditional relaxation and the octile heuristic.
    /// Returned paths are cost-optimal.
    pub const fn standard() -> SearchConfig {
        SearchConfig {
            cost_model: CostModel::Cumulative,
            step_rule: StepRule::ParentAxis,
            relaxation: Relaxation::Improving,
            heuristic: Heuristic::Octile,
            heuristic_factor: 1.0,
            allow_corner_cutting: true,
            component_check: true,
        }
    }

    /// Flat step costs, the goal-axis step rule, unconditional relaxation and the Manhattan
    /// heuristic. Still finds a path whenever one exists, but not necessarily the shortest.
    pub const fn reference() -> SearchConfig {
        SearchConfig {
            cost_model: CostModel::FlatStep,
            step_rule: StepRule::GoalAxis,
            relaxation: Relaxation::Overwrite,
            heuristic: Heuristic::Manhattan,
            heuristic_factor: 1.0,
            allow_corner_cutting: true,
            component_check: false,
        }
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> SearchConfig {
        self.heuristic = heuristic;
        self
    }

    pub fn with_corner_cutting(mut self, allow_corner_cutting: bool) -> SearchConfig {
        self.allow_corner_cutting = allow_corner_cutting;
        self
    }

    pub fn with_heuristic_factor(mut self, heuristic_factor: f32) -> SearchConfig {
        self.heuristic_factor = heuristic_factor;
        self
    }

    /// Estimated cost from `cell` to `goal`.
    pub fn heuristic(&self, cell: &Cell, goal: &Cell) -> Cost {
        let delta_row = cell.row_delta(goal) as Cost;
        let delta_col = cell.col_delta(goal) as Cost;
        let h = match self.heuristic {
            // Formula from https://github.com/riscy/a_star_on_grids
            // to efficiently compute the cost of a path taking the maximal amount
            // of diagonal steps before going straight
            Heuristic::Octile => {
                (OCTILE_EXCESS * (delta_row - delta_col).abs()
                    + DIAGONAL_COST * (delta_row + delta_col))
                    / 2
            }
            Heuristic::Manhattan => (delta_row + delta_col) * STRAIGHT_COST,
        };
        (h as f32 * self.heuristic_factor) as Cost
    }

    /// Cost charged for stepping from `current` to its neighbour `next`.
    pub fn step_cost(&self, current: &Cell, next: &Cell, goal: &Cell) -> Cost {
        let straight = match self.step_rule {
            StepRule::ParentAxis => !current.is_diagonal_to(next),
            StepRule::GoalAxis => next.row == goal.row || next.col == goal.col,
        };
        if straight {
            STRAIGHT_COST
        } else {
            DIAGONAL_COST
        }
    }

    /// Candidate cost-so-far of a neighbour reached by a step of `step` from a cell whose
    /// cost-so-far is `current_g`.
    pub fn tentative_g(&self, current_g: Cost, step: Cost) -> Cost {
        match self.cost_model {
            CostModel::Cumulative => current_g + step,
            CostModel::FlatStep => step,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig::standard()
    }
}
