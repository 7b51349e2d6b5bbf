//! Multi-goal distance estimate for guided search.

use voxgrid_core::Point3;

use crate::cost::MoveCost;
use crate::distance::manhattan;

/// Estimates the remaining cost from a cell to the nearest of several goals.
///
/// The estimate is the smallest Manhattan distance to any goal, scaled by
/// [`MoveCost::lower_bound`]. Under 18-direction movement a single step
/// removes at most two units of Manhattan distance, so the scaled value
/// never exceeds the true remaining cost and guided search stays optimal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalHeuristic {
    goals: Vec<Point3>,
    cost: MoveCost,
}

impl GoalHeuristic {
    /// Create an estimator for `goals` under the given cost model.
    pub fn new(goals: impl IntoIterator<Item = Point3>, cost: MoveCost) -> Self {
        Self {
            goals: goals.into_iter().collect(),
            cost,
        }
    }

    /// The goal cells.
    pub fn goals(&self) -> &[Point3] {
        &self.goals
    }

    /// Estimated remaining cost from `p`. Zero when there are no goals.
    pub fn estimate(&self, p: Point3) -> i32 {
        self.goals
            .iter()
            .map(|&g| manhattan(p, g))
            .min()
            .map_or(0, |m| self.cost.lower_bound(m))
    }
}

/// The estimate that always returns zero; guided search with it behaves like
/// exhaustive search.
#[inline]
pub fn zero_heuristic<N>(_: &N) -> i32 {
    0
}
