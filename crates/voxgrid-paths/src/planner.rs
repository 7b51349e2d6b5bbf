//! Grid path planning: ties a [`Grid3`], the pruned neighbor generator, the
//! goal heuristic and [`PathSearch`] together.
//!
//! A [`Planner`] borrows its grid immutably, so obstacles cannot change while
//! a planner (or any search running through it) is alive. Edit the grid
//! first, then plan.

use std::collections::HashSet;
use std::fmt;

use log::{debug, warn};
use rayon::prelude::*;
use voxgrid_core::{Grid3, GridError, Point3};

use crate::cost::MoveCost;
use crate::heuristic::GoalHeuristic;
use crate::neighbors::NeighborGenerator;
use crate::search::{Path, PathError, PathSearch};
use crate::traits::{AstarPather, Pather};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned by [`Planner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// A start or goal coordinate lies outside the grid.
    Grid(GridError),
    /// The search found no route.
    Path(PathError),
    /// The planner was built with an empty goal set.
    NoGoals,
    /// The start cell is an obstacle.
    BlockedStart(Point3),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "{e}"),
            Self::Path(e) => write!(f, "{e}"),
            Self::NoGoals => write!(f, "plan: no goal coordinates given"),
            Self::BlockedStart(p) => write!(f, "plan: start {p} is blocked"),
        }
    }
}

impl std::error::Error for PlanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Path(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for PlanError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<PathError> for PlanError {
    fn from(e: PathError) -> Self {
        Self::Path(e)
    }
}

// ---------------------------------------------------------------------------
// GridPather
// ---------------------------------------------------------------------------

/// The pruned 18-direction graph of a grid, seen through [`AstarPather`].
///
/// Neighbors come from [`NeighborGenerator`], with the goal set forcing
/// goals to stay visible along rook rays, and estimates from
/// [`GoalHeuristic`].
#[derive(Debug, Clone)]
pub struct GridPather<'g> {
    grid: &'g Grid3,
    generator: NeighborGenerator,
    goals: HashSet<Point3>,
    heuristic: GoalHeuristic,
}

impl<'g> GridPather<'g> {
    /// Goals keep their first-seen order; repeats are dropped.
    pub fn new(grid: &'g Grid3, goals: impl IntoIterator<Item = Point3>, cost: MoveCost) -> Self {
        let mut set = HashSet::new();
        let ordered: Vec<Point3> = goals.into_iter().filter(|&g| set.insert(g)).collect();
        let heuristic = GoalHeuristic::new(ordered, cost);
        let goals = set;
        Self {
            grid,
            generator: NeighborGenerator::new(cost),
            goals,
            heuristic,
        }
    }

    pub fn grid(&self) -> &'g Grid3 {
        self.grid
    }

    pub fn is_goal(&self, p: &Point3) -> bool {
        self.goals.contains(p)
    }
}

impl Pather for GridPather<'_> {
    type Node = Point3;

    fn neighbors(&self, node: &Point3, buf: &mut Vec<(Point3, i32)>) {
        self.generator
            .extend_neighbors(self.grid, *node, &self.goals, buf);
    }
}

impl AstarPather for GridPather<'_> {
    fn estimate(&self, node: &Point3) -> i32 {
        self.heuristic.estimate(*node)
    }
}

// ---------------------------------------------------------------------------
// Planner
// ---------------------------------------------------------------------------

/// Plans routes from start cells to the nearest of a set of goal cells.
///
/// ```ignore
/// let planner = Planner::new(&grid, [goal])?.with_cost(MoveCost::OCTILE);
/// let path = planner.plan(start)?;
/// ```
#[derive(Debug, Clone)]
pub struct Planner<'g> {
    pather: GridPather<'g>,
    cost: MoveCost,
    expand: bool,
}

impl<'g> Planner<'g> {
    /// Create a planner over `grid` towards `goals`, using
    /// [`MoveCost::UNIFORM`] and returning jump-point paths.
    ///
    /// Fails when `goals` is empty or a goal lies outside the grid.
    pub fn new(grid: &'g Grid3, goals: impl IntoIterator<Item = Point3>) -> Result<Self, PlanError> {
        let goals: Vec<Point3> = goals.into_iter().collect();
        if goals.is_empty() {
            return Err(PlanError::NoGoals);
        }
        if let Some(&p) = goals.iter().find(|&&p| !grid.contains(p)) {
            return Err(GridError::OutOfBounds(p).into());
        }
        let cost = MoveCost::default();
        Ok(Self {
            pather: GridPather::new(grid, goals, cost),
            cost,
            expand: false,
        })
    }

    /// Use `cost` for step costs and the heuristic.
    pub fn with_cost(self, cost: MoveCost) -> Self {
        let goals: Vec<Point3> = self.pather.heuristic.goals().to_vec();
        Self {
            pather: GridPather::new(self.pather.grid, goals, cost),
            cost,
            ..self
        }
    }

    /// Whether returned paths are expanded into unit steps (see
    /// [`expand_waypoints`]). Off by default.
    pub fn expand_waypoints(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    pub fn cost(&self) -> MoveCost {
        self.cost
    }

    pub fn goals(&self) -> &[Point3] {
        self.pather.heuristic.goals()
    }

    pub fn pather(&self) -> &GridPather<'g> {
        &self.pather
    }

    /// Plan from `start` with a fresh search state.
    pub fn plan(&self, start: Point3) -> Result<Path<Point3>, PlanError> {
        self.plan_with(&mut PathSearch::new(), start)
    }

    /// Plan from `start`, reusing the allocations of `search`.
    pub fn plan_with(
        &self,
        search: &mut PathSearch<Point3>,
        start: Point3,
    ) -> Result<Path<Point3>, PlanError> {
        let grid = self.pather.grid;
        if !grid.contains(start) {
            warn!("planner: start {start} is outside {}", grid.bounds());
            return Err(GridError::OutOfBounds(start).into());
        }
        if grid.is_blocked(start) {
            warn!("planner: start {start} is blocked");
            return Err(PlanError::BlockedStart(start));
        }

        let pather = &self.pather;
        let mut path = search.guided_any(pather, start, |p| pather.is_goal(p))?;
        if self.expand {
            path.nodes = expand_waypoints(&path.nodes);
        }
        debug!(
            "planner: {start} -> {:?} cost {} ({} expanded)",
            path.end(),
            path.distance,
            search.expanded()
        );
        Ok(path)
    }

    /// Plan from every start in parallel. Each worker owns its search
    /// state; results are in the same order as `starts`.
    pub fn plan_all(&self, starts: &[Point3]) -> Vec<Result<Path<Point3>, PlanError>> {
        debug!("planner: planning {} starts", starts.len());
        starts
            .par_iter()
            .map_init(PathSearch::new, |search, &start| self.plan_with(search, start))
            .collect()
    }
}

/// Expand a jump-point path into unit steps.
///
/// Each segment is walked one cell at a time, moving every axis that still
/// differs by one per step. Straight and diagonal segments produced by the
/// scanner come out as uniform runs.
pub fn expand_waypoints(waypoints: &[Point3]) -> Vec<Point3> {
    let Some(&last) = waypoints.last() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(waypoints.len());
    for w in waypoints.windows(2) {
        let (mut c, b) = (w[0], w[1]);
        while c != b {
            out.push(c);
            c = c + (b - c).signum();
        }
    }
    out.push(last);
    out
}
