//! Shortest-path search over weighted graphs and 3D voxel grids.
//!
//! The engine, [`PathSearch`], works on any node type and offers two modes:
//!
//! - **exhaustive** ([`PathSearch::exhaustive`]): Dijkstra over an explicit
//!   [`Adjacency`] map, settling every reachable node;
//! - **guided** ([`PathSearch::guided`], [`PathSearch::guided_any`],
//!   [`PathSearch::guided_fn`]): A* that asks a [`Pather`] for neighbors
//!   lazily and stops on the first goal it pops.
//!
//! On top of that, the grid half of the crate turns a [`Grid3`] into a
//! sparse graph. Directional scans ([`rook_scan`], [`bishop_scan`]) walk
//! the 6 axis and 12 planar-diagonal rays and keep only the cells that
//! matter, [`NeighborGenerator`] combines them with a [`MoveCost`], and
//! [`Planner`] runs guided search towards the nearest of several goals
//! using the admissible [`GoalHeuristic`].
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbor enumeration |
//! | [`AstarPather`] : [`Pather`] | guided search |
//!
//! [`Grid3`]: voxgrid_core::Grid3

mod astar;
mod cost;
mod dijkstra;
mod distance;
mod heuristic;
mod neighbors;
mod planner;
mod scan;
mod search;
mod traits;

pub use cost::{CostError, MoveCost};
pub use distance::{chebyshev, manhattan};
pub use heuristic::{GoalHeuristic, zero_heuristic};
pub use neighbors::{NeighborGenerator, neighbors_of};
pub use planner::{GridPather, PlanError, Planner, expand_waypoints};
pub use scan::{
    BISHOP_DIRECTIONS, DIRECTIONS, ROOK_DIRECTIONS, ScanError, ScanReport, bishop_scan, rook_scan,
    rook_scan_report,
};
pub use search::{Path, PathError, PathSearch, UNREACHABLE};
pub use traits::{Adjacency, AstarPather, FnPather, Pather};
