use std::collections::HashSet;

use voxgrid_core::{Grid3, Point3};

use crate::cost::MoveCost;
use crate::distance::chebyshev;
use crate::scan::{BISHOP_DIRECTIONS, ROOK_DIRECTIONS, bishop_walk, rook_walk};

/// Pruned neighbor computation over all 18 scan directions.
///
/// The neighbors of a cell are the union of its six rook scans and twelve
/// bishop scans, each paired with the cost of getting there under the
/// configured [`MoveCost`]. The origin never appears among its own
/// neighbors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeighborGenerator {
    cost: MoveCost,
}

impl NeighborGenerator {
    /// Create a generator using `cost` for edge weights.
    pub fn new(cost: MoveCost) -> Self {
        Self { cost }
    }

    /// The configured cost model.
    pub fn cost(&self) -> MoveCost {
        self.cost
    }

    /// Return the pruned neighbors of `origin` with their edge costs.
    ///
    /// Members of `goals` found on a rook ray are always kept even without
    /// an open side cell.
    pub fn neighbors_of(
        &self,
        grid: &Grid3,
        origin: Point3,
        goals: &HashSet<Point3>,
    ) -> Vec<(Point3, i32)> {
        let mut buf = Vec::new();
        self.extend_neighbors(grid, origin, goals, &mut buf);
        buf
    }

    /// Append the pruned neighbors of `origin` into `buf`.
    pub fn extend_neighbors(
        &self,
        grid: &Grid3,
        origin: Point3,
        goals: &HashSet<Point3>,
        buf: &mut Vec<(Point3, i32)>,
    ) {
        let mut ray = Vec::new();
        for dir in ROOK_DIRECTIONS {
            ray.clear();
            rook_walk(grid, origin, dir, goals, &mut ray);
            // The rook walk classifies its own starting cell.
            self.push_ray(origin, dir, ray.iter().filter(|&&p| p != origin), buf);
        }
        for dir in BISHOP_DIRECTIONS {
            ray.clear();
            bishop_walk(grid, origin, dir, &mut ray);
            self.push_ray(origin, dir, ray.iter(), buf);
        }
    }

    fn push_ray<'a>(
        &self,
        origin: Point3,
        dir: Point3,
        ray: impl Iterator<Item = &'a Point3>,
        buf: &mut Vec<(Point3, i32)>,
    ) {
        buf.extend(ray.map(|&p| (p, self.cost.along(dir, chebyshev(origin, p)))));
    }
}

/// Pruned neighbors of `origin` under [`MoveCost::UNIFORM`].
pub fn neighbors_of(grid: &Grid3, origin: Point3, goals: &HashSet<Point3>) -> Vec<(Point3, i32)> {
    NeighborGenerator::default().neighbors_of(grid, origin, goals)
}
