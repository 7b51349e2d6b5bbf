//! Directional scans that prune the dense grid graph.
//!
//! Like jump point search, a scan walks a straight ray from an origin and
//! keeps only the cells that can change reachability:
//!
//! - a **rook scan** follows one axis and keeps cells with at least one open
//!   cell beside them (or cells that are declared goals);
//! - a **bishop scan** follows a two-axis diagonal and keeps every cell it
//!   reaches, refusing to squeeze between two closed corners.
//!
//! Both stop at the grid edge or the first blocked cell, never looking past
//! it.

use std::collections::HashSet;
use std::fmt;

use voxgrid_core::{Grid3, Point3};

// ---------------------------------------------------------------------------
// Direction tables
// ---------------------------------------------------------------------------

/// The six single-axis directions.
pub const ROOK_DIRECTIONS: [Point3; 6] = [
    Point3::new(0, 1, 0),
    Point3::new(0, -1, 0),
    Point3::new(-1, 0, 0),
    Point3::new(1, 0, 0),
    Point3::new(0, 0, 1),
    Point3::new(0, 0, -1),
];

/// The twelve two-axis diagonal directions (four per coordinate plane).
pub const BISHOP_DIRECTIONS: [Point3; 12] = [
    // xy plane
    Point3::new(-1, -1, 0),
    Point3::new(1, -1, 0),
    Point3::new(-1, 1, 0),
    Point3::new(1, 1, 0),
    // yz plane
    Point3::new(0, -1, -1),
    Point3::new(0, 1, -1),
    Point3::new(0, -1, 1),
    Point3::new(0, 1, 1),
    // xz plane
    Point3::new(-1, 0, 1),
    Point3::new(-1, 0, -1),
    Point3::new(1, 0, 1),
    Point3::new(1, 0, -1),
];

/// All 18 scan directions: rook directions first, then bishop directions.
/// Triple-axis diagonals are not moves.
pub const DIRECTIONS: [Point3; 18] = {
    let mut all = [Point3::ZERO; 18];
    let mut i = 0;
    while i < 6 {
        all[i] = ROOK_DIRECTIONS[i];
        i += 1;
    }
    while i < 18 {
        all[i] = BISHOP_DIRECTIONS[i - 6];
        i += 1;
    }
    all
};

// ---------------------------------------------------------------------------
// Errors and results
// ---------------------------------------------------------------------------

/// A scan was asked to walk a direction it cannot handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// The vector has the wrong number of active axes for the scan, or a
    /// component outside -1..=1.
    InvalidDirection(Point3),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDirection(d) => write!(f, "scan: invalid direction {d}"),
        }
    }
}

impl std::error::Error for ScanError {}

/// Outcome of a rook scan with pruning statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Important cells, nearest to the origin first.
    pub important: Vec<Point3>,
    /// How many open cells the ray passed over, important or not.
    pub visited: usize,
}

impl ScanReport {
    /// Cells visited but dropped from the pruned graph.
    pub fn pruned(&self) -> usize {
        self.visited - self.important.len()
    }
}

// ---------------------------------------------------------------------------
// Public scans
// ---------------------------------------------------------------------------

/// Walk a single axis from `origin` and return the important cells.
///
/// The walk starts **at** `origin`, so the origin itself is the first cell
/// classified and appears in the result when it qualifies. Callers that use
/// the result as a neighbor list must drop it (see
/// [`NeighborGenerator`](crate::NeighborGenerator)).
///
/// A cell is important if one of its four side cells (± along both inactive
/// axes) is open, or if it is a member of `goals`. Pass an empty set when
/// there are no goals to force.
pub fn rook_scan(
    grid: &Grid3,
    origin: Point3,
    dir: Point3,
    goals: &HashSet<Point3>,
) -> Result<Vec<Point3>, ScanError> {
    rook_scan_report(grid, origin, dir, goals).map(|r| r.important)
}

/// Like [`rook_scan`] but also reports how many cells were walked.
pub fn rook_scan_report(
    grid: &Grid3,
    origin: Point3,
    dir: Point3,
    goals: &HashSet<Point3>,
) -> Result<ScanReport, ScanError> {
    check_direction(dir, 1)?;
    let mut important = Vec::new();
    let visited = rook_walk(grid, origin, dir, goals, &mut important);
    Ok(ScanReport { important, visited })
}

/// Walk a two-axis diagonal from `origin` and return every reachable cell,
/// nearest first. The origin is not part of the result.
///
/// A diagonal step is allowed only while at least one of the two corner
/// cells between the previous position and the target is open. An origin
/// outside the grid yields nothing.
pub fn bishop_scan(grid: &Grid3, origin: Point3, dir: Point3) -> Result<Vec<Point3>, ScanError> {
    check_direction(dir, 2)?;
    let mut out = Vec::new();
    bishop_walk(grid, origin, dir, &mut out);
    Ok(out)
}

fn check_direction(dir: Point3, axes: u32) -> Result<(), ScanError> {
    let unit = dir.to_array().iter().all(|c| (-1..=1).contains(c));
    if !unit || dir.active_axes() != axes {
        return Err(ScanError::InvalidDirection(dir));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Walks (direction already validated)
// ---------------------------------------------------------------------------

#[inline]
const fn axis_unit(axis: usize) -> Point3 {
    match axis {
        0 => Point3::new(1, 0, 0),
        1 => Point3::new(0, 1, 0),
        _ => Point3::new(0, 0, 1),
    }
}

/// Append the important cells along a rook ray to `out`. Returns the number
/// of open cells walked.
pub(crate) fn rook_walk(
    grid: &Grid3,
    origin: Point3,
    dir: Point3,
    goals: &HashSet<Point3>,
    out: &mut Vec<Point3>,
) -> usize {
    let d = dir.to_array();
    let mut sides = [Point3::ZERO; 2];
    for (slot, axis) in sides.iter_mut().zip((0..3).filter(|&a| d[a] == 0)) {
        *slot = axis_unit(axis);
    }

    let mut visited = 0;
    let mut cell = origin;
    while let Some(c) = grid.cell_at(cell) {
        if c.blocked {
            break;
        }
        visited += 1;

        let has_open_side = sides
            .iter()
            .any(|&s| grid.is_open(cell + s) || grid.is_open(cell - s));
        if has_open_side || goals.contains(&cell) {
            out.push(cell);
        }
        cell = cell + dir;
    }
    visited
}

/// Append the cells reachable along a bishop ray to `out`.
pub(crate) fn bishop_walk(grid: &Grid3, origin: Point3, dir: Point3, out: &mut Vec<Point3>) {
    if !grid.contains(origin) {
        return;
    }
    let d = dir.to_array();
    let mut active = (0..3).filter(|&a| d[a] != 0);
    let (Some(a), Some(b)) = (active.next(), active.next()) else {
        return;
    };
    let step_a = axis_unit(a) * d[a];
    let step_b = axis_unit(b) * d[b];

    let mut prev = origin;
    let mut cell = origin + dir;
    while let Some(c) = grid.cell_at(cell) {
        if c.blocked {
            break;
        }
        // No squeezing between two closed corners.
        if !grid.is_open(prev + step_a) && !grid.is_open(prev + step_b) {
            break;
        }
        out.push(cell);
        prev = cell;
        cell = cell + dir;
    }
}
