//! The [`Grid3`] type, a dense 3D occupancy grid.
//!
//! A `Grid3` owns one open/blocked flag per cell. Lookups through
//! [`cell_at`](Grid3::cell_at) never fail: probing a coordinate outside the
//! grid yields `None`, which scanners treat as "not open".
//!
//! Mutation needs `&mut Grid3`, so any search that borrows the grid keeps it
//! frozen until the search (and whatever planner holds the borrow) is gone.

use std::fmt;

use crate::geom::{Bounds, Point3};

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A snapshot of one grid cell: its coordinate and whether it is blocked.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: Point3,
    pub blocked: bool,
}

impl Cell {
    /// Whether the cell can be entered.
    #[inline]
    pub const fn is_open(self) -> bool {
        !self.blocked
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while building or editing a [`Grid3`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// At least one dimension was zero or negative.
    InvalidDimensions { width: i32, height: i32, depth: i32 },
    /// A coordinate outside the grid was passed to an editing operation.
    OutOfBounds(Point3),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions {
                width,
                height,
                depth,
            } => write!(
                f,
                "grid: invalid dimensions {width}x{height}x{depth} (all must be positive)"
            ),
            Self::OutOfBounds(p) => write!(f, "grid: coordinate {p} is out of bounds"),
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// Grid3
// ---------------------------------------------------------------------------

/// A cuboid of cells indexed \[0, width) × \[0, height) × \[0, depth).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridRepr"))]
pub struct Grid3 {
    bounds: Bounds,
    blocked: Vec<bool>,
}

/// Unvalidated wire form of a [`Grid3`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    bounds: Bounds,
    blocked: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid3 {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, GridError> {
        let b = repr.bounds;
        if cell_count(b) != Some(repr.blocked.len()) {
            return Err(GridError::InvalidDimensions {
                width: b.width,
                height: b.height,
                depth: b.depth,
            });
        }
        Ok(Grid3 {
            bounds: b,
            blocked: repr.blocked,
        })
    }
}

/// Number of cells a grid with bounds `b` stores, or `None` when the bounds
/// are empty or too large to allocate.
fn cell_count(b: Bounds) -> Option<usize> {
    if b.is_empty() {
        return None;
    }
    b.checked_len().filter(|&n| n <= isize::MAX as usize)
}

impl Grid3 {
    /// Create an all-open grid.
    ///
    /// Fails with [`GridError::InvalidDimensions`] when a dimension is not
    /// positive or the cell count does not fit in memory.
    pub fn new(width: i32, height: i32, depth: i32) -> Result<Self, GridError> {
        let bounds = Bounds::new(width, height, depth);
        let len = cell_count(bounds).ok_or(GridError::InvalidDimensions {
            width,
            height,
            depth,
        })?;
        Ok(Self {
            bounds,
            blocked: vec![false; len],
        })
    }

    /// Create a grid and mark every obstacle blocked.
    ///
    /// Fails on the first obstacle outside the grid, so no partially built
    /// grid ever escapes.
    pub fn with_obstacles(
        width: i32,
        height: i32,
        depth: i32,
        obstacles: impl IntoIterator<Item = Point3>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(width, height, depth)?;
        for p in obstacles {
            grid.mark_blocked(p)?;
        }
        Ok(grid)
    }

    /// The grid extents.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Extent along x.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width
    }

    /// Extent along y.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height
    }

    /// Extent along z.
    #[inline]
    pub fn depth(&self) -> i32 {
        self.bounds.depth
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point3) -> bool {
        self.bounds.contains(p)
    }

    /// Look up the cell at `p`. Returns `None` when `p` is outside the grid
    /// on any axis.
    #[inline]
    pub fn cell_at(&self, p: Point3) -> Option<Cell> {
        let idx = self.bounds.index(p)?;
        Some(Cell {
            pos: p,
            blocked: self.blocked[idx],
        })
    }

    /// Whether `p` is inside the grid and not blocked.
    #[inline]
    pub fn is_open(&self, p: Point3) -> bool {
        self.cell_at(p).is_some_and(Cell::is_open)
    }

    /// Whether `p` is inside the grid and blocked.
    #[inline]
    pub fn is_blocked(&self, p: Point3) -> bool {
        self.cell_at(p).is_some_and(|c| c.blocked)
    }

    /// Mark `p` as blocked.
    pub fn mark_blocked(&mut self, p: Point3) -> Result<(), GridError> {
        self.set_blocked(p, true)
    }

    /// Mark `p` as open again.
    pub fn unblock(&mut self, p: Point3) -> Result<(), GridError> {
        self.set_blocked(p, false)
    }

    /// Set the blocked flag of `p`.
    pub fn set_blocked(&mut self, p: Point3, blocked: bool) -> Result<(), GridError> {
        let idx = self.bounds.index(p).ok_or(GridError::OutOfBounds(p))?;
        self.blocked[idx] = blocked;
        Ok(())
    }

    /// Flip the blocked flag of `p` and return the new value.
    pub fn toggle(&mut self, p: Point3) -> Result<bool, GridError> {
        let idx = self.bounds.index(p).ok_or(GridError::OutOfBounds(p))?;
        self.blocked[idx] = !self.blocked[idx];
        Ok(self.blocked[idx])
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// Iterate over the coordinates of blocked cells in flat-index order.
    pub fn iter_blocked(&self) -> impl Iterator<Item = Point3> + '_ {
        self.blocked
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b)
            .map(|(i, _)| self.bounds.point(i))
    }

    /// Iterate over every cell in flat-index order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.blocked.iter().enumerate().map(|(i, &blocked)| Cell {
            pos: self.bounds.point(i),
            blocked,
        })
    }
}
