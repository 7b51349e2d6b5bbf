//! Geometry primitives: [`Point3`] and [`Bounds`].
//!
//! X and Y span the horizontal plane, Z is the vertical axis. A point's
//! textual form `"(x, y, z)"` is its canonical key: [`Display`](fmt::Display)
//! produces it and [`FromStr`] parses it back to the identical point.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Point3
// ---------------------------------------------------------------------------

/// A 3D integer coordinate.
///
/// Points compare and hash by value; the derived `Hash`/`Eq` is the
/// structural key used by every map and set in the workspace.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point3 {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return a point shifted by (dx, dy, dz).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Whether the point lies inside the half-open bounds.
    #[inline]
    pub fn in_bounds(self, b: &Bounds) -> bool {
        b.contains(self)
    }

    /// Component-wise sign, so `(3, 0, -2)` becomes `(1, 0, -1)`.
    #[inline]
    pub const fn signum(self) -> Self {
        Self::new(self.x.signum(), self.y.signum(), self.z.signum())
    }

    /// Number of non-zero components.
    #[inline]
    pub const fn active_axes(self) -> u32 {
        (self.x != 0) as u32 + (self.y != 0) as u32 + (self.z != 0) as u32
    }

    /// Components as an array, indexed x = 0, y = 1, z = 2.
    #[inline]
    pub const fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// The canonical key of this point.
    ///
    /// `key.parse::<Point3>()` always yields the same point again.
    pub fn key(self) -> String {
        self.to_string()
    }
}

// --- trait impls for Point3 ---

impl PartialOrd for Point3 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point3 {
    // Layer by layer, then row-major inside a layer.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.z
            .cmp(&other.z)
            .then(self.y.cmp(&other.y))
            .then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl FromStr for Point3 {
    type Err = ParsePointError;

    /// Parse the canonical key `"(x, y, z)"`. Whitespace around the
    /// components is ignored; the parentheses are required.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ParsePointError::new(s))?;

        let mut parts = inner.split(',').map(str::trim);
        let mut next = || -> Result<i32, ParsePointError> {
            parts
                .next()
                .and_then(|v| v.parse::<i32>().ok())
                .ok_or_else(|| ParsePointError::new(s))
        };
        let p = Point3::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(ParsePointError::new(s));
        }
        Ok(p)
    }
}

impl From<(i32, i32, i32)> for Point3 {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl Add for Point3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i32> for Point3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Point3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Error returned when a string is not a canonical point key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePointError {
    input: String,
}

impl ParsePointError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParsePointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid point key \u{201c}{}\u{201d}: expected \u{201c}(x, y, z)\u{201d}",
            self.input
        )
    }
}

impl std::error::Error for ParsePointError {}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// A half-open cuboid \[0, width) × \[0, height) × \[0, depth).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
    pub depth: i32,
}

impl Bounds {
    /// Create bounds with the given extents. Non-positive extents give an
    /// empty range.
    #[inline]
    pub const fn new(width: i32, height: i32, depth: i32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Extent along each axis as a point.
    #[inline]
    pub const fn size(self) -> Point3 {
        Point3::new(self.width, self.height, self.depth)
    }

    /// Whether any extent is zero or negative.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0 || self.depth <= 0
    }

    /// Total number of cells, saturating at `usize::MAX`.
    #[inline]
    pub fn len(self) -> usize {
        self.checked_len().unwrap_or(usize::MAX)
    }

    /// Total number of cells, or `None` if the count overflows `usize`.
    #[inline]
    pub fn checked_len(self) -> Option<usize> {
        if self.is_empty() {
            return Some(0);
        }
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.depth as usize)
    }

    /// Whether `p` is inside on every axis.
    #[inline]
    pub const fn contains(self, p: Point3) -> bool {
        p.x >= 0
            && p.x < self.width
            && p.y >= 0
            && p.y < self.height
            && p.z >= 0
            && p.z < self.depth
    }

    /// Flat index of `p` (x fastest, then y, then z), or `None` if `p` is
    /// outside.
    #[inline]
    pub fn index(self, p: Point3) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let (w, h) = (self.width as usize, self.height as usize);
        Some((p.z as usize * h + p.y as usize) * w + p.x as usize)
    }

    /// Inverse of [`index`](Self::index). The caller guarantees `idx < len()`.
    #[inline]
    pub fn point(self, idx: usize) -> Point3 {
        let (w, h) = (self.width as usize, self.height as usize);
        let x = idx % w;
        let y = (idx / w) % h;
        let z = idx / (w * h);
        Point3::new(x as i32, y as i32, z as i32)
    }

    /// Iterator over every point, x fastest, then y, then z.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            next: 0,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Point3;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.depth)
    }
}

// ---------------------------------------------------------------------------
// BoundsIter
// ---------------------------------------------------------------------------

/// Iterator over the points of a [`Bounds`] in flat-index order.
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    next: usize,
}

impl Iterator for BoundsIter {
    type Item = Point3;

    #[inline]
    fn next(&mut self) -> Option<Point3> {
        if self.next >= self.bounds.len() {
            return None;
        }
        let p = self.bounds.point(self.next);
        self.next += 1;
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bounds.len().saturating_sub(self.next);
        (n, Some(n))
    }
}

impl ExactSizeIterator for BoundsIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn point_arithmetic() {
        let a = Point3::new(1, 2, 3);
        let b = Point3::new(4, 6, 8);
        assert_eq!(a + b, Point3::new(5, 8, 11));
        assert_eq!(b - a, Point3::new(3, 4, 5));
        assert_eq!(a * 2, Point3::new(2, 4, 6));
        assert_eq!(-a, Point3::new(-1, -2, -3));
        assert_eq!(a.shift(0, -2, 1), Point3::new(1, 0, 4));
    }

    #[test]
    fn signum_and_active_axes() {
        let d = Point3::new(5, 0, -3);
        assert_eq!(d.signum(), Point3::new(1, 0, -1));
        assert_eq!(d.active_axes(), 2);
        assert_eq!(Point3::ZERO.active_axes(), 0);
        assert_eq!(Point3::new(1, 1, 1).active_axes(), 3);
    }

    #[test]
    fn key_format() {
        assert_eq!(Point3::new(1, -2, 30).key(), "(1, -2, 30)");
    }

    #[test]
    fn key_round_trip_every_cell() {
        let b = Bounds::new(4, 3, 5);
        for p in b {
            assert_eq!(p.key().parse::<Point3>(), Ok(p));
        }
    }

    #[test]
    fn key_round_trip_extremes() {
        for p in [
            Point3::new(i32::MIN, 0, i32::MAX),
            Point3::new(-1, -1, -1),
            Point3::ZERO,
        ] {
            assert_eq!(p.key().parse::<Point3>(), Ok(p));
        }
    }

    #[test]
    fn parse_tolerates_whitespace() {
        assert_eq!(" ( 1,2 ,  3 ) ".parse::<Point3>(), Ok(Point3::new(1, 2, 3)));
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in ["", "1, 2, 3", "(1, 2)", "(1, 2, 3, 4)", "(a, 2, 3)", "(1, 2, 3", "(1.5, 2, 3)"] {
            let err = bad.parse::<Point3>().unwrap_err();
            assert_eq!(err.input(), bad);
        }
    }

    #[test]
    fn points_hash_by_value() {
        let mut set = HashSet::new();
        set.insert(Point3::new(1, 2, 3));
        assert!(set.contains(&"(1, 2, 3)".parse::<Point3>().unwrap()));
        assert!(!set.insert(Point3::new(1, 2, 3)));
    }

    #[test]
    fn bounds_contains() {
        let b = Bounds::new(3, 2, 4);
        assert!(b.contains(Point3::new(0, 0, 0)));
        assert!(b.contains(Point3::new(2, 1, 3)));
        assert!(!b.contains(Point3::new(3, 0, 0)));
        assert!(!b.contains(Point3::new(0, 2, 0)));
        assert!(!b.contains(Point3::new(0, 0, 4)));
        assert!(!b.contains(Point3::new(-1, 0, 0)));
    }

    #[test]
    fn bounds_index_round_trip() {
        let b = Bounds::new(3, 4, 5);
        assert_eq!(b.len(), 60);
        for (i, p) in b.iter().enumerate() {
            assert_eq!(b.index(p), Some(i));
            assert_eq!(b.point(i), p);
        }
        assert_eq!(b.index(Point3::new(3, 0, 0)), None);
    }

    #[test]
    fn bounds_iter_order_and_len() {
        let b = Bounds::new(2, 2, 2);
        let pts: Vec<_> = b.iter().collect();
        assert_eq!(pts.len(), 8);
        assert_eq!(pts[0], Point3::new(0, 0, 0));
        assert_eq!(pts[1], Point3::new(1, 0, 0));
        assert_eq!(pts[2], Point3::new(0, 1, 0));
        assert_eq!(pts[4], Point3::new(0, 0, 1));
        assert_eq!(b.iter().len(), 8);
    }

    #[test]
    fn empty_bounds() {
        let b = Bounds::new(3, 0, 2);
        assert!(b.is_empty());
        assert_eq!(b.len(), 0);
        assert_eq!(b.iter().count(), 0);
    }

    #[test]
    fn cell_count_overflow() {
        let huge = Bounds::new(1 << 21, 1 << 21, 1 << 22);
        assert_eq!(huge.checked_len(), None);
        assert_eq!(huge.len(), usize::MAX);
        assert_eq!(Bounds::new(4, 5, 6).checked_len(), Some(120));
        assert_eq!(Bounds::new(4, -5, 6).checked_len(), Some(0));
    }

    #[test]
    fn ordering_is_layer_major() {
        let mut pts = vec![
            Point3::new(1, 0, 1),
            Point3::new(0, 1, 0),
            Point3::new(1, 0, 0),
        ];
        pts.sort();
        assert_eq!(
            pts,
            vec![
                Point3::new(1, 0, 0),
                Point3::new(0, 1, 0),
                Point3::new(1, 0, 1)
            ]
        );
    }
}
