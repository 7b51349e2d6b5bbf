use voxgrid_core::Point3;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point3, b: Point3) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs() + (a.z - b.z).abs()
}

/// Chebyshev (L∞) distance between two points.
///
/// For two points on one of the 18 scan rays this is the number of steps
/// between them.
#[inline]
pub fn chebyshev(a: Point3, b: Point3) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs()).max((a.z - b.z).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Point3::new(1, 2, 3);
        let b = Point3::new(4, 0, 3);
        assert_eq!(manhattan(a, b), 5);
        assert_eq!(chebyshev(a, b), 3);
        assert_eq!(manhattan(a, a), 0);
        assert_eq!(chebyshev(b, a), chebyshev(a, b));
    }
}
