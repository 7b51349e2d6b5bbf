//! Per-step movement costs.

use std::fmt;

use voxgrid_core::Point3;

/// Cost of one straight (rook) step and one two-axis diagonal (bishop) step.
///
/// A neighbor reached `k` cells along a rook ray costs `k * rook`; along a
/// bishop ray it costs `k * bishop`. Both costs are strictly positive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MoveCostRepr"))]
pub struct MoveCost {
    rook: i32,
    bishop: i32,
}

impl MoveCost {
    /// Every step costs 1, diagonal or not.
    pub const UNIFORM: Self = Self { rook: 1, bishop: 1 };

    /// Integer approximation of Euclidean step lengths (1 : √2).
    pub const OCTILE: Self = Self {
        rook: 10,
        bishop: 14,
    };

    /// Create a cost model. Fails unless both costs are positive.
    pub fn new(rook: i32, bishop: i32) -> Result<Self, CostError> {
        if rook <= 0 || bishop <= 0 {
            return Err(CostError { rook, bishop });
        }
        Ok(Self { rook, bishop })
    }

    /// Cost of one straight step.
    #[inline]
    pub fn rook(self) -> i32 {
        self.rook
    }

    /// Cost of one two-axis diagonal step.
    #[inline]
    pub fn bishop(self) -> i32 {
        self.bishop
    }

    /// Cost of `steps` unit moves along `dir`. `dir` must be a rook or bishop
    /// direction.
    #[inline]
    pub fn along(self, dir: Point3, steps: i32) -> i32 {
        let unit = if dir.active_axes() >= 2 {
            self.bishop
        } else {
            self.rook
        };
        unit.saturating_mul(steps)
    }

    /// Lower bound on the cost of any path that must cover `manhattan` units
    /// of Manhattan distance.
    ///
    /// A rook step removes at most 1 unit for `rook`, a bishop step at most 2
    /// units for `bishop`, so every unit costs at least
    /// `min(rook, bishop / 2)`. The result is rounded down.
    #[inline]
    pub fn lower_bound(self, manhattan: i32) -> i32 {
        let per_two_units = (2 * self.rook as i64).min(self.bishop as i64);
        let bound = manhattan.max(0) as i64 * per_two_units / 2;
        bound.min(i32::MAX as i64) as i32
    }
}

impl Default for MoveCost {
    fn default() -> Self {
        Self::UNIFORM
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct MoveCostRepr {
    rook: i32,
    bishop: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<MoveCostRepr> for MoveCost {
    type Error = CostError;

    fn try_from(repr: MoveCostRepr) -> Result<Self, CostError> {
        MoveCost::new(repr.rook, repr.bishop)
    }
}

/// A cost model with a non-positive step cost was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostError {
    pub rook: i32,
    pub bishop: i32,
}

impl fmt::Display for CostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "move cost: step costs must be positive (rook {}, bishop {})",
            self.rook, self.bishop
        )
    }
}

impl std::error::Error for CostError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive() {
        assert!(MoveCost::new(0, 1).is_err());
        assert!(MoveCost::new(1, -2).is_err());
        assert_eq!(MoveCost::new(2, 3).map(|c| (c.rook(), c.bishop())), Ok((2, 3)));
    }

    #[test]
    fn along_picks_step_kind() {
        let c = MoveCost::OCTILE;
        assert_eq!(c.along(Point3::new(0, 0, -1), 3), 30);
        assert_eq!(c.along(Point3::new(1, 0, -1), 3), 42);
    }

    #[test]
    fn lower_bound_uniform_halves_manhattan() {
        let c = MoveCost::UNIFORM;
        assert_eq!(c.lower_bound(0), 0);
        assert_eq!(c.lower_bound(1), 0);
        assert_eq!(c.lower_bound(7), 3);
        assert_eq!(c.lower_bound(8), 4);
    }

    #[test]
    fn lower_bound_octile() {
        // min(2 * 10, 14) / 2 = 7 per unit
        assert_eq!(MoveCost::OCTILE.lower_bound(4), 28);
        // expensive diagonals: straight steps dominate
        let c = MoveCost::new(1, 5).unwrap();
        assert_eq!(c.lower_bound(6), 6);
    }

    #[test]
    fn lower_bound_never_exceeds_a_single_move() {
        // One step of each kind, moving as much Manhattan distance as it can.
        for c in [MoveCost::UNIFORM, MoveCost::OCTILE, MoveCost::new(3, 4).unwrap()] {
            assert!(c.lower_bound(1) <= c.rook());
            assert!(c.lower_bound(2) <= c.bishop());
        }
    }

    #[test]
    fn lower_bound_saturates() {
        assert_eq!(MoveCost::OCTILE.lower_bound(i32::MAX), i32::MAX);
        assert_eq!(MoveCost::UNIFORM.lower_bound(-4), 0);
    }
}
