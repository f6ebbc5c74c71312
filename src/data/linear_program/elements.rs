//! # Building blocks to describe linear programs.
use std::ops::Not;

/// Whether the objective function should be minimized or maximized.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Direction {
    #[allow(missing_docs)]
    #[default]
    Minimize,
    #[allow(missing_docs)]
    Maximize,
}

impl Direction {
    /// Factor to translate user costs to the costs of the equivalent minimization problem.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Minimize => 1_f64,
            Direction::Maximize => -1_f64,
        }
    }
}

/// Bound at which a non basic variable is held.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BoundSide {
    /// Value is equal to the (finite) lower bound.
    Lower,
    /// Value is equal to the (finite) upper bound.
    Upper,
    /// Both bounds are infinite, the value is zero.
    Free,
}

impl BoundSide {
    /// Side at which a variable starts out: the lower bound if finite, the upper bound otherwise.
    #[must_use]
    pub fn initial(lower: f64, upper: f64) -> Self {
        if lower.is_finite() {
            BoundSide::Lower
        } else if upper.is_finite() {
            BoundSide::Upper
        } else {
            BoundSide::Free
        }
    }

    /// Whether a variable with the given bounds can be held at this side.
    #[must_use]
    pub fn is_valid_for(self, lower: f64, upper: f64) -> bool {
        match self {
            BoundSide::Lower => lower.is_finite(),
            BoundSide::Upper => upper.is_finite(),
            BoundSide::Free => !lower.is_finite() && !upper.is_finite(),
        }
    }

    /// Value of a variable held at this side.
    #[must_use]
    pub fn value(self, lower: f64, upper: f64) -> f64 {
        debug_assert!(self.is_valid_for(lower, upper));

        match self {
            BoundSide::Lower => lower,
            BoundSide::Upper => upper,
            BoundSide::Free => 0_f64,
        }
    }
}

/// The opposite finite bound. `Free` has no opposite.
impl Not for BoundSide {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            BoundSide::Lower => BoundSide::Upper,
            BoundSide::Upper => BoundSide::Lower,
            BoundSide::Free => BoundSide::Free,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::data::linear_program::elements::BoundSide;

    #[test]
    fn initial_side() {
        assert_eq!(BoundSide::initial(0f64, f64::INFINITY), BoundSide::Lower);
        assert_eq!(BoundSide::initial(f64::NEG_INFINITY, 3f64), BoundSide::Upper);
        assert_eq!(BoundSide::initial(f64::NEG_INFINITY, f64::INFINITY), BoundSide::Free);
        assert_eq!(BoundSide::Upper.value(-1f64, 3f64), 3f64);
        assert_eq!(!BoundSide::Lower, BoundSide::Upper);
    }
}
