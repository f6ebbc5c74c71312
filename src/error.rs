//! # Errors
//!
//! Only malformed input and numerical breakdown are errors. Whether a problem is infeasible,
//! unbounded or could not be solved within the iteration limit is reported through a
//! [`Status`](crate::data::linear_program::solution::Status) instead.
use thiserror::Error;

/// A problem that is rejected before any iteration is done.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInput {
    /// A bound is NaN, or a bound excludes every finite value.
    #[error("variable {column} has an invalid bound pair [{lower}, {upper}]")]
    InvalidBound {
        /// Index of the variable.
        column: usize,
        /// Lower bound as given.
        lower: f64,
        /// Upper bound as given.
        upper: f64,
    },
    /// The lower bound lies above the upper bound.
    #[error("variable {column} has lower bound {lower} above its upper bound {upper}")]
    InvertedBounds {
        /// Index of the variable.
        column: usize,
        /// Lower bound as given.
        lower: f64,
        /// Upper bound as given.
        upper: f64,
    },
    /// Two parts of the problem don't agree on a dimension.
    #[error("expected {expected} {what}, got {actual}")]
    DimensionMismatch {
        /// What is being counted.
        what: &'static str,
        /// Size implied by the problem structure.
        expected: usize,
        /// Size that was provided.
        actual: usize,
    },
    /// A constraint coefficient is NaN or infinite.
    #[error("coefficient at row {row} of column {column} is not finite")]
    NonFiniteCoefficient {
        /// Row index of the coefficient.
        row: usize,
        /// Column index of the coefficient.
        column: usize,
    },
    /// A right hand side or cost value is NaN or infinite.
    #[error("{what} value at index {index} is not finite")]
    NonFiniteValue {
        /// Which vector contains the value.
        what: &'static str,
        /// Position of the value.
        index: usize,
    },
    /// A column announced as part of the initial identity matrix refers outside of the problem.
    #[error("identity column {column} for row {row} is out of range")]
    IdentityOutOfRange {
        /// Row of the identity element.
        row: usize,
        /// Column of the identity element.
        column: usize,
    },
    /// A row or column is listed more than once as part of the initial identity matrix.
    #[error("row {row} or column {column} appears twice in the initial identity matrix")]
    DuplicateIdentity {
        /// Row of the duplicate identity element.
        row: usize,
        /// Column of the duplicate identity element.
        column: usize,
    },
    /// A column announced as part of the initial identity matrix is not a unit vector.
    #[error("column {column} is not the unit vector of row {row}")]
    NotAnIdentityColumn {
        /// Row of the identity element.
        row: usize,
        /// Column of the identity element.
        column: usize,
    },
}

/// Failures of the basis inverse maintenance.
///
/// These are recovered from inside the solver where possible.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericalError {
    /// The pivot element of an update is indistinguishable from zero.
    #[error("pivot element {value:e} in row {row} is below the singular pivot tolerance")]
    SingularPivot {
        /// Row that would be pivoted on.
        row: usize,
        /// Value of the pivot element.
        value: f64,
    },
    /// A refactorization could not find a pivot for one of the basis columns.
    #[error("basis is singular, column {column} has no usable pivot")]
    SingularBasis {
        /// Basis column that could not be pivoted on.
        column: usize,
    },
}

/// Errors returned by the solver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The problem was malformed.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    /// No valid pivot remained after refactorizing the basis.
    #[error("the basis is numerically singular and no valid pivot remains")]
    SingularBasis,
    /// The sum of infeasibilities decreased without bound, which can only happen numerically.
    #[error("the phase one objective is unbounded")]
    UnboundedArtificialObjective,
}

/// Result type of the solver.
pub type SolverResult<T> = Result<T, SolverError>;
