//! # Maintaining a basis inverse
//!
//! The simplex method requires us to solve linear systems with the basis matrix `B` and its
//! transpose in every iteration. After each basis change, the representation of the inverse is
//! updated rather than recomputed.
//!
//! Two representations are available: a product of elementary matrices, which is the default, and
//! an explicit dense inverse, which is mostly useful for small problems and for testing.
use std::fmt::Debug;

use crate::algorithm::two_phase::tolerances::Tolerances;
use crate::data::linear_algebra::matrix::ColumnMajor;
use crate::data::linear_algebra::vector::SparseVector;
use crate::error::NumericalError;

pub mod basis_inverse_rows;
pub mod eta_file;
pub mod product_form;

/// When to throw the accumulated updates away and refactorize.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RefactorizationPolicy {
    /// Fraction of the decimal digits of a `f64` that the updates may consume through growth of
    /// their entries before a refactorization is requested.
    pub threshold: f64,
    /// Number of updates after which a refactorization is requested regardless of growth.
    pub max_updates: usize,
}

impl Default for RefactorizationPolicy {
    fn default() -> Self {
        Self {
            threshold: 2_f64 / 3_f64,
            max_updates: 100,
        }
    }
}

impl RefactorizationPolicy {
    /// Growth, in decimal digits, above which a refactorization is requested.
    #[must_use]
    pub fn digit_budget(&self) -> f64 {
        self.threshold * f64::from(f64::DIGITS)
    }
}

/// Maintain a basis inverse.
///
/// Should facilitate quick solving of a linear system. Rows of the inverse correspond to the
/// positions of the basic variables.
pub trait InverseMaintenance: Debug {
    /// Create a representation of the identity matrix.
    ///
    /// # Arguments
    ///
    /// * `nr_rows`: Size `m` of the basis.
    /// * `policy`: When to request a refactorization.
    /// * `tolerances`: Singular pivot and drop tolerances are used.
    fn new(nr_rows: usize, policy: RefactorizationPolicy, tolerances: Tolerances) -> Self;

    /// Discard all updates and factorize the basis from scratch.
    ///
    /// # Arguments
    ///
    /// * `basis`: Indices of the `m` columns in the basis. Values should be unique.
    /// * `columns`: Matrix that the indices refer to.
    ///
    /// # Return value
    ///
    /// The same basis columns, ordered such that the column at position `i` is the basic variable
    /// of row `i` of the new inverse. An error if the basis is numerically singular, in which case
    /// the state of `self` is unspecified until the next successful reset.
    fn reset(&mut self, basis: &[usize], columns: &ColumnMajor) -> Result<Vec<usize>, NumericalError>;

    /// Solve `B x = b` in place.
    fn ftran_in_place(&self, values: &mut [f64]);

    /// Solve `B^T x = c` in place.
    fn btran_in_place(&self, values: &mut [f64]);

    /// Solve `B out = b`.
    fn ftran(&self, b: &[f64], out: &mut [f64]) {
        out.copy_from_slice(b);
        self.ftran_in_place(out);
    }

    /// Solve `B out = column` for a sparse column.
    fn ftran_column(&self, column: &SparseVector, out: &mut [f64]) {
        column.copy_into(out);
        self.ftran_in_place(out);
    }

    /// Solve `B^T out = c`.
    fn btran(&self, c: &[f64], out: &mut [f64]) {
        out.copy_from_slice(c);
        self.btran_in_place(out);
    }

    /// Solve `B^T out = e_row`, which is row `row` of `B^-1`.
    fn btran_unit(&self, row: usize, out: &mut [f64]) {
        debug_assert!(row < out.len());

        out.fill(0_f64);
        out[row] = 1_f64;
        self.btran_in_place(out);
    }

    /// Update the representation after a basis change.
    ///
    /// # Arguments
    ///
    /// * `exit_row`: Row of the basic variable that leaves.
    /// * `direction`: Entering column expressed in the current basis, `B^-1 A_enter`.
    ///
    /// # Return value
    ///
    /// An error if the pivot element `direction[exit_row]` is too small. The representation is not
    /// changed in that case.
    fn update(&mut self, exit_row: usize, direction: &[f64]) -> Result<(), NumericalError>;

    /// Whether enough updates accumulated that a refactorization is advisable.
    fn needs_refactorization(&self) -> bool;

    /// Number of updates since the last reset.
    fn nr_updates(&self) -> usize;

    /// Size `m` of the basis.
    fn nr_rows(&self) -> usize;
}

/// Whether a pivot element is acceptable relative to the rest of its column.
pub(crate) fn is_singular_pivot(pivot: f64, direction: &[f64], tolerance: f64) -> bool {
    let scale = direction.iter().fold(1_f64, |max, v| max.max(v.abs()));
    pivot.abs() < tolerance * scale
}
