//! # Simplex stores
//!
//! A store owns the problem data, the basis partition and a representation of the basis inverse.
//! It exposes the quantities that the pivoting protocol needs without prescribing how the inverse is
//! maintained.
use crate::algorithm::two_phase::store::partition::Position;
use crate::data::linear_algebra::vector::DenseVector;
use crate::data::linear_program::elements::BoundSide;
use crate::data::linear_program::structure::{ColumnType, LinearStructure};
use crate::error::{InvalidInput, NumericalError};

pub mod partition;
pub mod revised;

/// The column that is about to enter the basis.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EnterInfo {
    /// Column index.
    pub column: usize,
    /// Index of the column among the excluded columns.
    pub excluded_index: usize,
}

/// The basic variable that is about to leave the basis.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ExitInfo {
    /// Row of the basic variable.
    pub row: usize,
    /// Column index.
    pub column: usize,
}

/// A basis change.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IterDescr {
    /// Entering column.
    pub enter: EnterInfo,
    /// Leaving basic variable.
    pub exit: ExitInfo,
    /// Signed change of the entering variable.
    pub step: f64,
    /// Bound at which the leaving variable will be held.
    pub leaving_side: BoundSide,
}

/// Objective that is currently being optimized.
#[derive(Clone, Debug, PartialEq)]
pub enum ObjectiveState {
    /// The problem objective.
    NoPhase1,
    /// Artificial objective with a cost for each column, minimizing the sum of infeasibilities.
    Phase1Active(DenseVector),
}

/// Data and operations needed by the simplex iterations.
///
/// Columns are indexed `0..n + m`: the problem columns followed by one artificial unit column per
/// row. Excluded columns are referred to by their position `je` among the excluded columns where
/// the per-iteration vectors are concerned.
pub trait SimplexStore {
    /// Shape of the problem, with the bounds of the problem columns.
    fn structure(&self) -> &LinearStructure;

    /// Number of rows `m`.
    fn nr_rows(&self) -> usize {
        self.structure().nr_rows()
    }

    /// Number of columns including the artificial ones, `n + m`.
    fn nr_columns(&self) -> usize {
        self.structure().nr_total_columns()
    }

    /// Basic columns by row.
    fn included(&self) -> &[usize];

    /// Non basic columns.
    fn excluded(&self) -> &[usize];

    /// Where a column currently is.
    fn position(&self, j: usize) -> Position;

    /// Lower bound of any column, artificial ones included.
    fn lower_bound(&self, j: usize) -> f64;

    /// Upper bound of any column, artificial ones included.
    fn upper_bound(&self, j: usize) -> f64;

    /// Bound at which a non basic column is held.
    fn bound_side(&self, j: usize) -> BoundSide;

    /// Change the bound at which a non basic column is held, without updating the right hand side.
    ///
    /// Should be followed by a matching [`shift_column`](SimplexStore::shift_column).
    fn set_bound_side(&mut self, j: usize, side: BoundSide);

    /// Replace the bounds of a problem column.
    ///
    /// A non basic column is moved to the new bound at its side, shifting the right hand side. A
    /// basic column keeps its value, which may now be infeasible.
    fn set_bounds(&mut self, j: usize, lower: f64, upper: f64) -> Result<(), InvalidInput>;

    /// Replace the cost of a problem column, in the direction of the problem.
    fn set_cost(&mut self, j: usize, cost: f64) -> Result<(), InvalidInput>;

    /// Recompute the simplex multipliers, the reduced costs of all excluded columns and the values
    /// of all basic variables.
    fn calculate_iteration(&mut self);

    /// Compute the entering column expressed in the current basis, `y = B^-1 A_enter`.
    fn calculate_primal_direction(&mut self, enter: &EnterInfo);

    /// Compute the row of `B^-1 A_N` of the leaving variable, `a_je = (B^-T e_exit)^T A_j`.
    fn calculate_dual_direction(&mut self, exit: &ExitInfo);

    /// Element `i` of the last primal direction.
    fn primal_direction(&self, i: usize) -> f64;

    /// Element `je` of the last dual direction.
    fn dual_direction(&self, je: usize) -> f64;

    /// Value of the basic variable at row `i`.
    fn current_rhs(&self, i: usize) -> f64;

    /// Signed bound violation of the basic variable at row `i`.
    ///
    /// Negative when below its lower bound, positive when above its upper bound and zero when
    /// within its bounds up to the feasibility tolerance.
    fn get_infeasibility(&self, i: usize) -> f64;

    /// Reduced cost of the excluded column at position `je`.
    fn get_reduced_cost(&self, je: usize) -> f64;

    /// Commit a basis change.
    ///
    /// The primal direction of the entering column should be current. Leaving artificial variables
    /// are fixed at zero. Refactorizes when the inverse asks for it.
    ///
    /// # Return value
    ///
    /// An error if the pivot element is too small, in which case nothing changed, or if a
    /// refactorization found the new basis singular.
    fn pivot(&mut self, iteration: &IterDescr) -> Result<(), NumericalError>;

    /// Move the value of a non basic column by `shift`.
    ///
    /// The right hand side is shifted by `shift` times the column and the basic values are solved
    /// for again.
    fn shift_column(&mut self, j: usize, shift: f64);

    /// Move an excluded column to its opposite bound without a basis change.
    ///
    /// # Arguments
    ///
    /// * `je`: Position of the column among the excluded columns. Both its bounds should be finite.
    fn flip(&mut self, je: usize) {
        let j = self.excluded()[je];
        let (lower, upper) = (self.lower_bound(j), self.upper_bound(j));
        let side = self.bound_side(j);
        debug_assert!(lower.is_finite() && upper.is_finite());

        let target = !side;
        let shift = target.value(lower, upper) - side.value(lower, upper);
        self.set_bound_side(j, target);
        self.shift_column(j, shift);
    }

    /// Reinitialize the partition and the inverse from a set of basic columns.
    ///
    /// Non basic columns keep their bound side, if it's valid for their bounds.
    fn reset_basis(&mut self, basis: &[usize]) -> Result<(), NumericalError>;

    /// Factorize the current basis from scratch. The basic columns may be reordered.
    fn refactorize(&mut self) -> Result<(), NumericalError>;

    /// Create an initial basis from the identity columns and artificial variables, and activate the
    /// objective that minimizes the sum of infeasibilities.
    ///
    /// # Return value
    ///
    /// The number of artificial variables in the basis.
    fn setup_classic_phase1_objective(&mut self) -> Result<usize, NumericalError>;

    /// Artificial objective, if active.
    fn phase1(&self) -> Option<&DenseVector>;

    /// Restore the problem objective and fix all artificial variables at zero.
    fn remove_phase1(&mut self);

    /// Value of the objective that is currently active.
    fn objective_value(&self) -> f64;

    /// Value of the problem objective at the current solution, in the direction of the problem.
    fn extract_value(&self) -> f64;

    /// Write the values of all `n + m` columns.
    fn copy_basic_solution(&self, out: &mut [f64]);

    /// Values of the problem columns.
    fn extract_solution(&self) -> Vec<f64>;

    /// Negated simplex multipliers, one per row.
    fn dual_values(&self) -> Vec<f64>;

    /// Whether column `j` is artificial.
    fn is_artificial(&self, j: usize) -> bool {
        self.structure().column_type(j) == ColumnType::Artificial
    }

    /// Whether a column has equal bounds and can't move.
    fn is_fixed(&self, j: usize) -> bool {
        self.lower_bound(j) == self.upper_bound(j)
    }
}
