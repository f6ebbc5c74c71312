//! # Basis inverse rows
//!
//! Explicit row-major representation of the basis inverse B^-1. The inverse of a sparse matrix is
//! not generally sparse, so this is not a scalable algorithm. It is however useful for debugging
//! purposes to have an explicit representation of the basis inverse at hand.
//!
//! The in place solves need a copy of their input. The out of place solves, which are the ones the
//! store calls every iteration, write into the output directly.
use std::cmp::Ordering;

use crate::algorithm::two_phase::inverse_maintenance::{InverseMaintenance, is_singular_pivot, RefactorizationPolicy};
use crate::algorithm::two_phase::tolerances::Tolerances;
use crate::data::linear_algebra::matrix::ColumnMajor;
use crate::data::linear_algebra::vector::{DenseVector, SparseVector};
use crate::error::NumericalError;

/// Explicit row-major dense representation of the basis inverse.
#[derive(Clone, Debug, PartialEq)]
pub struct BasisInverseRows {
    rows: Vec<DenseVector>,
    nr_updates: usize,
    tolerances: Tolerances,
}

impl BasisInverseRows {
    fn identity(nr_rows: usize) -> Vec<DenseVector> {
        (0..nr_rows)
            .map(|i| {
                let mut row = DenseVector::zeros(nr_rows);
                row[i] = 1_f64;
                row
            })
            .collect()
    }

    /// Normalize the pivot row.
    ///
    /// That is, the pivot value will be set to `1`.
    ///
    /// # Arguments
    ///
    /// * `pivot_row_index`: Index of the pivot row.
    /// * `column`: Column relative to the current basis to be entered into that basis.
    fn normalize_pivot_row(&mut self, pivot_row_index: usize, column: &[f64]) {
        let pivot_value = column[pivot_row_index];
        debug_assert!(pivot_value != 0_f64);

        self.rows[pivot_row_index].scale(1_f64 / pivot_value);
    }

    /// Row reduce the other basis inverse rows.
    ///
    /// # Arguments
    ///
    /// * `pivot_row_index`: Index of the pivot row.
    /// * `column`: Column relative to the current basis to be entered into that basis.
    ///
    /// # Note
    ///
    /// This method requires a normalized pivot row.
    fn row_reduce(&mut self, pivot_row_index: usize, column: &[f64]) {
        debug_assert!(pivot_row_index < self.rows.len());

        let (rows_left, rows_right) = self.rows.split_at_mut(pivot_row_index);
        let Some((rows_middle, rows_right)) = rows_right.split_first_mut() else {
            return;
        };

        for (edit_row_index, &column_value) in column.iter().enumerate() {
            if column_value == 0_f64 {
                continue;
            }
            match edit_row_index.cmp(&pivot_row_index) {
                Ordering::Less => rows_left[edit_row_index]
                    .add_multiple(-column_value, rows_middle),
                Ordering::Equal => {},
                Ordering::Greater => rows_right[edit_row_index - (pivot_row_index + 1)]
                    .add_multiple(-column_value, rows_middle),
            }
        }
    }

    /// Value of the inverse at a row and column.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.rows[row][column]
    }
}

impl InverseMaintenance for BasisInverseRows {
    fn new(nr_rows: usize, _policy: RefactorizationPolicy, tolerances: Tolerances) -> Self {
        Self {
            rows: Self::identity(nr_rows),
            nr_updates: 0,
            tolerances,
        }
    }

    /// Gauss-Jordan elimination with partial pivoting over the rows that are not yet assigned.
    fn reset(&mut self, basis: &[usize], columns: &ColumnMajor) -> Result<Vec<usize>, NumericalError> {
        let nr_rows = self.rows.len();
        debug_assert_eq!(basis.len(), nr_rows);

        self.rows = Self::identity(nr_rows);
        self.nr_updates = 0;

        let mut assigned = vec![None; nr_rows];
        let mut work = vec![0_f64; nr_rows];
        for &column in basis {
            self.ftran_column(columns.column(column), &mut work);

            let pivot = (0..nr_rows)
                .filter(|&i| assigned[i].is_none())
                .max_by(|&i, &k| work[i].abs().total_cmp(&work[k].abs()).then(k.cmp(&i)))
                .filter(|&i| !is_singular_pivot(work[i], &work, self.tolerances.singular))
                .ok_or(NumericalError::SingularBasis { column })?;

            // The order of these calls matters: the first of the two normalizes the pivot row
            self.normalize_pivot_row(pivot, &work);
            self.row_reduce(pivot, &work);
            assigned[pivot] = Some(column);
        }

        Ok(assigned.into_iter().flatten().collect())
    }

    fn ftran_in_place(&self, values: &mut [f64]) {
        let b = values.to_vec();
        self.ftran(&b, values);
    }

    fn btran_in_place(&self, values: &mut [f64]) {
        let c = values.to_vec();
        self.btran(&c, values);
    }

    fn ftran(&self, b: &[f64], out: &mut [f64]) {
        debug_assert_eq!(b.len(), self.rows.len());

        for (value, row) in out.iter_mut().zip(&self.rows) {
            *value = row.inner_product(b);
        }
    }

    fn ftran_column(&self, column: &SparseVector, out: &mut [f64]) {
        for (value, row) in out.iter_mut().zip(&self.rows) {
            *value = column.inner_product_with_dense(row);
        }
    }

    fn btran(&self, c: &[f64], out: &mut [f64]) {
        debug_assert_eq!(c.len(), self.rows.len());

        out.fill(0_f64);
        for (row, &factor) in self.rows.iter().zip(c) {
            if factor != 0_f64 {
                for (value, &x) in out.iter_mut().zip(row.iter()) {
                    *value += factor * x;
                }
            }
        }
    }

    fn btran_unit(&self, row: usize, out: &mut [f64]) {
        out.copy_from_slice(&self.rows[row]);
    }

    fn update(&mut self, exit_row: usize, direction: &[f64]) -> Result<(), NumericalError> {
        let pivot = direction[exit_row];
        if is_singular_pivot(pivot, direction, self.tolerances.singular) {
            return Err(NumericalError::SingularPivot { row: exit_row, value: pivot });
        }

        self.normalize_pivot_row(exit_row, direction);
        self.row_reduce(exit_row, direction);
        self.nr_updates += 1;

        Ok(())
    }

    fn needs_refactorization(&self) -> bool {
        // Refactoring is not a concept in this implementation, the rows are always explicit
        false
    }

    fn nr_updates(&self) -> usize {
        self.nr_updates
    }

    fn nr_rows(&self) -> usize {
        self.rows.len()
    }
}
