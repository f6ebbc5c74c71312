//! # Column major sparse matrix
//!
//! The constraint matrix is only ever accessed by column: columns are fetched by index and
//! multiplied with dense vectors.
use std::fmt;

use num_traits::ToPrimitive;

use crate::data::linear_algebra::vector::{SparseVector, Vector};

/// Sparse matrix stored as a list of sparse columns of equal length.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnMajor {
    columns: Vec<SparseVector>,
    nr_rows: usize,
}

impl ColumnMajor {
    /// Create a new instance.
    ///
    /// # Arguments
    ///
    /// * `columns`: Each column should have length `nr_rows`.
    /// * `nr_rows`: Number of rows of the matrix. Needed when there are no columns.
    #[must_use]
    pub fn new(columns: Vec<SparseVector>, nr_rows: usize) -> Self {
        debug_assert!(columns.iter().all(|column| column.len() == nr_rows));

        Self { columns, nr_rows }
    }

    /// Create a matrix from dense rows of any primitive number type.
    ///
    /// Values that can't be represented as a `f64` become `NaN` and are rejected when the matrix
    /// becomes part of a linear program.
    ///
    /// # Arguments
    ///
    /// * `rows`: Values by row, each of length `nr_columns`.
    /// * `nr_columns`: Number of columns, needed when there are no rows.
    #[must_use]
    pub fn from_dense_rows<T: ToPrimitive>(rows: &[Vec<T>], nr_columns: usize) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == nr_columns));

        let columns = (0..nr_columns)
            .map(|j| {
                let data = rows.iter().enumerate()
                    .map(|(i, row)| (i, row[j].to_f64().unwrap_or(f64::NAN)))
                    .filter(|&(_, value)| value != 0_f64)
                    .collect();
                SparseVector::new(data, rows.len())
            })
            .collect();

        Self::new(columns, rows.len())
    }

    /// Column with index `j`.
    #[must_use]
    pub fn column(&self, j: usize) -> &SparseVector {
        debug_assert!(j < self.columns.len());

        &self.columns[j]
    }

    /// Iterate over all columns.
    pub fn iter_columns(&self) -> impl Iterator<Item = &SparseVector> {
        self.columns.iter()
    }

    /// Append the unit columns `e_0, ..., e_(m - 1)`.
    pub fn extend_with_identity(&mut self) {
        for i in 0..self.nr_rows {
            self.columns.push(SparseVector::standard_basis_vector(i, self.nr_rows));
        }
    }

    /// Value at a row and column, zero if not stored.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> f64 {
        debug_assert!(row < self.nr_rows);

        self.columns[column].get(row)
    }

    /// Number of rows.
    #[must_use]
    pub fn nr_rows(&self) -> usize {
        self.nr_rows
    }

    /// Number of columns.
    #[must_use]
    pub fn nr_columns(&self) -> usize {
        self.columns.len()
    }
}

impl fmt::Display for ColumnMajor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.nr_rows {
            for column in &self.columns {
                write!(f, "{:>10.4}", column.get(i))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::data::linear_algebra::matrix::ColumnMajor;

    #[test]
    fn from_dense_rows() {
        let matrix = ColumnMajor::from_dense_rows(&[
            vec![1, 0, 2],
            vec![0, 0, 3],
        ], 3);
        assert_eq!(matrix.nr_rows(), 2);
        assert_eq!(matrix.nr_columns(), 3);
        assert_eq!(matrix.column(1).iter().next(), None);
        assert_eq!(matrix.get(1, 2), 3f64);
        assert_eq!(matrix.get(0, 0), 1f64);
    }

    #[test]
    fn identity_extension() {
        let mut matrix = ColumnMajor::from_dense_rows::<i32>(&[vec![], vec![]], 0);
        matrix.extend_with_identity();
        assert_eq!(matrix.nr_columns(), 2);
        assert_eq!(matrix.column(1).as_singleton(), Some((1, 1f64)));
    }
}
