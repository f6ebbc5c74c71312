//! # Elementary matrices
//!
//! An eta matrix differs from the identity in a single column, the pivot column. After a pivot on
//! row `p` with entering column `y = B^-1 a`, the new inverse is `E B^-1` where column `p` of `E`
//! is `(-y_0 / y_p, ..., 1 / y_p, ..., -y_(m - 1) / y_p)`.
use crate::data::linear_algebra::SparseTuple;

/// Eta matrix, also "file", stored as its pivot value and the off-pivot entries of its column.
#[derive(Clone, Debug, PartialEq)]
pub struct EtaFile {
    /// Entries outside of the pivot row, sorted by index.
    values: Vec<SparseTuple<f64>>,
    pivot: usize,
    pivot_value: f64,
    len: usize,
}

impl EtaFile {
    /// Create a new instance from an entering column.
    ///
    /// # Arguments
    ///
    /// * `pivot`: Row at which the column is pivoted on.
    /// * `direction`: Entering column expressed in the basis before the pivot. The value at
    /// `pivot` should not be zero.
    /// * `drop_tolerance`: Off-pivot entries smaller in absolute value are not stored.
    #[must_use]
    pub fn new(pivot: usize, direction: &[f64], drop_tolerance: f64) -> Self {
        debug_assert!(pivot < direction.len());
        debug_assert!(direction[pivot] != 0_f64);

        let pivot_value = 1_f64 / direction[pivot];
        let values = direction.iter().enumerate()
            .filter(|&(i, &v)| i != pivot && v.abs() > drop_tolerance)
            .map(|(i, &v)| (i, -v * pivot_value))
            .collect();

        Self {
            values,
            pivot,
            pivot_value,
            len: direction.len(),
        }
    }

    /// Column-multiply with this matrix (from the left of the vector, i.e. `E x`).
    ///
    /// # Arguments
    ///
    /// * `vector`: Dense vector of size `self.len`.
    pub fn apply_right(&self, vector: &mut [f64]) {
        debug_assert_eq!(vector.len(), self.len);

        let value = vector[self.pivot];
        if value == 0_f64 {
            return;
        }

        vector[self.pivot] = self.pivot_value * value;
        for &(i, eta) in &self.values {
            vector[i] += eta * value;
        }
    }

    /// Row-multiply with this matrix (from the right of the vector, i.e. `x^T E`).
    ///
    /// # Arguments
    ///
    /// * `vector`: Dense vector of size `self.len`.
    pub fn apply_left(&self, vector: &mut [f64]) {
        debug_assert_eq!(vector.len(), self.len);

        let total = self.values.iter()
            .map(|&(i, eta)| eta * vector[i])
            .sum::<f64>();
        vector[self.pivot] = self.pivot_value * vector[self.pivot] + total;
    }

    /// Number of decimal digits by which this matrix can amplify the values it is applied to.
    #[must_use]
    pub fn growth(&self) -> f64 {
        let largest = self.values.iter()
            .fold(self.pivot_value.abs(), |max, &(_, v)| max.max(v.abs()));
        largest.max(1_f64).log10()
    }

    /// Whether this matrix is the identity.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.values.is_empty() && self.pivot_value == 1_f64
    }
}
