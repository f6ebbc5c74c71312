//! # Sparse vector
//!
//! Wrapping a `Vec<(usize, f64)>`, fixed size.
use std::fmt;
use std::ops::Deref;
use std::slice::Iter;

use crate::data::linear_algebra::SparseTuple;
use crate::data::linear_algebra::vector::Vector;

/// A sparse vector using a `Vec` with (index, value) combinations as back-end. Indices start at
/// `0` and are strictly increasing.
#[derive(Clone, Debug, PartialEq)]
pub struct Sparse {
    data: Vec<SparseTuple<f64>>,
    len: usize,
}

impl Sparse {
    /// Create a new instance.
    ///
    /// # Arguments
    ///
    /// * `data`: Tuples sorted by index, without explicit zeros.
    /// * `len`: Length of the vector represented.
    #[must_use]
    pub fn new(data: Vec<SparseTuple<f64>>, len: usize) -> Self {
        debug_assert!(data.windows(2).all(|w| w[0].0 < w[1].0));
        debug_assert!(data.last().map_or(true, |&(i, _)| i < len));
        debug_assert!(data.iter().all(|&(_, v)| v != 0_f64));

        Self { data, len }
    }

    /// Unit vector `e_i`.
    #[must_use]
    pub fn standard_basis_vector(i: usize, len: usize) -> Self {
        debug_assert!(i < len);

        Self::new(vec![(i, 1_f64)], len)
    }

    /// Iterate over the nonzero values.
    pub fn iter(&self) -> Iter<'_, SparseTuple<f64>> {
        self.data.iter()
    }

    /// Inner product with a dense vector.
    #[must_use]
    pub fn inner_product_with_dense(&self, dense: &[f64]) -> f64 {
        debug_assert_eq!(dense.len(), self.len);

        self.data.iter().map(|&(i, v)| v * dense[i]).sum()
    }

    /// Axpy into a dense vector: `target += factor * self`.
    pub fn add_multiple_to(&self, factor: f64, target: &mut [f64]) {
        debug_assert_eq!(target.len(), self.len);

        for &(i, v) in &self.data {
            target[i] += factor * v;
        }
    }

    /// If this is a unit vector `e_i` scaled by some value, the index and that value.
    #[must_use]
    pub fn as_singleton(&self) -> Option<SparseTuple<f64>> {
        match self.data.as_slice() {
            &[single] => Some(single),
            _ => None,
        }
    }

    /// Write the values into a dense slice, overwriting all of it.
    pub fn copy_into(&self, target: &mut [f64]) {
        debug_assert_eq!(target.len(), self.len);

        target.fill(0_f64);
        for &(i, v) in &self.data {
            target[i] = v;
        }
    }
}

impl Deref for Sparse {
    type Target = [SparseTuple<f64>];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl Vector for Sparse {
    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, index: usize) -> f64 {
        debug_assert!(index < self.len);

        self.data.binary_search_by_key(&index, |&(i, _)| i)
            .map_or(0_f64, |data_index| self.data[data_index].1)
    }
}

impl fmt::Display for Sparse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (k, (i, value)) in self.data.iter().enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({i}, {value})")?;
        }
        write!(f, "] ({})", self.len)
    }
}
