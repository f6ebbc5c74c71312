//! # Dense vector
//!
//! Wrapping a `Vec` such that it has a fixed size and can interact with sparse vectors.
use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::data::linear_algebra::vector::Vector;

/// Uses a `Vec` as underlying data a structure. Length is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Dense {
    data: Vec<f64>,
}

impl Dense {
    /// Create a new instance from its values.
    #[must_use]
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    /// Create a vector with all values being equal to a given value.
    ///
    /// # Arguments
    ///
    /// * `value`: The value which all elements of this vector are equal to.
    /// * `len`: Length of the vector, number of elements.
    #[must_use]
    pub fn constant(value: f64, len: usize) -> Self {
        Self { data: vec![value; len] }
    }

    /// A vector of zeros.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self::constant(0_f64, len)
    }

    /// Add a multiple of another vector, `self += factor * other`.
    pub fn add_multiple(&mut self, factor: f64, other: &[f64]) {
        debug_assert_eq!(other.len(), self.len());

        for (value, &x) in self.data.iter_mut().zip(other) {
            *value += factor * x;
        }
    }

    /// Multiply all values by a constant.
    pub fn scale(&mut self, factor: f64) {
        for value in &mut self.data {
            *value *= factor;
        }
    }

    /// Inner product with another dense vector.
    #[must_use]
    pub fn inner_product(&self, other: &[f64]) -> f64 {
        debug_assert_eq!(other.len(), self.len());

        self.data.iter().zip(other).map(|(a, b)| a * b).sum()
    }
}

impl Deref for Dense {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl DerefMut for Dense {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

impl From<Vec<f64>> for Dense {
    fn from(data: Vec<f64>) -> Self {
        Self::new(data)
    }
}

impl Vector for Dense {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn get(&self, index: usize) -> f64 {
        debug_assert!(index < self.len());

        self.data[index]
    }
}

impl fmt::Display for Dense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}
