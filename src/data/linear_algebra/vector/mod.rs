//! # Vector types for linear programs
//!
//! Sparse and dense vectors of `f64` values. These were written by hand, because a specific small
//! set of operations needs to be done quickly with these types.
pub use dense::Dense as DenseVector;
pub use sparse::Sparse as SparseVector;

mod dense;
mod sparse;

/// Operations shared by the dense and sparse representations.
pub trait Vector {
    /// Number of items represented by the vector.
    fn len(&self) -> usize;
    /// Whether the vector represents zero items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Value at an index, zero if not stored.
    fn get(&self, index: usize) -> f64;
}
