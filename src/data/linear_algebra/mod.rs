//! # Linear algebra primitives
//!
//! Only the operations needed by the simplex method: sparse columns with an inner product against
//! dense vectors, axpy and scaling.
pub mod matrix;
pub mod vector;

/// Index and value of a nonzero entry of a sparse vector.
pub type SparseTuple<F> = (usize, F);
