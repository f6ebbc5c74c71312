//! # A revised simplex engine for bounded linear programs
//!
//! Linear programs of the form `min c^T x s.t. A x = b, l <= x <= u` are solved with a two phase,
//! bounded primal simplex method. The basis inverse is never formed explicitly; it is maintained as
//! a product of elementary matrices which is refactorized once it accumulates too much numerical
//! growth.
//!
//! After a solve, bounds and costs can be modified and the problem can be re-optimized starting
//! from the last basis, using a dual simplex pass when the modification broke primal feasibility.
#![warn(missing_docs)]

#[macro_use]
extern crate log;

pub mod algorithm;
pub mod data;
pub mod error;

#[cfg(test)]
mod tests;
