//! # Algorithms
//!
//! The bounded two phase revised simplex method, together with the dual simplex pass used for
//! re-optimization.
pub mod two_phase;
