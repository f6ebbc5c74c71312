//! # Storing of linear programs in memory
//!
//! The vectors and column major matrices used throughout the crate, and the validated description
//! of a bounded linear program that the solver consumes. State that only exists during a solve,
//! like the basis partition, lives under `algorithm::two_phase`.

pub mod linear_program;
pub mod linear_algebra;
