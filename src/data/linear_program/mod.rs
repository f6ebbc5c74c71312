//! # Representing linear programs
//!
//! A linear program is given as `A x = b` with bounded variables. Its shape and bounds are kept in
//! a [`LinearStructure`](structure::LinearStructure), the numeric data in a
//! [`LinearProgram`](program::LinearProgram).
pub mod elements;
pub mod program;
pub mod solution;
pub mod structure;
