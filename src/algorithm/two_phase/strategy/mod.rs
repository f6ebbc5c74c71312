//! # Strategies
//!
//! Decisions that don't influence correctness, only the path taken to the optimum.
pub mod pivot_rule;
