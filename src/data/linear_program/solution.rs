//! # Representation of solutions
//!
//! What the solver reports back: how it terminated, the last iterate and how much work it took.
use std::fmt;

use enum_map::{Enum, EnumMap};

/// How a solve terminated.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Status {
    /// A basic feasible solution satisfying the optimality conditions was found.
    Optimal,
    /// The sum of infeasibilities can't be reduced to zero.
    Infeasible,
    /// The objective decreases (or increases, when maximizing) without bound.
    Unbounded,
    /// The iteration limit was reached before any other status.
    IterationLimit,
    /// The cancellation flag was raised.
    Cancelled,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Status::Optimal => "optimal",
            Status::Infeasible => "infeasible",
            Status::Unbounded => "unbounded",
            Status::IterationLimit => "iteration limit reached",
            Status::Cancelled => "cancelled",
        };
        f.write_str(text)
    }
}

/// Stages of a solve in which basis changes happen.
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Minimizing the sum of infeasibilities.
    One,
    /// Restoring primal feasibility after a modification, keeping dual feasibility.
    Dual,
    /// Optimizing the objective from a feasible basis.
    Two,
}

/// Result of a solve.
///
/// The values are those of the last iterate. They describe an optimal solution only when the
/// status is [`Status::Optimal`].
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    /// How the solve terminated.
    pub status: Status,
    /// Value of the objective function, in the direction of the problem.
    pub objective_value: f64,
    /// Value of each problem variable.
    pub primal: Vec<f64>,
    /// Dual value of each constraint row: the negated simplex multipliers of the minimization
    /// problem being solved.
    pub dual: Vec<f64>,
    /// Number of basis changes and bound flips, by phase.
    pub iterations: EnumMap<Phase, usize>,
}

impl Solution {
    /// Total number of iterations over all phases.
    #[must_use]
    pub fn total_iterations(&self) -> usize {
        self.iterations.values().sum()
    }
}
