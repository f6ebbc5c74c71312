//! # Solver configuration
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::algorithm::two_phase::inverse_maintenance::RefactorizationPolicy;
use crate::algorithm::two_phase::tolerances::Tolerances;

/// Default maximum number of iterations over all phases of a solve.
pub const DEFAULT_ITERATION_LIMIT: usize = 10_000;
/// Default number of consecutive degenerate iterations after which Bland's rule is used.
pub const DEFAULT_DEGENERATE_LIMIT: usize = 50;

/// Settings of a solver instance.
#[derive(Clone, Debug)]
pub struct SolverOptions {
    /// Maximum number of iterations of a single solve, over all phases.
    pub iteration_limit: usize,
    /// Number of consecutive iterations without progress after which the pivot rule is replaced by
    /// Bland's rule, until progress is made again.
    pub degenerate_limit: usize,
    /// Numerical tolerances.
    pub tolerances: Tolerances,
    /// When to refactorize the basis inverse.
    pub refactorization: RefactorizationPolicy,
    /// Raised by another thread to stop the solve at the next iteration boundary.
    pub cancellation: Option<Arc<AtomicBool>>,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            iteration_limit: DEFAULT_ITERATION_LIMIT,
            degenerate_limit: DEFAULT_DEGENERATE_LIMIT,
            tolerances: Tolerances::default(),
            refactorization: RefactorizationPolicy::default(),
            cancellation: None,
        }
    }
}

impl SolverOptions {
    /// Replace the iteration limit.
    #[must_use]
    pub fn with_iteration_limit(mut self, iteration_limit: usize) -> Self {
        self.iteration_limit = iteration_limit;
        self
    }

    /// Replace the degenerate iteration limit.
    #[must_use]
    pub fn with_degenerate_limit(mut self, degenerate_limit: usize) -> Self {
        self.degenerate_limit = degenerate_limit;
        self
    }

    /// Replace the tolerances.
    #[must_use]
    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Replace the refactorization policy.
    #[must_use]
    pub fn with_refactorization(mut self, refactorization: RefactorizationPolicy) -> Self {
        self.refactorization = refactorization;
        self
    }

    /// Use a flag for cooperative cancellation.
    #[must_use]
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancellation = Some(flag);
        self
    }

    /// Whether the cancellation flag was raised.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
