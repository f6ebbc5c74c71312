//! # The two phase bounded simplex method
//!
//! The first phase minimizes the sum of infeasibilities of a starting basis built from identity
//! columns and artificial variables. The second phase optimizes the objective from the feasible
//! basis found.
//!
//! A solver can be reused after changing bounds or costs. The next solve then starts from the last
//! basis: directly with the second phase if that basis is still feasible, with a dual simplex pass
//! if it is still dual feasible, and from scratch otherwise.
use std::marker::PhantomData;

use enum_map::EnumMap;

use crate::algorithm::two_phase::options::SolverOptions;
use crate::algorithm::two_phase::store::revised::RevisedStore;
use crate::algorithm::two_phase::store::SimplexStore;
use crate::algorithm::two_phase::strategy::pivot_rule::{Dantzig, PivotRule};
use crate::data::linear_program::program::LinearProgram;
use crate::data::linear_program::solution::{Phase, Solution, Status};
use crate::error::{SolverError, SolverResult};

pub mod inverse_maintenance;
pub mod options;
pub mod store;
pub mod strategy;
pub mod tolerances;

mod dual;
mod phase_one;
mod phase_two;


/// Where a solver is in its life cycle.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SolverState {
    /// Nothing was solved yet.
    Uninitialized,
    /// Minimizing the sum of infeasibilities.
    Phase1Active,
    /// A feasible basis was found and the artificial objective was removed.
    Phase1Done,
    /// Restoring feasibility of a modified problem with the dual simplex method.
    DualActive,
    /// Optimizing the objective from a feasible basis.
    Phase2Active,
    /// The last solve ended with this status.
    Terminated(Status),
    /// Bounds or costs were changed after the last solve.
    Modified,
}

/// How a single phase ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum PhaseResult {
    /// No improving column remains (or, for the dual pass, no infeasible row remains).
    Optimal,
    /// The phase found the problem to be infeasible.
    Infeasible,
    /// An improving direction without blocking bound was found.
    Unbounded,
    /// Cancelled or out of iterations.
    Interrupted(Status),
}

impl PhaseResult {
    fn into_status(self) -> Status {
        match self {
            PhaseResult::Optimal => Status::Optimal,
            PhaseResult::Infeasible => Status::Infeasible,
            PhaseResult::Unbounded => Status::Unbounded,
            PhaseResult::Interrupted(status) => status,
        }
    }
}

/// Drives a store through the phases of the simplex method.
///
/// Generic over the store and over the rule selecting the entering column.
#[derive(Debug)]
pub struct SimplexSolver<S, PR = Dantzig> {
    store: S,
    options: SolverOptions,
    state: SolverState,
    /// Whether the basis in the store has no artificial variables and can be reused.
    warm_basis: bool,
    iterations: EnumMap<Phase, usize>,

    phantom_rule: PhantomData<PR>,
}

impl SimplexSolver<RevisedStore> {
    /// Create a solver with the default store, inverse maintenance and pivot rule.
    #[must_use]
    pub fn new(program: LinearProgram, options: SolverOptions) -> Self {
        let store = RevisedStore::new(program, options.tolerances, options.refactorization);
        Self::with_store(store, options)
    }
}

impl<S, PR> SimplexSolver<S, PR>
where
    S: SimplexStore,
    PR: PivotRule,
{
    /// Create a solver around any store.
    #[must_use]
    pub fn with_store(store: S, options: SolverOptions) -> Self {
        Self {
            store,
            options,
            state: SolverState::Uninitialized,
            warm_basis: false,
            iterations: EnumMap::default(),

            phantom_rule: PhantomData,
        }
    }

    /// Solve the problem, starting from the last basis if there is a usable one.
    pub fn solve(&mut self) -> SolverResult<Solution> {
        self.solve_observed(|_| {})
    }

    /// Solve the problem, calling `observer` after every basis change or bound flip.
    pub fn solve_observed<F: FnMut(&S)>(&mut self, mut observer: F) -> SolverResult<Solution> {
        self.iterations = EnumMap::default();

        let status = if self.warm_basis {
            self.warm_start(&mut observer)?
        } else {
            self.cold_start(&mut observer)?
        };
        self.state = SolverState::Terminated(status);

        debug!(
            "solve terminated: {status} after {} iterations ({} phase one, {} dual, {} phase two)",
            self.total_iterations(),
            self.iterations[Phase::One], self.iterations[Phase::Dual], self.iterations[Phase::Two],
        );

        Ok(Solution {
            status,
            objective_value: self.store.extract_value(),
            primal: self.store.extract_solution(),
            dual: self.store.dual_values(),
            iterations: self.iterations,
        })
    }

    /// Replace the bounds of a problem variable.
    ///
    /// The next solve starts from the current basis.
    pub fn set_bounds(&mut self, j: usize, lower: f64, upper: f64) -> SolverResult<()> {
        self.store.set_bounds(j, lower, upper)?;
        self.state = SolverState::Modified;
        Ok(())
    }

    /// Replace the cost of a problem variable.
    ///
    /// The next solve starts from the current basis.
    pub fn set_cost(&mut self, j: usize, cost: f64) -> SolverResult<()> {
        self.store.set_cost(j, cost)?;
        self.state = SolverState::Modified;
        Ok(())
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SolverState {
        self.state
    }

    /// The store being driven.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Settings in use.
    #[must_use]
    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    fn cold_start<F: FnMut(&S)>(&mut self, observer: &mut F) -> SolverResult<Status> {
        self.warm_basis = false;

        let nr_artificial = self.store.setup_classic_phase1_objective()
            .map_err(|_| SolverError::SingularBasis)?;
        if nr_artificial > 0 {
            match self.phase_one(observer)? {
                PhaseResult::Optimal => {},
                other => return Ok(other.into_status()),
            }
        } else {
            self.store.remove_phase1();
            self.state = SolverState::Phase1Done;
        }

        self.phase_two(observer)
    }

    fn warm_start<F: FnMut(&S)>(&mut self, observer: &mut F) -> SolverResult<Status> {
        self.store.calculate_iteration();

        let primal_feasible = (0..self.store.nr_rows())
            .all(|i| self.store.get_infeasibility(i) == 0_f64);
        if primal_feasible {
            debug!("warm start from a primal feasible basis");
            return self.phase_two(observer);
        }

        if dual::is_dual_feasible(&self.store, self.options.tolerances.optimality) {
            debug!("warm start from a dual feasible basis");
            self.state = SolverState::DualActive;
            match self.dual(observer)? {
                PhaseResult::Optimal => self.phase_two(observer),
                other => Ok(other.into_status()),
            }
        } else {
            debug!("basis is neither primal nor dual feasible, starting from scratch");
            self.cold_start(observer)
        }
    }

    fn phase_two<F: FnMut(&S)>(&mut self, observer: &mut F) -> SolverResult<Status> {
        self.state = SolverState::Phase2Active;
        self.warm_basis = true;

        self.primal(Phase::Two, observer).map(PhaseResult::into_status)
    }

    /// Whether the solve should stop before the next iteration, and with which status.
    fn interrupted(&self) -> Option<Status> {
        if self.options.is_cancelled() {
            Some(Status::Cancelled)
        } else if self.total_iterations() >= self.options.iteration_limit {
            Some(Status::IterationLimit)
        } else {
            None
        }
    }

    fn total_iterations(&self) -> usize {
        self.iterations.values().sum()
    }

    fn count_iteration(&mut self, phase: Phase) {
        self.iterations[phase] += 1;

        let total = self.total_iterations();
        if total % 100 == 0 {
            debug!(
                "{phase:?} iteration {total}: objective value {:e}",
                self.store.objective_value(),
            );
        }
    }
}
