//! # Phase one
//!
//! Minimize the sum of infeasibilities of the starting basis. When that sum reaches zero, the
//! artificial variables that are still basic (at value zero) are pivoted out where possible. Those
//! that can't be pivoted out belong to redundant rows; they stay in the basis, fixed at zero.
use crate::algorithm::two_phase::{PhaseResult, SimplexSolver, SolverState};
use crate::algorithm::two_phase::store::{EnterInfo, ExitInfo, IterDescr, SimplexStore};
use crate::algorithm::two_phase::strategy::pivot_rule::PivotRule;
use crate::data::linear_program::elements::BoundSide;
use crate::data::linear_program::solution::Phase;
use crate::error::{SolverError, SolverResult};

impl<S, PR> SimplexSolver<S, PR>
where
    S: SimplexStore,
    PR: PivotRule,
{
    /// Find a feasible basis without artificial variables at a nonzero value.
    ///
    /// The artificial objective should have been set up.
    ///
    /// # Return value
    ///
    /// `Optimal` if a feasible basis was found, in which case the problem objective is active again.
    pub(super) fn phase_one<F: FnMut(&S)>(&mut self, observer: &mut F) -> SolverResult<PhaseResult> {
        debug_assert!(self.store.phase1().is_some());
        self.state = SolverState::Phase1Active;

        match self.primal(Phase::One, observer)? {
            PhaseResult::Optimal => {},
            // The sum of infeasibilities is bounded from below by zero
            PhaseResult::Unbounded => return Err(SolverError::UnboundedArtificialObjective),
            other => return Ok(other),
        }

        let infeasibility = self.store.objective_value();
        if infeasibility > self.options.tolerances.phase_one {
            debug!("phase one ended with sum of infeasibilities {infeasibility:e}");
            return Ok(PhaseResult::Infeasible);
        }

        let nr_redundant = self.remove_artificial_basis_variables()?;
        if nr_redundant > 0 {
            debug!("{nr_redundant} redundant rows keep an artificial variable in the basis");
        }
        self.store.remove_phase1();
        self.state = SolverState::Phase1Done;
        debug!("feasible basis found after {} iterations", self.iterations[Phase::One]);

        Ok(PhaseResult::Optimal)
    }

    /// Pivot basic artificial variables out of the basis with degenerate pivots.
    ///
    /// Artificial variables are tracked by column, because a refactorization may reorder the rows.
    ///
    /// # Return value
    ///
    /// The number of artificial variables that couldn't be removed.
    fn remove_artificial_basis_variables(&mut self) -> SolverResult<usize> {
        let pivot_tolerance = self.options.tolerances.pivot;
        let mut redundant = Vec::new();

        loop {
            let next = self.store.included().iter().enumerate()
                .find(|&(_, &j)| self.store.is_artificial(j) && !redundant.contains(&j))
                .map(|(row, &column)| ExitInfo { row, column });
            let Some(exit) = next else {
                break;
            };

            self.store.calculate_dual_direction(&exit);
            let candidate = self.store.excluded().iter().enumerate()
                .filter(|&(_, &j)| !self.store.is_artificial(j))
                .map(|(je, &column)| {
                    let value = self.store.dual_direction(je).abs();
                    (EnterInfo { column, excluded_index: je }, value)
                })
                .filter(|&(_, value)| value >= pivot_tolerance)
                .max_by(|(a, x), (b, y)| x.total_cmp(y).then(b.column.cmp(&a.column)));

            match candidate {
                Some((enter, _)) => {
                    self.store.calculate_primal_direction(&enter);
                    let iteration = IterDescr {
                        enter,
                        exit,
                        step: 0_f64,
                        leaving_side: BoundSide::Lower,
                    };
                    if let Err(error) = self.store.pivot(&iteration) {
                        warn!("{error} while removing artificial column {}", exit.column);
                        self.store.refactorize().map_err(|_| SolverError::SingularBasis)?;
                        redundant.push(exit.column);
                    }
                },
                None => redundant.push(exit.column),
            }
        }

        Ok(redundant.len())
    }
}
