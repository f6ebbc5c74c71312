//! # Primal simplex iterations
//!
//! The loop shared by both phases: select an entering column, do a ratio test over the basic
//! variables and the opposite bound of the entering column, and either pivot or flip.
use crate::algorithm::two_phase::{PhaseResult, SimplexSolver};
use crate::algorithm::two_phase::store::{EnterInfo, ExitInfo, IterDescr, SimplexStore};
use crate::algorithm::two_phase::strategy::pivot_rule::{Bland, PivotRule};
use crate::algorithm::two_phase::tolerances::Tolerances;
use crate::data::linear_program::elements::BoundSide;
use crate::data::linear_program::solution::Phase;
use crate::error::{SolverError, SolverResult};

/// Outcome of the primal ratio test.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum PrimalStep {
    /// A basic variable reaches a bound first.
    Pivot(IterDescr),
    /// The entering column reaches its opposite bound first.
    Flip,
    /// Nothing limits the step.
    Unbounded,
}

impl<S, PR> SimplexSolver<S, PR>
where
    S: SimplexStore,
    PR: PivotRule,
{
    /// Iterate with the active objective until no column improves it.
    pub(super) fn primal<F: FnMut(&S)>(
        &mut self,
        phase: Phase,
        observer: &mut F,
    ) -> SolverResult<PhaseResult> {
        let tolerances = self.options.tolerances;
        let mut rule = PR::new();
        let mut fallback = Bland::new();
        let mut rejected = Vec::new();
        let mut nr_degenerate = 0;

        loop {
            if let Some(status) = self.interrupted() {
                return Ok(PhaseResult::Interrupted(status));
            }

            self.store.calculate_iteration();
            let enter = if nr_degenerate >= self.options.degenerate_limit {
                fallback.select_primal_pivot_column(&self.store, &rejected, tolerances.optimality)
            } else {
                rule.select_primal_pivot_column(&self.store, &rejected, tolerances.optimality)
            };
            let Some(enter) = enter else {
                if !rejected.is_empty() {
                    warn!("all improving columns were rejected as numerically unsafe");
                    return Err(SolverError::SingularBasis);
                }
                return Ok(PhaseResult::Optimal);
            };

            self.store.calculate_primal_direction(&enter);
            match primal_ratio_test(&self.store, &enter, &tolerances) {
                PrimalStep::Unbounded => return Ok(PhaseResult::Unbounded),
                PrimalStep::Flip => {
                    trace!("column {} flips to its opposite bound", enter.column);
                    self.store.flip(enter.excluded_index);
                    nr_degenerate = 0;
                },
                PrimalStep::Pivot(iteration) => {
                    if let Err(error) = self.store.pivot(&iteration) {
                        warn!("{error} for entering column {}, refactorizing", enter.column);
                        self.store.refactorize().map_err(|_| SolverError::SingularBasis)?;
                        rejected.push(enter.excluded_index);
                        continue;
                    }

                    if iteration.step.abs() <= tolerances.feasibility {
                        nr_degenerate += 1;
                        if nr_degenerate == self.options.degenerate_limit {
                            debug!("{nr_degenerate} degenerate iterations, using Bland's rule");
                        }
                    } else {
                        nr_degenerate = 0;
                    }
                },
            }
            rejected.clear();

            self.count_iteration(phase);
            observer(&self.store);
        }
    }
}

/// Find how far the entering column can move before a basic variable hits a bound.
///
/// The primal direction of the entering column and the reduced costs should be current. Ties
/// between basic variables go to the lowest column index. The entering column flips to its other
/// bound if that bound is reached no later than any basic variable's bound.
pub(crate) fn primal_ratio_test<S: SimplexStore>(
    store: &S,
    enter: &EnterInfo,
    tolerances: &Tolerances,
) -> PrimalStep {
    let j = enter.column;
    let increasing = match store.bound_side(j) {
        BoundSide::Lower => true,
        BoundSide::Upper => false,
        BoundSide::Free => store.get_reduced_cost(enter.excluded_index) < 0_f64,
    };
    let sign = if increasing { 1_f64 } else { -1_f64 };

    // Distance the entering column can move before the basic variable at row `i` is blocked, and
    // the bound that blocks it.
    let blocking = |i: usize| -> Option<(f64, BoundSide)> {
        let direction = store.primal_direction(i);
        if direction.abs() < tolerances.pivot {
            return None;
        }

        let rate = -sign * direction;
        let basic = store.included()[i];
        let (bound, side) = if rate < 0_f64 {
            (store.lower_bound(basic), BoundSide::Lower)
        } else {
            (store.upper_bound(basic), BoundSide::Upper)
        };
        if !bound.is_finite() {
            return None;
        }

        let ratio = ((store.current_rhs(i) - bound) / -rate).max(0_f64);
        Some((ratio, side))
    };

    let min_ratio = (0..store.nr_rows())
        .filter_map(blocking)
        .map(|(ratio, _)| ratio)
        .fold(f64::INFINITY, f64::min);

    let range = store.upper_bound(j) - store.lower_bound(j);
    if range.is_finite() && range <= min_ratio + tolerances.ratio {
        return PrimalStep::Flip;
    }

    let leaving = (0..store.nr_rows())
        .filter_map(|i| blocking(i).map(|(ratio, side)| (i, ratio, side)))
        .filter(|&(_, ratio, _)| ratio <= min_ratio + tolerances.ratio)
        .min_by_key(|&(i, _, _)| store.included()[i]);

    match leaving {
        Some((row, _, leaving_side)) => PrimalStep::Pivot(IterDescr {
            enter: *enter,
            exit: ExitInfo { row, column: store.included()[row] },
            step: sign * min_ratio,
            leaving_side,
        }),
        None => PrimalStep::Unbounded,
    }
}
