//! # Dual simplex iterations
//!
//! Used after bounds changed on a basis that is still dual feasible: the most infeasible basic
//! variable leaves at the bound it violates, and the entering column is chosen such that all
//! reduced costs keep their sign.
use crate::algorithm::two_phase::{PhaseResult, SimplexSolver};
use crate::algorithm::two_phase::store::{EnterInfo, ExitInfo, IterDescr, SimplexStore};
use crate::algorithm::two_phase::strategy::pivot_rule::{PivotRule, violation};
use crate::algorithm::two_phase::tolerances::Tolerances;
use crate::data::linear_program::elements::BoundSide;
use crate::data::linear_program::solution::Phase;
use crate::error::{SolverError, SolverResult};

/// Whether no excluded column could improve the objective.
///
/// Reduced costs should be current.
pub(crate) fn is_dual_feasible<S: SimplexStore>(store: &S, tolerance: f64) -> bool {
    (0..store.excluded().len()).all(|je| violation(store, je, tolerance).is_none())
}

/// Select the column entering in place of the basic variable with the given infeasibility.
///
/// The dual direction of the leaving row and the reduced costs should be current.
///
/// # Arguments
///
/// * `infeasibility`: Negative if the leaving variable is below its lower bound, positive if above
/// its upper bound.
/// * `rejected`: Positions among the excluded columns that may not be selected.
///
/// # Return value
///
/// The eligible column with the smallest ratio of reduced cost to dual direction, ties going to the
/// lowest column index. `None` if no column can move the leaving variable towards its bound, which
/// proves infeasibility.
pub(crate) fn dual_ratio_test<S: SimplexStore>(
    store: &S,
    infeasibility: f64,
    rejected: &[usize],
    tolerances: &Tolerances,
) -> Option<EnterInfo> {
    store.excluded().iter().enumerate()
        .filter(|(je, _)| !rejected.contains(je))
        .filter(|&(_, &j)| !store.is_fixed(j))
        .filter_map(|(je, &column)| {
            let direction = store.dual_direction(je);
            if direction.abs() < tolerances.pivot {
                return None;
            }

            let same_sign = (direction < 0_f64) == (infeasibility < 0_f64);
            let eligible = match store.bound_side(column) {
                BoundSide::Lower => same_sign,
                BoundSide::Upper => !same_sign,
                BoundSide::Free => true,
            };
            eligible.then(|| {
                let ratio = store.get_reduced_cost(je).abs() / direction.abs();
                (EnterInfo { column, excluded_index: je }, ratio)
            })
        })
        .min_by(|(a, x), (b, y)| x.total_cmp(y).then(a.column.cmp(&b.column)))
        .map(|(enter, _)| enter)
}

impl<S, PR> SimplexSolver<S, PR>
where
    S: SimplexStore,
    PR: PivotRule,
{
    /// Iterate until the basis is primal feasible, keeping it dual feasible.
    ///
    /// # Return value
    ///
    /// `Optimal` once the basis is primal feasible, `Infeasible` if a row proves that the bounds
    /// can't be satisfied.
    pub(super) fn dual<F: FnMut(&S)>(&mut self, observer: &mut F) -> SolverResult<PhaseResult> {
        let tolerances = self.options.tolerances;
        let mut rejected = Vec::new();

        loop {
            if let Some(status) = self.interrupted() {
                return Ok(PhaseResult::Interrupted(status));
            }

            self.store.calculate_iteration();
            let leaving = (0..self.store.nr_rows())
                .map(|i| (i, self.store.get_infeasibility(i)))
                .filter(|&(_, infeasibility)| infeasibility != 0_f64)
                .max_by(|(i, x), (k, y)| x.abs().total_cmp(&y.abs()).then(k.cmp(i)));
            let Some((row, infeasibility)) = leaving else {
                debug!("dual simplex restored feasibility after {} iterations", self.iterations[Phase::Dual]);
                return Ok(PhaseResult::Optimal);
            };

            let exit = ExitInfo { row, column: self.store.included()[row] };
            self.store.calculate_dual_direction(&exit);
            let Some(enter) = dual_ratio_test(&self.store, infeasibility, &rejected, &tolerances) else {
                if !rejected.is_empty() {
                    warn!("all entering columns for row {row} were rejected as numerically unsafe");
                    return Err(SolverError::SingularBasis);
                }
                debug!("row {row} can't be made feasible, problem is infeasible");
                return Ok(PhaseResult::Infeasible);
            };

            self.store.calculate_primal_direction(&enter);
            let iteration = IterDescr {
                enter,
                exit,
                step: infeasibility / self.store.primal_direction(row),
                leaving_side: if infeasibility < 0_f64 { BoundSide::Lower } else { BoundSide::Upper },
            };
            if let Err(error) = self.store.pivot(&iteration) {
                warn!("{error} for entering column {}, refactorizing", enter.column);
                self.store.refactorize().map_err(|_| SolverError::SingularBasis)?;
                rejected.push(enter.excluded_index);
                continue;
            }
            rejected.clear();

            self.count_iteration(Phase::Dual);
            observer(&self.store);
        }
    }
}
