//! # Pivot rules
//!
//! Strategies for selecting the column that enters the basis.
use crate::algorithm::two_phase::store::{EnterInfo, SimplexStore};
use crate::data::linear_program::elements::BoundSide;

/// Deciding how to pivot.
///
/// During the Simplex method, one needs to decide how to move from basic solution to basic
/// solution. The pivot rule describes that behavior.
///
/// Once the column has been selected for a primal pivot, a row needs to be found. This decision is
/// made independent of the strategy.
pub trait PivotRule {
    /// Create a new instance.
    fn new() -> Self;

    /// Column selection rule for the primal Simplex method.
    ///
    /// Reduced costs of the store should be current.
    ///
    /// # Arguments
    ///
    /// * `store`: Store to select from.
    /// * `rejected`: Positions among the excluded columns that may not be selected.
    /// * `tolerance`: Reduced costs smaller than this in absolute value are zero.
    ///
    /// # Return value
    ///
    /// A column with a reduced cost of the wrong sign for its bound side, or `None` if there is
    /// none and the basis is optimal.
    fn select_primal_pivot_column<S: SimplexStore>(
        &mut self,
        store: &S,
        rejected: &[usize],
        tolerance: f64,
    ) -> Option<EnterInfo>;
}

/// By how much the reduced cost of an excluded column violates the optimality conditions.
///
/// # Arguments
///
/// * `je`: Position among the excluded columns.
///
/// # Return value
///
/// The (positive) violation, or `None` if increasing or decreasing the column doesn't improve the
/// objective. Fixed columns never violate.
pub fn violation<S: SimplexStore>(store: &S, je: usize, tolerance: f64) -> Option<f64> {
    let j = store.excluded()[je];
    if store.is_fixed(j) {
        return None;
    }

    let cost = store.get_reduced_cost(je);
    match store.bound_side(j) {
        BoundSide::Lower if cost < -tolerance => Some(-cost),
        BoundSide::Upper if cost > tolerance => Some(cost),
        BoundSide::Free if cost.abs() > tolerance => Some(cost.abs()),
        _ => None,
    }
}

fn candidates<'a, S: SimplexStore>(
    store: &'a S,
    rejected: &'a [usize],
    tolerance: f64,
) -> impl Iterator<Item = (EnterInfo, f64)> + 'a {
    store.excluded().iter().enumerate()
        .filter(move |(je, _)| !rejected.contains(je))
        .filter_map(move |(je, &column)| {
            violation(store, je, tolerance)
                .map(|value| (EnterInfo { column, excluded_index: je }, value))
        })
}

/// Select the column with the largest violation, ties are broken by the lowest column index.
pub struct Dantzig;
impl PivotRule for Dantzig {
    fn new() -> Self {
        Self
    }

    fn select_primal_pivot_column<S: SimplexStore>(
        &mut self,
        store: &S,
        rejected: &[usize],
        tolerance: f64,
    ) -> Option<EnterInfo> {
        candidates(store, rejected, tolerance)
            .max_by(|(a, x), (b, y)| x.total_cmp(y).then(b.column.cmp(&a.column)))
            .map(|(enter, _)| enter)
    }
}

/// Select the improving column with the lowest index.
///
/// Together with choosing the leaving variable with the lowest index in case of ties, this rule
/// doesn't cycle.
pub struct Bland;
impl PivotRule for Bland {
    fn new() -> Self {
        Self
    }

    fn select_primal_pivot_column<S: SimplexStore>(
        &mut self,
        store: &S,
        rejected: &[usize],
        tolerance: f64,
    ) -> Option<EnterInfo> {
        candidates(store, rejected, tolerance)
            .min_by_key(|(enter, _)| enter.column)
            .map(|(enter, _)| enter)
    }
}
