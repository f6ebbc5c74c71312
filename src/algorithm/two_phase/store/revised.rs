//! # Revised store
//!
//! Concrete store holding the sparse columns, the right hand side and the objective, together with
//! the state vectors of the revised simplex method. All of those vectors are allocated once and
//! reused in every iteration.
use itertools::repeat_n;

use crate::algorithm::two_phase::inverse_maintenance::{InverseMaintenance, RefactorizationPolicy};
use crate::algorithm::two_phase::inverse_maintenance::product_form::ProductFormInverse;
use crate::algorithm::two_phase::store::{EnterInfo, ExitInfo, IterDescr, ObjectiveState, SimplexStore};
use crate::algorithm::two_phase::store::partition::{Partition, Position};
use crate::algorithm::two_phase::tolerances::Tolerances;
use crate::data::linear_algebra::matrix::ColumnMajor;
use crate::data::linear_algebra::vector::DenseVector;
use crate::data::linear_program::elements::{BoundSide, Direction};
use crate::data::linear_program::program::LinearProgram;
use crate::data::linear_program::structure::LinearStructure;
use crate::error::{InvalidInput, NumericalError};

/// Store of the revised simplex method, generic over the way the basis inverse is maintained.
#[derive(Clone, Debug)]
pub struct RevisedStore<IM = ProductFormInverse> {
    structure: LinearStructure,
    /// Problem columns followed by the artificial unit columns.
    constraints: ColumnMajor,
    rhs: DenseVector,
    /// Right hand side minus the contribution of the non basic columns at their bounds.
    shifted_rhs: DenseVector,
    /// Costs of the equivalent minimization problem, zero for the artificial columns.
    objective: DenseVector,
    direction: Direction,
    objective_state: ObjectiveState,
    lower: Vec<f64>,
    upper: Vec<f64>,

    partition: Partition,
    inverse: IM,
    tolerances: Tolerances,

    /// Values of the basic variables.
    x: DenseVector,
    /// Primal direction of the entering column.
    y: DenseVector,
    /// Row of the basis inverse of the leaving variable.
    z: DenseVector,
    /// Simplex multipliers.
    l: DenseVector,
    /// Reduced costs of the excluded columns.
    d: DenseVector,
    /// Dual direction over the excluded columns.
    a: DenseVector,
    /// Inner products of the excluded columns with the simplex multipliers.
    r: DenseVector,
    /// Costs of the basic columns.
    basic_costs: DenseVector,
}

impl<IM: InverseMaintenance> RevisedStore<IM> {
    /// Create a new instance with the artificial columns as the basis.
    ///
    /// # Arguments
    ///
    /// * `program`: A validated linear program.
    /// * `tolerances`: Used for feasibility checks and by the inverse maintenance.
    /// * `policy`: When the inverse should be refactorized.
    #[must_use]
    pub fn new(program: LinearProgram, tolerances: Tolerances, policy: RefactorizationPolicy) -> Self {
        let (structure, mut constraints, rhs, user_objective, direction) = program.into_parts();
        let m = structure.nr_rows();
        let n = structure.nr_columns();

        constraints.extend_with_identity();

        let mut objective = DenseVector::zeros(n + m);
        for (j, &cost) in user_objective.iter().enumerate() {
            objective[j] = direction.sign() * cost;
        }

        let lower = (0..n).map(|j| structure.lower_bound(j))
            .chain(repeat_n(0_f64, m))
            .collect::<Vec<_>>();
        let upper = (0..n).map(|j| structure.upper_bound(j))
            .chain(repeat_n(0_f64, m))
            .collect::<Vec<_>>();
        let side = lower.iter().zip(&upper)
            .map(|(&l, &u)| BoundSide::initial(l, u))
            .collect();
        let basis = (0..m).map(|i| structure.artificial_column(i)).collect();

        let mut store = Self {
            structure,
            constraints,
            shifted_rhs: rhs.clone(),
            rhs,
            objective,
            direction,
            objective_state: ObjectiveState::NoPhase1,
            lower,
            upper,

            partition: Partition::new(basis, side),
            inverse: IM::new(m, policy, tolerances),
            tolerances,

            x: DenseVector::zeros(m),
            y: DenseVector::zeros(m),
            z: DenseVector::zeros(m),
            l: DenseVector::zeros(m),
            d: DenseVector::zeros(n),
            a: DenseVector::zeros(n),
            r: DenseVector::zeros(n),
            basic_costs: DenseVector::zeros(m),
        };
        store.recompute_shifted_rhs();
        store.solve_basic_values();

        store
    }

    /// Representation of the basis inverse.
    #[must_use]
    pub fn inverse(&self) -> &IM {
        &self.inverse
    }

    /// Constraint matrix including the artificial columns.
    #[must_use]
    pub fn constraints(&self) -> &ColumnMajor {
        &self.constraints
    }

    /// Tolerances in use.
    #[must_use]
    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    fn nonbasic_value(&self, j: usize) -> f64 {
        self.partition.side(j).value(self.lower[j], self.upper[j])
    }

    fn active_cost(&self, j: usize) -> f64 {
        match &self.objective_state {
            ObjectiveState::NoPhase1 => self.objective[j],
            ObjectiveState::Phase1Active(costs) => costs[j],
        }
    }

    /// Compute `b - N x_N` from scratch.
    fn recompute_shifted_rhs(&mut self) {
        self.shifted_rhs.copy_from_slice(&self.rhs);
        for &j in self.partition.excluded() {
            let value = self.partition.side(j).value(self.lower[j], self.upper[j]);
            if value != 0_f64 {
                self.constraints.column(j).add_multiple_to(-value, &mut self.shifted_rhs);
            }
        }
    }

    fn solve_basic_values(&mut self) {
        self.inverse.ftran(&self.shifted_rhs, &mut self.x);
    }

    fn debug_assert_consistent(&self) {
        debug_assert!(self.partition.is_valid(self.nr_rows()));
        debug_assert!(self.partition.excluded().iter().all(|&j| {
            self.partition.side(j).is_valid_for(self.lower[j], self.upper[j])
        }));
    }
}

impl<IM: InverseMaintenance> SimplexStore for RevisedStore<IM> {
    fn structure(&self) -> &LinearStructure {
        &self.structure
    }

    fn included(&self) -> &[usize] {
        self.partition.included()
    }

    fn excluded(&self) -> &[usize] {
        self.partition.excluded()
    }

    fn position(&self, j: usize) -> Position {
        self.partition.position(j)
    }

    fn lower_bound(&self, j: usize) -> f64 {
        self.lower[j]
    }

    fn upper_bound(&self, j: usize) -> f64 {
        self.upper[j]
    }

    fn bound_side(&self, j: usize) -> BoundSide {
        self.partition.side(j)
    }

    fn set_bound_side(&mut self, j: usize, side: BoundSide) {
        debug_assert!(side.is_valid_for(self.lower[j], self.upper[j]));

        self.partition.set_side(j, side);
    }

    fn set_bounds(&mut self, j: usize, lower: f64, upper: f64) -> Result<(), InvalidInput> {
        self.structure.set_bounds(j, lower, upper)?;

        match self.partition.position(j) {
            Position::Included(_) => {
                self.lower[j] = lower;
                self.upper[j] = upper;
            },
            Position::Excluded(_) => {
                let old_value = self.nonbasic_value(j);
                self.lower[j] = lower;
                self.upper[j] = upper;

                let side = self.partition.side(j);
                if !side.is_valid_for(lower, upper) {
                    self.partition.set_side(j, BoundSide::initial(lower, upper));
                }
                let shift = self.nonbasic_value(j) - old_value;
                if shift != 0_f64 {
                    self.shift_column(j, shift);
                }
            },
        }

        Ok(())
    }

    fn set_cost(&mut self, j: usize, cost: f64) -> Result<(), InvalidInput> {
        let n = self.structure.nr_columns();
        if j >= n {
            return Err(InvalidInput::DimensionMismatch { what: "columns", expected: n, actual: j + 1 });
        }
        if !cost.is_finite() {
            return Err(InvalidInput::NonFiniteValue { what: "cost", index: j });
        }

        self.objective[j] = self.direction.sign() * cost;
        Ok(())
    }

    fn calculate_iteration(&mut self) {
        for (i, &j) in self.partition.included().iter().enumerate() {
            self.basic_costs[i] = self.active_cost(j);
        }
        self.inverse.btran(&self.basic_costs, &mut self.l);

        for (je, &j) in self.partition.excluded().iter().enumerate() {
            self.r[je] = self.constraints.column(j).inner_product_with_dense(&self.l);
            self.d[je] = self.active_cost(j) - self.r[je];
        }

        self.solve_basic_values();
    }

    fn calculate_primal_direction(&mut self, enter: &EnterInfo) {
        debug_assert_eq!(self.partition.excluded()[enter.excluded_index], enter.column);

        self.inverse.ftran_column(self.constraints.column(enter.column), &mut self.y);
    }

    fn calculate_dual_direction(&mut self, exit: &ExitInfo) {
        debug_assert_eq!(self.partition.included()[exit.row], exit.column);

        self.inverse.btran_unit(exit.row, &mut self.z);

        for (je, &j) in self.partition.excluded().iter().enumerate() {
            self.a[je] = self.constraints.column(j).inner_product_with_dense(&self.z);
        }
    }

    fn primal_direction(&self, i: usize) -> f64 {
        self.y[i]
    }

    fn dual_direction(&self, je: usize) -> f64 {
        self.a[je]
    }

    fn current_rhs(&self, i: usize) -> f64 {
        self.x[i]
    }

    fn get_infeasibility(&self, i: usize) -> f64 {
        let j = self.partition.included()[i];
        let value = self.x[i];

        if value < self.lower[j] - self.tolerances.feasibility {
            value - self.lower[j]
        } else if value > self.upper[j] + self.tolerances.feasibility {
            value - self.upper[j]
        } else {
            0_f64
        }
    }

    fn get_reduced_cost(&self, je: usize) -> f64 {
        self.d[je]
    }

    fn pivot(&mut self, iteration: &IterDescr) -> Result<(), NumericalError> {
        let IterDescr { enter, exit, step, leaving_side } = *iteration;
        debug_assert_eq!(self.partition.excluded()[enter.excluded_index], enter.column);
        debug_assert_eq!(self.partition.included()[exit.row], exit.column);

        self.inverse.update(exit.row, &self.y)?;

        let entering_value = self.nonbasic_value(enter.column);
        for (value, &direction) in self.x.iter_mut().zip(self.y.iter()) {
            *value -= step * direction;
        }
        self.x[exit.row] = entering_value + step;
        if entering_value != 0_f64 {
            self.constraints.column(enter.column).add_multiple_to(entering_value, &mut self.shifted_rhs);
        }

        let leaving_side = if self.is_artificial(exit.column) {
            self.lower[exit.column] = 0_f64;
            self.upper[exit.column] = 0_f64;
            BoundSide::Lower
        } else {
            leaving_side
        };
        self.partition.swap(exit.row, enter.excluded_index, leaving_side);
        let leaving_value = self.nonbasic_value(exit.column);
        if leaving_value != 0_f64 {
            self.constraints.column(exit.column).add_multiple_to(-leaving_value, &mut self.shifted_rhs);
        }

        trace!(
            "pivot: column {} enters at row {}, column {} leaves at {:?}, step {:e}",
            enter.column, exit.row, exit.column, leaving_side, step,
        );

        if self.inverse.needs_refactorization() {
            debug!("refactorizing after {} updates", self.inverse.nr_updates());
            self.refactorize()?;
        }
        self.debug_assert_consistent();

        Ok(())
    }

    fn shift_column(&mut self, j: usize, shift: f64) {
        debug_assert!(!self.partition.is_included(j));

        self.constraints.column(j).add_multiple_to(-shift, &mut self.shifted_rhs);
        self.solve_basic_values();
    }

    fn reset_basis(&mut self, basis: &[usize]) -> Result<(), NumericalError> {
        debug_assert_eq!(basis.len(), self.nr_rows());

        let order = self.inverse.reset(basis, &self.constraints)?;
        let side = (0..self.nr_columns())
            .map(|j| {
                let side = self.partition.side(j);
                if side.is_valid_for(self.lower[j], self.upper[j]) {
                    side
                } else {
                    BoundSide::initial(self.lower[j], self.upper[j])
                }
            })
            .collect();
        self.partition = Partition::new(order, side);

        self.recompute_shifted_rhs();
        self.solve_basic_values();
        self.debug_assert_consistent();

        Ok(())
    }

    fn refactorize(&mut self) -> Result<(), NumericalError> {
        let basis = self.partition.included().to_vec();
        let order = self.inverse.reset(&basis, &self.constraints)?;
        self.partition.reorder(order);
        self.solve_basic_values();

        Ok(())
    }

    fn setup_classic_phase1_objective(&mut self) -> Result<usize, NumericalError> {
        let m = self.nr_rows();
        let n = self.structure.nr_columns();

        for i in 0..m {
            let artificial = self.structure.artificial_column(i);
            self.lower[artificial] = 0_f64;
            self.upper[artificial] = 0_f64;
            self.partition.set_side(artificial, BoundSide::Lower);
        }
        let mut is_identity = vec![false; n];
        for (_, j) in self.structure.identity_columns() {
            is_identity[j] = true;
        }

        let mut residual = self.rhs.clone();
        for j in 0..n {
            let side = BoundSide::initial(self.lower[j], self.upper[j]);
            self.partition.set_side(j, side);

            let value = side.value(self.lower[j], self.upper[j]);
            if !is_identity[j] && value != 0_f64 {
                self.constraints.column(j).add_multiple_to(-value, &mut residual);
            }
        }

        let mut basis = Vec::with_capacity(m);
        let mut costs = DenseVector::zeros(n + m);
        for i in 0..m {
            let mut remaining = residual[i];
            if let Some(j) = self.structure.identity_column(i) {
                let (lower, upper) = (self.lower[j], self.upper[j]);
                let tolerance = self.tolerances.feasibility;
                if remaining >= lower - tolerance && remaining <= upper + tolerance {
                    basis.push(j);
                    continue;
                }

                let side = if remaining < lower { BoundSide::Lower } else { BoundSide::Upper };
                self.partition.set_side(j, side);
                remaining -= side.value(lower, upper);
            }

            let artificial = self.structure.artificial_column(i);
            if remaining >= 0_f64 {
                self.upper[artificial] = f64::INFINITY;
                costs[artificial] = 1_f64;
            } else {
                self.lower[artificial] = f64::NEG_INFINITY;
                costs[artificial] = -1_f64;
            }
            basis.push(artificial);
        }
        let nr_artificial = costs.iter().filter(|&&c| c != 0_f64).count();

        self.objective_state = ObjectiveState::Phase1Active(costs);
        self.reset_basis(&basis)?;
        debug!("initial basis has {nr_artificial} artificial variables out of {m} rows");

        Ok(nr_artificial)
    }

    fn phase1(&self) -> Option<&DenseVector> {
        match &self.objective_state {
            ObjectiveState::NoPhase1 => None,
            ObjectiveState::Phase1Active(costs) => Some(costs),
        }
    }

    fn remove_phase1(&mut self) {
        self.objective_state = ObjectiveState::NoPhase1;

        for i in 0..self.nr_rows() {
            let artificial = self.structure.artificial_column(i);
            self.lower[artificial] = 0_f64;
            self.upper[artificial] = 0_f64;
            if !self.partition.is_included(artificial) {
                self.partition.set_side(artificial, BoundSide::Lower);
            }
        }
    }

    fn objective_value(&self) -> f64 {
        let basic = self.partition.included().iter().enumerate()
            .map(|(i, &j)| self.active_cost(j) * self.x[i])
            .sum::<f64>();
        let non_basic = self.partition.excluded().iter()
            .map(|&j| self.active_cost(j) * self.nonbasic_value(j))
            .sum::<f64>();

        basic + non_basic
    }

    fn extract_value(&self) -> f64 {
        let solution = self.extract_solution();
        let internal = self.objective.iter().zip(&solution)
            .map(|(c, x)| c * x)
            .sum::<f64>();

        self.direction.sign() * internal
    }

    fn copy_basic_solution(&self, out: &mut [f64]) {
        debug_assert_eq!(out.len(), self.nr_columns());

        for &j in self.partition.excluded() {
            out[j] = self.nonbasic_value(j);
        }
        for (i, &j) in self.partition.included().iter().enumerate() {
            out[j] = self.x[i];
        }
    }

    fn extract_solution(&self) -> Vec<f64> {
        let mut values = vec![0_f64; self.nr_columns()];
        self.copy_basic_solution(&mut values);
        values.truncate(self.structure.nr_columns());

        values
    }

    fn dual_values(&self) -> Vec<f64> {
        self.l.iter().map(|&v| -v).collect()
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use crate::algorithm::two_phase::inverse_maintenance::RefactorizationPolicy;
    use crate::algorithm::two_phase::inverse_maintenance::basis_inverse_rows::BasisInverseRows;
    use crate::algorithm::two_phase::store::{EnterInfo, ExitInfo, IterDescr, SimplexStore};
    use crate::algorithm::two_phase::store::revised::RevisedStore;
    use crate::algorithm::two_phase::tolerances::Tolerances;
    use crate::data::linear_program::elements::BoundSide;
    use crate::tests::{infeasible_program, two_variable_program};

    fn store() -> RevisedStore {
        RevisedStore::new(two_variable_program(), Tolerances::default(), RefactorizationPolicy::default())
    }

    #[test]
    fn starts_from_artificial_basis() {
        let store = store();
        assert_eq!(store.included(), &[4, 5]);
        assert_eq!(store.excluded(), &[0, 1, 2, 3]);
        assert_eq!(store.current_rhs(0), 4f64);
        assert_eq!(store.current_rhs(1), 6f64);
        assert!(store.phase1().is_none());
    }

    #[test]
    fn slack_basis_needs_no_artificials() {
        let mut store = store();
        assert_eq!(store.setup_classic_phase1_objective(), Ok(0));
        assert_eq!(store.included(), &[2, 3]);
        assert_eq!(store.objective_value(), 0f64);
        store.remove_phase1();

        store.calculate_iteration();
        // Maximizing x1 + x2 is minimizing -x1 - x2
        assert_eq!(store.excluded(), &[0, 1, 4, 5]);
        assert_eq!(store.get_reduced_cost(0), -1f64);
        assert_eq!(store.get_reduced_cost(1), -1f64);
        assert_eq!(store.get_infeasibility(0), 0f64);
    }

    #[test]
    fn pivot_and_directions() {
        let mut store = store();
        store.setup_classic_phase1_objective().unwrap();
        store.remove_phase1();
        store.calculate_iteration();

        let enter = EnterInfo { column: 0, excluded_index: 0 };
        store.calculate_primal_direction(&enter);
        assert_eq!(store.primal_direction(0), 1f64);
        assert_eq!(store.primal_direction(1), 3f64);

        let exit = ExitInfo { row: 1, column: 3 };
        store.calculate_dual_direction(&exit);
        assert_eq!(store.dual_direction(0), 3f64);
        assert_eq!(store.dual_direction(1), 1f64);

        store.pivot(&IterDescr { enter, exit, step: 2f64, leaving_side: BoundSide::Lower }).unwrap();
        assert_eq!(store.included(), &[2, 0]);
        assert_eq!(store.excluded(), &[3, 1, 4, 5]);
        assert_relative_eq!(store.current_rhs(0), 2f64);
        assert_relative_eq!(store.current_rhs(1), 2f64);

        store.calculate_iteration();
        assert_relative_eq!(store.current_rhs(1), 2f64, epsilon = 1e-12);
        assert_relative_eq!(store.get_reduced_cost(1), -2f64 / 3f64, epsilon = 1e-12);
        assert_relative_eq!(store.get_reduced_cost(0), 1f64 / 3f64, epsilon = 1e-12);
        assert_relative_eq!(store.extract_value(), 2f64, epsilon = 1e-12);
        assert_eq!(store.extract_solution().len(), 4);
    }

    #[test]
    fn shift_and_bounds() {
        let mut store = store();
        store.setup_classic_phase1_objective().unwrap();
        store.remove_phase1();

        store.set_bounds(0, 1f64, 3f64).unwrap();
        assert_eq!(store.current_rhs(0), 3f64);
        assert_eq!(store.current_rhs(1), 3f64);

        store.set_bound_side(0, BoundSide::Upper);
        store.shift_column(0, 2f64);
        assert_eq!(store.current_rhs(0), 1f64);
        assert_eq!(store.current_rhs(1), -3f64);
        store.calculate_iteration();
        assert_eq!(store.get_infeasibility(1), -3f64);

        store.flip(0);
        assert_eq!(store.bound_side(0), BoundSide::Lower);
        assert_eq!(store.current_rhs(1), 3f64);

        assert!(store.set_bounds(0, 2f64, 1f64).is_err());
        assert!(store.set_cost(7, 1f64).is_err());
        assert!(store.set_cost(0, f64::NAN).is_err());
    }

    #[test]
    fn phase_one_objective() {
        let mut store = RevisedStore::<BasisInverseRows>::new(
            infeasible_program(),
            Tolerances::default(),
            RefactorizationPolicy::default(),
        );
        assert_eq!(store.setup_classic_phase1_objective(), Ok(1));
        // Row 0 needs an artificial variable at value 1, row 1 uses its slack
        assert_eq!(store.included(), &[3, 2]);
        assert_eq!(store.objective_value(), 1f64);
        assert_eq!(store.upper_bound(3), f64::INFINITY);
        assert!(store.phase1().is_some());

        store.remove_phase1();
        assert!(store.phase1().is_none());
        assert_eq!(store.upper_bound(3), 0f64);
    }
}
