//! # Product form of the inverse
//!
//! The basis inverse is represented as `B^-1 = E_k ... E_2 E_1`, a product of eta matrices. A
//! refactorization builds a fresh product by pivoting the basis columns in one at a time, unit
//! columns first. Every basis change appends one more eta matrix.
use crate::algorithm::two_phase::inverse_maintenance::{InverseMaintenance, is_singular_pivot, RefactorizationPolicy};
use crate::algorithm::two_phase::inverse_maintenance::eta_file::EtaFile;
use crate::algorithm::two_phase::tolerances::Tolerances;
use crate::data::linear_algebra::matrix::ColumnMajor;
use crate::error::NumericalError;

/// Product form inverse with drift tracking.
#[derive(Clone, Debug)]
pub struct ProductFormInverse {
    /// Applied in order for `ftran`, in reverse order for `btran`.
    etas: Vec<EtaFile>,
    nr_rows: usize,

    /// Number of eta matrices produced by updates, rather than by the last refactorization.
    nr_updates: usize,
    /// Decimal digits of growth accumulated by the updates.
    drift: f64,

    policy: RefactorizationPolicy,
    tolerances: Tolerances,
}

impl ProductFormInverse {
    /// Accumulated growth of the updates, in decimal digits.
    #[must_use]
    pub fn drift(&self) -> f64 {
        self.drift
    }
}

impl InverseMaintenance for ProductFormInverse {
    fn new(nr_rows: usize, policy: RefactorizationPolicy, tolerances: Tolerances) -> Self {
        Self {
            etas: Vec::new(),
            nr_rows,

            nr_updates: 0,
            drift: 0_f64,

            policy,
            tolerances,
        }
    }

    fn reset(&mut self, basis: &[usize], columns: &ColumnMajor) -> Result<Vec<usize>, NumericalError> {
        debug_assert_eq!(basis.len(), self.nr_rows);
        debug_assert_eq!(columns.nr_rows(), self.nr_rows);

        self.etas.clear();
        self.nr_updates = 0;
        self.drift = 0_f64;

        // Singleton columns don't interact with each other, and unit columns need no eta at all
        let (singletons, others): (Vec<usize>, Vec<usize>) = basis.iter().copied()
            .partition(|&j| columns.column(j).as_singleton().is_some());

        let mut assigned = vec![None; self.nr_rows];
        let mut work = vec![0_f64; self.nr_rows];
        for column in singletons.into_iter().chain(others) {
            self.ftran_column(columns.column(column), &mut work);

            let pivot = (0..self.nr_rows)
                .filter(|&i| assigned[i].is_none())
                .max_by(|&i, &k| work[i].abs().total_cmp(&work[k].abs()).then(k.cmp(&i)))
                .filter(|&i| !is_singular_pivot(work[i], &work, self.tolerances.singular))
                .ok_or(NumericalError::SingularBasis { column })?;

            let eta = EtaFile::new(pivot, &work, self.tolerances.drop);
            if !eta.is_identity() {
                self.etas.push(eta);
            }
            assigned[pivot] = Some(column);
        }

        debug!(
            "refactorized basis of size {} into {} eta matrices",
            self.nr_rows, self.etas.len(),
        );

        Ok(assigned.into_iter().flatten().collect())
    }

    fn ftran_in_place(&self, values: &mut [f64]) {
        debug_assert_eq!(values.len(), self.nr_rows);

        for eta in &self.etas {
            eta.apply_right(values);
        }
    }

    fn btran_in_place(&self, values: &mut [f64]) {
        debug_assert_eq!(values.len(), self.nr_rows);

        for eta in self.etas.iter().rev() {
            eta.apply_left(values);
        }
    }

    fn update(&mut self, exit_row: usize, direction: &[f64]) -> Result<(), NumericalError> {
        debug_assert!(exit_row < self.nr_rows);
        debug_assert_eq!(direction.len(), self.nr_rows);

        let pivot = direction[exit_row];
        if is_singular_pivot(pivot, direction, self.tolerances.singular) {
            return Err(NumericalError::SingularPivot { row: exit_row, value: pivot });
        }

        let eta = EtaFile::new(exit_row, direction, self.tolerances.drop);
        self.drift += eta.growth();
        self.nr_updates += 1;
        self.etas.push(eta);

        Ok(())
    }

    fn needs_refactorization(&self) -> bool {
        self.nr_updates >= self.policy.max_updates || self.drift > self.policy.digit_budget()
    }

    fn nr_updates(&self) -> usize {
        self.nr_updates
    }

    fn nr_rows(&self) -> usize {
        self.nr_rows
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use crate::algorithm::two_phase::inverse_maintenance::{InverseMaintenance, RefactorizationPolicy};
    use crate::algorithm::two_phase::inverse_maintenance::basis_inverse_rows::BasisInverseRows;
    use crate::algorithm::two_phase::inverse_maintenance::product_form::ProductFormInverse;
    use crate::algorithm::two_phase::tolerances::Tolerances;
    use crate::data::linear_algebra::matrix::ColumnMajor;
    use crate::error::NumericalError;

    fn columns() -> ColumnMajor {
        ColumnMajor::from_dense_rows(&[
            vec![1, 2, 1, 0, 0],
            vec![3, 1, 0, 1, 0],
            vec![0, 4, 0, 0, 1],
        ], 5)
    }

    fn new_inverse(nr_rows: usize) -> ProductFormInverse {
        ProductFormInverse::new(nr_rows, RefactorizationPolicy::default(), Tolerances::default())
    }

    #[test]
    fn identity_needs_no_etas() {
        let mut inverse = new_inverse(3);
        let order = inverse.reset(&[4, 2, 3], &columns()).unwrap();
        assert_eq!(order, vec![2, 3, 4]);
        assert!(inverse.etas.is_empty());

        let mut values = [1f64, 2f64, 3f64];
        inverse.ftran_in_place(&mut values);
        assert_eq!(values, [1f64, 2f64, 3f64]);
    }

    #[test]
    fn ftran_solves_basis_system() {
        let columns = columns();
        let mut inverse = new_inverse(3);
        let order = inverse.reset(&[0, 1, 4], &columns).unwrap();

        let b = [4f64, 6f64, 1f64];
        let mut x = [0f64; 3];
        inverse.ftran(&b, &mut x);
        for i in 0..3 {
            let row_value = (0..3).map(|r| columns.get(i, order[r]) * x[r]).sum::<f64>();
            assert_relative_eq!(row_value, b[i], epsilon = 1e-12);
        }

        let c = [1f64, -1f64, 2f64];
        let mut y = [0f64; 3];
        inverse.btran(&c, &mut y);
        for r in 0..3 {
            let column_value = (0..3).map(|i| columns.get(i, order[r]) * y[i]).sum::<f64>();
            assert_relative_eq!(column_value, c[r], epsilon = 1e-12);
        }
    }

    #[test]
    fn update_agrees_with_explicit_inverse() {
        let columns = columns();
        let mut product = new_inverse(3);
        let mut explicit = BasisInverseRows::new(3, RefactorizationPolicy::default(), Tolerances::default());
        let order = product.reset(&[2, 3, 4], &columns).unwrap();
        assert_eq!(explicit.reset(&order, &columns).unwrap(), order);

        // Bring column 1 in at row 0, then column 0 at row 1
        for (exit_row, entering) in [(0, 1), (1, 0)] {
            let mut direction = [0f64; 3];
            product.ftran_column(columns.column(entering), &mut direction);
            let mut expected = [0f64; 3];
            explicit.ftran_column(columns.column(entering), &mut expected);
            for i in 0..3 {
                assert_relative_eq!(direction[i], expected[i], epsilon = 1e-12);
            }

            product.update(exit_row, &direction).unwrap();
            explicit.update(exit_row, &direction).unwrap();
        }
        assert_eq!(product.nr_updates(), 2);

        let b = [1f64, 2f64, 3f64];
        let (mut from_product, mut from_explicit) = ([0f64; 3], [0f64; 3]);
        product.btran(&b, &mut from_product);
        explicit.btran(&b, &mut from_explicit);
        for i in 0..3 {
            assert_relative_eq!(from_product[i], from_explicit[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn singular_basis() {
        let columns = ColumnMajor::from_dense_rows(&[
            vec![1, 2],
            vec![2, 4],
        ], 2);
        let mut inverse = new_inverse(2);
        assert_eq!(inverse.reset(&[0, 1], &columns), Err(NumericalError::SingularBasis { column: 1 }));
    }

    #[test]
    fn singular_pivot_is_rejected() {
        let mut inverse = new_inverse(2);
        inverse.reset(&[0, 1], &ColumnMajor::from_dense_rows(&[vec![1, 0], vec![0, 1]], 2)).unwrap();
        let result = inverse.update(0, &[0f64, 1f64]);
        assert_eq!(result, Err(NumericalError::SingularPivot { row: 0, value: 0f64 }));
        assert_eq!(inverse.nr_updates(), 0);
        assert!(inverse.etas.is_empty());
    }

    #[test]
    fn refactorization_triggers() {
        let policy = RefactorizationPolicy { threshold: 2f64 / 3f64, max_updates: 2 };
        let mut inverse = ProductFormInverse::new(2, policy, Tolerances::default());
        inverse.update(0, &[1f64, 1f64]).unwrap();
        assert!(!inverse.needs_refactorization());
        inverse.update(1, &[1f64, 1f64]).unwrap();
        assert!(inverse.needs_refactorization());

        let mut inverse = new_inverse(2);
        // A pivot of 1e-11 contributes 11 digits of growth
        inverse.update(0, &[2e-11, 1e-11]).unwrap();
        assert!(inverse.drift() > 10f64);
        assert!(inverse.needs_refactorization());
    }
}
