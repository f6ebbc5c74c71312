//! # A complete linear program
//!
//! The input of the solver: a validated structure together with the constraint matrix, the right
//! hand side and the objective.
use crate::data::linear_algebra::matrix::ColumnMajor;
use crate::data::linear_algebra::vector::{DenseVector, Vector};
use crate::data::linear_program::elements::Direction;
use crate::data::linear_program::structure::LinearStructure;
use crate::error::InvalidInput;

/// A linear program `min (or max) c^T x s.t. A x = b, lower <= x <= upper`.
///
/// All dimensions and values are checked when it is created, so an instance is always consistent.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearProgram {
    structure: LinearStructure,
    constraints: ColumnMajor,
    rhs: DenseVector,
    objective: DenseVector,
    direction: Direction,
}

impl LinearProgram {
    /// Create a new instance.
    ///
    /// # Arguments
    ///
    /// * `structure`: Shape, bounds and identity columns.
    /// * `constraints`: Matrix `A` with `m` rows and `n` columns.
    /// * `rhs`: Right hand side `b` of length `m`.
    /// * `objective`: Cost vector `c` of length `n`.
    /// * `direction`: Whether to minimize or maximize.
    ///
    /// # Return value
    ///
    /// An error if a dimension doesn't match, if a value is not finite, or if a column announced as
    /// an identity column is not a unit vector.
    pub fn new(
        structure: LinearStructure,
        constraints: ColumnMajor,
        rhs: DenseVector,
        objective: DenseVector,
        direction: Direction,
    ) -> Result<Self, InvalidInput> {
        let m = structure.nr_rows();
        let n = structure.nr_columns();

        let dimensions = [
            ("constraint rows", m, constraints.nr_rows()),
            ("constraint columns", n, constraints.nr_columns()),
            ("right hand side values", m, rhs.len()),
            ("cost coefficients", n, objective.len()),
        ];
        for (what, expected, actual) in dimensions {
            if expected != actual {
                return Err(InvalidInput::DimensionMismatch { what, expected, actual });
            }
        }

        for (j, column) in constraints.iter_columns().enumerate() {
            if let Some(&(row, _)) = column.iter().find(|(_, value)| !value.is_finite()) {
                return Err(InvalidInput::NonFiniteCoefficient { row, column: j });
            }
        }
        if let Some(index) = rhs.iter().position(|value| !value.is_finite()) {
            return Err(InvalidInput::NonFiniteValue { what: "right hand side", index });
        }
        if let Some(index) = objective.iter().position(|value| !value.is_finite()) {
            return Err(InvalidInput::NonFiniteValue { what: "cost", index });
        }

        for (row, column) in structure.identity_columns() {
            if constraints.column(column).as_singleton() != Some((row, 1_f64)) {
                return Err(InvalidInput::NotAnIdentityColumn { row, column });
            }
        }

        Ok(Self { structure, constraints, rhs, objective, direction })
    }

    /// Shape, bounds and identity columns.
    #[must_use]
    pub fn structure(&self) -> &LinearStructure {
        &self.structure
    }

    /// Constraint matrix `A`.
    #[must_use]
    pub fn constraints(&self) -> &ColumnMajor {
        &self.constraints
    }

    /// Right hand side `b`.
    #[must_use]
    pub fn rhs(&self) -> &DenseVector {
        &self.rhs
    }

    /// Cost vector `c` as provided, regardless of the direction.
    #[must_use]
    pub fn objective(&self) -> &DenseVector {
        &self.objective
    }

    /// Whether to minimize or maximize.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Split into its parts.
    #[must_use]
    pub fn into_parts(self) -> (LinearStructure, ColumnMajor, DenseVector, DenseVector, Direction) {
        (self.structure, self.constraints, self.rhs, self.objective, self.direction)
    }
}

#[cfg(test)]
mod test {
    use crate::data::linear_algebra::matrix::ColumnMajor;
    use crate::data::linear_algebra::vector::DenseVector;
    use crate::data::linear_program::elements::Direction;
    use crate::data::linear_program::program::LinearProgram;
    use crate::data::linear_program::structure::LinearStructure;
    use crate::error::InvalidInput;

    fn structure(identity: Vec<(usize, usize)>) -> LinearStructure {
        LinearStructure::new(2, vec![0f64; 3], vec![f64::INFINITY; 3], identity).unwrap()
    }

    fn constraints() -> ColumnMajor {
        ColumnMajor::from_dense_rows(&[
            vec![1, 1, 0],
            vec![2, 0, 1],
        ], 3)
    }

    #[test]
    fn valid() {
        let program = LinearProgram::new(
            structure(vec![(0, 1), (1, 2)]),
            constraints(),
            DenseVector::new(vec![1f64, 2f64]),
            DenseVector::new(vec![1f64, 0f64, 0f64]),
            Direction::Maximize,
        );
        assert!(program.is_ok());
    }

    #[test]
    fn dimension_mismatch() {
        let program = LinearProgram::new(
            structure(vec![]),
            constraints(),
            DenseVector::new(vec![1f64]),
            DenseVector::new(vec![1f64, 0f64, 0f64]),
            Direction::Minimize,
        );
        assert_eq!(program, Err(InvalidInput::DimensionMismatch {
            what: "right hand side values",
            expected: 2,
            actual: 1,
        }));
    }

    #[test]
    fn not_an_identity_column() {
        let program = LinearProgram::new(
            structure(vec![(1, 0)]),
            constraints(),
            DenseVector::new(vec![1f64, 2f64]),
            DenseVector::new(vec![1f64, 0f64, 0f64]),
            Direction::Minimize,
        );
        assert_eq!(program, Err(InvalidInput::NotAnIdentityColumn { row: 1, column: 0 }));
    }

    #[test]
    fn non_finite_values() {
        let program = LinearProgram::new(
            structure(vec![]),
            constraints(),
            DenseVector::new(vec![1f64, f64::NAN]),
            DenseVector::new(vec![1f64, 0f64, 0f64]),
            Direction::Minimize,
        );
        assert_eq!(program, Err(InvalidInput::NonFiniteValue { what: "right hand side", index: 1 }));

        let program = LinearProgram::new(
            structure(vec![]),
            ColumnMajor::from_dense_rows(&[
                vec![1f64, f64::INFINITY, 0f64],
                vec![2f64, 0f64, 1f64],
            ], 3),
            DenseVector::new(vec![1f64, 2f64]),
            DenseVector::new(vec![1f64, 0f64, 0f64]),
            Direction::Minimize,
        );
        assert_eq!(program, Err(InvalidInput::NonFiniteCoefficient { row: 0, column: 1 }));
    }
}
