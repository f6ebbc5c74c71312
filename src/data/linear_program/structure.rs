//! # Shape of a linear program
//!
//! Row and column counts, variable bounds and the columns that form an identity submatrix.
use enum_map::{Enum, EnumMap, enum_map};

use crate::error::InvalidInput;

/// Groups of columns, in the order in which they are laid out by the solver.
///
/// The problem columns come first. After them, the solver appends one artificial unit column per
/// row.
#[derive(Enum, Debug, Copy, Clone, Eq, PartialEq)]
pub enum ColumnType {
    /// Column of the problem as provided.
    Problem,
    /// Unit column added for the first phase.
    Artificial,
}

/// Static description of the shape of a problem.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearStructure {
    nr_rows: usize,
    lower: Vec<f64>,
    upper: Vec<f64>,
    /// For each row, the column that is the unit vector of that row, if any.
    identity: Vec<Option<usize>>,

    column_group_end: EnumMap<ColumnType, usize>,
}

impl LinearStructure {
    /// Create a new instance.
    ///
    /// # Arguments
    ///
    /// * `nr_rows`: Number of equality constraints `m`.
    /// * `lower`: Lower bound of each variable, `-inf` when there is none.
    /// * `upper`: Upper bound of each variable, `inf` when there is none.
    /// * `identity`: `(row, column)` pairs of columns that are unit vectors. These are used as the
    /// initial basis where possible.
    ///
    /// # Return value
    ///
    /// An error if a bound pair is invalid, or if an identity pair is out of range or repeated.
    pub fn new(
        nr_rows: usize,
        lower: Vec<f64>,
        upper: Vec<f64>,
        identity: Vec<(usize, usize)>,
    ) -> Result<Self, InvalidInput> {
        if lower.len() != upper.len() {
            return Err(InvalidInput::DimensionMismatch {
                what: "upper bounds",
                expected: lower.len(),
                actual: upper.len(),
            });
        }
        for (j, (&l, &u)) in lower.iter().zip(&upper).enumerate() {
            validate_bounds(j, l, u)?;
        }

        let nr_columns = lower.len();
        let mut identity_by_row = vec![None; nr_rows];
        let mut seen_columns = vec![false; nr_columns];
        for (row, column) in identity {
            if row >= nr_rows || column >= nr_columns {
                return Err(InvalidInput::IdentityOutOfRange { row, column });
            }
            if identity_by_row[row].is_some() || seen_columns[column] {
                return Err(InvalidInput::DuplicateIdentity { row, column });
            }
            identity_by_row[row] = Some(column);
            seen_columns[column] = true;
        }

        let column_group_end = enum_map! {
            ColumnType::Problem    => nr_columns,
            ColumnType::Artificial => nr_columns + nr_rows,
        };

        Ok(Self {
            nr_rows,
            lower,
            upper,
            identity: identity_by_row,
            column_group_end,
        })
    }

    /// Number of rows `m`.
    #[must_use]
    pub fn nr_rows(&self) -> usize {
        self.nr_rows
    }

    /// Number of problem columns `n`.
    #[must_use]
    pub fn nr_columns(&self) -> usize {
        self.column_group_end[ColumnType::Problem]
    }

    /// Number of columns including one artificial column per row, `n + m`.
    #[must_use]
    pub fn nr_total_columns(&self) -> usize {
        self.column_group_end[ColumnType::Artificial]
    }

    /// Lower bound of problem column `j`.
    #[must_use]
    pub fn lower_bound(&self, j: usize) -> f64 {
        self.lower[j]
    }

    /// Upper bound of problem column `j`.
    #[must_use]
    pub fn upper_bound(&self, j: usize) -> f64 {
        self.upper[j]
    }

    /// Replace the bounds of problem column `j`.
    pub fn set_bounds(&mut self, j: usize, lower: f64, upper: f64) -> Result<(), InvalidInput> {
        if j >= self.nr_columns() {
            return Err(InvalidInput::DimensionMismatch {
                what: "columns",
                expected: self.nr_columns(),
                actual: j + 1,
            });
        }
        validate_bounds(j, lower, upper)?;

        self.lower[j] = lower;
        self.upper[j] = upper;
        Ok(())
    }

    /// Column that is the unit vector of row `i`, if there is one.
    #[must_use]
    pub fn identity_column(&self, i: usize) -> Option<usize> {
        self.identity[i]
    }

    /// All `(row, column)` pairs of the identity submatrix, ordered by row.
    pub fn identity_columns(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.identity.iter().enumerate()
            .filter_map(|(i, column)| column.map(|j| (i, j)))
    }

    /// Which group a column belongs to.
    ///
    /// # Arguments
    ///
    /// * `j`: Column index in the range `0..n + m`.
    #[must_use]
    pub fn column_type(&self, j: usize) -> ColumnType {
        debug_assert!(j < self.nr_total_columns());

        if j < self.column_group_end[ColumnType::Problem] {
            ColumnType::Problem
        } else {
            ColumnType::Artificial
        }
    }

    /// Column index of the artificial variable of row `i`.
    #[must_use]
    pub fn artificial_column(&self, i: usize) -> usize {
        debug_assert!(i < self.nr_rows);

        self.column_group_end[ColumnType::Problem] + i
    }
}

/// Check a single pair of bounds.
///
/// Infinite bounds are allowed, as long as they still admit a finite value.
pub(crate) fn validate_bounds(column: usize, lower: f64, upper: f64) -> Result<(), InvalidInput> {
    if lower.is_nan() || upper.is_nan() || lower == f64::INFINITY || upper == f64::NEG_INFINITY {
        return Err(InvalidInput::InvalidBound { column, lower, upper });
    }
    if lower > upper {
        return Err(InvalidInput::InvertedBounds { column, lower, upper });
    }

    Ok(())
}
