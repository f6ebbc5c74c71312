//! # Basis partition
//!
//! Every column is either included in the basis, at a row position, or excluded from it, at a
//! position in the list of non basic columns where it is held at one of its bounds.
use crate::data::linear_program::elements::BoundSide;

/// Where a column currently is.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Position {
    /// Basic, with the row of the basis inverse it corresponds to.
    Included(usize),
    /// Non basic, with its index in the list of excluded columns.
    Excluded(usize),
}

/// Split of the columns into basic and non basic ones.
#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    /// Basic columns by row.
    included: Vec<usize>,
    /// Non basic columns.
    excluded: Vec<usize>,
    /// Inverse of the two lists above.
    position: Vec<Position>,
    /// Bound at which each column is held while excluded.
    side: Vec<BoundSide>,
}

impl Partition {
    /// Create a new instance.
    ///
    /// # Arguments
    ///
    /// * `basis`: Basic columns by row.
    /// * `side`: For each column, the bound at which it is held when non basic.
    #[must_use]
    pub fn new(basis: Vec<usize>, side: Vec<BoundSide>) -> Self {
        let nr_columns = side.len();
        debug_assert!(basis.iter().all(|&j| j < nr_columns));

        let mut position = vec![None; nr_columns];
        for (i, &j) in basis.iter().enumerate() {
            debug_assert!(position[j].is_none(), "column {j} appears twice in the basis");
            position[j] = Some(Position::Included(i));
        }
        let mut excluded = Vec::with_capacity(nr_columns - basis.len());
        for (j, slot) in position.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some(Position::Excluded(excluded.len()));
                excluded.push(j);
            }
        }
        let position = position.into_iter().flatten().collect();

        Self {
            included: basis,
            excluded,
            position,
            side,
        }
    }

    /// Basic columns by row.
    #[must_use]
    pub fn included(&self) -> &[usize] {
        &self.included
    }

    /// Non basic columns.
    #[must_use]
    pub fn excluded(&self) -> &[usize] {
        &self.excluded
    }

    /// Where column `j` currently is.
    #[must_use]
    pub fn position(&self, j: usize) -> Position {
        self.position[j]
    }

    /// Whether column `j` is basic.
    #[must_use]
    pub fn is_included(&self, j: usize) -> bool {
        matches!(self.position[j], Position::Included(_))
    }

    /// Bound at which column `j` is held while excluded.
    #[must_use]
    pub fn side(&self, j: usize) -> BoundSide {
        self.side[j]
    }

    /// Change the bound at which column `j` is held.
    pub fn set_side(&mut self, j: usize, side: BoundSide) {
        self.side[j] = side;
    }

    /// Swap an excluded and an included column.
    ///
    /// # Arguments
    ///
    /// * `exit_row`: Row of the leaving column.
    /// * `enter_index`: Index of the entering column among the excluded columns.
    /// * `leaving_side`: Bound at which the leaving column will be held.
    ///
    /// # Return value
    ///
    /// The entering and leaving column.
    pub fn swap(&mut self, exit_row: usize, enter_index: usize, leaving_side: BoundSide) -> (usize, usize) {
        let entering = self.excluded[enter_index];
        let leaving = self.included[exit_row];

        self.included[exit_row] = entering;
        self.excluded[enter_index] = leaving;
        self.position[entering] = Position::Included(exit_row);
        self.position[leaving] = Position::Excluded(enter_index);
        self.side[leaving] = leaving_side;

        (entering, leaving)
    }

    /// Replace the row order of the basic columns.
    ///
    /// # Arguments
    ///
    /// * `basis`: The same basic columns as before, in a new order.
    pub fn reorder(&mut self, basis: Vec<usize>) {
        debug_assert_eq!(basis.len(), self.included.len());
        debug_assert!(basis.iter().all(|&j| self.is_included(j)));

        for (i, &j) in basis.iter().enumerate() {
            self.position[j] = Position::Included(i);
        }
        self.included = basis;
    }

    /// Whether the included and excluded columns are disjoint, cover all columns and the position
    /// index agrees with both.
    #[must_use]
    pub fn is_valid(&self, nr_rows: usize) -> bool {
        let nr_columns = self.position.len();
        if self.included.len() != nr_rows || self.excluded.len() != nr_columns - nr_rows {
            return false;
        }

        let mut seen = vec![false; nr_columns];
        for &j in self.included.iter().chain(&self.excluded) {
            if j >= nr_columns || seen[j] {
                return false;
            }
            seen[j] = true;
        }

        let included_agree = self.included.iter().enumerate()
            .all(|(i, &j)| self.position[j] == Position::Included(i));
        let excluded_agree = self.excluded.iter().enumerate()
            .all(|(je, &j)| self.position[j] == Position::Excluded(je));

        included_agree && excluded_agree
    }
}

#[cfg(test)]
mod test {
    use crate::algorithm::two_phase::store::partition::{Partition, Position};
    use crate::data::linear_program::elements::BoundSide;

    #[test]
    fn new_and_swap() {
        let mut partition = Partition::new(vec![3, 1], vec![BoundSide::Lower; 4]);
        assert!(partition.is_valid(2));
        assert_eq!(partition.excluded(), &[0, 2]);
        assert_eq!(partition.position(1), Position::Included(1));
        assert_eq!(partition.position(2), Position::Excluded(1));

        let (entering, leaving) = partition.swap(0, 1, BoundSide::Upper);
        assert_eq!((entering, leaving), (2, 3));
        assert_eq!(partition.included(), &[2, 1]);
        assert_eq!(partition.excluded(), &[0, 3]);
        assert_eq!(partition.side(3), BoundSide::Upper);
        assert!(partition.is_valid(2));
    }

    #[test]
    fn reorder() {
        let mut partition = Partition::new(vec![0, 2], vec![BoundSide::Lower; 3]);
        partition.reorder(vec![2, 0]);
        assert_eq!(partition.position(2), Position::Included(0));
        assert!(partition.is_valid(2));
        assert!(!partition.is_valid(1));
    }

    #[test]
    fn empty_basis() {
        let partition = Partition::new(vec![], vec![BoundSide::Free; 2]);
        assert!(partition.is_valid(0));
        assert_eq!(partition.excluded(), &[0, 1]);
    }
}
