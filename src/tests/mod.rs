//! # Tests that require a look inside the crate.
//!
//! Small linear programs shared by the unit tests, helpers to check solutions, and randomized tests
//! over many generated problems.
use crate::algorithm::two_phase::store::SimplexStore;
use crate::algorithm::two_phase::strategy::pivot_rule::violation;
use crate::data::linear_algebra::matrix::ColumnMajor;
use crate::data::linear_algebra::vector::DenseVector;
use crate::data::linear_program::elements::Direction;
use crate::data::linear_program::program::LinearProgram;
use crate::data::linear_program::structure::LinearStructure;


/// Build a program from dense rows, panicking on invalid input.
pub fn program(
    rows: &[Vec<f64>],
    rhs: Vec<f64>,
    cost: Vec<f64>,
    bounds: &[(f64, f64)],
    identity: Vec<(usize, usize)>,
    direction: Direction,
) -> LinearProgram {
    let (lower, upper) = bounds.iter().copied().unzip();
    let structure = LinearStructure::new(rows.len(), lower, upper, identity).unwrap();

    LinearProgram::new(
        structure,
        ColumnMajor::from_dense_rows(rows, cost.len()),
        DenseVector::new(rhs),
        DenseVector::new(cost),
        direction,
    )
    .unwrap()
}

/// Maximize `x1 + x2` s.t. `x1 + 2 x2 <= 4`, `3 x1 + x2 <= 6`, `x1, x2 >= 0`.
///
/// The inequalities have slack columns 2 and 3, which form an identity matrix.
pub fn two_variable_program() -> LinearProgram {
    program(
        &[
            vec![1f64, 2f64, 1f64, 0f64],
            vec![3f64, 1f64, 0f64, 1f64],
        ],
        vec![4f64, 6f64],
        vec![1f64, 1f64, 0f64, 0f64],
        &[(0f64, f64::INFINITY); 4],
        vec![(0, 2), (1, 3)],
        Direction::Maximize,
    )
}

/// Both `x >= 1` and `x <= 0`, written as `x - s1 = 1` and `x + s2 = 0`.
pub fn infeasible_program() -> LinearProgram {
    program(
        &[
            vec![1f64, -1f64, 0f64],
            vec![1f64, 0f64, 1f64],
        ],
        vec![1f64, 0f64],
        vec![1f64, 0f64, 0f64],
        &[(0f64, f64::INFINITY); 3],
        vec![(1, 2)],
        Direction::Minimize,
    )
}

/// Maximize `x` with `0 <= x <= 5`, optionally with the loose constraint `x + s = 10`.
pub fn one_variable_program(with_row: bool) -> LinearProgram {
    if with_row {
        program(
            &[vec![1f64, 1f64]],
            vec![10f64],
            vec![1f64, 0f64],
            &[(0f64, 5f64), (0f64, f64::INFINITY)],
            vec![(0, 1)],
            Direction::Maximize,
        )
    } else {
        program(&[], vec![], vec![1f64], &[(0f64, 5f64)], vec![], Direction::Maximize)
    }
}

/// Maximize `x` with `x >= 0` and `-x + s = 1`.
pub fn unbounded_program() -> LinearProgram {
    program(
        &[vec![-1f64, 1f64]],
        vec![1f64],
        vec![1f64, 0f64],
        &[(0f64, f64::INFINITY); 2],
        vec![(0, 1)],
        Direction::Maximize,
    )
}

/// Minimize `x1` s.t. `x1 + x2 = 2`, `2 x1 + 2 x2 = 4`, `x1, x2 >= 0`. The second row is redundant.
pub fn redundant_program() -> LinearProgram {
    program(
        &[
            vec![1f64, 1f64],
            vec![2f64, 2f64],
        ],
        vec![2f64, 4f64],
        vec![1f64, 0f64],
        &[(0f64, f64::INFINITY); 2],
        vec![],
        Direction::Minimize,
    )
}

/// Maximize `2 x1 + x2` s.t. `0.2 x1 + 0.3 x2 + s = 1`, `x1, x2, s >= 0`.
///
/// The first entering column has a small pivot element, which becomes larger once `x2` is basic.
pub fn small_pivot_program() -> LinearProgram {
    program(
        &[vec![0.2, 0.3, 1f64]],
        vec![1f64],
        vec![2f64, 1f64, 0f64],
        &[(0f64, f64::INFINITY); 3],
        vec![(0, 2)],
        Direction::Maximize,
    )
}

/// Maximize `x1 + 3 x2` s.t. `x1 + x2 + s1 = 1`, `x1 - x2 + s2 = 0`, all variables non negative.
///
/// The starting basis is degenerate in the second row.
pub fn degenerate_program() -> LinearProgram {
    program(
        &[
            vec![1f64, 1f64, 1f64, 0f64],
            vec![1f64, -1f64, 0f64, 1f64],
        ],
        vec![1f64, 0f64],
        vec![1f64, 3f64, 0f64, 0f64],
        &[(0f64, f64::INFINITY); 4],
        vec![(0, 2), (1, 3)],
        Direction::Maximize,
    )
}

/// Best vertex of `max c^T x s.t. A x <= b, x >= 0` in two dimensions, by enumerating all
/// intersections of two constraint lines.
pub fn best_vertex(rows: &[[f64; 2]], rhs: &[f64], cost: [f64; 2]) -> Option<(f64, [f64; 2])> {
    let lines = rows.iter().copied().zip(rhs.iter().copied())
        .chain([([1f64, 0f64], 0f64), ([0f64, 1f64], 0f64)])
        .collect::<Vec<_>>();
    let feasible = |x: [f64; 2]| {
        x.iter().all(|&v| v >= -1e-9)
            && rows.iter().zip(rhs).all(|(row, &b)| row[0] * x[0] + row[1] * x[1] <= b + 1e-9)
    };

    let mut best: Option<(f64, [f64; 2])> = None;
    for (k, &([a, b], e)) in lines.iter().enumerate() {
        for &([c, d], f) in &lines[k + 1..] {
            let determinant = a * d - b * c;
            if determinant.abs() < 1e-12 {
                continue;
            }
            let x = [(e * d - b * f) / determinant, (a * f - e * c) / determinant];
            if !feasible(x) {
                continue;
            }
            let value = cost[0] * x[0] + cost[1] * x[1];
            if best.map_or(true, |(best_value, _)| value > best_value) {
                best = Some((value, x));
            }
        }
    }

    best
}

/// Whether the current basis of a store satisfies the optimality conditions: basic variables within
/// their bounds and no excluded column with a reduced cost of the wrong sign.
///
/// Reduced costs and basic values should be current.
pub fn is_optimality_certificate<S: SimplexStore>(store: &S, tolerance: f64) -> bool {
    let primal = store.included().iter().enumerate().all(|(i, &j)| {
        let value = store.current_rhs(i);
        value >= store.lower_bound(j) - tolerance && value <= store.upper_bound(j) + tolerance
    });
    let dual = (0..store.excluded().len()).all(|je| violation(store, je, tolerance).is_none());

    primal && dual
}

/// Largest absolute violation of `A x = b`.
pub fn constraint_violation(program: &LinearProgram, x: &[f64]) -> f64 {
    let mut residual = program.rhs().clone();
    for (j, &value) in x.iter().enumerate() {
        program.constraints().column(j).add_multiple_to(-value, &mut residual);
    }

    residual.iter().fold(0f64, |max, v| max.max(v.abs()))
}

#[test]
fn vertex_enumeration() {
    let (value, x) = best_vertex(&[[1f64, 2f64], [3f64, 1f64]], &[4f64, 6f64], [1f64, 1f64]).unwrap();
    assert!((value - 2.8).abs() < 1e-12);
    assert!((x[0] - 1.6).abs() < 1e-12);
    assert!((x[1] - 1.2).abs() < 1e-12);
}
