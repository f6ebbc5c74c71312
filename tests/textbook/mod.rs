//! Small problems with a known optimum, built through the public interface only.
use revised_simplex::algorithm::two_phase::SimplexSolver;
use revised_simplex::algorithm::two_phase::options::SolverOptions;
use revised_simplex::data::linear_algebra::matrix::ColumnMajor;
use revised_simplex::data::linear_algebra::vector::DenseVector;
use revised_simplex::data::linear_program::elements::Direction;
use revised_simplex::data::linear_program::program::LinearProgram;
use revised_simplex::data::linear_program::solution::{Phase, Status};
use revised_simplex::data::linear_program::structure::LinearStructure;
use revised_simplex::error::InvalidInput;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Maximize `3 x1 + 5 x2` s.t. `3 x1 + 2 x2 <= 18`, `0 <= x1 <= 4`, `0 <= x2 <= 6`.
#[test]
fn bounded_production_plan() {
    let structure = LinearStructure::new(
        1,
        vec![0f64, 0f64, 0f64],
        vec![4f64, 6f64, f64::INFINITY],
        vec![(0, 2)],
    ).unwrap();
    let program = LinearProgram::new(
        structure,
        ColumnMajor::from_dense_rows(&[vec![3, 2, 1]], 3),
        DenseVector::new(vec![18f64]),
        DenseVector::new(vec![3f64, 5f64, 0f64]),
        Direction::Maximize,
    ).unwrap();

    let solution = SimplexSolver::new(program, SolverOptions::default()).solve().unwrap();
    assert_eq!(solution.status, Status::Optimal);
    assert!(close(solution.objective_value, 36f64));
    assert!(close(solution.primal[0], 2f64));
    assert!(close(solution.primal[1], 6f64));
    assert!(close(solution.dual[0], 1f64));
    // One bound flip and one basis change
    assert_eq!(solution.iterations[Phase::Two], 2);
}

/// Minimize `2 x1 + 3 x2` s.t. `x1 + x2 = 10`, `0 <= x1 <= 7`, `x2 >= 0`.
#[test]
fn equality_without_slack() {
    let structure = LinearStructure::new(
        1,
        vec![0f64, 0f64],
        vec![7f64, f64::INFINITY],
        vec![],
    ).unwrap();
    let program = LinearProgram::new(
        structure,
        ColumnMajor::from_dense_rows(&[vec![1, 1]], 2),
        DenseVector::new(vec![10f64]),
        DenseVector::new(vec![2f64, 3f64]),
        Direction::Minimize,
    ).unwrap();

    let solution = SimplexSolver::new(program, SolverOptions::default()).solve().unwrap();
    assert_eq!(solution.status, Status::Optimal);
    assert!(close(solution.objective_value, 23f64));
    assert!(close(solution.primal[0], 7f64));
    assert!(close(solution.primal[1], 3f64));
    assert_eq!(solution.iterations[Phase::One], 2);
}

/// Minimize a free variable `x1` s.t. `x1 - x2 = -3`, `0 <= x2 <= 5`.
#[test]
fn free_variable() {
    let structure = LinearStructure::new(
        1,
        vec![f64::NEG_INFINITY, 0f64],
        vec![f64::INFINITY, 5f64],
        vec![],
    ).unwrap();
    let program = LinearProgram::new(
        structure,
        ColumnMajor::from_dense_rows(&[vec![1, -1]], 2),
        DenseVector::new(vec![-3f64]),
        DenseVector::new(vec![1f64, 0f64]),
        Direction::Minimize,
    ).unwrap();

    let solution = SimplexSolver::new(program, SolverOptions::default()).solve().unwrap();
    assert_eq!(solution.status, Status::Optimal);
    assert!(close(solution.objective_value, -3f64));
    assert!(close(solution.primal[0], -3f64));
    assert!(close(solution.primal[1], 0f64));
}

#[test]
fn rejected_input() {
    assert_eq!(
        LinearStructure::new(0, vec![1f64], vec![0f64], vec![]),
        Err(InvalidInput::InvertedBounds { column: 0, lower: 1f64, upper: 0f64 }),
    );

    let structure = LinearStructure::new(1, vec![0f64], vec![1f64], vec![]).unwrap();
    let program = LinearProgram::new(
        structure,
        ColumnMajor::from_dense_rows(&[vec![1]], 1),
        DenseVector::new(vec![1f64, 2f64]),
        DenseVector::new(vec![1f64]),
        Direction::Minimize,
    );
    assert!(matches!(program, Err(InvalidInput::DimensionMismatch { .. })));
}
