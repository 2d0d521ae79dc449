//! Public entry point for constrained least squares.
use crate::optimization::{
    errors::{OptError, OptResult},
    least_squares::{
        constraints::Constraint,
        problem::LeastSquares,
        run::run_fista,
        traits::{SolverOptions, SolverOutcome},
        types::Weights,
    },
};

/// Minimize `(1/n) ||y − Xw||²` over the feasible set of `constraint`.
///
/// Parameters
/// ----------
/// - `problem`: `&LeastSquares`
///   Sufficient statistics of the design/response pair.
/// - `constraint`: `&Constraint`
///   Simplex or ℓ1 ball.
/// - `w0`: `Option<&Weights>`
///   Starting point; projected before use. `None` uses
///   [`Constraint::initial_point`].
/// - `opts`: `&SolverOptions`
///   Stopping rules.
///
/// Returns
/// -------
/// - `OptResult<SolverOutcome>` with feasible weights and the attained mean
///   squared error.
///
/// Errors
/// ------
/// - `OptError::StartDimMismatch` when `w0` has the wrong length.
/// - `OptError::NotConverged` when the iteration budget is exhausted.
/// - `OptError::NonFiniteCost` / `OptError::InvalidLipschitz` on numerical
///   breakdown.
pub fn minimize(
    problem: &LeastSquares, constraint: &Constraint, w0: Option<&Weights>, opts: &SolverOptions,
) -> OptResult<SolverOutcome> {
    let start = match w0 {
        Some(w0) if w0.len() != problem.dim() => {
            return Err(OptError::StartDimMismatch { expected: problem.dim(), found: w0.len() });
        }
        Some(w0) => w0.clone(),
        None => constraint.initial_point(problem.dim()),
    };
    run_fista(problem, constraint, &start, opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array1, Array2};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exact recovery when the response is a convex combination of columns.
    // - A closed-form ℓ1-constrained solution on an orthogonal design.
    // - Interior solutions matching ordinary least squares.
    // - Iteration budget exhaustion and start-dimension validation.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // When y = X w* with w* on the simplex and X of full column rank, the
    // simplex-constrained minimizer is w*.
    //
    // Given
    // -----
    // - 6 × 3 design with independent columns, w* = [0.2, 0.5, 0.3].
    //
    // Expect
    // ------
    // - Recovered weights within 1e-6 of w*, objective ≈ 0.
    fn simplex_recovers_convex_combination() {
        let x = array![
            [1.0, 0.0, 2.0],
            [0.0, 1.0, 1.0],
            [2.0, 1.0, 0.0],
            [1.0, 3.0, 1.0],
            [0.5, 0.0, 1.5],
            [3.0, 1.0, 2.0]
        ];
        let w_star = array![0.2, 0.5, 0.3];
        let y = x.dot(&w_star);
        let problem = LeastSquares::new(x.view(), y.view()).unwrap();

        let opts = SolverOptions::default();

        let out = minimize(&problem, &Constraint::Simplex, None, &opts).unwrap();

        assert!(out.iterations > 0 && out.iterations <= opts.max_iter);
        for j in 0..3 {
            assert_relative_eq!(out.weights[j], w_star[j], epsilon = 1e-6);
        }
        assert!(out.value < 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // On an orthonormal-scaled design the ℓ1-constrained problem reduces to
    // projecting the OLS solution onto the ℓ1 ball.
    //
    // Given
    // -----
    // - X = √2 · I₂ (n = 2) so G = I and the OLS solution is b = Xᵀy/n.
    // - y chosen so b = [2, 0.5]; radius 1.
    //
    // Expect
    // ------
    // - w = projection of [2, 0.5] onto the unit ℓ1 ball = [1, 0].
    fn l1_ball_matches_projected_ols_on_orthogonal_design() {
        let s = 2.0_f64.sqrt();
        let x = array![[s, 0.0], [0.0, s]];
        let y = array![2.0 * s, 0.5 * s];
        let problem = LeastSquares::new(x.view(), y.view()).unwrap();
        let ball = Constraint::l1_ball(1.0).unwrap();

        let out = minimize(&problem, &ball, None, &SolverOptions::default()).unwrap();

        assert_relative_eq!(out.weights[0], 1.0, epsilon = 1e-8);
        assert_relative_eq!(out.weights[1], 0.0, epsilon = 1e-8);
    }

    #[test]
    // Purpose
    // -------
    // When the unconstrained OLS solution lies strictly inside the ℓ1 ball the
    // constraint is inactive and both coincide.
    fn l1_ball_interior_solution_is_ols() {
        let x = array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
        let w_ols = array![0.25, -0.125];
        let y = x.dot(&w_ols);
        let problem = LeastSquares::new(x.view(), y.view()).unwrap();
        let ball = Constraint::l1_ball(1.0).unwrap();

        let out = minimize(&problem, &ball, None, &SolverOptions::default()).unwrap();

        assert_relative_eq!(out.weights[0], 0.25, epsilon = 1e-7);
        assert_relative_eq!(out.weights[1], -0.125, epsilon = 1e-7);
    }

    #[test]
    // Purpose
    // -------
    // A one-iteration budget with a demanding tolerance must surface as
    // `NotConverged` rather than a silent partial result.
    fn exhausted_budget_is_an_error() {
        let x = Array2::from_shape_fn((8, 3), |(i, j)| ((i * 3 + j) as f64).sin());
        let y = Array1::from_shape_fn(8, |i| (i as f64).cos());
        let problem = LeastSquares::new(x.view(), y.view()).unwrap();
        let opts = SolverOptions::new(1e-14, None, 1).unwrap();

        let err = minimize(&problem, &Constraint::Simplex, None, &opts).unwrap_err();

        assert!(matches!(err, OptError::NotConverged { iterations: 1, .. }));
    }

    #[test]
    // Purpose
    // -------
    // A starting point of the wrong length is rejected up front.
    fn wrong_start_dimension_is_rejected() {
        let x = array![[1.0, 0.0], [0.0, 1.0]];
        let y = array![1.0, 1.0];
        let problem = LeastSquares::new(x.view(), y.view()).unwrap();

        let opts = SolverOptions::default();

        let err = minimize(&problem, &Constraint::Simplex, Some(&array![1.0]), &opts).unwrap_err();

        assert_eq!(err, OptError::StartDimMismatch { expected: 2, found: 1 });
    }
}
