//! Execution helper that runs [`ProjectedFista`] through `argmin`'s
//! `Executor` and returns a crate-friendly [`SolverOutcome`].
use crate::optimization::{
    errors::{OptError, OptResult},
    least_squares::{
        constraints::Constraint,
        fista::{last_step, ProjectedFista},
        problem::LeastSquares,
        traits::{SolverOptions, SolverOutcome},
        types::Weights,
        validation::validate_cost,
    },
};
use argmin::core::{Executor, State, TerminationReason, TerminationStatus};

/// Run the accelerated projected gradient on `problem` from `w0`.
///
/// Wires up the step size `1/L`, the starting point and the iteration
/// budget, executes the solver and converts the final state.
///
/// Errors
/// ------
/// - `OptError::NotConverged` when argmin stops on `max_iter` (or without a
///   termination reason) instead of the step/cost rule.
/// - Any `argmin` runtime error, mapped through `From<argmin::core::Error>`.
pub fn run_fista(
    problem: &LeastSquares, constraint: &Constraint, w0: &Weights, opts: &SolverOptions,
) -> OptResult<SolverOutcome> {
    let lipschitz = problem.lipschitz()?;

    // Constant objective: every feasible point is optimal.
    if lipschitz <= f64::EPSILON {
        let x = constraint.project(w0.view());
        let cost = problem.value(&x);
        validate_cost(cost)?;
        log::debug!("least squares: flat objective, returning projected start");
        return Ok(SolverOutcome::new(x, cost, 0));
    }

    let solver = ProjectedFista::new(*constraint, 1.0 / lipschitz, opts.tol_step, opts.tol_cost);
    let start = w0.clone();
    let result = Executor::new(problem.clone(), solver)
        .configure(|state| state.param(start).max_iters(opts.max_iter as u64))
        .run()?;

    let state = result.state();
    let iterations = state.get_iter() as usize;
    match state.get_termination_status() {
        TerminationStatus::Terminated(TerminationReason::SolverConverged) => {}
        _ => {
            return Err(OptError::NotConverged { iterations, last_step: last_step(state) });
        }
    }

    let weights = state.get_param().cloned().ok_or_else(|| OptError::NotInitialized {
        text: "solver finished without an iterate".to_string(),
    })?;
    let value = state.get_cost();
    validate_cost(value)?;
    let outcome = SolverOutcome::new(weights, value, iterations);

    if 2 * outcome.iterations > opts.max_iter {
        log::warn!(
            "least squares: slow convergence, used {} of {} iterations",
            outcome.iterations,
            opts.max_iter
        );
    }
    log::debug!(
        "least squares: converged after {} iterations ({} restarts), mse = {:.6e}",
        outcome.iterations,
        result.solver().restarts(),
        outcome.value
    );
    Ok(outcome)
}
