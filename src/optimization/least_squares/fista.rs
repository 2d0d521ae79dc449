//! fista — accelerated projected gradient as an `argmin` solver.
//!
//! Iteration `k` takes a gradient step of length `1/L` from the extrapolated
//! point `y_k`, projects onto the feasible set, then updates the momentum
//! sequence `t_{k+1} = (1 + sqrt(1 + 4 t_k²)) / 2`. When an accelerated step
//! raises the objective the step is discarded and momentum is reset
//! (O'Donoghue & Candès, 2015). Plain projected steps never increase the
//! objective at step size `1/L`, so they are always accepted.
//!
//! The `argmin` state holds the accepted iterate `x_k` and its cost; the
//! extrapolated point and momentum live on the solver. A discarded step
//! leaves the state untouched, so the stopping rule only ever sees accepted
//! iterates.
use crate::optimization::{
    errors::OptError,
    least_squares::{
        constraints::Constraint,
        problem::LeastSquares,
        types::{Grad, Weights},
    },
};
use argmin::core::{
    Error, IterState, Problem, Solver, State, TerminationReason, TerminationStatus, KV,
};

/// `argmin` state used by [`ProjectedFista`].
pub type FistaState = IterState<Weights, Grad, (), (), (), f64>;

/// FISTA with function-value restart over a [`Constraint`].
///
/// Fields
/// ------
/// - `constraint`: feasible set; every accepted iterate is its projection.
/// - `step`: gradient step `1/L`.
/// - `tol_step`, `tol_cost`: stopping rules checked in
///   [`Solver::terminate`].
#[derive(Debug, Clone)]
pub struct ProjectedFista {
    constraint: Constraint,
    step: f64,
    tol_step: f64,
    tol_cost: Option<f64>,
    momentum_point: Option<Weights>,
    t: f64,
    restarts: usize,
}

impl ProjectedFista {
    pub fn new(constraint: Constraint, step: f64, tol_step: f64, tol_cost: Option<f64>) -> Self {
        Self {
            constraint,
            step,
            tol_step,
            tol_cost,
            momentum_point: None,
            t: 1.0,
            restarts: 0,
        }
    }

    /// Number of momentum resets so far.
    pub fn restarts(&self) -> usize {
        self.restarts
    }
}

/// Max-norm distance between the last two accepted iterates, or infinity
/// before the first accepted step.
pub fn last_step(state: &FistaState) -> f64 {
    match (state.get_param(), state.get_prev_param()) {
        (Some(x), Some(prev)) => {
            x.iter().zip(prev.iter()).map(|(a, b)| (a - b).abs()).fold(0.0, f64::max)
        }
        _ => f64::INFINITY,
    }
}

impl Solver<LeastSquares, FistaState> for ProjectedFista {
    const NAME: &'static str = "Projected FISTA";

    fn init(
        &mut self, problem: &mut Problem<LeastSquares>, mut state: FistaState,
    ) -> Result<(FistaState, Option<KV>), Error> {
        let start = state.take_param().ok_or_else(|| OptError::NotInitialized {
            text: "starting point was not set on the solver state".to_string(),
        })?;
        let x = self.constraint.project(start.view());
        let cost = problem.cost(&x)?;
        self.momentum_point = Some(x.clone());
        self.t = 1.0;
        Ok((state.param(x).cost(cost), None))
    }

    fn next_iter(
        &mut self, problem: &mut Problem<LeastSquares>, state: FistaState,
    ) -> Result<(FistaState, Option<KV>), Error> {
        let x = state.get_param().ok_or_else(|| OptError::NotInitialized {
            text: "solver state has no iterate".to_string(),
        })?;
        let cost = state.get_cost();
        let y = self.momentum_point.clone().unwrap_or_else(|| x.clone());

        let grad = problem.gradient(&y)?;
        let candidate = self.constraint.project((&y - &(grad * self.step)).view());
        let candidate_cost = problem.cost(&candidate)?;

        if self.t > 1.0 && candidate_cost > cost {
            self.momentum_point = Some(x.clone());
            self.t = 1.0;
            self.restarts += 1;
            return Ok((state, None));
        }

        let t_next = 0.5 * (1.0 + (1.0 + 4.0 * self.t * self.t).sqrt());
        let momentum = (self.t - 1.0) / t_next;
        self.momentum_point = Some(&candidate + &((&candidate - x) * momentum));
        self.t = t_next;
        Ok((state.param(candidate).cost(candidate_cost), None))
    }

    fn terminate(&mut self, state: &FistaState) -> TerminationStatus {
        let cost = state.get_cost();
        let cost_change = (cost - state.get_prev_cost()).abs();
        let cost_converged =
            self.tol_cost.is_some_and(|tol| cost_change <= tol * cost.abs().max(1.0));
        if last_step(state) <= self.tol_step || cost_converged {
            return TerminationStatus::Terminated(TerminationReason::SolverConverged);
        }
        TerminationStatus::NotTerminated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argmin::core::Executor;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests drive `ProjectedFista` through `argmin::core::Executor`
    // directly:
    // - Convergence status and feasibility on a simplex problem.
    // - The iteration cap surfacing as `MaxItersReached`.
    // - A missing starting point surfacing as an `OptError`.
    // -------------------------------------------------------------------------

    fn problem() -> LeastSquares {
        let x = array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [2.0, 0.5]];
        let y = array![0.3, 0.7, 1.0, 0.95];
        LeastSquares::new(x.view(), y.view()).unwrap()
    }

    fn solver(problem: &LeastSquares) -> ProjectedFista {
        let step = 1.0 / problem.lipschitz().unwrap();
        ProjectedFista::new(Constraint::Simplex, step, 1e-12, None)
    }

    #[test]
    // Purpose
    // -------
    // The executor stops on the step rule with a feasible iterate.
    //
    // Given
    // -----
    // - y = X [0.3, 0.7] with a well-conditioned two-column design.
    //
    // Expect
    // ------
    // - `SolverConverged`, weights on the simplex and close to [0.3, 0.7].
    fn executor_converges_on_simplex() {
        let ls = problem();
        let fista = solver(&ls);

        let result = Executor::new(ls, fista)
            .configure(|state| state.param(array![1.0, 0.0]).max_iters(10_000))
            .run()
            .unwrap();
        let state = result.state();

        assert_eq!(
            state.get_termination_status(),
            &TerminationStatus::Terminated(TerminationReason::SolverConverged)
        );
        let w = state.get_param().unwrap();
        assert!((w.sum() - 1.0).abs() < 1e-12);
        assert!(w.iter().all(|&v| v >= 0.0));
        assert!((w[0] - 0.3).abs() < 1e-6 && (w[1] - 0.7).abs() < 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // A one-iteration cap ends the run through argmin's own budget check.
    //
    // Expect
    // ------
    // - `MaxItersReached` after exactly one iteration.
    fn iteration_cap_is_reported_by_argmin() {
        let ls = problem();
        let fista = solver(&ls);

        let result = Executor::new(ls, fista)
            .configure(|state| state.param(array![1.0, 0.0]).max_iters(1))
            .run()
            .unwrap();
        let state = result.state();

        assert_eq!(state.get_iter(), 1);
        assert_eq!(
            state.get_termination_status(),
            &TerminationStatus::Terminated(TerminationReason::MaxItersReached)
        );
    }

    #[test]
    // Purpose
    // -------
    // Running without a starting point is an error that maps back to
    // `OptError` through the `argmin::core::Error` conversion.
    fn missing_start_maps_to_not_initialized() {
        let ls = problem();
        let fista = solver(&ls);

        let err = Executor::new(ls, fista).run().err().unwrap();

        assert!(matches!(OptError::from(err), OptError::NotInitialized { .. }));
    }
}
