//! Public configuration and outcome types for constrained least squares.
//!
//! - [`SolverOptions`]: stopping rules for the accelerated projected gradient.
//! - [`SolverOutcome`]: normalized result returned by [`minimize`](super::api::minimize).
//!
//! Convention: the solver *minimizes* the mean squared error
//! `c(w) = (1/n) ||y − X w||²` over the feasible set of a
//! [`Constraint`](super::constraints::Constraint).
use crate::optimization::{
    errors::OptResult,
    least_squares::{
        types::{Weights, DEFAULT_MAX_ITER, DEFAULT_TOL_STEP},
        validation::{verify_max_iter, verify_tol_cost, verify_tol_step},
    },
};

/// Stopping rules for the projected gradient loop.
///
/// Fields
/// ------
/// - `tol_step`: `f64`
///   Converged once `max_j |w_k[j] − w_{k−1}[j]| ≤ tol_step`.
/// - `tol_cost`: `Option<f64>`
///   Optional relative cost-change rule `|c_k − c_{k−1}| ≤ tol · max(1, |c_k|)`.
/// - `max_iter`: `usize`
///   Iteration budget; exhausting it is an error, not a silent return.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    pub tol_step: f64,
    pub tol_cost: Option<f64>,
    pub max_iter: usize,
}

impl SolverOptions {
    pub fn new(tol_step: f64, tol_cost: Option<f64>, max_iter: usize) -> OptResult<Self> {
        verify_tol_step(tol_step)?;
        verify_tol_cost(tol_cost)?;
        verify_max_iter(max_iter)?;
        Ok(Self { tol_step, tol_cost, max_iter })
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self { tol_step: DEFAULT_TOL_STEP, tol_cost: None, max_iter: DEFAULT_MAX_ITER }
    }
}

/// Result of a converged constrained least-squares solve.
///
/// Fields
/// ------
/// - `weights`: feasible minimizer.
/// - `value`: attained mean squared error.
/// - `iterations`: argmin iterations, discarded restart steps included.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutcome {
    pub weights: Weights,
    pub value: f64,
    pub iterations: usize,
}

impl SolverOutcome {
    pub fn new(weights: Weights, value: f64, iterations: usize) -> Self {
        Self { weights, value, iterations }
    }
}
