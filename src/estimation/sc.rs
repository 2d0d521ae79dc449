//! Synthetic control: `min ||y − Xw||²` over the probability simplex.
use crate::{
    estimation::{errors::EstimationResult, fit::Coefficients},
    optimization::least_squares::{minimize, Constraint, LeastSquares, SolverOptions, Weights},
};
use ndarray::{ArrayView1, ArrayView2};

pub fn fit_sc(
    y1: ArrayView1<f64>, y0: ArrayView2<f64>, solver: &SolverOptions, warm_start: Option<&Weights>,
) -> EstimationResult<Coefficients> {
    let problem = LeastSquares::new(y0, y1)?;
    let outcome = minimize(&problem, &Constraint::Simplex, warm_start, solver)?;
    Ok(Coefficients { weights: outcome.weights, intercept: 0.0 })
}
