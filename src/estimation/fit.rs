//! Fitted counterfactuals and the `estimate` entry point.
//!
//! Purpose
//! -------
//! Fit one of the three estimators on a window of the panel and extend the
//! fitted relationship to every period, producing the counterfactual
//! trajectory of the treated unit and its average post-period effect.
//!
//! Key behaviors
//! -------------
//! - Inputs are validated once (control count, row agreement, split,
//!   finiteness) before any solver is run.
//! - The fit window is either the pre-treatment rows or the full sample
//!   ([`FitWindow`]); the counterfactual always covers all `T` periods.
//! - `classo` fits whose weights collapse to zero are flagged through
//!   [`Fit::is_degenerate`]. [`estimate`] logs them at `warn` level;
//!   [`estimate_from`], the repeated-refit path, only at `debug` and leaves
//!   the warning to its caller.
//!
//! Invariants & assumptions
//! ------------------------
//! - `sc` weights are non-negative and sum to one.
//! - `did` weights are `1/J`; its intercept is the mean window gap.
//! - `att` is the mean of `Y1 − cf` over the post periods; it is NaN when
//!   `t0 == T`.
use crate::{
    estimation::{
        classo::fit_classo,
        did::fit_did,
        errors::{EstimationError, EstimationResult},
        method::{EstimationMethod, EstimationOptions, FitWindow},
        sc::fit_sc,
    },
    optimization::least_squares::Weights,
};
use ndarray::{s, Array1, ArrayView1, ArrayView2};

/// Raw estimator output before it is extended to the full sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficients {
    pub weights: Weights,
    pub intercept: f64,
}

/// A fitted counterfactual for the treated unit.
///
/// Fields
/// ------
/// - `method`: estimator that produced the fit.
/// - `window`: rows the estimator was fit on.
/// - `weights`: one weight per control unit.
/// - `intercept`: level shift added to `Y0 @ w`.
/// - `counterfactual`: `intercept + Y0 @ w` for all `T` periods.
/// - `att`: mean post-period gap between the treated series and
///   `counterfactual`.
/// - `t0`: number of pre-treatment periods.
#[derive(Debug, Clone, PartialEq)]
pub struct Fit {
    pub method: EstimationMethod,
    pub window: FitWindow,
    pub weights: Weights,
    pub intercept: f64,
    pub counterfactual: Array1<f64>,
    pub att: f64,
    pub t0: usize,
}

impl Fit {
    /// Per-period gaps `Y1 − cf` over the whole sample.
    pub fn effects(&self, y1: ArrayView1<f64>) -> Array1<f64> {
        &y1 - &self.counterfactual
    }

    /// Per-period gaps over the post periods only.
    pub fn post_effects(&self, y1: ArrayView1<f64>) -> Array1<f64> {
        &y1.slice(s![self.t0..]) - &self.counterfactual.slice(s![self.t0..])
    }

    /// True when every weight is zero, so the counterfactual is the intercept.
    pub fn is_degenerate(&self) -> bool {
        self.weights.iter().all(|w| w.abs() <= f64::EPSILON)
    }
}

/// Fit `opts.method` on `window` and build the full-sample counterfactual.
///
/// Parameters
/// ----------
/// - `y1`: `ArrayView1<f64>`
///   Treated series of length `T`.
/// - `y0`: `ArrayView2<f64>`
///   Control panel, `T × J`.
/// - `t0`: `usize`
///   Number of pre-treatment periods.
/// - `window`: [`FitWindow`]
/// - `opts`: [`EstimationOptions`]
///
/// Errors
/// ------
/// - `EstimationError::NoControlUnits` when `J = 0`.
/// - `EstimationError::RowMismatch`, `InvalidSplit`, `EmptyFitWindow`,
///   `NonFiniteData` for malformed inputs.
/// - `EstimationError::Solver` when the constrained solver fails.
pub fn estimate(
    y1: ArrayView1<f64>, y0: ArrayView2<f64>, t0: usize, window: FitWindow,
    opts: &EstimationOptions,
) -> EstimationResult<Fit> {
    let fit = estimate_from(y1, y0, t0, window, opts, None)?;
    if fit.method == EstimationMethod::Classo && fit.is_degenerate() {
        log::warn!("classo fit returned all-zero weights; counterfactual is the intercept only");
    }
    Ok(fit)
}

/// [`estimate`] with an optional solver starting point (ignored by `did`).
///
/// Used for repeated refits; degenerate `classo` weights are logged at
/// `debug` level only.
pub fn estimate_from(
    y1: ArrayView1<f64>, y0: ArrayView2<f64>, t0: usize, window: FitWindow,
    opts: &EstimationOptions, warm_start: Option<&Weights>,
) -> EstimationResult<Fit> {
    validate_inputs(y1, y0, t0)?;
    let rows = window.rows(t0, y1.len());
    if rows == 0 {
        return Err(EstimationError::EmptyFitWindow { t0 });
    }

    let y1_win = y1.slice(s![..rows]);
    let y0_win = y0.slice(s![..rows, ..]);
    let coef = match opts.method {
        EstimationMethod::Sc => fit_sc(y1_win, y0_win, &opts.solver, warm_start)?,
        EstimationMethod::Did => fit_did(y1_win, y0_win),
        EstimationMethod::Classo => {
            fit_classo(y1_win, y0_win, &opts.classo, &opts.solver, warm_start)?
        }
    };

    let counterfactual = y0.dot(&coef.weights) + coef.intercept;
    let att = (&y1.slice(s![t0..]) - &counterfactual.slice(s![t0..])).mean().unwrap_or(f64::NAN);
    let fit = Fit {
        method: opts.method,
        window,
        weights: coef.weights,
        intercept: coef.intercept,
        counterfactual,
        att,
        t0,
    };

    if fit.method == EstimationMethod::Classo && fit.is_degenerate() {
        log::debug!("classo fit on {rows} rows returned all-zero weights");
    }
    log::debug!("{} fit on {rows} rows: att = {:.6}", fit.method, fit.att);
    Ok(fit)
}

fn validate_inputs(y1: ArrayView1<f64>, y0: ArrayView2<f64>, t0: usize) -> EstimationResult<()> {
    if y0.ncols() == 0 {
        return Err(EstimationError::NoControlUnits);
    }
    if y0.nrows() != y1.len() {
        return Err(EstimationError::RowMismatch { rows: y0.nrows(), len: y1.len() });
    }
    if t0 > y1.len() {
        return Err(EstimationError::InvalidSplit { t0, len: y1.len() });
    }
    for (index, &value) in y0.iter().chain(y1.iter()).enumerate() {
        if !value.is_finite() {
            return Err(EstimationError::NonFiniteData { index, value });
        }
    }
    Ok(())
}
