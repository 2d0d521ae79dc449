//! Difference-in-differences: uniform weights plus a level shift.
//!
//! The counterfactual is `cf_t = mean_j Y0[t, j] + a`, where `a` is the mean
//! of `Y1 − rowmean(Y0)` over the fit window. No optimization is involved.
use crate::estimation::fit::Coefficients;
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};

pub fn fit_did(y1: ArrayView1<f64>, y0: ArrayView2<f64>) -> Coefficients {
    let j = y0.ncols();
    let row_means = row_means(y0);
    let gaps = &y1 - &row_means;
    let intercept = gaps.mean().unwrap_or(0.0);
    Coefficients { weights: Array1::from_elem(j, 1.0 / j as f64), intercept }
}

/// Row means of the control panel (one per period).
pub(crate) fn row_means(y0: ArrayView2<f64>) -> Array1<f64> {
    y0.sum_axis(Axis(1)) / y0.ncols() as f64
}
