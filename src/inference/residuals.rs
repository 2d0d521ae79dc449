//! Residuals under a hypothesized constant treatment effect.
//!
//! For a null `H0: θ = θ0` the post-period outcomes are shifted by `θ0`
//! before comparison with the counterfactual:
//!
//! - `u[t] = Y1[t] − cf[t]`        for `t < T0`
//! - `u[t] = Y1[t] − cf[t] − θ0`   for `t ≥ T0`
use ndarray::{s, Array1, ArrayView1};

/// Residual sequence implied by `theta0` (length `T`).
pub fn residuals(
    y1: ArrayView1<f64>, counterfactual: ArrayView1<f64>, t0: usize, theta0: f64,
) -> Array1<f64> {
    let mut u = &y1 - &counterfactual;
    u.slice_mut(s![t0..]).mapv_inplace(|v| v - theta0);
    u
}

/// Treated series with `theta0` removed from the post periods.
pub fn impose_null(y1: ArrayView1<f64>, t0: usize, theta0: f64) -> Array1<f64> {
    let mut y = y1.to_owned();
    y.slice_mut(s![t0..]).mapv_inplace(|v| v - theta0);
    y
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Only post-period residuals are shifted by theta0.
    //
    // Given
    // -----
    // - Y1 = [1, 2, 5, 6], cf = [1, 1, 1, 1], T0 = 2, θ0 = 3.
    //
    // Expect
    // ------
    // - u = [0, 1, 1, 2].
    fn residuals_shift_post_periods() {
        let y1 = array![1.0, 2.0, 5.0, 6.0];
        let cf = array![1.0, 1.0, 1.0, 1.0];

        let u = residuals(y1.view(), cf.view(), 2, 3.0);

        assert_eq!(u, array![0.0, 1.0, 1.0, 2.0]);
    }

    #[test]
    // Purpose
    // -------
    // Residuals of the null-imposed series with θ0 = 0 equal the residuals of
    // the original series under θ0.
    fn impose_null_matches_residual_shift() {
        let y1 = array![1.0, 2.0, 5.0, 6.0];
        let cf = array![0.5, 1.5, 2.5, 3.5];

        let shifted = impose_null(y1.view(), 2, 3.0);

        assert_eq!(
            residuals(shifted.view(), cf.view(), 2, 0.0),
            residuals(y1.view(), cf.view(), 2, 3.0)
        );
        assert_eq!(shifted, array![1.0, 2.0, 2.0, 3.0]);
    }
}
