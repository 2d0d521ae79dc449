//! Quadratic form of the mean squared error and its argmin adapters.
//!
//! The design enters only through its sufficient statistics
//! `G = XᵀX / n`, `b = Xᵀy / n` and `c = yᵀy / n`, so each solver
//! iteration costs `O(J²)` regardless of the number of rows:
//!
//! - cost      `f(w) = wᵀGw − 2 wᵀb + c`
//! - gradient  `∇f(w) = 2 (Gw − b)`
//!
//! The gradient is Lipschitz with constant `2 λ_max(G)`, which is computed
//! once through `nalgebra`'s symmetric eigen-solver and fixes the step size
//! of the projected gradient loop.
use crate::optimization::{
    errors::{OptError, OptResult},
    least_squares::{
        types::{Cost, Grad, Weights, LIPSCHITZ_SLACK},
        validation::{validate_cost, validate_design},
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Sufficient statistics of a least-squares problem `min (1/n) ||y − Xw||²`.
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquares {
    gram: Array2<f64>,
    xty: Array1<f64>,
    yty: f64,
}

impl LeastSquares {
    /// Build the problem from a design `x` (`n × J`) and response `y` (`n`).
    ///
    /// Errors
    /// ------
    /// - Any failure from [`validate_design`].
    pub fn new(x: ArrayView2<f64>, y: ArrayView1<f64>) -> OptResult<Self> {
        validate_design(&x, &y)?;
        let n = x.nrows() as f64;
        let gram = x.t().dot(&x) / n;
        let xty = x.t().dot(&y) / n;
        let yty = y.dot(&y) / n;
        Ok(Self { gram, xty, yty })
    }

    /// Number of coefficients `J`.
    pub fn dim(&self) -> usize {
        self.xty.len()
    }

    pub fn value(&self, w: &Weights) -> Cost {
        let gw = self.gram.dot(w);
        w.dot(&gw) - 2.0 * w.dot(&self.xty) + self.yty
    }

    pub fn grad(&self, w: &Weights) -> Grad {
        (self.gram.dot(w) - &self.xty) * 2.0
    }

    /// Lipschitz constant `2 λ_max(G)` of the gradient, slightly inflated.
    ///
    /// Errors
    /// ------
    /// - `OptError::InvalidLipschitz` if the eigenvalues are not finite.
    pub fn lipschitz(&self) -> OptResult<f64> {
        let j = self.dim();
        let gram = DMatrix::from_fn(j, j, |r, c| self.gram[[r, c]]);
        let lambda_max =
            gram.symmetric_eigenvalues().iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let value = 2.0 * lambda_max.max(0.0) * LIPSCHITZ_SLACK;
        if !value.is_finite() {
            return Err(OptError::InvalidLipschitz { value });
        }
        Ok(value)
    }
}

impl CostFunction for LeastSquares {
    type Param = Weights;
    type Output = Cost;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output, Error> {
        if param.len() != self.dim() {
            return Err(OptError::StartDimMismatch { expected: self.dim(), found: param.len() }
                .into());
        }
        let value = self.value(param);
        validate_cost(value)?;
        Ok(value)
    }
}

impl Gradient for LeastSquares {
    type Param = Weights;
    type Gradient = Grad;

    fn gradient(&self, param: &Self::Param) -> Result<Self::Gradient, Error> {
        if param.len() != self.dim() {
            return Err(OptError::StartDimMismatch { expected: self.dim(), found: param.len() }
                .into());
        }
        Ok(self.grad(param))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of the sufficient-statistic cost with a direct residual
    //   computation.
    // - Finite-difference agreement of the analytic gradient.
    // - Lipschitz constant on a diagonal design.
    // - Dimension errors surfacing through the argmin traits.
    // -------------------------------------------------------------------------

    fn toy() -> (Array2<f64>, Array1<f64>) {
        let x = array![[1.0, 0.5], [0.0, 2.0], [3.0, -1.0], [1.5, 1.5]];
        let y = array![1.0, -2.0, 0.5, 3.0];
        (x, y)
    }

    #[test]
    // Purpose
    // -------
    // The quadratic form must equal (1/n)||y − Xw||² exactly.
    fn value_matches_direct_mse() {
        let (x, y) = toy();
        let problem = LeastSquares::new(x.view(), y.view()).unwrap();
        let w = array![0.3, -0.7];

        let resid = &y - &x.dot(&w);
        let direct = resid.dot(&resid) / y.len() as f64;

        assert_relative_eq!(problem.cost(&w).unwrap(), direct, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Central finite differences of the cost agree with the analytic gradient.
    fn gradient_matches_finite_differences() {
        let (x, y) = toy();
        let problem = LeastSquares::new(x.view(), y.view()).unwrap();
        let w = array![0.2, 0.4];
        let h = 1e-6;

        let g = problem.gradient(&w).unwrap();

        for j in 0..2 {
            let mut up = w.clone();
            let mut dn = w.clone();
            up[j] += h;
            dn[j] -= h;
            let fd = (problem.value(&up) - problem.value(&dn)) / (2.0 * h);
            assert_relative_eq!(g[j], fd, epsilon = 1e-6);
        }
    }

    #[test]
    // Purpose
    // -------
    // For X = diag(2, 1) stacked with zero rows the Gram matrix is diagonal,
    // so L = 2 · max eigenvalue is known in closed form.
    //
    // Given
    // -----
    // - n = 2, X = [[2, 0], [0, 1]] so G = diag(2, 0.5).
    //
    // Expect
    // ------
    // - L ≈ 4.
    fn lipschitz_on_diagonal_design() {
        let x = array![[2.0, 0.0], [0.0, 1.0]];
        let y = array![0.0, 0.0];
        let problem = LeastSquares::new(x.view(), y.view()).unwrap();

        assert_relative_eq!(problem.lipschitz().unwrap(), 4.0, max_relative = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // A wrong-length parameter is reported as `StartDimMismatch` after the
    // round trip through `argmin::core::Error`.
    fn cost_rejects_wrong_dimension() {
        let (x, y) = toy();
        let problem = LeastSquares::new(x.view(), y.view()).unwrap();

        let err = problem.cost(&array![1.0, 2.0, 3.0]).unwrap_err();

        assert_eq!(OptError::from(err), OptError::StartDimMismatch { expected: 2, found: 3 });
    }
}
