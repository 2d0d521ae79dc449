//! Shared type aliases and solver defaults for constrained least squares.
//!
//! Vectors live in `ndarray` so the solver can operate on views of the
//! panel without copying into another linear-algebra representation.
use ndarray::Array1;

/// Coefficient vector `w` (one entry per design column).
pub type Weights = Array1<f64>;

/// Gradient of the mean squared error with respect to `w`.
pub type Grad = Array1<f64>;

/// Scalar objective value (mean squared error).
pub type Cost = f64;

/// Default iteration budget for the accelerated projected gradient loop.
pub const DEFAULT_MAX_ITER: usize = 50_000;

/// Default max-norm tolerance on the change between successive iterates.
pub const DEFAULT_TOL_STEP: f64 = 1e-10;

/// Relative inflation applied to the Lipschitz constant to absorb rounding
/// error in the eigenvalue computation.
pub const LIPSCHITZ_SLACK: f64 = 1.0 + 1e-8;
