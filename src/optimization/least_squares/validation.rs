//! Input guards for the constrained least-squares solver.
//!
//! These helpers keep option and data checks in one place so that
//! [`SolverOptions::new`](super::traits::SolverOptions::new) and
//! [`LeastSquares::new`](super::problem::LeastSquares::new) report
//! failures through [`OptError`] instead of panicking inside the loop.
use crate::optimization::errors::{OptError, OptResult};
use ndarray::{ArrayView1, ArrayView2};

pub fn verify_tol_step(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidTolStep { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidTolStep { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

pub fn verify_max_iter(max_iter: usize) -> OptResult<()> {
    if max_iter == 0 {
        return Err(OptError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

/// Check shapes and finiteness of a design/response pair.
///
/// Errors
/// ------
/// - `OptError::EmptySample` / `OptError::EmptyDesign` for zero rows/columns.
/// - `OptError::DimMismatch` when `x.nrows() != y.len()`.
/// - `OptError::NonFiniteInput` for the first NaN/±∞ found (design entries are
///   indexed row-major, response entries follow after the design).
pub fn validate_design(x: &ArrayView2<f64>, y: &ArrayView1<f64>) -> OptResult<()> {
    if x.nrows() == 0 {
        return Err(OptError::EmptySample);
    }
    if x.ncols() == 0 {
        return Err(OptError::EmptyDesign);
    }
    if x.nrows() != y.len() {
        return Err(OptError::DimMismatch { rows: x.nrows(), response: y.len() });
    }
    for (index, &value) in x.iter().chain(y.iter()).enumerate() {
        if !value.is_finite() {
            return Err(OptError::NonFiniteInput { index, value });
        }
    }
    Ok(())
}

pub fn validate_cost(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}
