//! Unified error handling for inference routines.
//!
//! This module defines `InferenceError`, the error type used by the panel
//! container, the permutation/conformal engine, the t-test path and the
//! dispatcher. It groups input-shape failures, option validation and
//! wrapped estimator failures. An alias `InferenceResult<T>` standardizes
//! the return type across inference code.
use crate::estimation::errors::EstimationError;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};

pub type InferenceResult<T> = Result<T, InferenceError>;

/// Unified error type for inference routines.
///
/// Variants
/// --------
/// - `ShapeMismatch { what, expected, found }`
///   A length or row count disagrees with `T0 + T1`.
/// - `Estimation(EstimationError)`
///   The point estimator failed (no controls, solver non-convergence, ...).
/// - `InvalidK { k, t1, reason }`
///   Block count outside `[2, T1]` or a block would be empty.
/// - `UnsupportedMethod { name, reason }`
///   Unknown method name, or a method that the requested path cannot use.
/// - `InsufficientData { t0, t1, reason }`
///   Too few pre- or post-periods for the requested procedure.
/// - `InvalidAlpha`, `InvalidGrid`, `InvalidPermutationCount`,
///   `InvalidStatistic`, `NonFiniteData`
///   Option and data validation failures.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    // ---- Panel shape ----
    ShapeMismatch { what: &'static str, expected: usize, found: usize },
    InsufficientData { t0: usize, t1: usize, reason: &'static str },
    NonFiniteData { index: usize, value: f64 },

    // ---- Estimation ----
    Estimation(EstimationError),

    // ---- Method selection ----
    UnsupportedMethod { name: String, reason: &'static str },

    // ---- Options ----
    InvalidK { k: usize, t1: usize, reason: &'static str },
    InvalidAlpha { alpha: f64 },
    InvalidGrid { reason: &'static str },
    InvalidPermutationCount { n_perm: usize },
    InvalidStatistic { q: f64 },
}

impl std::error::Error for InferenceError {}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Panel shape ----
            InferenceError::ShapeMismatch { what, expected, found } => write!(
                f,
                "Inference Error: shape mismatch for {what} (expected {expected}, found {found})"
            ),
            InferenceError::InsufficientData { t0, t1, reason } => {
                write!(f, "Inference Error: insufficient data (T0 = {t0}, T1 = {t1}): {reason}")
            }
            InferenceError::NonFiniteData { index, value } => {
                write!(f, "Inference Error: non-finite value {value} at flat index {index}")
            }

            // ---- Estimation ----
            InferenceError::Estimation(err) => write!(f, "{err}"),

            // ---- Method selection ----
            InferenceError::UnsupportedMethod { name, reason } => {
                write!(f, "Inference Error: unsupported method '{name}': {reason}")
            }

            // ---- Options ----
            InferenceError::InvalidK { k, t1, reason } => {
                write!(f, "Inference Error: invalid K = {k} with T1 = {t1}: {reason}")
            }
            InferenceError::InvalidAlpha { alpha } => {
                write!(f, "Inference Error: alpha = {alpha} must lie in (0, 1)")
            }
            InferenceError::InvalidGrid { reason } => {
                write!(f, "Inference Error: invalid grid: {reason}")
            }
            InferenceError::InvalidPermutationCount { n_perm } => {
                write!(f, "Inference Error: n_perm = {n_perm} must be at least 1")
            }
            InferenceError::InvalidStatistic { q } => {
                write!(f, "Inference Error: statistic exponent q = {q} must be finite and > 0")
            }
        }
    }
}

impl From<EstimationError> for InferenceError {
    fn from(err: EstimationError) -> Self {
        match err {
            EstimationError::UnknownMethod { name } => InferenceError::UnsupportedMethod {
                name,
                reason: "Valid estimation methods are 'sc', 'did' and 'classo'.",
            },
            other => InferenceError::Estimation(other),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<InferenceError> for PyErr {
    fn from(err: InferenceError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
