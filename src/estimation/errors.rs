//! Error surface for the point estimators.
//!
//! Every failure raised while fitting a counterfactual is an
//! [`EstimationError`]. Solver failures keep the underlying [`OptError`] so
//! callers can distinguish non-convergence from malformed input.
use crate::optimization::errors::OptError;

pub type EstimationResult<T> = Result<T, EstimationError>;

/// EstimationError — failures of `sc`, `did` and `classo` fits.
///
/// Variants
/// --------
/// - `NoControlUnits`
///   The control panel has zero columns.
/// - `RowMismatch { rows, len }`
///   Control panel rows and treated-series length differ.
/// - `EmptyFitWindow { t0 }`
///   The fit window selects no rows (pre-treatment fit with `t0 = 0`).
/// - `InvalidSplit { t0, len }`
///   `t0` exceeds the number of periods.
/// - `NonFiniteData { index, value }`
///   NaN or ±∞ in the panel.
/// - `InvalidL1Bound { bound }`
///   The `classo` ℓ1 radius is not finite and positive.
/// - `UnknownMethod { name }`
///   Method name did not parse.
/// - `Solver(OptError)`
///   The constrained least-squares solver failed.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimationError {
    // ---- Input shape ----
    NoControlUnits,
    RowMismatch { rows: usize, len: usize },
    EmptyFitWindow { t0: usize },
    InvalidSplit { t0: usize, len: usize },
    NonFiniteData { index: usize, value: f64 },

    // ---- Configuration ----
    InvalidL1Bound { bound: f64 },
    UnknownMethod { name: String },

    // ---- Solver ----
    Solver(OptError),
}

impl std::error::Error for EstimationError {}

impl std::fmt::Display for EstimationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimationError::NoControlUnits => {
                write!(f, "Estimation Error: at least one control unit is required")
            }
            EstimationError::RowMismatch { rows, len } => write!(
                f,
                "Estimation Error: control panel has {rows} rows but treated series has {len}"
            ),
            EstimationError::EmptyFitWindow { t0 } => {
                write!(f, "Estimation Error: empty fit window (t0 = {t0})")
            }
            EstimationError::InvalidSplit { t0, len } => {
                write!(f, "Estimation Error: t0 = {t0} exceeds series length {len}")
            }
            EstimationError::NonFiniteData { index, value } => {
                write!(f, "Estimation Error: non-finite value {value} at flat index {index}")
            }
            EstimationError::InvalidL1Bound { bound } => {
                write!(f, "Estimation Error: l1 bound {bound} must be finite and > 0")
            }
            EstimationError::UnknownMethod { name } => {
                write!(f, "Estimation Error: unknown estimation method '{name}'")
            }
            EstimationError::Solver(err) => write!(f, "Estimation Error: {err}"),
        }
    }
}

impl From<OptError> for EstimationError {
    fn from(err: OptError) -> Self {
        EstimationError::Solver(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Solver failures are wrapped without losing the original variant.
    fn opt_error_is_wrapped() {
        let err: EstimationError = OptError::EmptyDesign.into();

        assert_eq!(err, EstimationError::Solver(OptError::EmptyDesign));
        assert!(err.to_string().contains("no columns"));
    }
}
