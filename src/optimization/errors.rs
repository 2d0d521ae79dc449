//! optimization::errors — unified error surface for the projected solvers.
//!
//! Every failure raised while configuring or running the constrained
//! least-squares machinery is expressed as an [`OptError`]. Backend errors
//! surfaced through `argmin`'s trait objects are downcast into the matching
//! variant so that callers never see raw `argmin::core::Error` values.
use argmin::core::{ArgminError, Error};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Problem construction ----
    /// Design matrix has no columns.
    EmptyDesign,

    /// Design matrix has no rows.
    EmptySample,

    /// Rows of the design matrix and length of the response differ.
    DimMismatch {
        rows: usize,
        response: usize,
    },

    /// Starting point length does not match the number of columns.
    StartDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Design or response contains a non-finite value.
    NonFiniteInput {
        index: usize,
        value: f64,
    },

    // ---- SolverOptions ----
    /// Step tolerance needs to be positive and finite.
    InvalidTolStep {
        tol: f64,
        reason: &'static str,
    },
    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },

    // ---- Constraints ----
    /// ℓ1 radius needs to be positive and finite.
    InvalidRadius {
        radius: f64,
    },

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    /// Lipschitz constant of the gradient could not be determined.
    InvalidLipschitz {
        value: f64,
    },

    // ---- Optimizer outcome ----
    /// Iteration budget exhausted before the stopping rule was met.
    NotConverged {
        iterations: usize,
        last_step: f64,
    },

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Problem construction ----
            OptError::EmptyDesign => write!(f, "Design matrix has no columns"),
            OptError::EmptySample => write!(f, "Design matrix has no rows"),
            OptError::DimMismatch { rows, response } => {
                write!(f, "Design has {rows} rows but the response has length {response}")
            }
            OptError::StartDimMismatch { expected, found } => {
                write!(f, "Starting point dimension mismatch: expected {expected}, found {found}")
            }
            OptError::NonFiniteInput { index, value } => {
                write!(f, "Non-finite input at flat index {index}: {value}")
            }

            // ---- SolverOptions ----
            OptError::InvalidTolStep { tol, reason } => {
                write!(f, "Invalid step tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost function change tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }

            // ---- Constraints ----
            OptError::InvalidRadius { radius } => {
                write!(f, "Invalid l1 radius {radius}: must be finite and > 0")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }
            OptError::InvalidLipschitz { value } => {
                write!(f, "Invalid gradient Lipschitz constant: {value}")
            }

            // ---- Optimizer outcome ----
            OptError::NotConverged { iterations, last_step } => {
                write!(
                    f,
                    "Solver did not converge after {iterations} iterations \
                     (last step {last_step:e})"
                )
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => write!(f, "Invalid parameter: {text}"),
            OptError::NotImplemented { text } => write!(f, "Not implemented: {text}"),
            OptError::NotInitialized { text } => write!(f, "Not initialized: {text}"),
            OptError::ConditionViolated { text } => write!(f, "Condition violated: {text}"),
            OptError::PotentialBug { text } => write!(f, "Potential bug: {text}"),
            OptError::BackendError { text } => write!(f, "Backend error: {text}"),

            // ---- Fallback ----
            OptError::UnknownError => write!(f, "Unknown error"),
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        match original_err.downcast::<OptError>() {
            Ok(opt_err) => opt_err,
            Err(err) => match err.downcast::<ArgminError>() {
                Ok(argmin_err) => match argmin_err {
                    ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                    ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                    ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                    ArgminError::ConditionViolated { text } => {
                        OptError::ConditionViolated { text }
                    }
                    ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                    _ => OptError::UnknownError,
                },
                Err(err) => OptError::BackendError { text: err.to_string() },
            },
        }
    }
}
