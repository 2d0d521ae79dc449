//! optimization — constrained least-squares solvers and their error surface.
//!
//! Purpose
//! -------
//! Provide the numerical core behind every weight-based estimator: a
//! projected, accelerated gradient solver for least squares over the
//! probability simplex or an ℓ1 ball, plus a single error/result surface.
//!
//! Key behaviors
//! -------------
//! - `least_squares`: problem construction from a design/response pair,
//!   exact projections, and the FISTA solver run through `argmin`'s
//!   `Executor`.
//! - `errors`: [`OptError`](errors::OptError) with conversions from
//!   `argmin::core::Error`.
//!
//! Conventions
//! -----------
//! - All solvers *minimize* a mean squared error; estimators above this
//!   layer never see raw `argmin` errors.
//! - Weights and designs are `ndarray` types; `nalgebra` is used only for
//!   the symmetric eigenvalue problem that sets the step size.
//! - Progress is reported at `debug` level through the `log` facade.
//!
//! Downstream usage
//! ----------------
//! - `estimation::sc` minimizes over [`Constraint::Simplex`](least_squares::Constraint).
//! - `estimation::classo` minimizes over an ℓ1 ball after centering.

pub mod errors;
pub mod least_squares;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::least_squares::prelude::*;
}
