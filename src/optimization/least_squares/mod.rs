//! least_squares — constrained least squares by accelerated projected gradient.
//!
//! Purpose
//! -------
//! Solve `min_w (1/n) ||y − X w||²` subject to `w` lying in a simple convex
//! set (probability simplex or ℓ1 ball). These are the inner problems of the
//! synthetic control and constrained lasso estimators.
//!
//! Key behaviors
//! -------------
//! - [`LeastSquares`] stores `XᵀX/n`, `Xᵀy/n`, `yᵀy/n` and implements
//!   `argmin`'s `CostFunction` and `Gradient` traits.
//! - [`Constraint`] provides exact Euclidean projections.
//! - [`ProjectedFista`] is an `argmin` solver: FISTA with function-value
//!   restart and step `1/L`.
//! - [`minimize`] drives it through `argmin::core::Executor`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite; enforced in [`LeastSquares::new`].
//! - Returned weights are always feasible (they are the output of a
//!   projection).
//! - Exhausting `max_iter` is reported as `OptError::NotConverged`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover projections, cost/gradient agreement, closed-form
//!   solutions on orthogonal designs and exact recovery on the simplex.

pub mod api;
pub mod constraints;
pub mod fista;
pub mod problem;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

pub use self::api::minimize;
pub use self::constraints::{project_l1_ball, project_simplex, Constraint};
pub use self::fista::ProjectedFista;
pub use self::problem::LeastSquares;
pub use self::traits::{SolverOptions, SolverOutcome};
pub use self::types::{Cost, Grad, Weights};

pub mod prelude {
    pub use super::api::minimize;
    pub use super::constraints::Constraint;
    pub use super::problem::LeastSquares;
    pub use super::traits::{SolverOptions, SolverOutcome};
}
