//! inference — conformal permutation tests, confidence sets, and t-tests.
//!
//! Purpose
//! -------
//! Quantify uncertainty about the treatment effect of a single treated unit
//! once a counterfactual estimator has been chosen. Two families are
//! provided: permutation-based conformal inference (exact under
//! exchangeability of the residuals) and a block t-test for designs with
//! many post periods.
//!
//! Key behaviors
//! -------------
//! - [`residuals`](residuals::residuals) and
//!   [`impose_null`](residuals::impose_null) turn a hypothesized effect into
//!   the residual sequence under the null.
//! - [`PermutationScheme`] builds the reference distribution (moving block
//!   or IID) and [`p_value`] compares the observed [`TestStatistic`] to it.
//! - [`conformal_p_value`] and [`conformal_interval`] refit the estimator
//!   under each null and invert the test over a grid.
//! - [`ttest`] produces `{att, se, lb, ub}` with a [`BlockVariance`]
//!   estimator and a Student-t critical value.
//!
//! Invariants & assumptions
//! ------------------------
//! - p-values lie in `(0, 1]`.
//! - Randomness is confined to the IID scheme and threaded through explicit
//!   `StdRng` streams derived from a base seed.
//! - Saturated or empty confidence sets are data ([`BoundFlags`]), never
//!   errors.
//!
//! Conventions
//! -----------
//! - Post-period windows are indexed on the full `0..T` time axis.
//! - All fallible routines return [`InferenceResult`].
//! - Warnings about confidence sets go through `log::warn!`.
//!
//! Downstream usage
//! ----------------
//! - `dispatch::infer` selects between these entry points from string
//!   options; Rust callers may use them directly with a [`PanelData`]
//!   (see `crate::panel`).
//!
//! Testing notes
//! -------------
//! - Unit tests check hand-computed p-values, bound flags, alpha
//!   monotonicity and t-test arithmetic. End-to-end scenarios live in
//!   `tests/`.
//!
//! [`PanelData`]: crate::panel::PanelData

pub mod conformal;
pub mod errors;
pub mod permutation;
pub mod residuals;
pub mod statistic;
pub mod ttest;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::conformal::{
    conformal_interval, conformal_p_value, default_grid, BoundFlags, ConformalInterval,
    ConformalOptions,
};
pub use self::errors::{InferenceError, InferenceResult};
pub use self::permutation::{base_seed, p_value, stream_rng, PermutationScheme};
pub use self::residuals::{impose_null, residuals};
pub use self::statistic::TestStatistic;
pub use self::ttest::{ttest, BlockVariance, TTestOptions, TTestResult};

pub mod prelude {
    pub use super::conformal::{conformal_interval, conformal_p_value, ConformalOptions};
    pub use super::errors::{InferenceError, InferenceResult};
    pub use super::permutation::PermutationScheme;
    pub use super::statistic::TestStatistic;
    pub use super::ttest::{ttest, BlockVariance, TTestOptions};
}
