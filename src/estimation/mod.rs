//! estimation — counterfactual estimators for a single treated unit.
//!
//! Purpose
//! -------
//! Turn a control panel `Y0` (`T × J`) and a treated series `Y1` (`T`) into
//! a counterfactual trajectory for the treated unit, using one of three
//! estimators selected by [`EstimationMethod`].
//!
//! Key behaviors
//! -------------
//! - `sc`: simplex-constrained weights (synthetic control).
//! - `did`: uniform weights plus a level shift (difference-in-differences).
//! - `classo`: ℓ1-ball weights plus a free intercept (constrained lasso),
//!   with the radius and intercept exposed via [`ClassoOptions`].
//! - [`estimate`] fits on a [`FitWindow`] and extends the fit to all `T`
//!   periods, returning a [`Fit`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `J ≥ 1`; a panel without controls is rejected with
//!   [`EstimationError::NoControlUnits`].
//! - Inputs must be finite; the estimators never impute.
//!
//! Conventions
//! -----------
//! - Rows are periods, columns are control units.
//! - Fits are pure functions of their inputs; nothing is cached between
//!   calls.
//!
//! Downstream usage
//! ----------------
//! - `inference::conformal` refits under imposed nulls with
//!   `FitWindow::Full`.
//! - `inference::ttest` uses pre-treatment fits and their post-period gaps.
//!
//! Testing notes
//! -------------
//! - Each estimator has local unit tests; `fit` tests cover validation,
//!   ATT computation and degenerate `classo` detection.

pub mod classo;
pub mod did;
pub mod errors;
pub mod fit;
pub mod method;
pub mod sc;

pub use self::errors::{EstimationError, EstimationResult};
pub use self::fit::{estimate, estimate_from, Coefficients, Fit};
pub use self::method::{ClassoOptions, EstimationMethod, EstimationOptions, FitWindow};
