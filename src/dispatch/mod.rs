//! dispatch — single entry point for synthetic-control inference.
//!
//! Purpose
//! -------
//! Validate a treated series and control panel, pick the estimator and
//! inference procedure named in [`InferenceOptions`], and return a uniform
//! [`InferenceOutcome`].
//!
//! Key behaviors
//! -------------
//! - `inference_method = ttest` → [`ttest`](crate::inference::ttest).
//! - `inference_method = conformal`, `ci = false` → conformal p-value for
//!   `theta0`.
//! - `inference_method = conformal`, `ci = true` → per-period conformal
//!   bounds over `ci_grid` (or an automatic grid).
//!
//! Conventions
//! -----------
//! - Argument order follows the keyword interface: `(Y1, Y0, T1, T0)`.
//! - The base random seed is resolved once per call; the moving-block
//!   scheme never consumes it.

pub mod options;
pub mod outcome;

pub use self::options::{InferenceMethod, InferenceOptions};
pub use self::outcome::InferenceOutcome;

use crate::{
    inference::{
        conformal::{conformal_interval, conformal_p_value},
        errors::InferenceResult,
        permutation::{base_seed, stream_rng},
        ttest::ttest,
    },
    panel::PanelData,
};
use ndarray::{ArrayView1, ArrayView2};

/// Run the inference procedure selected by `opts`.
///
/// Parameters
/// ----------
/// - `y1`: `ArrayView1<f64>`
///   Treated series, length `T0 + T1`.
/// - `y0`: `ArrayView2<f64>`
///   Control panel, `(T0 + T1) × J`.
/// - `t1`, `t0`: `usize`
///   Post- and pre-treatment period counts.
/// - `opts`: [`InferenceOptions`]
///
/// Returns
/// -------
/// - `InferenceResult<InferenceOutcome>`
///
/// Errors
/// ------
/// - Panel validation errors (`ShapeMismatch`, `InsufficientData`,
///   `NonFiniteData`).
/// - `Estimation` when the estimator fails (including `J = 0`).
/// - `InvalidK` / `UnsupportedMethod` from the t-test path.
pub fn infer(
    y1: ArrayView1<f64>, y0: ArrayView2<f64>, t1: usize, t0: usize, opts: &InferenceOptions,
) -> InferenceResult<InferenceOutcome> {
    let panel = PanelData::new(y1.to_owned(), y0.to_owned(), t0, t1)?;
    log::debug!(
        "infer: {:?} with {} on T0 = {t0}, T1 = {t1}, J = {}",
        opts.inference_method,
        opts.estimation.method,
        panel.n_controls()
    );

    match opts.inference_method {
        InferenceMethod::TTest => {
            Ok(InferenceOutcome::TTest(ttest(&panel, &opts.estimation, &opts.ttest)?))
        }
        InferenceMethod::Conformal => {
            let seed = base_seed(opts.random_seed);
            if opts.ci {
                let ci = conformal_interval(
                    &panel,
                    opts.ci_grid.as_deref(),
                    &opts.estimation,
                    &opts.conformal,
                    seed,
                )?;
                Ok(InferenceOutcome::Interval(ci))
            } else {
                let mut rng = stream_rng(seed, 0);
                let p_val = conformal_p_value(
                    &panel,
                    opts.theta0,
                    &opts.estimation,
                    &opts.conformal,
                    &mut rng,
                )?;
                Ok(InferenceOutcome::PValue { p_val })
            }
        }
    }
}
