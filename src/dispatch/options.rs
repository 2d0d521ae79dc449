//! Top-level configuration for [`infer`](super::infer).
//!
//! [`InferenceOptions`] bundles the estimator, conformal and t-test option
//! structs together with the call-level settings (`theta0`, `ci`, grid,
//! seed). [`InferenceOptions::new`] mirrors the keyword interface, parsing
//! method names and validating every numeric setting. The `with_*` methods
//! select the secondary choices (block variance, test statistic, refit
//! window) by name.
use crate::{
    estimation::{EstimationMethod, EstimationOptions, FitWindow},
    inference::{
        conformal::ConformalOptions,
        errors::{InferenceError, InferenceResult},
        permutation::PermutationScheme,
        statistic::TestStatistic,
        ttest::{BlockVariance, TTestOptions},
    },
};
use std::str::FromStr;

/// Inference family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InferenceMethod {
    #[default]
    Conformal,
    TTest,
}

impl FromStr for InferenceMethod {
    type Err = InferenceError;

    /// Parse `"conformal"` or `"ttest"` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conformal" => Ok(InferenceMethod::Conformal),
            "ttest" => Ok(InferenceMethod::TTest),
            _ => Err(InferenceError::UnsupportedMethod {
                name: s.to_string(),
                reason: "Valid inference methods are 'conformal' and 'ttest'.",
            }),
        }
    }
}

/// All settings of one inference call.
///
/// Fields
/// ------
/// - `estimation`: estimator, `classo` options and solver tolerances.
/// - `inference_method`: conformal (default) or t-test.
/// - `conformal`: alpha, permutation scheme, statistic, fit window, grid.
/// - `ttest`: block count `K`, alpha, block variance.
/// - `theta0`: null value for the conformal p-value (default 0).
/// - `ci`: build per-period conformal bounds instead of a p-value.
/// - `ci_grid`: candidate effects for the bounds; `None` builds one.
/// - `random_seed`: base seed for IID draws; `None` draws one from the OS.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InferenceOptions {
    pub estimation: EstimationOptions,
    pub inference_method: InferenceMethod,
    pub conformal: ConformalOptions,
    pub ttest: TTestOptions,
    pub theta0: f64,
    pub ci: bool,
    pub ci_grid: Option<Vec<f64>>,
    pub random_seed: Option<u64>,
}

impl InferenceOptions {
    /// Build options from the keyword interface.
    ///
    /// Errors
    /// ------
    /// - `InferenceError::UnsupportedMethod` for unknown method names.
    /// - `InferenceError::InvalidAlpha`, `InvalidPermutationCount`,
    ///   `InvalidK` (K < 2), `InvalidGrid` or `NonFiniteData` (theta0) for
    ///   invalid settings.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        estimation_method: &str, inference_method: &str, permutation_method: &str, theta0: f64,
        n_perm: usize, ci: bool, ci_grid: Option<Vec<f64>>, k: usize, alpha: f64,
        random_seed: Option<u64>,
    ) -> InferenceResult<Self> {
        let method = EstimationMethod::from_str(estimation_method)?;
        let inference_method = InferenceMethod::from_str(inference_method)?;
        let scheme = PermutationScheme::from_name(permutation_method, n_perm)?;
        if !theta0.is_finite() {
            return Err(InferenceError::NonFiniteData { index: 0, value: theta0 });
        }
        if let Some(grid) = &ci_grid {
            if grid.is_empty() {
                return Err(InferenceError::InvalidGrid { reason: "Grid must not be empty." });
            }
            if grid.iter().any(|v| !v.is_finite()) {
                return Err(InferenceError::InvalidGrid { reason: "Grid values must be finite." });
            }
        }

        let defaults = ConformalOptions::default();
        let conformal =
            ConformalOptions::new(alpha, scheme, defaults.statistic, defaults.fit_window)?;
        let ttest = TTestOptions::new(k, alpha, TTestOptions::default().variance)?;

        Ok(Self {
            estimation: EstimationOptions::for_method(method),
            inference_method,
            conformal,
            ttest,
            theta0,
            ci,
            ci_grid,
            random_seed,
        })
    }

    /// Select the t-test block variance: `"post_blocks"` or `"cross_fit"`.
    pub fn with_block_variance(mut self, name: &str) -> InferenceResult<Self> {
        self.ttest.variance = BlockVariance::from_str(name)?;
        Ok(self)
    }

    /// Use the `S_q` statistic for `Some(q)` and the mean absolute residual
    /// for `None`.
    pub fn with_statistic(mut self, q: Option<f64>) -> InferenceResult<Self> {
        self.conformal.statistic = match q {
            Some(q) => TestStatistic::lq(q)?,
            None => TestStatistic::MeanAbsolute,
        };
        Ok(self)
    }

    /// Select the window the conformal test refits on: `"full"` or `"pre"`.
    pub fn with_fit_window(mut self, name: &str) -> InferenceResult<Self> {
        self.conformal.fit_window = match name.to_lowercase().as_str() {
            "full" => FitWindow::Full,
            "pre" | "pre_treatment" => FitWindow::PreTreatment,
            _ => {
                return Err(InferenceError::UnsupportedMethod {
                    name: name.to_string(),
                    reason: "Valid fit windows are 'full' and 'pre'.",
                });
            }
        };
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // The keyword constructor parses every method name and carries the
    // numeric settings into the nested option structs.
    fn new_parses_keyword_interface() {
        let opts =
            InferenceOptions::new("did", "ttest", "iid", 0.5, 200, false, None, 3, 0.05, Some(9))
                .unwrap();

        assert_eq!(opts.estimation.method, EstimationMethod::Did);
        assert_eq!(opts.inference_method, InferenceMethod::TTest);
        assert_eq!(opts.conformal.scheme, PermutationScheme::Iid { n_perm: 200 });
        assert_eq!(opts.conformal.alpha, 0.05);
        assert_eq!(opts.ttest.k, 3);
        assert_eq!(opts.ttest.variance, BlockVariance::PostBlocks);
        assert_eq!(opts.random_seed, Some(9));
    }

    #[test]
    // Purpose
    // -------
    // Unknown names and invalid numbers are reported with the matching
    // error variant.
    fn new_rejects_invalid_settings() {
        let unknown =
            InferenceOptions::new("ols", "conformal", "mb", 0.0, 10, false, None, 2, 0.1, None);
        assert!(matches!(unknown, Err(InferenceError::UnsupportedMethod { .. })));

        let bad_alpha =
            InferenceOptions::new("sc", "conformal", "mb", 0.0, 10, false, None, 2, 1.5, None);
        assert!(matches!(bad_alpha, Err(InferenceError::InvalidAlpha { .. })));

        let empty_grid = Some(vec![]);
        let bad_grid =
            InferenceOptions::new("sc", "conformal", "mb", 0.0, 10, true, empty_grid, 2, 0.1, None);
        assert!(matches!(bad_grid, Err(InferenceError::InvalidGrid { .. })));

        let bad_k = InferenceOptions::new("sc", "ttest", "mb", 0.0, 10, false, None, 1, 0.1, None);
        assert!(matches!(bad_k, Err(InferenceError::InvalidK { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Defaults mirror the keyword defaults: sc, conformal, moving block,
    // theta0 = 0, K = 2, alpha = 0.1, no CI.
    fn defaults_mirror_keyword_defaults() {
        let opts = InferenceOptions::default();

        assert_eq!(opts.estimation.method, EstimationMethod::Sc);
        assert_eq!(opts.inference_method, InferenceMethod::Conformal);
        assert_eq!(opts.conformal.scheme, PermutationScheme::MovingBlock);
        assert_eq!(opts.theta0, 0.0);
        assert_eq!(opts.ttest.k, 2);
        assert_eq!(opts.conformal.alpha, 0.1);
        assert!(!opts.ci);
    }

    #[test]
    // Purpose
    // -------
    // The secondary choices are reachable by name and validated.
    //
    // Given
    // -----
    // - Defaults, then cross-fit variance, q = 2 and the pre-treatment window.
    //
    // Expect
    // ------
    // - Each setting lands in its nested option struct.
    // - Unknown names and q ≤ 0 are rejected.
    fn secondary_choices_are_selectable_by_name() {
        let opts = InferenceOptions::default()
            .with_block_variance("cross_fit")
            .and_then(|o| o.with_statistic(Some(2.0)))
            .and_then(|o| o.with_fit_window("pre"))
            .unwrap();

        assert_eq!(opts.ttest.variance, BlockVariance::CrossFit);
        assert_eq!(opts.conformal.statistic, TestStatistic::Lq { q: 2.0 });
        assert_eq!(opts.conformal.fit_window, FitWindow::PreTreatment);

        let base = InferenceOptions::default();
        assert!(matches!(
            base.clone().with_block_variance("jackknife"),
            Err(InferenceError::UnsupportedMethod { .. })
        ));
        assert!(matches!(
            base.clone().with_statistic(Some(0.0)),
            Err(InferenceError::InvalidStatistic { .. })
        ));
        assert!(matches!(
            base.with_fit_window("post"),
            Err(InferenceError::UnsupportedMethod { .. })
        ));
    }
}
