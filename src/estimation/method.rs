//! Estimator selection and configuration.
//!
//! - [`EstimationMethod`]: which counterfactual estimator to fit.
//! - [`FitWindow`]: which rows the estimator is fit on.
//! - [`ClassoOptions`]: ℓ1 radius and intercept switch for `classo`.
//! - [`EstimationOptions`]: the bundle passed to
//!   [`estimate`](super::fit::estimate).
use crate::{
    estimation::errors::{EstimationError, EstimationResult},
    optimization::least_squares::SolverOptions,
};
use std::str::FromStr;

/// Counterfactual estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EstimationMethod {
    /// Synthetic control: simplex-constrained weights, no intercept.
    #[default]
    Sc,
    /// Difference-in-differences: uniform weights plus a level shift.
    Did,
    /// Constrained lasso: ℓ1-ball weights plus a free intercept.
    Classo,
}

impl EstimationMethod {
    pub fn name(&self) -> &'static str {
        match self {
            EstimationMethod::Sc => "sc",
            EstimationMethod::Did => "did",
            EstimationMethod::Classo => "classo",
        }
    }
}

impl std::fmt::Display for EstimationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EstimationMethod {
    type Err = EstimationError;

    /// Parse an estimator name (case-insensitive): `"sc"`, `"did"`, `"classo"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sc" => Ok(EstimationMethod::Sc),
            "did" => Ok(EstimationMethod::Did),
            "classo" => Ok(EstimationMethod::Classo),
            _ => Err(EstimationError::UnknownMethod { name: s.to_string() }),
        }
    }
}

/// Rows used to fit the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitWindow {
    /// First `t0` rows only.
    #[default]
    PreTreatment,
    /// All `T` rows; used under an imposed null.
    Full,
}

impl FitWindow {
    pub fn rows(&self, t0: usize, t: usize) -> usize {
        match self {
            FitWindow::PreTreatment => t0,
            FitWindow::Full => t,
        }
    }
}

/// Constrained lasso configuration.
///
/// Fields
/// ------
/// - `l1_bound`: `f64`
///   Radius `R` of the constraint `||w||₁ ≤ R`. Default `1.0`.
/// - `intercept`: `bool`
///   Fit a free level intercept. Default `true`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassoOptions {
    pub l1_bound: f64,
    pub intercept: bool,
}

impl ClassoOptions {
    pub fn new(l1_bound: f64, intercept: bool) -> EstimationResult<Self> {
        if !l1_bound.is_finite() || l1_bound <= 0.0 {
            return Err(EstimationError::InvalidL1Bound { bound: l1_bound });
        }
        Ok(Self { l1_bound, intercept })
    }
}

impl Default for ClassoOptions {
    fn default() -> Self {
        Self { l1_bound: 1.0, intercept: true }
    }
}

/// Everything needed to fit one estimator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EstimationOptions {
    pub method: EstimationMethod,
    pub classo: ClassoOptions,
    pub solver: SolverOptions,
}

impl EstimationOptions {
    pub fn new(method: EstimationMethod, classo: ClassoOptions, solver: SolverOptions) -> Self {
        Self { method, classo, solver }
    }

    /// Default options for `method`.
    pub fn for_method(method: EstimationMethod) -> Self {
        Self { method, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Method names parse case-insensitively and unknown names are reported
    // with the offending string.
    fn estimation_method_parses_names() {
        assert_eq!("SC".parse::<EstimationMethod>().unwrap(), EstimationMethod::Sc);
        assert_eq!("did".parse::<EstimationMethod>().unwrap(), EstimationMethod::Did);
        assert_eq!("Classo".parse::<EstimationMethod>().unwrap(), EstimationMethod::Classo);
        assert_eq!(
            "ols".parse::<EstimationMethod>(),
            Err(EstimationError::UnknownMethod { name: "ols".to_string() })
        );
    }

    #[test]
    // Purpose
    // -------
    // `ClassoOptions::new` rejects non-positive radii; defaults are R = 1
    // with an intercept.
    fn classo_options_validate_bound() {
        let zero = ClassoOptions::new(0.0, true);
        assert!(matches!(zero, Err(EstimationError::InvalidL1Bound { .. })));
        assert!(matches!(
            ClassoOptions::new(f64::INFINITY, false),
            Err(EstimationError::InvalidL1Bound { .. })
        ));
        let opts = ClassoOptions::default();
        assert_eq!(opts.l1_bound, 1.0);
        assert!(opts.intercept);
    }
}
