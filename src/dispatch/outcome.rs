//! Uniform result of [`infer`](super::infer).
use crate::inference::{conformal::ConformalInterval, ttest::TTestResult};

/// Mode-dependent inference result.
///
/// - `PValue`: conformal test of `H0: θ = theta0`.
/// - `Interval`: per-period conformal bounds (`ci = true`).
/// - `TTest`: `{att, se, lb, ub}` from the t-test path.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceOutcome {
    PValue { p_val: f64 },
    Interval(ConformalInterval),
    TTest(TTestResult),
}

impl InferenceOutcome {
    pub fn p_val(&self) -> Option<f64> {
        match self {
            InferenceOutcome::PValue { p_val } => Some(*p_val),
            _ => None,
        }
    }

    pub fn interval(&self) -> Option<&ConformalInterval> {
        match self {
            InferenceOutcome::Interval(ci) => Some(ci),
            _ => None,
        }
    }

    pub fn ttest(&self) -> Option<&TTestResult> {
        match self {
            InferenceOutcome::TTest(res) => Some(res),
            _ => None,
        }
    }
}
