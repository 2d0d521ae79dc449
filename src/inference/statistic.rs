//! Test statistics evaluated on a window of residuals.
use crate::inference::errors::{InferenceError, InferenceResult};
use ndarray::ArrayView1;

/// Statistic applied to the residuals of a post-period window.
///
/// - `MeanAbsolute`: `(1/T1) Σ |u_t|`.
/// - `Lq { q }`: `(T1^{-1/2} Σ |u_t|^q)^{1/q}`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TestStatistic {
    #[default]
    MeanAbsolute,
    Lq { q: f64 },
}

impl TestStatistic {
    pub fn lq(q: f64) -> InferenceResult<Self> {
        if !q.is_finite() || q <= 0.0 {
            return Err(InferenceError::InvalidStatistic { q });
        }
        Ok(TestStatistic::Lq { q })
    }

    /// Evaluate on the residuals at `window` positions.
    pub fn evaluate(&self, u: ArrayView1<f64>, window: &[usize]) -> f64 {
        let len = window.len() as f64;
        match *self {
            TestStatistic::MeanAbsolute => window.iter().map(|&i| u[i].abs()).sum::<f64>() / len,
            TestStatistic::Lq { q } => {
                let total: f64 = window.iter().map(|&i| u[i].abs().powf(q)).sum();
                (total / len.sqrt()).powf(1.0 / q)
            }
        }
    }
}
