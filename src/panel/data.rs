//! Validated treated/control panel with a fixed pre/post split.
use crate::inference::errors::{InferenceError, InferenceResult};
use ndarray::{concatenate, s, Array1, Array2, ArrayView1, ArrayView2, Axis};

/// `PanelData` — treated series, control panel and the period split.
///
/// Fields
/// ------
/// - `y1`: `Array1<f64>`
///   Treated series of length `T = t0 + t1`.
/// - `y0`: `Array2<f64>`
///   Control outcomes, `T × J`.
/// - `t0`, `t1`: `usize`
///   Pre- and post-treatment period counts.
///
/// Invariants
/// ----------
/// - `y1.len() == t0 + t1 == y0.nrows()`.
/// - `t0 ≥ 1`, `t1 ≥ 1`.
/// - All entries are finite.
/// - `J = 0` is representable; the estimators reject it.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelData {
    y1: Array1<f64>,
    y0: Array2<f64>,
    t0: usize,
    t1: usize,
}

impl PanelData {
    /// Validate and store a panel.
    ///
    /// Errors
    /// ------
    /// - `InferenceError::InsufficientData` when `t0 == 0` or `t1 == 0`.
    /// - `InferenceError::ShapeMismatch` when `y1` or `y0` disagree with
    ///   `t0 + t1`.
    /// - `InferenceError::NonFiniteData` for the first NaN/±∞ (control panel
    ///   entries row-major first, then the treated series).
    pub fn new(y1: Array1<f64>, y0: Array2<f64>, t0: usize, t1: usize) -> InferenceResult<Self> {
        if t0 == 0 {
            return Err(InferenceError::InsufficientData {
                t0,
                t1,
                reason: "At least one pre-treatment period is required.",
            });
        }
        if t1 == 0 {
            return Err(InferenceError::InsufficientData {
                t0,
                t1,
                reason: "At least one post-treatment period is required.",
            });
        }
        let t = t0 + t1;
        if y1.len() != t {
            return Err(InferenceError::ShapeMismatch {
                what: "treated series length",
                expected: t,
                found: y1.len(),
            });
        }
        if y0.nrows() != t {
            return Err(InferenceError::ShapeMismatch {
                what: "control panel rows",
                expected: t,
                found: y0.nrows(),
            });
        }
        for (index, &value) in y0.iter().chain(y1.iter()).enumerate() {
            if !value.is_finite() {
                return Err(InferenceError::NonFiniteData { index, value });
            }
        }
        Ok(Self { y1, y0, t0, t1 })
    }

    pub fn y1(&self) -> ArrayView1<'_, f64> {
        self.y1.view()
    }

    pub fn y0(&self) -> ArrayView2<'_, f64> {
        self.y0.view()
    }

    pub fn t0(&self) -> usize {
        self.t0
    }

    pub fn t1(&self) -> usize {
        self.t1
    }

    /// Total number of periods `T`.
    pub fn t(&self) -> usize {
        self.t0 + self.t1
    }

    /// Number of control units `J`.
    pub fn n_controls(&self) -> usize {
        self.y0.ncols()
    }

    /// Pre-periods plus the single post-period `t0 + period` (so `t1 = 1`).
    ///
    /// Panics
    /// ------
    /// - If `period >= t1`.
    pub fn single_period(&self, period: usize) -> PanelData {
        assert!(period < self.t1, "period {period} out of range for T1 = {}", self.t1);
        let row = self.t0 + period;
        let y1 =
            concatenate![Axis(0), self.y1.slice(s![..self.t0]), self.y1.slice(s![row..row + 1])];
        let y0 = concatenate![
            Axis(0),
            self.y0.slice(s![..self.t0, ..]),
            self.y0.slice(s![row..row + 1, ..])
        ];
        PanelData { y1, y0, t0: self.t0, t1: 1 }
    }
}
