//! T-test inference for the average treatment effect on the treated.
//!
//! Purpose
//! -------
//! Provide an asymptotic alternative to conformal inference for designs with
//! many post periods: a point estimate of the ATT, a standard error built
//! from `K` block-level averages, and a Student-t interval with `K − 1`
//! degrees of freedom.
//!
//! Key behaviors
//! -------------
//! - [`BlockVariance::PostBlocks`] (default): the `T1` post-period effects of
//!   a pre-treatment fit are split into `K` contiguous blocks whose sizes
//!   differ by at most one; `se = sqrt(s²_blocks / K)` where `s²_blocks` is
//!   the sample variance of the block means. The ATT is the fit's ATT.
//! - [`BlockVariance::CrossFit`]: the last `K·r` pre-periods
//!   (`r = min(⌊T0/K⌋, T1)`) form `K` hold-out blocks. For each block the
//!   estimator is refit without it and
//!   `τ_k = mean(post gaps) − mean(hold-out gaps)`; then
//!   `att = mean(τ)` and `se = sqrt(1 + K·r/T1) · sd(τ) / sqrt(K)`.
//! - Interval: `att ± t_{K−1, 1−α/2} · se` via `statrs`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `2 ≤ K ≤ T1`; violations are `InferenceError::InvalidK`.
//! - Only `sc` and `did` are supported; `classo` is
//!   `InferenceError::UnsupportedMethod`.
use crate::{
    estimation::{estimate, EstimationMethod, EstimationOptions, FitWindow},
    inference::{
        conformal::{verify_alpha, DEFAULT_ALPHA},
        errors::{InferenceError, InferenceResult},
    },
    panel::PanelData,
};
use ndarray::{s, Array1, Axis};
use statrs::distribution::{ContinuousCDF, StudentsT};
use std::str::FromStr;

/// Default number of blocks.
pub const DEFAULT_K: usize = 2;

/// Block variance estimator used for the standard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockVariance {
    #[default]
    PostBlocks,
    CrossFit,
}

impl FromStr for BlockVariance {
    type Err = InferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postblocks" | "post_blocks" => Ok(BlockVariance::PostBlocks),
            "crossfit" | "cross_fit" => Ok(BlockVariance::CrossFit),
            _ => Err(InferenceError::UnsupportedMethod {
                name: s.to_string(),
                reason: "Valid block variances are 'post_blocks' and 'cross_fit'.",
            }),
        }
    }
}

/// T-test configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTestOptions {
    pub k: usize,
    pub alpha: f64,
    pub variance: BlockVariance,
}

impl TTestOptions {
    /// Validate `K ≥ 2` and `alpha ∈ (0, 1)`. The upper bound `K ≤ T1` is
    /// checked against the panel in [`ttest`].
    pub fn new(k: usize, alpha: f64, variance: BlockVariance) -> InferenceResult<Self> {
        if k < 2 {
            return Err(InferenceError::InvalidK { k, t1: 0, reason: "K must be at least 2." });
        }
        verify_alpha(alpha)?;
        Ok(Self { k, alpha, variance })
    }
}

impl Default for TTestOptions {
    fn default() -> Self {
        Self { k: DEFAULT_K, alpha: DEFAULT_ALPHA, variance: BlockVariance::PostBlocks }
    }
}

/// Output of [`ttest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTestResult {
    pub att: f64,
    pub se: f64,
    pub lb: f64,
    pub ub: f64,
}

/// Run the t-test path on `panel`.
///
/// Errors
/// ------
/// - `InferenceError::UnsupportedMethod` for `classo`.
/// - `InferenceError::InvalidK` when `K ∉ [2, T1]` or a cross-fit block
///   would be empty.
/// - `InferenceError::Estimation` when a fit fails.
pub fn ttest(
    panel: &PanelData, estimation: &EstimationOptions, opts: &TTestOptions,
) -> InferenceResult<TTestResult> {
    if estimation.method == EstimationMethod::Classo {
        return Err(InferenceError::UnsupportedMethod {
            name: estimation.method.to_string(),
            reason: "The t-test path supports 'sc' and 'did'.",
        });
    }
    let (k, t1) = (opts.k, panel.t1());
    if k < 2 {
        return Err(InferenceError::InvalidK { k, t1, reason: "K must be at least 2." });
    }
    if k > t1 {
        return Err(InferenceError::InvalidK { k, t1, reason: "K must not exceed T1." });
    }
    verify_alpha(opts.alpha)?;

    let (att, se) = match opts.variance {
        BlockVariance::PostBlocks => post_block_estimate(panel, estimation, k)?,
        BlockVariance::CrossFit => cross_fit_estimate(panel, estimation, k)?,
    };

    let t_dist = StudentsT::new(0.0, 1.0, (k - 1) as f64).map_err(|_| InferenceError::InvalidK {
        k,
        t1,
        reason: "Student-t distribution needs K - 1 > 0 degrees of freedom.",
    })?;
    let crit = t_dist.inverse_cdf(1.0 - opts.alpha / 2.0);
    log::debug!("ttest ({:?}, K = {k}): att = {att:.6}, se = {se:.6}", opts.variance);
    Ok(TTestResult { att, se, lb: att - crit * se, ub: att + crit * se })
}

/// Sizes of `k` contiguous blocks covering `n` items; the first `n % k`
/// blocks get one extra item.
pub fn block_sizes(n: usize, k: usize) -> Vec<usize> {
    let (base, extra) = (n / k, n % k);
    (0..k).map(|i| base + usize::from(i < extra)).collect()
}

fn post_block_estimate(
    panel: &PanelData, estimation: &EstimationOptions, k: usize,
) -> InferenceResult<(f64, f64)> {
    let fit = estimate(panel.y1(), panel.y0(), panel.t0(), FitWindow::PreTreatment, estimation)?;
    let effects = fit.post_effects(panel.y1());

    let mut start = 0;
    let block_means: Array1<f64> = block_sizes(effects.len(), k)
        .into_iter()
        .map(|size| {
            let mean = effects.slice(s![start..start + size]).sum() / size as f64;
            start += size;
            mean
        })
        .collect();

    let variance = block_means.var(1.0);
    Ok((fit.att, (variance / k as f64).sqrt()))
}

fn cross_fit_estimate(
    panel: &PanelData, estimation: &EstimationOptions, k: usize,
) -> InferenceResult<(f64, f64)> {
    let (t0, t1) = (panel.t0(), panel.t1());
    let r = (t0 / k).min(t1);
    if r == 0 {
        return Err(InferenceError::InvalidK {
            k,
            t1,
            reason: "Cross-fitting needs at least K pre-treatment periods.",
        });
    }
    let first = t0 - k * r;
    let (y1, y0) = (panel.y1(), panel.y0());

    let mut taus = Array1::<f64>::zeros(k);
    for (block, tau) in taus.iter_mut().enumerate() {
        let lo = first + block * r;
        let hi = lo + r;
        // Rows reordered as [kept pre-periods, hold-out block, post-periods].
        let rows: Vec<usize> = (0..lo).chain(hi..t0).chain(lo..hi).chain(t0..t0 + t1).collect();
        let y1_k = y1.select(Axis(0), &rows);
        let y0_k = y0.select(Axis(0), &rows);
        let kept = t0 - r;

        let fit = estimate(y1_k.view(), y0_k.view(), kept, FitWindow::PreTreatment, estimation)?;
        let gaps = fit.effects(y1_k.view());
        let hold_out = gaps.slice(s![kept..kept + r]).sum() / r as f64;
        let post = gaps.slice(s![kept + r..]).sum() / t1 as f64;
        *tau = post - hold_out;
    }

    let att = taus.sum() / k as f64;
    let se = (1.0 + (k * r) as f64 / t1 as f64).sqrt() * taus.std(1.0) / (k as f64).sqrt();
    Ok((att, se))
}
