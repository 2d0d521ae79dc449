//! Conformal inference: permutation tests under an imposed null and their
//! inversion into per-period confidence sets.
//!
//! Purpose
//! -------
//! Test `H0: θ = θ0` for a constant post-period effect by refitting the
//! estimator on the null-imposed series and permuting its residuals, and
//! build confidence bounds by collecting every grid value the test does not
//! reject.
//!
//! Key behaviors
//! -------------
//! - [`conformal_p_value`] refits on [`ConformalOptions::fit_window`]
//!   (all `T` periods by default) after subtracting `θ0` from the
//!   post-periods, then calls [`p_value`].
//! - [`conformal_interval`] treats each post period separately: the
//!   sub-panel made of the `T0` pre-periods plus period `T0 + t` is tested
//!   for every grid value, and `θ` is accepted when `p(θ) > α`.
//! - Grid points are evaluated in parallel with `rayon`. Each evaluation
//!   gets its own generator, seeded from the base seed plus the flat
//!   `(period, grid index)` position, so results match a sequential run.
//!
//! Invariants & assumptions
//! ------------------------
//! - The acceptance region is not assumed to be an interval; bounds are the
//!   smallest and largest accepted grid values.
//! - Saturated bounds (the grid edge is accepted) and empty acceptance sets
//!   are reported through [`BoundFlags`] and logged at `warn` level.
//! - Degenerate `classo` refits are counted in
//!   [`ConformalInterval::degenerate_refits`] and warned about once per call.
//!
//! Testing notes
//! -------------
//! - Unit tests cover option validation, the default grid, saturation and
//!   empty-set flags, and monotonicity of bounds in `α`.
use crate::{
    estimation::{estimate, estimate_from, EstimationMethod, EstimationOptions, FitWindow},
    inference::{
        errors::{InferenceError, InferenceResult},
        permutation::{p_value, stream_rng, PermutationScheme},
        residuals::{impose_null, residuals},
        statistic::TestStatistic,
    },
    optimization::least_squares::Weights,
    panel::PanelData,
};
use ndarray::{s, Array1};
use rand::rngs::StdRng;
use rayon::prelude::*;

/// Default significance level.
pub const DEFAULT_ALPHA: f64 = 0.1;

/// Number of points in the automatically built grid.
pub const DEFAULT_GRID_POINTS: usize = 201;

/// Half-width of the automatic grid in pre-period residual standard deviations.
pub const DEFAULT_GRID_WIDTH: f64 = 5.0;

/// Conformal test configuration.
///
/// Fields
/// ------
/// - `alpha`: `f64` in `(0, 1)`; grid values with `p > alpha` are accepted.
/// - `scheme`: [`PermutationScheme`]; moving block by default.
/// - `statistic`: [`TestStatistic`]; mean absolute residual by default.
/// - `fit_window`: [`FitWindow`]; `Full` (refit on all periods under the
///   null) by default.
/// - `grid_points`, `grid_width`: size and half-width (in residual standard
///   deviations) of the automatic grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConformalOptions {
    pub alpha: f64,
    pub scheme: PermutationScheme,
    pub statistic: TestStatistic,
    pub fit_window: FitWindow,
    pub grid_points: usize,
    pub grid_width: f64,
}

impl ConformalOptions {
    pub fn new(
        alpha: f64, scheme: PermutationScheme, statistic: TestStatistic, fit_window: FitWindow,
    ) -> InferenceResult<Self> {
        verify_alpha(alpha)?;
        if let PermutationScheme::Iid { n_perm } = scheme {
            PermutationScheme::iid(n_perm)?;
        }
        if let TestStatistic::Lq { q } = statistic {
            TestStatistic::lq(q)?;
        }
        Ok(Self { alpha, scheme, statistic, fit_window, ..Self::default() })
    }

    /// Override the automatic grid resolution.
    pub fn with_grid(mut self, grid_points: usize, grid_width: f64) -> InferenceResult<Self> {
        if grid_points < 2 {
            return Err(InferenceError::InvalidGrid { reason: "Need at least two grid points." });
        }
        if !grid_width.is_finite() || grid_width <= 0.0 {
            return Err(InferenceError::InvalidGrid {
                reason: "Grid width must be finite and positive.",
            });
        }
        self.grid_points = grid_points;
        self.grid_width = grid_width;
        Ok(self)
    }
}

impl Default for ConformalOptions {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            scheme: PermutationScheme::MovingBlock,
            statistic: TestStatistic::MeanAbsolute,
            fit_window: FitWindow::Full,
            grid_points: DEFAULT_GRID_POINTS,
            grid_width: DEFAULT_GRID_WIDTH,
        }
    }
}

pub(crate) fn verify_alpha(alpha: f64) -> InferenceResult<()> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(InferenceError::InvalidAlpha { alpha });
    }
    Ok(())
}

/// Per-period diagnostics of a confidence set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundFlags {
    /// The smallest grid value was accepted.
    pub lower_saturated: bool,
    /// The largest grid value was accepted.
    pub upper_saturated: bool,
    /// No grid value was accepted; both bounds are NaN.
    pub empty: bool,
}

/// Per-period conformal confidence bounds (one entry per post period).
///
/// `degenerate_refits` counts the null refits (over all periods and grid
/// points) whose `classo` weights collapsed to zero; it is always zero for
/// `sc` and `did`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConformalInterval {
    pub lb: Vec<f64>,
    pub ub: Vec<f64>,
    pub flags: Vec<BoundFlags>,
    pub degenerate_refits: usize,
}

impl ConformalInterval {
    pub fn len(&self) -> usize {
        self.lb.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lb.is_empty()
    }

    /// True if any period hit a grid edge or accepted nothing.
    pub fn has_warnings(&self) -> bool {
        self.flags.iter().any(|f| f.lower_saturated || f.upper_saturated || f.empty)
    }
}

/// Conformal p-value for `H0: θ = theta0`.
///
/// Errors
/// ------
/// - `InferenceError::Estimation` when the refit fails.
pub fn conformal_p_value(
    panel: &PanelData, theta0: f64, estimation: &EstimationOptions, opts: &ConformalOptions,
    rng: &mut StdRng,
) -> InferenceResult<f64> {
    let (p_val, degenerate) = null_p_value(panel, theta0, estimation, opts, None, rng)?;
    if degenerate {
        log::warn!("classo refit under theta0 = {theta0} returned all-zero weights");
    }
    Ok(p_val)
}

/// Refit under the null and permute; also reports whether the refit was a
/// degenerate `classo` fit.
fn null_p_value(
    panel: &PanelData, theta0: f64, estimation: &EstimationOptions, opts: &ConformalOptions,
    warm_start: Option<&Weights>, rng: &mut StdRng,
) -> InferenceResult<(f64, bool)> {
    let (t0, t1) = (panel.t0(), panel.t1());
    let y_null = impose_null(panel.y1(), t0, theta0);
    let fit =
        estimate_from(y_null.view(), panel.y0(), t0, opts.fit_window, estimation, warm_start)?;
    let u = residuals(panel.y1(), fit.counterfactual.view(), t0, theta0);
    let degenerate = fit.method == EstimationMethod::Classo && fit.is_degenerate();
    Ok((p_value(u.view(), t0, t1, &opts.statistic, &opts.scheme, rng)?, degenerate))
}

/// Invert the conformal test over `grid` for each post period.
///
/// Parameters
/// ----------
/// - `panel`: [`PanelData`]
/// - `grid`: `Option<&[f64]>`
///   Candidate effects; `None` builds [`default_grid`].
/// - `estimation`: [`EstimationOptions`]
/// - `opts`: [`ConformalOptions`]
/// - `seed`: base seed for IID streams (ignored by the moving-block scheme).
///
/// Errors
/// ------
/// - `InferenceError::InvalidGrid` for an empty or non-finite grid.
/// - `InferenceError::Estimation` when any refit fails.
pub fn conformal_interval(
    panel: &PanelData, grid: Option<&[f64]>, estimation: &EstimationOptions,
    opts: &ConformalOptions, seed: u64,
) -> InferenceResult<ConformalInterval> {
    let grid = match grid {
        Some(values) => {
            verify_grid(values)?;
            values.to_vec()
        }
        None => default_grid(panel, estimation, opts)?.to_vec(),
    };
    let grid_min = grid.iter().copied().fold(f64::INFINITY, f64::min);
    let grid_max = grid.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let t1 = panel.t1();
    let mut interval = ConformalInterval {
        lb: Vec::with_capacity(t1),
        ub: Vec::with_capacity(t1),
        flags: Vec::with_capacity(t1),
        degenerate_refits: 0,
    };

    for period in 0..t1 {
        let sub = panel.single_period(period);
        let start = estimate_from(
            sub.y1(),
            sub.y0(),
            sub.t0(),
            FitWindow::PreTreatment,
            estimation,
            None,
        )?;

        let outcomes = grid
            .par_iter()
            .enumerate()
            .map(|(g, &theta)| {
                let mut rng = stream_rng(seed, (period * grid.len() + g) as u64);
                null_p_value(&sub, theta, estimation, opts, Some(&start.weights), &mut rng)
            })
            .collect::<InferenceResult<Vec<(f64, bool)>>>()?;
        interval.degenerate_refits +=
            outcomes.iter().filter(|(_, degenerate)| *degenerate).count();

        let accepted: Vec<f64> = grid
            .iter()
            .zip(outcomes.iter())
            .filter(|(_, (p, _))| *p > opts.alpha)
            .map(|(&theta, _)| theta)
            .collect();

        let (lb, ub, flags) = if accepted.is_empty() {
            log::warn!("conformal set for post period {period} is empty at alpha = {}", opts.alpha);
            (f64::NAN, f64::NAN, BoundFlags { empty: true, ..BoundFlags::default() })
        } else {
            let lb = accepted.iter().copied().fold(f64::INFINITY, f64::min);
            let ub = accepted.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let flags = BoundFlags {
                lower_saturated: lb <= grid_min,
                upper_saturated: ub >= grid_max,
                empty: false,
            };
            if flags.lower_saturated || flags.upper_saturated {
                log::warn!(
                    "conformal bounds for post period {period} reach the grid edge \
                     [{grid_min}, {grid_max}]; widen the grid"
                );
            }
            (lb, ub, flags)
        };
        interval.lb.push(lb);
        interval.ub.push(ub);
        interval.flags.push(flags);
    }

    if interval.degenerate_refits > 0 {
        log::warn!(
            "{} of {} classo refits returned all-zero weights",
            interval.degenerate_refits,
            t1 * grid.len()
        );
    }
    Ok(interval)
}

fn verify_grid(grid: &[f64]) -> InferenceResult<()> {
    if grid.is_empty() {
        return Err(InferenceError::InvalidGrid { reason: "Grid must not be empty." });
    }
    if grid.iter().any(|v| !v.is_finite()) {
        return Err(InferenceError::InvalidGrid { reason: "Grid values must be finite." });
    }
    Ok(())
}

/// Automatic grid centered on the per-period effect estimates.
///
/// Spans `[min effect − w·σ, max effect + w·σ]` with `opts.grid_points`
/// points, where effects come from a pre-treatment fit, `σ` is the standard
/// deviation of its pre-period residuals and `w = opts.grid_width`. When the
/// pre-period fit is exact, `σ` falls back to `max(1, max |effect|)`.
pub fn default_grid(
    panel: &PanelData, estimation: &EstimationOptions, opts: &ConformalOptions,
) -> InferenceResult<Array1<f64>> {
    let t0 = panel.t0();
    let fit = estimate(panel.y1(), panel.y0(), t0, FitWindow::PreTreatment, estimation)?;
    let gaps = fit.effects(panel.y1());
    let pre = gaps.slice(s![..t0]);
    let post = gaps.slice(s![t0..]);

    let sigma = if t0 > 1 { pre.std(1.0) } else { 0.0 };
    let lo_effect = post.iter().copied().fold(f64::INFINITY, f64::min);
    let hi_effect = post.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let scale = if sigma > 0.0 {
        sigma
    } else {
        post.iter().map(|v| v.abs()).fold(1.0, f64::max)
    };
    let half_width = opts.grid_width * scale;
    Ok(Array1::linspace(lo_effect - half_width, hi_effect + half_width, opts.grid_points))
}
