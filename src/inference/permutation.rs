//! Permutation schemes and the permutation p-value.
//!
//! Purpose
//! -------
//! Build the reference distribution of a test statistic by repositioning
//! the post-period window over the residual sequence, and compare the
//! observed statistic against it.
//!
//! Key behaviors
//! -------------
//! - [`PermutationScheme::MovingBlock`] enumerates every cyclic placement of
//!   a length-`T1` window over the `T` residuals; the placement starting at
//!   `T0` is the observed one and the other `T − 1` are null draws.
//! - [`PermutationScheme::Iid`] draws `n_perm` uniformly random `T1`-subsets
//!   of the `T` positions from an explicit [`StdRng`].
//! - [`p_value`] returns `(1 + #{draws ≥ observed}) / (1 + #draws)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `p ∈ (0, 1]`; ties count against the null (inclusion, `≥`).
//! - Moving-block draws are deterministic and never touch the generator.
//! - Random streams are derived from a base seed with
//!   [`stream_rng`]; no process-wide generator is read.
use crate::inference::{
    errors::{InferenceError, InferenceResult},
    statistic::TestStatistic,
};
use ndarray::ArrayView1;
use rand::{rngs::StdRng, seq::index, RngCore, SeedableRng};
use std::str::FromStr;

/// Default number of random draws for the IID scheme.
pub const DEFAULT_N_PERM: usize = 5000;

/// Reference-distribution construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermutationScheme {
    /// All `T` cyclic placements of the post window.
    #[default]
    MovingBlock,
    /// `n_perm` random `T1`-subsets of the `T` positions.
    Iid { n_perm: usize },
}

impl PermutationScheme {
    pub fn iid(n_perm: usize) -> InferenceResult<Self> {
        if n_perm == 0 {
            return Err(InferenceError::InvalidPermutationCount { n_perm });
        }
        Ok(PermutationScheme::Iid { n_perm })
    }

    /// Parse `"mb"` / `"iid"` and attach `n_perm` to the IID scheme.
    pub fn from_name(name: &str, n_perm: usize) -> InferenceResult<Self> {
        match name.parse::<PermutationScheme>()? {
            PermutationScheme::MovingBlock => Ok(PermutationScheme::MovingBlock),
            PermutationScheme::Iid { .. } => PermutationScheme::iid(n_perm),
        }
    }

    /// Positions of the observed post window `T0..T`.
    pub fn observed_window(t0: usize, t1: usize) -> Vec<usize> {
        (t0..t0 + t1).collect()
    }

    /// Visit every null draw, one window of `t1` positions at a time, and
    /// return the number of draws.
    ///
    /// A single length-`t1` buffer is reused, so the reference set is never
    /// held in memory.
    pub fn for_each_draw<F>(&self, t0: usize, t1: usize, rng: &mut StdRng, mut visit: F) -> usize
    where
        F: FnMut(&[usize]),
    {
        let t = t0 + t1;
        let mut window = Vec::with_capacity(t1);
        match *self {
            PermutationScheme::MovingBlock => {
                for shift in 1..t {
                    window.clear();
                    window.extend((0..t1).map(|i| (t0 + shift + i) % t));
                    visit(&window);
                }
                t.saturating_sub(1)
            }
            PermutationScheme::Iid { n_perm } => {
                for _ in 0..n_perm {
                    window.clear();
                    window.extend(index::sample(rng, t, t1).iter());
                    window.sort_unstable();
                    visit(&window);
                }
                n_perm
            }
        }
    }
}

impl FromStr for PermutationScheme {
    type Err = InferenceError;

    /// Parse a scheme name (case-insensitive). `"iid"` uses
    /// [`DEFAULT_N_PERM`] draws.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mb" => Ok(PermutationScheme::MovingBlock),
            "iid" => Ok(PermutationScheme::Iid { n_perm: DEFAULT_N_PERM }),
            _ => Err(InferenceError::UnsupportedMethod {
                name: s.to_string(),
                reason: "Valid permutation methods are 'mb' and 'iid'.",
            }),
        }
    }
}

/// Base seed for one call: the caller's seed, or one draw from OS entropy.
pub fn base_seed(random_seed: Option<u64>) -> u64 {
    random_seed.unwrap_or_else(|| StdRng::from_os_rng().next_u64())
}

/// Independent generator for evaluation `stream` under `seed`.
pub fn stream_rng(seed: u64, stream: u64) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_add(stream))
}

/// Permutation p-value of the residuals `u` (length `t0 + t1`).
///
/// Errors
/// ------
/// - `InferenceError::ShapeMismatch` when `u.len() != t0 + t1`.
/// - `InferenceError::InsufficientData` when `t0 == 0` or `t1 == 0`.
pub fn p_value(
    u: ArrayView1<f64>, t0: usize, t1: usize, statistic: &TestStatistic,
    scheme: &PermutationScheme, rng: &mut StdRng,
) -> InferenceResult<f64> {
    if t0 == 0 || t1 == 0 {
        return Err(InferenceError::InsufficientData {
            t0,
            t1,
            reason: "Permutation tests need pre- and post-treatment periods.",
        });
    }
    if u.len() != t0 + t1 {
        return Err(InferenceError::ShapeMismatch {
            what: "residual sequence length",
            expected: t0 + t1,
            found: u.len(),
        });
    }

    let observed = statistic.evaluate(u, &PermutationScheme::observed_window(t0, t1));
    let mut exceed = 0usize;
    let n_draws = scheme.for_each_draw(t0, t1, rng, |window| {
        if statistic.evaluate(u, window) >= observed {
            exceed += 1;
        }
    });
    Ok((1 + exceed) as f64 / (1 + n_draws) as f64)
}
