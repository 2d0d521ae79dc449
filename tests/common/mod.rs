//! Shared synthetic-panel generators for the integration tests.
#![allow(dead_code)]

use ndarray::{s, Array1, Array2};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;

/// A simulated single-treated-unit panel.
pub struct Simulated {
    pub y1: Array1<f64>,
    pub y0: Array2<f64>,
    pub t0: usize,
    pub t1: usize,
}

/// Purpose
/// -------
/// Draw a panel whose treated unit is the average of the first three
/// controls plus Gaussian noise, with a constant effect on post periods.
///
/// Parameters
/// ----------
/// - `seed`: seed for the `StdRng` stream.
/// - `j`: number of controls (≥ 3).
/// - `t0`, `t1`: pre/post period counts.
/// - `effect`: constant shift added to post periods.
/// - `noise_sd`: standard deviation of the treated-unit noise.
///
/// Returns
/// -------
/// - [`Simulated`] with iid N(0, 1) controls.
pub fn simulate(
    seed: u64, j: usize, t0: usize, t1: usize, effect: f64, noise_sd: f64,
) -> Simulated {
    let mut rng = StdRng::seed_from_u64(seed);
    let t = t0 + t1;
    let y0 = Array2::from_shape_fn((t, j), |_| rng.sample::<f64, _>(StandardNormal));
    let noise = Array1::from_shape_fn(t, |_| noise_sd * rng.sample::<f64, _>(StandardNormal));
    let mut y1 = (&y0.column(0) + &y0.column(1) + &y0.column(2)) / 3.0 + noise;
    y1.slice_mut(s![t0..]).mapv_inplace(|v| v + effect);
    Simulated { y1, y0, t0, t1 }
}
