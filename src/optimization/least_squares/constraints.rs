//! Feasible sets and their Euclidean projections.
//!
//! Both projections follow the sort-and-threshold construction of
//! Duchi, Shalev-Shwartz, Singer & Chandra (2008): sort the magnitudes in
//! descending order, locate the largest index whose running threshold keeps
//! the entry positive, and soft-threshold every coordinate by that amount.
//! Cost is `O(J log J)` per projection.
use crate::optimization::errors::{OptError, OptResult};
use ndarray::{Array1, ArrayView1};

/// Feasible set for the coefficient vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Probability simplex `{w : w ≥ 0, Σ w = 1}`.
    Simplex,
    /// ℓ1 ball `{w : Σ |w_j| ≤ radius}`.
    L1Ball { radius: f64 },
}

impl Constraint {
    /// Build an ℓ1-ball constraint, rejecting non-positive or non-finite radii.
    pub fn l1_ball(radius: f64) -> OptResult<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(OptError::InvalidRadius { radius });
        }
        Ok(Constraint::L1Ball { radius })
    }

    /// Euclidean projection of `v` onto the feasible set.
    pub fn project(&self, v: ArrayView1<f64>) -> Array1<f64> {
        match *self {
            Constraint::Simplex => project_simplex(v, 1.0),
            Constraint::L1Ball { radius } => project_l1_ball(v, radius),
        }
    }

    /// A feasible starting point of dimension `dim`.
    pub fn initial_point(&self, dim: usize) -> Array1<f64> {
        match *self {
            Constraint::Simplex => Array1::from_elem(dim, 1.0 / dim as f64),
            Constraint::L1Ball { .. } => Array1::zeros(dim),
        }
    }
}

/// Project `v` onto `{w : w ≥ 0, Σ w = z}` for `z > 0`.
pub fn project_simplex(v: ArrayView1<f64>, z: f64) -> Array1<f64> {
    let theta = simplex_threshold(v.iter().copied(), z);
    v.mapv(|x| (x - theta).max(0.0))
}

/// Project `v` onto `{w : Σ |w_j| ≤ radius}`.
///
/// Points already inside the ball are returned unchanged; otherwise the
/// magnitudes are projected onto the radius-`radius` simplex and signs are
/// restored.
pub fn project_l1_ball(v: ArrayView1<f64>, radius: f64) -> Array1<f64> {
    let norm: f64 = v.iter().map(|x| x.abs()).sum();
    if norm <= radius {
        return v.to_owned();
    }
    let theta = simplex_threshold(v.iter().map(|x| x.abs()), radius);
    v.mapv(|x| x.signum() * (x.abs() - theta).max(0.0))
}

/// Soft-threshold level `θ` such that `Σ max(v_j − θ, 0) = z`.
fn simplex_threshold<I: Iterator<Item = f64>>(values: I, z: f64) -> f64 {
    let mut sorted: Vec<f64> = values.collect();
    sorted.sort_by(|a, b| b.total_cmp(a));

    let mut cumsum = 0.0;
    let mut theta = 0.0;
    for (j, &u) in sorted.iter().enumerate() {
        cumsum += u;
        let candidate = (cumsum - z) / (j + 1) as f64;
        if u - candidate > 0.0 {
            theta = candidate;
        } else {
            break;
        }
    }
    theta
}
