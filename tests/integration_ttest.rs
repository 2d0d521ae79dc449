//! Integration tests for t-test inference through the dispatcher.
//!
//! Purpose
//! -------
//! - Validate the t-test path end to end: pre-treatment fit, block variance
//!   and Student-t interval.
//! - Check frequentist coverage on repeated synthetic draws.
//!
//! Coverage
//! --------
//! - `dispatch::infer` with `inference_method = ttest`.
//! - `inference::ttest` with `PostBlocks` and `CrossFit` variances.
//! - Agreement between the t-test ATT and `estimation::estimate`.
//!
//! Exclusions
//! ----------
//! - Hand-computed block arithmetic, covered by unit tests.
mod common;

use approx::assert_relative_eq;
use common::simulate;
use scinference::{
    estimation::{estimate, EstimationOptions, FitWindow},
    infer,
    inference::ttest::{BlockVariance, TTestOptions},
    InferenceMethod, InferenceOptions,
};

fn ttest_options(k: usize) -> InferenceOptions {
    InferenceOptions {
        inference_method: InferenceMethod::TTest,
        ttest: TTestOptions { k, ..TTestOptions::default() },
        ..InferenceOptions::default()
    }
}

#[test]
// Purpose
// -------
// With J = 50, T0 = 50, T1 = 5 and an effect of 2, both K = 2 and K = 3
// recover the effect, and the ATT equals the point estimator's ATT.
//
// Given
// -----
// - One seeded panel, `sc`, `PostBlocks` variance.
//
// Expect
// ------
// - |att − 2| < 1.25 for both K.
// - att identical to `estimate(...).att`.
// - lb ≤ att ≤ ub and se ≥ 0.
fn scenario_b_recovers_effect() {
    let sim = simulate(5, 50, 50, 5, 2.0, 0.5);
    let fit = estimate(
        sim.y1.view(),
        sim.y0.view(),
        sim.t0,
        FitWindow::PreTreatment,
        &EstimationOptions::default(),
    )
    .unwrap();

    for k in [2, 3] {
        let out = infer(sim.y1.view(), sim.y0.view(), sim.t1, sim.t0, &ttest_options(k)).unwrap();
        let res = out.ttest().unwrap();

        assert!((res.att - 2.0).abs() < 1.25, "K = {k}: att = {}", res.att);
        assert_relative_eq!(res.att, fit.att, epsilon = 1e-12);
        assert!(res.se >= 0.0);
        assert!(res.lb <= res.att && res.att <= res.ub);
    }
}

#[test]
// Purpose
// -------
// Intervals cover the injected effect close to the nominal 90% rate.
//
// Given
// -----
// - 200 independent panels (J = 20, T0 = 40, T1 = 6), `sc`, K = 2,
//   alpha = 0.1.
//
// Expect
// ------
// - Empirical coverage ≥ 0.8.
fn ttest_coverage_is_near_nominal() {
    let reps = 200;
    let opts = ttest_options(2);

    let covered = (0..reps)
        .filter(|&seed| {
            let sim = simulate(1_000 + seed, 20, 40, 6, 2.0, 0.5);
            let out = infer(sim.y1.view(), sim.y0.view(), sim.t1, sim.t0, &opts).unwrap();
            let res = out.ttest().unwrap();
            res.lb <= 2.0 && 2.0 <= res.ub
        })
        .count();

    let coverage = covered as f64 / reps as f64;
    assert!(coverage >= 0.8, "coverage = {coverage}");
}

#[test]
// Purpose
// -------
// The cross-fit variance also recovers the effect and yields a finite
// interval.
fn cross_fit_recovers_effect() {
    let sim = simulate(9, 10, 40, 8, 2.0, 0.5);
    let mut opts = ttest_options(2);
    opts.ttest.variance = BlockVariance::CrossFit;

    let out = infer(sim.y1.view(), sim.y0.view(), sim.t1, sim.t0, &opts).unwrap();
    let res = out.ttest().unwrap();

    assert!((res.att - 2.0).abs() < 1.0, "att = {}", res.att);
    assert!(res.se.is_finite() && res.lb <= res.ub);
}
