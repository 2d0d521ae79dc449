//! scinference — synthetic-control estimation with conformal and t-test
//! inference, with optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the inference engine to Python via the `_scinference` extension
//! module. When the `python-bindings` feature is enabled, this module defines
//! the Python-facing `scinference(...)` function.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules:
//!   - `panel`: validated treated/control data,
//!   - `estimation`: `sc`, `did` and `classo` counterfactuals,
//!   - `optimization`: constrained least-squares solvers,
//!   - `inference`: permutation p-values, conformal bounds, t-tests,
//!   - `dispatch`: the `infer` entry point.
//! - Define the `#[pyfunction]` wrapper and the `#[pymodule]` initializer for
//!   the `_scinference` Python extension.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue, input conversion and error mapping.
//! - The Python keyword names and defaults match [`InferenceOptions::new`].
//!
//! Conventions
//! -----------
//! - The Python function returns a `dict` whose keys depend on the mode:
//!   `{"p_val"}`, `{"lb", "ub"}` (`ci=True`) or `{"att", "se", "lb", "ub"}`
//!   (`inference_method="ttest"`).
//! - Errors from core Rust code are converted to `ValueError` at the PyO3
//!   boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code calls [`dispatch::infer`] with an
//!   [`InferenceOptions`], or the inner modules directly.
//! - The Python package imports `_scinference.scinference`.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by the
//!   integration tests under `tests/`.
//!
//! [`InferenceOptions`]: dispatch::InferenceOptions
//! [`InferenceOptions::new`]: dispatch::InferenceOptions::new

pub mod dispatch;
pub mod estimation;
pub mod inference;
pub mod optimization;
pub mod panel;
pub mod utils;

pub use crate::dispatch::{infer, InferenceMethod, InferenceOptions, InferenceOutcome};

#[cfg(feature = "python-bindings")]
use numpy::IntoPyArray;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny, types::PyDict};

#[cfg(feature = "python-bindings")]
use crate::utils::{extract_f64_matrix, extract_f64_vector};

/// scinference — Python entry point for synthetic-control inference.
///
/// Parameters
/// ----------
/// - `Y1`: 1-D array-like of length `T0 + T1` (treated unit).
/// - `Y0`: 2-D array-like, `(T0 + T1) × J` (control units).
/// - `T1`, `T0`: post- and pre-treatment period counts.
/// - `estimation_method`: `"sc"` (default), `"did"` or `"classo"`.
/// - `inference_method`: `"conformal"` (default) or `"ttest"`.
/// - `permutation_method`: `"mb"` (default) or `"iid"`.
/// - `theta0`: null value for the conformal test (default 0).
/// - `n_perm`: IID draws (default 5000).
/// - `ci`: return per-period conformal bounds (default False).
/// - `ci_grid`: candidate effects for the bounds; built automatically when
///   omitted.
/// - `K`: t-test block count (default 2).
/// - `alpha`: significance level (default 0.1).
/// - `random_seed`: seed for IID draws; OS entropy when omitted.
/// - `block_variance`: t-test variance, `"post_blocks"` (default) or
///   `"cross_fit"`.
/// - `statistic_q`: use the `S_q` statistic with this `q`; mean absolute
///   residual when omitted.
/// - `fit_window`: conformal refit window, `"full"` (default) or `"pre"`.
///
/// Returns
/// -------
/// - `dict` with `p_val`, or `lb`/`ub` numpy arrays, or `att`/`se`/`lb`/`ub`.
///
/// Errors
/// ------
/// - `TypeError` for inputs that cannot be read as float arrays.
/// - `ValueError` for every validation or estimation failure.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (
    Y1, Y0, T1, T0,
    estimation_method = "sc",
    inference_method = "conformal",
    permutation_method = "mb",
    theta0 = 0.0,
    n_perm = 5000,
    ci = false,
    ci_grid = None,
    K = 2,
    alpha = 0.1,
    random_seed = None,
    block_variance = "post_blocks",
    statistic_q = None,
    fit_window = "full"
))]
#[allow(non_snake_case, clippy::too_many_arguments)]
pub fn scinference<'py>(
    py: Python<'py>, Y1: &Bound<'py, PyAny>, Y0: &Bound<'py, PyAny>, T1: usize, T0: usize,
    estimation_method: &str, inference_method: &str, permutation_method: &str, theta0: f64,
    n_perm: usize, ci: bool, ci_grid: Option<&Bound<'py, PyAny>>, K: usize, alpha: f64,
    random_seed: Option<u64>, block_variance: &str, statistic_q: Option<f64>, fit_window: &str,
) -> PyResult<Bound<'py, PyDict>> {
    let y1 = extract_f64_vector(Y1)?;
    let y0 = extract_f64_matrix(Y0)?;
    let grid = ci_grid.map(|raw| extract_f64_vector(raw).map(|g| g.to_vec())).transpose()?;

    let opts = InferenceOptions::new(
        estimation_method,
        inference_method,
        permutation_method,
        theta0,
        n_perm,
        ci,
        grid,
        K,
        alpha,
        random_seed,
    )?
    .with_block_variance(block_variance)?
    .with_statistic(statistic_q)?
    .with_fit_window(fit_window)?;
    let outcome = py.allow_threads(|| infer(y1.view(), y0.view(), T1, T0, &opts))?;

    let out = PyDict::new(py);
    match outcome {
        InferenceOutcome::PValue { p_val } => {
            out.set_item("p_val", p_val)?;
        }
        InferenceOutcome::Interval(interval) => {
            out.set_item("lb", interval.lb.into_pyarray(py))?;
            out.set_item("ub", interval.ub.into_pyarray(py))?;
        }
        InferenceOutcome::TTest(res) => {
            out.set_item("att", res.att)?;
            out.set_item("se", res.se)?;
            out.set_item("lb", res.lb)?;
            out.set_item("ub", res.ub)?;
        }
    }
    Ok(out)
}

/// Module initializer for the `_scinference` extension.
///
/// Notes
/// -----
/// - Invoked automatically by Python when importing the compiled extension.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _scinference<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(scinference, m)?)?;
    Ok(())
}
