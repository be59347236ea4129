//! rust_hypergeo — arbitrary-precision generalized hypergeometric functions
//! with Python bindings.
//!
//! Purpose
//! -------
//! Evaluate `pFq(U; L; z)` by direct series summation in GMP or MPFR
//! arithmetic, with explicit or derived working precision, check-mode
//! validation, and R-style recycled batch evaluation. When the
//! `python-bindings` feature is enabled, this module also defines the
//! `_rust_hypergeo` extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core modules (`backend`, `precision`, `series`, `batch`)
//!   and the entrypoints in [`api`] as the public crate surface.
//! - Define the `genhypergeo` / `genhypergeo_vec` Python functions and the
//!   `#[pymodule]` initializer.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, argument conversion and error mapping.
//! - Output is always native `f64`; precision only affects the summation.
//!
//! Conventions
//! -----------
//! - From Python, `prec` is given in decimal digits and `backend` by name
//!   (`"mpfr"` by default, or `"gmp"`).
//! - Configuration errors surface as `ValueError`; Ctrl-C during an
//!   evaluation surfaces as `KeyboardInterrupt`.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should call [`evaluate_scalar`] / [`evaluate_batch`]
//!   (or [`evaluate_batch_with`] for custom options and cancellation) and can
//!   ignore the PyO3 items.
//! - The Python packaging layer imports `_rust_hypergeo` and wraps its
//!   functions in user-facing APIs.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/integration_hypergeo_pipeline.rs`
//!   runs the public entrypoints end to end.
//! - The PyO3 functions are exercised from Python.

pub mod api;
pub mod backend;
pub mod batch;
pub mod errors;
pub mod precision;
pub mod series;
pub mod utils;

pub use crate::api::{
    evaluate_batch, evaluate_batch_with, evaluate_scalar, evaluate_scalar_report,
    evaluate_scalar_with,
};
pub use crate::backend::BackendChoice;
pub use crate::batch::{BatchInputs, BatchOptions, CancellationToken, Interrupt, NeverInterrupt};
pub use crate::errors::{HypergeoError, HypergeoResult};
pub use crate::precision::{CheckModes, PrecisionSpec};
pub use crate::series::{EvaluationRequest, SeriesOptions, SeriesReport, SeriesStatus};

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::utils::{
    SignalInterrupt, extract_check_modes, extract_f64_array, extract_param_lists, extract_params,
    extract_precision, extract_precisions,
};

/// genhypergeo — evaluate one generalized hypergeometric function.
///
/// Parameters
/// ----------
/// - `upper`: sequence of numerator parameters (may be empty).
/// - `lower`: sequence of denominator parameters (may be empty).
/// - `z`: argument.
/// - `prec`: working precision in decimal digits; `None` derives a default.
/// - `check_mode`: validate poles and divergence before summing.
/// - `log`: return the natural log of the value.
/// - `backend`: `"mpfr"` or `"gmp"`.
///
/// Returns
/// -------
/// `float` — NaN if the series cannot be evaluated.
///
/// Errors
/// ------
/// - `ValueError` for an unknown backend or a non-positive `prec`.
/// - `KeyboardInterrupt` if interrupted.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "genhypergeo",
    text_signature = "(upper, lower, z, prec=None, check_mode=True, log=False, backend='mpfr')",
    signature = (upper, lower, z, prec = None, check_mode = true, log = false, backend = "mpfr")
)]
pub fn genhypergeo<'py>(
    py: Python<'py>, upper: &Bound<'py, PyAny>, lower: &Bound<'py, PyAny>, z: f64,
    prec: Option<i64>, check_mode: bool, log: bool, backend: &str,
) -> PyResult<f64> {
    let backend: BackendChoice = backend.parse()?;
    let precision = extract_precision(prec)?;
    let upper = extract_params(py, upper)?;
    let lower = extract_params(py, lower)?;

    let request = EvaluationRequest::new(&upper, &lower, z, precision, check_mode);
    let interrupt = SignalInterrupt::new(py);
    let options = SeriesOptions::default();
    let value = match evaluate_scalar_with(&request, &options, backend, &interrupt) {
        Ok(report) => report.value,
        Err(err) => return Err(interrupt.into_error(err)),
    };
    Ok(if log { value.ln() } else { value })
}

/// genhypergeo_vec — evaluate a recycled batch of generalized hypergeometric
/// functions.
///
/// Parameters
/// ----------
/// - `upper`: list of numerator parameter sequences.
/// - `lower`: list of denominator parameter sequences.
/// - `z`: 1-D float array-like of arguments.
/// - `prec`: `None`, an int or a sequence of ints (decimal digits).
/// - `check_mode`: bool or sequence of bools.
/// - `log`: apply the natural log to the whole output.
/// - `backend`: `"mpfr"` or `"gmp"`.
///
/// Returns
/// -------
/// `numpy.ndarray` of length `max(len(upper), len(lower), len(z))`, or empty if any
/// of them is empty. Shorter inputs are recycled.
///
/// Errors
/// ------
/// - `ValueError` for an unknown backend or a non-positive `prec`.
/// - `TypeError` for malformed inputs.
/// - `KeyboardInterrupt` if interrupted.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "genhypergeo_vec",
    text_signature = "(upper, lower, z, prec=None, check_mode=True, log=False, backend='mpfr')",
    signature = (upper, lower, z, prec = None, check_mode = None, log = false, backend = "mpfr")
)]
pub fn genhypergeo_vec<'py>(
    py: Python<'py>, upper: &Bound<'py, PyAny>, lower: &Bound<'py, PyAny>,
    z: &Bound<'py, PyAny>, prec: Option<&Bound<'py, PyAny>>,
    check_mode: Option<&Bound<'py, PyAny>>, log: bool, backend: &str,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let backend: BackendChoice = backend.parse()?;
    let precision = extract_precisions(prec)?;
    let check_mode = match check_mode {
        Some(raw) => extract_check_modes(raw)?,
        None => CheckModes::default(),
    };
    let upper = extract_param_lists(py, upper, "upper")?;
    let lower = extract_param_lists(py, lower, "lower")?;
    let z_arr = extract_f64_array(py, z)?;
    let z = z_arr.as_slice()?;

    let inputs = BatchInputs {
        precision: &precision,
        check_mode: &check_mode,
        log_output: log,
        ..BatchInputs::new(&upper, &lower, z)
    };
    let options = BatchOptions { backend, ..BatchOptions::default() };
    let interrupt = SignalInterrupt::new(py);

    match evaluate_batch_with(&inputs, &options, &interrupt) {
        Ok(out) => Ok(out.into_pyarray(py)),
        Err(err) => Err(interrupt.into_error(err)),
    }
}

/// _rust_hypergeo — PyO3 module initializer.
///
/// Notes
/// -----
/// - This function is invoked automatically by Python when importing the
///   compiled extension; it is not called directly by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_hypergeo<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(genhypergeo, m)?)?;
    m.add_function(wrap_pyfunction!(genhypergeo_vec, m)?)?;
    Ok(())
}
