//! api — public evaluation entrypoints.
//!
//! Purpose
//! -------
//! Expose scalar and batch evaluation of `pFq(U; L; z)` with the argument
//! shapes language bindings work with, delegating to the series evaluator
//! and the batch driver.
//!
//! Key behaviors
//! -------------
//! - [`evaluate_scalar`] / [`evaluate_scalar_report`]: one element.
//! - [`evaluate_scalar_with`]: one element with explicit series options and a
//!   cancellation source polled between terms.
//! - [`evaluate_batch`]: recycled batch with default options and no
//!   cancellation source.
//! - [`evaluate_batch_with`]: full control over options and cancellation.
//!
//! Invariants & assumptions
//! ------------------------
//! - Only configuration problems and cancellation are errors; numerical
//!   failure is a NaN in the affected slot.
//! - The output is always native `f64`; precision only affects the internal
//!   summation.
//!
//! Downstream usage
//! ----------------
//! - Parse backend names with `str::parse::<BackendChoice>()` and precisions
//!   with [`PrecisionSpec::bits`] / [`PrecisionSpec::digits`] before calling
//!   in, so bad configuration fails before any work is done.
use ndarray::Array1;

use crate::{
    backend::BackendChoice,
    batch::{BatchDriver, BatchInputs, BatchOptions, Interrupt, NeverInterrupt},
    errors::HypergeoResult,
    precision::{CheckModes, PrecisionSpec},
    series::{EvaluationRequest, SeriesOptions, SeriesReport, evaluate_request},
};

/// Evaluate `pFq(upper; lower; z)` to `f64`.
///
/// Parameters
/// ----------
/// - `upper`, `lower`: numerator and denominator parameters (may be empty).
/// - `z`: argument.
/// - `precision`: working precision request.
/// - `check_mode`: validate poles / divergence before summing.
/// - `backend`: arbitrary-precision representation.
///
/// Returns
/// -------
/// The value, or NaN if the series could not be evaluated.
///
/// Examples
/// --------
/// ```
/// use rust_hypergeo::{BackendChoice, PrecisionSpec, evaluate_scalar};
///
/// let e = evaluate_scalar(&[], &[], 1.0, PrecisionSpec::Default, true, BackendChoice::Mpfr)?;
/// assert!((e - std::f64::consts::E).abs() < 1e-15);
/// # Ok::<(), rust_hypergeo::HypergeoError>(())
/// ```
pub fn evaluate_scalar(
    upper: &[f64], lower: &[f64], z: f64, precision: PrecisionSpec, check_mode: bool,
    backend: BackendChoice,
) -> HypergeoResult<f64> {
    evaluate_scalar_report(upper, lower, z, precision, check_mode, backend).map(|r| r.value)
}

/// Like [`evaluate_scalar`] but returns the full [`SeriesReport`] (status,
/// term count and working precision).
pub fn evaluate_scalar_report(
    upper: &[f64], lower: &[f64], z: f64, precision: PrecisionSpec, check_mode: bool,
    backend: BackendChoice,
) -> HypergeoResult<SeriesReport> {
    let request = EvaluationRequest::new(upper, lower, z, precision, check_mode);
    evaluate_scalar_with(&request, &SeriesOptions::default(), backend, &NeverInterrupt)
}

/// Evaluate one request with explicit series options and a cancellation
/// source.
///
/// Errors
/// ------
/// - `HypergeoError::Cancelled { completed: 0 }` if `interrupt` fires at a
///   term checkpoint.
pub fn evaluate_scalar_with(
    request: &EvaluationRequest<'_>, options: &SeriesOptions, backend: BackendChoice,
    interrupt: &dyn Interrupt,
) -> HypergeoResult<SeriesReport> {
    evaluate_request(request, options, backend, interrupt)
}

/// Evaluate a recycled batch.
///
/// Output length is `max(upper.len(), lower.len(), z.len())`, or 0 if any of
/// them is empty. `precision` (`None` or empty = unset) and `check_mode`
/// recycle independently. With `log_output` the natural log is applied to
/// the whole output.
///
/// Errors
/// ------
/// None in practice; the signature matches [`evaluate_batch_with`].
pub fn evaluate_batch(
    upper: &[Vec<f64>], lower: &[Vec<f64>], z: &[f64], precision: Option<&[PrecisionSpec]>,
    check_mode: &CheckModes, log_output: bool, backend: BackendChoice,
) -> HypergeoResult<Array1<f64>> {
    let inputs = BatchInputs {
        precision: precision.unwrap_or(&[]),
        check_mode,
        log_output,
        ..BatchInputs::new(upper, lower, z)
    };
    let options = BatchOptions { backend, ..BatchOptions::default() };
    evaluate_batch_with(&inputs, &options, &NeverInterrupt)
}

/// Evaluate a recycled batch with explicit options and a cancellation source.
///
/// Errors
/// ------
/// - `HypergeoError::Cancelled` if `interrupt` fires at an element or term
///   checkpoint; no partial output is returned.
pub fn evaluate_batch_with(
    inputs: &BatchInputs<'_>, options: &BatchOptions, interrupt: &dyn Interrupt,
) -> HypergeoResult<Array1<f64>> {
    BatchDriver::new(*options).run(inputs, interrupt)
}
