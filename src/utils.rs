//! utils — argument extraction for the Python bindings.
//!
//! Purpose
//! -------
//! Convert loosely typed Python arguments (NumPy arrays, pandas objects,
//! lists, scalars) into the validated Rust types the entrypoints take, and
//! bridge Python's signal handling into the batch driver's [`Interrupt`].
//!
//! Conventions
//! -----------
//! - Precisions arrive as decimal digits and become [`PrecisionSpec::Digits`].
//! - Configuration errors convert through `From<HypergeoError> for PyErr`;
//!   shape / type errors raise `TypeError` directly.
#[cfg(feature = "python-bindings")]
use std::cell::RefCell;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    batch::Interrupt,
    errors::HypergeoError,
    precision::{CheckModes, PrecisionSpec},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

/// Accept a 1-D float64 NumPy array, anything with `.to_numpy()`, or a
/// sequence of floats.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy one parameter vector out of Python.
#[cfg(feature = "python-bindings")]
pub fn extract_params<'py>(py: Python<'py>, raw: &Bound<'py, PyAny>) -> PyResult<Vec<f64>> {
    let arr = extract_f64_array(py, raw)?;
    let slice = arr
        .as_slice()
        .map_err(|_| PyTypeError::new_err("parameters must be a 1-D contiguous float64 sequence"))?;
    Ok(slice.to_vec())
}

/// Copy a list of parameter vectors (one per batch element) out of Python.
#[cfg(feature = "python-bindings")]
pub fn extract_param_lists<'py>(
    py: Python<'py>, raw: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Vec<Vec<f64>>> {
    let items = raw.try_iter().map_err(|_| {
        PyTypeError::new_err(format!("{name} must be a list of parameter sequences"))
    })?;
    items.map(|item| extract_params(py, &item?)).collect()
}

/// Precision in decimal digits, if given.
#[cfg(feature = "python-bindings")]
pub fn extract_precision(prec: Option<i64>) -> PyResult<PrecisionSpec> {
    match prec {
        Some(digits) => Ok(PrecisionSpec::digits(digits)?),
        None => Ok(PrecisionSpec::Default),
    }
}

/// Per-element precisions in decimal digits: `None`, an int, or a sequence of
/// ints. `None` and an empty sequence both mean "unset".
#[cfg(feature = "python-bindings")]
pub fn extract_precisions(prec: Option<&Bound<'_, PyAny>>) -> PyResult<Vec<PrecisionSpec>> {
    let Some(raw) = prec else {
        return Ok(Vec::new());
    };
    if raw.is_none() {
        return Ok(Vec::new());
    }
    let digits: Vec<i64> = match raw.extract::<i64>() {
        Ok(single) => vec![single],
        Err(_) => raw.extract().map_err(|_| {
            PyTypeError::new_err("prec must be None, an int, or a sequence of ints")
        })?,
    };
    let specs = digits.into_iter().map(PrecisionSpec::digits).collect::<Result<Vec<_>, _>>()?;
    Ok(specs)
}

/// Check-mode flag(s): a bool or a sequence of bools.
#[cfg(feature = "python-bindings")]
pub fn extract_check_modes(raw: &Bound<'_, PyAny>) -> PyResult<CheckModes> {
    if let Ok(flag) = raw.extract::<bool>() {
        return Ok(CheckModes::Uniform(flag));
    }
    let flags: Vec<bool> = raw
        .extract()
        .map_err(|_| PyTypeError::new_err("check_mode must be a bool or a sequence of bools"))?;
    Ok(CheckModes::Recycled(flags))
}

/// [`Interrupt`] that polls Python's signal handlers.
///
/// A raised exception (usually `KeyboardInterrupt`) is kept so it can be
/// re-raised unchanged once the batch has unwound.
#[cfg(feature = "python-bindings")]
pub struct SignalInterrupt<'py> {
    py: Python<'py>,
    pending: RefCell<Option<PyErr>>,
}

#[cfg(feature = "python-bindings")]
impl<'py> SignalInterrupt<'py> {
    pub fn new(py: Python<'py>) -> Self {
        Self { py, pending: RefCell::new(None) }
    }

    /// The Python exception behind a cancellation, or `err` converted.
    pub fn into_error(self, err: HypergeoError) -> PyErr {
        self.pending.into_inner().unwrap_or_else(|| err.into())
    }
}

#[cfg(feature = "python-bindings")]
impl Interrupt for SignalInterrupt<'_> {
    fn should_stop(&self) -> bool {
        match self.py.check_signals() {
            Ok(()) => false,
            Err(err) => {
                *self.pending.borrow_mut() = Some(err);
                true
            }
        }
    }
}
