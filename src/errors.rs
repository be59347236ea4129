//! errors — configuration and cancellation errors for hypergeometric evaluation.
//!
//! Purpose
//! -------
//! Provide the crate-wide error enum and result alias used by the backend
//! selection, precision resolution, option builders and the batch driver,
//! together with a conversion layer to Python exceptions for the PyO3
//! bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`HypergeoResult`] and [`HypergeoError`] as the canonical result
//!   and error types for every fallible entry point in the crate.
//! - Attach human-readable `Display` messages to each variant so that
//!   diagnostics are meaningful without additional context.
//! - Implement `From<HypergeoError> for PyErr` (feature `python-bindings`),
//!   mapping configuration errors to `ValueError` and cancellation to
//!   `KeyboardInterrupt`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Numerical non-convergence is *not* an error at this level: the series
//!   evaluator reports it through `SeriesStatus` and the public entry points
//!   surface it as NaN in the affected output slot.
//! - Every variant is small and cheap to clone.
//!
//! Conventions
//! -----------
//! - Messages are phrased in terms of the offending input ("precision must be
//!   positive") rather than low-level details.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that each variant embeds its payload in the `Display`
//!   message. The PyO3 conversion is exercised from Python.

#[cfg(feature = "python-bindings")]
use pyo3::{
    PyErr,
    exceptions::{PyKeyboardInterrupt, PyValueError},
};

/// Crate-wide result alias for operations that may produce [`HypergeoError`].
pub type HypergeoResult<T> = Result<T, HypergeoError>;

/// HypergeoError — configuration and batch-level failures.
///
/// Variants
/// --------
/// - `UnknownBackend { name }`
///   The backend name did not match any supported arbitrary-precision
///   representation (`"gmp"` or `"mpfr"`).
/// - `NonPositivePrecision { value }`
///   An explicit precision (bits or digits) was zero or negative.
/// - `PrecisionTooLarge { bits, max }`
///   An explicit precision resolved to more bits than the crate allows.
/// - `InvalidMaxIter { max_iter }`
///   The series iteration bound was zero or does not fit in `u32`.
/// - `InvalidCheckpointStride { stride }`
///   A cancellation checkpoint interval (elements or terms) was zero.
/// - `Cancelled { completed }`
///   A batch was interrupted after `completed` elements, possibly in the
///   middle of the next summation; no output is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HypergeoError {
    // ---- Configuration ----
    UnknownBackend { name: String },
    NonPositivePrecision { value: i64 },
    PrecisionTooLarge { bits: u64, max: u32 },
    InvalidMaxIter { max_iter: usize },
    InvalidCheckpointStride { stride: usize },

    // ---- Batch control ----
    Cancelled { completed: usize },
}

impl HypergeoError {
    /// Whether the error stems from caller-supplied configuration (as opposed
    /// to an external interrupt).
    pub fn is_configuration(&self) -> bool {
        !matches!(self, HypergeoError::Cancelled { .. })
    }
}

impl std::error::Error for HypergeoError {}

impl std::fmt::Display for HypergeoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HypergeoError::UnknownBackend { name } => {
                write!(f, "Unrecognized backend: {name:?}. Expected 'gmp' or 'mpfr'.")
            }
            HypergeoError::NonPositivePrecision { value } => {
                write!(f, "Invalid precision: {value}. Must be a positive integer.")
            }
            HypergeoError::PrecisionTooLarge { bits, max } => {
                write!(f, "Precision of {bits} bits exceeds the supported maximum of {max} bits.")
            }
            HypergeoError::InvalidMaxIter { max_iter } => {
                write!(f, "Invalid max_iter: {max_iter}. Must be between 1 and {}.", u32::MAX)
            }
            HypergeoError::InvalidCheckpointStride { stride } => {
                write!(f, "Invalid checkpoint stride: {stride}. Must be at least 1.")
            }
            HypergeoError::Cancelled { completed } => {
                write!(f, "Evaluation cancelled after {completed} elements.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<HypergeoError> for PyErr {
    fn from(err: HypergeoError) -> PyErr {
        match err {
            HypergeoError::Cancelled { .. } => PyKeyboardInterrupt::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}
