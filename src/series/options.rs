//! Per-evaluation inputs and summation options.
//!
//! - [`EvaluationRequest`]: one logical unit of work (parameters, argument,
//!   precision request and check-mode flag).
//! - [`SeriesOptions`]: iteration bound and in-series checkpoint stride shared
//!   by every request of a batch.
use crate::{
    errors::{HypergeoError, HypergeoResult},
    precision::PrecisionSpec,
};

/// Default bound on the number of series terms.
pub const DEFAULT_MAX_ITER: usize = 1_000_000;

/// Default number of terms between interrupt polls inside one summation.
pub const DEFAULT_TERM_CHECKPOINT: usize = 4096;

/// One evaluation of `pFq(upper; lower; z)`.
///
/// Built fresh per output element and borrowed immutably by the evaluator;
/// nothing in it is shared with other requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationRequest<'a> {
    pub upper: &'a [f64],
    pub lower: &'a [f64],
    pub z: f64,
    pub precision: PrecisionSpec,
    pub check_mode: bool,
}

impl<'a> EvaluationRequest<'a> {
    pub fn new(
        upper: &'a [f64], lower: &'a [f64], z: f64, precision: PrecisionSpec, check_mode: bool,
    ) -> Self {
        Self { upper, lower, z, precision, check_mode }
    }

    /// Number of numerator parameters.
    pub fn p(&self) -> usize {
        self.upper.len()
    }

    /// Number of denominator parameters.
    pub fn q(&self) -> usize {
        self.lower.len()
    }

    /// Whether the argument and every parameter are finite.
    pub fn is_finite(&self) -> bool {
        self.z.is_finite() && self.upper.iter().chain(self.lower).all(|v| v.is_finite())
    }
}

/// Summation options.
///
/// Fields:
/// - `max_iter: usize`: maximum number of terms added after `term₀`.
/// - `checkpoint_terms: usize`: terms between interrupt polls within one
///   summation.
///
/// Constructors:
/// - `new(max_iter) -> HypergeoResult<Self>`: rejects `0` and values that do
///   not fit in `u32` with `HypergeoError::InvalidMaxIter`; keeps the default
///   checkpoint stride.
/// - `with_checkpoint_terms(stride) -> HypergeoResult<Self>`: rejects a zero
///   stride with `HypergeoError::InvalidCheckpointStride`.
///
/// Default:
/// - `max_iter = 1_000_000`
/// - `checkpoint_terms = 4096`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesOptions {
    pub max_iter: usize,
    pub checkpoint_terms: usize,
}

impl SeriesOptions {
    pub fn new(max_iter: usize) -> HypergeoResult<Self> {
        if max_iter == 0 || u32::try_from(max_iter).is_err() {
            return Err(HypergeoError::InvalidMaxIter { max_iter });
        }
        Ok(Self { max_iter, ..Self::default() })
    }

    pub fn with_checkpoint_terms(self, stride: usize) -> HypergeoResult<Self> {
        if stride == 0 {
            return Err(HypergeoError::InvalidCheckpointStride { stride });
        }
        Ok(Self { checkpoint_terms: stride, ..self })
    }
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self { max_iter: DEFAULT_MAX_ITER, checkpoint_terms: DEFAULT_TERM_CHECKPOINT }
    }
}
