//! Batch driver — recycled element-wise evaluation with cancellation
//! checkpoints.
//!
//! Purpose
//! -------
//! Evaluate `pFq` for every output index of a batch whose inputs may have
//! different lengths, in strict index order, and optionally log-transform
//! the result.
//!
//! Key behaviors
//! -------------
//! - Output length follows [`output_len`] over the numerator lists,
//!   denominator lists and arguments; element `i` takes each input at
//!   `i mod len` ([`recycled`]).
//! - Precision and check-mode inputs recycle independently. An empty
//!   precision slice means "unset" for every element.
//! - Every `checkpoint_stride` elements (starting at element 0) the
//!   [`Interrupt`] is polled; the same interrupt is handed to each summation,
//!   which polls it every `series.checkpoint_terms` terms. Cancellation at
//!   either level discards all computed elements and returns
//!   `HypergeoError::Cancelled { completed }`, where `completed` counts the
//!   elements finished before the interrupt.
//! - Per-element numerical failure is a NaN in that slot only.
//!
//! Invariants & assumptions
//! ------------------------
//! - [`BatchOptions`] is validated at construction and read-only during a
//!   run; the backend never changes mid-batch.
use ndarray::Array1;
use tracing::{debug, warn};

use crate::{
    backend::BackendChoice,
    batch::{
        cancel::Interrupt,
        postprocess::log_transform,
        recycle::{output_len, recycled},
    },
    errors::{HypergeoError, HypergeoResult},
    precision::{CheckModes, PrecisionSpec},
    series::{EvaluationRequest, SeriesOptions, SeriesReport, evaluate_request},
};

/// Default number of elements between cancellation checkpoints.
pub const DEFAULT_CHECKPOINT_STRIDE: usize = 100;

/// Batch-level configuration.
///
/// Fields:
/// - `backend: BackendChoice`: arbitrary-precision representation for every
///   element.
/// - `series: SeriesOptions`: per-element summation options.
/// - `checkpoint_stride: usize`: elements between interrupt polls.
///
/// Constructor:
/// - `new(backend, series, checkpoint_stride) -> HypergeoResult<Self>`:
///   rejects a zero stride with `HypergeoError::InvalidCheckpointStride`.
///
/// Default:
/// - `backend`: `Mpfr`
/// - `series`: `SeriesOptions::default()`
/// - `checkpoint_stride`: `100`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    pub backend: BackendChoice,
    pub series: SeriesOptions,
    pub checkpoint_stride: usize,
}

impl BatchOptions {
    pub fn new(
        backend: BackendChoice, series: SeriesOptions, checkpoint_stride: usize,
    ) -> HypergeoResult<Self> {
        if checkpoint_stride == 0 {
            return Err(HypergeoError::InvalidCheckpointStride { stride: checkpoint_stride });
        }
        Ok(Self { backend, series, checkpoint_stride })
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            backend: BackendChoice::default(),
            series: SeriesOptions::default(),
            checkpoint_stride: DEFAULT_CHECKPOINT_STRIDE,
        }
    }
}

/// Borrowed inputs of one batch.
///
/// - `upper` / `lower`: one parameter vector per element (recycled).
/// - `z`: arguments (recycled).
/// - `precision`: per-element precision requests (recycled; empty = unset).
/// - `check_mode`: uniform or recycled check-mode flags.
/// - `log_output`: apply the natural log to the whole output.
#[derive(Debug, Clone, Copy)]
pub struct BatchInputs<'a> {
    pub upper: &'a [Vec<f64>],
    pub lower: &'a [Vec<f64>],
    pub z: &'a [f64],
    pub precision: &'a [PrecisionSpec],
    pub check_mode: &'a CheckModes,
    pub log_output: bool,
}

impl<'a> BatchInputs<'a> {
    /// Inputs with unset precision, check mode on and no log transform.
    pub fn new(upper: &'a [Vec<f64>], lower: &'a [Vec<f64>], z: &'a [f64]) -> Self {
        const DEFAULT_MODES: &CheckModes = &CheckModes::Uniform(true);
        Self { upper, lower, z, precision: &[], check_mode: DEFAULT_MODES, log_output: false }
    }

    /// Number of output elements.
    pub fn len(&self) -> usize {
        output_len(&[self.upper.len(), self.lower.len(), self.z.len()])
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Request for output element `idx`; `None` past the end.
    pub fn request(&self, idx: usize) -> Option<EvaluationRequest<'a>> {
        if idx >= self.len() {
            return None;
        }
        let upper = recycled(self.upper, idx)?;
        let lower = recycled(self.lower, idx)?;
        let z = *recycled(self.z, idx)?;
        let precision = recycled(self.precision, idx).copied().unwrap_or_default();
        let check_mode = self.check_mode.at(idx);
        Some(EvaluationRequest::new(upper, lower, z, precision, check_mode))
    }
}

/// Runs batches under fixed [`BatchOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchDriver {
    options: BatchOptions,
}

impl BatchDriver {
    pub fn new(options: BatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Evaluate every element and return the (optionally log-transformed)
    /// values.
    ///
    /// Errors
    /// ------
    /// - `Cancelled { completed }` if `interrupt` fires at an element or term
    ///   checkpoint.
    pub fn run(
        &self, inputs: &BatchInputs<'_>, interrupt: &dyn Interrupt,
    ) -> HypergeoResult<Array1<f64>> {
        let reports = self.run_reports(inputs, interrupt)?;
        let mut out: Array1<f64> = reports.iter().map(|r| r.value).collect();
        if inputs.log_output {
            log_transform(&mut out);
        }
        Ok(out)
    }

    /// Evaluate every element and return the full per-element reports.
    ///
    /// `log_output` is ignored; reports always carry the plain values.
    ///
    /// Errors
    /// ------
    /// - `Cancelled { completed }` if `interrupt` fires at an element or term
    ///   checkpoint.
    pub fn run_reports(
        &self, inputs: &BatchInputs<'_>, interrupt: &dyn Interrupt,
    ) -> HypergeoResult<Vec<SeriesReport>> {
        let n = inputs.len();
        let stride = self.options.checkpoint_stride.max(1);
        let mut reports = Vec::with_capacity(n);

        for idx in 0..n {
            if idx % stride == 0 && interrupt.should_stop() {
                warn!(completed = idx, total = n, "batch cancelled");
                return Err(HypergeoError::Cancelled { completed: idx });
            }
            let Some(request) = inputs.request(idx) else {
                break;
            };
            let series = &self.options.series;
            match evaluate_request(&request, series, self.options.backend, interrupt) {
                Ok(report) => reports.push(report),
                Err(HypergeoError::Cancelled { .. }) => {
                    warn!(completed = idx, total = n, "batch cancelled mid-series");
                    return Err(HypergeoError::Cancelled { completed: idx });
                }
                Err(err) => return Err(err),
            }
        }

        let failed = reports.iter().filter(|r| !r.status.is_success()).count();
        debug!(backend = %self.options.backend, n, failed, "batch evaluated");
        Ok(reports)
    }
}
