//! series — the generalized hypergeometric series evaluator.
//!
//! Purpose
//! -------
//! Evaluate one `pFq(U; L; z)` request at arbitrary precision and narrow the
//! result to `f64`, reporting numerical failure as NaN instead of an error.
//!
//! Key behaviors
//! -------------
//! - [`EvaluationRequest`] / [`SeriesOptions`] describe one unit of work and
//!   the shared iteration bound and term checkpoint stride ([`options`]).
//! - [`checks`] implements check mode: the pole rule and divergence
//!   screening by parameter counts and `|z|`. It also flags the convergent
//!   series on `|z| = 1`, which the evaluator extrapolates.
//! - [`evaluator`] sums the series generically over
//!   [`MultiPrecision`](crate::backend::MultiPrecision) and returns a
//!   [`SeriesReport`] with the value, a [`SeriesStatus`], the number of terms
//!   and the working precision.
//!
//! Invariants & assumptions
//! ------------------------
//! - The evaluator is written once; [`evaluate_request`] selects the
//!   monomorphised instance for a [`BackendChoice`](crate::backend::BackendChoice).
//! - No request shares mutable state with another; summation is restartable
//!   from scratch and bit-identical on repetition.
//!
//! Conventions
//! -----------
//! - A summation polls the caller's [`Interrupt`](crate::batch::Interrupt)
//!   every `checkpoint_terms` terms and aborts with `Cancelled`.
//! - Check-mode rejections and non-converged sums are logged with
//!   `tracing::warn!`; successful sums emit a `debug!` record with the term
//!   count and precision.
//!
//! Testing notes
//! -------------
//! - `checks` unit tests cover each rejection rule in isolation.
//! - `evaluator` unit tests run closed forms, termination, poles, iteration
//!   limits, unit-circle extrapolation, cancellation allowance and in-series
//!   interruption on both backends.

pub mod checks;
pub mod evaluator;
pub mod options;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::checks::{Rejection, check_well_posed, converges_algebraically};
pub use self::evaluator::{SeriesReport, SeriesStatus, evaluate_request, sum_series};
pub use self::options::{
    DEFAULT_MAX_ITER, DEFAULT_TERM_CHECKPOINT, EvaluationRequest, SeriesOptions,
};

pub mod prelude {
    pub use super::{EvaluationRequest, SeriesOptions, SeriesReport, SeriesStatus};
}
