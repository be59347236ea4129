//! batch — recycled, cancellable element-wise evaluation.
//!
//! Purpose
//! -------
//! Turn lists of parameter vectors and an argument vector of possibly
//! different lengths into one output vector, evaluating element by element in
//! index order.
//!
//! Key behaviors
//! -------------
//! - [`recycle`]: output length and wrap-around indexing, including the
//!   "any empty primary input ⇒ empty output" short-circuit.
//! - [`driver`]: [`BatchOptions`], borrowed [`BatchInputs`] and the
//!   [`BatchDriver`] that runs them.
//! - [`cancel`]: the [`Interrupt`] trait polled at checkpoints, a shared
//!   [`CancellationToken`] and the no-op [`NeverInterrupt`].
//! - [`postprocess`]: the optional whole-vector natural log.
//!
//! Invariants & assumptions
//! ------------------------
//! - Cancellation is all-or-nothing: a cancelled batch returns
//!   `HypergeoError::Cancelled` and no values.
//! - Single-threaded and synchronous; requests share no mutable state.

pub mod cancel;
pub mod driver;
pub mod postprocess;
pub mod recycle;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::cancel::{CancellationToken, Interrupt, NeverInterrupt};
pub use self::driver::{BatchDriver, BatchInputs, BatchOptions, DEFAULT_CHECKPOINT_STRIDE};
pub use self::postprocess::log_transform;
pub use self::recycle::{output_len, recycled};

pub mod prelude {
    pub use super::{BatchDriver, BatchInputs, BatchOptions, CancellationToken, Interrupt};
}
