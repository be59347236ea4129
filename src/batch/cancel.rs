//! Cooperative cancellation for long batches.
//!
//! - [`Interrupt`]: polled by the batch driver at every element checkpoint
//!   and by the series evaluator at every term checkpoint.
//! - [`CancellationToken`]: cloneable flag another thread (or a signal
//!   handler) can raise.
//! - [`NeverInterrupt`]: the no-op used when nothing can cancel.
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Source of cancellation requests.
///
/// `should_stop` is called between elements and between terms of one
/// summation, never in the middle of an arithmetic step.
pub trait Interrupt {
    fn should_stop(&self) -> bool;
}

/// Interrupt that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverInterrupt;

impl Interrupt for NeverInterrupt {
    fn should_stop(&self) -> bool {
        false
    }
}

/// Shared cancellation flag.
///
/// Clones observe the same flag; once cancelled it stays cancelled until
/// [`reset`](CancellationToken::reset).
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl Interrupt for CancellationToken {
    fn should_stop(&self) -> bool {
        self.is_cancelled()
    }
}
