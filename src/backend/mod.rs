//! backend — interchangeable arbitrary-precision float representations.
//!
//! Purpose
//! -------
//! Put GMP and MPFR floats behind one arithmetic contract so the series
//! evaluator can be written once and instantiated per backend.
//!
//! Key behaviors
//! -------------
//! - [`MultiPrecision`] is the trait the evaluator is generic over.
//! - [`MpfrFloat`] wraps `rug::Float` (exact bit precision, round-to-nearest).
//! - [`GmpFloat`] wraps a raw GMP `mpf_t` through `gmp-mpfr-sys`.
//! - [`BackendChoice`] names a backend and parses from `"gmp"` / `"mpfr"`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every value carries its own precision; all operands of one summation are
//!   built at the same precision.
//! - `BackendChoice` is fixed for a whole batch and dispatched once, by
//!   `match`, to a monomorphised evaluator.
//!
//! Testing notes
//! -------------
//! - `traits` runs one generic contract suite against both backends.
//! - `gmp` and `mpfr` test backend-specific behavior (limb rounding of the
//!   precision, clone independence, division by zero, exponent saturation).

pub mod choice;
pub mod gmp;
pub mod mpfr;
pub mod traits;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::choice::BackendChoice;
pub use self::gmp::GmpFloat;
pub use self::mpfr::MpfrFloat;
pub use self::traits::MultiPrecision;

pub mod prelude {
    pub use super::{BackendChoice, GmpFloat, MpfrFloat, MultiPrecision};
}
