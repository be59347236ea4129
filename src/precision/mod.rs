//! precision — working-precision resolution and check-mode selection.
//!
//! Purpose
//! -------
//! Turn what the caller asked for (an optional precision, a check-mode flag
//! or vector) into the concrete configuration one summation runs with.
//!
//! Key behaviors
//! -------------
//! - [`PrecisionSpec`] validates explicit bit / digit requests at
//!   construction and resolves to a [`WorkingPrecision`].
//! - [`controller`] derives the default precision: the `f64` mantissa, a
//!   fixed guard and an allowance for cancellation in alternating series.
//! - [`CheckModes`] carries a uniform or recycled per-element check-mode flag.
//!
//! Invariants & assumptions
//! ------------------------
//! - Explicit precisions are positive and at most [`MAX_PRECISION_BITS`];
//!   anything else is a configuration error at construction.
//! - Default precisions lie in `[F64_MANTISSA_BITS + GUARD_BITS,
//!   MAX_DEFAULT_BITS]`.
//! - Resolution is a pure function of the request; repeated calls agree.
//!
//! Conventions
//! -----------
//! - Digits are significant decimal digits and convert to
//!   `ceil(digits · log2 10)` bits.

pub mod controller;
pub mod modes;
pub mod spec;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::controller::{cancellation_bits, default_bits};
pub use self::modes::CheckModes;
pub use self::spec::{
    F64_MANTISSA_BITS, GUARD_BITS, MAX_DEFAULT_BITS, MAX_PRECISION_BITS, PrecisionSpec,
    WorkingPrecision, digits_to_bits,
};
