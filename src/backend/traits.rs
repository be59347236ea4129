//! The arithmetic contract every arbitrary-precision backend implements.
//!
//! - [`MultiPrecision`]: the trait the series evaluator is written against.
//!
//! Convention: every value carries its own precision in bits. Binary
//! operations round the result to the precision of the left-hand operand, so
//! callers build all operands of one summation at the same precision.
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use crate::backend::choice::BackendChoice;

/// Arbitrary-precision real number with explicit precision control.
///
/// Implemented by [`MpfrFloat`](crate::backend::MpfrFloat) and
/// [`GmpFloat`](crate::backend::GmpFloat). The series evaluator is generic
/// over this trait and is never duplicated per backend.
///
/// Required:
/// - `zero(bits)` / `from_f64(value, bits)` / `from_u32(value, bits)`:
///   construct a value with at least `bits` bits of mantissa. `from_f64`
///   requires a finite input; callers validate finiteness first.
/// - `prec()`: the precision actually carried (GMP may round up to a whole
///   number of limbs).
/// - `to_f64()`: narrow to native double width. Values beyond the `f64` range
///   map to ±∞ or ±0.
/// - `is_zero()`, `is_finite()`, `abs()`.
/// - `mul_pow2(exp)`: multiply in place by `2^exp` (exact).
///
/// Provided:
/// - `one(bits)`.
pub trait MultiPrecision:
    Clone
    + PartialOrd
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> DivAssign<&'a Self>
{
    /// The backend this type implements.
    const BACKEND: BackendChoice;

    fn zero(bits: u32) -> Self;
    fn from_f64(value: f64, bits: u32) -> Self;
    fn from_u32(value: u32, bits: u32) -> Self;

    fn prec(&self) -> u32;
    fn to_f64(&self) -> f64;

    fn is_zero(&self) -> bool;
    fn is_finite(&self) -> bool;
    fn abs(&self) -> Self;
    fn mul_pow2(&mut self, exp: i32);

    fn one(bits: u32) -> Self {
        Self::from_u32(1, bits)
    }
}
