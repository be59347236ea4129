//! GMP backend — raw `mpf_t` floats behind the [`MultiPrecision`] contract.
//!
//! Purpose
//! -------
//! Wrap GMP's `mpf` floating-point type (via the `gmp-mpfr-sys` bindings) in
//! an owned, safe Rust value so the series evaluator can run on GMP exactly
//! as it runs on MPFR.
//!
//! Key behaviors
//! -------------
//! - [`GmpFloat`] owns one initialised `mpf_t`; it is cleared on `Drop` and
//!   deep-copied on `Clone`.
//! - Arithmetic calls the in-place `mpf_*` functions with the destination
//!   aliased to the left operand, which GMP explicitly permits.
//! - Narrowing goes through `mpf_get_d_2exp` so values outside the `f64`
//!   exponent range saturate to ±∞ / ±0 instead of relying on
//!   platform-dependent behavior of `mpf_get_d`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `mpf` has no NaN or infinity; `is_finite` is therefore always true and
//!   division by zero must be prevented by the caller (the evaluator checks
//!   for zero denominators before dividing).
//! - `from_f64` requires a finite input. Non-finite inputs are rejected by
//!   the evaluator before any backend value is built.
//! - Precision is rounded up by GMP to a whole number of limbs, so `prec()`
//!   may exceed the requested bit count.
//!
//! Conventions
//! -----------
//! - Every `unsafe` block is limited to a single FFI call (or a tight group of
//!   calls) on a value that this module initialised.
use std::{
    cmp::Ordering,
    fmt,
    mem::MaybeUninit,
    ops::{AddAssign, DivAssign, MulAssign, SubAssign},
    os::raw::c_long,
};

use gmp_mpfr_sys::gmp::{self, bitcnt_t, mpf_t};

use crate::backend::{choice::BackendChoice, traits::MultiPrecision};

/// GMP-backed arbitrary-precision float.
///
/// # Panics
///
/// `/=` panics on a zero divisor; GMP itself would raise `SIGFPE`. The
/// series evaluator never divides by a value it has not checked for zero.
pub struct GmpFloat {
    inner: mpf_t,
}

impl GmpFloat {
    fn init(bits: u32) -> Self {
        let mut raw = MaybeUninit::<mpf_t>::uninit();
        // SAFETY: `mpf_init2` fully initialises the pointee, after which it
        // is sound to assume it initialised.
        unsafe {
            gmp::mpf_init2(raw.as_mut_ptr(), bitcnt_t::from(bits));
            GmpFloat { inner: raw.assume_init() }
        }
    }

    fn as_raw(&self) -> *const mpf_t {
        &self.inner
    }

    fn as_raw_mut(&mut self) -> *mut mpf_t {
        &mut self.inner
    }

    fn sign(&self) -> Ordering {
        // SAFETY: `self.inner` is initialised for the lifetime of `self`.
        let cmp = unsafe { gmp::mpf_cmp_ui(self.as_raw(), 0) };
        cmp.cmp(&0)
    }
}

/// `mantissa · 2^exp` without intermediate overflow; saturates outside the
/// `f64` exponent range.
fn ldexp(mantissa: f64, exp: c_long) -> f64 {
    if mantissa == 0.0 {
        return mantissa;
    }
    if exp > 1100 {
        return mantissa.signum() * f64::INFINITY;
    }
    if exp < -1100 {
        return mantissa.signum() * 0.0;
    }
    // |exp| <= 1100 so both halves are representable powers of two.
    let exp = exp as i32;
    let half = exp / 2;
    mantissa * 2f64.powi(half) * 2f64.powi(exp - half)
}

impl Drop for GmpFloat {
    fn drop(&mut self) {
        // SAFETY: `self.inner` was initialised by `mpf_init2` and is cleared
        // exactly once.
        unsafe { gmp::mpf_clear(self.as_raw_mut()) }
    }
}

impl Clone for GmpFloat {
    fn clone(&self) -> Self {
        let mut out = GmpFloat::init(self.prec());
        // SAFETY: both values are initialised and distinct.
        unsafe { gmp::mpf_set(out.as_raw_mut(), self.as_raw()) };
        out
    }
}

impl fmt::Debug for GmpFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GmpFloat")
            .field("approx", &self.to_f64())
            .field("prec", &self.prec())
            .finish()
    }
}

impl PartialEq for GmpFloat {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for GmpFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        // SAFETY: both values are initialised.
        let cmp = unsafe { gmp::mpf_cmp(self.as_raw(), other.as_raw()) };
        Some(cmp.cmp(&0))
    }
}

impl MultiPrecision for GmpFloat {
    const BACKEND: BackendChoice = BackendChoice::Gmp;

    fn zero(bits: u32) -> Self {
        GmpFloat::init(bits)
    }

    fn from_f64(value: f64, bits: u32) -> Self {
        debug_assert!(value.is_finite(), "GmpFloat::from_f64 requires a finite value");
        let mut out = GmpFloat::init(bits);
        if value.is_finite() {
            // SAFETY: `out` is initialised and `value` is finite.
            unsafe { gmp::mpf_set_d(out.as_raw_mut(), value) };
        }
        out
    }

    fn from_u32(value: u32, bits: u32) -> Self {
        let mut out = GmpFloat::init(bits);
        // SAFETY: `out` is initialised.
        unsafe { gmp::mpf_set_ui(out.as_raw_mut(), value.into()) };
        out
    }

    fn prec(&self) -> u32 {
        // SAFETY: `self.inner` is initialised.
        let bits = unsafe { gmp::mpf_get_prec(self.as_raw()) };
        u32::try_from(bits).unwrap_or(u32::MAX)
    }

    fn to_f64(&self) -> f64 {
        let mut exp: c_long = 0;
        // SAFETY: `self.inner` is initialised and `exp` is a valid out-pointer.
        let mantissa = unsafe { gmp::mpf_get_d_2exp(&mut exp, self.as_raw()) };
        ldexp(mantissa, exp)
    }

    fn is_zero(&self) -> bool {
        self.sign() == Ordering::Equal
    }

    fn is_finite(&self) -> bool {
        true
    }

    fn abs(&self) -> Self {
        let mut out = GmpFloat::init(self.prec());
        // SAFETY: both values are initialised and distinct.
        unsafe { gmp::mpf_abs(out.as_raw_mut(), self.as_raw()) };
        out
    }

    fn mul_pow2(&mut self, exp: i32) {
        let shift = bitcnt_t::from(exp.unsigned_abs());
        let p = self.as_raw_mut();
        // SAFETY: `p` points to an initialised value; GMP allows the
        // destination to alias the source.
        unsafe {
            if exp >= 0 {
                gmp::mpf_mul_2exp(p, p, shift);
            } else {
                gmp::mpf_div_2exp(p, p, shift);
            }
        }
    }
}

impl AddAssign<&GmpFloat> for GmpFloat {
    fn add_assign(&mut self, rhs: &GmpFloat) {
        let p = self.as_raw_mut();
        // SAFETY: all operands are initialised; aliasing rop/op1 is allowed.
        unsafe { gmp::mpf_add(p, p, rhs.as_raw()) };
    }
}

impl SubAssign<&GmpFloat> for GmpFloat {
    fn sub_assign(&mut self, rhs: &GmpFloat) {
        let p = self.as_raw_mut();
        // SAFETY: all operands are initialised; aliasing rop/op1 is allowed.
        unsafe { gmp::mpf_sub(p, p, rhs.as_raw()) };
    }
}

impl MulAssign<&GmpFloat> for GmpFloat {
    fn mul_assign(&mut self, rhs: &GmpFloat) {
        let p = self.as_raw_mut();
        // SAFETY: all operands are initialised; aliasing rop/op1 is allowed.
        unsafe { gmp::mpf_mul(p, p, rhs.as_raw()) };
    }
}

impl DivAssign<&GmpFloat> for GmpFloat {
    /// # Panics
    ///
    /// If `rhs` is zero.
    fn div_assign(&mut self, rhs: &GmpFloat) {
        // GMP raises SIGFPE on division by zero.
        assert!(!rhs.is_zero(), "GmpFloat division by zero");
        let p = self.as_raw_mut();
        // SAFETY: all operands are initialised, `rhs` is non-zero and
        // aliasing rop/op1 is allowed.
        unsafe { gmp::mpf_div(p, p, rhs.as_raw()) };
    }
}
