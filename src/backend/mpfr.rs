//! MPFR backend — `rug::Float` behind the [`MultiPrecision`] contract.
//!
//! MPFR carries an exact bit precision per value and rounds every operation
//! to nearest, so this backend is the reference against which the GMP backend
//! is compared.
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use rug::Float;

use crate::backend::{choice::BackendChoice, traits::MultiPrecision};

/// MPFR-backed arbitrary-precision float.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub struct MpfrFloat {
    inner: Float,
}

impl MpfrFloat {
    /// Borrow the underlying `rug::Float`.
    pub fn as_float(&self) -> &Float {
        &self.inner
    }
}

impl MultiPrecision for MpfrFloat {
    const BACKEND: BackendChoice = BackendChoice::Mpfr;

    fn zero(bits: u32) -> Self {
        MpfrFloat { inner: Float::new(bits) }
    }

    fn from_f64(value: f64, bits: u32) -> Self {
        MpfrFloat { inner: Float::with_val(bits, value) }
    }

    fn from_u32(value: u32, bits: u32) -> Self {
        MpfrFloat { inner: Float::with_val(bits, value) }
    }

    fn prec(&self) -> u32 {
        self.inner.prec()
    }

    fn to_f64(&self) -> f64 {
        self.inner.to_f64()
    }

    fn is_zero(&self) -> bool {
        self.inner.is_zero()
    }

    fn is_finite(&self) -> bool {
        self.inner.is_finite()
    }

    fn abs(&self) -> Self {
        MpfrFloat { inner: self.inner.clone().abs() }
    }

    fn mul_pow2(&mut self, exp: i32) {
        self.inner <<= exp;
    }
}

impl AddAssign<&MpfrFloat> for MpfrFloat {
    fn add_assign(&mut self, rhs: &MpfrFloat) {
        self.inner += &rhs.inner;
    }
}

impl SubAssign<&MpfrFloat> for MpfrFloat {
    fn sub_assign(&mut self, rhs: &MpfrFloat) {
        self.inner -= &rhs.inner;
    }
}

impl MulAssign<&MpfrFloat> for MpfrFloat {
    fn mul_assign(&mut self, rhs: &MpfrFloat) {
        self.inner *= &rhs.inner;
    }
}

impl DivAssign<&MpfrFloat> for MpfrFloat {
    fn div_assign(&mut self, rhs: &MpfrFloat) {
        self.inner /= &rhs.inner;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify that MPFR keeps the exact requested precision and rounds the
    // final narrowing to nearest.
    //
    // Given
    // -----
    // - 1/3 computed at 200 bits.
    //
    // Expect
    // ------
    // - `prec()` reports exactly 200 and `to_f64` equals the correctly
    //   rounded double 1.0 / 3.0.
    fn mpfr_keeps_exact_precision_and_rounds_to_nearest() {
        // Arrange
        let mut x = MpfrFloat::one(200);
        let three = MpfrFloat::from_u32(3, 200);

        // Act
        x /= &three;

        // Assert
        assert_eq!(x.prec(), 200);
        assert_eq!(x.to_f64(), 1.0 / 3.0);
    }

    #[test]
    fn mpfr_division_by_zero_is_not_finite() {
        let mut x = MpfrFloat::one(64);
        x /= &MpfrFloat::zero(64);
        assert!(!x.is_finite());
        assert!(x.as_float().is_infinite());
    }
}
