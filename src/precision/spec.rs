//! Precision requests and the resolved working precision.
//!
//! - [`PrecisionSpec`]: what the caller asked for (unset, bits or decimal
//!   digits).
//! - [`WorkingPrecision`]: the concrete bit count a summation runs at.
//!
//! Convention: explicit requests are validated when they are built, so a
//! `PrecisionSpec` that exists is always usable. Resolution never fails.
use std::num::NonZeroU32;

use crate::{
    errors::{HypergeoError, HypergeoResult},
    precision::controller::default_bits,
};

/// Mantissa bits of an IEEE-754 double.
pub const F64_MANTISSA_BITS: u32 = 53;

/// Bits added on top of the output width for the default precision.
pub const GUARD_BITS: u32 = 64;

/// Upper bound on any explicit precision, in bits.
pub const MAX_PRECISION_BITS: u32 = 1 << 20;

/// Upper bound on the derived default precision, in bits.
pub const MAX_DEFAULT_BITS: u32 = 8192;

/// Requested working precision.
///
/// Variants:
/// - `Default`: derive the precision from the output width plus a
///   cancellation allowance for the concrete series (see
///   [`default_bits`]).
/// - `Bits(n)`: exactly `n` bits of mantissa.
/// - `Digits(d)`: `d` significant decimal digits, converted with
///   [`digits_to_bits`].
///
/// Construction:
/// - [`PrecisionSpec::bits`] / [`PrecisionSpec::digits`] take raw integers as
///   they arrive from bindings and reject values ≤ 0
///   (`NonPositivePrecision`) or above [`MAX_PRECISION_BITS`]
///   (`PrecisionTooLarge`). Values are never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrecisionSpec {
    #[default]
    Default,
    Bits(NonZeroU32),
    Digits(NonZeroU32),
}

impl PrecisionSpec {
    /// Explicit precision in bits.
    ///
    /// Errors
    /// ------
    /// - `NonPositivePrecision` if `value <= 0`.
    /// - `PrecisionTooLarge` if `value > MAX_PRECISION_BITS`.
    pub fn bits(value: i64) -> HypergeoResult<Self> {
        let n = positive(value)?;
        check_bits(u64::from(n.get()))?;
        Ok(PrecisionSpec::Bits(n))
    }

    /// Explicit precision in significant decimal digits.
    ///
    /// Errors
    /// ------
    /// - `NonPositivePrecision` if `value <= 0`.
    /// - `PrecisionTooLarge` if the converted bit count exceeds
    ///   `MAX_PRECISION_BITS`.
    pub fn digits(value: i64) -> HypergeoResult<Self> {
        let n = positive(value)?;
        check_bits(digits_to_bits(n.get()))?;
        Ok(PrecisionSpec::Digits(n))
    }

    /// Bit count of an explicit request; `None` when unset.
    pub fn explicit_bits(&self) -> Option<u32> {
        match self {
            PrecisionSpec::Default => None,
            PrecisionSpec::Bits(n) => Some(n.get()),
            PrecisionSpec::Digits(d) => {
                let bits = digits_to_bits(d.get()).min(u64::from(MAX_PRECISION_BITS));
                Some(bits as u32)
            }
        }
    }

    /// Resolve to a concrete working precision for one series.
    ///
    /// Explicit requests are applied verbatim; the default depends on the
    /// parameters through the cancellation estimate.
    pub fn resolve(&self, upper: &[f64], lower: &[f64], z: f64) -> WorkingPrecision {
        match self.explicit_bits() {
            Some(bits) => WorkingPrecision { bits, explicit: true },
            None => WorkingPrecision { bits: default_bits(upper, lower, z), explicit: false },
        }
    }
}

/// Concrete precision a summation runs at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingPrecision {
    pub bits: u32,
    pub explicit: bool,
}

impl WorkingPrecision {
    pub fn bits(&self) -> u32 {
        self.bits
    }
}

/// `ceil(digits · log2(10))`.
pub fn digits_to_bits(digits: u32) -> u64 {
    (f64::from(digits) * std::f64::consts::LOG2_10).ceil() as u64
}

fn positive(value: i64) -> HypergeoResult<NonZeroU32> {
    if value <= 0 {
        return Err(HypergeoError::NonPositivePrecision { value });
    }
    u32::try_from(value)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or(HypergeoError::PrecisionTooLarge { bits: value as u64, max: MAX_PRECISION_BITS })
}

fn check_bits(bits: u64) -> HypergeoResult<()> {
    if bits > u64::from(MAX_PRECISION_BITS) {
        return Err(HypergeoError::PrecisionTooLarge { bits, max: MAX_PRECISION_BITS });
    }
    Ok(())
}
