//! Default working precision — output width, guard bits and a cancellation
//! allowance.
//!
//! Purpose
//! -------
//! Derive a precision that lets the final narrowing to `f64` be accurate even
//! when the series sum is much smaller than its largest term.
//!
//! Key behaviors
//! -------------
//! - [`default_bits`] = `F64_MANTISSA_BITS + GUARD_BITS + cancellation_bits`,
//!   capped at `MAX_DEFAULT_BITS`.
//! - [`cancellation_bits`] walks the term recurrence in `f64` log-magnitude
//!   form (so no intermediate overflows), tracking the largest term `M` and
//!   whether the sign ever flips. Alternating series with `M > 1` need
//!   `2·ceil(log2 M)` extra bits; all others need none.
//!
//! Invariants & assumptions
//! ------------------------
//! - The estimate never fails. Non-finite inputs, `z = 0` and series that hit
//!   a pole contribute no allowance; the evaluator rejects those cases on its
//!   own.
//! - The walk is bounded by the default series iteration bound; a divergent
//!   walk simply saturates at the cap. It stops early once the terms are
//!   negligible, or once every shifted parameter and `z` are positive (no
//!   later term can flip sign).
use crate::{
    precision::spec::{F64_MANTISSA_BITS, GUARD_BITS, MAX_DEFAULT_BITS},
    series::DEFAULT_MAX_ITER,
};

const ESTIMATE_MAX_TERMS: usize = DEFAULT_MAX_ITER;

/// Log-magnitude drop, relative to the largest term so far, below which the
/// walk stops once all shifted parameters are positive.
const NEGLIGIBLE_LN: f64 = 200.0 * std::f64::consts::LN_2;

/// Default precision in bits for `pFq(upper; lower; z)`.
pub fn default_bits(upper: &[f64], lower: &[f64], z: f64) -> u32 {
    let base = F64_MANTISSA_BITS + GUARD_BITS;
    base.saturating_add(cancellation_bits(upper, lower, z)).min(MAX_DEFAULT_BITS)
}

/// Extra bits needed to absorb cancellation in an alternating series.
pub fn cancellation_bits(upper: &[f64], lower: &[f64], z: f64) -> u32 {
    let finite = z.is_finite() && upper.iter().chain(lower).all(|v| v.is_finite());
    if !finite || z == 0.0 {
        return 0;
    }

    let ln_z = z.abs().ln();
    let mut ln_term = 0.0_f64;
    let mut ln_max = 0.0_f64;
    let mut alternates = false;

    for k in 0..ESTIMATE_MAX_TERMS {
        let kf = k as f64;
        let mut ratio_negative = z < 0.0;
        let mut settled = true;

        for &u in upper {
            let a = u + kf;
            if a == 0.0 {
                return allowance(alternates, ln_max);
            }
            ratio_negative ^= a < 0.0;
            settled &= a > 0.0;
            ln_term += a.abs().ln();
        }
        for &l in lower {
            let b = l + kf;
            if b == 0.0 {
                return 0;
            }
            ratio_negative ^= b < 0.0;
            settled &= b > 0.0;
            ln_term -= b.abs().ln();
        }
        ln_term += ln_z - (kf + 1.0).ln();

        alternates |= ratio_negative;
        ln_max = ln_max.max(ln_term);

        if settled && (ln_term < ln_max - NEGLIGIBLE_LN || (!alternates && z > 0.0)) {
            break;
        }
    }
    allowance(alternates, ln_max)
}

fn allowance(alternates: bool, ln_max: f64) -> u32 {
    if !alternates || ln_max <= 0.0 {
        return 0;
    }
    let log2_max = (ln_max / std::f64::consts::LN_2).ceil();
    let bits = 2.0 * log2_max;
    if bits >= f64::from(MAX_DEFAULT_BITS) { MAX_DEFAULT_BITS } else { bits as u32 }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the default precision derivation:
    // - non-alternating series keep the base precision,
    // - alternating series with large terms receive an allowance that grows
    //   with the largest term,
    // - degenerate inputs (z = 0, NaN, poles) contribute nothing,
    // - the cap on the default precision.
    // -------------------------------------------------------------------------

    const BASE: u32 = F64_MANTISSA_BITS + GUARD_BITS;

    #[test]
    // Purpose
    // -------
    // Verify that positive-term series need no cancellation allowance.
    //
    // Given
    // -----
    // - exp(30) as 0F0 and 2F1(1, 1; 2; 0.9).
    //
    // Expect
    // ------
    // - Zero extra bits; the default equals the base precision.
    fn positive_series_get_base_precision() {
        assert_eq!(cancellation_bits(&[], &[], 30.0), 0);
        assert_eq!(default_bits(&[1.0, 1.0], &[2.0], 0.9), BASE);
    }

    #[test]
    // Purpose
    // -------
    // Ensure alternating series with large terms get extra bits that scale
    // with the largest term.
    //
    // Given
    // -----
    // - exp(-20) and exp(-40) as 0F0. The largest term of exp(-x) is about
    //   x^x / x! ≈ e^x / sqrt(2πx).
    //
    // Expect
    // ------
    // - Both allowances are positive, roughly 2·x·log2(e), and the larger
    //   argument needs more bits.
    fn alternating_series_get_allowance() {
        // Act
        let small = cancellation_bits(&[], &[], -20.0);
        let large = cancellation_bits(&[], &[], -40.0);

        // Assert
        assert!(small > 40 && small < 60, "exp(-20) allowance {small}");
        assert!(large > 100 && large < 118, "exp(-40) allowance {large}");
        assert!(large > small);
        assert_eq!(default_bits(&[], &[], -20.0), BASE + small);
    }

    #[test]
    fn alternating_series_with_small_terms_get_nothing() {
        // Terms of exp(-0.5) never exceed 1.
        assert_eq!(cancellation_bits(&[], &[], -0.5), 0);
    }

    #[test]
    // Purpose
    // -------
    // Verify that degenerate inputs never inflate the precision.
    //
    // Given
    // -----
    // - z = 0, a NaN parameter, an infinite argument and a pole at L = -2.
    //
    // Expect
    // ------
    // - Zero extra bits in every case.
    fn degenerate_inputs_contribute_nothing() {
        assert_eq!(cancellation_bits(&[1.0], &[2.0], 0.0), 0);
        assert_eq!(cancellation_bits(&[f64::NAN], &[2.0], -50.0), 0);
        assert_eq!(cancellation_bits(&[], &[], f64::NEG_INFINITY), 0);
        assert_eq!(cancellation_bits(&[1.0], &[-2.0], -50.0), 0);
    }

    #[test]
    fn slowly_decaying_series_finish_the_walk() {
        // 2F1(1, 1; 3; -1) alternates with terms ~2/k²; the largest is t_0.
        assert_eq!(cancellation_bits(&[1.0, 1.0], &[3.0], -1.0), 0);
        // 1F0(0.5;; 0.999) never alternates.
        assert_eq!(cancellation_bits(&[0.5], &[], 0.999), 0);
    }

    #[test]
    fn default_precision_is_capped() {
        // 3F0 diverges; its terms grow without bound.
        let bits = default_bits(&[1.0, 1.0, 1.0], &[], -5.0);
        assert_eq!(bits, MAX_DEFAULT_BITS);
    }
}
