//! Generic hypergeometric series summation.
//!
//! Purpose
//! -------
//! Sum `pFq(upper; lower; z) = Σ_k t_k` with
//! `t_0 = 1`, `t_{k+1} = t_k · ∏(U_i + k) / ∏(L_j + k) · z / (k + 1)`
//! in any [`MultiPrecision`] backend, and narrow only the final sum to `f64`.
//!
//! Key behaviors
//! -------------
//! - Non-finite inputs are never summed ([`SeriesStatus::NonFiniteInput`]).
//! - With check mode on, [`check_well_posed`] runs first; a rejection yields
//!   NaN and a `warn!` diagnostic.
//! - `z = 0` returns exactly 1 once the checks pass.
//! - Direct summation stops, in order of precedence at each step `k`, when:
//!   1. a numerator factor `U_i + k` is exactly zero: the series is a
//!      polynomial and the partial sum is exact ([`SeriesStatus::Terminated`]);
//!   2. a denominator factor `L_j + k` is exactly zero: pole, NaN
//!      ([`SeriesStatus::Pole`]);
//!   3. `|t_{k+1}| ≤ |sum| · 2^(−target)` once every shifted parameter is
//!      positive ([`SeriesStatus::Converged`]);
//!   4. the sum leaves the finite range ([`SeriesStatus::Overflow`]);
//!   5. `max_iter` terms were added ([`SeriesStatus::IterationLimit`]): NaN
//!      under check mode, the partial sum otherwise.
//! - Convergent `p = q + 1` series on `|z| = 1` decay only like a power of
//!   `k`; their partial sums are extrapolated with the Levin u-transform
//!   ([`SeriesStatus::Extrapolated`]) instead of being summed to the bound.
//! - Every `checkpoint_terms` terms the caller's [`Interrupt`] is polled; a
//!   stop request aborts with `HypergeoError::Cancelled`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All operands of one summation share one precision: the resolved working
//!   precision, plus [`EXTRAPOLATION_GUARD_BITS`] on the extrapolated path.
//! - The stopping target is the output width plus guard bits
//!   (`F64_MANTISSA_BITS + GUARD_BITS`), or the working precision when that
//!   is smaller. Extra working bits only protect the arithmetic.
//! - Shifted parameters and `k + 1` are carried in the backend type and
//!   advanced by exact additions of one, so integer parameters hit zero
//!   exactly.
//! - Every request is independent; repeated evaluation is bit-identical.
use tracing::{debug, warn};

use crate::{
    backend::{BackendChoice, GmpFloat, MpfrFloat, MultiPrecision},
    batch::Interrupt,
    errors::{HypergeoError, HypergeoResult},
    precision::{F64_MANTISSA_BITS, GUARD_BITS},
    series::{
        checks::{Rejection, check_well_posed, converges_algebraically},
        options::{EvaluationRequest, SeriesOptions},
    },
};

/// Bits added to the working precision while extrapolating; the Levin
/// weights cancel by roughly two bits per order on logarithmic series.
pub const EXTRAPOLATION_GUARD_BITS: u32 = 256;

/// Highest Levin order tried before reporting `IterationLimit`.
pub const MAX_EXTRAPOLATION_ORDER: usize = 96;

/// How a summation ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesStatus {
    /// Newest term fell below the precision-derived threshold.
    Converged,
    /// Successive Levin estimates agreed to the precision-derived threshold.
    Extrapolated,
    /// A numerator factor vanished; the polynomial sum is exact.
    Terminated,
    /// A denominator factor vanished before any numerator factor did.
    Pole,
    /// The iteration bound was reached first.
    IterationLimit,
    /// The running sum stopped being finite.
    Overflow,
    /// An argument or parameter was NaN or infinite.
    NonFiniteInput,
    /// Check mode refused the series.
    Rejected(Rejection),
}

impl SeriesStatus {
    /// Whether the value is a trustworthy evaluation.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            SeriesStatus::Converged | SeriesStatus::Extrapolated | SeriesStatus::Terminated
        )
    }
}

/// Outcome of one summation.
///
/// Fields:
/// - `value`: the result as returned by the public entrypoints (NaN on
///   failure, except the best-effort partial sum of an unchecked
///   iteration-limit or overflow stop).
/// - `status`: why summation stopped.
/// - `terms`: number of terms added, including `t_0`.
/// - `bits`: the resolved working precision.
/// - `backend`: backend the sum was computed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesReport {
    pub value: f64,
    pub status: SeriesStatus,
    pub terms: usize,
    pub bits: u32,
    pub backend: BackendChoice,
}

impl SeriesReport {
    fn failed(status: SeriesStatus, terms: usize, bits: u32, backend: BackendChoice) -> Self {
        SeriesReport { value: f64::NAN, status, terms, bits, backend }
    }
}

/// Evaluate one request in the backend named by `backend`.
///
/// Errors
/// ------
/// - `HypergeoError::Cancelled { completed: 0 }` if `interrupt` fires
///   during the summation.
pub fn evaluate_request(
    request: &EvaluationRequest<'_>, options: &SeriesOptions, backend: BackendChoice,
    interrupt: &dyn Interrupt,
) -> HypergeoResult<SeriesReport> {
    match backend {
        BackendChoice::Mpfr => sum_series::<MpfrFloat>(request, options, interrupt),
        BackendChoice::Gmp => sum_series::<GmpFloat>(request, options, interrupt),
    }
}

/// Sum one request in backend `F`.
///
/// Parameters
/// ----------
/// - `request`: parameters, argument, precision request and check-mode flag.
/// - `options`: iteration bound and term checkpoint stride.
/// - `interrupt`: polled every `options.checkpoint_terms` terms.
///
/// Returns
/// -------
/// A [`SeriesReport`]; numerical failure is reported through its status and
/// never as an error.
///
/// Errors
/// ------
/// - `HypergeoError::Cancelled { completed: 0 }` if `interrupt` fires. No
///   state survives the abort; re-invoking sums from scratch.
pub fn sum_series<F: MultiPrecision>(
    request: &EvaluationRequest<'_>, options: &SeriesOptions, interrupt: &dyn Interrupt,
) -> HypergeoResult<SeriesReport> {
    let EvaluationRequest { upper, lower, z, precision, check_mode } = *request;
    let bits = precision.resolve(upper, lower, z).bits();
    let backend = F::BACKEND;

    if !request.is_finite() {
        if check_mode {
            warn!(p = upper.len(), q = lower.len(), z, reason = "non_finite", "series rejected");
        }
        return Ok(SeriesReport::failed(SeriesStatus::NonFiniteInput, 0, bits, backend));
    }

    if check_mode {
        if let Err(rejection) = check_well_posed(upper, lower, z) {
            warn!(
                p = upper.len(),
                q = lower.len(),
                z,
                reason = rejection.reason(),
                detail = %rejection,
                "series rejected"
            );
            let status = SeriesStatus::Rejected(rejection);
            return Ok(SeriesReport::failed(status, 0, bits, backend));
        }
    }

    if z == 0.0 {
        let status = SeriesStatus::Converged;
        return Ok(SeriesReport { value: 1.0, status, terms: 1, bits, backend });
    }

    let target = target_bits(bits);
    let checkpoint = TermCheckpoint::new(options.checkpoint_terms, interrupt);
    let (status, sum, terms) = if converges_algebraically(upper, lower, z) {
        let guarded = bits.saturating_add(EXTRAPOLATION_GUARD_BITS);
        extrapolate(TermWalk::<F>::new(upper, lower, z, guarded), target, &checkpoint)?
    } else {
        let max_iter = u32::try_from(options.max_iter).unwrap_or(u32::MAX);
        sum_direct(TermWalk::<F>::new(upper, lower, z, bits), max_iter, target, &checkpoint)?
    };

    let value = match status {
        SeriesStatus::Converged | SeriesStatus::Extrapolated | SeriesStatus::Terminated => {
            sum.to_f64()
        }
        SeriesStatus::IterationLimit | SeriesStatus::Overflow => {
            warn!(
                p = upper.len(),
                q = lower.len(),
                z,
                terms,
                bits,
                check_mode,
                reason = ?status,
                "series did not converge"
            );
            if check_mode { f64::NAN } else { sum.to_f64() }
        }
        _ => f64::NAN,
    };

    debug!(backend = %backend, bits, terms, status = ?status, "series summed");
    Ok(SeriesReport { value, status, terms, bits, backend })
}

/// Relative accuracy, in bits, the stopping rules aim for.
fn target_bits(bits: u32) -> u32 {
    bits.min(F64_MANTISSA_BITS + GUARD_BITS)
}

/// Interrupt polling on a term stride.
struct TermCheckpoint<'a> {
    stride: usize,
    interrupt: &'a dyn Interrupt,
}

impl<'a> TermCheckpoint<'a> {
    fn new(stride: usize, interrupt: &'a dyn Interrupt) -> Self {
        Self { stride: stride.max(1), interrupt }
    }

    /// `completed` is the batch-level element count; the driver fills it in.
    fn poll(&self, terms: usize) -> HypergeoResult<()> {
        if terms % self.stride == 0 && self.interrupt.should_stop() {
            return Err(HypergeoError::Cancelled { completed: 0 });
        }
        Ok(())
    }
}

/// Outcome of one recurrence step.
enum Step {
    Advanced,
    Terminated,
    Pole,
}

/// Term recurrence state: `t_k`, the shifted parameters `U_i + k` and
/// `L_j + k`, and `k + 1`, all at one precision.
struct TermWalk<F> {
    ups: Vec<F>,
    lows: Vec<F>,
    arg: F,
    one: F,
    zero: F,
    next_index: F,
    term: F,
    bits: u32,
}

impl<F: MultiPrecision> TermWalk<F> {
    fn new(upper: &[f64], lower: &[f64], z: f64, bits: u32) -> Self {
        TermWalk {
            ups: upper.iter().map(|&u| F::from_f64(u, bits)).collect(),
            lows: lower.iter().map(|&l| F::from_f64(l, bits)).collect(),
            arg: F::from_f64(z, bits),
            one: F::one(bits),
            zero: F::zero(bits),
            next_index: F::one(bits),
            term: F::one(bits),
            bits,
        }
    }

    /// Whether every shifted parameter is positive.
    fn settled(&self) -> bool {
        self.ups.iter().chain(&self.lows).all(|x| *x > self.zero)
    }

    /// Replace `t_k` by `t_{k+1}` unless a shifted parameter is zero.
    fn advance(&mut self) -> Step {
        if self.ups.iter().any(|u| u.is_zero()) {
            return Step::Terminated;
        }
        if self.lows.iter().any(|l| l.is_zero()) {
            return Step::Pole;
        }

        for u in &self.ups {
            self.term *= u;
        }
        for l in &self.lows {
            self.term /= l;
        }
        self.term *= &self.arg;
        self.term /= &self.next_index;

        for u in &mut self.ups {
            *u += &self.one;
        }
        for l in &mut self.lows {
            *l += &self.one;
        }
        self.next_index += &self.one;
        Step::Advanced
    }
}

/// Add terms until one of the direct stopping rules fires.
fn sum_direct<F: MultiPrecision>(
    mut walk: TermWalk<F>, max_iter: u32, target: u32, checkpoint: &TermCheckpoint<'_>,
) -> HypergeoResult<(SeriesStatus, F, usize)> {
    let mut sum = walk.term.clone();
    let mut terms = 1_usize;
    let mut settled = false;
    let shift = -i32::try_from(target).unwrap_or(i32::MAX);

    let status = 'sum: {
        for _ in 0..max_iter {
            checkpoint.poll(terms)?;
            if !settled {
                settled = walk.settled();
            }
            match walk.advance() {
                Step::Advanced => {}
                Step::Terminated => break 'sum SeriesStatus::Terminated,
                Step::Pole => break 'sum SeriesStatus::Pole,
            }

            sum += &walk.term;
            terms += 1;

            if !sum.is_finite() {
                break 'sum SeriesStatus::Overflow;
            }
            if settled {
                let mut bound = sum.abs();
                bound.mul_pow2(shift);
                if walk.term.abs() <= bound {
                    break 'sum SeriesStatus::Converged;
                }
            }
        }
        SeriesStatus::IterationLimit
    };
    Ok((status, sum, terms))
}

/// Extrapolate the partial sums `s_m` of an algebraically convergent series.
///
/// Order `k` combines `s_0..s_k` with the remainder estimates
/// `ω_m = (m + 1)·t_m`. The estimate is accepted once two consecutive
/// differences between successive orders fall below `2^-target` of it.
fn extrapolate<F: MultiPrecision>(
    mut walk: TermWalk<F>, target: u32, checkpoint: &TermCheckpoint<'_>,
) -> HypergeoResult<(SeriesStatus, F, usize)> {
    let bits = walk.bits;
    let shift = -i32::try_from(target).unwrap_or(i32::MAX);
    let mut sum = walk.term.clone();
    let mut sums = vec![sum.clone()];
    let mut omegas = vec![walk.term.clone()];
    let mut index = F::one(bits);
    let mut previous: Option<F> = None;
    let mut agreed = 0_u32;

    for _ in 0..MAX_EXTRAPOLATION_ORDER {
        checkpoint.poll(sums.len())?;
        match walk.advance() {
            Step::Advanced => {}
            Step::Terminated => return Ok((SeriesStatus::Terminated, sum, sums.len())),
            Step::Pole => return Ok((SeriesStatus::Pole, sum, sums.len())),
        }

        sum += &walk.term;
        index += &walk.one;
        let mut omega = walk.term.clone();
        omega *= &index;
        sums.push(sum.clone());
        omegas.push(omega);

        let Some(estimate) = levin_u(&sums, &omegas, bits) else {
            previous = None;
            agreed = 0;
            continue;
        };
        if let Some(prev) = &previous {
            let mut diff = estimate.clone();
            diff -= prev;
            let mut bound = estimate.abs();
            bound.mul_pow2(shift);
            agreed = if diff.abs() <= bound { agreed + 1 } else { 0 };
            if agreed >= 2 {
                return Ok((SeriesStatus::Extrapolated, estimate, sums.len()));
            }
        }
        previous = Some(estimate);
    }
    Ok((SeriesStatus::IterationLimit, sum, sums.len()))
}

/// Levin u-transform of order `k = sums.len() - 1` with `β = 1`:
///
/// `Σ_j (−1)^j C(k, j) ((j + 1)/(k + 1))^(k−1) s_j/ω_j
///  / Σ_j (−1)^j C(k, j) ((j + 1)/(k + 1))^(k−1) /ω_j`.
///
/// `None` if an `ω_j` or the denominator is zero.
fn levin_u<F: MultiPrecision>(sums: &[F], omegas: &[F], bits: u32) -> Option<F> {
    let k = u32::try_from(sums.len().checked_sub(1)?).ok()?;
    let last = F::from_u32(k + 1, bits);
    let mut binom = F::one(bits);
    let mut num = F::zero(bits);
    let mut den = F::zero(bits);

    for (j, (s, omega)) in (0..=k).zip(sums.iter().zip(omegas)) {
        if omega.is_zero() {
            return None;
        }
        let mut ratio = F::from_u32(j + 1, bits);
        ratio /= &last;
        let mut weight = powi(&ratio, k.saturating_sub(1), bits);
        weight *= &binom;
        weight /= omega;
        let mut weighted = weight.clone();
        weighted *= s;

        if j % 2 == 0 {
            num += &weighted;
            den += &weight;
        } else {
            num -= &weighted;
            den -= &weight;
        }

        binom *= &F::from_u32(k - j, bits);
        binom /= &F::from_u32(j + 1, bits);
    }

    if den.is_zero() {
        return None;
    }
    num /= &den;
    Some(num)
}

/// `base^exp` by repeated squaring.
fn powi<F: MultiPrecision>(base: &F, mut exp: u32, bits: u32) -> F {
    let mut acc = F::one(bits);
    let mut square = base.clone();
    while exp > 0 {
        if exp & 1 == 1 {
            acc *= &square;
        }
        exp >>= 1;
        if exp > 0 {
            let factor = square.clone();
            square *= &factor;
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{batch::NeverInterrupt, precision::PrecisionSpec};
    use approx::assert_relative_eq;
    use std::cell::Cell;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the generic summation on both backends:
    // - closed forms (exp, geometric series, (1 - z)^-a, Bessel-type 0F1),
    // - slowly convergent series near and on the unit circle,
    // - polynomial termination and pole detection,
    // - check-mode rejection versus best-effort summation,
    // - the iteration bound and the z = 0 / non-finite short-circuits,
    // - cancellation handling by the default precision,
    // - interrupts raised in the middle of one summation.
    // -------------------------------------------------------------------------

    /// Fires on the `fire_at`-th poll (0-based) and counts polls.
    struct CountingInterrupt {
        polls: Cell<usize>,
        fire_at: usize,
    }

    impl Interrupt for CountingInterrupt {
        fn should_stop(&self) -> bool {
            let seen = self.polls.get();
            self.polls.set(seen + 1);
            seen >= self.fire_at
        }
    }

    fn req<'a>(
        upper: &'a [f64], lower: &'a [f64], z: f64, check_mode: bool,
    ) -> EvaluationRequest<'a> {
        EvaluationRequest::new(upper, lower, z, PrecisionSpec::Default, check_mode)
    }

    fn both_with(request: &EvaluationRequest<'_>, opts: &SeriesOptions) -> [SeriesReport; 2] {
        [
            sum_series::<MpfrFloat>(request, opts, &NeverInterrupt).unwrap(),
            sum_series::<GmpFloat>(request, opts, &NeverInterrupt).unwrap(),
        ]
    }

    fn both(request: &EvaluationRequest<'_>) -> [SeriesReport; 2] {
        both_with(request, &SeriesOptions::default())
    }

    #[test]
    // Purpose
    // -------
    // Verify closed forms on both backends.
    //
    // Given
    // -----
    // - 0F0(;;z) = exp(z) at z = 1.7,
    // - 1F0(1;;z) = 1 / (1 - z) at z = 0.3,
    // - 1F0(a;;z) = (1 - z)^-a at a = 2.5, z = -0.4,
    // - 2F1(1, 1; 2; z) = -ln(1 - z) / z at z = 0.5.
    //
    // Expect
    // ------
    // - Converged status and agreement to ~1e-15 relative.
    fn closed_forms_match() {
        let cases: [(&[f64], &[f64], f64, f64); 4] = [
            (&[], &[], 1.7, 1.7_f64.exp()),
            (&[1.0], &[], 0.3, 1.0 / 0.7),
            (&[2.5], &[], -0.4, 1.4_f64.powf(-2.5)),
            (&[1.0, 1.0], &[2.0], 0.5, -(0.5_f64.ln()) / 0.5),
        ];
        for (upper, lower, z, expected) in cases {
            for report in both(&req(upper, lower, z, true)) {
                assert_eq!(report.status, SeriesStatus::Converged, "{report:?}");
                assert_relative_eq!(report.value, expected, max_relative = 1e-15);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure series close to the edge of the unit disk converge under check
    // mode with the default options.
    //
    // Given
    // -----
    // - 2F1(1, 1; 2; 0.99) = -ln(0.01) / 0.99,
    // - 1F0(0.5;; 0.999) = 0.001^-0.5.
    //
    // Expect
    // ------
    // - Converged status well inside the iteration bound and agreement to
    //   ~1e-14 relative.
    fn series_near_the_unit_circle_converge() {
        let cases: [(&[f64], &[f64], f64, f64); 2] = [
            (&[1.0, 1.0], &[2.0], 0.99, -(0.01_f64.ln()) / 0.99),
            (&[0.5], &[], 0.999, 0.001_f64.powf(-0.5)),
        ];
        for (upper, lower, z, expected) in cases {
            for report in both(&req(upper, lower, z, true)) {
                assert_eq!(report.status, SeriesStatus::Converged, "{report:?}");
                assert!(report.terms < 200_000, "terms = {}", report.terms);
                assert_relative_eq!(report.value, expected, max_relative = 1e-14);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that convergent series on |z| = 1, which check mode accepts,
    // are evaluated by extrapolation rather than returned as NaN.
    //
    // Given
    // -----
    // - 2F1(1, 1; 3; 1) = Γ(3)Γ(1) / (Γ(2)Γ(2)) = 2,
    // - 2F1(0.5, 1; 2.25; 1) = Γ(2.25)Γ(0.75) / (Γ(1.75)Γ(1.25)) = 5/3,
    // - 2F1(1, 1; 2; -1) = ln 2,
    // - 1F0(0.5;; -1) = 2^-0.5.
    //
    // Expect
    // ------
    // - Extrapolated status with few terms and agreement to ~1e-14 relative,
    //   with and without check mode.
    fn unit_circle_series_are_extrapolated() {
        let cases: [(&[f64], &[f64], f64, f64); 4] = [
            (&[1.0, 1.0], &[3.0], 1.0, 2.0),
            (&[0.5, 1.0], &[2.25], 1.0, 5.0 / 3.0),
            (&[1.0, 1.0], &[2.0], -1.0, std::f64::consts::LN_2),
            (&[0.5], &[], -1.0, std::f64::consts::FRAC_1_SQRT_2),
        ];
        for (upper, lower, z, expected) in cases {
            for check_mode in [true, false] {
                for report in both(&req(upper, lower, z, check_mode)) {
                    assert_eq!(report.status, SeriesStatus::Extrapolated, "{report:?}");
                    assert!(report.terms <= MAX_EXTRAPOLATION_ORDER + 1);
                    assert_relative_eq!(report.value, expected, max_relative = 1e-14);
                }
            }
        }
    }

    #[test]
    fn divergent_unit_circle_series_are_not_extrapolated() {
        // 2F1(1, 1; 2; 1) is the harmonic series.
        let opts = SeriesOptions::new(1000).unwrap();
        for report in both_with(&req(&[1.0, 1.0], &[2.0], 1.0, false), &opts) {
            assert_eq!(report.status, SeriesStatus::IterationLimit);
            assert!(report.value > 7.0);
        }
        for report in both(&req(&[1.0, 1.0], &[2.0], 1.0, true)) {
            assert!(matches!(report.status, SeriesStatus::Rejected(_)));
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure a non-positive integer numerator turns the series into an exact
    // polynomial, even when a later denominator would be a pole.
    //
    // Given
    // -----
    // - 2F1(-2, 3; 4; 0.5) = 1 - 0.75 + 0.15 = 0.4.
    // - 1F1(-1; -3; 2) = 1 + (-1)/(-3)·2 = 5/3.
    //
    // Expect
    // ------
    // - Terminated status with terms = degree + 1 and exact values.
    fn terminating_series_are_exact() {
        for report in both(&req(&[-2.0, 3.0], &[4.0], 0.5, true)) {
            assert_eq!(report.status, SeriesStatus::Terminated);
            assert_eq!(report.terms, 3);
            assert_relative_eq!(report.value, 0.4, max_relative = 1e-15);
        }
        for report in both(&req(&[-1.0], &[-3.0], 2.0, true)) {
            assert_eq!(report.status, SeriesStatus::Terminated);
            assert_relative_eq!(report.value, 5.0 / 3.0, max_relative = 1e-15);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify pole handling with and without check mode.
    //
    // Given
    // -----
    // - 1F1(1; -2; 0.5).
    //
    // Expect
    // ------
    // - Check mode: rejected before summation, NaN.
    // - Best effort: the pole is reached at k = 2, NaN with Pole status.
    fn poles_yield_nan() {
        for report in both(&req(&[1.0], &[-2.0], 0.5, true)) {
            assert!(matches!(
                report.status,
                SeriesStatus::Rejected(Rejection::UncancelledPole { .. })
            ));
            assert!(report.value.is_nan());
        }
        for report in both(&req(&[1.0], &[-2.0], 0.5, false)) {
            assert_eq!(report.status, SeriesStatus::Pole);
            assert_eq!(report.terms, 3);
            assert!(report.value.is_nan());
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure the iteration bound returns NaN under check mode and the partial
    // sum otherwise.
    //
    // Given
    // -----
    // - 1F0(1;;0.9) (geometric series) with max_iter = 10.
    //
    // Expect
    // ------
    // - Check mode: NaN. Best effort: Σ_{k=0}^{10} 0.9^k.
    fn iteration_limit_respects_check_mode() {
        let opts = SeriesOptions::new(10).unwrap();
        let partial: f64 = (0..=10).map(|k| 0.9_f64.powi(k)).sum();

        let checked =
            sum_series::<MpfrFloat>(&req(&[1.0], &[], 0.9, true), &opts, &NeverInterrupt).unwrap();
        let loose =
            sum_series::<MpfrFloat>(&req(&[1.0], &[], 0.9, false), &opts, &NeverInterrupt).unwrap();

        assert_eq!(checked.status, SeriesStatus::IterationLimit);
        assert!(checked.value.is_nan());
        assert_eq!(loose.status, SeriesStatus::IterationLimit);
        assert_eq!(loose.terms, 11);
        assert_relative_eq!(loose.value, partial, max_relative = 1e-14);
    }

    #[test]
    // Purpose
    // -------
    // Verify check-mode divergence screening and best-effort summation of the
    // same divergent series.
    //
    // Given
    // -----
    // - 1F0(1;;2), outside the unit disk, with max_iter = 2000.
    //
    // Expect
    // ------
    // - Check mode: rejected, NaN.
    // - Best effort: the sum grows until the iteration bound and is not NaN.
    fn divergent_series_rejected_only_in_check_mode() {
        let opts = SeriesOptions::new(2000).unwrap();
        for report in both_with(&req(&[1.0], &[], 2.0, true), &opts) {
            assert!(matches!(
                report.status,
                SeriesStatus::Rejected(Rejection::OutsideUnitDisk { .. })
            ));
            assert!(report.value.is_nan());
        }
        for report in both_with(&req(&[1.0], &[], 2.0, false), &opts) {
            assert!(!report.status.is_success());
            assert!(!report.value.is_nan());
        }
    }

    #[test]
    fn zero_argument_and_non_finite_inputs() {
        for report in both(&req(&[3.0, -0.5], &[7.0], 0.0, true)) {
            assert_eq!(report.value, 1.0);
            assert!(report.status.is_success());
        }
        for report in both(&req(&[f64::NAN], &[1.0], 0.5, false)) {
            assert_eq!(report.status, SeriesStatus::NonFiniteInput);
            assert!(report.value.is_nan());
        }
        for report in both(&req(&[], &[], f64::INFINITY, true)) {
            assert_eq!(report.status, SeriesStatus::NonFiniteInput);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure the default precision absorbs cancellation in an alternating
    // series whose sum is far smaller than its largest term.
    //
    // Given
    // -----
    // - 0F0(;;-30) = exp(-30) ≈ 9.36e-14, largest term ≈ 7.8e11.
    //
    // Expect
    // ------
    // - Full double accuracy on both backends.
    fn default_precision_absorbs_cancellation() {
        for report in both(&req(&[], &[], -30.0, true)) {
            assert_eq!(report.status, SeriesStatus::Converged);
            assert!(report.bits > 117, "bits = {}", report.bits);
            assert_relative_eq!(report.value, (-30.0_f64).exp(), max_relative = 1e-14);
        }
    }

    #[test]
    fn negative_parameters_do_not_stop_summation_early() {
        // 1F1(-2.5; 1; 1): the term at k = 2 is small but the series goes on.
        let precise = PrecisionSpec::bits(256).unwrap();
        let reference = sum_series::<MpfrFloat>(
            &EvaluationRequest::new(&[-2.5], &[1.0], 1.0, precise, true),
            &SeriesOptions::default(),
            &NeverInterrupt,
        )
        .unwrap();
        for report in both(&req(&[-2.5], &[1.0], 1.0, true)) {
            assert_eq!(report.status, SeriesStatus::Converged);
            assert!(report.terms > 10);
            assert_relative_eq!(report.value, reference.value, max_relative = 1e-15);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that a summation polls the interrupt on its term stride and
    // aborts with `Cancelled` when it fires, on both summation paths.
    //
    // Given
    // -----
    // - Checkpoint stride 8 and an interrupt firing on its first poll.
    // - 1F0(1;;0.9), which needs hundreds of terms (direct path).
    // - 1F0(0.5;;-1), which needs ~30 extrapolation orders.
    //
    // Expect
    // ------
    // - `Cancelled { completed: 0 }` after exactly one poll in each case.
    // - With a silent interrupt the same requests succeed.
    fn interrupt_aborts_mid_series() {
        let opts = SeriesOptions::default().with_checkpoint_terms(8).unwrap();
        let direct = req(&[1.0], &[], 0.9, true);
        let extrapolated = req(&[0.5], &[], -1.0, true);

        for request in [direct, extrapolated] {
            // Arrange
            let interrupt = CountingInterrupt { polls: Cell::new(0), fire_at: 0 };

            // Act
            let result = sum_series::<GmpFloat>(&request, &opts, &interrupt);

            // Assert
            assert_eq!(result, Err(HypergeoError::Cancelled { completed: 0 }));
            assert_eq!(interrupt.polls.get(), 1);

            let quiet = CountingInterrupt { polls: Cell::new(0), fire_at: usize::MAX };
            let report = sum_series::<MpfrFloat>(&request, &opts, &quiet).unwrap();
            assert!(report.status.is_success());
            assert!(quiet.polls.get() >= 1);
        }
    }

    #[test]
    fn levin_transform_sums_a_rational_series_exactly() {
        // Σ 2 / ((m + 1)(m + 2)) = 2; order 3 is exact for this remainder.
        let bits = 256;
        let mut sums = Vec::new();
        let mut omegas = Vec::new();
        let mut s = MpfrFloat::zero(bits);
        for m in 0..4_u32 {
            let mut t = MpfrFloat::from_u32(2, bits);
            t /= &MpfrFloat::from_u32((m + 1) * (m + 2), bits);
            s += &t;
            t *= &MpfrFloat::from_u32(m + 1, bits);
            sums.push(s.clone());
            omegas.push(t);
        }
        let estimate = levin_u(&sums, &omegas, bits).unwrap();
        assert_relative_eq!(estimate.to_f64(), 2.0, max_relative = 1e-30);
        assert_eq!(powi(&MpfrFloat::from_u32(3, 64), 5, 64).to_f64(), 243.0);
    }

    #[test]
    fn dispatch_selects_backend() {
        let request = req(&[0.5], &[1.5], -0.25, true);
        let opts = SeriesOptions::default();
        for backend in BackendChoice::ALL {
            let report = evaluate_request(&request, &opts, backend, &NeverInterrupt).unwrap();
            assert_eq!(report.backend, backend);
            assert!(report.status.is_success());
        }
    }
}
