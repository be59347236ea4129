//! Check-mode validation — pole rule and divergence screening.
//!
//! Purpose
//! -------
//! Decide, before any summation, whether `pFq(upper; lower; z)` is a
//! well-posed convergent series. Runs only when check mode is on.
//!
//! Key behaviors
//! -------------
//! - Pole rule: a denominator parameter `L = -m` (non-positive integer) is
//!   accepted only if some numerator parameter `U = -n` (non-positive
//!   integer) with `n <= m` terminates the series no later than the pole.
//! - Divergence screening for non-terminating series:
//!   - `p > q + 1` and `z ≠ 0` diverges for every non-zero argument;
//!   - `p = q + 1` and `|z| > 1` lies outside the disk of convergence;
//!   - `p = q + 1` and `|z| = 1` converges only if `s = ΣL − ΣU` exceeds
//!     `0` (for `z = 1`) or `−1` (for `z = −1`).
//! - [`converges_algebraically`] identifies the accepted series on `|z| = 1`,
//!   which need extrapolation rather than direct summation.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite; the evaluator rejects non-finite inputs first.
//! - Checks are pure and never log; the evaluator reports rejections.
use std::fmt;

/// Why check mode refused to sum a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    /// `lower` is a non-positive integer with no terminating numerator.
    UncancelledPole { lower: f64 },
    /// `p > q + 1` with a non-zero argument.
    ExcessNumerators { p: usize, q: usize },
    /// `p = q + 1` with `|z| > 1`.
    OutsideUnitDisk { z: f64 },
    /// `p = q + 1` with `|z| = 1` and too small a parameter excess.
    UnitCircleDivergence { z: f64, excess: f64 },
}

impl Rejection {
    /// Short machine-friendly reason, used as a log field.
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::UncancelledPole { .. } => "pole",
            Rejection::ExcessNumerators { .. } => "excess_numerators",
            Rejection::OutsideUnitDisk { .. } => "outside_unit_disk",
            Rejection::UnitCircleDivergence { .. } => "unit_circle",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::UncancelledPole { lower } => {
                write!(f, "denominator parameter {lower} is a pole with no cancelling numerator")
            }
            Rejection::ExcessNumerators { p, q } => {
                write!(f, "{p}F{q} diverges for every non-zero argument")
            }
            Rejection::OutsideUnitDisk { z } => {
                write!(f, "|z| = {} lies outside the unit disk of convergence", z.abs())
            }
            Rejection::UnitCircleDivergence { z, excess } => {
                write!(f, "series diverges at z = {z} with parameter excess {excess}")
            }
        }
    }
}

/// `-x` as a count if `x` is a non-positive integer.
pub fn non_positive_integer(x: f64) -> Option<u64> {
    if x <= 0.0 && x.fract() == 0.0 && x > -(u64::MAX as f64) {
        Some((-x) as u64)
    } else {
        None
    }
}

/// Degree of the polynomial the series reduces to, if any numerator
/// parameter is a non-positive integer.
pub fn terminating_degree(upper: &[f64]) -> Option<u64> {
    upper.iter().filter_map(|&u| non_positive_integer(u)).min()
}

/// Validate a finite `pFq(upper; lower; z)` for summation.
///
/// Errors
/// ------
/// - The first [`Rejection`] found, poles first.
pub fn check_well_posed(upper: &[f64], lower: &[f64], z: f64) -> Result<(), Rejection> {
    let degree = terminating_degree(upper);

    for &l in lower {
        if let Some(m) = non_positive_integer(l) {
            match degree {
                Some(n) if n <= m => {}
                _ => return Err(Rejection::UncancelledPole { lower: l }),
            }
        }
    }

    if degree.is_some() || z == 0.0 {
        return Ok(());
    }

    let (p, q) = (upper.len(), lower.len());
    if p > q + 1 {
        return Err(Rejection::ExcessNumerators { p, q });
    }
    if p == q + 1 {
        let r = z.abs();
        if r > 1.0 {
            return Err(Rejection::OutsideUnitDisk { z });
        }
        if r == 1.0 && !converges_on_unit_circle(upper, lower, z) {
            let excess = parameter_excess(upper, lower);
            return Err(Rejection::UnitCircleDivergence { z, excess });
        }
    }
    Ok(())
}

/// `s = ΣL − ΣU`.
pub fn parameter_excess(upper: &[f64], lower: &[f64]) -> f64 {
    lower.iter().sum::<f64>() - upper.iter().sum::<f64>()
}

/// Whether a `p = q + 1` series at `z = ±1` converges: `s` must exceed `0`
/// at `z = 1` and `−1` at `z = −1`.
pub fn converges_on_unit_circle(upper: &[f64], lower: &[f64], z: f64) -> bool {
    let threshold = if z > 0.0 { 0.0 } else { -1.0 };
    parameter_excess(upper, lower) > threshold
}

/// Whether `pFq(upper; lower; z)` is a convergent, non-terminating,
/// pole-free `p = q + 1` series on `|z| = 1`.
///
/// Such series converge only algebraically (terms decay like a power of
/// `k`), so direct summation cannot reach a relative accuracy of `2^-b` in
/// any practical number of terms; the evaluator extrapolates them instead.
pub fn converges_algebraically(upper: &[f64], lower: &[f64], z: f64) -> bool {
    upper.len() == lower.len() + 1
        && z.abs() == 1.0
        && terminating_degree(upper).is_none()
        && lower.iter().all(|&l| non_positive_integer(l).is_none())
        && converges_on_unit_circle(upper, lower, z)
}
