//! Check-mode selection for a batch, uniform or recycled per element.
use crate::batch::recycle::recycled;

/// Check-mode flags for a batch.
///
/// Variants:
/// - `Uniform(flag)`: the same flag for every element.
/// - `Recycled(flags)`: element `i` uses `flags[i mod flags.len()]`. An empty
///   vector behaves like the default (`true`).
///
/// Default: `Uniform(true)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckModes {
    Uniform(bool),
    Recycled(Vec<bool>),
}

impl CheckModes {
    /// Check-mode flag for output element `idx`.
    pub fn at(&self, idx: usize) -> bool {
        match self {
            CheckModes::Uniform(flag) => *flag,
            CheckModes::Recycled(flags) => recycled(flags, idx).copied().unwrap_or(true),
        }
    }
}

impl Default for CheckModes {
    fn default() -> Self {
        CheckModes::Uniform(true)
    }
}

impl From<bool> for CheckModes {
    fn from(flag: bool) -> Self {
        CheckModes::Uniform(flag)
    }
}

impl From<Vec<bool>> for CheckModes {
    fn from(flags: Vec<bool>) -> Self {
        CheckModes::Recycled(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify that per-element flags recycle and that an empty vector falls
    // back to check mode on.
    //
    // Given
    // -----
    // - Recycled([true, false]), Recycled([]) and Uniform(false).
    //
    // Expect
    // ------
    // - Alternating flags, always true, and always false respectively.
    fn check_modes_recycle_and_default() {
        let alternating = CheckModes::from(vec![true, false]);
        let empty = CheckModes::from(Vec::new());
        let off = CheckModes::from(false);

        for idx in 0..5 {
            assert_eq!(alternating.at(idx), idx % 2 == 0);
            assert!(empty.at(idx));
            assert!(!off.at(idx));
        }
        assert!(CheckModes::default().at(3));
    }
}
