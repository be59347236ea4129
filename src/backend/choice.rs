//! Backend selection — which arbitrary-precision representation a batch uses.
//!
//! [`BackendChoice`] is parsed once per call from a user-facing name and then
//! dispatched to a monomorphised evaluator; it never changes mid-batch.
use std::{fmt, str::FromStr};

use crate::errors::HypergeoError;

/// Choice of arbitrary-precision floating-point representation.
///
/// Variants:
/// - `Gmp`: GMP `mpf_t` floats (precision rounded up to whole limbs, truncating
///   arithmetic).
/// - `Mpfr`: MPFR floats via `rug::Float` (exact bit precision, correctly
///   rounded arithmetic). This is the default.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names (`"gmp"`,
/// `"mpfr"`), ignoring surrounding whitespace. Unknown names return
/// `HypergeoError::UnknownBackend`; there is no silent fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackendChoice {
    Gmp,
    #[default]
    Mpfr,
}

impl BackendChoice {
    /// Every supported backend, in a stable order.
    pub const ALL: [BackendChoice; 2] = [BackendChoice::Gmp, BackendChoice::Mpfr];

    /// Canonical lowercase name, as accepted by `FromStr`.
    pub fn name(&self) -> &'static str {
        match self {
            BackendChoice::Gmp => "gmp",
            BackendChoice::Mpfr => "mpfr",
        }
    }
}

impl fmt::Display for BackendChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackendChoice {
    type Err = HypergeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gmp" => Ok(BackendChoice::Gmp),
            "mpfr" => Ok(BackendChoice::Mpfr),
            _ => Err(HypergeoError::UnknownBackend { name: s.to_string() }),
        }
    }
}
