//! Error types for distribution construction

use std::fmt;

/// Errors that can occur when building a [`DamageRollDistribution`].
///
/// A move that deals no damage (zero power, immunity) is represented by the
/// absence of a distribution, so `EmptyDistribution` always points at a bug
/// in whatever produced the entries.
///
/// [`DamageRollDistribution`]: crate::distribution::DamageRollDistribution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributionError {
    /// No damage values were given.
    EmptyDistribution,
    /// A damage value was given a multiplicity of zero.
    ZeroMultiplicity { damage: u32 },
    /// A damage value of zero was given.
    ZeroDamage,
    /// A damage sum or multiplicity total does not fit its integer type.
    Overflow,
    /// Textual distribution could not be parsed.
    Parse(String),
}

impl fmt::Display for DistributionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDistribution => write!(f, "distribution has no damage values"),
            Self::ZeroMultiplicity { damage } => {
                write!(f, "damage value {damage} has a multiplicity of zero")
            }
            Self::ZeroDamage => write!(f, "damage values must be positive"),
            Self::Overflow => write!(f, "damage or multiplicity total overflows"),
            Self::Parse(s) => write!(f, "invalid distribution: {s}"),
        }
    }
}

impl std::error::Error for DistributionError {}
