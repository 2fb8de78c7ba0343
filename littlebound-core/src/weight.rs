//! Extended non-negative edge weights.
//!
//! Every cell of a [`CostMatrix`](crate::CostMatrix) holds a [`Weight`]: either
//! a finite cost or the forbidden marker, which behaves as positive infinity.

use std::fmt;

/// Cost of a directed edge, or the marker for an edge that may not be used.
///
/// `Forbidden` orders after every finite value and equals only itself.
/// Subtracting from it yields `Forbidden` again, so reductions leave
/// forbidden cells untouched.
///
/// # Examples
/// ```
/// use littlebound_core::Weight;
///
/// assert!(Weight::Finite(u64::MAX) < Weight::Forbidden);
/// assert_eq!(Weight::Finite(7).saturating_sub(3), Weight::Finite(4));
/// assert_eq!(Weight::Forbidden.saturating_sub(3), Weight::Forbidden);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Option<u64>", into = "Option<u64>"))]
pub enum Weight {
    /// A usable edge with the given cost.
    Finite(u64),
    /// An edge excluded from every tour of the current branch.
    Forbidden,
}

impl Weight {
    /// The zero-cost weight produced by reductions.
    pub const ZERO: Self = Self::Finite(0);

    /// Return the finite cost, or `None` when forbidden.
    #[must_use]
    pub const fn finite(self) -> Option<u64> {
        match self {
            Self::Finite(value) => Some(value),
            Self::Forbidden => None,
        }
    }

    /// Whether the edge is forbidden.
    #[must_use]
    pub const fn is_forbidden(self) -> bool {
        matches!(self, Self::Forbidden)
    }

    /// Whether the weight is exactly a finite zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Finite(0))
    }

    /// Subtract a finite offset, clamping at zero.
    #[must_use]
    pub const fn saturating_sub(self, offset: u64) -> Self {
        match self {
            Self::Finite(value) => Self::Finite(value.saturating_sub(offset)),
            Self::Forbidden => Self::Forbidden,
        }
    }

    /// Add two weights; `Forbidden` absorbs everything.
    #[must_use]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Finite(lhs), Self::Finite(rhs_value)) => {
                Self::Finite(lhs.saturating_add(rhs_value))
            }
            _ => Self::Forbidden,
        }
    }
}

impl From<u64> for Weight {
    fn from(value: u64) -> Self {
        Self::Finite(value)
    }
}

impl From<Option<u64>> for Weight {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Self::Forbidden, Self::Finite)
    }
}

impl From<Weight> for Option<u64> {
    fn from(weight: Weight) -> Self {
        weight.finite()
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(value) => write!(f, "{value}"),
            Self::Forbidden => f.write_str("∞"),
        }
    }
}
