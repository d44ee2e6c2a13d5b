//! Travel cost type.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

use serde::Serialize;

use super::DomainError;

/// A finite, non-negative travel cost.
///
/// Edge weights, tentative distances and thresholds all share this unit.
/// Non-negativity is what lets a bounded search stop at the first frontier
/// entry over the threshold, so it is enforced at construction.
///
/// # Examples
///
/// ```
/// use reach_server::domain::Cost;
///
/// let walk = Cost::new(5.0).unwrap();
/// assert_eq!((walk + walk).value(), 10.0);
///
/// assert!(Cost::new(-1.0).is_err());
/// assert!(Cost::new(f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, Default, Serialize)]
#[serde(transparent)]
pub struct Cost(f64);

impl Cost {
    /// The zero cost, used for virtual source links.
    pub const ZERO: Cost = Cost(0.0);

    /// Validate a raw cost.
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::InvalidCost(value));
        }
        // Normalise -0.0 so equal costs are bitwise equal.
        Ok(Cost(value + 0.0))
    }

    /// Returns the cost as a float.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Add for Cost {
    type Output = Cost;

    /// Saturates at `f64::MAX` instead of overflowing to infinity.
    fn add(self, rhs: Cost) -> Cost {
        Cost((self.0 + rhs.0).min(f64::MAX))
    }
}

impl PartialEq for Cost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Debug for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cost({})", self.0)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any finite non-negative value is accepted unchanged
        #[test]
        fn valid_always_accepted(v in 0.0f64..1e12) {
            prop_assert_eq!(Cost::new(v).unwrap().value(), v);
        }

        /// Negative values are always rejected
        #[test]
        fn negative_rejected(v in -1e12f64..-1e-9) {
            prop_assert!(Cost::new(v).is_err());
        }

        /// Addition never decreases a cost
        #[test]
        fn add_is_monotone(a in 0.0f64..1e6, b in 0.0f64..1e6) {
            let ca = Cost::new(a).unwrap();
            let cb = Cost::new(b).unwrap();
            prop_assert!(ca + cb >= ca);
            prop_assert!(ca + cb >= cb);
        }
    }
}
