//! Token amounts held by the treasury

use serde::{Deserialize, Serialize};

/// A non-negative quantity of the treasury's single asset
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Amount(pub u64);

impl Amount {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition; `None` on overflow
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction; `None` if `other` exceeds `self`
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_arithmetic() {
        assert_eq!(
            Amount::new(400).checked_add(Amount::new(600)),
            Some(Amount::new(1000))
        );
        assert_eq!(Amount::new(u64::MAX).checked_add(Amount::new(1)), None);
        assert_eq!(Amount::new(5).checked_sub(Amount::new(6)), None);
        assert_eq!(
            Amount::new(1000).checked_sub(Amount::new(500)),
            Some(Amount::new(500))
        );
    }

    #[test]
    fn test_ordering_and_display() {
        assert!(Amount::new(1) < Amount::new(2));
        assert!(Amount::zero().is_zero());
        assert_eq!(format!("{}", Amount::new(42)), "42");
    }
}
