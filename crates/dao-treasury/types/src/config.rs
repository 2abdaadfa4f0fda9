//! Governance parameters

use crate::{TreasuryError, TreasuryResult};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Default voting window: seven days
pub const VOTING_PERIOD_SECS: u64 = 7 * 24 * 60 * 60;

/// Default quorum, as a percentage of current membership (rounded up)
pub const QUORUM_PERCENT: u8 = 33;

/// Default approval threshold, as a percentage of votes cast
pub const APPROVAL_PERCENT: u8 = 51;

/// Configuration for proposal voting
///
/// Missing fields fall back to the defaults when deserialized, so a
/// partial document only overrides what it names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernanceConfig {
    /// Length of the voting window after proposal creation
    pub voting_period_secs: u64,
    /// Minimum participation, percent of members
    pub quorum_percent: u8,
    /// Minimum yes share, percent of votes cast
    pub approval_percent: u8,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            voting_period_secs: VOTING_PERIOD_SECS,
            quorum_percent: QUORUM_PERCENT,
            approval_percent: APPROVAL_PERCENT,
        }
    }
}

impl GovernanceConfig {
    pub fn with_voting_period_secs(mut self, secs: u64) -> Self {
        self.voting_period_secs = secs;
        self
    }

    pub fn with_quorum_percent(mut self, percent: u8) -> Self {
        self.quorum_percent = percent;
        self
    }

    pub fn with_approval_percent(mut self, percent: u8) -> Self {
        self.approval_percent = percent;
        self
    }

    /// Voting window as a chrono duration
    pub fn voting_period(&self) -> TreasuryResult<Duration> {
        i64::try_from(self.voting_period_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or(TreasuryError::ArithmeticOverflow("voting_period"))
    }

    /// Reject parameters that would make governance meaningless
    pub fn validate(&self) -> TreasuryResult<()> {
        if self.voting_period_secs == 0 {
            return Err(TreasuryError::InvalidConfig(
                "voting_period_secs must be positive".into(),
            ));
        }
        if !(1..=100).contains(&self.quorum_percent) {
            return Err(TreasuryError::InvalidConfig(format!(
                "quorum_percent must be within 1..=100, got {}",
                self.quorum_percent
            )));
        }
        if !(1..=100).contains(&self.approval_percent) {
            return Err(TreasuryError::InvalidConfig(format!(
                "approval_percent must be within 1..=100, got {}",
                self.approval_percent
            )));
        }
        self.voting_period()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GovernanceConfig::default();
        assert_eq!(config.voting_period().unwrap(), Duration::days(7));
        assert_eq!(config.quorum_percent, 33);
        assert_eq!(config.approval_percent, 51);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_percentages() {
        let config = GovernanceConfig::default().with_quorum_percent(0);
        assert!(matches!(
            config.validate(),
            Err(TreasuryError::InvalidConfig(_))
        ));

        let config = GovernanceConfig::default().with_approval_percent(101);
        assert!(matches!(
            config.validate(),
            Err(TreasuryError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_voting_period() {
        let config = GovernanceConfig::default().with_voting_period_secs(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_voting_period_too_large() {
        let config = GovernanceConfig::default().with_voting_period_secs(u64::MAX);
        assert!(matches!(
            config.validate(),
            Err(TreasuryError::ArithmeticOverflow(_))
        ));
    }

    #[test]
    fn test_partial_json_overrides() {
        let config: GovernanceConfig = serde_json::from_str(r#"{"quorum_percent": 50}"#).unwrap();
        assert_eq!(config.quorum_percent, 50);
        assert_eq!(config.approval_percent, APPROVAL_PERCENT);
        assert_eq!(config.voting_period_secs, VOTING_PERIOD_SECS);
    }
}
