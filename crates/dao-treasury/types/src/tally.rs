//! Vote tally arithmetic: quorum and approval
//!
//! Pure integer math with no floating point. Quorum rounds up so that
//! "33%" really means at least a third of members, not floor(0.33 * n).
//! Approval is measured against votes cast, so abstentions only count
//! against quorum.

use crate::{GovernanceConfig, ProposalStatus, TreasuryError, TreasuryResult};
use serde::{Deserialize, Serialize};

/// Ballots required for a binding result: `ceil(members * percent / 100)`
pub fn quorum_threshold(member_count: u64, quorum_percent: u8) -> TreasuryResult<u64> {
    member_count
        .checked_mul(u64::from(quorum_percent))
        .and_then(|scaled| scaled.checked_add(99))
        .map(|rounded| rounded / 100)
        .ok_or(TreasuryError::ArithmeticOverflow("quorum_threshold"))
}

/// Integer yes-share of votes cast, or `None` if nobody voted
pub fn approval_percent(yes_votes: u64, no_votes: u64) -> TreasuryResult<Option<u64>> {
    let votes_cast = yes_votes
        .checked_add(no_votes)
        .ok_or(TreasuryError::ArithmeticOverflow("votes_cast"))?;
    if votes_cast == 0 {
        return Ok(None);
    }

    // yes_votes must stay below u64::MAX / 100 for the scale step
    let scaled = yes_votes
        .checked_mul(100)
        .ok_or(TreasuryError::ArithmeticOverflow("approval_percent"))?;
    Ok(Some(scaled / votes_cast))
}

/// The result of evaluating a tally against the governance thresholds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyOutcome {
    pub quorum_threshold: u64,
    pub votes_cast: u64,
    /// `None` when quorum failed or no votes were cast
    pub approval_percent: Option<u64>,
    /// `Passed` or `Rejected`
    pub decision: ProposalStatus,
}

impl TallyOutcome {
    pub fn quorum_met(&self) -> bool {
        self.votes_cast > 0 && self.votes_cast >= self.quorum_threshold
    }

    pub fn passed(&self) -> bool {
        self.decision == ProposalStatus::Passed
    }
}

/// Decide Passed or Rejected for the given counts and current membership size
///
/// A quorum failure is a rejection, not an error, so a stalled proposal
/// can always be resolved.
pub fn evaluate_tally(
    yes_votes: u64,
    no_votes: u64,
    member_count: usize,
    config: &GovernanceConfig,
) -> TreasuryResult<TallyOutcome> {
    let members = u64::try_from(member_count)
        .map_err(|_| TreasuryError::ArithmeticOverflow("member_count"))?;
    let threshold = quorum_threshold(members, config.quorum_percent)?;
    let votes_cast = yes_votes
        .checked_add(no_votes)
        .ok_or(TreasuryError::ArithmeticOverflow("votes_cast"))?;

    if votes_cast == 0 || votes_cast < threshold {
        return Ok(TallyOutcome {
            quorum_threshold: threshold,
            votes_cast,
            approval_percent: None,
            decision: ProposalStatus::Rejected,
        });
    }

    let approval = approval_percent(yes_votes, no_votes)?;
    let decision = match approval {
        Some(pct) if pct >= u64::from(config.approval_percent) => ProposalStatus::Passed,
        _ => ProposalStatus::Rejected,
    };

    Ok(TallyOutcome {
        quorum_threshold: threshold,
        votes_cast,
        approval_percent: approval,
        decision,
    })
}
