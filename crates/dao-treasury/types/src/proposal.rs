//! Proposals: requests to spend from the treasury
//!
//! A proposal is created once, mutated only by voting, finalization and
//! execution, and never deleted. Descriptive fields (title, amount,
//! recipient, proposer) are immutable after creation.

use crate::{AccountId, Amount, TreasuryError, TreasuryResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Monotonically assigned proposal identifier, never reused
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProposalId(pub u64);

impl ProposalId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ProposalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle state of a proposal
///
/// `Active -> {Passed, Rejected}` via finalization, `Passed -> Executed`
/// via execution. `Rejected` and `Executed` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProposalStatus {
    /// Accepting votes
    #[default]
    Active,
    /// Quorum and approval met; awaiting execution
    Passed,
    /// Quorum or approval failed
    Rejected,
    /// Funds released (or consumed by a failed release)
    Executed,
}

impl ProposalStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProposalStatus::Rejected | ProposalStatus::Executed)
    }

    /// Whether the state machine permits moving to `next`
    pub fn can_transition_to(&self, next: ProposalStatus) -> bool {
        matches!(
            (self, next),
            (ProposalStatus::Active, ProposalStatus::Passed)
                | (ProposalStatus::Active, ProposalStatus::Rejected)
                | (ProposalStatus::Passed, ProposalStatus::Executed)
        )
    }
}

/// A member's ballot choice
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteChoice {
    Yes,
    No,
}

impl VoteChoice {
    pub fn from_bool(approve: bool) -> Self {
        if approve {
            VoteChoice::Yes
        } else {
            VoteChoice::No
        }
    }
}

/// What a member asks for when creating a proposal
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalDraft {
    pub title: String,
    pub description: String,
    pub amount: Amount,
    pub recipient: AccountId,
}

impl ProposalDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        amount: Amount,
        recipient: AccountId,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            amount,
            recipient,
        }
    }
}

/// A spending proposal and its running tally
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub title: String,
    pub description: String,
    /// Requested amount; checked against the balance at creation and again at execution
    pub amount: Amount,
    pub recipient: AccountId,
    pub proposer: AccountId,
    pub created_at: DateTime<Utc>,
    /// Last instant at which a vote is still accepted
    pub voting_end_time: DateTime<Utc>,
    pub yes_votes: u64,
    pub no_votes: u64,
    /// Members who have voted; at most one ballot each
    pub voters: BTreeSet<AccountId>,
    pub status: ProposalStatus,
}

impl Proposal {
    /// Build a fresh `Active` proposal with zeroed counters
    pub fn new(
        id: ProposalId,
        draft: ProposalDraft,
        proposer: AccountId,
        created_at: DateTime<Utc>,
        voting_period: Duration,
    ) -> TreasuryResult<Self> {
        let voting_end_time = created_at
            .checked_add_signed(voting_period)
            .ok_or(TreasuryError::ArithmeticOverflow("voting_end_time"))?;

        Ok(Self {
            id,
            title: draft.title,
            description: draft.description,
            amount: draft.amount,
            recipient: draft.recipient,
            proposer,
            created_at,
            voting_end_time,
            yes_votes: 0,
            no_votes: 0,
            voters: BTreeSet::new(),
            status: ProposalStatus::Active,
        })
    }

    pub fn is_active(&self) -> bool {
        self.status == ProposalStatus::Active
    }

    /// Votes are accepted up to and including `voting_end_time`
    pub fn is_voting_open(&self, now: DateTime<Utc>) -> bool {
        now <= self.voting_end_time
    }

    pub fn has_voted(&self, member: &AccountId) -> bool {
        self.voters.contains(member)
    }

    /// Total ballots cast so far
    pub fn votes_cast(&self) -> TreasuryResult<u64> {
        self.yes_votes
            .checked_add(self.no_votes)
            .ok_or(TreasuryError::ArithmeticOverflow("votes_cast"))
    }

    /// Record one ballot. State is untouched on error.
    pub fn record_vote(&mut self, voter: AccountId, choice: VoteChoice) -> TreasuryResult<()> {
        if self.voters.contains(&voter) {
            return Err(TreasuryError::AlreadyVoted {
                proposal: self.id,
                member: voter,
            });
        }

        match choice {
            VoteChoice::Yes => {
                self.yes_votes = self
                    .yes_votes
                    .checked_add(1)
                    .ok_or(TreasuryError::ArithmeticOverflow("yes_votes"))?;
            }
            VoteChoice::No => {
                self.no_votes = self
                    .no_votes
                    .checked_add(1)
                    .ok_or(TreasuryError::ArithmeticOverflow("no_votes"))?;
            }
        }
        self.voters.insert(voter);
        Ok(())
    }
}
