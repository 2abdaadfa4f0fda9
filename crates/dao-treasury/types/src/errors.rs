//! Error types for the treasury governance layer

use crate::{AccountId, ProposalId, ProposalStatus, TreasuryId};
use chrono::{DateTime, Utc};

/// Errors that can occur in treasury operations
///
/// Every variant is a deterministic rejection of the triggering call.
/// Nothing is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreasuryError {
    #[error("Caller is not a member: {0}")]
    NotAuthorized(AccountId),

    #[error("Admin capability for treasury {presented} does not govern treasury {expected}")]
    InvalidCapability {
        expected: TreasuryId,
        presented: TreasuryId,
    },

    #[error("Treasury has no members")]
    NoMembersInDAO,

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("Proposal not found: {0}")]
    ProposalNotFound(ProposalId),

    #[error("Voting period for proposal {proposal} ended at {ended_at}")]
    VotingPeriodEnded {
        proposal: ProposalId,
        ended_at: DateTime<Utc>,
    },

    #[error("Member {member} already voted on proposal {proposal}")]
    AlreadyVoted {
        proposal: ProposalId,
        member: AccountId,
    },

    #[error("Member already exists: {0}")]
    DuplicateMember(AccountId),

    #[error("Member not found: {0}")]
    MemberNotFound(AccountId),

    #[error("Cannot remove the last member of the treasury")]
    CannotRemoveLastMember,

    #[error("Proposal {proposal} has not passed (status: {status:?})")]
    ProposalNotPassed {
        proposal: ProposalId,
        status: ProposalStatus,
    },

    #[error("Proposal {0} is already finalized")]
    AlreadyFinalized(ProposalId),

    #[error("Arithmetic overflow in {0}")]
    ArithmeticOverflow(&'static str),

    #[error("Invalid governance config: {0}")]
    InvalidConfig(String),
}

/// Coarse classification of a [`TreasuryError`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    Authorization,
    NotFound,
    StateConflict,
    Resource,
    Temporal,
    Integrity,
    Configuration,
}

impl TreasuryError {
    /// Which family of failure this is, for clients that branch on cause
    pub fn category(&self) -> ErrorCategory {
        match self {
            TreasuryError::NotAuthorized(_) | TreasuryError::InvalidCapability { .. } => {
                ErrorCategory::Authorization
            }
            TreasuryError::ProposalNotFound(_) | TreasuryError::MemberNotFound(_) => {
                ErrorCategory::NotFound
            }
            TreasuryError::AlreadyVoted { .. }
            | TreasuryError::ProposalNotPassed { .. }
            | TreasuryError::CannotRemoveLastMember
            | TreasuryError::DuplicateMember(_)
            | TreasuryError::AlreadyFinalized(_) => ErrorCategory::StateConflict,
            TreasuryError::InsufficientFunds { .. } => ErrorCategory::Resource,
            TreasuryError::VotingPeriodEnded { .. } => ErrorCategory::Temporal,
            TreasuryError::ArithmeticOverflow(_) | TreasuryError::NoMembersInDAO => {
                ErrorCategory::Integrity
            }
            TreasuryError::InvalidConfig(_) => ErrorCategory::Configuration,
        }
    }
}

/// Result type alias for treasury operations
pub type TreasuryResult<T> = Result<T, TreasuryError>;
