//! Event journal: the notification records every state change produces
//!
//! The core only produces these records. Delivering them to a UI,
//! indexer, or message bus is the host's job; `drain` hands them over.

use crate::{AccountId, Amount, ProposalId, ProposalStatus, TreasuryId, VoteChoice};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What caused a proposal to be finalized
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinalizationTrigger {
    /// Every current member voted
    Auto,
    /// An execute call found the voting window lapsed
    Lazy,
}

/// A state change worth telling the outside world about
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceEvent {
    TreasuryCreated {
        admin: AccountId,
    },
    MemberAdded {
        member: AccountId,
        member_count: usize,
    },
    MemberRemoved {
        member: AccountId,
        member_count: usize,
    },
    FundsDeposited {
        depositor: AccountId,
        amount: Amount,
        new_balance: Amount,
    },
    ProposalCreated {
        proposal_id: ProposalId,
        proposer: AccountId,
        title: String,
        amount: Amount,
        recipient: AccountId,
        voting_end_time: DateTime<Utc>,
    },
    VoteCast {
        proposal_id: ProposalId,
        voter: AccountId,
        choice: VoteChoice,
        yes_votes: u64,
        no_votes: u64,
    },
    ProposalFinalized {
        proposal_id: ProposalId,
        status: ProposalStatus,
        trigger: FinalizationTrigger,
        quorum_threshold: u64,
        votes_cast: u64,
        approval_percent: Option<u64>,
    },
    ProposalExecuted {
        proposal_id: ProposalId,
        executor: AccountId,
        recipient: AccountId,
        amount: Amount,
        remaining_balance: Amount,
    },
    /// The proposal was consumed but the balance could not cover it
    ExecutionAborted {
        proposal_id: ProposalId,
        executor: AccountId,
        required: Amount,
        available: Amount,
    },
}

impl GovernanceEvent {
    /// The proposal this event concerns, if any
    pub fn proposal_id(&self) -> Option<ProposalId> {
        match self {
            GovernanceEvent::ProposalCreated { proposal_id, .. }
            | GovernanceEvent::VoteCast { proposal_id, .. }
            | GovernanceEvent::ProposalFinalized { proposal_id, .. }
            | GovernanceEvent::ProposalExecuted { proposal_id, .. }
            | GovernanceEvent::ExecutionAborted { proposal_id, .. } => Some(*proposal_id),
            _ => None,
        }
    }

    /// Short machine-readable name
    pub fn kind(&self) -> &'static str {
        match self {
            GovernanceEvent::TreasuryCreated { .. } => "treasury_created",
            GovernanceEvent::MemberAdded { .. } => "member_added",
            GovernanceEvent::MemberRemoved { .. } => "member_removed",
            GovernanceEvent::FundsDeposited { .. } => "funds_deposited",
            GovernanceEvent::ProposalCreated { .. } => "proposal_created",
            GovernanceEvent::VoteCast { .. } => "vote_cast",
            GovernanceEvent::ProposalFinalized { .. } => "proposal_finalized",
            GovernanceEvent::ProposalExecuted { .. } => "proposal_executed",
            GovernanceEvent::ExecutionAborted { .. } => "execution_aborted",
        }
    }
}

/// A journaled event with its envelope
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub record_id: String,
    pub treasury_id: TreasuryId,
    /// Caller-supplied time of the operation
    pub recorded_at: DateTime<Utc>,
    pub event: GovernanceEvent,
}

impl EventRecord {
    pub fn new(
        treasury_id: TreasuryId,
        recorded_at: DateTime<Utc>,
        event: GovernanceEvent,
    ) -> Self {
        Self {
            record_id: uuid::Uuid::new_v4().to_string(),
            treasury_id,
            recorded_at,
            event,
        }
    }
}

/// Append-only log of events awaiting delivery
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventJournal {
    records: Vec<EventRecord>,
}

impl EventJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn record(&mut self, treasury_id: &TreasuryId, at: DateTime<Utc>, event: GovernanceEvent) {
        self.records
            .push(EventRecord::new(treasury_id.clone(), at, event));
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&EventRecord> {
        self.records.last()
    }

    /// All events concerning one proposal, oldest first
    pub fn events_for_proposal(&self, proposal_id: ProposalId) -> Vec<&GovernanceEvent> {
        self.records
            .iter()
            .map(|r| &r.event)
            .filter(|e| e.proposal_id() == Some(proposal_id))
            .collect()
    }

    /// Hand every pending record to the caller, leaving the journal empty
    pub fn drain(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.records)
    }
}
