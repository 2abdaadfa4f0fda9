//! Proposal Manager: member-initiated spending requests
//!
//! Validates the proposer and the requested amount, assigns the next
//! id, and opens the voting window. Funds are checked against the
//! balance here but not reserved; execution checks again.

use chrono::{DateTime, Utc};
use dao_treasury_types::{
    AccountId, EventJournal, GovernanceConfig, GovernanceEvent, Proposal, ProposalDraft,
    ProposalId, Treasury, TreasuryError, TreasuryResult,
};
use tracing::{info, warn};

/// Creates proposals against a treasury
#[derive(Clone, Debug)]
pub struct ProposalManager {
    config: GovernanceConfig,
}

impl ProposalManager {
    pub fn new(config: GovernanceConfig) -> Self {
        Self { config }
    }

    /// Create an Active proposal and return its id
    pub fn create_proposal(
        &self,
        treasury: &mut Treasury,
        proposer: &AccountId,
        draft: ProposalDraft,
        now: DateTime<Utc>,
        journal: &mut EventJournal,
    ) -> TreasuryResult<ProposalId> {
        if treasury.members.is_empty() {
            return Err(TreasuryError::NoMembersInDAO);
        }
        if !treasury.is_member(proposer) {
            warn!(
                treasury = %treasury.id,
                caller = %proposer,
                "Non-member tried to create a proposal"
            );
            return Err(TreasuryError::NotAuthorized(proposer.clone()));
        }
        if draft.amount > treasury.balance {
            return Err(TreasuryError::InsufficientFunds {
                required: draft.amount.0,
                available: treasury.balance.0,
            });
        }

        let voting_period = self.config.voting_period()?;
        // A failed build must not consume an id
        let id = ProposalId::new(treasury.next_proposal_id);
        let proposal = Proposal::new(id, draft, proposer.clone(), now, voting_period)?;
        let allocated = treasury.allocate_proposal_id()?;
        debug_assert_eq!(allocated, id);

        info!(
            treasury = %treasury.id,
            proposal = %id,
            proposer = %proposer,
            amount = proposal.amount.0,
            recipient = %proposal.recipient,
            voting_end = %proposal.voting_end_time,
            "Proposal created"
        );

        journal.record(
            &treasury.id,
            now,
            GovernanceEvent::ProposalCreated {
                proposal_id: id,
                proposer: proposer.clone(),
                title: proposal.title.clone(),
                amount: proposal.amount,
                recipient: proposal.recipient.clone(),
                voting_end_time: proposal.voting_end_time,
            },
        );

        treasury.insert_proposal(proposal);
        Ok(id)
    }
}
