//! Execution Engine: releases funds for a Passed proposal exactly once
//!
//! The proposal is marked `Executed` before the balance is checked or
//! debited, so a second execute call observes `ProposalNotPassed`
//! instead of paying out again. If the balance has since dropped below
//! the requested amount the proposal stays consumed and the call fails
//! with `InsufficientFunds`; there is no rollback.

use crate::{finalization::Finalizer, treasury_ledger::TreasuryLedger};
use chrono::{DateTime, Utc};
use dao_treasury_types::{
    AccountId, Amount, EventJournal, FinalizationTrigger, GovernanceEvent, ProposalId,
    ProposalStatus, Treasury, TreasuryError, TreasuryResult,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// The transfer the host must carry out after a successful execution
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disbursement {
    pub proposal_id: ProposalId,
    pub recipient: AccountId,
    pub amount: Amount,
    /// Treasury balance after the debit
    pub remaining_balance: Amount,
}

/// Executes passed proposals
#[derive(Clone, Debug)]
pub struct ExecutionEngine {
    finalizer: Finalizer,
    ledger: TreasuryLedger,
}

impl ExecutionEngine {
    pub fn new(finalizer: Finalizer) -> Self {
        Self {
            finalizer,
            ledger: TreasuryLedger::new(),
        }
    }

    /// Execute a proposal on behalf of any caller
    pub fn execute(
        &self,
        treasury: &mut Treasury,
        executor: &AccountId,
        proposal_id: ProposalId,
        now: DateTime<Utc>,
        journal: &mut EventJournal,
    ) -> TreasuryResult<Disbursement> {
        let proposal = treasury.proposal(proposal_id)?;

        // Nobody completed participation and the window lapsed
        if proposal.is_active() && !proposal.is_voting_open(now) {
            self.finalizer.finalize(
                treasury,
                proposal_id,
                FinalizationTrigger::Lazy,
                now,
                journal,
            )?;
        }

        let proposal = treasury.proposal_mut(proposal_id)?;
        if proposal.status != ProposalStatus::Passed {
            return Err(TreasuryError::ProposalNotPassed {
                proposal: proposal_id,
                status: proposal.status,
            });
        }

        proposal.status = ProposalStatus::Executed;
        let amount = proposal.amount;
        let recipient = proposal.recipient.clone();

        let available = treasury.balance;
        if amount > available {
            warn!(
                treasury = %treasury.id,
                proposal = %proposal_id,
                required = amount.0,
                available = available.0,
                "Proposal consumed without transfer: treasury balance too low"
            );
            journal.record(
                &treasury.id,
                now,
                GovernanceEvent::ExecutionAborted {
                    proposal_id,
                    executor: executor.clone(),
                    required: amount,
                    available,
                },
            );
            return Err(TreasuryError::InsufficientFunds {
                required: amount.0,
                available: available.0,
            });
        }

        let remaining_balance = self.ledger.debit(treasury, amount)?;

        info!(
            treasury = %treasury.id,
            proposal = %proposal_id,
            executor = %executor,
            recipient = %recipient,
            amount = amount.0,
            remaining = remaining_balance.0,
            "Proposal executed"
        );

        journal.record(
            &treasury.id,
            now,
            GovernanceEvent::ProposalExecuted {
                proposal_id,
                executor: executor.clone(),
                recipient: recipient.clone(),
                amount,
                remaining_balance,
            },
        );

        Ok(Disbursement {
            proposal_id,
            recipient,
            amount,
            remaining_balance,
        })
    }
}
