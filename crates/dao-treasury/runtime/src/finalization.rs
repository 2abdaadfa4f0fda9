//! Finalizer: turns an Active proposal into Passed or Rejected
//!
//! Shared by the voting path (auto-finalization once every member has
//! voted) and the execution path (lazy finalization after the window
//! lapsed).

use chrono::{DateTime, Utc};
use dao_treasury_types::{
    evaluate_tally, EventJournal, FinalizationTrigger, GovernanceConfig, GovernanceEvent,
    ProposalId, ProposalStatus, TallyOutcome, Treasury, TreasuryError, TreasuryResult,
};
use tracing::{info, warn};

/// Applies the tally rules to proposals
#[derive(Clone, Debug)]
pub struct Finalizer {
    config: GovernanceConfig,
}

impl Finalizer {
    pub fn new(config: GovernanceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    /// Evaluate a proposal's current counts without touching it
    pub fn preview(
        &self,
        treasury: &Treasury,
        proposal_id: ProposalId,
    ) -> TreasuryResult<TallyOutcome> {
        let proposal = treasury.proposal(proposal_id)?;
        evaluate_tally(
            proposal.yes_votes,
            proposal.no_votes,
            treasury.member_count(),
            &self.config,
        )
    }

    /// Finalize an Active proposal against the current membership size
    ///
    /// Fails with `AlreadyFinalized` if the proposal has left `Active`.
    pub fn finalize(
        &self,
        treasury: &mut Treasury,
        proposal_id: ProposalId,
        trigger: FinalizationTrigger,
        now: DateTime<Utc>,
        journal: &mut EventJournal,
    ) -> TreasuryResult<TallyOutcome> {
        let member_count = treasury.member_count();
        let proposal = treasury.proposal_mut(proposal_id)?;

        if !proposal.is_active() {
            return Err(TreasuryError::AlreadyFinalized(proposal_id));
        }

        let outcome = evaluate_tally(
            proposal.yes_votes,
            proposal.no_votes,
            member_count,
            &self.config,
        )?;
        proposal.status = outcome.decision;

        match outcome.decision {
            ProposalStatus::Passed => info!(
                proposal = %proposal_id,
                trigger = ?trigger,
                votes_cast = outcome.votes_cast,
                approval = ?outcome.approval_percent,
                "Proposal passed"
            ),
            _ if !outcome.quorum_met() => warn!(
                proposal = %proposal_id,
                trigger = ?trigger,
                votes_cast = outcome.votes_cast,
                quorum = outcome.quorum_threshold,
                "Proposal rejected: quorum not met"
            ),
            _ => info!(
                proposal = %proposal_id,
                trigger = ?trigger,
                approval = ?outcome.approval_percent,
                "Proposal rejected: approval threshold not met"
            ),
        }

        let treasury_id = treasury.id.clone();
        journal.record(
            &treasury_id,
            now,
            GovernanceEvent::ProposalFinalized {
                proposal_id,
                status: outcome.decision,
                trigger,
                quorum_threshold: outcome.quorum_threshold,
                votes_cast: outcome.votes_cast,
                approval_percent: outcome.approval_percent,
            },
        );

        Ok(outcome)
    }
}
