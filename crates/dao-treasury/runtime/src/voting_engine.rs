//! Voting Engine: one ballot per member per proposal
//!
//! Records votes inside the voting window and auto-finalizes the
//! proposal in the same call once the ballot count equals the membership size.

use crate::finalization::Finalizer;
use chrono::{DateTime, Utc};
use dao_treasury_types::{
    AccountId, EventJournal, FinalizationTrigger, GovernanceEvent, ProposalId, TallyOutcome,
    Treasury, TreasuryError, TreasuryResult, VoteChoice,
};
use tracing::{debug, warn};

/// Result of casting a vote
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteOutcome {
    /// Vote recorded; the proposal is still Active
    Recorded { yes_votes: u64, no_votes: u64 },
    /// Vote recorded AND it completed participation, finalizing the proposal
    Finalized(TallyOutcome),
}

impl VoteOutcome {
    pub fn is_finalized(&self) -> bool {
        matches!(self, VoteOutcome::Finalized(_))
    }
}

/// Records ballots and triggers auto-finalization
#[derive(Clone, Debug)]
pub struct VotingEngine {
    finalizer: Finalizer,
}

impl VotingEngine {
    pub fn new(finalizer: Finalizer) -> Self {
        Self { finalizer }
    }

    /// Cast `voter`'s ballot on a proposal
    ///
    /// Checks run in order: membership, existence, window, duplicate
    /// ballot, still Active. Nothing is mutated unless all pass.
    pub fn cast_vote(
        &self,
        treasury: &mut Treasury,
        voter: &AccountId,
        proposal_id: ProposalId,
        choice: VoteChoice,
        now: DateTime<Utc>,
        journal: &mut EventJournal,
    ) -> TreasuryResult<VoteOutcome> {
        if !treasury.is_member(voter) {
            warn!(treasury = %treasury.id, caller = %voter, "Non-member tried to vote");
            return Err(TreasuryError::NotAuthorized(voter.clone()));
        }

        let member_count = treasury.member_count();
        let proposal = treasury.proposal_mut(proposal_id)?;

        if !proposal.is_voting_open(now) {
            return Err(TreasuryError::VotingPeriodEnded {
                proposal: proposal_id,
                ended_at: proposal.voting_end_time,
            });
        }
        if proposal.has_voted(voter) {
            return Err(TreasuryError::AlreadyVoted {
                proposal: proposal_id,
                member: voter.clone(),
            });
        }
        // Only reachable by members who joined after finalization
        if !proposal.is_active() {
            return Err(TreasuryError::AlreadyFinalized(proposal_id));
        }

        proposal.record_vote(voter.clone(), choice)?;
        let yes_votes = proposal.yes_votes;
        let no_votes = proposal.no_votes;
        let votes_cast = proposal.votes_cast()?;

        debug!(
            proposal = %proposal_id,
            voter = %voter,
            choice = ?choice,
            yes_votes,
            no_votes,
            "Vote recorded"
        );

        journal.record(
            &treasury.id,
            now,
            GovernanceEvent::VoteCast {
                proposal_id,
                voter: voter.clone(),
                choice,
                yes_votes,
                no_votes,
            },
        );

        // Exact match only; a set shrunk below the ballot count waits for
        // lazy finalization
        let all_voted = u64::try_from(member_count)
            .map(|members| votes_cast == members)
            .unwrap_or(false);

        if all_voted {
            let outcome = self.finalizer.finalize(
                treasury,
                proposal_id,
                FinalizationTrigger::Auto,
                now,
                journal,
            )?;
            return Ok(VoteOutcome::Finalized(outcome));
        }

        Ok(VoteOutcome::Recorded {
            yes_votes,
            no_votes,
        })
    }
}
