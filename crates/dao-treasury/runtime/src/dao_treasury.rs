//! DAO Treasury: the unified entry point
//!
//! Owns one treasury aggregate together with its governance config and
//! event journal, and exposes the full operation surface. Mutating
//! calls take `&mut self`; each runs to completion before the next.

use crate::{
    execution_engine::{Disbursement, ExecutionEngine},
    finalization::Finalizer,
    membership_manager::MembershipManager,
    proposal_manager::ProposalManager,
    treasury_ledger::TreasuryLedger,
    voting_engine::{VoteOutcome, VotingEngine},
};
use chrono::{DateTime, Utc};
use dao_treasury_types::{
    AccountId, AdminCapability, Amount, EventJournal, EventRecord, GovernanceConfig,
    GovernanceEvent, Proposal, ProposalDraft, ProposalId, ProposalStatus, TallyOutcome, Treasury,
    TreasuryId, TreasuryResult, VoteChoice,
};
use tracing::info;

/// A governed pool of funds
pub struct DaoTreasury {
    treasury: Treasury,
    config: GovernanceConfig,
    journal: EventJournal,

    // --- Composed engines ---
    membership: MembershipManager,
    ledger: TreasuryLedger,
    proposals: ProposalManager,
    voting: VotingEngine,
    execution: ExecutionEngine,
    finalizer: Finalizer,
}

impl DaoTreasury {
    /// Create a treasury with a fresh id and hand `admin` its capability
    pub fn create(
        admin: AccountId,
        config: GovernanceConfig,
        now: DateTime<Utc>,
    ) -> TreasuryResult<(Self, AdminCapability)> {
        Self::create_with_id(TreasuryId::generate(), admin, config, now)
    }

    /// Create with a specific id (for testing or deterministic deployment)
    pub fn create_with_id(
        id: TreasuryId,
        admin: AccountId,
        config: GovernanceConfig,
        now: DateTime<Utc>,
    ) -> TreasuryResult<(Self, AdminCapability)> {
        config.validate()?;
        let (treasury, cap) = Treasury::create(id, admin.clone(), now);

        info!(treasury = %treasury.id, admin = %admin, "Treasury created");

        let mut journal = EventJournal::new();
        journal.record(&treasury.id, now, GovernanceEvent::TreasuryCreated { admin });

        Ok((Self::assemble(treasury, config, journal), cap))
    }

    /// Rebuild from a persisted snapshot
    pub fn restore(treasury: Treasury, config: GovernanceConfig) -> TreasuryResult<Self> {
        config.validate()?;
        Ok(Self::assemble(treasury, config, EventJournal::new()))
    }

    fn assemble(treasury: Treasury, config: GovernanceConfig, journal: EventJournal) -> Self {
        let finalizer = Finalizer::new(config.clone());
        Self {
            treasury,
            journal,
            membership: MembershipManager::new(),
            ledger: TreasuryLedger::new(),
            proposals: ProposalManager::new(config.clone()),
            voting: VotingEngine::new(finalizer.clone()),
            execution: ExecutionEngine::new(finalizer.clone()),
            finalizer,
            config,
        }
    }

    // =========================================================================
    // MEMBERSHIP (admin capability required)
    // =========================================================================

    pub fn add_member(
        &mut self,
        cap: &AdminCapability,
        member: AccountId,
        now: DateTime<Utc>,
    ) -> TreasuryResult<()> {
        self.membership
            .add_member(&mut self.treasury, cap, member, now, &mut self.journal)
    }

    pub fn remove_member(
        &mut self,
        cap: &AdminCapability,
        member: &AccountId,
        now: DateTime<Utc>,
    ) -> TreasuryResult<()> {
        self.membership
            .remove_member(&mut self.treasury, cap, member, now, &mut self.journal)
    }

    // =========================================================================
    // FUNDS
    // =========================================================================

    /// Deposit funds from any account; returns the new balance
    pub fn deposit_funds(
        &mut self,
        depositor: &AccountId,
        amount: Amount,
        now: DateTime<Utc>,
    ) -> TreasuryResult<Amount> {
        self.ledger
            .deposit(&mut self.treasury, depositor, amount, now, &mut self.journal)
    }

    // =========================================================================
    // PROPOSAL LIFECYCLE
    // =========================================================================

    pub fn create_proposal(
        &mut self,
        proposer: &AccountId,
        draft: ProposalDraft,
        now: DateTime<Utc>,
    ) -> TreasuryResult<ProposalId> {
        self.proposals
            .create_proposal(&mut self.treasury, proposer, draft, now, &mut self.journal)
    }

    pub fn vote_on_proposal(
        &mut self,
        voter: &AccountId,
        proposal_id: ProposalId,
        choice: VoteChoice,
        now: DateTime<Utc>,
    ) -> TreasuryResult<VoteOutcome> {
        self.voting.cast_vote(
            &mut self.treasury,
            voter,
            proposal_id,
            choice,
            now,
            &mut self.journal,
        )
    }

    /// Execute a proposal; any caller may trigger this
    pub fn execute_proposal(
        &mut self,
        executor: &AccountId,
        proposal_id: ProposalId,
        now: DateTime<Utc>,
    ) -> TreasuryResult<Disbursement> {
        self.execution.execute(
            &mut self.treasury,
            executor,
            proposal_id,
            now,
            &mut self.journal,
        )
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    pub fn id(&self) -> &TreasuryId {
        &self.treasury.id
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    pub fn get_balance(&self) -> Amount {
        self.treasury.balance
    }

    pub fn get_members(&self) -> Vec<AccountId> {
        self.treasury.members.to_vec()
    }

    pub fn get_proposal_count(&self) -> u64 {
        self.treasury.proposal_count()
    }

    pub fn get_proposal(&self, proposal_id: ProposalId) -> TreasuryResult<&Proposal> {
        self.treasury.proposal(proposal_id)
    }

    pub fn is_member(&self, account: &AccountId) -> bool {
        self.treasury.is_member(account)
    }

    pub fn has_voted(&self, proposal_id: ProposalId, account: &AccountId) -> TreasuryResult<bool> {
        Ok(self.treasury.proposal(proposal_id)?.has_voted(account))
    }

    pub fn is_voting_open(
        &self,
        proposal_id: ProposalId,
        now: DateTime<Utc>,
    ) -> TreasuryResult<bool> {
        let proposal = self.treasury.proposal(proposal_id)?;
        Ok(proposal.is_active() && proposal.is_voting_open(now))
    }

    pub fn proposals_with_status(&self, status: ProposalStatus) -> Vec<&Proposal> {
        self.treasury.proposals_with_status(status)
    }

    /// What finalization would decide right now, without deciding it
    pub fn preview_tally(&self, proposal_id: ProposalId) -> TreasuryResult<TallyOutcome> {
        self.finalizer.preview(&self.treasury, proposal_id)
    }

    /// The aggregate, for persistence
    pub fn snapshot(&self) -> &Treasury {
        &self.treasury
    }

    // =========================================================================
    // NOTIFICATIONS
    // =========================================================================

    pub fn journal(&self) -> &EventJournal {
        &self.journal
    }

    /// Take all undelivered event records
    pub fn drain_events(&mut self) -> Vec<EventRecord> {
        self.journal.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use dao_treasury_types::TreasuryError;

    fn t0() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn setup() -> (DaoTreasury, AdminCapability) {
        let (mut dao, cap) =
            DaoTreasury::create(AccountId::new("admin"), GovernanceConfig::default(), t0())
                .unwrap();
        for name in ["alice", "bob", "carol"] {
            dao.add_member(&cap, AccountId::new(name), t0()).unwrap();
        }
        (dao, cap)
    }

    #[test]
    fn test_create_rejects_invalid_config() {
        let result = DaoTreasury::create(
            AccountId::new("admin"),
            GovernanceConfig::default().with_approval_percent(0),
            t0(),
        );
        assert!(matches!(result, Err(TreasuryError::InvalidConfig(_))));
    }

    #[test]
    fn test_admin_is_not_a_member() {
        let (dao, _) = setup();
        assert!(!dao.is_member(&AccountId::new("admin")));
        assert_eq!(dao.get_members().len(), 3);
    }

    #[test]
    fn test_queries() {
        let (mut dao, _) = setup();
        dao.deposit_funds(&AccountId::new("donor"), Amount::new(1000), t0())
            .unwrap();
        let id = dao
            .create_proposal(
                &AccountId::new("alice"),
                ProposalDraft::new("Infra", "Servers", Amount::new(200), AccountId::new("host")),
                t0(),
            )
            .unwrap();
        dao.vote_on_proposal(&AccountId::new("bob"), id, VoteChoice::Yes, t0())
            .unwrap();

        assert_eq!(dao.get_balance(), Amount::new(1000));
        assert_eq!(dao.get_proposal_count(), 1);
        assert!(dao.has_voted(id, &AccountId::new("bob")).unwrap());
        assert!(!dao.has_voted(id, &AccountId::new("carol")).unwrap());
        assert!(dao.is_voting_open(id, t0()).unwrap());
        assert!(!dao.is_voting_open(id, t0() + Duration::days(8)).unwrap());
        assert_eq!(dao.proposals_with_status(ProposalStatus::Active).len(), 1);
        assert!(dao.preview_tally(id).unwrap().passed());
        assert_eq!(
            dao.get_proposal(ProposalId::new(5)).unwrap_err(),
            TreasuryError::ProposalNotFound(ProposalId::new(5))
        );
    }

    #[test]
    fn test_drain_events() {
        let (mut dao, _) = setup();
        // created + three members
        let events = dao.drain_events();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].event.kind(), "treasury_created");
        assert!(dao.journal().is_empty());
    }

    #[test]
    fn test_restore_from_snapshot() {
        let (mut dao, cap) = setup();
        dao.deposit_funds(&AccountId::new("donor"), Amount::new(50), t0())
            .unwrap();

        let json = serde_json::to_string(dao.snapshot()).unwrap();
        let treasury: Treasury = serde_json::from_str(&json).unwrap();
        let mut restored = DaoTreasury::restore(treasury, GovernanceConfig::default()).unwrap();

        assert_eq!(restored.id(), dao.id());
        assert_eq!(restored.get_balance(), Amount::new(50));
        // the issued capability still governs the restored treasury
        restored
            .add_member(&cap, AccountId::new("dave"), t0())
            .unwrap();
        assert_eq!(restored.get_members().len(), 4);
    }
}
