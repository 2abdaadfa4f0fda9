//! Treasury aggregate: balance, membership, and proposals
//!
//! One `Treasury` per DAO. It exclusively owns every proposal; no
//! proposal outlives it. This is the persisted state with
//! invariant-keeping primitives, not an execution engine. Governed
//! mutation goes through the runtime facade, which only lends the
//! aggregate out by shared reference. There is no debit primitive here;
//! withdrawals exist only in the runtime's execution path.
//!
//! A serialized treasury carries the admin secret and must be stored as
//! carefully as the capability itself.

use crate::{
    AccountId, AdminCapability, Amount, MembershipSet, Proposal, ProposalId, ProposalStatus,
    TreasuryError, TreasuryResult,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Unique identifier for a Treasury
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreasuryId(pub String);

impl TreasuryId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for TreasuryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The complete state of one DAO treasury
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treasury {
    pub id: TreasuryId,
    /// Custodied funds
    pub balance: Amount,
    /// Authorized voters
    pub members: MembershipSet,
    /// Next id to assign; never reused
    pub next_proposal_id: u64,
    /// All proposals ever created, keyed by id
    pub proposals: BTreeMap<ProposalId, Proposal>,
    pub created_at: DateTime<Utc>,
    /// Matched against the admin capability
    admin_secret: Uuid,
}

impl Treasury {
    /// Create an empty treasury and the admin capability that governs it
    pub fn create(
        id: TreasuryId,
        admin: AccountId,
        now: DateTime<Utc>,
    ) -> (Self, AdminCapability) {
        let admin_secret = Uuid::new_v4();
        let cap = AdminCapability::mint(id.clone(), admin, now, admin_secret);
        let treasury = Self {
            id,
            balance: Amount::zero(),
            members: MembershipSet::new(),
            next_proposal_id: 0,
            proposals: BTreeMap::new(),
            created_at: now,
            admin_secret,
        };
        (treasury, cap)
    }

    /// Check an admin capability against this treasury
    pub fn authorize_admin(&self, cap: &AdminCapability) -> TreasuryResult<()> {
        cap.authorize(&self.id, &self.admin_secret)
    }

    pub fn is_member(&self, account: &AccountId) -> bool {
        self.members.contains(account)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Credit the balance, returning the new balance
    pub fn credit(&mut self, amount: Amount) -> TreasuryResult<Amount> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(TreasuryError::ArithmeticOverflow("balance"))?;
        Ok(self.balance)
    }

    /// Reserve the next proposal id
    pub fn allocate_proposal_id(&mut self) -> TreasuryResult<ProposalId> {
        let id = ProposalId::new(self.next_proposal_id);
        self.next_proposal_id = self
            .next_proposal_id
            .checked_add(1)
            .ok_or(TreasuryError::ArithmeticOverflow("next_proposal_id"))?;
        Ok(id)
    }

    /// Store a newly created proposal
    pub fn insert_proposal(&mut self, proposal: Proposal) {
        self.proposals.insert(proposal.id, proposal);
    }

    pub fn proposal(&self, id: ProposalId) -> TreasuryResult<&Proposal> {
        self.proposals
            .get(&id)
            .ok_or(TreasuryError::ProposalNotFound(id))
    }

    pub fn proposal_mut(&mut self, id: ProposalId) -> TreasuryResult<&mut Proposal> {
        self.proposals
            .get_mut(&id)
            .ok_or(TreasuryError::ProposalNotFound(id))
    }

    /// Number of proposals ever created
    pub fn proposal_count(&self) -> u64 {
        self.next_proposal_id
    }

    pub fn proposals_with_status(&self, status: ProposalStatus) -> Vec<&Proposal> {
        self.proposals
            .values()
            .filter(|p| p.status == status)
            .collect()
    }
}
