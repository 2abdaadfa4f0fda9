//! Membership Manager: admin-gated changes to the voter set
//!
//! Every mutation requires the treasury's admin capability. Removing a
//! member never touches votes they already cast; those stay counted.

use chrono::{DateTime, Utc};
use dao_treasury_types::{
    AccountId, AdminCapability, EventJournal, GovernanceEvent, Treasury, TreasuryResult,
};
use tracing::{info, warn};

/// Manages membership lifecycle with an event trail
#[derive(Clone, Copy, Debug, Default)]
pub struct MembershipManager;

impl MembershipManager {
    pub fn new() -> Self {
        Self
    }

    /// Add a member. Fails with `DuplicateMember` if already present.
    pub fn add_member(
        &self,
        treasury: &mut Treasury,
        cap: &AdminCapability,
        member: AccountId,
        now: DateTime<Utc>,
        journal: &mut EventJournal,
    ) -> TreasuryResult<()> {
        if let Err(e) = treasury.authorize_admin(cap) {
            warn!(treasury = %treasury.id, error = %e, "Rejected membership change");
            return Err(e);
        }

        treasury.members.add(member.clone())?;
        let member_count = treasury.member_count();

        info!(treasury = %treasury.id, member = %member, member_count, "Member added");

        journal.record(
            &treasury.id,
            now,
            GovernanceEvent::MemberAdded {
                member,
                member_count,
            },
        );

        Ok(())
    }

    /// Remove a member
    ///
    /// Fails with `MemberNotFound` if absent and `CannotRemoveLastMember`
    /// if the set would become empty.
    pub fn remove_member(
        &self,
        treasury: &mut Treasury,
        cap: &AdminCapability,
        member: &AccountId,
        now: DateTime<Utc>,
        journal: &mut EventJournal,
    ) -> TreasuryResult<()> {
        if let Err(e) = treasury.authorize_admin(cap) {
            warn!(treasury = %treasury.id, error = %e, "Rejected membership change");
            return Err(e);
        }

        treasury.members.remove(member)?;
        let member_count = treasury.member_count();

        info!(treasury = %treasury.id, member = %member, member_count, "Member removed");

        journal.record(
            &treasury.id,
            now,
            GovernanceEvent::MemberRemoved {
                member: member.clone(),
                member_count,
            },
        );

        Ok(())
    }
}
