//! Membership set: who may propose and vote
//!
//! The membership set is the source of truth for "who's in". Members
//! carry no authority beyond proposal creation and voting; changes to
//! the set are gated by the admin capability one layer up.

use crate::{TreasuryError, TreasuryResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifier for any participant: member, recipient, depositor, or executor
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The set of authorized voters
///
/// Uniqueness is enforced on insert. A removal that would leave the
/// set empty is rejected so the treasury can never become ungovernable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipSet {
    members: BTreeSet<AccountId>,
}

impl MembershipSet {
    /// Create an empty membership set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member
    pub fn add(&mut self, member: AccountId) -> TreasuryResult<()> {
        if self.members.contains(&member) {
            return Err(TreasuryError::DuplicateMember(member));
        }
        self.members.insert(member);
        Ok(())
    }

    /// Remove a member, refusing to empty the set
    pub fn remove(&mut self, member: &AccountId) -> TreasuryResult<()> {
        if !self.members.contains(member) {
            return Err(TreasuryError::MemberNotFound(member.clone()));
        }
        if self.members.len() == 1 {
            return Err(TreasuryError::CannotRemoveLastMember);
        }
        self.members.remove(member);
        Ok(())
    }

    pub fn contains(&self, member: &AccountId) -> bool {
        self.members.contains(member)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate members in a stable order
    pub fn iter(&self) -> impl Iterator<Item = &AccountId> {
        self.members.iter()
    }

    /// Owned copy of all member ids
    pub fn to_vec(&self) -> Vec<AccountId> {
        self.members.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(names: &[&str]) -> MembershipSet {
        let mut set = MembershipSet::new();
        for name in names {
            set.add(AccountId::new(*name)).unwrap();
        }
        set
    }

    #[test]
    fn test_add_member() {
        let set = set_of(&["alice", "bob"]);
        assert!(set.contains(&AccountId::new("alice")));
        assert!(!set.contains(&AccountId::new("carol")));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_duplicate_member() {
        let mut set = set_of(&["alice"]);
        let result = set.add(AccountId::new("alice"));
        assert_eq!(
            result,
            Err(TreasuryError::DuplicateMember(AccountId::new("alice")))
        );
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_member() {
        let mut set = set_of(&["alice", "bob"]);
        set.remove(&AccountId::new("alice")).unwrap();
        assert!(!set.contains(&AccountId::new("alice")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_unknown_member() {
        let mut set = set_of(&["alice", "bob"]);
        let result = set.remove(&AccountId::new("mallory"));
        assert!(matches!(result, Err(TreasuryError::MemberNotFound(_))));
    }

    #[test]
    fn test_cannot_remove_last_member() {
        let mut set = set_of(&["alice"]);
        let result = set.remove(&AccountId::new("alice"));
        assert_eq!(result, Err(TreasuryError::CannotRemoveLastMember));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_stable_order() {
        let set = set_of(&["carol", "alice", "bob"]);
        let names: Vec<&str> = set.iter().map(|m| m.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
    }
}
