//! DAO Treasury Runtime
//!
//! This crate provides the runtime for a shared-fund governance ledger:
//! members custody a pooled balance and spend it only through proposals
//! that pass quorum and approval.
//!
//! # Architecture
//!
//! The [`DaoTreasury`] is the main entry point. It owns one
//! [`Treasury`](dao_treasury_types::Treasury) aggregate and threads it
//! explicitly through specialized engines:
//!
//! - [`MembershipManager`]: admin-gated member add/remove
//! - [`TreasuryLedger`]: deposits and the execution-only debit
//! - [`ProposalManager`]: member-initiated spending requests
//! - [`VotingEngine`]: one ballot per member, auto-finalization
//! - [`Finalizer`]: quorum and approval evaluation
//! - [`ExecutionEngine`]: one-time fund release with lazy finalization
//!
//! # Key Invariants
//!
//! 1. Membership is never emptied by a removal
//! 2. A member votes at most once per proposal
//! 3. A proposal never returns to `Active`
//! 4. Funds for a proposal are debited at most once
//! 5. Every state change produces an event record
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use dao_treasury_runtime::DaoTreasury;
//! use dao_treasury_types::{AccountId, Amount, GovernanceConfig, ProposalDraft, VoteChoice};
//!
//! let now = Utc::now();
//! let (mut dao, cap) =
//!     DaoTreasury::create(AccountId::new("admin"), GovernanceConfig::default(), now).unwrap();
//! dao.add_member(&cap, AccountId::new("alice"), now).unwrap();
//! dao.deposit_funds(&AccountId::new("alice"), Amount::new(100), now).unwrap();
//!
//! let draft = ProposalDraft::new("Tea", "Office tea", Amount::new(40), AccountId::new("shop"));
//! let id = dao.create_proposal(&AccountId::new("alice"), draft, now).unwrap();
//! dao.vote_on_proposal(&AccountId::new("alice"), id, VoteChoice::Yes, now).unwrap();
//!
//! let paid = dao.execute_proposal(&AccountId::new("alice"), id, now).unwrap();
//! assert_eq!(paid.remaining_balance, Amount::new(60));
//! ```

#![deny(unsafe_code)]

pub mod dao_treasury;
pub mod execution_engine;
pub mod finalization;
pub mod membership_manager;
pub mod proposal_manager;
pub mod treasury_ledger;
pub mod voting_engine;

// Re-export main types for convenience
pub use dao_treasury::DaoTreasury;
pub use execution_engine::{Disbursement, ExecutionEngine};
pub use finalization::Finalizer;
pub use membership_manager::MembershipManager;
pub use proposal_manager::ProposalManager;
pub use treasury_ledger::TreasuryLedger;
pub use voting_engine::{VoteOutcome, VotingEngine};
