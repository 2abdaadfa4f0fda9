//! DAO Treasury Domain Types
//!
//! This crate defines the domain types for a shared-fund governance
//! ledger: a group of members custodies a pooled balance and spends it
//! only through proposals that pass a quorum-plus-approval vote.
//!
//! # Key Concepts
//!
//! - **Treasury**: the single aggregate per DAO. Owns the balance, the
//!   membership set, and every proposal ever created.
//! - **Proposal**: a request to send an amount to a recipient. Moves
//!   `Active -> Passed | Rejected`, then `Passed -> Executed`.
//! - **Tally**: quorum is `ceil(members * 33%)`, approval is the yes
//!   share of votes cast and must reach 51%.
//! - **Admin capability**: a non-cloneable token that gates membership
//!   changes.
//! - **Event journal**: every state change yields a notification record.
//!
//! # Architecture
//!
//! This is a pure types crate with no logging or I/O. All types
//! implement `Clone` (except the capability), `Debug`, `Serialize`,
//! `Deserialize`. Arithmetic is checked and surfaces
//! [`TreasuryError::ArithmeticOverflow`] rather than wrapping.

#![deny(unsafe_code)]

mod amount;
mod capability;
mod config;
mod errors;
mod journal;
mod membership;
mod proposal;
mod tally;
mod treasury;

pub use amount::*;
pub use capability::*;
pub use config::*;
pub use errors::*;
pub use journal::*;
pub use membership::*;
pub use proposal::*;
pub use tally::*;
pub use treasury::*;
