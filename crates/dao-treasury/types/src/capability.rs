//! Admin capability: the token of authority over membership
//!
//! Held by a separate identity, not a member. Not `Clone`; it is minted
//! once at treasury creation and may be persisted by the holder. The
//! embedded secret is what grants authority, so a persisted capability
//! must be stored like a key.

use crate::{AccountId, TreasuryError, TreasuryId, TreasuryResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authority to add and remove members of one treasury
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCapability {
    treasury_id: TreasuryId,
    holder: AccountId,
    issued_at: DateTime<Utc>,
    secret: Uuid,
}

impl AdminCapability {
    pub(crate) fn mint(
        treasury_id: TreasuryId,
        holder: AccountId,
        issued_at: DateTime<Utc>,
        secret: Uuid,
    ) -> Self {
        Self {
            treasury_id,
            holder,
            issued_at,
            secret,
        }
    }

    /// The treasury this capability governs
    pub fn treasury_id(&self) -> &TreasuryId {
        &self.treasury_id
    }

    pub fn holder(&self) -> &AccountId {
        &self.holder
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Check that this capability was minted for `treasury_id` with `secret`
    pub(crate) fn authorize(&self, treasury_id: &TreasuryId, secret: &Uuid) -> TreasuryResult<()> {
        if &self.treasury_id != treasury_id || &self.secret != secret {
            return Err(TreasuryError::InvalidCapability {
                expected: treasury_id.clone(),
                presented: self.treasury_id.clone(),
            });
        }
        Ok(())
    }
}
