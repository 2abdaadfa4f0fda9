//! Treasury Ledger: deposits and the single controlled withdrawal path

use chrono::{DateTime, Utc};
use dao_treasury_types::{
    AccountId, Amount, EventJournal, GovernanceEvent, Treasury, TreasuryError, TreasuryResult,
};
use tracing::{info, warn};

/// Moves funds in and out of the custodied balance
#[derive(Clone, Copy, Debug, Default)]
pub struct TreasuryLedger;

impl TreasuryLedger {
    pub fn new() -> Self {
        Self
    }

    /// Deposit funds. Open to anyone, member or not.
    pub fn deposit(
        &self,
        treasury: &mut Treasury,
        depositor: &AccountId,
        amount: Amount,
        now: DateTime<Utc>,
        journal: &mut EventJournal,
    ) -> TreasuryResult<Amount> {
        let new_balance = treasury.credit(amount)?;

        info!(
            treasury = %treasury.id,
            depositor = %depositor,
            amount = amount.0,
            balance = new_balance.0,
            "Deposit completed"
        );

        journal.record(
            &treasury.id,
            now,
            GovernanceEvent::FundsDeposited {
                depositor: depositor.clone(),
                amount,
                new_balance,
            },
        );

        Ok(new_balance)
    }

    /// Debit funds for an executing proposal
    ///
    /// Only the execution engine calls this. Fails with
    /// `InsufficientFunds` and leaves the balance alone if `amount`
    /// exceeds it.
    pub(crate) fn debit(
        &self,
        treasury: &mut Treasury,
        amount: Amount,
    ) -> TreasuryResult<Amount> {
        let Some(remaining) = treasury.balance.checked_sub(amount) else {
            warn!(
                treasury = %treasury.id,
                amount = amount.0,
                available = treasury.balance.0,
                "Debit refused"
            );
            return Err(TreasuryError::InsufficientFunds {
                required: amount.0,
                available: treasury.balance.0,
            });
        };
        treasury.balance = remaining;
        Ok(remaining)
    }
}
