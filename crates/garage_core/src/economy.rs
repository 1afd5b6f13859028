//! Currency ledger.
//!
//! Holds a balance plus cumulative earn/spend counters. Debits and credits
//! are synchronous and complete before returning, so no partial update is
//! ever observable.
//!
//! All amounts use integer currency units.

use serde::{Deserialize, Serialize};

/// Balance a fresh standard account starts with.
pub const STARTING_BALANCE: i64 = 50_000;

/// Account identity the ledger operates under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccountKind {
    /// Normal account: every spend is checked against the balance.
    #[default]
    Standard,
    /// Unlimited-funds account: spends always succeed and never touch the
    /// balance, but earn/spend counters still record for telemetry.
    Unlimited,
}

/// Player currency state.
///
/// `Copy` so transactional callers can snapshot the whole ledger and restore
/// it on rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    account: AccountKind,
    balance: i64,
    total_earned: i64,
    total_spent: i64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(STARTING_BALANCE)
    }
}

impl Ledger {
    /// Create a standard-account ledger with the given starting balance.
    #[must_use]
    pub const fn new(balance: i64) -> Self {
        Self {
            account: AccountKind::Standard,
            balance,
            total_earned: 0,
            total_spent: 0,
        }
    }

    /// Create an unlimited-funds ledger.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            account: AccountKind::Unlimited,
            balance: 0,
            total_earned: 0,
            total_spent: 0,
        }
    }

    /// The account identity this ledger operates under.
    #[must_use]
    pub const fn account(&self) -> AccountKind {
        self.account
    }

    /// Current balance.
    #[must_use]
    pub const fn balance(&self) -> i64 {
        self.balance
    }

    /// Cumulative amount credited over the ledger's lifetime.
    #[must_use]
    pub const fn total_earned(&self) -> i64 {
        self.total_earned
    }

    /// Cumulative amount debited over the ledger's lifetime.
    #[must_use]
    pub const fn total_spent(&self) -> i64 {
        self.total_spent
    }

    /// Check whether a cost is payable.
    #[must_use]
    pub const fn can_afford(&self, amount: i64) -> bool {
        match self.account {
            AccountKind::Unlimited => true,
            AccountKind::Standard => self.balance >= amount,
        }
    }

    /// Debit the balance.
    ///
    /// Unlimited accounts always succeed without a balance mutation; the
    /// spend counter still advances. Standard accounts fail with no mutation
    /// when the balance is short.
    ///
    /// Returns true if the transaction succeeded.
    pub fn spend(&mut self, amount: i64) -> bool {
        match self.account {
            AccountKind::Unlimited => {
                self.total_spent += amount;
                true
            }
            AccountKind::Standard => {
                if self.balance < amount {
                    return false;
                }
                self.balance -= amount;
                self.total_spent += amount;
                true
            }
        }
    }

    /// Credit the balance.
    ///
    /// Non-positive amounts are a no-op.
    pub fn add(&mut self, amount: i64) {
        if amount <= 0 {
            return;
        }
        self.balance += amount;
        self.total_earned += amount;
    }
}
