//! Collateral custody ledger.
//!
//! Pure bookkeeping for deposited collateral, keyed by `(account, asset)`,
//! with a running custody total per asset. The ledger holds no solvency
//! rules and no allow-list: it only guarantees that no balance and no
//! total ever goes below zero. It is mounted as a sub-module of the
//! solvency engine and is not reachable from outside it.

use odra::prelude::*;
use odra::casper_types::U256;

use crate::errors::ProtocolError;

/// Per-account, per-asset collateral bookkeeping.
#[odra::module]
pub struct CollateralLedger {
    /// Deposited quantity per (account, asset)
    balances: Mapping<(Address, Address), U256>,
    /// Custody total per asset
    totals: Mapping<Address, U256>,
}

#[odra::module]
impl CollateralLedger {
    /// Get the quantity of `asset` deposited by `account`. Zero for unknown pairs.
    pub fn balance_of(&self, account: Address, asset: Address) -> U256 {
        self.balances.get(&(account, asset)).unwrap_or(U256::zero())
    }

    /// Get the total quantity of `asset` held in custody across all accounts.
    pub fn total_deposited(&self, asset: Address) -> U256 {
        self.totals.get(&asset).unwrap_or(U256::zero())
    }

    /// Credit `qty` of `asset` to `account`.
    pub fn increase(&mut self, account: Address, asset: Address, qty: U256) {
        let balance = self.balance_of(account, asset);
        self.balances.set(&(account, asset), balance + qty);

        let total = self.total_deposited(asset);
        self.totals.set(&asset, total + qty);
    }

    /// Debit `qty` of `asset` from `account`.
    ///
    /// Reverts with `InsufficientBalance` when the account's balance
    /// cannot cover the debit.
    pub fn decrease(&mut self, account: Address, asset: Address, qty: U256) {
        let balance = self.balance_of(account, asset);
        if qty > balance {
            self.env().revert(ProtocolError::InsufficientBalance);
        }
        self.balances.set(&(account, asset), balance - qty);

        let total = self.total_deposited(asset);
        self.totals.set(&asset, total - qty);
    }
}
