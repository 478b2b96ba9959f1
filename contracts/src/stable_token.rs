//! csUSD Stable Token Contract
//!
//! CEP-18 compatible stable token with engine-controlled supply.
//! Only the configured solvency engine can mint and burn, so the
//! outstanding supply always mirrors the debt the engine accounts for.

use odra::prelude::*;
use odra::casper_types::U256;

use crate::errors::ProtocolError;

/// csUSD Stable Token Contract
#[odra::module]
pub struct StableUsd {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Decimals (18 for csUSD)
    decimals: Var<u8>,
    /// Total supply
    total_supply: Var<U256>,
    /// Balance mapping
    balances: Mapping<Address, U256>,
    /// Allowance mapping (owner -> spender -> amount)
    allowances: Mapping<(Address, Address), U256>,
    /// Token admin, wires the engine after deployment
    admin: Var<Address>,
    /// Solvency engine with mint/burn rights
    engine: Var<Address>,
}

#[odra::module]
impl StableUsd {
    /// Initialize the token. The deployer becomes the admin.
    pub fn init(&mut self) {
        self.name.set(String::from("csUSD"));
        self.symbol.set(String::from("csUSD"));
        self.decimals.set(18);
        self.total_supply.set(U256::zero());
        self.admin.set(self.env().caller());
    }

    // ========== CEP-18 Standard Functions ==========

    /// Get token name
    pub fn name(&self) -> String {
        self.name.get().unwrap_or_else(|| String::from("csUSD"))
    }

    /// Get token symbol
    pub fn symbol(&self) -> String {
        self.symbol.get().unwrap_or_else(|| String::from("csUSD"))
    }

    /// Get decimals
    pub fn decimals(&self) -> u8 {
        self.decimals.get().unwrap_or(18)
    }

    /// Get total supply
    pub fn total_supply(&self) -> U256 {
        self.total_supply.get().unwrap_or(U256::zero())
    }

    /// Get balance of an account
    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).unwrap_or(U256::zero())
    }

    /// Get allowance for spender
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or(U256::zero())
    }

    /// Transfer tokens to recipient
    pub fn transfer(&mut self, recipient: Address, amount: U256) -> bool {
        let sender = self.env().caller();
        self.transfer_internal(sender, recipient, amount);
        true
    }

    /// Approve spender to spend tokens
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let owner = self.env().caller();
        self.approve_internal(owner, spender, amount);
        true
    }

    /// Transfer tokens from owner to recipient (requires allowance)
    pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool {
        let spender = self.env().caller();

        let current_allowance = self.allowance(owner, spender);
        if current_allowance < amount {
            self.env().revert(ProtocolError::InsufficientAllowance);
        }

        self.transfer_internal(owner, recipient, amount);
        self.approve_internal(owner, spender, current_allowance - amount);
        true
    }

    // ========== Engine Functions (Restricted) ==========

    /// Mint new tokens (engine only)
    pub fn mint(&mut self, to: Address, amount: U256) {
        self.require_engine();

        let current_balance = self.balance_of(to);
        self.balances.set(&to, current_balance + amount);

        let new_supply = self.total_supply() + amount;
        self.total_supply.set(new_supply);
    }

    /// Burn tokens from the caller's balance (engine only)
    pub fn burn(&mut self, amount: U256) {
        self.require_engine();

        let caller = self.env().caller();
        let current_balance = self.balance_of(caller);
        if current_balance < amount {
            self.env().revert(ProtocolError::InsufficientTokenBalance);
        }
        self.balances.set(&caller, current_balance - amount);

        let new_supply = self.total_supply() - amount;
        self.total_supply.set(new_supply);
    }

    // ========== Admin Functions ==========

    /// Wire the solvency engine (admin only)
    pub fn set_engine(&mut self, engine: Address) {
        self.require_admin();
        self.engine.set(engine);
    }

    /// Get the configured engine
    pub fn engine(&self) -> Option<Address> {
        self.engine.get()
    }

    /// Get the token admin
    pub fn admin(&self) -> Option<Address> {
        self.admin.get()
    }

    // ========== Internal Functions ==========

    fn transfer_internal(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(ProtocolError::InsufficientTokenBalance);
        }
        self.balances.set(&from, from_balance - amount);

        let to_balance = self.balance_of(to);
        self.balances.set(&to, to_balance + amount);
    }

    fn approve_internal(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(owner, spender), amount);
    }

    fn require_engine(&self) {
        match self.engine.get() {
            Some(engine) if engine == self.env().caller() => {}
            _ => self.env().revert(ProtocolError::Unauthorized),
        }
    }

    fn require_admin(&self) {
        match self.admin.get() {
            Some(admin) if admin == self.env().caller() => {}
            _ => self.env().revert(ProtocolError::Unauthorized),
        }
    }
}
