//! Solvency Engine Contract
//!
//! Single entry point for every user operation against the protocol:
//! collateral deposits and redemptions, csUSD minting and burning, and
//! third-party liquidation of unhealthy accounts.
//!
//! Operation flow:
//! 1. Mutating calls hold the re-entrancy lock for their whole duration
//! 2. Ledger and debt bookkeeping settle before any external token call
//! 3. Operations that can worsen an account recompute its health factor
//!    afterwards and revert below `MIN_HEALTH_FACTOR`
//! 4. Liquidation must strictly improve the target account and must
//!    leave the liquidator healthy

use odra::prelude::*;
use odra::casper_types::{U256, RuntimeArgs, runtime_args};
use odra::CallDef;

use crate::errors::ProtocolError;
use crate::ledger::CollateralLedger;
use crate::types::{AccountInfo, CollateralConfig, PriceSample};

/// Canonical USD fixed-point scale (1e18)
const PRECISION: u64 = 1_000_000_000_000_000_000;

/// Share of raw collateral value counted toward borrowing capacity (50%)
const LIQUIDATION_THRESHOLD: u64 = 50;

/// Denominator for the liquidation threshold
const LIQUIDATION_PRECISION: u64 = 100;

/// Collateral bonus paid to liquidators, in percent of the covered debt
const LIQUIDATION_BONUS: u64 = 10;

/// Health factor of an account at the solvency boundary (1.0 at 1e18 scale)
const MIN_HEALTH_FACTOR: u64 = 1_000_000_000_000_000_000;

/// Decimal places of canonical USD values
const USD_DECIMALS: u8 = 18;

/// Solvency Engine Contract
#[odra::module]
pub struct SolvencyEngine {
    /// csUSD stable token contract address
    stable_token: Var<Address>,
    /// Ordered collateral allow-list, fixed at deployment
    collateral_assets: Var<Vec<Address>>,
    /// Per-asset configuration (price feed, native decimals)
    collateral_configs: Mapping<Address, CollateralConfig>,
    /// Maximum accepted price sample age, in milliseconds
    max_price_age_ms: Var<u64>,
    /// Outstanding csUSD debt per account
    debts: Mapping<Address, U256>,
    /// Total outstanding csUSD debt
    total_debt: Var<U256>,
    /// Collateral custody bookkeeping
    ledger: SubModule<CollateralLedger>,
    /// Re-entrancy lock, held while a mutating call is in flight
    locked: Var<bool>,
}

#[odra::module]
impl SolvencyEngine {
    /// Initialize the engine with its stable token and collateral allow-list.
    ///
    /// `collateral_assets`, `price_feeds` and `decimals` are parallel lists:
    /// entry `i` of each describes one allow-listed asset. The allow-list is
    /// immutable after deployment.
    pub fn init(
        &mut self,
        stable_token: Address,
        collateral_assets: Vec<Address>,
        price_feeds: Vec<Address>,
        decimals: Vec<u8>,
        max_price_age_ms: u64,
    ) {
        if collateral_assets.len() != price_feeds.len()
            || collateral_assets.len() != decimals.len()
        {
            self.env().revert(ProtocolError::ConfigurationMismatch);
        }

        for (i, asset) in collateral_assets.iter().enumerate() {
            // USD values settle to 18 decimals; a wider asset scale cannot
            // be represented without losing precision
            if decimals[i] > USD_DECIMALS {
                self.env().revert(ProtocolError::ConfigurationMismatch);
            }
            self.collateral_configs.set(
                asset,
                CollateralConfig {
                    feed: price_feeds[i],
                    decimals: decimals[i],
                },
            );
        }

        self.stable_token.set(stable_token);
        self.collateral_assets.set(collateral_assets);
        self.max_price_age_ms.set(max_price_age_ms);
        self.total_debt.set(U256::zero());
        self.locked.set(false);
    }

    // ========== Mutating Entry Points ==========

    /// Deposit `qty` of an allow-listed asset as collateral for the caller.
    ///
    /// The caller must have approved the engine for at least `qty`
    /// beforehand. Depositing never reads prices, so it stays available
    /// while feeds are stale.
    pub fn deposit(&mut self, asset: Address, qty: U256) {
        self.acquire_lock();
        self.deposit_internal(asset, qty);
        self.release_lock();
    }

    /// Withdraw `qty` of a deposited asset back to the caller.
    ///
    /// Reverts when the remaining position would leave an indebted caller
    /// below the minimum health factor.
    pub fn redeem(&mut self, asset: Address, qty: U256) {
        self.acquire_lock();
        self.redeem_internal(asset, qty);
        self.release_lock();
    }

    /// Mint `amount` csUSD against the caller's deposited collateral.
    pub fn mint(&mut self, amount: U256) {
        self.acquire_lock();
        self.mint_internal(amount);
        self.release_lock();
    }

    /// Repay `amount` of the caller's debt by pulling and burning csUSD.
    ///
    /// The caller must have approved the engine for at least `amount` of
    /// csUSD. Burning never reads prices and can only improve an account,
    /// so it stays available while feeds are stale.
    pub fn burn(&mut self, amount: U256) {
        self.acquire_lock();
        self.burn_internal(amount);
        self.release_lock();
    }

    /// Deposit collateral and mint csUSD in one atomic call.
    pub fn deposit_and_mint(&mut self, asset: Address, collateral_qty: U256, mint_amount: U256) {
        self.acquire_lock();
        self.deposit_internal(asset, collateral_qty);
        self.mint_internal(mint_amount);
        self.release_lock();
    }

    /// Repay debt and withdraw collateral in one atomic call.
    ///
    /// The burn settles first, so collateral can be withdrawn that the
    /// pre-burn debt level would have locked in.
    pub fn redeem_for_burn(&mut self, asset: Address, collateral_qty: U256, burn_amount: U256) {
        self.acquire_lock();
        self.burn_internal(burn_amount);
        self.redeem_internal(asset, collateral_qty);
        self.release_lock();
    }

    /// Liquidate an account whose health factor fell below the minimum.
    ///
    /// The caller repays `debt_to_cover` csUSD of `account`'s debt and
    /// receives the equivalent quantity of `asset` plus a 10% bonus out
    /// of the account's deposited balance. The liquidation must strictly
    /// improve the account's health factor, and the caller's own account
    /// must stay healthy.
    pub fn liquidate(&mut self, account: Address, asset: Address, debt_to_cover: U256) {
        self.acquire_lock();
        self.liquidate_internal(account, asset, debt_to_cover);
        self.release_lock();
    }

    // ========== Read-Only Queries ==========

    /// Get the USD value (18 decimals) of `qty` of an allow-listed asset.
    pub fn usd_value(&self, asset: Address, qty: U256) -> U256 {
        let config = self.require_listed(asset);
        collateral_usd(qty, self.price_of(&config), config.decimals)
    }

    /// Get the quantity of `asset`, in its native scale, worth `usd_amount`.
    pub fn asset_qty_for_usd(&self, asset: Address, usd_amount: U256) -> U256 {
        let config = self.require_listed(asset);
        qty_from_usd(usd_amount, self.price_of(&config), config.decimals)
    }

    /// Get an account's health factor (1e18 scale, `U256::MAX` without debt).
    pub fn health_factor(&self, account: Address) -> U256 {
        self.account_health_factor(account)
    }

    /// Check whether an account is currently open to liquidation.
    pub fn is_liquidatable(&self, account: Address) -> bool {
        self.account_health_factor(account) < U256::from(MIN_HEALTH_FACTOR)
    }

    /// Get an account's debt and total collateral value at current prices.
    pub fn account_info(&self, account: Address) -> AccountInfo {
        AccountInfo {
            debt: self.debt_of(account),
            collateral_value_usd: self.collateral_value_of(account),
        }
    }

    /// Get the quantity of `asset` deposited by `account`.
    pub fn deposited_balance(&self, account: Address, asset: Address) -> U256 {
        self.ledger.balance_of(account, asset)
    }

    /// Get an account's outstanding csUSD debt.
    pub fn debt_of(&self, account: Address) -> U256 {
        self.debts.get(&account).unwrap_or(U256::zero())
    }

    /// Get the total quantity of `asset` held in custody.
    pub fn total_deposited(&self, asset: Address) -> U256 {
        self.ledger.total_deposited(asset)
    }

    /// Get the total outstanding csUSD debt across all accounts.
    pub fn total_debt(&self) -> U256 {
        self.total_debt.get().unwrap_or(U256::zero())
    }

    /// Get the collateral allow-list in deployment order.
    pub fn collateral_assets(&self) -> Vec<Address> {
        self.collateral_assets.get_or_default()
    }

    /// Get the configuration of an allow-listed asset.
    pub fn collateral_config(&self, asset: Address) -> Option<CollateralConfig> {
        self.collateral_configs.get(&asset)
    }

    /// Get the csUSD stable token address.
    pub fn stable_token(&self) -> Address {
        self.stable_token
            .get_or_revert_with(ProtocolError::ConfigurationMismatch)
    }

    /// Get the maximum accepted price sample age, in milliseconds.
    pub fn max_price_age_ms(&self) -> u64 {
        self.max_price_age_ms.get_or_default()
    }

    // ========== Internal Operations ==========

    fn deposit_internal(&mut self, asset: Address, qty: U256) {
        if qty.is_zero() {
            self.env().revert(ProtocolError::ZeroAmount);
        }
        self.require_listed(asset);

        let caller = self.env().caller();
        self.ledger.increase(caller, asset, qty);

        self.pull_collateral(asset, caller, qty);
    }

    fn redeem_internal(&mut self, asset: Address, qty: U256) {
        if qty.is_zero() {
            self.env().revert(ProtocolError::ZeroAmount);
        }

        let caller = self.env().caller();
        if qty > self.ledger.balance_of(caller, asset) {
            self.env().revert(ProtocolError::InsufficientCollateral);
        }
        self.ledger.decrease(caller, asset, qty);

        // Debt-free accounts skip the health check, and with it the
        // price reads, so full exits work even while feeds are stale
        if !self.debt_of(caller).is_zero() {
            self.require_healthy(caller);
        }

        self.push_collateral(asset, caller, qty);
    }

    fn mint_internal(&mut self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(ProtocolError::ZeroAmount);
        }

        let caller = self.env().caller();
        self.debts.set(&caller, self.debt_of(caller) + amount);
        self.total_debt.set(self.total_debt() + amount);

        self.require_healthy(caller);

        self.mint_stable(caller, amount);
    }

    fn burn_internal(&mut self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(ProtocolError::ZeroAmount);
        }

        let caller = self.env().caller();
        let debt = self.debt_of(caller);
        if amount > debt {
            self.env().revert(ProtocolError::BurnExceedsDebt);
        }
        self.debts.set(&caller, debt - amount);
        self.total_debt.set(self.total_debt() - amount);

        self.pull_stable(caller, amount);
        self.burn_stable(amount);
    }

    fn liquidate_internal(&mut self, account: Address, asset: Address, debt_to_cover: U256) {
        if debt_to_cover.is_zero() {
            self.env().revert(ProtocolError::ZeroAmount);
        }
        let config = self.require_listed(asset);

        let starting_health = self.account_health_factor(account);
        if starting_health >= U256::from(MIN_HEALTH_FACTOR) {
            self.env().revert(ProtocolError::HealthFactorOk);
        }

        let debt = self.debt_of(account);
        if debt_to_cover > debt {
            self.env().revert(ProtocolError::BurnExceedsDebt);
        }

        // Seize the covered debt's worth of collateral plus the bonus
        let price = self.price_of(&config);
        let base_qty = qty_from_usd(debt_to_cover, price, config.decimals);
        let bonus_qty = base_qty * U256::from(LIQUIDATION_BONUS) / U256::from(LIQUIDATION_PRECISION);
        let payout = base_qty + bonus_qty;

        if payout > self.ledger.balance_of(account, asset) {
            self.env().revert(ProtocolError::InsufficientCollateral);
        }

        let liquidator = self.env().caller();
        self.ledger.decrease(account, asset, payout);
        self.debts.set(&account, debt - debt_to_cover);
        self.total_debt.set(self.total_debt() - debt_to_cover);

        let ending_health = self.account_health_factor(account);
        if ending_health <= starting_health {
            self.env().revert(ProtocolError::HealthFactorNotImproved);
        }
        self.require_healthy(liquidator);

        self.push_collateral(asset, liquidator, payout);
        self.pull_stable(liquidator, debt_to_cover);
        self.burn_stable(debt_to_cover);
    }

    // ========== Internal Helpers ==========

    fn acquire_lock(&mut self) {
        if self.locked.get().unwrap_or(false) {
            self.env().revert(ProtocolError::ReentrantCall);
        }
        self.locked.set(true);
    }

    fn release_lock(&mut self) {
        self.locked.set(false);
    }

    fn require_listed(&self, asset: Address) -> CollateralConfig {
        match self.collateral_configs.get(&asset) {
            Some(config) => config,
            None => self.env().revert(ProtocolError::UnsupportedAsset),
        }
    }

    fn require_healthy(&self, account: Address) {
        if self.account_health_factor(account) < U256::from(MIN_HEALTH_FACTOR) {
            self.env().revert(ProtocolError::HealthFactorBroken);
        }
    }

    /// Fetch, validate and normalize an asset's USD price to 18 decimals.
    fn price_of(&self, config: &CollateralConfig) -> U256 {
        let call_def = CallDef::new("sample", false, RuntimeArgs::new());
        let sample: PriceSample = self.env().call_contract(config.feed, call_def);

        if sample.value.is_zero() || sample.decimals > USD_DECIMALS {
            self.env().revert(ProtocolError::InvalidPrice);
        }

        let age = self.env().get_block_time().saturating_sub(sample.as_of);
        if age > self.max_price_age_ms() {
            self.env().revert(ProtocolError::StalePrice);
        }

        normalized_price(sample.value, sample.decimals)
    }

    /// Sum the USD value of every asset the account has deposited.
    ///
    /// Assets with a zero balance are skipped, so a stale feed only
    /// affects accounts actually exposed to it.
    fn collateral_value_of(&self, account: Address) -> U256 {
        let mut total = U256::zero();
        for asset in self.collateral_assets.get_or_default() {
            let balance = self.ledger.balance_of(account, asset);
            if balance.is_zero() {
                continue;
            }
            let config = self.require_listed(asset);
            total = total + collateral_usd(balance, self.price_of(&config), config.decimals);
        }
        total
    }

    fn account_health_factor(&self, account: Address) -> U256 {
        let debt = self.debt_of(account);
        // A debt-free account cannot become insolvent; skip price reads
        if debt.is_zero() {
            return U256::MAX;
        }
        health_factor_value(self.collateral_value_of(account), debt)
    }

    fn pull_collateral(&self, asset: Address, from: Address, qty: U256) {
        let args = runtime_args! {
            "owner" => from,
            "recipient" => self.env().self_address(),
            "amount" => qty
        };
        let call_def = CallDef::new("transfer_from", true, args);
        let success: bool = self.env().call_contract(asset, call_def);
        if !success {
            self.env().revert(ProtocolError::TransferFailed);
        }
    }

    fn push_collateral(&self, asset: Address, to: Address, qty: U256) {
        let args = runtime_args! {
            "recipient" => to,
            "amount" => qty
        };
        let call_def = CallDef::new("transfer", true, args);
        let success: bool = self.env().call_contract(asset, call_def);
        if !success {
            self.env().revert(ProtocolError::TransferFailed);
        }
    }

    fn mint_stable(&self, to: Address, amount: U256) {
        let args = runtime_args! {
            "to" => to,
            "amount" => amount
        };
        let call_def = CallDef::new("mint", true, args);
        self.env().call_contract::<()>(self.stable_token(), call_def);
    }

    fn pull_stable(&self, from: Address, amount: U256) {
        let args = runtime_args! {
            "owner" => from,
            "recipient" => self.env().self_address(),
            "amount" => amount
        };
        let call_def = CallDef::new("transfer_from", true, args);
        let success: bool = self.env().call_contract(self.stable_token(), call_def);
        if !success {
            self.env().revert(ProtocolError::TransferFailed);
        }
    }

    fn burn_stable(&self, amount: U256) {
        let args = runtime_args! {
            "amount" => amount
        };
        let call_def = CallDef::new("burn", true, args);
        self.env().call_contract::<()>(self.stable_token(), call_def);
    }
}

// ===== Valuation Functions =====

/// 10^decimals as U256
fn scale_factor(decimals: u8) -> U256 {
    U256::from(10u64).pow(U256::from(decimals as u64))
}

/// Bring a feed value of `decimals` places up to the canonical 18-decimal scale
fn normalized_price(value: U256, decimals: u8) -> U256 {
    value * scale_factor(USD_DECIMALS - decimals)
}

/// USD value (18 decimals) of `qty` native units priced at `price` (18 decimals)
fn collateral_usd(qty: U256, price: U256, asset_decimals: u8) -> U256 {
    qty * price / scale_factor(asset_decimals)
}

/// Native asset quantity worth `usd_amount` (18 decimals) at `price` (18 decimals)
fn qty_from_usd(usd_amount: U256, price: U256, asset_decimals: u8) -> U256 {
    usd_amount * scale_factor(asset_decimals) / price
}

/// Health factor at 1e18 scale: 1.0 sits exactly at the solvency boundary
fn health_factor_value(collateral_value_usd: U256, debt: U256) -> U256 {
    if debt.is_zero() {
        return U256::MAX;
    }
    let adjusted = collateral_value_usd * U256::from(LIQUIDATION_THRESHOLD)
        / U256::from(LIQUIDATION_PRECISION);
    adjusted * U256::from(PRECISION) / debt
}
