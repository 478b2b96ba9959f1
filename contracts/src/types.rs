//! Common types used across the protocol.

use odra::prelude::*;
use odra::casper_types::U256;

/// Price sample published by a collateral price feed.
#[odra::odra_type]
#[derive(Copy)]
pub struct PriceSample {
    /// Integer price of one whole collateral unit, in USD
    pub value: U256,
    /// Decimal places for `value`
    pub decimals: u8,
    /// Block time of the last feed update, in milliseconds
    pub as_of: u64,
}

/// Configuration of one allow-listed collateral asset.
#[odra::odra_type]
#[derive(Copy)]
pub struct CollateralConfig {
    /// Price feed contract quoting the asset in USD
    pub feed: Address,
    /// The asset's native fixed-point scale
    pub decimals: u8,
}

/// Aggregate account snapshot.
#[odra::odra_type]
pub struct AccountInfo {
    /// Outstanding stable-unit debt (18 decimals)
    pub debt: U256,
    /// Collateral value at current prices, in 18-decimal USD
    pub collateral_value_usd: U256,
}
