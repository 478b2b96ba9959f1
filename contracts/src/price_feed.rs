//! Push-model USD price feed.
//!
//! One feed instance quotes one collateral asset in USD at a fixed
//! decimal scale. An off-chain feeder pushes new values; every push
//! restamps the sample with the current block time. The feed itself
//! never judges freshness, consumers compare `as_of` against their
//! own maximum accepted age.

use odra::prelude::*;
use odra::casper_types::U256;

use crate::errors::ProtocolError;
use crate::types::PriceSample;

/// Single-asset USD price feed contract.
#[odra::module]
pub struct PriceFeed {
    /// Account allowed to push values
    feeder: Var<Address>,
    /// Decimal places for the published value
    decimals: Var<u8>,
    /// Latest published value
    value: Var<U256>,
    /// Block time of the latest push, in milliseconds
    as_of: Var<u64>,
}

#[odra::module]
impl PriceFeed {
    /// Initialize the feed with its decimal scale and a first value.
    ///
    /// The deployer becomes the feeder. The first sample is stamped
    /// with the deployment block time.
    pub fn init(&mut self, decimals: u8, initial_value: U256) {
        self.feeder.set(self.env().caller());
        self.decimals.set(decimals);
        self.value.set(initial_value);
        self.as_of.set(self.env().get_block_time());
    }

    /// Push a new value and restamp the sample (feeder only).
    ///
    /// A zero value is storable so a broken upstream source can be
    /// observed on chain. Consumers are expected to reject it.
    pub fn set_value(&mut self, value: U256) {
        self.require_feeder();
        self.value.set(value);
        self.as_of.set(self.env().get_block_time());
    }

    /// Get the latest sample.
    pub fn sample(&self) -> PriceSample {
        PriceSample {
            value: self.value.get().unwrap_or(U256::zero()),
            decimals: self.decimals.get().unwrap_or(0),
            as_of: self.as_of.get().unwrap_or(0),
        }
    }

    /// Get the feed's decimal scale.
    pub fn decimals(&self) -> u8 {
        self.decimals.get().unwrap_or(0)
    }

    /// Get the feeder account.
    pub fn feeder(&self) -> Option<Address> {
        self.feeder.get()
    }

    fn require_feeder(&self) {
        match self.feeder.get() {
            Some(feeder) if feeder == self.env().caller() => {}
            _ => self.env().revert(ProtocolError::Unauthorized),
        }
    }
}
