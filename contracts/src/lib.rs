//! cspr-stable Contracts
//!
//! Casper-native over-collateralized stable-asset issuance engine.
//!
//! ## Architecture
//!
//! - **SolvencyEngine**: Deposits, redemptions, csUSD mint/burn and
//!   liquidation, all gated by the account health factor
//! - **CollateralLedger**: Per-account, per-asset custody bookkeeping
//!   (sub-module of the engine, not independently addressable)
//! - **StableUsd (csUSD)**: Protocol stable token with engine-gated
//!   mint/burn
//! - **PriceFeed**: Push-model per-asset USD price feed
//! - **CollateralToken**: CEP-18-style fungible collateral with a
//!   configurable decimal scale
//!
//! ## Solvency Rule
//!
//! Half of an account's collateral value counts toward its borrowing
//! capacity. Any operation that could leave an indebted account below a
//! health factor of 1.0 reverts in full, and accounts below it can be
//! liquidated by anyone willing to repay their debt for a 10% collateral
//! bonus.

#![cfg_attr(target_arch = "wasm32", no_std)]

#[cfg(target_arch = "wasm32")]
extern crate alloc;

// Re-export odra for downstream usage
pub use odra;

// Core module declarations
pub mod types;
pub mod errors;

// Contract modules
pub mod ledger;
pub mod engine;
pub mod stable_token;
pub mod price_feed;
pub mod collateral_token;
