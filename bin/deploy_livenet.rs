//! Deploy contracts to Casper livenet/testnet using Odra livenet environment.
//!
//! Usage:
//!   cargo run --bin deploy_livenet --release
//!
//! Requires .env file with:
//!   ODRA_CASPER_LIVENET_SECRET_KEY_PATH=/path/to/secret_key.pem
//!   ODRA_CASPER_LIVENET_NODE_ADDRESS=https://node.testnet.casper.network
//!   ODRA_CASPER_LIVENET_CHAIN_NAME=casper-test
//!   ODRA_CASPER_LIVENET_PAYMENT_AMOUNT=200000000000

use odra::casper_types::U256;
use odra::host::{Deployer, NoArgs};
use odra::prelude::Addressable;

use cspr_stable_contracts::collateral_token::{CollateralToken, CollateralTokenInitArgs};
use cspr_stable_contracts::engine::{SolvencyEngine, SolvencyEngineInitArgs};
use cspr_stable_contracts::price_feed::{PriceFeed, PriceFeedInitArgs};
use cspr_stable_contracts::stable_token::StableUsd;

fn main() {
    // Load environment from .env file
    dotenv::dotenv().ok();

    println!("=== cspr-stable Livenet Deployment ===");
    println!();

    // Initialize Odra livenet environment
    let env = odra_casper_livenet_env::env();

    // Configure payment amount for deployments/calls (required for Casper 2.0 txs)
    let payment_amount: u64 = std::env::var("ODRA_CASPER_LIVENET_PAYMENT_AMOUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(200_000_000_000);
    env.set_gas(payment_amount);

    // Get deployer address; it becomes token admin and price feeder
    let deployer = env.caller();
    println!("Deployer: {:?}", deployer);
    println!();

    // Protocol parameters
    let feed_decimals: u8 = 8;
    let max_price_age_ms: u64 = 3_600_000; // 1 hour
    // Bootstrap prices at the 8-decimal feed scale; the feeder refreshes
    // them as soon as the off-chain price pusher is pointed at the feeds
    let weth_usd = U256::from(2_000u64) * U256::from(100_000_000u64);
    let wcspr_usd = U256::from(2u64) * U256::from(100_000_000u64);

    // ==================== Phase 1: Tokens ====================
    println!("=== Phase 1: Deploying Tokens ===");
    println!();

    // 1. StableUsd (csUSD)
    println!("Deploying StableUsd...");
    let mut stable = StableUsd::deploy(&env, NoArgs);
    let stable_addr = stable.address().clone();
    println!("StableUsd deployed at: {:?}", stable_addr);

    // 2. Testnet collateral stand-ins; on mainnet the engine is pointed
    // at the existing CEP-18 contracts instead
    println!("Deploying CollateralToken (WETH)...");
    let weth = CollateralToken::deploy(
        &env,
        CollateralTokenInitArgs {
            name: String::from("Wrapped Ether"),
            symbol: String::from("WETH"),
            decimals: 18,
        },
    );
    let weth_addr = weth.address().clone();
    println!("CollateralToken (WETH) deployed at: {:?}", weth_addr);

    println!("Deploying CollateralToken (WCSPR)...");
    let wcspr = CollateralToken::deploy(
        &env,
        CollateralTokenInitArgs {
            name: String::from("Wrapped CSPR"),
            symbol: String::from("WCSPR"),
            decimals: 9,
        },
    );
    let wcspr_addr = wcspr.address().clone();
    println!("CollateralToken (WCSPR) deployed at: {:?}", wcspr_addr);

    println!();

    // ==================== Phase 2: Price Feeds ====================
    println!("=== Phase 2: Deploying Price Feeds ===");
    println!();

    println!("Deploying PriceFeed (WETH/USD)...");
    let weth_feed = PriceFeed::deploy(
        &env,
        PriceFeedInitArgs {
            decimals: feed_decimals,
            initial_value: weth_usd,
        },
    );
    let weth_feed_addr = weth_feed.address().clone();
    println!("PriceFeed (WETH/USD) deployed at: {:?}", weth_feed_addr);

    println!("Deploying PriceFeed (WCSPR/USD)...");
    let wcspr_feed = PriceFeed::deploy(
        &env,
        PriceFeedInitArgs {
            decimals: feed_decimals,
            initial_value: wcspr_usd,
        },
    );
    let wcspr_feed_addr = wcspr_feed.address().clone();
    println!("PriceFeed (WCSPR/USD) deployed at: {:?}", wcspr_feed_addr);

    println!();

    // ==================== Phase 3: Engine ====================
    println!("=== Phase 3: Deploying SolvencyEngine ===");
    println!();

    println!("Deploying SolvencyEngine...");
    let engine = SolvencyEngine::deploy(
        &env,
        SolvencyEngineInitArgs {
            stable_token: stable_addr,
            collateral_assets: vec![weth_addr, wcspr_addr],
            price_feeds: vec![weth_feed_addr, wcspr_feed_addr],
            decimals: vec![18, 9],
            max_price_age_ms,
        },
    );
    let engine_addr = engine.address().clone();
    println!("SolvencyEngine deployed at: {:?}", engine_addr);

    println!();

    // ==================== Phase 4: Cross-contract Configuration ====================
    println!("=== Phase 4: Cross-contract Configuration ===");
    println!();

    // Hand mint/burn rights to the engine
    println!("Configuring StableUsd -> SolvencyEngine link...");
    stable.set_engine(engine_addr);
    println!("Done.");

    println!();
    println!("=== Deployment Complete ===");
    println!();
    println!("Contract Addresses:");
    println!("  StableUsd:           {:?}", stable_addr);
    println!("  CollateralToken WETH: {:?}", weth_addr);
    println!("  CollateralToken WCSPR: {:?}", wcspr_addr);
    println!("  PriceFeed WETH/USD:  {:?}", weth_feed_addr);
    println!("  PriceFeed WCSPR/USD: {:?}", wcspr_feed_addr);
    println!("  SolvencyEngine:      {:?}", engine_addr);
}
