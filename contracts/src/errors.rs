//! Protocol error definitions.

use odra::prelude::*;

/// Solvency protocol errors
#[repr(u16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProtocolError {
    // Input validation errors (1xx)
    ZeroAmount = 100,
    UnsupportedAsset = 101,
    ConfigurationMismatch = 102,

    // Insufficient resource errors (2xx)
    InsufficientCollateral = 200,
    BurnExceedsDebt = 201,
    InsufficientBalance = 202,

    // Invariant violation errors (3xx)
    HealthFactorBroken = 300,
    HealthFactorOk = 301,
    HealthFactorNotImproved = 302,

    // Collaborator failure errors (4xx)
    TransferFailed = 400,
    ReentrantCall = 401,

    // Oracle policy errors (5xx)
    StalePrice = 500,
    InvalidPrice = 501,

    // Access control and token errors (6xx)
    Unauthorized = 600,
    InsufficientTokenBalance = 601,
    InsufficientAllowance = 602,
}

impl ProtocolError {
    pub const fn message(&self) -> &'static str {
        match self {
            // Input validation
            ProtocolError::ZeroAmount => "Amount must be greater than zero",
            ProtocolError::UnsupportedAsset => "Asset is not on the collateral allow-list",
            ProtocolError::ConfigurationMismatch => "Collateral configuration lists do not line up",

            // Insufficient resources
            ProtocolError::InsufficientCollateral => "Insufficient deposited collateral",
            ProtocolError::BurnExceedsDebt => "Burn amount exceeds outstanding debt",
            ProtocolError::InsufficientBalance => "Ledger balance too low",

            // Invariant violations
            ProtocolError::HealthFactorBroken => "Health factor below minimum",
            ProtocolError::HealthFactorOk => "Account is healthy, nothing to liquidate",
            ProtocolError::HealthFactorNotImproved => "Liquidation did not improve health factor",

            // Collaborator failures
            ProtocolError::TransferFailed => "Token transfer failed",
            ProtocolError::ReentrantCall => "Re-entrant call rejected",

            // Oracle policy
            ProtocolError::StalePrice => "Price sample older than accepted age",
            ProtocolError::InvalidPrice => "Price sample zero or malformed",

            // Access control / token
            ProtocolError::Unauthorized => "Unauthorized: caller may not perform this action",
            ProtocolError::InsufficientTokenBalance => "Insufficient token balance",
            ProtocolError::InsufficientAllowance => "Insufficient token allowance",
        }
    }
}

impl core::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<ProtocolError> for OdraError {
    fn from(error: ProtocolError) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            OdraError::user(error as u16)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            OdraError::user(error as u16, error.message())
        }
    }
}
