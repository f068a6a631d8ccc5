use hexdex_core::{AccountId, AssetKey, Balance, Ticker};
use hexdex_matching::{MatchingError, SettlementHalt};
use hexdex_ports::{BookError, LedgerError, RegistryError};
use thiserror::Error;

use crate::infrastructure::ConfigError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    #[error("Unauthorized: {caller} may not register assets")]
    Unauthorized { caller: AccountId },

    #[error("Asset already registered: {0}")]
    AlreadyRegistered(Ticker),

    #[error("Insufficient funds: {account} holds {available} {asset}, {required} required")]
    InsufficientFunds {
        account: AccountId,
        asset: AssetKey,
        required: Balance,
        available: Balance,
    },

    #[error("Settlement failure: {0}")]
    SettlementFailure(SettlementHalt),

    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid ticker {ticker:?}: {reason}")]
    InvalidTicker { ticker: String, reason: String },

    #[error("Invalid asset reference: {0}")]
    InvalidReference(String),

    #[error("Balance overflow: crediting {amount} {asset} to {account}")]
    BalanceOverflow {
        account: AccountId,
        asset: AssetKey,
        amount: Balance,
    },

    #[error("Order book error: {0}")]
    Book(#[from] BookError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ExchangeError>;

impl From<LedgerError> for ExchangeError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientFunds {
                account,
                asset,
                required,
                available,
            } => ExchangeError::InsufficientFunds {
                account,
                asset,
                required,
                available,
            },
            LedgerError::Overflow {
                account,
                asset,
                amount,
            } => ExchangeError::BalanceOverflow {
                account,
                asset,
                amount,
            },
        }
    }
}

impl From<RegistryError> for ExchangeError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Unauthorized { caller } => ExchangeError::Unauthorized { caller },
            RegistryError::AlreadyRegistered(ticker) => ExchangeError::AlreadyRegistered(ticker),
            RegistryError::UnknownAsset(ticker) => ExchangeError::UnknownAsset(ticker.to_string()),
        }
    }
}

impl From<MatchingError> for ExchangeError {
    fn from(err: MatchingError) -> Self {
        match err {
            MatchingError::InsufficientFunds {
                account,
                asset,
                required,
                available,
            } => ExchangeError::InsufficientFunds {
                account,
                asset,
                required,
                available,
            },
            MatchingError::SettlementFailure(halt) => ExchangeError::SettlementFailure(halt),
            MatchingError::ZeroQuantity => {
                ExchangeError::InvalidOrder("amount must be positive".to_string())
            }
            MatchingError::Ledger(err) => err.into(),
            MatchingError::Book(err) => err.into(),
        }
    }
}
