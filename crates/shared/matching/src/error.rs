use hexdex_core::{AccountId, AssetKey, Balance, OrderId};
use hexdex_ports::{BookError, LedgerError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A trade leg that could not be settled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementHalt {
    /// Resting order of the failed leg
    pub maker_order_id: OrderId,
    /// Account whose debit could not be covered
    pub account: AccountId,
    pub asset: AssetKey,
    pub required: Balance,
    pub available: Balance,
}

impl fmt::Display for SettlementHalt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "leg against order {}: {} holds {} {}, {} required",
            self.maker_order_id, self.account, self.available, self.asset, self.required
        )
    }
}

/// Domain-level errors for market order execution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchingError {
    /// The taker cannot cover even the first fill
    #[error("Insufficient funds: {account} holds {available} {asset}, {required} required")]
    InsufficientFunds {
        account: AccountId,
        asset: AssetKey,
        required: Balance,
        available: Balance,
    },

    #[error("Settlement failure on {0}")]
    SettlementFailure(SettlementHalt),

    #[error("Zero quantity")]
    ZeroQuantity,

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Book(#[from] BookError),
}

pub type MatchingResult<T> = std::result::Result<T, MatchingError>;
