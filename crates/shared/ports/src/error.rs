use hexdex_core::{AccountId, AssetKey, Balance, OrderId, Quantity, Ticker};
use thiserror::Error;

/// Errors raised by a balance ledger
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Insufficient funds: {account} holds {available} {asset}, {required} required")]
    InsufficientFunds {
        account: AccountId,
        asset: AssetKey,
        required: Balance,
        available: Balance,
    },

    #[error("Balance overflow crediting {amount} {asset} to {account}")]
    Overflow {
        account: AccountId,
        asset: AssetKey,
        amount: Balance,
    },
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Errors raised by the asset registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unauthorized: {caller} is not the registry owner")]
    Unauthorized { caller: AccountId },

    #[error("Asset already registered: {0}")]
    AlreadyRegistered(Ticker),

    #[error("Unknown asset: {0}")]
    UnknownAsset(Ticker),
}

pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// Errors raised by an order book store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("Order not found: {0}")]
    UnknownOrder(OrderId),

    #[error("Duplicate order id: {0}")]
    DuplicateOrder(OrderId),

    #[error("Fill of {requested} exceeds remaining {remaining} on order {order_id}")]
    Overfill {
        order_id: OrderId,
        requested: Quantity,
        remaining: Quantity,
    },
}

pub type BookResult<T> = std::result::Result<T, BookError>;
