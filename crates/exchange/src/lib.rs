//! HexDex Exchange
//!
//! A minimal multi-asset exchange: per-account balances of a base
//! settlement asset and admin-listed assets, deposits and withdrawals, and
//! one price-ordered limit order book per (ticker, side) that market orders
//! are matched against.

// Application layer
pub mod application;

// Infrastructure layer
pub mod infrastructure;

// Cross-cutting concerns
pub mod error;

// Re-export main types for convenience
pub use application::{
    BookSnapshot, Exchange, ExchangeEvent, ExchangeSnapshot, InMemoryEngine, MarketOrderReport,
    MatchingEngine,
};
pub use error::{ExchangeError, Result};
pub use infrastructure::{ConfigError, ExchangeConfig};

pub use hexdex_core::{AccountId, AssetKey, Balance, Order, OrderId, Price, Quantity, Side, Ticker, Trade};
pub use hexdex_matching::{SettlementHalt, SettlementPolicy};
