//! HexDex Core Domain
//!
//! Pure domain types for the HexDex exchange.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod assets;
pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use assets::{AssetKey, AssetRef, MAX_TICKER_LEN, Ticker};
pub use entities::{Order, OrderId, OrderStatus, Side, Trade, TradeId};
pub use values::{AccountId, Balance, Price, Quantity, Timestamp, notional};
