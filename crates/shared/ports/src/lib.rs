//! HexDex Ports
//!
//! Port definitions (traits) for the HexDex exchange.
//! These define the boundaries between the matching logic and the stores
//! holding balances, listed assets and resting orders.

mod clock;
mod error;
mod ledger;
mod order_book;
mod registry;

pub use clock::Clock;
pub use error::{BookError, BookResult, LedgerError, LedgerResult, RegistryError, RegistryResult};
pub use ledger::BalanceLedger;
pub use order_book::OrderBookStore;
pub use registry::AssetRegistry;
