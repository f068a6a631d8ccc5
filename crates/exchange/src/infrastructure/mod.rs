mod clock;
mod config;
mod event_publisher;
mod in_memory_ledger;
mod in_memory_order_book;
mod in_memory_registry;

pub use clock::{FixedClock, SystemClock};
pub use config::{
    AccountConfig, AssetConfig, ConfigError, DepositConfig, ExchangeConfig, SeedOrderConfig,
};
pub use event_publisher::BroadcastEventPublisher;
pub use in_memory_ledger::InMemoryLedger;
pub use in_memory_order_book::InMemoryOrderBookStore;
pub use in_memory_registry::InMemoryAssetRegistry;
