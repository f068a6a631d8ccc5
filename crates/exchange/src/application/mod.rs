mod engine;
mod events;
mod exchange;
mod report;

pub use engine::MatchingEngine;
pub use events::ExchangeEvent;
pub use exchange::{BookSnapshot, Exchange, ExchangeSnapshot, InMemoryEngine};
pub use report::MarketOrderReport;
