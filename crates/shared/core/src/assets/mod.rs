//! Asset identifiers: tickers, external references and ledger keys.

mod asset_key;
mod ticker;

pub use asset_key::{AssetKey, AssetRef};
pub use ticker::{MAX_TICKER_LEN, Ticker};
