use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum ticker width in bytes (tickers fit a 32-byte word)
pub const MAX_TICKER_LEN: usize = 32;

/// Short fixed-width identifier of a tradable asset, e.g. `LINK`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    pub fn new(value: impl Into<String>) -> Result<Self, &'static str> {
        let s: String = value.into();
        if s.is_empty() {
            return Err("Ticker cannot be empty");
        }
        if s.len() > MAX_TICKER_LEN {
            return Err("Ticker too long (max 32 bytes)");
        }
        if !s.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err("Ticker must be alphanumeric");
        }
        Ok(Ticker(s.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Ticker {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ticker::new(value)
    }
}

impl TryFrom<String> for Ticker {
    type Error = &'static str;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ticker::new(value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> String {
        ticker.0
    }
}
