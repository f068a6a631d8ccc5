use serde::{Deserialize, Serialize};
use std::fmt;

use super::Ticker;

/// Balance key distinguishing the implicit base settlement asset from
/// registered assets.
///
/// The base asset is never listed in the registry, so it gets its own
/// variant instead of sharing the ticker namespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKey {
    Base,
    Registered(Ticker),
}

impl AssetKey {
    pub fn is_base(&self) -> bool {
        matches!(self, AssetKey::Base)
    }

    /// Registered ticker, if any
    pub fn ticker(&self) -> Option<&Ticker> {
        match self {
            AssetKey::Base => None,
            AssetKey::Registered(ticker) => Some(ticker),
        }
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKey::Base => write!(f, "<base>"),
            AssetKey::Registered(ticker) => write!(f, "{}", ticker),
        }
    }
}

impl From<Ticker> for AssetKey {
    fn from(ticker: Ticker) -> Self {
        AssetKey::Registered(ticker)
    }
}

/// Opaque handle to the external asset a ticker stands for
/// (a token contract address, a custody account, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetRef(String);

impl AssetRef {
    pub fn new(value: impl Into<String>) -> Result<Self, &'static str> {
        let s: String = value.into();
        if s.trim().is_empty() {
            return Err("Asset reference cannot be empty");
        }
        Ok(AssetRef(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AssetRef {
    type Error = &'static str;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        AssetRef::new(value)
    }
}

impl From<AssetRef> for String {
    fn from(reference: AssetRef) -> String {
        reference.0
    }
}
