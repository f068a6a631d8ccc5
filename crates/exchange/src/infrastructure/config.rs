//! Configuration loading for the exchange
//!
//! Supports JSON configuration files for:
//! - The base settlement asset and the registry owner
//! - Listed assets
//! - Accounts with initial deposits
//! - Seed orders for initial liquidity

use hexdex_core::{AccountId, AssetRef, Balance, Price, Quantity, Side, Ticker};
use hexdex_matching::SettlementPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration for the exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Ticker of the implicit settlement asset
    #[serde(default = "default_base_asset")]
    pub base_asset: String,

    /// Account allowed to list assets
    #[serde(default = "default_owner")]
    pub owner: String,

    /// What a market order does when a later leg cannot settle
    #[serde(default)]
    pub settlement_policy: SettlementPolicy,

    /// Event channel capacity
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,

    /// Assets to list, registered by the owner
    #[serde(default)]
    pub assets: Vec<AssetConfig>,

    /// Trader accounts to fund
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,

    /// Initial resting limit orders
    #[serde(default)]
    pub seed_orders: Vec<SeedOrderConfig>,
}

fn default_base_asset() -> String {
    "ETH".to_string()
}

fn default_owner() -> String {
    "admin".to_string()
}

fn default_event_capacity() -> usize {
    1024
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_asset: default_base_asset(),
            owner: default_owner(),
            settlement_policy: SettlementPolicy::default(),
            event_capacity: default_event_capacity(),
            assets: Vec::new(),
            accounts: Vec::new(),
            seed_orders: Vec::new(),
        }
    }
}

impl ExchangeConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn base_ticker(&self) -> Result<Ticker, ConfigError> {
        Ticker::new(self.base_asset.as_str())
            .map_err(|e| ConfigError::InvalidAsset(format!("base asset {:?}: {}", self.base_asset, e)))
    }

    pub fn owner_id(&self) -> AccountId {
        AccountId::new(self.owner.as_str())
    }

    /// Static checks that need no exchange state
    ///
    /// Whether deposits and seed orders reference listed assets, and
    /// whether seed orders are funded, is only known while bootstrapping.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base_ticker()?;
        if self.owner.trim().is_empty() {
            return Err(ConfigError::InvalidAccount("owner cannot be empty".to_string()));
        }

        for asset in &self.assets {
            let ticker = asset.ticker()?;
            if ticker == base {
                return Err(ConfigError::InvalidAsset(format!(
                    "{} is the base asset and cannot be listed",
                    ticker
                )));
            }
            asset.reference()?;
        }

        for account in &self.accounts {
            if account.id.trim().is_empty() {
                return Err(ConfigError::InvalidAccount("account id cannot be empty".to_string()));
            }
        }

        for order in &self.seed_orders {
            if order.amount == 0 || order.price == 0 {
                return Err(ConfigError::InvalidOrder(format!(
                    "seed order on {} needs a positive amount and price",
                    order.ticker
                )));
            }
        }

        Ok(())
    }
}

/// Asset listing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    pub ticker: String,
    /// External handle, e.g. a token contract address
    pub reference: String,
}

impl AssetConfig {
    pub fn ticker(&self) -> Result<Ticker, ConfigError> {
        Ticker::new(self.ticker.as_str())
            .map_err(|e| ConfigError::InvalidAsset(format!("{:?}: {}", self.ticker, e)))
    }

    pub fn reference(&self) -> Result<AssetRef, ConfigError> {
        AssetRef::new(self.reference.as_str())
            .map_err(|e| ConfigError::InvalidAsset(format!("{}: {}", self.ticker, e)))
    }
}

/// Trader account configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfig {
    pub id: String,
    /// Initial deposits
    #[serde(default)]
    pub deposits: Vec<DepositConfig>,
}

/// Deposit configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositConfig {
    /// Ticker of the deposited asset (base or listed)
    pub asset: String,
    pub amount: Balance,
}

/// Seed order configuration for initial liquidity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedOrderConfig {
    pub ticker: String,
    /// Owner of the order
    pub trader: String,
    pub side: Side,
    pub amount: Quantity,
    pub price: Price,
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io { path: String, error: String },
    Parse(String),
    InvalidAsset(String),
    InvalidAccount(String),
    InvalidOrder(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, error } => {
                write!(f, "Failed to read config file '{}': {}", path, error)
            }
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::InvalidAsset(e) => write!(f, "Invalid asset config: {}", e),
            ConfigError::InvalidAccount(e) => write!(f, "Invalid account config: {}", e),
            ConfigError::InvalidOrder(e) => write!(f, "Invalid seed order: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
