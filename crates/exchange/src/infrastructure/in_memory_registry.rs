use hexdex_core::{AccountId, AssetRef, Ticker};
use hexdex_ports::{AssetRegistry, RegistryError, RegistryResult};
use std::collections::BTreeMap;

/// In-memory asset registry owned by a single admin account
#[derive(Debug, Clone)]
pub struct InMemoryAssetRegistry {
    owner: AccountId,
    assets: BTreeMap<Ticker, AssetRef>,
}

impl InMemoryAssetRegistry {
    pub fn new(owner: AccountId) -> Self {
        Self {
            owner,
            assets: BTreeMap::new(),
        }
    }
}

impl AssetRegistry for InMemoryAssetRegistry {
    fn owner(&self) -> &AccountId {
        &self.owner
    }

    fn register(
        &mut self,
        caller: &AccountId,
        ticker: Ticker,
        reference: AssetRef,
    ) -> RegistryResult<()> {
        if *caller != self.owner {
            return Err(RegistryError::Unauthorized {
                caller: caller.clone(),
            });
        }
        if self.assets.contains_key(&ticker) {
            return Err(RegistryError::AlreadyRegistered(ticker));
        }
        self.assets.insert(ticker, reference);
        Ok(())
    }

    fn resolve(&self, ticker: &Ticker) -> RegistryResult<AssetRef> {
        self.assets
            .get(ticker)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownAsset(ticker.clone()))
    }

    fn is_registered(&self, ticker: &Ticker) -> bool {
        self.assets.contains_key(ticker)
    }

    fn tickers(&self) -> Vec<Ticker> {
        self.assets.keys().cloned().collect()
    }
}
