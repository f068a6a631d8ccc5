use hexdex_core::{AccountId, AssetRef, Ticker};

use crate::error::RegistryResult;

/// Port for the admin-gated asset listing
///
/// Tickers are write-once: there is no removal or re-registration.
pub trait AssetRegistry: Send {
    /// The only account allowed to register assets
    fn owner(&self) -> &AccountId;

    /// List a new asset
    fn register(
        &mut self,
        caller: &AccountId,
        ticker: Ticker,
        reference: AssetRef,
    ) -> RegistryResult<()>;

    /// Look up the external reference of a listed asset
    fn resolve(&self, ticker: &Ticker) -> RegistryResult<AssetRef>;

    fn is_registered(&self, ticker: &Ticker) -> bool {
        self.resolve(ticker).is_ok()
    }

    /// All listed tickers, sorted
    fn tickers(&self) -> Vec<Ticker>;
}
