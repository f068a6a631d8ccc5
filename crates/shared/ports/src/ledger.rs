use hexdex_core::{AccountId, AssetKey, Balance};

use crate::error::LedgerResult;

/// Port for per-account asset balances
///
/// Balances are never negative: `debit` refuses to go below zero and leaves
/// the balance untouched when it fails.
pub trait BalanceLedger: Send {
    /// Available balance; unknown (account, asset) pairs read as zero
    fn available(&self, account: &AccountId, asset: &AssetKey) -> Balance;

    /// Increase a balance, returning the new value
    fn credit(
        &mut self,
        account: &AccountId,
        asset: &AssetKey,
        amount: Balance,
    ) -> LedgerResult<Balance>;

    /// Decrease a balance, returning the new value
    ///
    /// Fails with `InsufficientFunds` when the balance is below `amount`.
    fn debit(
        &mut self,
        account: &AccountId,
        asset: &AssetKey,
        amount: Balance,
    ) -> LedgerResult<Balance>;
}
