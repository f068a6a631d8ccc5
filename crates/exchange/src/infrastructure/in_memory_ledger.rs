use hexdex_core::{AccountId, AssetKey, Balance};
use hexdex_ports::{BalanceLedger, LedgerError, LedgerResult};
use std::collections::{BTreeMap, HashMap};

/// In-memory balance ledger
///
/// Balances per account, per asset. Unknown pairs read as zero.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    balances: HashMap<AccountId, HashMap<AssetKey, Balance>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All non-zero balances of an account, sorted by asset
    pub fn holdings(&self, account: &AccountId) -> BTreeMap<AssetKey, Balance> {
        self.balances
            .get(account)
            .map(|assets| {
                assets
                    .iter()
                    .filter(|(_, balance)| **balance > 0)
                    .map(|(asset, balance)| (asset.clone(), *balance))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Accounts that have ever held a balance, sorted
    pub fn accounts(&self) -> Vec<AccountId> {
        let mut accounts: Vec<AccountId> = self.balances.keys().cloned().collect();
        accounts.sort();
        accounts
    }

    /// Sum of every account's balance of one asset
    pub fn total_supply(&self, asset: &AssetKey) -> Balance {
        self.balances
            .values()
            .filter_map(|assets| assets.get(asset))
            .sum()
    }
}

impl BalanceLedger for InMemoryLedger {
    fn available(&self, account: &AccountId, asset: &AssetKey) -> Balance {
        self.balances
            .get(account)
            .and_then(|assets| assets.get(asset))
            .copied()
            .unwrap_or(0)
    }

    fn credit(
        &mut self,
        account: &AccountId,
        asset: &AssetKey,
        amount: Balance,
    ) -> LedgerResult<Balance> {
        let balance = self
            .balances
            .entry(account.clone())
            .or_default()
            .entry(asset.clone())
            .or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Overflow {
                account: account.clone(),
                asset: asset.clone(),
                amount,
            })?;
        Ok(*balance)
    }

    fn debit(
        &mut self,
        account: &AccountId,
        asset: &AssetKey,
        amount: Balance,
    ) -> LedgerResult<Balance> {
        let available = self.available(account, asset);
        if available < amount {
            return Err(LedgerError::InsufficientFunds {
                account: account.clone(),
                asset: asset.clone(),
                required: amount,
                available,
            });
        }
        if amount == 0 {
            return Ok(available);
        }

        let balance = self
            .balances
            .entry(account.clone())
            .or_default()
            .entry(asset.clone())
            .or_insert(0);
        *balance -= amount;
        Ok(*balance)
    }
}
