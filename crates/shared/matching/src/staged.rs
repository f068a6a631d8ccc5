use hexdex_core::{AccountId, AssetKey, Balance};
use hexdex_ports::{BalanceLedger, LedgerError, LedgerResult};
use std::collections::BTreeMap;

/// Net change to apply to one (account, asset) balance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceChange {
    pub account: AccountId,
    pub asset: AssetKey,
    pub credit: Balance,
    pub debit: Balance,
}

#[derive(Debug, Clone, Copy, Default)]
struct Pending {
    credited: Balance,
    debited: Balance,
}

/// Read-only view of a ledger plus not-yet-applied mutations
///
/// Invariant: for every key, `available + credited >= debited`, so the
/// changes produced by [`StagedLedger::into_changes`] can always be applied.
pub struct StagedLedger<'a, L: BalanceLedger> {
    ledger: &'a L,
    pending: BTreeMap<(AccountId, AssetKey), Pending>,
}

impl<'a, L: BalanceLedger> StagedLedger<'a, L> {
    pub fn new(ledger: &'a L) -> Self {
        Self {
            ledger,
            pending: BTreeMap::new(),
        }
    }

    /// Balance as it will be once every staged mutation is applied
    pub fn projected(&self, account: &AccountId, asset: &AssetKey) -> LedgerResult<Balance> {
        let available = self.ledger.available(account, asset);
        let Some(pending) = self.pending.get(&(account.clone(), asset.clone())) else {
            return Ok(available);
        };
        let gross = available
            .checked_add(pending.credited)
            .ok_or_else(|| LedgerError::Overflow {
                account: account.clone(),
                asset: asset.clone(),
                amount: pending.credited,
            })?;
        Ok(gross - pending.debited)
    }

    /// Stage a group of debits and credits as one unit.
    ///
    /// Debits are checked in the given order against the projected balances,
    /// with debits on the same balance summed. On error nothing is staged.
    pub fn stage(
        &mut self,
        debits: &[(&AccountId, &AssetKey, Balance)],
        credits: &[(&AccountId, &AssetKey, Balance)],
    ) -> LedgerResult<()> {
        let debits = aggregate(debits)?;
        let credits = aggregate(credits)?;

        for &(account, asset, required) in &debits {
            let available = self.projected(account, asset)?;
            if available < required {
                return Err(LedgerError::InsufficientFunds {
                    account: account.clone(),
                    asset: asset.clone(),
                    required,
                    available,
                });
            }
        }
        for &(account, asset, amount) in &credits {
            let projected = self.projected(account, asset)?;
            if projected.checked_add(amount).is_none() {
                return Err(overflow(account, asset, amount));
            }
        }

        for (account, asset, amount) in debits {
            let entry = self.entry(account, asset);
            entry.debited = entry
                .debited
                .checked_add(amount)
                .ok_or_else(|| overflow(account, asset, amount))?;
        }
        for (account, asset, amount) in credits {
            let entry = self.entry(account, asset);
            entry.credited = entry
                .credited
                .checked_add(amount)
                .ok_or_else(|| overflow(account, asset, amount))?;
        }
        Ok(())
    }

    /// Net changes in deterministic (account, asset) order
    pub fn into_changes(self) -> Vec<BalanceChange> {
        self.pending
            .into_iter()
            .filter(|(_, p)| p.credited != p.debited)
            .map(|((account, asset), p)| {
                // Only the net movement touches the ledger
                let (credit, debit) = if p.credited > p.debited {
                    (p.credited - p.debited, 0)
                } else {
                    (0, p.debited - p.credited)
                };
                BalanceChange {
                    account,
                    asset,
                    credit,
                    debit,
                }
            })
            .collect()
    }

    fn entry(&mut self, account: &AccountId, asset: &AssetKey) -> &mut Pending {
        self.pending
            .entry((account.clone(), asset.clone()))
            .or_default()
    }
}

/// Apply staged changes to a ledger. Credits go first on each balance.
pub fn apply_changes<L: BalanceLedger>(ledger: &mut L, changes: &[BalanceChange]) -> LedgerResult<()> {
    for change in changes {
        if change.credit > 0 {
            ledger.credit(&change.account, &change.asset, change.credit)?;
        }
        if change.debit > 0 {
            ledger.debit(&change.account, &change.asset, change.debit)?;
        }
    }
    Ok(())
}

/// Sum amounts per balance, keeping first-seen order
fn aggregate<'k>(
    entries: &[(&'k AccountId, &'k AssetKey, Balance)],
) -> LedgerResult<Vec<(&'k AccountId, &'k AssetKey, Balance)>> {
    let mut summed: Vec<(&AccountId, &AssetKey, Balance)> = Vec::with_capacity(entries.len());
    for &(account, asset, amount) in entries {
        match summed
            .iter_mut()
            .find(|(a, k, _)| *a == account && *k == asset)
        {
            Some(slot) => {
                slot.2 = slot
                    .2
                    .checked_add(amount)
                    .ok_or_else(|| overflow(account, asset, amount))?;
            }
            None => summed.push((account, asset, amount)),
        }
    }
    Ok(summed)
}

fn overflow(account: &AccountId, asset: &AssetKey, amount: Balance) -> LedgerError {
    LedgerError::Overflow {
        account: account.clone(),
        asset: asset.clone(),
        amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MapLedger;

    fn alice() -> AccountId {
        AccountId::new("alice")
    }

    #[test]
    fn test_projected_includes_staged() {
        let mut ledger = MapLedger::default();
        ledger.set(&alice(), &AssetKey::Base, 100);

        let mut staged = StagedLedger::new(&ledger);
        staged
            .stage(&[(&alice(), &AssetKey::Base, 30)], &[])
            .unwrap();

        assert_eq!(staged.projected(&alice(), &AssetKey::Base).unwrap(), 70);
        assert_eq!(ledger.available(&alice(), &AssetKey::Base), 100);
    }

    #[test]
    fn test_failed_group_stages_nothing() {
        let bob = AccountId::new("bob");
        let mut ledger = MapLedger::default();
        ledger.set(&alice(), &AssetKey::Base, 100);

        let mut staged = StagedLedger::new(&ledger);
        let err = staged
            .stage(
                &[(&alice(), &AssetKey::Base, 50), (&bob, &AssetKey::Base, 1)],
                &[(&alice(), &AssetKey::Base, 5)],
            )
            .unwrap_err();

        assert!(matches!(err, LedgerError::InsufficientFunds { ref account, .. } if *account == bob));
        assert_eq!(staged.projected(&alice(), &AssetKey::Base).unwrap(), 100);
        assert!(staged.into_changes().is_empty());
    }

    #[test]
    fn test_debits_on_same_balance_are_summed() {
        let mut ledger = MapLedger::default();
        ledger.set(&alice(), &AssetKey::Base, 100);

        let mut staged = StagedLedger::new(&ledger);
        let result = staged.stage(
            &[(&alice(), &AssetKey::Base, 60), (&alice(), &AssetKey::Base, 60)],
            &[],
        );

        assert!(matches!(
            result,
            Err(LedgerError::InsufficientFunds { required: 120, available: 100, .. })
        ));
    }

    #[test]
    fn test_changes_are_netted_and_applicable() {
        let mut ledger = MapLedger::default();
        ledger.set(&alice(), &AssetKey::Base, 10);

        let changes = {
            let mut staged = StagedLedger::new(&ledger);
            staged
                .stage(&[(&alice(), &AssetKey::Base, 10)], &[(&alice(), &AssetKey::Base, 4)])
                .unwrap();
            staged
                .stage(&[(&alice(), &AssetKey::Base, 4)], &[])
                .unwrap();
            staged.into_changes()
        };

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].debit, 10);
        assert_eq!(changes[0].credit, 0);

        apply_changes(&mut ledger, &changes).unwrap();
        assert_eq!(ledger.available(&alice(), &AssetKey::Base), 0);
    }
}
