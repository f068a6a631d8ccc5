//! Minimal port implementations for unit tests

use hexdex_core::{AccountId, AssetKey, Balance, Order, OrderId, OrderStatus, Quantity, Side, Ticker};
use hexdex_ports::{BalanceLedger, BookError, BookResult, LedgerError, LedgerResult, OrderBookStore};
use std::collections::BTreeMap;

#[derive(Default)]
pub struct MapLedger {
    balances: BTreeMap<(AccountId, AssetKey), Balance>,
}

impl MapLedger {
    pub fn set(&mut self, account: &AccountId, asset: &AssetKey, amount: Balance) {
        self.balances
            .insert((account.clone(), asset.clone()), amount);
    }
}

impl BalanceLedger for MapLedger {
    fn available(&self, account: &AccountId, asset: &AssetKey) -> Balance {
        self.balances
            .get(&(account.clone(), asset.clone()))
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
            .entry((account.clone(), asset.clone()))
            .or_insert(0);
        *balance += amount;
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
        self.set(account, asset, available - amount);
        Ok(available - amount)
    }
}

/// Single vector of orders, re-sorted on every insert
#[derive(Default)]
pub struct VecBook {
    orders: Vec<Order>,
}

impl OrderBookStore for VecBook {
    fn insert(&mut self, order: Order) -> BookResult<()> {
        if self.orders.iter().any(|o| o.id == order.id) {
            return Err(BookError::DuplicateOrder(order.id));
        }
        self.orders.push(order);
        self.orders.sort_by(|a, b| {
            (a.ticker.clone(), a.side as u8)
                .cmp(&(b.ticker.clone(), b.side as u8))
                .then(a.priority_cmp(b))
        });
        Ok(())
    }

    fn peek_front(&self, ticker: &Ticker, side: Side) -> Option<&Order> {
        self.iter(ticker, side).next()
    }

    fn remove_front(&mut self, ticker: &Ticker, side: Side) -> Option<Order> {
        let id = self.peek_front(ticker, side)?.id;
        self.remove(id)
    }

    fn remove(&mut self, order_id: OrderId) -> Option<Order> {
        let pos = self.orders.iter().position(|o| o.id == order_id)?;
        Some(self.orders.remove(pos))
    }

    fn apply_fill(&mut self, order_id: OrderId, quantity: Quantity) -> BookResult<OrderStatus> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or(BookError::UnknownOrder(order_id))?;
        let remaining = order.remaining();
        order.fill(quantity).map_err(|_| BookError::Overfill {
            order_id,
            requested: quantity,
            remaining,
        })
    }

    fn order(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    fn iter(&self, ticker: &Ticker, side: Side) -> impl Iterator<Item = &Order> {
        let ticker = ticker.clone();
        self.orders
            .iter()
            .filter(move |o| o.ticker == ticker && o.side == side)
    }
}
