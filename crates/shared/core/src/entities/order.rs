use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{OrderStatus, Side};
use crate::assets::Ticker;
use crate::values::{AccountId, Balance, Price, Quantity, Timestamp, notional};

/// Sequential order identifier, unique across all books
pub type OrderId = u64;

/// Resting limit order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub trader: AccountId,
    pub side: Side,
    pub ticker: Ticker,
    /// Total quantity requested
    pub amount: Quantity,
    /// Unit price in base-asset terms
    pub price: Price,
    /// Cumulative quantity matched so far, `0 <= filled <= amount`
    pub filled: Quantity,
    pub created_at: Timestamp,
}

impl Order {
    pub fn new_limit(
        id: OrderId,
        trader: AccountId,
        ticker: Ticker,
        side: Side,
        amount: Quantity,
        price: Price,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            trader,
            side,
            ticker,
            amount,
            price,
            filled: 0,
            created_at,
        }
    }

    /// Returns remaining quantity to be filled
    pub fn remaining(&self) -> Quantity {
        self.amount - self.filled
    }

    /// Returns true if the order is completely filled
    pub fn is_filled(&self) -> bool {
        self.filled == self.amount
    }

    pub fn status(&self) -> OrderStatus {
        if self.is_filled() {
            OrderStatus::Filled
        } else if self.filled > 0 {
            OrderStatus::PartiallyFilled
        } else {
            OrderStatus::Open
        }
    }

    /// Base-asset value of the full order
    pub fn notional(&self) -> Balance {
        notional(self.amount, self.price)
    }

    /// Record a matched quantity
    pub fn fill(&mut self, quantity: Quantity) -> Result<OrderStatus, &'static str> {
        if quantity > self.remaining() {
            return Err("Fill exceeds remaining quantity");
        }
        self.filled += quantity;
        Ok(self.status())
    }

    /// Book priority: best price first for the order's side, then lower id.
    ///
    /// `Ordering::Less` means `self` is matched before `other`.
    pub fn priority_cmp(&self, other: &Order) -> Ordering {
        let by_price = match self.side {
            Side::Buy => other.price.cmp(&self.price),
            Side::Sell => self.price.cmp(&other.price),
        };
        by_price.then(self.id.cmp(&other.id))
    }
}
