use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{OrderId, Side};
use crate::assets::Ticker;
use crate::values::{AccountId, Balance, Price, Quantity, Timestamp, notional};

/// Unique identifier for a trade
pub type TradeId = Uuid;

/// One settled leg between a market order and a resting limit order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub ticker: Ticker,
    /// The resting order that supplied liquidity
    pub maker_order_id: OrderId,
    pub buyer: AccountId,
    pub seller: AccountId,
    /// Side of the market order that triggered the trade
    pub taker_side: Side,
    /// Always the resting order's price
    pub price: Price,
    pub quantity: Quantity,
    pub timestamp: Timestamp,
}

impl Trade {
    #[allow(clippy::too_many_arguments)]
    pub fn new_with_time(
        ticker: Ticker,
        maker_order_id: OrderId,
        buyer: AccountId,
        seller: AccountId,
        taker_side: Side,
        price: Price,
        quantity: Quantity,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            ticker,
            maker_order_id,
            buyer,
            seller,
            taker_side,
            price,
            quantity,
            timestamp,
        }
    }

    /// Returns the base-asset value of the trade (price * quantity)
    pub fn notional(&self) -> Balance {
        notional(self.quantity, self.price)
    }
}
