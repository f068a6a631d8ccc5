use hexdex_core::{
    AccountId, AssetKey, AssetRef, Balance, Order, OrderId, Side, Ticker, Timestamp, Trade,
};
use serde::{Deserialize, Serialize};

/// Events published after every successful command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeEvent {
    AssetRegistered {
        ticker: Ticker,
        reference: AssetRef,
        timestamp: Timestamp,
    },
    Deposited {
        account: AccountId,
        asset: AssetKey,
        amount: Balance,
        /// Balance after the deposit
        balance: Balance,
        timestamp: Timestamp,
    },
    Withdrawn {
        account: AccountId,
        asset: AssetKey,
        amount: Balance,
        /// Balance after the withdrawal
        balance: Balance,
        timestamp: Timestamp,
    },
    OrderAccepted(Order),
    TradeExecuted(Trade),
    /// A resting order reached `filled == amount` and left its book
    OrderFilled {
        order_id: OrderId,
        ticker: Ticker,
        side: Side,
        timestamp: Timestamp,
    },
}

impl ExchangeEvent {
    pub fn timestamp(&self) -> Timestamp {
        match self {
            ExchangeEvent::AssetRegistered { timestamp, .. }
            | ExchangeEvent::Deposited { timestamp, .. }
            | ExchangeEvent::Withdrawn { timestamp, .. }
            | ExchangeEvent::OrderFilled { timestamp, .. } => *timestamp,
            ExchangeEvent::OrderAccepted(order) => order.created_at,
            ExchangeEvent::TradeExecuted(trade) => trade.timestamp,
        }
    }

    /// Ticker the event concerns, if it is tied to one book
    pub fn ticker(&self) -> Option<&Ticker> {
        match self {
            ExchangeEvent::AssetRegistered { ticker, .. }
            | ExchangeEvent::OrderFilled { ticker, .. } => Some(ticker),
            ExchangeEvent::OrderAccepted(order) => Some(&order.ticker),
            ExchangeEvent::TradeExecuted(trade) => Some(&trade.ticker),
            ExchangeEvent::Deposited { .. } | ExchangeEvent::Withdrawn { .. } => None,
        }
    }
}
