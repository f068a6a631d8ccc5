use hexdex_core::{Balance, OrderId, Price, Quantity, Side, Ticker, Trade};
use hexdex_matching::SettlementHalt;
use serde::{Deserialize, Serialize};

/// Result of a market order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOrderReport {
    pub ticker: Ticker,
    pub side: Side,
    pub requested: Quantity,
    pub filled: Quantity,
    /// Settled legs, best price first
    pub fills: Vec<Trade>,
    /// Resting orders fully filled and removed by this order
    pub completed_orders: Vec<OrderId>,
    /// Why matching stopped early, when legs were kept after a failed one
    pub halted: Option<SettlementHalt>,
}

impl MarketOrderReport {
    pub fn is_fully_filled(&self) -> bool {
        self.filled == self.requested
    }

    pub fn remaining(&self) -> Quantity {
        self.requested - self.filled
    }

    /// Total base asset exchanged
    pub fn notional(&self) -> Balance {
        self.fills.iter().map(Trade::notional).sum()
    }

    /// Volume-weighted price as an exact `(numerator, denominator)` fraction
    /// in lowest terms; `None` when nothing filled
    pub fn average_price(&self) -> Option<(Balance, Balance)> {
        if self.filled == 0 {
            return None;
        }
        let num = self.notional();
        let den = Balance::from(self.filled);
        let divisor = gcd(num, den);
        Some((num / divisor, den / divisor))
    }

    /// Price of the last leg
    pub fn last_price(&self) -> Option<Price> {
        self.fills.last().map(|t| t.price)
    }
}

fn gcd(mut a: Balance, mut b: Balance) -> Balance {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
