use serde::{Deserialize, Serialize};

/// Lifecycle status of a resting limit order
///
/// There is no canceled state: orders only leave the book once filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Resting, nothing matched yet
    Open,
    /// Resting with `0 < filled < amount`
    PartiallyFilled,
    /// `filled == amount`; the order is removed from its book
    Filled,
}

impl OrderStatus {
    /// Returns true while the order still belongs in a book
    pub fn is_active(&self) -> bool {
        matches!(self, OrderStatus::Open | OrderStatus::PartiallyFilled)
    }
}
