use hexdex_core::{Order, OrderId, OrderStatus, Quantity, Side, Ticker};

use crate::error::BookResult;

/// Port for resting limit orders, one book per (ticker, side)
///
/// Books are kept in match priority at all times:
/// - BUY: highest price first
/// - SELL: lowest price first
/// - equal prices: lower order id first
pub trait OrderBookStore: Send {
    /// Place an order into its (ticker, side) book
    fn insert(&mut self, order: Order) -> BookResult<()>;

    /// Best-priced resting order of a book
    fn peek_front(&self, ticker: &Ticker, side: Side) -> Option<&Order>;

    /// Remove and return the best-priced resting order of a book
    fn remove_front(&mut self, ticker: &Ticker, side: Side) -> Option<Order>;

    /// Remove a specific order from whichever book holds it
    fn remove(&mut self, order_id: OrderId) -> Option<Order>;

    /// Increase an order's filled quantity, returning its new status
    ///
    /// The order stays in its book; callers remove it once filled.
    fn apply_fill(&mut self, order_id: OrderId, quantity: Quantity) -> BookResult<OrderStatus>;

    /// Look up a resting order by id
    fn order(&self, order_id: OrderId) -> Option<&Order>;

    /// Resting orders of a book in priority order
    fn iter(&self, ticker: &Ticker, side: Side) -> impl Iterator<Item = &Order>;

    /// Materialized copy of a book in priority order
    fn snapshot(&self, ticker: &Ticker, side: Side) -> Vec<Order> {
        self.iter(ticker, side).cloned().collect()
    }

    fn len(&self, ticker: &Ticker, side: Side) -> usize {
        self.iter(ticker, side).count()
    }

    fn is_empty(&self, ticker: &Ticker, side: Side) -> bool {
        self.peek_front(ticker, side).is_none()
    }
}
