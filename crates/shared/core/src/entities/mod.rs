mod order;
mod order_status;
mod side;
mod trade;

pub use order::{Order, OrderId};
pub use order_status::OrderStatus;
pub use side::Side;
pub use trade::{Trade, TradeId};
