use chrono::{DateTime, Utc};

mod account;

pub use account::AccountId;

/// Order amount in raw units of the traded asset
pub type Quantity = u64;

/// Unit price expressed in raw units of the base asset
pub type Price = u64;

/// Ledger balance. Wide enough to hold any `Quantity * Price` product.
pub type Balance = u128;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Exact base-asset value of `quantity` units at `price`.
///
/// Computed in `u128`, so the product of two `u64` values never overflows.
pub fn notional(quantity: Quantity, price: Price) -> Balance {
    Balance::from(quantity) * Balance::from(price)
}
