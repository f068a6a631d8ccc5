//! HexDex Matching
//!
//! Market order execution against the resting limit orders of an
//! [`OrderBookStore`], settled through a [`BalanceLedger`].
//!
//! Execution happens in two phases:
//! 1. **Plan**: walk the opposite book in priority order and stage every
//!    leg's four balance mutations against a [`StagedLedger`] view. Each
//!    debit is checked against the balance as it will be after all
//!    previously staged legs.
//! 2. **Commit**: apply the net balance changes and the book fills.
//!
//! Nothing is written before planning succeeds, so a rejected call leaves
//! balances and books untouched.

mod error;
mod execution;
mod funds;
mod staged;

#[cfg(test)]
mod testing;

pub use error::{MatchingError, MatchingResult, SettlementHalt};
pub use execution::{ExecutedFill, MarketOrder, MatchOutcome, SettlementPolicy, execute_market_order};
pub use funds::{FundsRequirement, limit_order_requirement};
pub use staged::{BalanceChange, StagedLedger, apply_changes};

// Re-export the ports for convenience
pub use hexdex_ports::{BalanceLedger, OrderBookStore};
