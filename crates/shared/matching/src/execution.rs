use hexdex_core::{
    AccountId, AssetKey, Balance, OrderId, OrderStatus, Price, Quantity, Side, Ticker, notional,
};
use hexdex_ports::{BalanceLedger, LedgerError, OrderBookStore};
use serde::{Deserialize, Serialize};

use crate::error::{MatchingError, MatchingResult, SettlementHalt};
use crate::staged::{StagedLedger, apply_changes};

/// What to do when a trade leg cannot be settled part-way through a
/// market order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementPolicy {
    /// Reject the whole market order; no leg is kept
    #[default]
    AbortCall,
    /// Keep the legs settled before the failing one and stop matching there
    KeepFilledLegs,
}

/// Transient market order. Never stored, only matched.
#[derive(Debug, Clone)]
pub struct MarketOrder {
    pub trader: AccountId,
    pub ticker: Ticker,
    /// Ledger key the ticker resolves to
    pub asset: AssetKey,
    pub side: Side,
    pub amount: Quantity,
}

/// One settled leg
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedFill {
    pub maker_order_id: OrderId,
    pub buyer: AccountId,
    pub seller: AccountId,
    /// Resting order's price
    pub price: Price,
    pub quantity: Quantity,
    /// Status of the resting order after this fill
    pub maker_status: OrderStatus,
}

impl ExecutedFill {
    pub fn notional(&self) -> Balance {
        notional(self.quantity, self.price)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchOutcome {
    /// Total quantity matched
    pub filled: Quantity,
    /// Legs in execution order (best price first)
    pub fills: Vec<ExecutedFill>,
    /// Set when matching stopped on an unsettleable leg
    /// under [`SettlementPolicy::KeepFilledLegs`]
    pub halt: Option<SettlementHalt>,
}

/// Match a market order against the opposite book.
///
/// Walks resting orders best price first, settling each leg at the resting
/// order's price, until the order is filled or the book runs out. Fully
/// filled resting orders are removed. An empty book yields a zero fill.
///
/// Errors:
/// - `InsufficientFunds` when the taker cannot pay for the first leg
/// - `SettlementFailure` for any other uncovered debit under
///   [`SettlementPolicy::AbortCall`]
///
/// On error, balances and books are left unchanged.
pub fn execute_market_order<L, B>(
    ledger: &mut L,
    books: &mut B,
    order: &MarketOrder,
    policy: SettlementPolicy,
) -> MatchingResult<MatchOutcome>
where
    L: BalanceLedger,
    B: OrderBookStore,
{
    if order.amount == 0 {
        return Err(MatchingError::ZeroQuantity);
    }

    let (mut outcome, changes) = {
        let mut staged = StagedLedger::new(&*ledger);
        let outcome = plan(&*books, &mut staged, order, policy)?;
        (outcome, staged.into_changes())
    };

    apply_changes(ledger, &changes)?;
    for fill in &mut outcome.fills {
        fill.maker_status = books.apply_fill(fill.maker_order_id, fill.quantity)?;
        if fill.maker_status == OrderStatus::Filled {
            books.remove(fill.maker_order_id);
        }
    }

    Ok(outcome)
}

fn plan<L, B>(
    books: &B,
    staged: &mut StagedLedger<'_, L>,
    order: &MarketOrder,
    policy: SettlementPolicy,
) -> MatchingResult<MatchOutcome>
where
    L: BalanceLedger,
    B: OrderBookStore,
{
    let mut outcome = MatchOutcome::default();

    for resting in books.iter(&order.ticker, order.side.opposite()) {
        let remaining = order.amount - outcome.filled;
        if remaining == 0 {
            break;
        }
        let quantity = remaining.min(resting.remaining());
        if quantity == 0 {
            continue;
        }

        let (buyer, seller) = match order.side {
            Side::Buy => (&order.trader, &resting.trader),
            Side::Sell => (&resting.trader, &order.trader),
        };
        let cost = notional(quantity, resting.price);
        let units = Balance::from(quantity);

        // Taker's debit is checked first so a short taker is reported as such
        let buyer_debit = (buyer, &AssetKey::Base, cost);
        let seller_debit = (seller, &order.asset, units);
        let debits = match order.side {
            Side::Buy => [buyer_debit, seller_debit],
            Side::Sell => [seller_debit, buyer_debit],
        };
        let credits = [(seller, &AssetKey::Base, cost), (buyer, &order.asset, units)];

        match staged.stage(&debits, &credits) {
            Ok(()) => {
                outcome.filled += quantity;
                outcome.fills.push(ExecutedFill {
                    maker_order_id: resting.id,
                    buyer: buyer.clone(),
                    seller: seller.clone(),
                    price: resting.price,
                    quantity,
                    maker_status: if quantity == resting.remaining() {
                        OrderStatus::Filled
                    } else {
                        OrderStatus::PartiallyFilled
                    },
                });
            }
            Err(LedgerError::InsufficientFunds {
                account,
                asset,
                required,
                available,
            }) => {
                if outcome.fills.is_empty() && account == order.trader {
                    return Err(MatchingError::InsufficientFunds {
                        account,
                        asset,
                        required,
                        available,
                    });
                }
                let halt = SettlementHalt {
                    maker_order_id: resting.id,
                    account,
                    asset,
                    required,
                    available,
                };
                match policy {
                    SettlementPolicy::AbortCall => {
                        return Err(MatchingError::SettlementFailure(halt));
                    }
                    SettlementPolicy::KeepFilledLegs => {
                        outcome.halt = Some(halt);
                        break;
                    }
                }
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(outcome)
}
