use hexdex_core::{
    AccountId, AssetKey, AssetRef, Balance, Order, OrderId, OrderStatus, Price, Quantity, Side,
    Ticker, Timestamp, Trade,
};
use hexdex_matching::{
    MarketOrder, SettlementPolicy, execute_market_order, limit_order_requirement,
};
use hexdex_ports::{AssetRegistry, BalanceLedger, Clock, OrderBookStore};
use log::{debug, info, warn};
use std::sync::Arc;

use super::report::MarketOrderReport;
use crate::error::{ExchangeError, Result};

/// Single-writer exchange state machine
///
/// Owns the balances, the asset listing and the order books. Every command
/// takes `&mut self` and either completes or fails without leaving partial
/// state behind; serializing access is the caller's job.
pub struct MatchingEngine<L, R, B>
where
    L: BalanceLedger,
    R: AssetRegistry,
    B: OrderBookStore,
{
    base_ticker: Ticker,
    ledger: L,
    registry: R,
    books: B,
    clock: Arc<dyn Clock>,
    policy: SettlementPolicy,
    next_order_id: OrderId,
}

impl<L, R, B> MatchingEngine<L, R, B>
where
    L: BalanceLedger,
    R: AssetRegistry,
    B: OrderBookStore,
{
    pub fn new(base_ticker: Ticker, ledger: L, registry: R, books: B, clock: Arc<dyn Clock>) -> Self {
        Self {
            base_ticker,
            ledger,
            registry,
            books,
            clock,
            policy: SettlementPolicy::default(),
            next_order_id: 1,
        }
    }

    pub fn with_policy(mut self, policy: SettlementPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn base_ticker(&self) -> &Ticker {
        &self.base_ticker
    }

    pub fn policy(&self) -> SettlementPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: SettlementPolicy) {
        self.policy = policy;
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn books(&self) -> &B {
        &self.books
    }

    /// Id the next accepted limit order will get
    pub fn next_order_id(&self) -> OrderId {
        self.next_order_id
    }

    /// Base ticker followed by every listed ticker
    pub fn tickers(&self) -> Vec<Ticker> {
        let mut tickers = vec![self.base_ticker.clone()];
        tickers.extend(self.registry.tickers());
        tickers
    }

    /// Map a ticker string to its balance key
    ///
    /// The base ticker is always known; anything else must be listed.
    pub fn resolve_asset(&self, symbol: &str) -> Result<(Ticker, AssetKey)> {
        let ticker =
            Ticker::new(symbol).map_err(|_| ExchangeError::UnknownAsset(symbol.to_string()))?;
        if ticker == self.base_ticker {
            return Ok((ticker, AssetKey::Base));
        }
        self.registry.resolve(&ticker)?;
        let key = AssetKey::from(ticker.clone());
        Ok((ticker, key))
    }

    /// List a new asset. Owner only, write-once.
    pub fn register_asset(
        &mut self,
        caller: &AccountId,
        symbol: &str,
        reference: &str,
    ) -> Result<(Ticker, AssetRef)> {
        let ticker = Ticker::new(symbol).map_err(|e| ExchangeError::InvalidTicker {
            ticker: symbol.to_string(),
            reason: e.to_string(),
        })?;
        let reference =
            AssetRef::new(reference).map_err(|e| ExchangeError::InvalidReference(e.to_string()))?;

        if ticker == self.base_ticker {
            if caller != self.registry.owner() {
                return Err(ExchangeError::Unauthorized {
                    caller: caller.clone(),
                });
            }
            return Err(ExchangeError::AlreadyRegistered(ticker));
        }

        self.registry
            .register(caller, ticker.clone(), reference.clone())
            .inspect_err(|e| warn!("Asset registration of {} refused: {}", ticker, e))?;

        info!("Registered asset {} -> {}", ticker, reference);
        Ok((ticker, reference))
    }

    /// Credit an account, returning the new balance
    pub fn deposit(
        &mut self,
        account: &AccountId,
        symbol: &str,
        amount: Balance,
    ) -> Result<(AssetKey, Balance)> {
        if amount == 0 {
            return Err(ExchangeError::InvalidAmount(
                "deposit must be positive".to_string(),
            ));
        }
        let (_, asset) = self.resolve_asset(symbol)?;
        let balance = self.ledger.credit(account, &asset, amount)?;

        info!("Deposit: {} +{} {} (balance {})", account, amount, asset, balance);
        Ok((asset, balance))
    }

    /// Debit an account, returning the new balance
    pub fn withdraw(
        &mut self,
        account: &AccountId,
        symbol: &str,
        amount: Balance,
    ) -> Result<(AssetKey, Balance)> {
        if amount == 0 {
            return Err(ExchangeError::InvalidAmount(
                "withdrawal must be positive".to_string(),
            ));
        }
        let (_, asset) = self.resolve_asset(symbol)?;
        let balance = self
            .ledger
            .debit(account, &asset, amount)
            .inspect_err(|e| warn!("Withdrawal refused: {}", e))?;

        info!("Withdrawal: {} -{} {} (balance {})", account, amount, asset, balance);
        Ok((asset, balance))
    }

    pub fn balance_of(&self, account: &AccountId, symbol: &str) -> Result<Balance> {
        let (_, asset) = self.resolve_asset(symbol)?;
        Ok(self.ledger.available(account, &asset))
    }

    /// Validate and rest a limit order. No matching happens here, even
    /// when the order crosses the opposite book.
    ///
    /// Funds are checked against the current balance but not reserved.
    pub fn create_limit_order(
        &mut self,
        trader: &AccountId,
        symbol: &str,
        amount: Quantity,
        price: Price,
        side: Side,
    ) -> Result<Order> {
        let (ticker, asset) = self.resolve_asset(symbol)?;
        if amount == 0 || price == 0 {
            return Err(ExchangeError::InvalidOrder(
                "amount and price must be positive".to_string(),
            ));
        }

        let requirement = limit_order_requirement(side, &asset, amount, price);
        let available = self.ledger.available(trader, &requirement.asset);
        if available < requirement.amount {
            warn!(
                "Limit order rejected: {} holds {} {}, {} required",
                trader, available, requirement.asset, requirement.amount
            );
            return Err(ExchangeError::InsufficientFunds {
                account: trader.clone(),
                asset: requirement.asset,
                required: requirement.amount,
                available,
            });
        }

        let order = Order::new_limit(
            self.next_order_id,
            trader.clone(),
            ticker,
            side,
            amount,
            price,
            self.clock.now(),
        );
        self.books.insert(order.clone())?;
        self.next_order_id += 1;

        info!(
            "Limit order {} accepted: {} {} {} @ {} for {}",
            order.id, side, amount, order.ticker, price, trader
        );
        Ok(order)
    }

    /// Fill a market order against the opposite book, best price first
    ///
    /// Stops when the order is filled or the book runs out; an empty book
    /// is a successful zero fill.
    pub fn create_market_order(
        &mut self,
        trader: &AccountId,
        symbol: &str,
        amount: Quantity,
        side: Side,
    ) -> Result<MarketOrderReport> {
        let (ticker, asset) = self.resolve_asset(symbol)?;
        let order = MarketOrder {
            trader: trader.clone(),
            ticker: ticker.clone(),
            asset,
            side,
            amount,
        };

        let outcome = execute_market_order(&mut self.ledger, &mut self.books, &order, self.policy)
            .inspect_err(|e| warn!("Market order by {} rejected: {}", trader, e))?;

        let timestamp = self.clock.now();
        let mut completed_orders = Vec::new();
        let fills: Vec<Trade> = outcome
            .fills
            .into_iter()
            .map(|fill| {
                debug!(
                    "Fill: {} {} @ {} against order {} ({} -> {})",
                    fill.quantity, ticker, fill.price, fill.maker_order_id, fill.seller, fill.buyer
                );
                if fill.maker_status == OrderStatus::Filled {
                    completed_orders.push(fill.maker_order_id);
                }
                Trade::new_with_time(
                    ticker.clone(),
                    fill.maker_order_id,
                    fill.buyer,
                    fill.seller,
                    side,
                    fill.price,
                    fill.quantity,
                    timestamp,
                )
            })
            .collect();

        if let Some(halt) = &outcome.halt {
            warn!("Market order halted after {} filled: {}", outcome.filled, halt);
        }
        info!(
            "Market order: {} {} {} for {}, filled {}",
            side, amount, ticker, trader, outcome.filled
        );

        Ok(MarketOrderReport {
            ticker,
            side,
            requested: amount,
            filled: outcome.filled,
            fills,
            completed_orders,
            halted: outcome.halt,
        })
    }

    /// Resting orders of one book in match priority
    pub fn order_book(&self, symbol: &str, side: Side) -> Result<Vec<Order>> {
        let (ticker, _) = self.resolve_asset(symbol)?;
        Ok(self.books.snapshot(&ticker, side))
    }

    /// Price of the first order in a book
    pub fn best_price(&self, symbol: &str, side: Side) -> Result<Option<Price>> {
        let (ticker, _) = self.resolve_asset(symbol)?;
        Ok(self.books.peek_front(&ticker, side).map(|o| o.price))
    }

    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        self.books.order(order_id)
    }
}
