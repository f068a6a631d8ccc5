use hexdex_core::{AccountId, Balance, Order, OrderId, Price, Quantity, Side, Ticker};
use hexdex_matching::SettlementPolicy;
use hexdex_ports::{AssetRegistry, Clock, OrderBookStore};
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};

use super::engine::MatchingEngine;
use super::events::ExchangeEvent;
use super::report::MarketOrderReport;
use crate::error::{ExchangeError, Result};
use crate::infrastructure::{
    BroadcastEventPublisher, ExchangeConfig, InMemoryAssetRegistry, InMemoryLedger,
    InMemoryOrderBookStore, SystemClock,
};

pub type InMemoryEngine =
    MatchingEngine<InMemoryLedger, InMemoryAssetRegistry, InMemoryOrderBookStore>;

/// Cloneable handle to a running exchange
///
/// All commands go through one lock around the engine, so each runs to
/// completion before the next starts. Events are published inside the
/// same critical section and therefore arrive in command order.
#[derive(Clone)]
pub struct Exchange {
    engine: Arc<Mutex<InMemoryEngine>>,
    events: BroadcastEventPublisher,
}

/// One order book as printed by the binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSnapshot {
    pub ticker: Ticker,
    pub side: Side,
    pub orders: Vec<Order>,
}

/// Full read-only view of the exchange state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeSnapshot {
    pub base_asset: Ticker,
    pub assets: Vec<Ticker>,
    pub books: Vec<BookSnapshot>,
    /// account -> asset -> balance, zero balances omitted
    pub balances: BTreeMap<AccountId, BTreeMap<String, Balance>>,
}

impl Exchange {
    /// Empty exchange on the system clock
    pub fn new(base_asset: &str, owner: AccountId) -> Result<Self> {
        let base = Ticker::new(base_asset).map_err(|e| ExchangeError::InvalidTicker {
            ticker: base_asset.to_string(),
            reason: e.to_string(),
        })?;
        let engine = MatchingEngine::new(
            base,
            InMemoryLedger::new(),
            InMemoryAssetRegistry::new(owner),
            InMemoryOrderBookStore::new(),
            Arc::new(SystemClock::new()),
        );
        Ok(Self::with_engine(engine, BroadcastEventPublisher::default()))
    }

    pub fn with_engine(engine: InMemoryEngine, events: BroadcastEventPublisher) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            events,
        }
    }

    /// Build an exchange from configuration on the system clock
    pub fn from_config(config: &ExchangeConfig) -> Result<Self> {
        Self::from_config_with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Build an exchange from configuration: list assets, fund accounts,
    /// then place seed orders through the regular command path.
    ///
    /// Bootstrapping happens before anyone can subscribe, so it emits no
    /// events.
    pub fn from_config_with_clock(config: &ExchangeConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        let owner = config.owner_id();
        let mut engine = MatchingEngine::new(
            config.base_ticker()?,
            InMemoryLedger::new(),
            InMemoryAssetRegistry::new(owner.clone()),
            InMemoryOrderBookStore::new(),
            clock,
        )
        .with_policy(config.settlement_policy);

        for asset in &config.assets {
            engine.register_asset(&owner, &asset.ticker, &asset.reference)?;
        }
        for account in &config.accounts {
            let id = AccountId::new(account.id.as_str());
            for deposit in &account.deposits {
                engine.deposit(&id, &deposit.asset, deposit.amount)?;
            }
        }
        for seed in &config.seed_orders {
            engine.create_limit_order(
                &AccountId::new(seed.trader.as_str()),
                &seed.ticker,
                seed.amount,
                seed.price,
                seed.side,
            )?;
        }

        info!(
            "Exchange bootstrapped: base {}, {} assets, {} accounts, {} seed orders",
            engine.base_ticker(),
            config.assets.len(),
            config.accounts.len(),
            config.seed_orders.len()
        );
        Ok(Self::with_engine(
            engine,
            BroadcastEventPublisher::new(config.event_capacity),
        ))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ExchangeEvent> {
        self.events.subscribe()
    }

    pub fn events(&self) -> &BroadcastEventPublisher {
        &self.events
    }

    pub async fn register_asset(
        &self,
        caller: &AccountId,
        symbol: &str,
        reference: &str,
    ) -> Result<Ticker> {
        let mut engine = self.engine.lock().await;
        let (ticker, reference) = engine.register_asset(caller, symbol, reference)?;
        self.events.publish(ExchangeEvent::AssetRegistered {
            ticker: ticker.clone(),
            reference,
            timestamp: engine.now(),
        });
        Ok(ticker)
    }

    pub async fn deposit(&self, account: &AccountId, symbol: &str, amount: Balance) -> Result<Balance> {
        let mut engine = self.engine.lock().await;
        let (asset, balance) = engine.deposit(account, symbol, amount)?;
        self.events.publish(ExchangeEvent::Deposited {
            account: account.clone(),
            asset,
            amount,
            balance,
            timestamp: engine.now(),
        });
        Ok(balance)
    }

    pub async fn withdraw(&self, account: &AccountId, symbol: &str, amount: Balance) -> Result<Balance> {
        let mut engine = self.engine.lock().await;
        let (asset, balance) = engine.withdraw(account, symbol, amount)?;
        self.events.publish(ExchangeEvent::Withdrawn {
            account: account.clone(),
            asset,
            amount,
            balance,
            timestamp: engine.now(),
        });
        Ok(balance)
    }

    pub async fn balance_of(&self, account: &AccountId, symbol: &str) -> Result<Balance> {
        self.engine.lock().await.balance_of(account, symbol)
    }

    pub async fn create_limit_order(
        &self,
        trader: &AccountId,
        symbol: &str,
        amount: Quantity,
        price: Price,
        side: Side,
    ) -> Result<OrderId> {
        let mut engine = self.engine.lock().await;
        let order = engine.create_limit_order(trader, symbol, amount, price, side)?;
        let id = order.id;
        self.events.publish(ExchangeEvent::OrderAccepted(order));
        Ok(id)
    }

    pub async fn create_market_order(
        &self,
        trader: &AccountId,
        symbol: &str,
        amount: Quantity,
        side: Side,
    ) -> Result<MarketOrderReport> {
        let mut engine = self.engine.lock().await;
        let report = engine.create_market_order(trader, symbol, amount, side)?;

        for trade in &report.fills {
            self.events.publish(ExchangeEvent::TradeExecuted(trade.clone()));
            if report.completed_orders.contains(&trade.maker_order_id) {
                self.events.publish(ExchangeEvent::OrderFilled {
                    order_id: trade.maker_order_id,
                    ticker: trade.ticker.clone(),
                    side: side.opposite(),
                    timestamp: trade.timestamp,
                });
            }
        }
        Ok(report)
    }

    pub async fn order_book(&self, symbol: &str, side: Side) -> Result<Vec<Order>> {
        self.engine.lock().await.order_book(symbol, side)
    }

    pub async fn best_price(&self, symbol: &str, side: Side) -> Result<Option<Price>> {
        self.engine.lock().await.best_price(symbol, side)
    }

    pub async fn order(&self, order_id: OrderId) -> Option<Order> {
        self.engine.lock().await.order(order_id).cloned()
    }

    pub async fn policy(&self) -> SettlementPolicy {
        self.engine.lock().await.policy()
    }

    pub async fn set_policy(&self, policy: SettlementPolicy) {
        self.engine.lock().await.set_policy(policy);
    }

    /// Base ticker followed by every listed ticker
    pub async fn tickers(&self) -> Vec<Ticker> {
        self.engine.lock().await.tickers()
    }

    pub async fn snapshot(&self) -> ExchangeSnapshot {
        let engine = self.engine.lock().await;

        let mut books = Vec::new();
        for ticker in engine.tickers() {
            for side in [Side::Buy, Side::Sell] {
                books.push(BookSnapshot {
                    ticker: ticker.clone(),
                    side,
                    orders: engine.books().snapshot(&ticker, side),
                });
            }
        }

        let base = engine.base_ticker();
        let ledger = engine.ledger();
        let balances = ledger
            .accounts()
            .into_iter()
            .map(|account| {
                let holdings = ledger
                    .holdings(&account)
                    .into_iter()
                    .map(|(asset, balance)| {
                        let name = asset.ticker().unwrap_or(base).to_string();
                        (name, balance)
                    })
                    .collect::<BTreeMap<_, _>>();
                (account, holdings)
            })
            .filter(|(_, holdings)| !holdings.is_empty())
            .collect();

        ExchangeSnapshot {
            base_asset: base.clone(),
            assets: engine.registry().tickers(),
            books,
            balances,
        }
    }
}
