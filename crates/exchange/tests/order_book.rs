//! Order book and matching integration tests
//!
//! Tests limit order acceptance, book ordering and market order matching
//! through the async exchange handle.

use hexdex_exchange::{
    AccountId, Exchange, ExchangeError, ExchangeEvent, Side,
};

fn trader() -> AccountId {
    AccountId::new("trader0")
}

fn seller(n: usize) -> AccountId {
    AccountId::new(format!("seller{n}"))
}

async fn create_exchange() -> Exchange {
    let _ = env_logger::try_init();
    let exchange = Exchange::new("ETH", trader()).unwrap();
    exchange
        .register_asset(&trader(), "LINK", "0xlink")
        .await
        .unwrap();
    exchange
}

/// Three sellers with 50 LINK each, and a buyer with `eth`
async fn create_market(eth: u128) -> Exchange {
    let exchange = create_exchange().await;
    for n in 1..=3 {
        exchange.deposit(&seller(n), "LINK", 50).await.unwrap();
    }
    if eth > 0 {
        exchange.deposit(&trader(), "ETH", eth).await.unwrap();
    }
    exchange
}

// ============================================================================
// Limit orders
// ============================================================================

#[tokio::test]
async fn test_buy_order_needs_base_notional() {
    let exchange = create_exchange().await;

    let err = exchange
        .create_limit_order(&trader(), "LINK", 10, 4, Side::Buy)
        .await
        .unwrap_err();
    assert!(matches!(err, ExchangeError::InsufficientFunds { required: 40, available: 0, .. }));
    assert!(exchange.order_book("LINK", Side::Buy).await.unwrap().is_empty());

    // Scenario: 1000 base covers 10 @ 4
    exchange.deposit(&trader(), "ETH", 1_000).await.unwrap();
    let id = exchange
        .create_limit_order(&trader(), "LINK", 10, 4, Side::Buy)
        .await
        .unwrap();

    let book = exchange.order_book("LINK", Side::Buy).await.unwrap();
    assert_eq!(book.len(), 1);
    assert_eq!(book[0].id, id);
    assert_eq!(book[0].amount, 10);
    assert_eq!(book[0].price, 4);
    assert_eq!(book[0].filled, 0);
}

#[tokio::test]
async fn test_sell_order_needs_tokens() {
    let exchange = create_exchange().await;

    let err = exchange
        .create_limit_order(&trader(), "LINK", 100, 20, Side::Sell)
        .await
        .unwrap_err();
    assert!(matches!(err, ExchangeError::InsufficientFunds { required: 100, .. }));

    exchange.deposit(&trader(), "LINK", 1_000).await.unwrap();
    exchange
        .create_limit_order(&trader(), "LINK", 10, 2, Side::Sell)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_limit_order_on_unlisted_asset() {
    let exchange = create_exchange().await;
    exchange.deposit(&trader(), "ETH", 1_000).await.unwrap();

    assert_eq!(
        exchange
            .create_limit_order(&trader(), "DAI", 1, 1, Side::Buy)
            .await,
        Err(ExchangeError::UnknownAsset("DAI".to_string()))
    );
}

#[tokio::test]
async fn test_buy_book_highest_price_first() {
    let exchange = create_exchange().await;
    exchange.deposit(&trader(), "ETH", 1_000).await.unwrap();

    for price in [30, 10, 20] {
        exchange
            .create_limit_order(&trader(), "LINK", 1, price, Side::Buy)
            .await
            .unwrap();
    }

    let book = exchange.order_book("LINK", Side::Buy).await.unwrap();
    let prices: Vec<u64> = book.iter().map(|o| o.price).collect();
    assert_eq!(prices, vec![30, 20, 10]);
    assert_eq!(exchange.best_price("LINK", Side::Buy).await.unwrap(), Some(30));
}

#[tokio::test]
async fn test_sell_book_lowest_price_first() {
    let exchange = create_exchange().await;
    exchange.deposit(&trader(), "LINK", 100).await.unwrap();

    for price in [30, 10, 20, 2] {
        exchange
            .create_limit_order(&trader(), "LINK", 1, price, Side::Sell)
            .await
            .unwrap();
    }

    let book = exchange.order_book("LINK", Side::Sell).await.unwrap();
    for pair in book.windows(2) {
        assert!(pair[0].price <= pair[1].price);
    }
    assert_eq!(book[0].price, 2);
}

#[tokio::test]
async fn test_equal_prices_fill_in_arrival_order() {
    let exchange = create_market(10_000).await;
    let first = exchange
        .create_limit_order(&seller(2), "LINK", 1, 300, Side::Sell)
        .await
        .unwrap();
    let second = exchange
        .create_limit_order(&seller(1), "LINK", 1, 300, Side::Sell)
        .await
        .unwrap();

    let report = exchange
        .create_market_order(&trader(), "LINK", 1, Side::Buy)
        .await
        .unwrap();

    assert_eq!(report.fills[0].maker_order_id, first);
    let book = exchange.order_book("LINK", Side::Sell).await.unwrap();
    assert_eq!(book[0].id, second);
}

#[tokio::test]
async fn test_order_ids_are_global() {
    let exchange = create_market(10_000).await;

    let a = exchange
        .create_limit_order(&seller(1), "LINK", 1, 300, Side::Sell)
        .await
        .unwrap();
    let b = exchange
        .create_limit_order(&trader(), "LINK", 1, 10, Side::Buy)
        .await
        .unwrap();
    let c = exchange
        .create_limit_order(&trader(), "ETH", 1, 10, Side::Sell)
        .await
        .unwrap();

    assert_eq!((a, b, c), (1, 2, 3));
    assert_eq!(exchange.order(b).await.unwrap().side, Side::Buy);
}

// ============================================================================
// Market orders
// ============================================================================

#[tokio::test]
async fn test_market_order_on_empty_book_fills_nothing() {
    let exchange = create_market(1_000).await;

    let report = exchange
        .create_market_order(&trader(), "LINK", 2, Side::Buy)
        .await
        .unwrap();

    assert_eq!(report.filled, 0);
    assert!(report.fills.is_empty());
    assert!(exchange.order_book("LINK", Side::Buy).await.unwrap().is_empty());
    assert!(exchange.order_book("LINK", Side::Sell).await.unwrap().is_empty());
    assert_eq!(exchange.balance_of(&trader(), "ETH").await.unwrap(), 1_000);
}

#[tokio::test]
async fn test_market_buy_fills_best_prices_first() {
    let exchange = create_market(10_000).await;
    for (n, price) in [(1, 300), (2, 400), (3, 500)] {
        exchange
            .create_limit_order(&seller(n), "LINK", 5, price, Side::Sell)
            .await
            .unwrap();
    }

    let report = exchange
        .create_market_order(&trader(), "LINK", 10, Side::Buy)
        .await
        .unwrap();

    assert!(report.is_fully_filled());
    let book = exchange.order_book("LINK", Side::Sell).await.unwrap();
    assert_eq!(book.len(), 1);
    assert_eq!(book[0].price, 500);
    assert_eq!(book[0].filled, 0);

    assert_eq!(exchange.balance_of(&trader(), "LINK").await.unwrap(), 10);
    assert_eq!(exchange.balance_of(&trader(), "ETH").await.unwrap(), 10_000 - 3_500);
    assert_eq!(exchange.balance_of(&seller(1), "ETH").await.unwrap(), 1_500);
    assert_eq!(exchange.balance_of(&seller(2), "ETH").await.unwrap(), 2_000);
    assert_eq!(exchange.balance_of(&seller(1), "LINK").await.unwrap(), 45);
    assert_eq!(exchange.balance_of(&seller(3), "LINK").await.unwrap(), 50);
}

#[tokio::test]
async fn test_market_order_larger_than_book() {
    let exchange = create_market(100_000).await;
    for (n, price) in [(1, 400), (2, 500), (3, 500)] {
        exchange
            .create_limit_order(&seller(n), "LINK", 5, price, Side::Sell)
            .await
            .unwrap();
    }

    let report = exchange
        .create_market_order(&trader(), "LINK", 50, Side::Buy)
        .await
        .unwrap();

    assert_eq!(report.filled, 15);
    assert_eq!(report.remaining(), 35);
    assert_eq!(exchange.balance_of(&trader(), "LINK").await.unwrap(), 15);
    assert!(exchange.order_book("LINK", Side::Sell).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_each_seller_is_debited_its_share() {
    let exchange = create_market(10_000).await;
    exchange
        .create_limit_order(&seller(1), "LINK", 1, 300, Side::Sell)
        .await
        .unwrap();
    exchange
        .create_limit_order(&seller(2), "LINK", 1, 300, Side::Sell)
        .await
        .unwrap();

    exchange
        .create_market_order(&trader(), "LINK", 2, Side::Buy)
        .await
        .unwrap();

    assert_eq!(exchange.balance_of(&seller(1), "LINK").await.unwrap(), 49);
    assert_eq!(exchange.balance_of(&seller(2), "LINK").await.unwrap(), 49);
    assert_eq!(exchange.balance_of(&trader(), "ETH").await.unwrap(), 9_400);
}

#[tokio::test]
async fn test_partially_filled_order_stays_open() {
    let exchange = create_market(10_000).await;
    exchange
        .create_limit_order(&seller(1), "LINK", 5, 300, Side::Sell)
        .await
        .unwrap();

    exchange
        .create_market_order(&trader(), "LINK", 2, Side::Buy)
        .await
        .unwrap();

    let book = exchange.order_book("LINK", Side::Sell).await.unwrap();
    assert_eq!(book.len(), 1);
    assert_eq!(book[0].filled, 2);
    assert_eq!(book[0].amount, 5);
}

#[tokio::test]
async fn test_market_sell_against_bids() {
    let exchange = create_market(10_000).await;
    for price in [10, 30, 20] {
        exchange
            .create_limit_order(&trader(), "LINK", 2, price, Side::Buy)
            .await
            .unwrap();
    }

    let report = exchange
        .create_market_order(&seller(1), "LINK", 3, Side::Sell)
        .await
        .unwrap();

    let prices: Vec<u64> = report.fills.iter().map(|t| t.price).collect();
    assert_eq!(prices, vec![30, 20]);
    assert_eq!(exchange.balance_of(&seller(1), "ETH").await.unwrap(), 80);
    assert_eq!(exchange.balance_of(&trader(), "LINK").await.unwrap(), 3);

    let bids = exchange.order_book("LINK", Side::Buy).await.unwrap();
    assert_eq!(bids.len(), 2);
    assert_eq!((bids[0].price, bids[0].filled), (20, 1));
}

#[tokio::test]
async fn test_market_buy_without_base_fails_fast() {
    let exchange = create_market(0).await;
    exchange
        .create_limit_order(&seller(1), "LINK", 5, 300, Side::Sell)
        .await
        .unwrap();

    let err = exchange
        .create_market_order(&trader(), "LINK", 2, Side::Buy)
        .await
        .unwrap_err();

    assert!(matches!(err, ExchangeError::InsufficientFunds { required: 600, .. }));
    assert_eq!(exchange.order_book("LINK", Side::Sell).await.unwrap()[0].filled, 0);
    assert_eq!(exchange.balance_of(&seller(1), "LINK").await.unwrap(), 50);
}

#[tokio::test]
async fn test_market_sell_without_tokens_fails_fast() {
    let exchange = create_market(10_000).await;
    exchange
        .create_limit_order(&trader(), "LINK", 5, 10, Side::Buy)
        .await
        .unwrap();

    let err = exchange
        .create_market_order(&AccountId::new("nobody"), "LINK", 20, Side::Sell)
        .await
        .unwrap_err();

    assert!(matches!(err, ExchangeError::InsufficientFunds { .. }));
}

#[tokio::test]
async fn test_market_order_events() {
    let exchange = create_market(10_000).await;
    let filled = exchange
        .create_limit_order(&seller(1), "LINK", 1, 300, Side::Sell)
        .await
        .unwrap();
    exchange
        .create_limit_order(&seller(2), "LINK", 5, 400, Side::Sell)
        .await
        .unwrap();
    let mut rx = exchange.subscribe();

    exchange
        .create_market_order(&trader(), "LINK", 3, Side::Buy)
        .await
        .unwrap();

    let events: Vec<ExchangeEvent> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
    assert_eq!(events.len(), 3);
    assert!(matches!(&events[0], ExchangeEvent::TradeExecuted(t) if t.maker_order_id == filled));
    assert!(matches!(
        &events[1],
        ExchangeEvent::OrderFilled { order_id, side: Side::Sell, .. } if *order_id == filled
    ));
    assert!(matches!(&events[2], ExchangeEvent::TradeExecuted(t) if t.quantity == 2));
}

#[tokio::test]
async fn test_failed_commands_publish_nothing() {
    let exchange = create_market(0).await;
    let mut rx = exchange.subscribe();

    exchange
        .create_limit_order(&trader(), "LINK", 1, 1, Side::Buy)
        .await
        .unwrap_err();
    exchange
        .register_asset(&seller(1), "DAI", "0xdai")
        .await
        .unwrap_err();

    assert!(rx.try_recv().is_err());
}
