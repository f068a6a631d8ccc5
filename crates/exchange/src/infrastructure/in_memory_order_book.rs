use hexdex_core::{Order, OrderId, OrderStatus, Price, Quantity, Side, Ticker};
use hexdex_ports::{BookError, BookResult, OrderBookStore};
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Price key for BTreeMap ordering
/// For bids: reversed so the highest price comes first
/// For asks: natural order (ascending)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PriceKey {
    price: Price,
    is_bid: bool,
}

impl PriceKey {
    fn new(side: Side, price: Price) -> Self {
        PriceKey {
            price,
            is_bid: side.is_buy(),
        }
    }
}

impl Ord for PriceKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.is_bid {
            other.price.cmp(&self.price)
        } else {
            self.price.cmp(&other.price)
        }
    }
}

impl PartialOrd for PriceKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Price levels of one (ticker, side) book, each level FIFO by order id
type Levels = BTreeMap<PriceKey, VecDeque<Order>>;

/// In-memory order book store
///
/// One price-level map per (ticker, side) plus an id index, so that
/// front access is O(log L) and lookup by id does not scan every book.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderBookStore {
    books: HashMap<(Ticker, Side), Levels>,
    /// Quick lookup for orders by ID
    order_index: HashMap<OrderId, (Ticker, Side, Price)>,
}

impl InMemoryOrderBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every (ticker, side) pair holding at least one order
    pub fn books(&self) -> Vec<(Ticker, Side)> {
        let mut keys: Vec<(Ticker, Side)> = self.books.keys().cloned().collect();
        keys.sort_by(|a, b| (&a.0, u8::from(a.1)).cmp(&(&b.0, u8::from(b.1))));
        keys
    }

    /// Total number of resting orders across all books
    pub fn order_count(&self) -> usize {
        self.order_index.len()
    }

    fn levels(&self, ticker: &Ticker, side: Side) -> Option<&Levels> {
        self.books.get(&(ticker.clone(), side))
    }

    fn locate_mut(&mut self, order_id: OrderId) -> Option<&mut Order> {
        let (ticker, side, price) = self.order_index.get(&order_id)?;
        self.books
            .get_mut(&(ticker.clone(), *side))?
            .get_mut(&PriceKey::new(*side, *price))?
            .iter_mut()
            .find(|o| o.id == order_id)
    }
}

impl OrderBookStore for InMemoryOrderBookStore {
    fn insert(&mut self, order: Order) -> BookResult<()> {
        if self.order_index.contains_key(&order.id) {
            return Err(BookError::DuplicateOrder(order.id));
        }

        let key = PriceKey::new(order.side, order.price);
        self.order_index
            .insert(order.id, (order.ticker.clone(), order.side, order.price));

        let level = self
            .books
            .entry((order.ticker.clone(), order.side))
            .or_default()
            .entry(key)
            .or_default();
        // Ids are issued in sequence, so this is almost always the back
        let pos = level.partition_point(|o| o.id < order.id);
        level.insert(pos, order);
        Ok(())
    }

    fn peek_front(&self, ticker: &Ticker, side: Side) -> Option<&Order> {
        self.levels(ticker, side)?
            .first_key_value()
            .and_then(|(_, level)| level.front())
    }

    fn remove_front(&mut self, ticker: &Ticker, side: Side) -> Option<Order> {
        let id = self.peek_front(ticker, side)?.id;
        self.remove(id)
    }

    fn remove(&mut self, order_id: OrderId) -> Option<Order> {
        let (ticker, side, price) = self.order_index.remove(&order_id)?;
        let book_key = (ticker, side);
        let key = PriceKey::new(side, price);

        let levels = self.books.get_mut(&book_key)?;
        let level = levels.get_mut(&key)?;
        let pos = level.iter().position(|o| o.id == order_id)?;
        let order = level.remove(pos)?;

        if level.is_empty() {
            levels.remove(&key);
        }
        if levels.is_empty() {
            self.books.remove(&book_key);
        }
        Some(order)
    }

    fn apply_fill(&mut self, order_id: OrderId, quantity: Quantity) -> BookResult<OrderStatus> {
        let order = self
            .locate_mut(order_id)
            .ok_or(BookError::UnknownOrder(order_id))?;
        let remaining = order.remaining();
        order.fill(quantity).map_err(|_| BookError::Overfill {
            order_id,
            requested: quantity,
            remaining,
        })
    }

    fn order(&self, order_id: OrderId) -> Option<&Order> {
        let (ticker, side, price) = self.order_index.get(&order_id)?;
        self.levels(ticker, *side)?
            .get(&PriceKey::new(*side, *price))?
            .iter()
            .find(|o| o.id == order_id)
    }

    fn iter(&self, ticker: &Ticker, side: Side) -> impl Iterator<Item = &Order> {
        self.levels(ticker, side)
            .into_iter()
            .flat_map(|levels| levels.values())
            .flat_map(|level| level.iter())
    }

    fn len(&self, ticker: &Ticker, side: Side) -> usize {
        self.levels(ticker, side)
            .map(|levels| levels.values().map(VecDeque::len).sum())
            .unwrap_or(0)
    }
}
