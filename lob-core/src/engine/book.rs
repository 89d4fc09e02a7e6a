//! Price-sorted level sequences and the `Book` that owns all four of them.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::HashMap;

use super::error::BookInvariant;
use super::level::PriceLevel;
use super::types::{Order, OrderId, Price, Quantity, RestLocation, Side};

/// A sort key for one of the book's four price-sorted sequences. `Ord`
/// encodes the sequence's direction, so a plain `BTreeMap<K, _>` iterates
/// best-first regardless of which of the four sequences it backs.
pub trait LevelKey: Ord + Copy {
    fn new(price: Price) -> Self;
    fn price(&self) -> Price;
}

/// Ascending by price: live-sell and stop-buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Asc(Price);

impl LevelKey for Asc {
    fn new(price: Price) -> Self {
        Asc(price)
    }
    fn price(&self) -> Price {
        self.0
    }
}

/// Descending by price: live-buy and stop-sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Desc(Price);

impl PartialOrd for Desc {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Desc {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.cmp(&self.0)
    }
}

impl LevelKey for Desc {
    fn new(price: Price) -> Self {
        Desc(price)
    }
    fn price(&self) -> Price {
        self.0
    }
}

/// A read-only snapshot of one level, returned by the inspection API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelView {
    pub price: Price,
    pub size: usize,
    pub total_volume: Quantity,
}

/// One of the book's four price-sorted sequences of levels.
#[derive(Debug)]
pub struct LevelSequence<K: LevelKey> {
    levels: BTreeMap<K, PriceLevel>,
}

impl<K: LevelKey> LevelSequence<K> {
    fn new() -> Self {
        LevelSequence {
            levels: BTreeMap::new(),
        }
    }

    /// Binary-search-by-price-equivalent lookup that creates a fresh level
    /// at the right sorted position if none exists yet.
    pub fn lookup_or_create(&mut self, price: Price) -> &mut PriceLevel {
        self.levels
            .entry(K::new(price))
            .or_insert_with(|| PriceLevel::new(price))
    }

    pub fn lookup(&self, price: Price) -> Option<&PriceLevel> {
        self.levels.get(&K::new(price))
    }

    pub fn lookup_mut(&mut self, price: Price) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&K::new(price))
    }

    /// "Lookup, never create" — used by internal callers that assume the
    /// level exists because an order's recorded location names it. Panics
    /// via `BookInvariant::LevelNotFound` on miss, per §7's
    /// invariant-violation taxonomy: on valid command sequences this is
    /// unreachable.
    pub fn lookup_mut_strict(&mut self, price: Price) -> &mut PriceLevel {
        match self.levels.get_mut(&K::new(price)) {
            Some(level) => level,
            None => panic!("{}", BookInvariant::LevelNotFound { price }),
        }
    }

    /// Erases a level if (and only if) its queue is empty; a no-op
    /// otherwise. This is the routine call after a fill or cancel drains a
    /// level's last order.
    pub fn remove_if_empty(&mut self, price: Price) {
        if self.lookup(price).is_some_and(PriceLevel::is_empty) {
            self.erase_empty(price);
        }
    }

    /// Erases a level that the caller has already established is empty.
    /// Panics via `BookInvariant::NonEmptyLevelErase` if it turns out not to
    /// be — size/totalVolume bookkeeping has drifted from the FIFO contents.
    fn erase_empty(&mut self, price: Price) {
        let size = self.lookup(price).map(PriceLevel::size).unwrap_or(0);
        if size != 0 {
            panic!("{}", BookInvariant::NonEmptyLevelErase { price, size });
        }
        self.levels.remove(&K::new(price));
    }

    pub fn best(&self) -> Option<&PriceLevel> {
        self.levels.values().next()
    }

    pub fn best_price_opt(&self) -> Option<Price> {
        self.best().map(PriceLevel::price)
    }

    /// `getBestBidPrice`/`getBestAskPrice` style accessor: 0 if empty.
    pub fn best_price(&self) -> Price {
        self.best_price_opt().unwrap_or(0)
    }

    pub fn views(&self) -> Vec<LevelView> {
        self.levels
            .values()
            .map(|level| LevelView {
                price: level.price(),
                size: level.size(),
                total_volume: level.total_volume(),
            })
            .collect()
    }
}

/// Owns the four price-sorted sequences, the id→Order index, and the
/// public command surface / matching routine / stop-trigger cascade.
#[derive(Debug)]
pub struct Book {
    pub(crate) buy_levels: LevelSequence<Desc>,
    pub(crate) sell_levels: LevelSequence<Asc>,
    pub(crate) stop_buy_levels: LevelSequence<Asc>,
    pub(crate) stop_sell_levels: LevelSequence<Desc>,
    pub(crate) orders: HashMap<OrderId, Order>,
    pub(crate) executed_count: u64,
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}

impl Book {
    pub fn new() -> Self {
        Book {
            buy_levels: LevelSequence::new(),
            sell_levels: LevelSequence::new(),
            stop_buy_levels: LevelSequence::new(),
            stop_sell_levels: LevelSequence::new(),
            orders: HashMap::new(),
            executed_count: 0,
        }
    }

    // ---- inspection API (§6) ----

    pub fn best_bid_price(&self) -> Price {
        self.buy_levels.best_price()
    }

    pub fn best_ask_price(&self) -> Price {
        self.sell_levels.best_price()
    }

    pub fn buy_limits(&self) -> Vec<LevelView> {
        self.buy_levels.views()
    }

    pub fn sell_limits(&self) -> Vec<LevelView> {
        self.sell_levels.views()
    }

    pub fn stop_buy_limits(&self) -> Vec<LevelView> {
        self.stop_buy_levels.views()
    }

    pub fn stop_sell_limits(&self) -> Vec<LevelView> {
        self.stop_sell_levels.views()
    }

    pub fn search_order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    /// FIFO order ids resting at a given live price, head first. A
    /// read-only inspection accessor for exercising the FIFO/time-priority
    /// invariants; empty if the level does not exist.
    pub fn live_order_ids(&self, side: Side, price: Price) -> Vec<OrderId> {
        match side {
            Side::Buy => self
                .buy_levels
                .lookup(price)
                .map(|level| level.iter().collect())
                .unwrap_or_default(),
            Side::Sell => self
                .sell_levels
                .lookup(price)
                .map(|level| level.iter().collect())
                .unwrap_or_default(),
        }
    }

    /// Fills produced by the most recently completed public command.
    pub fn executed_count(&self) -> u64 {
        self.executed_count
    }

    pub(crate) fn reset_executed_count(&mut self) {
        self.executed_count = 0;
    }

    // ---- internal rest / detach helpers shared by the command surface ----

    pub(crate) fn rest_live(&mut self, side: Side, id: OrderId, shares: Quantity, limit: Price) {
        match side {
            Side::Buy => self.buy_levels.lookup_or_create(limit).push_back(id, shares),
            Side::Sell => self.sell_levels.lookup_or_create(limit).push_back(id, shares),
        }
        let location = match side {
            Side::Buy => RestLocation::LiveBuy(limit),
            Side::Sell => RestLocation::LiveSell(limit),
        };
        self.orders.insert(
            id,
            Order {
                id,
                side,
                shares,
                price: limit,
                location,
            },
        );
    }

    pub(crate) fn rest_stop(
        &mut self,
        side: Side,
        id: OrderId,
        shares: Quantity,
        stop: Price,
        post_trigger_price: Price,
    ) {
        match side {
            Side::Buy => self.stop_buy_levels.lookup_or_create(stop).push_back(id, shares),
            Side::Sell => self.stop_sell_levels.lookup_or_create(stop).push_back(id, shares),
        }
        let location = match side {
            Side::Buy => RestLocation::StopBuy(stop),
            Side::Sell => RestLocation::StopSell(stop),
        };
        self.orders.insert(
            id,
            Order {
                id,
                side,
                shares,
                price: post_trigger_price,
                location,
            },
        );
    }

    /// Detaches an order from whichever sequence it currently rests in,
    /// erasing it from the id-index, and removes its level if that was the
    /// last order there. Returns `None` (a silent no-op) if `id` is not
    /// currently resting — this is the shared core of every cancel and the
    /// detach half of every modify. The order's recorded location names its
    /// level, so that lookup is strict: a miss is a `BookInvariant`, not a
    /// recoverable case.
    pub(crate) fn detach(&mut self, id: OrderId) -> Option<Order> {
        let order = self.orders.remove(&id)?;
        match order.location {
            RestLocation::LiveBuy(price) => {
                self.buy_levels.lookup_mut_strict(price).remove(id, order.shares);
                self.buy_levels.remove_if_empty(price);
            }
            RestLocation::LiveSell(price) => {
                self.sell_levels.lookup_mut_strict(price).remove(id, order.shares);
                self.sell_levels.remove_if_empty(price);
            }
            RestLocation::StopBuy(price) => {
                self.stop_buy_levels.lookup_mut_strict(price).remove(id, order.shares);
                self.stop_buy_levels.remove_if_empty(price);
            }
            RestLocation::StopSell(price) => {
                self.stop_sell_levels.lookup_mut_strict(price).remove(id, order.shares);
                self.stop_sell_levels.remove_if_empty(price);
            }
        }
        Some(order)
    }

    // ---- public command surface (§4.1) ----

    pub fn market_order(&mut self, _id: OrderId, side: Side, shares: Quantity) {
        self.reset_executed_count();
        match side {
            Side::Buy => {
                self.cross_buy(shares, None);
            }
            Side::Sell => {
                self.cross_sell(shares, None);
            }
        }
        self.trigger_stop_orders();
    }

    pub fn add_limit_order(&mut self, id: OrderId, side: Side, shares: Quantity, limit: Price) {
        self.reset_executed_count();
        let remaining = match side {
            Side::Buy => self.cross_buy(shares, Some(limit)),
            Side::Sell => self.cross_sell(shares, Some(limit)),
        };
        let filled = remaining < shares;
        if remaining > 0 {
            self.rest_live(side, id, remaining, limit);
        }
        if filled {
            self.trigger_stop_orders();
        }
    }

    pub fn cancel_limit_order(&mut self, id: OrderId) {
        self.reset_executed_count();
        self.detach(id);
    }

    pub fn modify_limit_order(&mut self, id: OrderId, new_shares: Quantity, new_limit: Price) {
        self.reset_executed_count();
        let Some(mut order) = self.detach(id) else {
            return;
        };
        order.shares = new_shares;
        order.price = new_limit;
        self.rest_live(order.side, order.id, order.shares, new_limit);
        self.trigger_stop_orders();
    }

    pub fn add_stop_order(&mut self, id: OrderId, side: Side, shares: Quantity, stop: Price) {
        self.reset_executed_count();
        if self.stop_triggers_immediately(side, stop) {
            // Converts via the low-level market-execution core, not the
            // public `market_order` entry point — see §4.7. No cascade
            // runs on this path.
            self.execute_triggered_stop(side, id, shares, 0);
        } else {
            self.rest_stop(side, id, shares, stop, 0);
        }
    }

    pub fn add_stop_limit_order(
        &mut self,
        id: OrderId,
        side: Side,
        shares: Quantity,
        limit: Price,
        stop: Price,
    ) {
        self.reset_executed_count();
        if self.stop_triggers_immediately(side, stop) {
            // Converts via the public `add_limit_order` rule: cascade runs
            // iff this fills anything — see §4.7.
            let filled = self.execute_triggered_stop(side, id, shares, limit);
            if filled {
                self.trigger_stop_orders();
            }
        } else {
            self.rest_stop(side, id, shares, stop, limit);
        }
    }

    pub fn cancel_stop_order(&mut self, id: OrderId) {
        self.cancel_limit_order(id);
    }

    pub fn cancel_stop_limit_order(&mut self, id: OrderId) {
        self.cancel_limit_order(id);
    }

    pub fn modify_stop_order(&mut self, id: OrderId, new_shares: Quantity, new_stop: Price) {
        self.reset_executed_count();
        let Some(mut order) = self.detach(id) else {
            return;
        };
        order.shares = new_shares;
        self.rest_stop(order.side, order.id, order.shares, new_stop, order.price);
    }

    pub fn modify_stop_limit_order(
        &mut self,
        id: OrderId,
        new_shares: Quantity,
        new_limit: Price,
        new_stop: Price,
    ) {
        self.reset_executed_count();
        let Some(mut order) = self.detach(id) else {
            return;
        };
        order.shares = new_shares;
        order.price = new_limit;
        self.rest_stop(order.side, order.id, order.shares, new_stop, new_limit);
    }
}
