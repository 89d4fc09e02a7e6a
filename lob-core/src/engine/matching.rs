//! The crossing routine and the stop-trigger cascade.

use std::collections::HashMap;

use super::book::{Book, LevelKey, LevelSequence};
use super::types::{OrderId, Price, Quantity, Side};

/// Walks `levels` from the front while `shares > 0` and `price_ok` holds
/// for the front level's price, filling head-of-queue orders FIFO and
/// retiring exhausted orders and emptied levels. Returns the unfilled
/// residual. Shared by every caller that crosses against one side —
/// `price_ok` is `|_| true` for a market order (limit = ±∞) and a simple
/// comparison for a price-gated limit cross.
fn cross_against<K: LevelKey>(
    levels: &mut LevelSequence<K>,
    orders: &mut HashMap<OrderId, super::types::Order>,
    mut shares: Quantity,
    price_ok: impl Fn(Price) -> bool,
    executed_count: &mut u64,
) -> Quantity {
    while shares > 0 {
        let Some(price) = levels.best_price_opt() else {
            break;
        };
        if !price_ok(price) {
            break;
        }
        let level = levels.lookup_mut_strict(price);
        let Some(head_id) = level.front() else {
            // An empty level should already have been erased; defend anyway.
            levels.remove_if_empty(price);
            continue;
        };
        let head_shares = orders
            .get(&head_id)
            .expect("id-index consistency: every queued id has an entry")
            .shares;
        let fill = shares.min(head_shares);
        shares -= fill;
        level.reduce_volume(fill);
        *executed_count += 1;
        if fill == head_shares {
            level.pop_front();
            orders.remove(&head_id);
        } else {
            orders.get_mut(&head_id).unwrap().shares = head_shares - fill;
        }
        if level.is_empty() {
            levels.remove_if_empty(price);
        }
    }
    shares
}

impl Book {
    /// `crossLimitOrder`/`executeMarketOrder` for an incoming buy: walks the
    /// live-sell sequence ascending. `limit = None` is a market order
    /// (gate never trips); `Some(limit)` stops once `level.price > limit`.
    pub(crate) fn cross_buy(&mut self, shares: Quantity, limit: Option<Price>) -> Quantity {
        cross_against(
            &mut self.sell_levels,
            &mut self.orders,
            shares,
            move |price| limit.is_none_or(|lim| price <= lim),
            &mut self.executed_count,
        )
    }

    /// Symmetric: an incoming sell walks the live-buy sequence descending,
    /// stopping once `level.price < limit`.
    pub(crate) fn cross_sell(&mut self, shares: Quantity, limit: Option<Price>) -> Quantity {
        cross_against(
            &mut self.buy_levels,
            &mut self.orders,
            shares,
            move |price| limit.is_none_or(|lim| price >= lim),
            &mut self.executed_count,
        )
    }

    /// §4.5: does the market already satisfy this stop's trigger condition
    /// the instant it arrives?
    pub(crate) fn stop_triggers_immediately(&self, side: Side, stop: Price) -> bool {
        match side {
            Side::Buy => self
                .sell_levels
                .best_price_opt()
                .is_some_and(|ask| stop <= ask),
            Side::Sell => self
                .buy_levels
                .best_price_opt()
                .is_some_and(|bid| stop >= bid),
        }
    }

    /// Converts a triggered stop (on arrival, or released by the cascade)
    /// into either a market fill (`price_field == 0`, the stop-market
    /// sentinel) or a price-gated cross with any residual resting live
    /// (`price_field` is the post-trigger limit). Returns whether the
    /// conversion filled anything, which `add_stop_limit_order` needs to
    /// decide whether it must itself run the cascade (§4.7).
    pub(crate) fn execute_triggered_stop(
        &mut self,
        side: Side,
        id: OrderId,
        shares: Quantity,
        price_field: Price,
    ) -> bool {
        if price_field == 0 {
            let remaining = match side {
                Side::Buy => self.cross_buy(shares, None),
                Side::Sell => self.cross_sell(shares, None),
            };
            remaining < shares
        } else {
            let remaining = match side {
                Side::Buy => self.cross_buy(shares, Some(price_field)),
                Side::Sell => self.cross_sell(shares, Some(price_field)),
            };
            let filled = remaining < shares;
            if remaining > 0 {
                self.rest_live(side, id, remaining, price_field);
            }
            filled
        }
    }

    /// `triggerStopOrders`: reads best bid/ask once at entry and never
    /// re-reads them for the rest of this call, even though releasing a
    /// stop can itself fill orders and move the live book (§4.4, snapshot-
    /// once). Buy stops release while the front stop-buy level's price is
    /// at or below the snapshotted ask; sell stops release while the front
    /// stop-sell level's price is at or above the snapshotted bid.
    pub(crate) fn trigger_stop_orders(&mut self) {
        let best_ask = self.sell_levels.best_price_opt();
        let best_bid = self.buy_levels.best_price_opt();
        if let Some(ask) = best_ask {
            loop {
                let Some(level_price) = self.stop_buy_levels.best_price_opt() else {
                    break;
                };
                if level_price > ask {
                    break;
                }
                let Some(head_id) = self
                    .stop_buy_levels
                    .lookup_mut(level_price)
                    .and_then(|level| level.front())
                else {
                    break;
                };
                let order = self
                    .detach(head_id)
                    .expect("stop level's front id must be in the order index");
                self.execute_triggered_stop(Side::Buy, order.id, order.shares, order.price);
            }
        }

        if let Some(bid) = best_bid {
            loop {
                let Some(level_price) = self.stop_sell_levels.best_price_opt() else {
                    break;
                };
                if level_price < bid {
                    break;
                }
                let Some(head_id) = self
                    .stop_sell_levels
                    .lookup_mut(level_price)
                    .and_then(|level| level.front())
                else {
                    break;
                };
                let order = self
                    .detach(head_id)
                    .expect("stop level's front id must be in the order index");
                self.execute_triggered_stop(Side::Sell, order.id, order.shares, order.price);
            }
        }
    }
}
