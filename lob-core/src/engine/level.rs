//! A FIFO queue of resting orders at one integer price.

use std::collections::VecDeque;

use super::error::BookInvariant;
use super::types::{OrderId, Price, Quantity};

/// `size` and `totalVolume` are tracked as running aggregates rather than
/// recomputed, so every mutation must keep them in lockstep with the FIFO
/// contents. A reduction that would drive `total_volume` negative is a
/// `BookInvariant::NegativeVolume` — it means the FIFO and the aggregate
/// have already drifted apart, and per §7 that aborts rather than silently
/// clamping to zero.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    price: Price,
    total_volume: Quantity,
    orders: VecDeque<OrderId>,
}

impl PriceLevel {
    pub fn new(price: Price) -> Self {
        PriceLevel {
            price,
            total_volume: 0,
            orders: VecDeque::new(),
        }
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn total_volume(&self) -> Quantity {
        self.total_volume
    }

    pub fn size(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn front(&self) -> Option<OrderId> {
        self.orders.front().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = OrderId> + '_ {
        self.orders.iter().copied()
    }

    /// Appends an order to the tail of the FIFO. Used both for a fresh rest
    /// and for a reprice/modify, which always re-appends at the tail of its
    /// (possibly new) level — losing time priority, per §3.2 item 5.
    pub fn push_back(&mut self, id: OrderId, shares: Quantity) {
        self.orders.push_back(id);
        self.total_volume += shares;
    }

    /// Reduces the aggregate volume by a partial or full fill against the
    /// head order. Does not remove the order from the queue; callers pop it
    /// separately once its shares reach zero.
    pub fn reduce_volume(&mut self, filled: Quantity) {
        self.total_volume = self.checked_reduce(filled);
    }

    pub fn pop_front(&mut self) -> Option<OrderId> {
        self.orders.pop_front()
    }

    /// Detaches a specific order (cancel, or the source side of a reprice).
    /// Returns its shares so the caller can adjust the aggregate.
    pub fn remove(&mut self, id: OrderId, shares: Quantity) -> bool {
        if let Some(pos) = self.orders.iter().position(|&o| o == id) {
            self.orders.remove(pos);
            self.total_volume = self.checked_reduce(shares);
            true
        } else {
            false
        }
    }

    /// Subtracts `amount` from `total_volume`, panicking via
    /// `BookInvariant::NegativeVolume` rather than clamping at zero.
    fn checked_reduce(&self, amount: Quantity) -> Quantity {
        self.total_volume.checked_sub(amount).unwrap_or_else(|| {
            panic!(
                "{}",
                BookInvariant::NegativeVolume {
                    price: self.price,
                    available: self.total_volume,
                    requested: amount,
                }
            )
        })
    }
}
