//! Core data types: identifiers, sides, the resting-location tag, and `Order` itself.

use std::fmt;

/// Caller-assigned order identifier. Unique across currently-resting orders;
/// reuse after a cancel or full fill is permitted.
pub type OrderId = u64;

/// Integer tick. `0` is reserved as the "market" sentinel in the `price`
/// field of a resting stop-market order and must not be used as a live
/// limit price.
pub type Price = u64;

/// Non-negative remaining quantity.
pub type Quantity = u64;

/// Which side of the book an order stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// Which of the book's four sequences an order currently rests in, and at
/// what key. This stands in for the original's `parent` pointer: instead of
/// a raw back-reference, an order carries enough information to find its
/// own level through `Book`'s sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestLocation {
    LiveBuy(Price),
    LiveSell(Price),
    StopBuy(Price),
    StopSell(Price),
}

/// Coarse lifecycle state, derived from `RestLocation` rather than stored
/// independently — an order's structural position already tells you whether
/// it is resting live or resting as a stop. Terminal states (`Filled`,
/// `Cancelled`) are never observed on a stored `Order`: per the id-index
/// invariant, an order that reaches one is erased from the index instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderState {
    RestingLive,
    RestingStop,
}

/// An individual resting order.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    /// Remaining quantity. Strictly positive while resting.
    pub shares: Quantity,
    /// Limit price while resting live. `0` while resting as a stop-market
    /// order (sentinel). The post-trigger limit while resting as a
    /// stop-limit order.
    pub price: Price,
    pub(crate) location: RestLocation,
}

impl Order {
    pub fn state(&self) -> OrderState {
        match self.location {
            RestLocation::LiveBuy(_) | RestLocation::LiveSell(_) => OrderState::RestingLive,
            RestLocation::StopBuy(_) | RestLocation::StopSell(_) => OrderState::RestingStop,
        }
    }

    pub fn location(&self) -> RestLocation {
        self.location
    }
}
