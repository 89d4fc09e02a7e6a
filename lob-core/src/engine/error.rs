//! Invariant-violation conditions. These are programmer errors, not
//! recoverable runtime errors: on valid command sequences they are
//! unreachable, and the crate panics rather than silently corrupting the
//! book. Unknown-id cancel/modify is handled separately as a silent no-op
//! (see `engine::book`), not through this type.

use std::fmt;

#[derive(Debug)]
pub enum BookInvariant {
    /// A strict-mode level lookup missed a price that a caller assumed to
    /// exist.
    LevelNotFound { price: super::types::Price },
    /// An attempt to erase a level whose queue was not empty.
    NonEmptyLevelErase { price: super::types::Price, size: usize },
    /// A volume reduction would have driven a level's `totalVolume` below
    /// zero — the FIFO and the aggregate have drifted apart.
    NegativeVolume {
        price: super::types::Price,
        available: super::types::Quantity,
        requested: super::types::Quantity,
    },
}

impl fmt::Display for BookInvariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookInvariant::LevelNotFound { price } => {
                write!(f, "strict level lookup missed price {price}")
            }
            BookInvariant::NonEmptyLevelErase { price, size } => {
                write!(f, "attempted to erase level {price} with {size} orders still resting")
            }
            BookInvariant::NegativeVolume { price, available, requested } => {
                write!(
                    f,
                    "level {price} volume underflow: {available} available, {requested} requested"
                )
            }
        }
    }
}

impl std::error::Error for BookInvariant {}
