use lob_core::prelude::*;

/// Flattens a level snapshot into `(price, size, totalVolume)` tuples for
/// compact assertions.
#[allow(dead_code)]
pub fn flatten(views: &[LevelView]) -> Vec<(Price, usize, Quantity)> {
    views.iter().map(|v| (v.price, v.size, v.total_volume)).collect()
}
