//! Distance computation for the flat index.

/// Distance reported for result slots that have no stored vector behind them.
pub const SENTINEL_DISTANCE: f64 = f64::INFINITY;

/// Position reported for result slots that have no stored vector behind them.
pub const SENTINEL_INDEX: i64 = -1;

/// Compute L2 squared distance.
///
/// Accumulated in `f64`: squares of finite `f32` differences cannot
/// overflow there, so every real hit gets a finite distance.
#[inline]
pub fn l2_squared(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(&x, &y)| {
        let d = f64::from(x) - f64::from(y);
        d * d
    }).sum()
}

/// True when `distance` marks a padded slot.
#[inline]
pub fn is_sentinel(distance: f64, index: i64) -> bool {
    index == SENTINEL_INDEX && distance == SENTINEL_DISTANCE
}
