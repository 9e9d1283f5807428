//! Relative price change.

/// Percentage change of `latest` relative to `past`.
///
/// Returns `None` when there is no comparison price or it is exactly zero.
/// Positive values mean the price went up.
#[must_use]
pub fn change(latest: f64, past: Option<f64>) -> Option<f64> {
    match past {
        Some(past) if past != 0.0 => Some(((latest - past) / past) * 100.0),
        _ => None,
    }
}
