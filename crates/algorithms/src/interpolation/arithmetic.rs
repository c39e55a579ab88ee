//! Arithmetic mean

use preciptech_core::Station;

/// Unweighted mean of station precipitation.
///
/// Returns `None` for an empty station set, which callers must treat as
/// "no data" rather than a computed zero.
pub fn arithmetic_mean(stations: &[Station]) -> Option<f64> {
    if stations.is_empty() {
        return None;
    }
    let sum: f64 = stations.iter().map(|s| s.precipitation).sum();
    Some(sum / stations.len() as f64)
}
