//! Normal ratio method
//!
//! Each station contributes `P_i · N / n`, where `N` is a single normal
//! annual precipitation supplied by the caller and `n` the station count.
//! Unlike the textbook formulation the weight does not vary with each
//! station's own normal; only the global scalar scales the result.

use preciptech_core::Station;

/// Normal-ratio estimate.
///
/// Returns `None` for an empty station set or a normal precipitation that
/// is not a finite positive value.
pub fn normal_ratio(stations: &[Station], normal_precipitation: f64) -> Option<f64> {
    if stations.is_empty() || !normal_precipitation.is_finite() || normal_precipitation <= 0.0 {
        return None;
    }

    let n = stations.len() as f64;
    let value = stations
        .iter()
        .map(|s| s.precipitation * normal_precipitation / n)
        .sum();
    Some(value)
}
