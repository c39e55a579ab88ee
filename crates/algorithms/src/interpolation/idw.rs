//! Inverse Distance Weighting (IDW)
//!
//! Estimates the value at a target location as a weighted average of all
//! stations, with weights inversely proportional to great-circle distance
//! raised to a power parameter.
//!
//! Reference:
//! Shepard, D. (1968). A two-dimensional interpolation function for
//! irregularly-spaced data. ACM National Conference.

use preciptech_core::geometry::distance;
use preciptech_core::{Error, GeoPoint, Result, Station};

/// Parameters for IDW estimation
#[derive(Debug, Clone, Copy)]
pub struct IdwParams {
    /// Power parameter (default: 2.0).
    /// Higher values give more weight to nearby stations.
    pub power: f64,
}

impl Default for IdwParams {
    fn default() -> Self {
        Self { power: 2.0 }
    }
}

/// IDW estimate at `target`.
///
/// # Algorithm
///
/// ```text
/// z = Σ(wi · zi) / Σ(wi)
/// where wi = 1 / d(target, station_i)^p   (d in km, haversine)
/// ```
///
/// If the target coincides with a station, that station's precipitation is
/// returned exactly. Stations so close that `d^p` underflows to zero are
/// treated as coincident; among several, the nearest one wins. If instead
/// every weight underflows to zero, the nearest station's value is returned.
///
/// # Errors
/// - [`Error::EmptyInput`] when no stations are given
/// - [`Error::InvalidParameter`] for a non-finite or out-of-range target
pub fn idw(stations: &[Station], target: GeoPoint, params: IdwParams) -> Result<f64> {
    if stations.is_empty() {
        return Err(Error::EmptyInput);
    }
    target.validate_as("target")?;
    Ok(idw_unchecked(stations, target, params.power))
}

/// IDW over a non-empty station set and a valid target.
pub(crate) fn idw_unchecked(stations: &[Station], target: GeoPoint, power: f64) -> f64 {
    let mut sum_w = 0.0;
    let mut sum_wz = 0.0;
    // (distance, precipitation) of the nearest station with infinite weight
    let mut saturated: Option<(f64, f64)> = None;
    let mut nearest = (f64::INFINITY, f64::NAN);

    for station in stations {
        let d = distance(target, station.location());
        if d == 0.0 {
            return station.precipitation;
        }
        if d < nearest.0 {
            nearest = (d, station.precipitation);
        }

        let w = 1.0 / d.powf(power);
        if w.is_infinite() {
            if saturated.map_or(true, |(best, _)| d < best) {
                saturated = Some((d, station.precipitation));
            }
            continue;
        }
        sum_w += w;
        sum_wz += w * station.precipitation;
    }

    match saturated {
        Some((_, precipitation)) => precipitation,
        // Every weight underflowed to zero
        None if sum_w == 0.0 => nearest.1,
        None => sum_wz / sum_w,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stations() -> Vec<Station> {
        vec![
            Station::new("a", 0.0, 0.0, 10.0).unwrap(),
            Station::new("b", 0.0, 1.0, 20.0).unwrap(),
            Station::new("c", 1.0, 0.0, 30.0).unwrap(),
        ]
    }

    fn at(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new_unchecked(lat, lng)
    }

    #[test]
    fn test_idw_exact_match_returns_station_value() {
        let stations = sample_stations();
        for s in &stations {
            let v = idw(&stations, s.location(), IdwParams::default()).unwrap();
            assert_eq!(v, s.precipitation, "exact match at {}", s.name);
        }
    }

    #[test]
    fn test_idw_exact_match_not_first_station() {
        // The matching station is last; earlier weights must not leak in
        let stations = sample_stations();
        let v = idw(&stations, at(1.0, 0.0), IdwParams { power: 1.0 }).unwrap();
        assert_eq!(v, 30.0);
    }

    #[test]
    fn test_idw_between_extremes() {
        let stations = sample_stations();
        let v = idw(&stations, at(0.5, 0.5), IdwParams::default()).unwrap();
        assert!(v > 10.0 && v < 30.0, "got {}", v);
        // Nearly equidistant from all three
        assert!((v - 20.0).abs() < 1.0, "got {}", v);
    }

    #[test]
    fn test_idw_favours_nearest() {
        let stations = sample_stations();
        let v = idw(&stations, at(0.9, 0.05), IdwParams::default()).unwrap();
        assert!(v > 25.0, "close to the 30 mm gauge, got {}", v);
    }

    #[test]
    fn test_idw_power_effect() {
        let stations = sample_stations();
        let target = at(0.1, 0.1);
        let low = idw(&stations, target, IdwParams { power: 1.0 }).unwrap();
        let high = idw(&stations, target, IdwParams { power: 4.0 }).unwrap();
        assert!(
            (high - 10.0).abs() < (low - 10.0).abs(),
            "higher power should pull toward the nearest value: low={}, high={}",
            low,
            high
        );
    }

    #[test]
    fn test_idw_single_station() {
        let stations = vec![Station::new("only", 5.0, 5.0, 42.0).unwrap()];
        let v = idw(&stations, at(-20.0, 60.0), IdwParams::default()).unwrap();
        assert!((v - 42.0).abs() < 1e-12);
    }

    #[test]
    fn test_idw_underflow_picks_nearest() {
        // ~0.1 km (10 mm) listed before ~0.01 km (20 mm)
        let stations = vec![
            Station::new("far", 0.0009, 0.0, 10.0).unwrap(),
            Station::new("near", 0.00009, 0.0, 20.0).unwrap(),
        ];
        let target = at(0.0, 0.0);

        let moderate = idw(&stations, target, IdwParams { power: 100.0 }).unwrap();
        assert!((moderate - 20.0).abs() < 1e-9, "got {}", moderate);

        // Both distances raised to 400 underflow to zero
        let extreme = idw(&stations, target, IdwParams { power: 400.0 }).unwrap();
        assert_eq!(extreme, 20.0);
    }

    #[test]
    fn test_idw_all_weights_vanish_picks_nearest() {
        // ~1100 km and ~2200 km away: d^400 overflows, weights become zero
        let stations = vec![
            Station::new("far", 20.0, 0.0, 5.0).unwrap(),
            Station::new("near", 10.0, 0.0, 15.0).unwrap(),
        ];
        let v = idw(&stations, at(0.0, 0.0), IdwParams { power: 400.0 }).unwrap();
        assert_eq!(v, 15.0);
    }

    #[test]
    fn test_idw_rejects_non_finite_target() {
        let stations = sample_stations();
        for target in [at(f64::NAN, 0.0), at(0.0, f64::INFINITY), at(95.0, 0.0)] {
            let result = idw(&stations, target, IdwParams::default());
            assert!(
                matches!(result, Err(Error::InvalidParameter { name: "target", .. })),
                "{:?} -> {:?}",
                target,
                result
            );
        }
    }

    #[test]
    fn test_idw_empty() {
        let result = idw(&[], at(0.0, 0.0), IdwParams::default());
        assert!(matches!(result, Err(Error::EmptyInput)));
    }
}
