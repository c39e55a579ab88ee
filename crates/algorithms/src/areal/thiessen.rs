//! Thiessen polygon method
//!
//! Each station's precipitation is weighted by the area of its Voronoi
//! (Thiessen) cell within a padded bounding box around the stations and the
//! target point.

use preciptech_core::{BoundingBox, Error, GeoPoint, Polygon, Result, Station};
use tracing::{debug, warn};

use super::voronoi::voronoi_cells;

/// Minimum number of stations for a tessellation
pub const MIN_STATIONS: usize = 3;

/// Parameters for the Thiessen method
#[derive(Debug, Clone, Copy)]
pub struct ThiessenParams {
    /// Margin added on every side of the bounding box (default: 50.0,
    /// in the lat/lng working plane)
    pub padding: f64,
}

impl Default for ThiessenParams {
    fn default() -> Self {
        Self { padding: 50.0 }
    }
}

/// A station's clipped Voronoi cell
#[derive(Debug, Clone, PartialEq)]
pub struct ThiessenCell {
    pub polygon: Polygon,
    /// Shoelace area in square degrees
    pub area: f64,
}

/// Output of [`thiessen`]
#[derive(Debug, Clone, PartialEq)]
pub struct ThiessenResult {
    /// Area-weighted precipitation
    pub value: f64,
    /// Padded box the cells were clipped to
    pub bounds: BoundingBox,
    /// One entry per input station; `None` for stations without a cell
    pub cells: Vec<Option<ThiessenCell>>,
}

impl ThiessenResult {
    /// Cells of the contributing stations, in station order.
    pub fn polygons(&self) -> Vec<Polygon> {
        self.cells
            .iter()
            .flatten()
            .map(|c| c.polygon.clone())
            .collect()
    }
}

/// Thiessen polygon estimate.
///
/// ```text
/// value = Σ(area_i · P_i) / Σ(area_i)
/// ```
///
/// over stations with a non-empty cell. Stations whose cell is missing
/// (duplicated coordinates, zero-area cells) are excluded.
///
/// # Errors
/// - [`Error::InsufficientInput`] with fewer than 3 stations
/// - [`Error::InvalidParameter`] for a non-finite or out-of-range target
/// - [`Error::DegenerateGeometry`] when the total cell area is zero
pub fn thiessen(stations: &[Station], target: GeoPoint, params: ThiessenParams) -> Result<ThiessenResult> {
    if stations.len() < MIN_STATIONS {
        return Err(Error::InsufficientInput {
            method: "thiessen",
            required: MIN_STATIONS,
            found: stations.len(),
        });
    }
    target.validate_as("target")?;

    let bounds = BoundingBox::enclosing(stations, target).padded(params.padding);
    let sites: Vec<GeoPoint> = stations.iter().map(Station::location).collect();
    let polygons = voronoi_cells(&sites, &bounds);

    let mut total_area = 0.0;
    let mut weighted_sum = 0.0;
    let cells: Vec<Option<ThiessenCell>> = stations
        .iter()
        .zip(polygons)
        .map(|(station, polygon)| {
            let Some(polygon) = polygon else {
                warn!("Station {} has no Thiessen cell and is excluded", station.name);
                return None;
            };
            let area = polygon.area();
            total_area += area;
            weighted_sum += area * station.precipitation;
            Some(ThiessenCell { polygon, area })
        })
        .collect();

    if total_area <= 0.0 {
        return Err(Error::DegenerateGeometry(
            "Thiessen cells have zero total area".into(),
        ));
    }

    let value = weighted_sum / total_area;
    if !value.is_finite() {
        return Err(Error::DegenerateGeometry(format!(
            "Thiessen estimate is not finite ({})",
            value
        )));
    }

    debug!(
        "Thiessen: {} of {} stations contribute, total area {:.6}",
        cells.iter().flatten().count(),
        stations.len(),
        total_area
    );

    Ok(ThiessenResult { value, bounds, cells })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn station(lat: f64, lng: f64, precip: f64) -> Station {
        Station::new("s", lat, lng, precip).unwrap()
    }

    fn target(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new_unchecked(lat, lng)
    }

    #[test]
    fn test_thiessen_requires_three() {
        let stations = vec![station(0.0, 0.0, 1.0), station(1.0, 1.0, 2.0)];
        let result = thiessen(&stations, target(0.5, 0.5), ThiessenParams::default());
        assert!(matches!(
            result,
            Err(Error::InsufficientInput { required: 3, found: 2, .. })
        ));
    }

    #[test]
    fn test_thiessen_symmetric_layout() {
        // Four gauges on the corners of a square, box padded evenly
        let stations = vec![
            station(0.0, 0.0, 10.0),
            station(0.0, 2.0, 20.0),
            station(2.0, 0.0, 30.0),
            station(2.0, 2.0, 40.0),
        ];
        let result = thiessen(&stations, target(1.0, 1.0), ThiessenParams { padding: 1.0 }).unwrap();

        assert_relative_eq!(result.value, 25.0, epsilon = 1e-9);
        for cell in result.cells.iter().flatten() {
            assert_relative_eq!(cell.area, 4.0, epsilon = 1e-9);
        }
        assert_eq!(result.polygons().len(), 4);
    }

    #[test]
    fn test_thiessen_bounded_by_extremes() {
        let stations = vec![
            station(-33.40, -70.60, 12.0),
            station(-33.52, -70.71, 3.5),
            station(-33.45, -70.55, 27.0),
            station(-33.61, -70.58, 8.0),
            station(-33.38, -70.80, 15.5),
        ];
        for padding in [0.0, 0.05, 50.0] {
            let result = thiessen(&stations, target(-33.5, -70.65), ThiessenParams { padding }).unwrap();
            assert!(
                result.value >= 3.5 && result.value <= 27.0,
                "padding {}: {}",
                padding,
                result.value
            );
        }
    }

    #[test]
    fn test_thiessen_total_area_is_box() {
        let stations = vec![
            station(0.0, 0.0, 10.0),
            station(0.0, 1.0, 20.0),
            station(1.0, 0.0, 30.0),
        ];
        let result = thiessen(&stations, target(0.5, 0.5), ThiessenParams::default()).unwrap();
        let total: f64 = result.cells.iter().flatten().map(|c| c.area).sum();
        assert_relative_eq!(total, result.bounds.area(), epsilon = 1e-6);
        assert_relative_eq!(result.bounds.width(), 101.0, epsilon = 1e-12);
    }

    #[test]
    fn test_thiessen_duplicate_station_excluded() {
        let stations = vec![
            station(0.0, 0.0, 10.0),
            station(0.0, 0.0, 1000.0),
            station(0.0, 1.0, 20.0),
            station(1.0, 0.0, 30.0),
        ];
        let result = thiessen(&stations, target(0.5, 0.5), ThiessenParams::default()).unwrap();
        assert!(result.cells[1].is_none());
        assert!(result.value <= 30.0);
    }

    #[test]
    fn test_thiessen_degenerate_without_padding() {
        // All gauges and the target on one parallel: zero-height box
        let stations = vec![
            station(5.0, 0.0, 10.0),
            station(5.0, 1.0, 20.0),
            station(5.0, 2.0, 30.0),
        ];
        let result = thiessen(&stations, target(5.0, 1.5), ThiessenParams { padding: 0.0 });
        assert!(matches!(result, Err(Error::DegenerateGeometry(_))));
    }

    #[test]
    fn test_thiessen_collinear_with_padding() {
        let stations = vec![
            station(5.0, 0.0, 10.0),
            station(5.0, 1.0, 20.0),
            station(5.0, 2.0, 30.0),
        ];
        let result = thiessen(&stations, target(5.0, 1.5), ThiessenParams { padding: 1.0 }).unwrap();
        // Strips of width 1.5, 1.0, 1.5 over height 2
        assert_relative_eq!(result.value, (1.5 * 10.0 + 1.0 * 20.0 + 1.5 * 30.0) / 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_thiessen_rejects_nan_target() {
        let stations = vec![
            station(0.0, 0.0, 10.0),
            station(0.0, 1.0, 20.0),
            station(1.0, 0.0, 30.0),
        ];
        let result = thiessen(&stations, target(f64::NAN, 0.0), ThiessenParams::default());
        assert!(matches!(result, Err(Error::InvalidParameter { name: "target", .. })));
    }
}
