//! IDW field sampling over a regular grid

use preciptech_core::{BoundingBox, Error, GeoPoint, Result, ScalarField, Station};
use tracing::debug;

use crate::interpolation::idw_unchecked;
use crate::maybe_rayon::*;

/// Parameters for field sampling
#[derive(Debug, Clone, Copy)]
pub struct FieldParams {
    /// Samples per axis (default: 50)
    pub grid_size: usize,
    /// IDW power parameter (default: 2.0)
    pub power: f64,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            grid_size: 50,
            power: 2.0,
        }
    }
}

/// Evaluate IDW on a `grid_size × grid_size` grid spanning `bounds`.
///
/// Sample `(i, j)` is taken at `lat = min_lat + i·dy`, `lng = min_lng + j·dx`
/// with `dx = width / grid_size` and `dy = height / grid_size`. Rows are
/// sampled in parallel; the result is deterministic.
///
/// Cost is `O(grid_size² · stations)`.
pub fn sample_field(stations: &[Station], bounds: BoundingBox, params: FieldParams) -> Result<ScalarField> {
    if stations.is_empty() {
        return Err(Error::EmptyInput);
    }
    let n = params.grid_size;
    if n == 0 {
        return Err(Error::InvalidParameter {
            name: "grid_size",
            value: n.to_string(),
            reason: "must be at least 1".into(),
        });
    }

    let dx = bounds.width() / n as f64;
    let dy = bounds.height() / n as f64;
    let power = params.power;

    debug!("Sampling {}x{} IDW field over {} stations", n, n, stations.len());

    let data: Vec<f64> = (0..n)
        .into_par_iter()
        .flat_map(|i| {
            let lat = bounds.min_lat + i as f64 * dy;
            (0..n)
                .map(|j| {
                    let lng = bounds.min_lng + j as f64 * dx;
                    idw_unchecked(stations, GeoPoint::new_unchecked(lat, lng), power)
                })
                .collect::<Vec<f64>>()
        })
        .collect();

    ScalarField::from_vec(data, n, bounds)
}
