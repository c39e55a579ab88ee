//! Gridded scalar fields and iso-value contours

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, Polygon};
use crate::station::GeoPoint;

/// A square grid of values sampled over a bounding box.
///
/// Storage is row-major `(row, col)`: rows advance in latitude and columns
/// in longitude. Sample `(i, j)` sits at
///
/// ```text
/// lat = min_lat + i·dy,  dy = (max_lat − min_lat) / grid_size
/// lng = min_lng + j·dx,  dx = (max_lng − min_lng) / grid_size
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarField {
    data: Array2<f64>,
    bounds: BoundingBox,
}

impl ScalarField {
    /// Wrap row-major values as a `grid_size × grid_size` field.
    pub fn from_vec(data: Vec<f64>, grid_size: usize, bounds: BoundingBox) -> Result<Self> {
        if grid_size == 0 || data.len() != grid_size * grid_size {
            return Err(Error::InvalidParameter {
                name: "grid_size",
                value: grid_size.to_string(),
                reason: format!("expected {} values, got {}", grid_size * grid_size, data.len()),
            });
        }

        let data = Array2::from_shape_vec((grid_size, grid_size), data)
            .map_err(|e| Error::Parse(e.to_string()))?;

        Ok(Self { data, bounds })
    }

    /// Number of samples along each axis
    pub fn grid_size(&self) -> usize {
        self.data.nrows()
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Longitude step between columns
    pub fn dx(&self) -> f64 {
        self.bounds.width() / self.grid_size() as f64
    }

    /// Latitude step between rows
    pub fn dy(&self) -> f64 {
        self.bounds.height() / self.grid_size() as f64
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Map fractional grid coordinates to a geographic point.
    pub fn grid_to_geo(&self, row: f64, col: f64) -> GeoPoint {
        GeoPoint::new_unchecked(
            self.bounds.min_lat + row * self.dy(),
            self.bounds.min_lng + col * self.dx(),
        )
    }

    /// Inverse of [`grid_to_geo`](Self::grid_to_geo).
    ///
    /// Returns `(row, col)`; an axis with zero extent maps to 0.
    pub fn geo_to_grid(&self, p: GeoPoint) -> (f64, f64) {
        let dy = self.dy();
        let dx = self.dx();
        let row = if dy > 0.0 { (p.lat - self.bounds.min_lat) / dy } else { 0.0 };
        let col = if dx > 0.0 { (p.lng - self.bounds.min_lng) / dx } else { 0.0 };
        (row, col)
    }

    /// Minimum and maximum finite value, `None` if no value is finite.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// The region where a field is at or above `value`, as geographic polygons.
///
/// An empty `rings` list is a valid (empty) band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    pub value: f64,
    pub rings: Vec<Polygon>,
}

impl Contour {
    /// Sum of exterior-ring areas; holes are not subtracted.
    pub fn exterior_area(&self) -> f64 {
        self.rings.iter().map(Polygon::area).sum()
    }
}
