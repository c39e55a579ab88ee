//! Axis-aligned geographic bounding box

use serde::{Deserialize, Serialize};

use crate::station::{GeoPoint, Station};

/// Axis-aligned box in degrees.
///
/// Invariant: `min_lat <= max_lat` and `min_lng <= max_lng`. Zero-area boxes
/// (a single distinct coordinate) are valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat: min_lat.min(max_lat),
            max_lat: max_lat.max(min_lat),
            min_lng: min_lng.min(max_lng),
            max_lng: max_lng.max(min_lng),
        }
    }

    /// Smallest box containing every point. `None` if the iterator is empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = Self {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lng: first.lng,
            max_lng: first.lng,
        };
        for p in iter {
            bbox.min_lat = bbox.min_lat.min(p.lat);
            bbox.max_lat = bbox.max_lat.max(p.lat);
            bbox.min_lng = bbox.min_lng.min(p.lng);
            bbox.max_lng = bbox.max_lng.max(p.lng);
        }
        Some(bbox)
    }

    /// Box over all station coordinates plus the target point.
    pub fn enclosing(stations: &[Station], target: GeoPoint) -> Self {
        let points = stations
            .iter()
            .map(Station::location)
            .chain(std::iter::once(target));
        // The chain always yields the target
        Self::from_points(points).unwrap_or(Self {
            min_lat: target.lat,
            max_lat: target.lat,
            min_lng: target.lng,
            max_lng: target.lng,
        })
    }

    /// Expand the box by `margin` on all four sides.
    pub fn padded(&self, margin: f64) -> Self {
        Self {
            min_lat: self.min_lat - margin,
            max_lat: self.max_lat + margin,
            min_lng: self.min_lng - margin,
            max_lng: self.max_lng + margin,
        }
    }

    /// Extent along longitude (x)
    pub fn width(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// Extent along latitude (y)
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lat >= self.min_lat && p.lat <= self.max_lat && p.lng >= self.min_lng && p.lng <= self.max_lng
    }

    /// Corners in counter-clockwise order (x = lng, y = lat), starting south-west.
    pub fn corners(&self) -> [GeoPoint; 4] {
        [
            GeoPoint::new_unchecked(self.min_lat, self.min_lng),
            GeoPoint::new_unchecked(self.min_lat, self.max_lng),
            GeoPoint::new_unchecked(self.max_lat, self.max_lng),
            GeoPoint::new_unchecked(self.max_lat, self.min_lng),
        ]
    }
}
