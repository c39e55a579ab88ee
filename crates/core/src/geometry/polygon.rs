//! Polygons and the shoelace area formula
//!
//! Rings are stored open (the closing vertex is implied). All planar
//! computations treat longitude as x and latitude as y, so areas are in
//! square degrees and only meaningful relative to one another.

use serde::{Deserialize, Serialize};

use crate::station::GeoPoint;

/// Signed shoelace area of a ring.
///
/// Positive for counter-clockwise rings (x = lng, y = lat), negative for
/// clockwise ones. Rings with fewer than 3 vertices have zero area.
///
/// Coordinates are taken relative to the first vertex, so a ring whose
/// vertices share a longitude or latitude has exactly zero area.
pub fn signed_ring_area(ring: &[GeoPoint]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }

    let o = ring[0];
    let mut twice_area = 0.0;
    for i in 1..n - 1 {
        let (ax, ay) = (ring[i].lng - o.lng, ring[i].lat - o.lat);
        let (bx, by) = (ring[i + 1].lng - o.lng, ring[i + 1].lat - o.lat);
        twice_area += ax * by - bx * ay;
    }
    twice_area / 2.0
}

/// Unsigned shoelace area of a ring.
///
/// Invariant to the starting vertex and the traversal direction.
#[inline]
pub fn ring_area(ring: &[GeoPoint]) -> f64 {
    signed_ring_area(ring).abs()
}

/// Even-odd point-in-ring test.
pub fn ring_contains(ring: &[GeoPoint], p: GeoPoint) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (ring[i].lng, ring[i].lat);
        let (xj, yj) = (ring[j].lng, ring[j].lat);
        if (yi > p.lat) != (yj > p.lat) && p.lng < (xj - xi) * (p.lat - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// A polygon: an exterior ring and optional interior rings (holes).
///
/// Thiessen cells never have holes; contour polygons may.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub exterior: Vec<GeoPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interiors: Vec<Vec<GeoPoint>>,
}

impl Polygon {
    pub fn new(exterior: Vec<GeoPoint>) -> Self {
        Self {
            exterior,
            interiors: Vec::new(),
        }
    }

    pub fn with_interiors(exterior: Vec<GeoPoint>, interiors: Vec<Vec<GeoPoint>>) -> Self {
        Self { exterior, interiors }
    }

    /// Area of the exterior ring, ignoring holes.
    pub fn area(&self) -> f64 {
        ring_area(&self.exterior)
    }

    /// Exterior area minus the area of every hole.
    pub fn net_area(&self) -> f64 {
        let holes: f64 = self.interiors.iter().map(|r| ring_area(r)).sum();
        (self.area() - holes).max(0.0)
    }

    /// `true` if `p` lies inside the exterior and outside every hole.
    pub fn contains(&self, p: GeoPoint) -> bool {
        ring_contains(&self.exterior, p) && !self.interiors.iter().any(|r| ring_contains(r, p))
    }

    pub fn len(&self) -> usize {
        self.exterior.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }
}

fn to_line_string(ring: &[GeoPoint]) -> geo_types::LineString<f64> {
    // geo_types closes the ring on construction
    ring.iter()
        .map(|p| geo_types::Coord { x: p.lng, y: p.lat })
        .collect::<Vec<_>>()
        .into()
}

impl From<&Polygon> for geo_types::Polygon<f64> {
    fn from(poly: &Polygon) -> Self {
        geo_types::Polygon::new(
            to_line_string(&poly.exterior),
            poly.interiors.iter().map(|r| to_line_string(r)).collect(),
        )
    }
}
