//! Isohyet extraction (marching squares)
//!
//! For each threshold `t`, traces the boundary of the superlevel set
//! `{v ≥ t}` of a [`ScalarField`] and returns it as closed polygons in
//! geographic coordinates.
//!
//! The grid is surrounded by a virtual border lying below every threshold,
//! so every ring closes; crossings against that border sit on the border
//! sample itself. Crossing points are computed once per grid edge, and each
//! cell emits segments oriented with the high side on the left. Chaining
//! segments by edge therefore yields counter-clockwise exterior rings and
//! clockwise holes (x = column, y = row). Saddle cells are resolved with the
//! mean of their four corners.

use std::collections::{HashMap, HashSet};

use preciptech_core::geometry::{ring_area, ring_contains, signed_ring_area};
use preciptech_core::{Contour, Error, GeoPoint, Polygon, Result, ScalarField};
use tracing::debug;

/// Parameters for contour extraction
#[derive(Debug, Clone, Copy)]
pub struct ContourParams {
    /// Number of evenly spaced thresholds (default: 8)
    pub count: usize,
}

impl Default for ContourParams {
    fn default() -> Self {
        Self { count: 8 }
    }
}

/// `count` evenly spaced thresholds starting at `min`:
/// `min + i·(max − min)/count` for `i = 0..count`.
pub fn thresholds(min: f64, max: f64, count: usize) -> Vec<f64> {
    let step = (max - min) / count as f64;
    (0..count).map(|i| min + i as f64 * step).collect()
}

/// Extract `params.count` isohyets spanning the field's value range.
///
/// Contours are returned in ascending threshold order, including those with
/// no rings.
///
/// # Errors
/// - [`Error::InvalidParameter`] if `count` is zero
/// - [`Error::DegenerateGeometry`] if the field holds no finite value
pub fn extract_contours(field: &ScalarField, params: ContourParams) -> Result<Vec<Contour>> {
    if params.count == 0 {
        return Err(Error::InvalidParameter {
            name: "contour_count",
            value: "0".into(),
            reason: "must be at least 1".into(),
        });
    }

    let (min, max) = field
        .value_range()
        .ok_or_else(|| Error::DegenerateGeometry("field has no finite values".into()))?;

    let grid = PaddedGrid::new(field);
    let contours: Vec<Contour> = thresholds(min, max, params.count)
        .into_iter()
        .map(|t| Contour {
            value: t,
            rings: grid
                .polygons(t)
                .into_iter()
                .map(|poly| to_geographic(field, poly))
                .collect(),
        })
        .collect();

    debug!(
        "Extracted {} contours over [{:.3}, {:.3}] ({} polygons)",
        contours.len(),
        min,
        max,
        contours.iter().map(|c| c.rings.len()).sum::<usize>()
    );

    Ok(contours)
}

/// Grid edge identifier in padded coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum EdgeKey {
    /// Between `(r, c)` and `(r, c + 1)`
    Horizontal(usize, usize),
    /// Between `(r, c)` and `(r + 1, c)`
    Vertical(usize, usize),
}

/// Field values surrounded by one ring of `-∞`.
struct PaddedGrid {
    size: usize,
    values: Vec<f64>,
}

impl PaddedGrid {
    fn new(field: &ScalarField) -> Self {
        let n = field.grid_size();
        let size = n + 2;
        let mut values = vec![f64::NEG_INFINITY; size * size];
        for ((r, c), &v) in field.data().indexed_iter() {
            values[(r + 1) * size + (c + 1)] = v;
        }
        Self { size, values }
    }

    #[inline]
    fn value(&self, r: usize, c: usize) -> f64 {
        self.values[r * self.size + c]
    }

    /// Crossing of `t` along an edge, in unpadded `(row, col)` grid space.
    fn crossing(&self, edge: EdgeKey, t: f64) -> GeoPoint {
        match edge {
            EdgeKey::Horizontal(r, c) => {
                let s = fraction(self.value(r, c), self.value(r, c + 1), t);
                grid_point(r as f64 - 1.0, c as f64 - 1.0 + s)
            }
            EdgeKey::Vertical(r, c) => {
                let s = fraction(self.value(r, c), self.value(r + 1, c), t);
                grid_point(r as f64 - 1.0 + s, c as f64 - 1.0)
            }
        }
    }

    /// Oriented segments `(from, to)` for threshold `t`, in cell order.
    fn segments(&self, t: f64) -> Vec<(EdgeKey, EdgeKey)> {
        let mut segments = Vec::new();

        for r in 0..self.size - 1 {
            for c in 0..self.size - 1 {
                // Corners counter-clockwise: (r,c) (r,c+1) (r+1,c+1) (r+1,c)
                let corners = [
                    self.value(r, c),
                    self.value(r, c + 1),
                    self.value(r + 1, c + 1),
                    self.value(r + 1, c),
                ];
                let inside = corners.map(|v| v >= t);
                if inside.iter().all(|&b| b) || inside.iter().all(|&b| !b) {
                    continue;
                }

                // Edge k runs from corner k to corner k+1
                let edges = [
                    EdgeKey::Horizontal(r, c),
                    EdgeKey::Vertical(r, c + 1),
                    EdgeKey::Horizontal(r + 1, c),
                    EdgeKey::Vertical(r, c),
                ];
                let exits: Vec<usize> = (0..4).filter(|&k| inside[k] && !inside[(k + 1) % 4]).collect();
                let entries: Vec<usize> = (0..4).filter(|&k| !inside[k] && inside[(k + 1) % 4]).collect();

                if exits.len() == 1 {
                    segments.push((edges[exits[0]], edges[entries[0]]));
                } else {
                    // Saddle: two exits, two entries alternating around the cell
                    let center = corners.iter().sum::<f64>() / 4.0;
                    let center_inside = center >= t;
                    for &k in &exits {
                        let entry = if center_inside { (k + 1) % 4 } else { (k + 3) % 4 };
                        segments.push((edges[k], edges[entry]));
                    }
                }
            }
        }

        segments
    }

    /// Closed rings for threshold `t`, grouped into polygons with holes.
    fn polygons(&self, t: f64) -> Vec<Polygon> {
        let segments = self.segments(t);
        let next: HashMap<EdgeKey, EdgeKey> = segments.iter().copied().collect();
        let mut visited: HashSet<EdgeKey> = HashSet::with_capacity(segments.len());

        let mut exteriors: Vec<Vec<GeoPoint>> = Vec::new();
        let mut holes: Vec<Vec<GeoPoint>> = Vec::new();

        for &(start, _) in &segments {
            if visited.contains(&start) {
                continue;
            }

            let mut ring = Vec::new();
            let mut key = start;
            let closed = loop {
                visited.insert(key);
                let point = self.crossing(key, t);
                if ring.last() != Some(&point) {
                    ring.push(point);
                }
                match next.get(&key) {
                    Some(&k) if k == start => break true,
                    Some(&k) if !visited.contains(&k) => key = k,
                    _ => break false,
                }
            };
            if !closed {
                continue;
            }
            if ring.len() > 1 && ring.first() == ring.last() {
                ring.pop();
            }
            if ring.len() < 3 {
                continue;
            }

            let signed = signed_ring_area(&ring);
            if signed > 0.0 {
                exteriors.push(ring);
            } else if signed < 0.0 {
                holes.push(ring);
            }
        }

        assemble(exteriors, holes)
    }
}

/// Attach every hole to the smallest exterior containing it.
fn assemble(exteriors: Vec<Vec<GeoPoint>>, holes: Vec<Vec<GeoPoint>>) -> Vec<Polygon> {
    let areas: Vec<f64> = exteriors.iter().map(|r| ring_area(r)).collect();
    let mut polygons: Vec<Polygon> = exteriors.into_iter().map(Polygon::new).collect();

    for hole in holes {
        let probe = hole[0];
        let owner = polygons
            .iter()
            .enumerate()
            .filter(|(_, p)| ring_contains(&p.exterior, probe))
            .min_by(|(a, _), (b, _)| areas[*a].total_cmp(&areas[*b]))
            .map(|(i, _)| i);

        match owner {
            Some(i) => polygons[i].interiors.push(hole),
            None => debug!("Dropping contour hole with no enclosing ring"),
        }
    }

    polygons
}

/// Position of `t` between `v0` and `v1`, clamped to [0, 1].
///
/// A non-finite end (the virtual border or missing data) pins the crossing
/// to the finite end.
fn fraction(v0: f64, v1: f64, t: f64) -> f64 {
    if !v0.is_finite() {
        return 1.0;
    }
    if !v1.is_finite() {
        return 0.0;
    }
    ((t - v0) / (v1 - v0)).clamp(0.0, 1.0)
}

/// Grid-space point stored as `lat = row`, `lng = col`.
#[inline]
fn grid_point(row: f64, col: f64) -> GeoPoint {
    GeoPoint::new_unchecked(row, col)
}

fn to_geographic(field: &ScalarField, poly: Polygon) -> Polygon {
    let map = |ring: Vec<GeoPoint>| -> Vec<GeoPoint> {
        ring.into_iter()
            .map(|p| field.grid_to_geo(p.lat, p.lng))
            .collect()
    };
    Polygon::with_interiors(
        map(poly.exterior),
        poly.interiors.into_iter().map(map).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use preciptech_core::BoundingBox;

    fn field_from(rows: &[&[f64]], bounds: BoundingBox) -> ScalarField {
        let n = rows.len();
        let data: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        ScalarField::from_vec(data, n, bounds).unwrap()
    }

    /// Box where grid index equals geographic coordinate (dx = dy = 1)
    fn index_box(n: usize) -> BoundingBox {
        BoundingBox::new(0.0, n as f64, 0.0, n as f64)
    }

    #[test]
    fn test_thresholds_even_spacing() {
        assert_eq!(thresholds(0.0, 8.0, 4), vec![0.0, 2.0, 4.0, 6.0]);
        assert_eq!(thresholds(5.0, 5.0, 3), vec![5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_lowest_contour_covers_grid() {
        let f = field_from(
            &[&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0], &[3.0, 4.0, 5.0]],
            index_box(3),
        );
        let contours = extract_contours(&f, ContourParams { count: 4 }).unwrap();
        assert_eq!(contours.len(), 4);
        assert_eq!(contours[0].value, 1.0);

        let first = &contours[0];
        assert_eq!(first.rings.len(), 1);
        // Samples span indices 0..=2 on both axes
        assert_relative_eq!(first.exterior_area(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_contour_areas_decrease() {
        let f = field_from(
            &[
                &[0.0, 1.0, 2.0, 3.0],
                &[1.0, 2.0, 3.0, 4.0],
                &[2.0, 3.0, 4.0, 5.0],
                &[3.0, 4.0, 5.0, 6.0],
            ],
            index_box(4),
        );
        let contours = extract_contours(&f, ContourParams { count: 6 }).unwrap();
        let areas: Vec<f64> = contours.iter().map(Contour::exterior_area).collect();
        for w in areas.windows(2) {
            assert!(w[0] >= w[1], "areas should shrink: {:?}", areas);
        }
        assert!(areas[areas.len() - 1] > 0.0);
    }

    #[test]
    fn test_single_peak_ring() {
        // Peak in the middle: threshold 5 crosses halfway along each edge
        let f = field_from(
            &[&[0.0, 0.0, 0.0], &[0.0, 10.0, 0.0], &[0.0, 0.0, 0.0]],
            index_box(3),
        );
        let grid = PaddedGrid::new(&f);
        let polys = grid.polygons(5.0);
        assert_eq!(polys.len(), 1);
        assert!(polys[0].interiors.is_empty());
        // Diamond with half-diagonals 0.5
        assert_relative_eq!(polys[0].area(), 0.5, epsilon = 1e-12);
        assert!(signed_ring_area(&polys[0].exterior) > 0.0);
    }

    #[test]
    fn test_pit_produces_hole() {
        let f = field_from(
            &[
                &[10.0, 10.0, 10.0, 10.0, 10.0],
                &[10.0, 10.0, 10.0, 10.0, 10.0],
                &[10.0, 10.0, 0.0, 10.0, 10.0],
                &[10.0, 10.0, 10.0, 10.0, 10.0],
                &[10.0, 10.0, 10.0, 10.0, 10.0],
            ],
            index_box(5),
        );
        let grid = PaddedGrid::new(&f);
        let polys = grid.polygons(5.0);
        assert_eq!(polys.len(), 1);
        assert_eq!(polys[0].interiors.len(), 1);
        assert_relative_eq!(polys[0].area(), 16.0, epsilon = 1e-12);
        assert_relative_eq!(polys[0].net_area(), 15.5, epsilon = 1e-12);
        assert!(signed_ring_area(&polys[0].interiors[0]) < 0.0);
    }

    #[test]
    fn test_two_separate_peaks() {
        let f = field_from(
            &[
                &[9.0, 0.0, 0.0, 0.0],
                &[0.0, 0.0, 0.0, 0.0],
                &[0.0, 0.0, 0.0, 0.0],
                &[0.0, 0.0, 0.0, 9.0],
            ],
            index_box(4),
        );
        let grid = PaddedGrid::new(&f);
        assert_eq!(grid.polygons(3.0).len(), 2);
    }

    #[test]
    fn test_saddle_connectivity() {
        // Diagonal highs; centre mean 5 >= 4 joins them, 6 splits them
        let f = field_from(&[&[10.0, 0.0], &[0.0, 10.0]], index_box(2));
        let grid = PaddedGrid::new(&f);
        assert_eq!(grid.polygons(4.0).len(), 1);
        assert_eq!(grid.polygons(6.0).len(), 2);
    }

    #[test]
    fn test_geographic_mapping() {
        let bounds = BoundingBox::new(-10.0, -6.0, 30.0, 38.0);
        let f = field_from(&[&[1.0, 1.0], &[1.0, 1.0]], bounds);
        let contours = extract_contours(&f, ContourParams { count: 2 }).unwrap();

        // Constant field: every contour covers the sampled square
        for c in &contours {
            assert_eq!(c.value, 1.0);
            assert_eq!(c.rings.len(), 1);
            let ring = &c.rings[0].exterior;
            let lats: Vec<f64> = ring.iter().map(|p| p.lat).collect();
            let lngs: Vec<f64> = ring.iter().map(|p| p.lng).collect();
            assert_eq!(lats.iter().cloned().fold(f64::INFINITY, f64::min), -10.0);
            assert_eq!(lats.iter().cloned().fold(f64::NEG_INFINITY, f64::max), -8.0);
            assert_eq!(lngs.iter().cloned().fold(f64::INFINITY, f64::min), 30.0);
            assert_eq!(lngs.iter().cloned().fold(f64::NEG_INFINITY, f64::max), 34.0);
            // dx = 4, dy = 2
            assert_relative_eq!(c.exterior_area(), 8.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_empty_bands_kept() {
        let f = field_from(&[&[0.0, 0.0], &[0.0, 100.0]], index_box(2));
        let contours = extract_contours(&f, ContourParams { count: 8 }).unwrap();
        assert_eq!(contours.len(), 8);
        for w in contours.windows(2) {
            assert!(w[0].value < w[1].value);
        }
    }

    #[test]
    fn test_nan_field() {
        let f = field_from(&[&[f64::NAN, f64::NAN], &[f64::NAN, f64::NAN]], index_box(2));
        let result = extract_contours(&f, ContourParams::default());
        assert!(matches!(result, Err(Error::DegenerateGeometry(_))));
    }

    #[test]
    fn test_zero_count() {
        let f = field_from(&[&[0.0, 1.0], &[1.0, 2.0]], index_box(2));
        assert!(extract_contours(&f, ContourParams { count: 0 }).is_err());
    }
}
