//! Bounded Voronoi tessellation
//!
//! Builds one cell per site by clipping the bounding box successively with
//! the perpendicular-bisector half-plane of every other site
//! (Sutherland-Hodgman against a single line per step). The result is the
//! exact Voronoi cell intersected with the box, and collinear site layouts
//! simply produce strip-shaped cells.
//!
//! Coordinates are used as planar (x = lng, y = lat) without projection,
//! which is only a fair approximation over small extents.

use preciptech_core::{BoundingBox, GeoPoint, Polygon};

/// Voronoi cell of every site, clipped to `bounds`.
///
/// The returned vector is indexed like `sites`. A site gets `None` when it
/// lies outside the box, when it duplicates an earlier site (the first
/// occurrence owns the cell) or when its clipped cell has no area.
pub fn voronoi_cells(sites: &[GeoPoint], bounds: &BoundingBox) -> Vec<Option<Polygon>> {
    let corners = bounds.corners();

    sites
        .iter()
        .enumerate()
        .map(|(i, &site)| {
            if !bounds.contains(site) {
                return None;
            }
            if sites[..i].iter().any(|&other| other == site) {
                return None;
            }

            let mut cell: Vec<GeoPoint> = corners.to_vec();
            for (j, &other) in sites.iter().enumerate() {
                if j == i || other == site {
                    continue;
                }
                cell = clip_to_bisector(&cell, site, other);
                if cell.len() < 3 {
                    return None;
                }
            }

            let polygon = Polygon::new(cell);
            if polygon.area() > 0.0 {
                Some(polygon)
            } else {
                None
            }
        })
        .collect()
}

/// Keep the part of `ring` that is at least as close to `site` as to `other`.
fn clip_to_bisector(ring: &[GeoPoint], site: GeoPoint, other: GeoPoint) -> Vec<GeoPoint> {
    // Half-plane f(p) <= 0 with f(p) = (p - m)·(other - site), m the midpoint
    let nx = other.lng - site.lng;
    let ny = other.lat - site.lat;
    let mx = (site.lng + other.lng) / 2.0;
    let my = (site.lat + other.lat) / 2.0;
    let side = |p: &GeoPoint| (p.lng - mx) * nx + (p.lat - my) * ny;

    let n = ring.len();
    let mut output = Vec::with_capacity(n + 1);

    for i in 0..n {
        let current = &ring[i];
        let next = &ring[(i + 1) % n];
        let fc = side(current);
        let fnext = side(next);

        match (fc <= 0.0, fnext <= 0.0) {
            (true, true) => output.push(*next),
            (true, false) => output.push(intersect(current, next, fc, fnext)),
            (false, true) => {
                output.push(intersect(current, next, fc, fnext));
                output.push(*next);
            }
            (false, false) => {}
        }
    }

    output.dedup();
    if output.len() > 1 && output.first() == output.last() {
        output.pop();
    }
    output
}

fn intersect(p: &GeoPoint, q: &GeoPoint, fp: f64, fq: f64) -> GeoPoint {
    let t = fp / (fp - fq);
    GeoPoint::new_unchecked(p.lat + t * (q.lat - p.lat), p.lng + t * (q.lng - p.lng))
}
