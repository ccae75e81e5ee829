//! Cheap geometric helpers over feature geometries: representative points
//! for labelling and markers, and hit tests for hover picking.
//!
//! All computations are planar in lon/lat degrees, which is accurate enough
//! at building scale.

use crate::features::{Geometry, LngLat};

/// A representative point for a geometry.
///
/// - polygons: the vertex average of the outer ring (closing vertex
///   included), not the area centroid
/// - multi-polygons: the same, on the first polygon
/// - lines: the middle vertex
/// - multi-lines: the middle vertex of the first line
/// - points: the point itself; multi-points: their average
///
/// `None` for empty geometries.
pub fn centroid(geometry: &Geometry) -> Option<LngLat> {
    match geometry {
        Geometry::Point(point) => Some(*point),
        Geometry::MultiPoint(points) => vertex_average(points),
        Geometry::LineString(line) => middle_vertex(line),
        Geometry::MultiLineString(lines) => lines.first().and_then(|line| middle_vertex(line)),
        Geometry::Polygon(rings) => rings.first().and_then(|ring| vertex_average(ring)),
        Geometry::MultiPolygon(polygons) => polygons
            .first()
            .and_then(|rings| rings.first())
            .and_then(|ring| vertex_average(ring)),
    }
}

fn vertex_average(points: &[LngLat]) -> Option<LngLat> {
    if points.is_empty() {
        return None;
    }
    let (lng, lat) = points
        .iter()
        .fold((0.0, 0.0), |(lng, lat), p| (lng + p.lng, lat + p.lat));
    let n = points.len() as f64;
    Some(LngLat::new(lng / n, lat / n))
}

fn middle_vertex(points: &[LngLat]) -> Option<LngLat> {
    points.get(points.len() / 2).copied()
}

/// Even-odd ray casting test against a single ring.
pub fn ring_contains(ring: &[LngLat], point: LngLat) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.lat > point.lat) != (b.lat > point.lat) {
            let cross_lng = (b.lng - a.lng) * (point.lat - a.lat) / (b.lat - a.lat) + a.lng;
            if point.lng < cross_lng {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Inside the outer ring and outside every hole.
pub fn polygon_contains(rings: &[Vec<LngLat>], point: LngLat) -> bool {
    let Some((outer, holes)) = rings.split_first() else {
        return false;
    };
    ring_contains(outer, point) && !holes.iter().any(|hole| ring_contains(hole, point))
}

/// Shortest planar distance from `point` to the segment `a`-`b`.
pub fn segment_distance(a: LngLat, b: LngLat, point: LngLat) -> f64 {
    let (dx, dy) = (b.lng - a.lng, b.lat - a.lat);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq > 0.0 {
        (((point.lng - a.lng) * dx + (point.lat - a.lat) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (px, py) = (a.lng + t * dx, a.lat + t * dy);
    ((point.lng - px).powi(2) + (point.lat - py).powi(2)).sqrt()
}

fn polyline_distance(line: &[LngLat], point: LngLat) -> Option<f64> {
    match line {
        [] => None,
        [only] => Some(segment_distance(*only, *only, point)),
        _ => line
            .windows(2)
            .map(|w| segment_distance(w[0], w[1], point))
            .min_by(f64::total_cmp),
    }
}

/// Whether `point` hits `geometry`. Areas are hit from inside; points and
/// lines within `tolerance` degrees.
pub fn hit_test(geometry: &Geometry, point: LngLat, tolerance: f64) -> bool {
    match geometry {
        Geometry::Polygon(rings) => polygon_contains(rings, point),
        Geometry::MultiPolygon(polygons) => polygons
            .iter()
            .any(|rings| polygon_contains(rings, point)),
        Geometry::LineString(line) => {
            polyline_distance(line, point).is_some_and(|d| d <= tolerance)
        }
        Geometry::MultiLineString(lines) => lines
            .iter()
            .filter_map(|line| polyline_distance(line, point))
            .any(|d| d <= tolerance),
        Geometry::Point(p) => segment_distance(*p, *p, point) <= tolerance,
        Geometry::MultiPoint(points) => points
            .iter()
            .any(|p| segment_distance(*p, *p, point) <= tolerance),
    }
}
