use geo::{MultiPolygon, Polygon, unary_union};

/// Union the input polygons into a single shape covering their combined
/// area. Disjoint inputs stay separate parts of the resulting
/// `MultiPolygon`; overlapping or touching inputs are merged.
///
/// Degenerate or self-intersecting inputs are handled by the boolean-ops
/// engine's own tolerance rules, not validated here.
pub fn unify(polygons: &[Polygon<f64>]) -> MultiPolygon<f64> {
    unary_union(polygons.iter())
}
