use geo::{Coord, Intersects, LineString, MultiPolygon, Point, Polygon};

/// Containment filter over the unified shape.
///
/// The predicate is boundary inclusive: a candidate exactly on an edge or
/// vertex of the shape is accepted, which is why `Intersects` is used
/// rather than `Contains`.
pub struct PointFilter<'a> {
    shape: &'a MultiPolygon<f64>,
}

impl<'a> PointFilter<'a> {
    pub fn new(shape: &'a MultiPolygon<f64>) -> Self {
        Self { shape }
    }

    pub fn accepts(&self, point: Coord<f64>) -> bool {
        self.shape.intersects(&Point::from(point))
    }
}

/// Vertices of every ring (exterior and holes) of the original input
/// polygons. These are emitted unconditionally so the output covers the
/// boundary even where the grid spacing steps over it.
///
/// The ring-closing repeat of the first vertex is skipped, so each ring
/// vertex appears once per ring. No deduplication is done against grid
/// points that happen to coincide.
pub fn boundary_vertices(polygons: &[Polygon<f64>]) -> Vec<Coord<f64>> {
    let mut vertices = Vec::new();

    for polygon in polygons {
        push_ring_vertices(polygon.exterior(), &mut vertices);
        for hole in polygon.interiors() {
            push_ring_vertices(hole, &mut vertices);
        }
    }

    vertices
}

fn push_ring_vertices(ring: &LineString<f64>, out: &mut Vec<Coord<f64>>) {
    let coords = &ring.0;
    let take = if ring.is_closed() && coords.len() > 1 {
        coords.len() - 1
    } else {
        coords.len()
    };
    out.extend_from_slice(&coords[..take]);
}
