use geo::{Coord, LineString, Polygon};
use geojson::{GeoJson, Geometry, PolygonType, Value};
use std::path::Path;

use crate::error::{PipelineError, Result};

/// Read a GeoJSON file and extract every polygon feature as a
/// `geo::Polygon`.
///
/// Polygons are collected from Polygon and MultiPolygon geometries, at the
/// top level or inside Feature/FeatureCollection/GeometryCollection
/// wrappers. Each MultiPolygon member becomes its own polygon. The first
/// ring of each polygon is the exterior, any further rings are holes.
///
/// # Errors
/// * `Parse` if the file is absent, unreadable, or not valid GeoJSON
/// * `EmptyInput` if no polygon features are found
pub fn load_polygons(path: &Path) -> Result<Vec<Polygon<f64>>> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| PipelineError::parse(path, e))?;

    let geojson: GeoJson = contents
        .parse()
        .map_err(|e: geojson::Error| PipelineError::parse(path, e))?;

    let geometries = match geojson {
        GeoJson::FeatureCollection(fc) => {
            fc.features.into_iter().filter_map(|f| f.geometry).collect()
        }
        GeoJson::Feature(f) => f.geometry.map(|g| vec![g]).unwrap_or_default(),
        GeoJson::Geometry(g) => vec![g],
    };

    let polygons = only_polygons(geometries)
        .into_iter()
        .map(|rings| polygon_from_rings(rings, path))
        .collect::<Result<Vec<_>>>()?;

    if polygons.is_empty() {
        return Err(PipelineError::EmptyInput { path: path.into() });
    }

    Ok(polygons)
}

/// Flatten geometries down to raw polygon ring sets, one entry per polygon.
fn only_polygons(geometries: Vec<Geometry>) -> Vec<PolygonType> {
    geometries
        .into_iter()
        .filter_map(|g| match g.value {
            Value::Polygon(p) => Some(vec![p]),
            Value::MultiPolygon(mp) => Some(mp),
            Value::GeometryCollection(gc) => Some(only_polygons(gc)),
            _ => None,
        })
        .flatten()
        .collect()
}

fn polygon_from_rings(mut rings: PolygonType, path: &Path) -> Result<Polygon<f64>> {
    if rings.is_empty() {
        return Err(PipelineError::parse(path, "polygon has no rings"));
    }

    let exterior = ring_to_line_string(rings.remove(0), path)?;
    let holes = rings
        .into_iter()
        .map(|r| ring_to_line_string(r, path))
        .collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(exterior, holes))
}

fn ring_to_line_string(ring: Vec<Vec<f64>>, path: &Path) -> Result<LineString<f64>> {
    let coords = ring
        .into_iter()
        .map(|position| {
            // GeoJSON positions are [lon, lat, ...]; altitude is ignored
            if position.len() < 2 {
                return Err(PipelineError::parse(
                    path,
                    "ring position has fewer than 2 coordinates",
                ));
            }
            Ok(Coord {
                x: position[0],
                y: position[1],
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if coords.len() < 4 {
        return Err(PipelineError::parse(
            path,
            "ring has fewer than 4 positions",
        ));
    }

    Ok(LineString::new(coords))
}
