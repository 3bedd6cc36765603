use indicatif::{ProgressBar, ProgressStyle};

use crate::config::RunConfig;
use crate::error::{PipelineError, Result};
use crate::geometry::{GridBounds, GridIterator, PointFilter, boundary_vertices, load_polygons, unify};
use crate::output::CsvBatchWriter;

/// Counters reported after a completed run.
#[derive(Debug)]
pub struct RunSummary {
    pub polygons: usize,
    pub candidates: u64,
    pub accepted: u64,
    pub boundary: u64,
    pub rows_written: u64,
}

/// Run the full pipeline: load polygons, union them, walk the candidate
/// grid over the union's bounding box, and write every accepted point plus
/// the input polygons' boundary vertices to `<output>/points.csv`.
///
/// Configuration is validated before any file is touched, so an invalid
/// spacing never creates the output directory.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    config.validate()?;

    let polygons = load_polygons(&config.input_file)?;
    let unified = unify(&polygons);

    let bounds = GridBounds::of(&unified).ok_or_else(|| PipelineError::EmptyInput {
        path: config.input_file.clone(),
    })?;
    let grid = GridIterator::new(&bounds, config.spacing)?;

    if config.verbose {
        println!(
            "  {} polygons, bounding box {:.4} x {:.4} degrees, {} candidates",
            polygons.len(),
            bounds.width(),
            bounds.height(),
            grid.total()
        );
    }

    let filter = PointFilter::new(&unified);
    let mut writer = CsvBatchWriter::create(&config.output_dir, config.batch_size)?;

    let progress = create_progress_bar(grid.total());
    let candidates = grid.total();
    let mut accepted = 0u64;

    for candidate in grid {
        if filter.accepts(candidate) {
            writer.push(candidate)?;
            accepted += 1;
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    let vertices = boundary_vertices(&polygons);
    for &vertex in &vertices {
        writer.push(vertex)?;
    }

    let rows_written = writer.finish()?;

    Ok(RunSummary {
        polygons: polygons.len(),
        candidates,
        accepted,
        boundary: vertices.len() as u64,
        rows_written,
    })
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} candidates ({eta})",
        )
        .unwrap()
        .progress_chars("#>-"),
    );
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::{NamedTempFile, tempdir};

    const SQUARE: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0,0.0],[0.0,1.0],[1.0,1.0],[1.0,0.0],[0.0,0.0]]]
            }
        }]
    }"#;

    fn square_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SQUARE.as_bytes()).unwrap();
        file
    }

    fn config(input: PathBuf, output: PathBuf, spacing: f64) -> RunConfig {
        RunConfig {
            input_file: input,
            output_dir: output,
            spacing,
            batch_size: 10_000,
            verbose: false,
        }
    }

    #[test]
    fn test_unit_square_half_spacing() {
        let input = square_file();
        let dir = tempdir().unwrap();
        let config = config(input.path().into(), dir.path().join("out"), 0.5);

        let summary = run(&config).unwrap();

        // convex square: all 9 candidates pass, plus the 4 ring vertices
        assert_eq!(summary.polygons, 1);
        assert_eq!(summary.candidates, 9);
        assert_eq!(summary.accepted, 9);
        assert_eq!(summary.boundary, 4);
        assert_eq!(summary.rows_written, 13);

        let contents = fs::read_to_string(config.output_file()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 14);
        assert_eq!(lines[0], "longitude,latitude");
        assert_eq!(lines[1], "0.0,0.0");
        assert_eq!(lines[5], "0.5,0.5");
    }

    #[test]
    fn test_accepted_points_lie_inside_the_shape() {
        use geo::{Intersects, Point, polygon};

        let input = square_file();
        let dir = tempdir().unwrap();
        let config = config(input.path().into(), dir.path().join("out"), 0.3);
        run(&config).unwrap();

        let shape = polygon![
            (x: 0.0, y: 0.0),
            (x: 0.0, y: 1.0),
            (x: 1.0, y: 1.0),
            (x: 1.0, y: 0.0),
            (x: 0.0, y: 0.0),
        ];

        let mut reader = csv::Reader::from_path(config.output_file()).unwrap();
        for record in reader.deserialize() {
            let (lon, lat): (f64, f64) = record.unwrap();
            assert!(shape.intersects(&Point::new(lon, lat)), "({lon}, {lat}) outside");
        }
    }

    #[test]
    fn test_boundary_vertices_present_even_with_coarse_spacing() {
        let input = square_file();
        let dir = tempdir().unwrap();
        // spacing wider than the square: only the min corner is a candidate
        let config = config(input.path().into(), dir.path().join("out"), 5.0);

        let summary = run(&config).unwrap();
        assert_eq!(summary.candidates, 1);
        assert_eq!(summary.boundary, 4);

        let contents = fs::read_to_string(config.output_file()).unwrap();
        assert!(contents.contains("1.0,1.0"));
        assert!(contents.contains("0.0,1.0"));
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let input = square_file();
        let dir = tempdir().unwrap();
        let config = config(input.path().into(), dir.path().join("out"), 0.25);

        run(&config).unwrap();
        let first = fs::read(config.output_file()).unwrap();
        run(&config).unwrap();
        let second = fs::read(config.output_file()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_batch_size_is_transparent() {
        let input = square_file();

        let dir_small = tempdir().unwrap();
        let mut config_small = config(input.path().into(), dir_small.path().join("out"), 0.2);
        config_small.batch_size = 1;
        run(&config_small).unwrap();

        let dir_large = tempdir().unwrap();
        let config_large = config(input.path().into(), dir_large.path().join("out"), 0.2);
        run(&config_large).unwrap();

        let small = fs::read_to_string(config_small.output_file()).unwrap();
        let large = fs::read_to_string(config_large.output_file()).unwrap();
        assert_eq!(small, large);
    }

    #[test]
    fn test_invalid_spacing_fails_before_any_io() {
        let input = square_file();
        let dir = tempdir().unwrap();
        let out = dir.path().join("never_created");
        let config = config(input.path().into(), out.clone(), 0.0);

        let err = run(&config).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidSpacing(_)));
        assert!(!out.exists());
    }

    #[test]
    fn test_disjoint_polygons_share_one_bounding_box() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"{
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[0.0,0.0],[0.0,1.0],[1.0,1.0],[1.0,0.0],[0.0,0.0]]],
                        [[[4.0,4.0],[4.0,5.0],[5.0,5.0],[5.0,4.0],[4.0,4.0]]]
                    ]
                }
            }"#,
        )
        .unwrap();

        let dir = tempdir().unwrap();
        let config = config(file.path().into(), dir.path().join("out"), 1.0);
        let summary = run(&config).unwrap();

        // 6x6 lattice over the combined box, 4 corner points per square pass
        assert_eq!(summary.polygons, 2);
        assert_eq!(summary.candidates, 36);
        assert_eq!(summary.accepted, 8);
        assert_eq!(summary.boundary, 8);
    }
}
