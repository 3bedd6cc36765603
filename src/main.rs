use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

mod config;
mod error;
mod geometry;
mod output;
mod pipeline;

use config::{DEFAULT_BATCH_SIZE, DEFAULT_OUTPUT_DIR, DEFAULT_SPACING, FileConfig, RunConfig};

/// Sample GeoJSON polygon interiors on a regular grid and export the
/// points as CSV
///
/// Examples:
///   # Grid the polygons in a country outline at the default 0.02 degree spacing
///   geogrid --input_file oman.geojson
///
///   # Denser grid into a custom output directory
///   geogrid --input_file coastline.geojson --output ./out --spacing 0.005
///
///   # Small batches for memory-constrained runs
///   geogrid --input_file area.geojson --batch_size 500
///
///   # Use a config file
///   geogrid --config my-settings.toml
#[derive(Parser, Debug)]
#[command(name = "geogrid")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches geogrid.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the input GeoJSON file
    #[arg(long = "input_file")]
    input_file: Option<PathBuf>,

    /// Output directory for points.csv
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Grid spacing in degrees
    #[arg(long, default_value_t = DEFAULT_SPACING)]
    spacing: f64,

    /// Number of accepted points buffered between CSV writes
    #[arg(long = "batch_size", default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };

    let input_file = args
        .input_file
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.input_file.clone()));
    let output = if args.output != PathBuf::from(DEFAULT_OUTPUT_DIR) {
        args.output.clone()
    } else {
        file_config
            .as_ref()
            .and_then(|c| c.output.clone())
            .unwrap_or(args.output.clone())
    };
    let spacing = if (args.spacing - DEFAULT_SPACING).abs() > f64::EPSILON {
        args.spacing
    } else {
        file_config
            .as_ref()
            .map(|c| c.spacing)
            .unwrap_or(DEFAULT_SPACING)
    };
    let batch_size = if args.batch_size != DEFAULT_BATCH_SIZE {
        args.batch_size
    } else {
        file_config
            .as_ref()
            .map(|c| c.batch_size)
            .unwrap_or(DEFAULT_BATCH_SIZE)
    };
    let verbose = args.verbose || file_config.as_ref().map(|c| c.verbose).unwrap_or(false);

    let Some(input_file) = input_file else {
        bail!("Must provide --input_file (or input_file in a config file)");
    };
    if batch_size == 0 {
        bail!("--batch_size must be a positive integer");
    }

    let run_config = RunConfig {
        input_file,
        output_dir: output,
        spacing,
        batch_size,
        verbose,
    };

    println!("geogrid - GeoJSON Grid Point Sampler");
    println!("====================================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Input: {}", run_config.input_file.display());
        println!("  Output: {}", run_config.output_file().display());
        println!("  Spacing: {} degrees", run_config.spacing);
        println!("  Batch size: {}", run_config.batch_size);
        println!();
    }

    let summary = pipeline::run(&run_config).context("Failed to process GeoJSON")?;

    println!(
        "Accepted {} of {} candidate points across {} polygons",
        summary.accepted, summary.candidates, summary.polygons
    );
    println!(
        "Wrote {} rows ({} grid + {} boundary) to {}",
        summary.rows_written,
        summary.accepted,
        summary.boundary,
        run_config.output_file().display()
    );
    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );

    Ok(())
}
