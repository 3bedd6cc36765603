use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{PipelineError, Result};

pub const DEFAULT_SPACING: f64 = 0.02;
pub const DEFAULT_BATCH_SIZE: usize = 10_000;
pub const DEFAULT_OUTPUT_DIR: &str = "../data";
pub const OUTPUT_FILE_NAME: &str = "points.csv";

/// Resolved configuration for a single run. Built once in `main` from CLI
/// flags merged over the optional config file, then passed by reference to
/// the pipeline entry point.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Path to the input GeoJSON file
    pub input_file: PathBuf,
    /// Directory the output CSV is written into
    pub output_dir: PathBuf,
    /// Grid spacing in degrees, both axes
    pub spacing: f64,
    /// Accepted points buffered between CSV flushes
    pub batch_size: usize,
    pub verbose: bool,
}

impl RunConfig {
    /// Validate before any file I/O happens.
    pub fn validate(&self) -> Result<()> {
        if !(self.spacing > 0.0) {
            return Err(PipelineError::InvalidSpacing(self.spacing));
        }
        Ok(())
    }

    pub fn output_file(&self) -> PathBuf {
        self.output_dir.join(OUTPUT_FILE_NAME)
    }
}

fn default_spacing() -> f64 {
    DEFAULT_SPACING
}
fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub input_file: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default = "default_spacing")]
    pub spacing: f64,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl FileConfig {
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("geogrid.toml"));
    paths.push(PathBuf::from(".geogrid.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("geogrid").join("config.toml"));
        paths.push(config_dir.join("geogrid.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".geogrid.toml"));
        paths.push(home.join(".config").join("geogrid").join("config.toml"));
    }

    paths
}
