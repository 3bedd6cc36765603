use std::path::PathBuf;
use thiserror::Error;

/// Fatal pipeline failures. There is no retry path; `main` reports the
/// message and exits non-zero. Batches flushed before the failure stay on
/// disk.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to parse GeoJSON from {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("no polygon features found in {path}")]
    EmptyInput { path: PathBuf },

    #[error("grid spacing must be a positive number, got {0}")]
    InvalidSpacing(f64),

    #[error("failed to write output to {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV row")]
    Csv(#[from] csv::Error),
}

impl PipelineError {
    pub fn parse(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
