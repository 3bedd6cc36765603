use geo::Coord;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::config::OUTPUT_FILE_NAME;
use crate::error::{PipelineError, Result};

/// Batched CSV writer for accepted grid points.
///
/// Rows accumulate in memory and are appended to `<output_dir>/points.csv`
/// whenever the batch reaches `batch_size`; `finish` flushes the partial
/// batch and closes the file. The file is created fresh on every run with
/// a `longitude,latitude` header, so a re-run overwrites the previous
/// output.
#[derive(Debug)]
pub struct CsvBatchWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
    batch: Vec<Coord<f64>>,
    batch_size: usize,
    rows_written: u64,
}

impl CsvBatchWriter {
    /// Create the output directory (if needed) and the CSV file, and write
    /// the header row.
    pub fn create(output_dir: &Path, batch_size: usize) -> Result<Self> {
        fs::create_dir_all(output_dir).map_err(|e| PipelineError::io(output_dir, e))?;

        let path = output_dir.join(OUTPUT_FILE_NAME);
        let file = File::create(&path).map_err(|e| PipelineError::io(&path, e))?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(["longitude", "latitude"])?;
        // the header must be on disk before the first batch fills
        writer.flush().map_err(|e| PipelineError::io(&path, e))?;

        Ok(Self {
            writer,
            path,
            batch: Vec::with_capacity(batch_size),
            batch_size: batch_size.max(1),
            rows_written: 0,
        })
    }

    /// Buffer one accepted point, flushing the batch once it is full.
    pub fn push(&mut self, point: Coord<f64>) -> Result<()> {
        self.batch.push(point);
        if self.batch.len() >= self.batch_size {
            self.flush_batch()?;
        }
        Ok(())
    }

    fn flush_batch(&mut self) -> Result<()> {
        for point in self.batch.drain(..) {
            self.writer.serialize((point.x, point.y))?;
            self.rows_written += 1;
        }
        self.writer
            .flush()
            .map_err(|e| PipelineError::io(&self.path, e))?;
        Ok(())
    }

    /// Flush the remaining partial batch and close the file. Returns the
    /// total number of rows written (header excluded).
    pub fn finish(mut self) -> Result<u64> {
        self.flush_batch()?;
        Ok(self.rows_written)
    }
}
