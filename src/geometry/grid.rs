use geo::{BoundingRect, Coord, MultiPolygon};

use crate::error::{PipelineError, Result};

/// Axis-aligned bounding box of the unified shape, in degrees.
///
/// A multi-part shape gets one box spanning all parts; grids are not
/// generated per part.
#[derive(Debug, Clone)]
pub struct GridBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl GridBounds {
    pub fn of(shape: &MultiPolygon<f64>) -> Option<Self> {
        let rect = shape.bounding_rect()?;
        Some(Self {
            min_x: rect.min().x,
            min_y: rect.min().y,
            max_x: rect.max().x,
            max_y: rect.max().y,
        })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Lazy, finite iterator over candidate grid points covering a bounding
/// box.
///
/// The lattice is aligned to the box's minimum corner and steps by
/// `spacing` in both axes, up to and including the maximum corner. Points
/// come out row-major: every longitude at a given latitude before the next
/// latitude, ascending in both axes. Each coordinate is computed as
/// `min + index * spacing` so repeated iteration never accumulates
/// floating-point drift.
#[derive(Debug, Clone)]
pub struct GridIterator {
    min_x: f64,
    min_y: f64,
    spacing: f64,
    cols: u64,
    rows: u64,
    col: u64,
    row: u64,
}

impl GridIterator {
    pub fn new(bounds: &GridBounds, spacing: f64) -> Result<Self> {
        if !(spacing > 0.0) {
            return Err(PipelineError::InvalidSpacing(spacing));
        }

        Ok(Self {
            min_x: bounds.min_x,
            min_y: bounds.min_y,
            spacing,
            cols: steps(bounds.width(), spacing),
            rows: steps(bounds.height(), spacing),
            col: 0,
            row: 0,
        })
    }

    /// Total number of candidate points the iterator will yield.
    pub fn total(&self) -> u64 {
        self.cols * self.rows
    }
}

/// Lattice steps covering `span` inclusively. The epsilon admits the far
/// corner when the span is an exact multiple of the spacing up to float
/// representation error.
fn steps(span: f64, spacing: f64) -> u64 {
    (span / spacing + 1e-9).floor() as u64 + 1
}

impl Iterator for GridIterator {
    type Item = Coord<f64>;

    fn next(&mut self) -> Option<Coord<f64>> {
        if self.row >= self.rows {
            return None;
        }

        let point = Coord {
            x: self.min_x + self.col as f64 * self.spacing,
            y: self.min_y + self.row as f64 * self.spacing,
        };

        self.col += 1;
        if self.col == self.cols {
            self.col = 0;
            self.row += 1;
        }

        Some(point)
    }
}
