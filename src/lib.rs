//! geogrid - Sample GeoJSON polygon interiors on a regular grid and export
//! the points as CSV

pub mod config;
pub mod error;
pub mod geometry;
pub mod output;
pub mod pipeline;
