pub mod filter;
pub mod grid;
pub mod loader;
pub mod unify;

pub use filter::{PointFilter, boundary_vertices};
pub use grid::{GridBounds, GridIterator};
pub use loader::load_polygons;
pub use unify::unify;
