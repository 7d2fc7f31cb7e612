//! Common types shared across the catchment soil workspace.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod grid;

pub use bbox::BoundingBox;
pub use crs::CrsCode;
pub use error::{SoilCommonError, SoilCommonResult};
pub use grid::{CoordinateGrid, GridCatalog, GridPreset};

/// Missing-value code written into converted rasters.
pub const MISSING_VALUE: f64 = -9999.0;
