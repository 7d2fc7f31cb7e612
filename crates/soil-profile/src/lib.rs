//! Depth-profile aggregation of per-basin soil attributes.
//!
//! Zonal statistics over the SoilGrids-style rasters produce one column per
//! property and depth layer (`CLYPPT_sl1` .. `CLYPPT_sl7`). This crate
//! parses those names into [`LayerKey`]s and collapses each property's
//! seven layers into a single thickness-weighted mean over 0-200 cm.
//!
//! ```ignore
//! use soil_profile::{aggregate_depth_profiles, AttributeTable};
//!
//! let table = AttributeTable::from_csv_path(Path::new("basins_soil.csv"), Some("basin_id"))?;
//! let aggregated = aggregate_depth_profiles(&table)?;
//! aggregated.to_csv_path(Path::new("basins_soil_mean.csv"))?;
//! ```

pub mod aggregate;
pub mod depth;
pub mod error;
pub mod layer;
pub mod table;

pub use aggregate::{aggregate_csv, aggregate_depth_profiles, find_depth_profiles, DepthProfile};
pub use depth::{
    depth_weighted_mean, interval_thicknesses, SoilLayer, DEPTH_BOUNDARIES_CM, TOTAL_DEPTH_CM,
};
pub use error::{ProfileError, Result};
pub use layer::LayerKey;
pub use table::{AttributeTable, Column, IndexColumn};
