//! Soil source data ingestion library.
//!
//! Converts gridded soil property sources into georeferenced rasters that
//! zonal statistics tools can average per basin.
//!
//! # Architecture
//!
//! - Flat binary grids (Dai et al. 2019): read, fill-value remap,
//!   downsampling and reorientation onto the global 5 arc-minute grid
//! - NetCDF variables (Shangguan et al. 2013): first layer of the named
//!   variable onto a caller-selected grid preset
//! - Batch driver: [`Ingester`] runs [`ConversionJob`]s through any
//!   [`RasterSink`](grid_processor::RasterSink), logging and skipping
//!   failed files
//!
//! SoilGrids250m sources are already GeoTIFFs and need no conversion.

pub mod binary;
pub mod config;
pub mod error;
mod ingester;
pub mod metadata;
pub mod netcdf;

// Re-exports
pub use binary::{
    convert_binary, decode_binary_grid, read_binary_grid, remap_min_sentinel, BinaryGridSpec,
};
pub use config::{grid_catalog_from_yaml, load_grid_catalog, ConversionConfig};
pub use error::{IngestionError, Result};
pub use ingester::{ConversionJob, Ingester, JobOutcome};
pub use metadata::{detect_source_format, raster_output_path, SourceFormat};
pub use netcdf::{convert_netcdf, select_first_layer};
