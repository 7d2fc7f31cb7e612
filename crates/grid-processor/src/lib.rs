//! Raster grid processing for converted soil data.
//!
//! This crate turns 2D arrays into georeferenced rasters. It provides:
//!
//! - **Downsampling**: integer-factor block reduction ([`downsample`])
//! - **Reorientation**: rotations and flips applied as view reversals
//!   ([`apply_orientation`])
//! - **Band statistics**: min/max/mean/std embedded as GDAL metadata
//!   ([`BandStatistics`])
//! - **GeoTIFF output**: single-band Float32, EPSG:4326, behind the
//!   [`RasterSink`] trait ([`GeoTiffWriter`]), and read-back
//!   ([`read_geotiff`])
//!
//! # Pipeline
//!
//! ```text
//! decoded array (f64)
//!      │
//!      ├─► downsample(factor, method)
//!      │
//!      ├─► apply_orientation(steps)
//!      │
//!      └─► RasterSink::write_raster(data, grid, path)
//!               │
//!               ├─► check shape against CoordinateGrid
//!               ├─► BandStatistics::compute
//!               └─► encode Float32 strip + GeoTIFF/GDAL tags
//! ```
//!
//! # Example
//!
//! ```ignore
//! use grid_processor::{GeoTiffWriter, GridProcessorConfig, RasterSink};
//! use soil_common::GridPreset;
//!
//! let writer = GeoTiffWriter::new(GridProcessorConfig::default());
//! writer.write_raster(data.view(), &GridPreset::Global5Arcmin.grid(), "SAND.tif".as_ref())?;
//! ```

pub mod config;
pub mod downsample;
pub mod error;
pub mod orient;
pub mod reader;
pub mod stats;
pub mod writer;

// Re-export commonly used types at crate root
pub use config::{GridProcessorConfig, RasterCompression};
pub use downsample::{downsample, DownsampleMethod};
pub use error::{GridProcessorError, Result};
pub use orient::{apply_orientation, OrientStep};
pub use reader::{read_geotiff, RasterData};
pub use stats::BandStatistics;
pub use writer::{GeoTiffWriter, RasterSink};
