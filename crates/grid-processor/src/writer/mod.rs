//! Raster writers.
//!
//! Conversion code writes through the [`RasterSink`] trait so that the
//! output format (and, in tests, the destination) can be swapped out.

pub(crate) mod geotiff_writer;

use std::path::Path;

use ndarray::ArrayView2;
use soil_common::CoordinateGrid;

use crate::error::Result;

pub use geotiff_writer::{GeoTiffWriter, GDAL_METADATA_TAG, GDAL_NODATA_TAG};

/// Destination for a georeferenced 2D array.
pub trait RasterSink {
    /// Write `data` onto `grid` at `path`, replacing any existing file.
    ///
    /// Implementations must reject arrays whose shape differs from the grid.
    fn write_raster(&self, data: ArrayView2<f64>, grid: &CoordinateGrid, path: &Path) -> Result<()>;
}

impl<T: RasterSink + ?Sized> RasterSink for &T {
    fn write_raster(&self, data: ArrayView2<f64>, grid: &CoordinateGrid, path: &Path) -> Result<()> {
        (**self).write_raster(data, grid, path)
    }
}
