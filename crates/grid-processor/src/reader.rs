//! GeoTIFF read-back.
//!
//! Reads rasters produced by [`GeoTiffWriter`](crate::GeoTiffWriter):
//! single-band Float32 with either tiepoint + pixel scale or a full
//! transformation matrix.

use std::fs::File;
use std::path::Path;

use ndarray::Array2;
use soil_common::CoordinateGrid;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tracing::debug;

use crate::error::{GridProcessorError, Result};
use crate::stats::BandStatistics;
use crate::writer::geotiff_writer::{
    GEOTIFF_MODELPIXELSCALE, GEOTIFF_MODELTIEPOINT, GEOTIFF_MODELTRANSFORMATION,
};
use crate::writer::{GDAL_METADATA_TAG, GDAL_NODATA_TAG};

/// A raster read back from disk.
#[derive(Debug, Clone)]
pub struct RasterData {
    /// Band values, rows x cols
    pub data: Array2<f64>,
    /// Grid reconstructed from the georeferencing tags
    pub grid: CoordinateGrid,
    /// Statistics from the `GDAL_METADATA` tag, if present
    pub statistics: Option<BandStatistics>,
    /// Value of the `GDAL_NODATA` tag, if present
    pub nodata: Option<f64>,
}

/// Read a single-band Float32 GeoTIFF.
///
/// # Errors
///
/// - [`GridProcessorError::ReadFailed`] if the file cannot be opened or decoded
/// - [`GridProcessorError::InvalidMetadata`] if georeferencing tags are missing
/// - [`GridProcessorError::UnsupportedDataType`] for non-Float32 samples
pub fn read_geotiff<P: AsRef<Path>>(path: P) -> Result<RasterData> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| GridProcessorError::read_failed(path, e))?;
    let mut decoder = Decoder::new(file).map_err(|e| GridProcessorError::read_failed(path, e))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| GridProcessorError::read_failed(path, e))?;
    let (rows, cols) = (height as usize, width as usize);

    let grid = read_grid(&mut decoder, rows, cols)?;

    let statistics = match read_ascii_tag(&mut decoder, GDAL_METADATA_TAG) {
        Some(xml) => Some(BandStatistics::from_gdal_metadata(&xml)?),
        None => None,
    };

    let nodata = read_ascii_tag(&mut decoder, GDAL_NODATA_TAG)
        .and_then(|value| value.trim().parse::<f64>().ok());

    let values = match decoder
        .read_image()
        .map_err(|e| GridProcessorError::read_failed(path, e))?
    {
        DecodingResult::F32(values) => values,
        _ => {
            return Err(GridProcessorError::UnsupportedDataType(format!(
                "{}: expected Float32 samples",
                path.display()
            )))
        }
    };

    let data = Array2::from_shape_vec((rows, cols), values.into_iter().map(f64::from).collect())
        .map_err(|e| GridProcessorError::read_failed(path, e))?;

    debug!(
        path = %path.display(),
        rows = rows,
        cols = cols,
        has_statistics = statistics.is_some(),
        "Read GeoTIFF"
    );

    Ok(RasterData {
        data,
        grid,
        statistics,
        nodata,
    })
}

fn read_grid<R: std::io::Read + std::io::Seek>(
    decoder: &mut Decoder<R>,
    rows: usize,
    cols: usize,
) -> Result<CoordinateGrid> {
    if let Ok(m) = decoder.get_tag_f64_vec(Tag::Unknown(GEOTIFF_MODELTRANSFORMATION)) {
        if m.len() < 16 {
            return Err(GridProcessorError::invalid_metadata(format!(
                "ModelTransformation has {} values, expected 16",
                m.len()
            )));
        }
        if m[1] != 0.0 || m[4] != 0.0 {
            return Err(GridProcessorError::invalid_metadata(
                "rotated rasters are not supported",
            ));
        }
        return Ok(CoordinateGrid::new(m[3], m[7], m[0], m[5], rows, cols));
    }

    let pixel_scale = decoder.get_tag_f64_vec(Tag::Unknown(GEOTIFF_MODELPIXELSCALE)).ok();
    let tiepoint = decoder.get_tag_f64_vec(Tag::Unknown(GEOTIFF_MODELTIEPOINT)).ok();

    match (pixel_scale, tiepoint) {
        // ModelTiepoint format: [I, J, K, X, Y, Z]
        // ModelPixelScale format: [ScaleX, ScaleY, ScaleZ]
        (Some(scale), Some(tp)) if scale.len() >= 2 && tp.len() >= 6 => {
            let origin_x = tp[3] - tp[0] * scale[0];
            let origin_y = tp[4] + tp[1] * scale[1];
            Ok(CoordinateGrid::new(origin_x, origin_y, scale[0], -scale[1], rows, cols))
        }
        _ => Err(GridProcessorError::invalid_metadata(
            "no ModelTransformation or ModelTiepoint/ModelPixelScale tags",
        )),
    }
}

fn read_ascii_tag<R: std::io::Read + std::io::Seek>(
    decoder: &mut Decoder<R>,
    tag: u16,
) -> Option<String> {
    decoder
        .get_tag_ascii_string(Tag::Unknown(tag))
        .ok()
        .map(|s| s.trim_end_matches('\0').to_string())
}
