//! Single-band Float32 GeoTIFF writer.
//!
//! Writes geographic (EPSG:4326) rasters with the georeferencing tags GDAL
//! understands, plus band statistics in the `GDAL_METADATA` tag so that
//! downstream tools need not rescan the data.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use ndarray::ArrayView2;
use soil_common::CoordinateGrid;
use tiff::encoder::colortype::Gray32Float;
use tiff::encoder::{Compression, DeflateLevel, DirectoryEncoder, TiffEncoder, TiffKind};
use tiff::tags::Tag;
use tiff::TiffError;
use tracing::{debug, info};

use super::RasterSink;
use crate::config::{GridProcessorConfig, RasterCompression};
use crate::error::{GridProcessorError, Result};
use crate::stats::BandStatistics;

// GeoTIFF Tag IDs (not in standard tiff crate)
pub(crate) const GEOTIFF_MODELPIXELSCALE: u16 = 33550;
pub(crate) const GEOTIFF_MODELTIEPOINT: u16 = 33922;
pub(crate) const GEOTIFF_MODELTRANSFORMATION: u16 = 34264;
const GEOTIFF_GEOKEYDIRECTORY: u16 = 34735;
const GEOTIFF_GEOASCIIPARAMS: u16 = 34737;

/// GDAL private tag holding the metadata XML document.
pub const GDAL_METADATA_TAG: u16 = 42112;
/// GDAL private tag holding the nodata value as ASCII.
pub const GDAL_NODATA_TAG: u16 = 42113;

// GeoKey IDs
const GT_MODEL_TYPE_GEO_KEY: u16 = 1024;
const GT_RASTER_TYPE_GEO_KEY: u16 = 1025;
const GEOGRAPHIC_TYPE_GEO_KEY: u16 = 2048;
const GEOG_CITATION_GEO_KEY: u16 = 2049;

// GeoKey values
const MODEL_TYPE_GEOGRAPHIC: u16 = 2;
const RASTER_PIXEL_IS_AREA: u16 = 1;

/// GeoTIFF implementation of [`RasterSink`].
///
/// Holds no file handle between calls; each write opens, encodes and
/// closes its own file.
#[derive(Debug, Clone, Default)]
pub struct GeoTiffWriter {
    config: GridProcessorConfig,
}

impl GeoTiffWriter {
    /// Create a new writer with the given configuration.
    pub fn new(config: GridProcessorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GridProcessorConfig {
        &self.config
    }

    fn compression(&self) -> Compression {
        match self.config.compression {
            RasterCompression::None => Compression::Uncompressed,
            RasterCompression::Lzw => Compression::Lzw,
            RasterCompression::Deflate => Compression::Deflate(DeflateLevel::Fast),
        }
    }

    fn encode<W: Write + Seek>(
        &self,
        writer: W,
        pixels: &[f32],
        grid: &CoordinateGrid,
        statistics: &BandStatistics,
    ) -> std::result::Result<(), TiffError> {
        let mut encoder = TiffEncoder::new(writer)?.with_compression(self.compression());
        let mut image = encoder.new_image::<Gray32Float>(grid.cols as u32, grid.rows as u32)?;

        write_geotiff_tags(image.encoder(), grid)?;

        let metadata = statistics.to_gdal_metadata();
        image
            .encoder()
            .write_tag(Tag::Unknown(GDAL_METADATA_TAG), metadata.as_str())?;

        if let Some(nodata) = self.config.nodata {
            let nodata = nodata.to_string();
            image
                .encoder()
                .write_tag(Tag::Unknown(GDAL_NODATA_TAG), nodata.as_str())?;
        }

        image.write_data(pixels)?;
        Ok(())
    }
}

impl RasterSink for GeoTiffWriter {
    fn write_raster(&self, data: ArrayView2<f64>, grid: &CoordinateGrid, path: &Path) -> Result<()> {
        let (rows, cols) = data.dim();
        grid.check_shape(rows, cols)?;

        let statistics = BandStatistics::compute(data);
        debug!(
            path = %path.display(),
            min = statistics.minimum,
            max = statistics.maximum,
            mean = statistics.mean,
            std_dev = statistics.std_dev,
            "Computed band statistics"
        );

        // Iteration is in logical (row-major) order regardless of memory layout
        let pixels: Vec<f32> = data.iter().map(|&v| v as f32).collect();

        let file = File::create(path).map_err(|e| GridProcessorError::write_failed(path, e))?;
        let mut writer = BufWriter::new(file);
        self.encode(&mut writer, &pixels, grid, &statistics)
            .map_err(|e| GridProcessorError::write_failed(path, e))?;
        writer
            .flush()
            .map_err(|e| GridProcessorError::write_failed(path, e))?;

        info!(
            path = %path.display(),
            rows = rows,
            cols = cols,
            crs = %grid.crs,
            compression = %self.config.compression,
            "Wrote GeoTIFF"
        );

        Ok(())
    }
}

fn write_geotiff_tags<W: Write + Seek, K: TiffKind>(
    dir: &mut DirectoryEncoder<W, K>,
    grid: &CoordinateGrid,
) -> std::result::Result<(), TiffError> {
    if grid.is_north_up() {
        // ModelPixelScale: [ScaleX, ScaleY, ScaleZ], ScaleY positive for north-up
        let pixel_scale = [grid.cell_size_x, -grid.cell_size_y, 0.0];
        dir.write_tag(Tag::Unknown(GEOTIFF_MODELPIXELSCALE), pixel_scale.as_slice())?;

        // ModelTiepoint: [I, J, K, X, Y, Z], pixel (0, 0) to the grid origin
        let tiepoint = [0.0, 0.0, 0.0, grid.origin_x, grid.origin_y, 0.0];
        dir.write_tag(Tag::Unknown(GEOTIFF_MODELTIEPOINT), tiepoint.as_slice())?;
    } else {
        // Rows run south to north; only the full matrix expresses a positive yres
        let transformation = model_transformation(grid);
        dir.write_tag(
            Tag::Unknown(GEOTIFF_MODELTRANSFORMATION),
            transformation.as_slice(),
        )?;
    }

    let citation = format!("{}|", grid.crs.citation());
    let geokeys = build_geokey_directory(grid, citation.len() as u16);
    dir.write_tag(Tag::Unknown(GEOTIFF_GEOKEYDIRECTORY), geokeys.as_slice())?;
    dir.write_tag(Tag::Unknown(GEOTIFF_GEOASCIIPARAMS), citation.as_str())?;

    Ok(())
}

/// 4x4 row-major ModelTransformation matrix of the grid's affine transform.
fn model_transformation(grid: &CoordinateGrid) -> [f64; 16] {
    let [ulx, xres, rot_x, uly, rot_y, yres] = grid.geo_transform();
    [
        xres, rot_x, 0.0, ulx, //
        rot_y, yres, 0.0, uly, //
        0.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]
}

fn build_geokey_directory(grid: &CoordinateGrid, citation_len: u16) -> Vec<u16> {
    // GeoKeyDirectory structure:
    // [KeyDirectoryVersion, KeyRevision, MinorRevision, NumberOfKeys,
    //  KeyID1, TIFFTagLocation1, Count1, Value_Offset1, ...]
    // Keys must be sorted by ID.
    vec![
        1, 1, 0, 4, //
        GT_MODEL_TYPE_GEO_KEY, 0, 1, MODEL_TYPE_GEOGRAPHIC, //
        GT_RASTER_TYPE_GEO_KEY, 0, 1, RASTER_PIXEL_IS_AREA, //
        GEOGRAPHIC_TYPE_GEO_KEY, 0, 1, grid.crs.epsg(), //
        GEOG_CITATION_GEO_KEY, GEOTIFF_GEOASCIIPARAMS, citation_len, 0,
    ]
}
