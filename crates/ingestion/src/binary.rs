//! Flat binary grid decoding (Dai et al. 2019 soil hydraulic/thermal data).
//!
//! The source files are headerless row-major f64 arrays in native byte
//! order. Decoding remaps the fill value, downsamples and reorients the
//! array onto the target grid before it is handed to a [`RasterSink`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use grid_processor::{apply_orientation, downsample, DownsampleMethod, OrientStep, RasterSink};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use soil_common::{CoordinateGrid, GridPreset};
use tracing::{debug, info, warn};

use crate::error::{IngestionError, Result};

/// Layout of a flat binary grid and the steps that map it onto its target grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryGridSpec {
    /// Rows in the file
    pub height: usize,
    /// Columns in the file
    pub width: usize,
    /// Block size of the downsampling
    pub downsample_factor: usize,
    pub method: DownsampleMethod,
    /// Reorientation steps, applied in order after downsampling
    pub orientation: Vec<OrientStep>,
    /// Grid of the decoded (downsampled, reoriented) array
    pub grid: CoordinateGrid,
}

impl BinaryGridSpec {
    /// Dai et al. (2019) "Data for SoilGrids": 30 arc-second global grid,
    /// reduced 10x onto the global 5 arc-minute grid.
    pub fn dai_2019() -> Self {
        Self {
            height: 21600,
            width: 43200,
            downsample_factor: 10,
            method: DownsampleMethod::Mean,
            orientation: vec![OrientStep::Rotate180, OrientStep::FlipHorizontal],
            grid: GridPreset::Global5Arcmin.grid(),
        }
    }

    /// Size of a conforming file in bytes.
    pub fn expected_bytes(&self) -> u64 {
        (self.height * self.width * std::mem::size_of::<f64>()) as u64
    }
}

impl Default for BinaryGridSpec {
    fn default() -> Self {
        Self::dai_2019()
    }
}

/// Read a flat binary grid without any processing.
///
/// The file length is checked against the spec before anything is read,
/// and the values are read straight into the array's buffer.
///
/// # Errors
///
/// [`IngestionError::ShapeMismatch`] if the file size is not
/// `height * width * 8` bytes.
pub fn read_binary_grid(path: &Path, spec: &BinaryGridSpec) -> Result<Array2<f64>> {
    let file_error = |source: std::io::Error| IngestionError::FileRead {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(file_error)?;
    let actual = file.metadata().map_err(file_error)?.len();

    let expected = spec.expected_bytes();
    if actual != expected {
        return Err(IngestionError::ShapeMismatch {
            path: path.to_path_buf(),
            expected,
            actual,
            rows: spec.height,
            cols: spec.width,
        });
    }

    let mut values = vec![0.0f64; spec.height * spec.width];
    file.read_exact(bytemuck::cast_slice_mut(&mut values)).map_err(file_error)?;

    Array2::from_shape_vec((spec.height, spec.width), values).map_err(|_| {
        IngestionError::ShapeMismatch {
            path: path.to_path_buf(),
            expected,
            actual,
            rows: spec.height,
            cols: spec.width,
        }
    })
}

/// Replace every cell equal to the grid minimum with `missing_value`.
///
/// The source products mark no-data with their smallest value; the
/// minimum is taken over non-NaN cells, so a grid that mixes NaN with a
/// fill value still has its fill value remapped (a plain `min` over the
/// whole grid would be NaN and match nothing). Returns the value that was
/// replaced, or `None` if every cell is NaN.
pub fn remap_min_sentinel(data: &mut Array2<f64>, missing_value: f64) -> Option<f64> {
    let minimum = data
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.min(v))))?;

    data.mapv_inplace(|v| if v == minimum { missing_value } else { v });
    Some(minimum)
}

/// Decode a binary grid into an array aligned with `spec.grid`.
///
/// Steps: read, remap the minimum to `missing_value`, downsample,
/// reorient.
pub fn decode_binary_grid(
    path: &Path,
    spec: &BinaryGridSpec,
    missing_value: f64,
) -> Result<Array2<f64>> {
    let mut data = read_binary_grid(path, spec)?;

    match remap_min_sentinel(&mut data, missing_value) {
        Some(sentinel) => debug!(
            path = %path.display(),
            sentinel = sentinel,
            missing_value = missing_value,
            "Remapped minimum value to missing value"
        ),
        None => warn!(path = %path.display(), "Binary grid contains only NaN"),
    }

    let reduced = downsample(data.view(), spec.downsample_factor, spec.method)?;
    drop(data);

    debug!(
        path = %path.display(),
        rows = reduced.nrows(),
        cols = reduced.ncols(),
        factor = spec.downsample_factor,
        "Downsampled binary grid"
    );

    Ok(apply_orientation(reduced.view(), &spec.orientation))
}

/// Convert a binary grid file to a raster written through `sink`.
pub fn convert_binary<S: RasterSink + ?Sized>(
    sink: &S,
    input: &Path,
    output: &Path,
    spec: &BinaryGridSpec,
    missing_value: f64,
) -> Result<()> {
    info!(
        input = %input.display(),
        output = %output.display(),
        rows = spec.height,
        cols = spec.width,
        "Converting binary grid"
    );

    let data = decode_binary_grid(input, spec, missing_value)?;
    sink.write_raster(data.view(), &spec.grid, output)?;

    info!(output = %output.display(), "Binary grid converted");
    Ok(())
}
