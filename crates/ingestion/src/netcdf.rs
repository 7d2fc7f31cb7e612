//! NetCDF variable to raster conversion (Shangguan et al. 2013 China soil data).

use std::path::Path;

use grid_processor::RasterSink;
use ndarray::{Array2, Axis, Ix2};
use netcdf_parser::{read_variable, SourceVariable};
use soil_common::CoordinateGrid;
use tracing::{debug, info};

use crate::error::{IngestionError, Result};

/// Reduce a variable to the 2D array that gets written.
///
/// 2D variables are used as is. For 3D variables only the first slice of
/// the leading axis (the top soil layer) is kept.
pub fn select_first_layer(path: &Path, variable: SourceVariable) -> Result<Array2<f64>> {
    let rank = variable.ndim();
    let unsupported = || IngestionError::UnsupportedRank {
        path: path.to_path_buf(),
        variable: variable.name.clone(),
        rank,
    };

    match rank {
        2 => variable.data.into_dimensionality::<Ix2>().map_err(|_| unsupported()),
        3 => {
            if variable.shape()[0] == 0 {
                return Err(unsupported());
            }
            if variable.shape()[0] > 1 {
                debug!(
                    variable = %variable.name,
                    layers = variable.shape()[0],
                    "Keeping first layer only"
                );
            }
            variable
                .data
                .index_axis(Axis(0), 0)
                .into_dimensionality::<Ix2>()
                .map(|layer| layer.to_owned())
                .map_err(|_| unsupported())
        }
        _ => Err(unsupported()),
    }
}

/// Convert one variable of a NetCDF file to a raster written through `sink`.
///
/// The grid is chosen by the caller; it is not inferred from the file.
pub fn convert_netcdf<S: RasterSink + ?Sized>(
    sink: &S,
    input: &Path,
    variable: &str,
    output: &Path,
    grid: &CoordinateGrid,
) -> Result<()> {
    info!(
        input = %input.display(),
        variable = variable,
        output = %output.display(),
        "Converting NetCDF variable"
    );

    let source = read_variable(input, variable)?;
    if let Some(description) = &source.description {
        debug!(variable = variable, description = %description, "Variable description");
    }

    let data = select_first_layer(input, source)?;
    sink.write_raster(data.view(), grid, output)?;

    info!(output = %output.display(), variable = variable, "NetCDF variable converted");
    Ok(())
}
