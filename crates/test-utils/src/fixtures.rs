//! Common test fixtures for soil data conversion tests.
//!
//! Source files are small and written on the fly into a temporary
//! directory, so tests don't depend on the multi-gigabyte originals.

use std::fs;
use std::path::Path;

use ndarray::Array2;

/// Small grid shapes used across the suite.
pub mod shapes {
    /// Native shape of the Dai et al. (2019) binaries (30 arc-seconds)
    pub const DAI_NATIVE: (usize, usize) = (21600, 43200);

    /// A 20 x 40 binary grid; downsamples by 10 to 2 x 4
    pub const SMALL_BINARY: (usize, usize) = (20, 40);

    /// Tiny raster for writer tests
    pub const TINY: (usize, usize) = (3, 4);
}

/// Sentinel codes seen in the source products.
pub mod sentinels {
    /// Output missing-value code
    pub const MISSING: f64 = -9999.0;

    /// Ocean/no-data code of the Shangguan et al. (2013) NetCDF files
    pub const SHANGGUAN_FILL: f64 = -999.0;
}

/// One variable of a NetCDF fixture.
#[derive(Debug, Clone)]
pub struct NcFixtureVariable {
    pub name: String,
    /// Dimension names and lengths, outermost first
    pub dims: Vec<(String, usize)>,
    /// Row-major values
    pub values: Vec<f64>,
    /// Text attributes
    pub attributes: Vec<(String, String)>,
}

impl NcFixtureVariable {
    pub fn new(name: &str, dims: &[(&str, usize)], values: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            dims: dims.iter().map(|(d, n)| (d.to_string(), *n)).collect(),
            values,
            attributes: Vec::new(),
        }
    }

    /// A 2D variable on dimensions `lat` x `lon`.
    pub fn grid(name: &str, data: &Array2<f64>) -> Self {
        let (rows, cols) = data.dim();
        Self::new(
            name,
            &[("lat", rows), ("lon", cols)],
            data.iter().copied().collect(),
        )
    }

    /// Add a text attribute.
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }
}

/// Write a NetCDF file containing the given variables.
///
/// Dimensions with the same name are shared between variables; their
/// lengths must agree.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_netcdf_fixture(path: &Path, variables: &[NcFixtureVariable]) {
    let mut file = netcdf::create(path).expect("Failed to create NetCDF fixture");

    for var in variables {
        for (dim, len) in &var.dims {
            if file.dimension(dim).is_none() {
                file.add_dimension(dim, *len)
                    .expect("Failed to add NetCDF dimension");
            }
        }
    }

    for var in variables {
        let dims: Vec<&str> = var.dims.iter().map(|(d, _)| d.as_str()).collect();
        let mut nc_var = file
            .add_variable::<f64>(&var.name, &dims)
            .expect("Failed to add NetCDF variable");
        nc_var
            .put_values(&var.values, ..)
            .expect("Failed to write NetCDF values");
        for (key, value) in &var.attributes {
            nc_var
                .put_attribute(key, value.as_str())
                .expect("Failed to write NetCDF attribute");
        }
    }
}

/// Write a raw native-endian f64 grid, as the Dai et al. (2019) binaries are stored.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_binary_grid(path: &Path, data: &Array2<f64>) {
    let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_ne_bytes()).collect();
    fs::write(path, bytes).expect("Failed to write binary grid fixture");
}

/// Write text content (CSV tables, YAML catalogs) to a file.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_text_fixture(path: &Path, content: &str) {
    fs::write(path, content).expect("Failed to write text fixture");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temp_test_dir;

    #[test]
    fn test_shapes_downsample_evenly() {
        assert_eq!(shapes::DAI_NATIVE.0 % 10, 0);
        assert_eq!(shapes::DAI_NATIVE.1 % 10, 0);
        assert_eq!(shapes::SMALL_BINARY.0 % 10, 0);
    }

    #[test]
    fn test_write_binary_grid_length() {
        let dir = temp_test_dir();
        let path = dir.path().join("grid.bin");
        let data = Array2::<f64>::zeros((3, 5));

        write_binary_grid(&path, &data);

        assert_eq!(fs::metadata(&path).unwrap().len(), 3 * 5 * 8);
    }

    #[test]
    fn test_fixture_variable_builder() {
        let data = Array2::<f64>::zeros((2, 3));
        let var = NcFixtureVariable::grid("SA", &data).with_attr("units", "%");

        assert_eq!(var.dims, vec![("lat".to_string(), 2), ("lon".to_string(), 3)]);
        assert_eq!(var.values.len(), 6);
        assert_eq!(var.attributes, vec![("units".to_string(), "%".to_string())]);
    }
}
