//! Thin helpers over the native netcdf library.
//!
//! The netcdf crate wraps libnetcdf/HDF5. Values are read raw: no fill-value
//! masking and no scale/offset unpacking is applied, so sentinel codes in
//! the source reach the caller unaltered.

use std::path::Path;
use std::sync::Once;

use crate::error::{NetCdfError, NetCdfResult};

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when checking for optional
/// attributes that don't exist). This creates confusing log spam like:
///
/// ```text
/// HDF5-DIAG: Error detected in HDF5 (1.10.8) thread 3:
///   #003: ../../../src/H5Adense.c line 397 in H5A__dense_open(): can't locate attribute in name index
/// ```
///
/// It only needs to be called once per process, but is safe to call multiple times.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Open a NetCDF file read-only.
///
/// The returned handle closes the file when dropped.
pub(crate) fn open_file(path: &Path) -> NetCdfResult<netcdf::File> {
    silence_hdf5_errors();

    netcdf::open(path).map_err(|e| NetCdfError::OpenFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Dimension lengths of a variable, outermost first.
pub(crate) fn variable_shape(var: &netcdf::Variable) -> Vec<usize> {
    var.dimensions().iter().map(|d| d.len()).collect()
}

/// Read every value of a numeric variable as f64.
///
/// libnetcdf converts between numeric types on read; narrower reads are
/// tried in turn for builds that refuse the conversion.
pub(crate) fn read_values_f64(var: &netcdf::Variable) -> Result<Vec<f64>, netcdf::Error> {
    let first_err = match var.get_values::<f64, _>(..) {
        Ok(values) => return Ok(values),
        Err(e) => e,
    };

    macro_rules! widen_from {
        ($t:ty) => {
            if let Ok(values) = var.get_values::<$t, _>(..) {
                return Ok(values.into_iter().map(f64::from).collect());
            }
        };
    }

    widen_from!(f32);
    widen_from!(i32);
    widen_from!(u32);
    widen_from!(i16);
    widen_from!(u16);
    widen_from!(i8);
    widen_from!(u8);

    Err(first_err)
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get a text attribute.
pub(crate) fn get_string_attr(var: &netcdf::Variable, name: &str) -> Option<String> {
    if !has_attr(var, name) {
        return None;
    }
    match var.attribute_value(name)?.ok()? {
        netcdf::AttributeValue::Str(value) => Some(value),
        _ => None,
    }
}
