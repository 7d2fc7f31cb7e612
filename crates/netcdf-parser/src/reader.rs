//! Reading every variable (or one named variable) of a NetCDF file.

use std::collections::BTreeMap;
use std::path::Path;

use ndarray::{ArrayD, IxDyn};
use tracing::{debug, error, info, warn};

use crate::error::{NetCdfError, NetCdfResult};
use crate::native::{get_string_attr, open_file, read_values_f64, variable_shape};
use crate::variable::{SourceVariable, SourceVariableSet};

/// Attribute names consulted for a variable's description, in order.
const DESCRIPTION_ATTRS: [&str; 2] = ["longname", "long_name"];

/// Attribute holding a variable's physical unit.
const UNITS_ATTR: &str = "units";

/// Read every variable of a NetCDF file.
///
/// Values are returned raw, with no masking of fill values. Variables whose
/// values cannot be read as numbers (character or string variables) are
/// skipped with a warning. The file is closed before returning.
///
/// # Errors
///
/// Returns [`NetCdfError::OpenFailed`] if the file is missing or not a
/// readable NetCDF file.
pub fn read_variables<P: AsRef<Path>>(path: P) -> NetCdfResult<SourceVariableSet> {
    let path = path.as_ref();
    let file = open_file(path)?;
    let mut set = SourceVariableSet::new(path);

    for var in file.variables() {
        match load_variable(path, &var) {
            Ok(variable) => set.insert(variable),
            Err(NetCdfError::ReadFailed { variable, message, .. }) => {
                warn!(
                    path = %path.display(),
                    variable = %variable,
                    error = %message,
                    "Skipping non-numeric variable"
                );
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        path = %path.display(),
        variables = set.len(),
        "Read NetCDF variables"
    );

    Ok(set)
}

/// Read a single named variable.
///
/// # Errors
///
/// Returns [`NetCdfError::VariableNotFound`] if the file has no such
/// variable, and [`NetCdfError::ReadFailed`] if its values are not numeric.
pub fn read_variable<P: AsRef<Path>>(path: P, name: &str) -> NetCdfResult<SourceVariable> {
    let path = path.as_ref();
    let file = open_file(path)?;

    let var = file
        .variable(name)
        .ok_or_else(|| NetCdfError::VariableNotFound {
            path: path.to_path_buf(),
            variable: name.to_string(),
        })?;

    load_variable(path, &var)
}

/// Like [`read_variables`], but logs the failure and returns `None`.
///
/// For batch drivers that keep going past an unreadable file.
pub fn try_read_variables<P: AsRef<Path>>(path: P) -> Option<SourceVariableSet> {
    let path = path.as_ref();
    match read_variables(path) {
        Ok(set) => Some(set),
        Err(e) => {
            error!(path = %path.display(), error = %e, "File corrupted or unreadable");
            None
        }
    }
}

/// Variable identifier -> description, without reading any values.
pub fn variable_descriptions<P: AsRef<Path>>(
    path: P,
) -> NetCdfResult<BTreeMap<String, Option<String>>> {
    let path = path.as_ref();
    let file = open_file(path)?;

    Ok(file
        .variables()
        .map(|var| (var.name(), description_of(&var)))
        .collect())
}

fn description_of(var: &netcdf::Variable) -> Option<String> {
    DESCRIPTION_ATTRS
        .iter()
        .find_map(|attr| get_string_attr(var, attr))
}

fn load_variable(path: &Path, var: &netcdf::Variable) -> NetCdfResult<SourceVariable> {
    let name = var.name();
    let shape = variable_shape(var);

    let values = read_values_f64(var).map_err(|e| NetCdfError::ReadFailed {
        path: path.to_path_buf(),
        variable: name.clone(),
        message: e.to_string(),
    })?;

    let data = ArrayD::from_shape_vec(IxDyn(&shape), values).map_err(|e| {
        NetCdfError::InvalidFormat(format!(
            "variable '{}' does not match its dimensions {:?}: {}",
            name, shape, e
        ))
    })?;

    let description = description_of(var);
    let units = get_string_attr(var, UNITS_ATTR);

    debug!(
        variable = %name,
        shape = ?shape,
        has_description = description.is_some(),
        units = ?units,
        "Loaded variable"
    );

    Ok(SourceVariable {
        name,
        data,
        description,
        units,
    })
}
