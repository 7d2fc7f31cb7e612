//! NetCDF reader for gridded soil property files.
//!
//! Reads every variable of a NetCDF file (or one named variable) into
//! n-dimensional f64 arrays, together with the descriptive `longname` /
//! `long_name` and `units` attributes. Values are passed through raw; the
//! sentinel codes of the source products survive the read.
//!
//! # Implementation Notes
//!
//! Reading goes through the `netcdf` crate (libnetcdf + HDF5). HDF5's
//! stderr diagnostics are silenced once per process, see
//! [`silence_hdf5_errors`].
//!
//! # Example
//!
//! ```ignore
//! use netcdf_parser::read_variables;
//!
//! let set = read_variables("SA.nc")?;
//! for (name, description) in set.descriptions() {
//!     println!("{name}: {description:?}");
//! }
//! ```

pub mod error;
mod native;
pub mod reader;
pub mod variable;

pub use error::{NetCdfError, NetCdfResult};
pub use native::silence_hdf5_errors;
pub use reader::{read_variable, read_variables, try_read_variables, variable_descriptions};
pub use variable::{SourceVariable, SourceVariableSet};
