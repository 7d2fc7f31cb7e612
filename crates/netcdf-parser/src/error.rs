//! Error types for NetCDF reading operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for NetCDF parser operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF reading.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// The file could not be opened (missing, unreadable or corrupted)
    #[error("File corrupted or unreadable: {}: {message}", path.display())]
    OpenFailed { path: PathBuf, message: String },

    /// The requested variable is not present in the file
    #[error("Variable '{variable}' not found in {}", path.display())]
    VariableNotFound { path: PathBuf, variable: String },

    /// A variable's values could not be read as numbers
    #[error("Failed to read variable '{variable}' from {}: {message}", path.display())]
    ReadFailed {
        path: PathBuf,
        variable: String,
        message: String,
    },

    /// Values do not fit the variable's declared dimensions
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}
