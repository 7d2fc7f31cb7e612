//! Error types for grid processing.

use std::path::{Path, PathBuf};

use soil_common::SoilCommonError;
use thiserror::Error;

/// Errors that can occur during grid processing.
#[derive(Error, Debug)]
pub enum GridProcessorError {
    /// Failed to create or encode the output raster.
    #[error("failed to write raster {}: {message}", path.display())]
    WriteFailed { path: PathBuf, message: String },

    /// Failed to open or decode a raster.
    #[error("failed to read raster {}: {message}", path.display())]
    ReadFailed { path: PathBuf, message: String },

    /// Array does not fit the target grid, or the grid itself is invalid.
    #[error(transparent)]
    Grid(#[from] SoilCommonError),

    /// Invalid georeferencing or metadata tags in a raster.
    #[error("invalid raster metadata: {0}")]
    InvalidMetadata(String),

    /// Raster sample type other than Float32.
    #[error("unsupported sample type: {0}")]
    UnsupportedDataType(String),

    /// Downsampling factor of zero or larger than the grid.
    #[error("cannot downsample {rows}x{cols} grid by factor {factor}")]
    InvalidFactor {
        factor: usize,
        rows: usize,
        cols: usize,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl GridProcessorError {
    /// Create a WriteFailed error.
    pub fn write_failed(path: &Path, msg: impl ToString) -> Self {
        Self::WriteFailed {
            path: path.to_path_buf(),
            message: msg.to_string(),
        }
    }

    /// Create a ReadFailed error.
    pub fn read_failed(path: &Path, msg: impl ToString) -> Self {
        Self::ReadFailed {
            path: path.to_path_buf(),
            message: msg.to_string(),
        }
    }

    /// Create an InvalidMetadata error.
    pub fn invalid_metadata(msg: impl Into<String>) -> Self {
        Self::InvalidMetadata(msg.into())
    }
}

/// Result type for grid processor operations.
pub type Result<T> = std::result::Result<T, GridProcessorError>;
