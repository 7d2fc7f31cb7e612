//! Error types for the ingestion crate.

use std::path::PathBuf;

use grid_processor::GridProcessorError;
use netcdf_parser::NetCdfError;
use soil_common::SoilCommonError;
use thiserror::Error;

/// Errors that can occur during conversion.
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Failed to read file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(
        "Binary grid {} has {actual} bytes, expected {expected} ({rows}x{cols} f64 values)",
        path.display()
    )]
    ShapeMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
        rows: usize,
        cols: usize,
    },

    #[error(
        "Variable '{variable}' in {} has rank {rank}; only 2D and 3D variables can be converted",
        path.display()
    )]
    UnsupportedRank {
        path: PathBuf,
        variable: String,
        rank: usize,
    },

    #[error(transparent)]
    NetCdf(#[from] NetCdfError),

    #[error(transparent)]
    Raster(#[from] GridProcessorError),

    #[error(transparent)]
    Grid(#[from] SoilCommonError),

    #[error("Failed to parse grid catalog {}: {message}", path.display())]
    CatalogParse { path: PathBuf, message: String },

    #[error("Unknown file type: {0}")]
    UnknownFileType(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestionError>;
