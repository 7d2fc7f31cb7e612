//! Error types shared by the grid definitions.

use thiserror::Error;

/// Result type alias using SoilCommonError.
pub type SoilCommonResult<T> = Result<T, SoilCommonError>;

/// Errors raised while building or looking up coordinate grids.
#[derive(Debug, Error)]
pub enum SoilCommonError {
    #[error("Invalid grid definition '{name}': {message}")]
    InvalidGrid { name: String, message: String },

    #[error("Unknown grid preset: {0}")]
    UnknownPreset(String),

    #[error("Array shape {actual_rows}x{actual_cols} does not match grid {expected_rows}x{expected_cols}")]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },
}
