//! Error types for depth-profile aggregation.

use std::path::PathBuf;

use thiserror::Error;

use crate::depth::SoilLayer;

/// Errors raised while loading, aggregating or writing attribute tables.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// A property does not have all seven layer columns.
    #[error("property '{property}' is missing layer columns: {}", join_layers(.missing))]
    MissingLayers {
        property: String,
        missing: Vec<SoilLayer>,
    },

    /// Two columns map to the same property and layer.
    #[error("property '{property}' has more than one column for layer {layer}: '{first}' and '{second}'")]
    DuplicateLayer {
        property: String,
        layer: SoilLayer,
        first: String,
        second: String,
    },

    /// Aggregated column name already used by a non-layer column.
    #[error("aggregated column '{0}' conflicts with an existing column")]
    NameConflict(String),

    /// Two columns share a header.
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    /// Requested index column not in the header.
    #[error("index column '{0}' not found")]
    MissingIndexColumn(String),

    /// Column length differs from the table's row count.
    #[error("column '{column}' has {actual} rows, table has {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Non-numeric cell in a numeric column. Rows are 1-based data rows.
    #[error("invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },

    /// Malformed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to open or create a table file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn join_layers(layers: &[SoilLayer]) -> String {
    layers
        .iter()
        .map(|l| l.tag())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for profile operations.
pub type Result<T> = std::result::Result<T, ProfileError>;
