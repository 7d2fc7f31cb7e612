//! Per-basin attribute tables and their CSV form.

use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{ProfileError, Result};

/// A named numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Basin identifiers, kept as text.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexColumn {
    pub name: String,
    pub ids: Vec<String>,
}

/// One row per basin, numeric attribute columns in a fixed order.
///
/// Row order is significant and never changes. An optional index column
/// holds basin identifiers; it is always written first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeTable {
    index: Option<IndexColumn>,
    columns: Vec<Column>,
}

impl AttributeTable {
    /// Empty table without an index; the first column sets the row count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty table indexed by basin identifiers.
    pub fn with_index(name: impl Into<String>, ids: Vec<String>) -> Self {
        Self {
            index: Some(IndexColumn {
                name: name.into(),
                ids,
            }),
            columns: Vec::new(),
        }
    }

    /// Append a numeric column.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();

        if self.has_column(&name) {
            return Err(ProfileError::DuplicateColumn(name));
        }

        let expected = self.expected_rows();
        if let Some(expected) = expected {
            if values.len() != expected {
                return Err(ProfileError::ColumnLength {
                    column: name,
                    expected,
                    actual: values.len(),
                });
            }
        }

        self.columns.push(Column::new(name, values));
        Ok(())
    }

    fn expected_rows(&self) -> Option<usize> {
        self.index
            .as_ref()
            .map(|index| index.ids.len())
            .or_else(|| self.columns.first().map(|c| c.values.len()))
    }

    fn has_column(&self, name: &str) -> bool {
        self.index.as_ref().is_some_and(|index| index.name == name)
            || self.columns.iter().any(|c| c.name == name)
    }

    pub fn n_rows(&self) -> usize {
        self.expected_rows().unwrap_or(0)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn index(&self) -> Option<&IndexColumn> {
        self.index.as_ref()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Numeric column names, in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Same index, no numeric columns.
    pub(crate) fn empty_like(&self) -> Self {
        Self {
            index: self.index.clone(),
            columns: Vec::new(),
        }
    }

    /// Load a table from a CSV file with a header row.
    ///
    /// `index_column` names the column holding basin identifiers; every
    /// other column must be numeric. Empty cells read as NaN.
    pub fn from_csv_path(path: &Path, index_column: Option<&str>) -> Result<Self> {
        let file = File::open(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::from_csv_reader(file, index_column)?;

        info!(
            path = %path.display(),
            rows = table.n_rows(),
            columns = table.n_columns(),
            "Loaded attribute table"
        );
        Ok(table)
    }

    /// Load a table from any CSV source; see [`AttributeTable::from_csv_path`].
    pub fn from_csv_reader<R: Read>(reader: R, index_column: Option<&str>) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();

        let mut seen = HashSet::new();
        if let Some(duplicate) = headers.iter().find(|h| !seen.insert(h.as_str())) {
            return Err(ProfileError::DuplicateColumn(duplicate.clone()));
        }

        let index_position = match index_column {
            Some(name) => Some(
                headers
                    .iter()
                    .position(|h| h == name)
                    .ok_or_else(|| ProfileError::MissingIndexColumn(name.to_string()))?,
            ),
            None => None,
        };

        let mut ids = Vec::new();
        let mut values: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];

        for (row, record) in csv_reader.records().enumerate() {
            let record = record?;
            for (col, cell) in record.iter().enumerate() {
                if Some(col) == index_position {
                    ids.push(cell.to_string());
                } else {
                    values[col].push(parse_cell(cell, &headers[col], row + 1)?);
                }
            }
        }

        let mut table = match (index_position, index_column) {
            (Some(_), Some(name)) => Self::with_index(name, ids),
            _ => Self::new(),
        };
        for (col, (name, column)) in headers.into_iter().zip(values).enumerate() {
            if Some(col) != index_position {
                table.columns.push(Column::new(name, column));
            }
        }

        debug!(
            rows = table.n_rows(),
            columns = table.n_columns(),
            indexed = table.index.is_some(),
            "Parsed attribute table"
        );
        Ok(table)
    }

    /// Write the table as CSV. NaN is written as an empty cell.
    pub fn to_csv_path(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.write_csv(file)?;

        info!(
            path = %path.display(),
            rows = self.n_rows(),
            columns = self.n_columns(),
            "Wrote attribute table"
        );
        Ok(())
    }

    /// Write the table as CSV to any sink.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let header = self
            .index
            .iter()
            .map(|index| index.name.as_str())
            .chain(self.column_names());
        csv_writer.write_record(header)?;

        for row in 0..self.n_rows() {
            let id = self.index.as_ref().map(|index| index.ids[row].clone());
            let cells = id
                .into_iter()
                .chain(self.columns.iter().map(|c| format_cell(c.values[row])));
            csv_writer.write_record(cells)?;
        }

        csv_writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

fn parse_cell(cell: &str, column: &str, row: usize) -> Result<f64> {
    if cell.is_empty() {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>().map_err(|_| ProfileError::InvalidValue {
        column: column.to_string(),
        row,
        value: cell.to_string(),
    })
}

fn format_cell(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}
