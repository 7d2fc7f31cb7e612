//! In-memory representation of the variables of one source file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ndarray::ArrayD;

/// One variable extracted from a NetCDF file.
#[derive(Debug, Clone)]
pub struct SourceVariable {
    /// Variable identifier in the file
    pub name: String,
    /// Raw values, shaped by the variable's dimensions (any rank)
    pub data: ArrayD<f64>,
    /// Long descriptive name (`longname` or `long_name` attribute)
    pub description: Option<String>,
    /// Physical unit (`units` attribute)
    pub units: Option<String>,
}

impl SourceVariable {
    /// Dimension lengths, outermost first.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }
}

/// All variables read from one source file, keyed by identifier.
///
/// Arrays, descriptions and units live on the same [`SourceVariable`], so
/// the three mappings always share one key set.
#[derive(Debug, Clone)]
pub struct SourceVariableSet {
    path: PathBuf,
    variables: BTreeMap<String, SourceVariable>,
}

impl SourceVariableSet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            variables: BTreeMap::new(),
        }
    }

    /// File the variables were read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn insert(&mut self, variable: SourceVariable) {
        self.variables.insert(variable.name.clone(), variable);
    }

    pub fn get(&self, name: &str) -> Option<&SourceVariable> {
        self.variables.get(name)
    }

    /// Remove and return a variable, avoiding a copy of its array.
    pub fn take(&mut self, name: &str) -> Option<SourceVariable> {
        self.variables.remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceVariable> {
        self.variables.values()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Variable identifier -> raw array.
    pub fn arrays(&self) -> BTreeMap<&str, &ArrayD<f64>> {
        self.variables
            .iter()
            .map(|(k, v)| (k.as_str(), &v.data))
            .collect()
    }

    /// Variable identifier -> description; `None` where the file has none.
    pub fn descriptions(&self) -> BTreeMap<&str, Option<&str>> {
        self.variables
            .iter()
            .map(|(k, v)| (k.as_str(), v.description.as_deref()))
            .collect()
    }

    /// Variable identifier -> unit, for variables that declare one.
    pub fn units(&self) -> BTreeMap<&str, &str> {
        self.variables
            .iter()
            .filter_map(|(k, v)| v.units.as_deref().map(|u| (k.as_str(), u)))
            .collect()
    }
}
