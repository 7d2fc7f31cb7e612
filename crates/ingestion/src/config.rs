//! Conversion configuration.
//!
//! Scalar settings come from environment variables; the table of known
//! coordinate grids can be extended from a YAML document, so adding a
//! source dataset is a data change.

use std::path::Path;

use grid_processor::{DownsampleMethod, GridProcessorConfig};
use serde::{Deserialize, Serialize};
use soil_common::{GridCatalog, MISSING_VALUE};

use crate::binary::BinaryGridSpec;
use crate::error::{IngestionError, Result};

/// Settings shared by every conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Code written where the source has no data
    pub missing_value: f64,

    /// Block reduction used when downsampling binary grids
    pub downsample_method: DownsampleMethod,

    /// Raster output settings
    pub raster: GridProcessorConfig,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            missing_value: MISSING_VALUE,
            downsample_method: DownsampleMethod::Mean,
            raster: GridProcessorConfig::default(),
        }
    }
}

impl ConversionConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self {
            raster: GridProcessorConfig::from_env(),
            ..Self::default()
        };

        if let Ok(val) = std::env::var("SOIL_MISSING_VALUE") {
            if let Ok(value) = val.parse() {
                config.missing_value = value;
            }
        }

        if let Ok(val) = std::env::var("SOIL_DOWNSAMPLE_METHOD") {
            config.downsample_method = DownsampleMethod::from_str(&val);
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.missing_value.is_finite() {
            return Err(IngestionError::InvalidConfig(
                "missing_value must be a finite number".to_string(),
            ));
        }

        self.raster.validate().map_err(IngestionError::InvalidConfig)
    }

    /// Dai et al. (2019) binary layout with this configuration's downsample method.
    pub fn binary_spec(&self) -> BinaryGridSpec {
        BinaryGridSpec {
            method: self.downsample_method,
            ..BinaryGridSpec::dai_2019()
        }
    }
}

/// Built-in grid presets extended with the grids of a YAML document.
///
/// The document maps grid names to grid definitions:
///
/// ```yaml
/// soilgrids_250m:
///   origin_x: -180.0
///   origin_y: 84.0
///   cell_size_x: 0.0020833333
///   cell_size_y: -0.0020833333
///   rows: 72000
///   cols: 172800
/// ```
///
/// Entries named like a built-in preset replace it.
pub fn grid_catalog_from_yaml(yaml: &str) -> Result<GridCatalog> {
    let extra: GridCatalog = serde_yaml::from_str(yaml).map_err(|e| IngestionError::CatalogParse {
        path: "<inline>".into(),
        message: e.to_string(),
    })?;

    let mut catalog = GridCatalog::builtin();
    catalog.extend(extra)?;
    Ok(catalog)
}

/// Load a grid catalog YAML file, see [`grid_catalog_from_yaml`].
pub fn load_grid_catalog<P: AsRef<Path>>(path: P) -> Result<GridCatalog> {
    let path = path.as_ref();
    let yaml = std::fs::read_to_string(path).map_err(|source| IngestionError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    grid_catalog_from_yaml(&yaml).map_err(|e| match e {
        IngestionError::CatalogParse { message, .. } => IngestionError::CatalogParse {
            path: path.to_path_buf(),
            message,
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use soil_common::SoilCommonError;

    #[test]
    fn test_default_config() {
        let config = ConversionConfig::default();
        assert_eq!(config.missing_value, -9999.0);
        assert_eq!(config.downsample_method, DownsampleMethod::Mean);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = ConversionConfig {
            missing_value: f64::NAN,
            ..ConversionConfig::default()
        };
        assert!(matches!(config.validate(), Err(IngestionError::InvalidConfig(_))));
    }

    #[test]
    fn test_binary_spec_uses_configured_method() {
        let config = ConversionConfig {
            downsample_method: DownsampleMethod::Nearest,
            ..ConversionConfig::default()
        };
        let spec = config.binary_spec();
        assert_eq!(spec.method, DownsampleMethod::Nearest);
        assert_eq!(spec.downsample_factor, 10);
    }

    #[test]
    fn test_catalog_from_yaml() {
        let yaml = r#"
tiny:
  origin_x: 0.0
  origin_y: 10.0
  cell_size_x: 1.0
  cell_size_y: -1.0
  rows: 10
  cols: 20
"#;
        let catalog = grid_catalog_from_yaml(yaml).unwrap();

        assert_eq!(catalog.len(), 3);
        let tiny = catalog.get("tiny").unwrap();
        assert_eq!(tiny.cols, 20);
        assert!(tiny.is_north_up());
        assert!(catalog.get("global_5arcmin").is_ok());
    }

    #[test]
    fn test_catalog_rejects_invalid_grid() {
        let yaml = "broken:\n  origin_x: 0.0\n  origin_y: 0.0\n  cell_size_x: 1.0\n  cell_size_y: 1.0\n  rows: 0\n  cols: 4\n";
        assert!(matches!(
            grid_catalog_from_yaml(yaml),
            Err(IngestionError::Grid(SoilCommonError::InvalidGrid { .. }))
        ));
    }

    #[test]
    fn test_catalog_parse_error() {
        assert!(matches!(
            grid_catalog_from_yaml("tiny: [1, 2"),
            Err(IngestionError::CatalogParse { .. })
        ));
    }
}
