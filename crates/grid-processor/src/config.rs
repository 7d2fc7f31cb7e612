//! Configuration for raster output.

use serde::{Deserialize, Serialize};

/// Configuration for the raster writer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridProcessorConfig {
    /// Compression codec for GeoTIFF strips.
    pub compression: RasterCompression,

    /// Value written to the `GDAL_NODATA` tag; no tag when `None`.
    pub nodata: Option<f64>,
}

impl GridProcessorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("RASTER_COMPRESSION") {
            config.compression = RasterCompression::from_str(&val);
        }

        if let Ok(val) = std::env::var("RASTER_NODATA") {
            if let Ok(nodata) = val.parse() {
                config.nodata = Some(nodata);
            }
        }

        config
    }

    /// Builder-style setter for the nodata tag.
    pub fn with_nodata(mut self, nodata: f64) -> Self {
        self.nodata = Some(nodata);
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(nodata) = self.nodata {
            if nodata.is_infinite() {
                return Err("nodata must be finite or NaN".to_string());
            }
        }

        Ok(())
    }
}

/// Compression codec for GeoTIFF output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterCompression {
    /// No compression.
    #[default]
    None,
    /// LZW compression.
    Lzw,
    /// Deflate (zlib) compression.
    Deflate,
}

impl RasterCompression {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "lzw" => Self::Lzw,
            "deflate" | "zlib" => Self::Deflate,
            _ => Self::None,
        }
    }

    /// Get the codec name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Lzw => "lzw",
            Self::Deflate => "deflate",
        }
    }
}

impl std::fmt::Display for RasterCompression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GridProcessorConfig::default();
        assert_eq!(config.compression, RasterCompression::None);
        assert_eq!(config.nodata, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = GridProcessorConfig::default().with_nodata(-9999.0);
        assert!(config.validate().is_ok());

        let config = GridProcessorConfig::default().with_nodata(f64::NAN);
        assert!(config.validate().is_ok());

        let config = GridProcessorConfig::default().with_nodata(f64::INFINITY);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_raster_compression_from_str() {
        assert_eq!(RasterCompression::from_str("none"), RasterCompression::None);
        assert_eq!(RasterCompression::from_str("LZW"), RasterCompression::Lzw);
        assert_eq!(RasterCompression::from_str("deflate"), RasterCompression::Deflate);
        assert_eq!(RasterCompression::from_str("zlib"), RasterCompression::Deflate);
        assert_eq!(RasterCompression::from_str("invalid"), RasterCompression::None);
    }
}
