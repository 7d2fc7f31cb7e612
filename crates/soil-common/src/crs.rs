//! Coordinate Reference System codes.
//!
//! Every raster produced by this workspace is geographic WGS84. The enum
//! exists so the CRS travels with each grid definition instead of being
//! implied by the writer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known CRS codes supported by the raster writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrsCode {
    /// WGS84 Geographic (lon/lat in degrees)
    #[default]
    #[serde(rename = "EPSG:4326")]
    Epsg4326,
}

impl CrsCode {
    /// Parse a CRS string such as "EPSG:4326" or "CRS:84".
    pub fn parse(s: &str) -> Result<Self, CrsParseError> {
        match s.trim().to_uppercase().as_str() {
            "EPSG:4326" | "CRS:84" | "WGS84" => Ok(CrsCode::Epsg4326),
            _ => Err(CrsParseError::UnsupportedCrs(s.to_string())),
        }
    }

    /// Numeric EPSG code, as stored in the GeoTIFF GeographicTypeGeoKey.
    pub fn epsg(&self) -> u16 {
        match self {
            CrsCode::Epsg4326 => 4326,
        }
    }

    /// Check if this is a geographic (lat/lon) CRS.
    pub fn is_geographic(&self) -> bool {
        matches!(self, CrsCode::Epsg4326)
    }

    /// Human-readable citation, written to GeoAsciiParams.
    pub fn citation(&self) -> &'static str {
        match self {
            CrsCode::Epsg4326 => "WGS 84",
        }
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CrsParseError {
    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crs() {
        assert_eq!(CrsCode::parse("EPSG:4326").unwrap(), CrsCode::Epsg4326);
        assert_eq!(CrsCode::parse("epsg:4326").unwrap(), CrsCode::Epsg4326);
        assert_eq!(CrsCode::parse("CRS:84").unwrap(), CrsCode::Epsg4326);
        assert!(CrsCode::parse("EPSG:3857").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(CrsCode::Epsg4326.to_string(), "EPSG:4326");
        assert_eq!(CrsCode::Epsg4326.epsg(), 4326);
    }
}
