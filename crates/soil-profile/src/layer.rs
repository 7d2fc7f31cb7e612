//! Structured keys for layer columns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::depth::SoilLayer;

/// A `(property, layer)` pair parsed from a column name.
///
/// Column names look like `{property}_{slN}` with optional trailing
/// `_{suffix}` tokens (`SNDPPT_M_sl3_250m`, `SA_sl1_mean`). The property is
/// everything before the first layer tag; trailing tokens are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerKey {
    pub property: String,
    pub layer: SoilLayer,
}

impl LayerKey {
    pub fn new(property: impl Into<String>, layer: SoilLayer) -> Self {
        Self {
            property: property.into(),
            layer,
        }
    }

    /// Parse a column name; `None` for columns that carry no layer tag.
    pub fn parse(column: &str) -> Option<Self> {
        let tokens: Vec<&str> = column.split('_').collect();
        tokens
            .iter()
            .enumerate()
            .skip(1)
            .find_map(|(i, token)| SoilLayer::from_tag(token).map(|layer| (i, layer)))
            .and_then(|(i, layer)| {
                let property = tokens[..i].join("_");
                (!property.is_empty()).then(|| Self::new(property, layer))
            })
    }

    /// Canonical column name, `{property}_{slN}`.
    pub fn column_name(&self) -> String {
        format!("{}_{}", self.property, self.layer.tag())
    }
}

impl fmt::Display for LayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.property, self.layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        assert_eq!(LayerKey::parse("x_sl1"), Some(LayerKey::new("x", SoilLayer::Sl1)));
        assert_eq!(LayerKey::parse("CLYPPT_sl7"), Some(LayerKey::new("CLYPPT", SoilLayer::Sl7)));
    }

    #[test]
    fn test_parse_multi_token_property_and_suffix() {
        assert_eq!(
            LayerKey::parse("SNDPPT_M_sl3_250m"),
            Some(LayerKey::new("SNDPPT_M", SoilLayer::Sl3))
        );
        assert_eq!(
            LayerKey::parse("SA_sl2_mean"),
            Some(LayerKey::new("SA", SoilLayer::Sl2))
        );
    }

    #[test]
    fn test_parse_non_layer_columns() {
        for name in ["basin_id", "area", "sl1", "_sl1", "x_sl8", "x_sl10", "x_SL1", "xsl1", "island_slope"] {
            assert_eq!(LayerKey::parse(name), None, "{name}");
        }
    }

    #[test]
    fn test_column_name() {
        let key = LayerKey::new("SNDPPT_M", SoilLayer::Sl6);
        assert_eq!(key.column_name(), "SNDPPT_M_sl6");
        assert_eq!(key.to_string(), "SNDPPT_M_sl6");
        assert_eq!(LayerKey::parse(&key.column_name()), Some(key));
    }
}
