//! Band statistics embedded in GeoTIFF output.
//!
//! Statistics are stored the way GDAL stores them: an XML document in the
//! `GDAL_METADATA` tag with `STATISTICS_*` items for band 0.

use std::collections::HashMap;

use ndarray::ArrayView2;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{GridProcessorError, Result};

const STATISTICS_MINIMUM: &str = "STATISTICS_MINIMUM";
const STATISTICS_MAXIMUM: &str = "STATISTICS_MAXIMUM";
const STATISTICS_MEAN: &str = "STATISTICS_MEAN";
const STATISTICS_STDDEV: &str = "STATISTICS_STDDEV";

/// Summary statistics of one raster band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandStatistics {
    pub minimum: f64,
    pub maximum: f64,
    pub mean: f64,
    /// Population standard deviation (divisor N)
    pub std_dev: f64,
}

impl BandStatistics {
    /// Compute statistics over every cell, sentinel codes included.
    ///
    /// A single NaN cell (or an empty array) makes every statistic NaN.
    pub fn compute(data: ArrayView2<f64>) -> Self {
        let n = data.len();
        if n == 0 || data.iter().any(|v| v.is_nan()) {
            return Self::nan();
        }

        let mut minimum = f64::INFINITY;
        let mut maximum = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &v in data.iter() {
            minimum = minimum.min(v);
            maximum = maximum.max(v);
            sum += v;
        }
        let mean = sum / n as f64;

        let variance = data.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>() / n as f64;

        Self {
            minimum,
            maximum,
            mean,
            std_dev: variance.sqrt(),
        }
    }

    fn nan() -> Self {
        Self {
            minimum: f64::NAN,
            maximum: f64::NAN,
            mean: f64::NAN,
            std_dev: f64::NAN,
        }
    }

    /// Render as a GDAL metadata XML document.
    pub fn to_gdal_metadata(&self) -> String {
        let items = [
            (STATISTICS_MAXIMUM, self.maximum),
            (STATISTICS_MEAN, self.mean),
            (STATISTICS_MINIMUM, self.minimum),
            (STATISTICS_STDDEV, self.std_dev),
        ];

        let mut xml = String::from("<GDALMetadata>\n");
        for (name, value) in items {
            xml.push_str(&format!(
                "  <Item name=\"{}\" sample=\"0\">{}</Item>\n",
                name, value
            ));
        }
        xml.push_str("</GDALMetadata>");
        xml
    }

    /// Parse the statistics items out of a GDAL metadata XML document.
    pub fn from_gdal_metadata(xml: &str) -> Result<Self> {
        let items = parse_gdal_items(xml)?;

        let get = |name: &str| -> Result<f64> {
            let raw = items.get(name).ok_or_else(|| {
                GridProcessorError::invalid_metadata(format!("missing {} in GDAL metadata", name))
            })?;
            raw.trim().parse::<f64>().map_err(|e| {
                GridProcessorError::invalid_metadata(format!("{} = '{}': {}", name, raw, e))
            })
        };

        Ok(Self {
            minimum: get(STATISTICS_MINIMUM)?,
            maximum: get(STATISTICS_MAXIMUM)?,
            mean: get(STATISTICS_MEAN)?,
            std_dev: get(STATISTICS_STDDEV)?,
        })
    }
}

/// Collect `<Item name="...">value</Item>` pairs.
fn parse_gdal_items(xml: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut items = HashMap::new();
    let mut current: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"Item" => {
                current = e
                    .attributes()
                    .flatten()
                    .find(|attr| attr.key.as_ref() == b"name")
                    .map(|attr| String::from_utf8_lossy(&attr.value).into_owned());
            }
            Ok(Event::Text(t)) => {
                if let Some(name) = current.take() {
                    let value = t
                        .unescape()
                        .map_err(|e| GridProcessorError::invalid_metadata(e.to_string()))?;
                    items.insert(name, value.into_owned());
                }
            }
            Ok(Event::End(_)) => current = None,
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(GridProcessorError::invalid_metadata(format!(
                    "GDAL metadata XML error at position {}: {:?}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_compute_population_statistics() {
        let data = array![[1.0, 2.0], [3.0, 4.0]];
        let stats = BandStatistics::compute(data.view());

        assert_eq!(stats.minimum, 1.0);
        assert_eq!(stats.maximum, 4.0);
        assert_eq!(stats.mean, 2.5);
        // Population variance of 1..4 is 1.25
        assert!((stats.std_dev - 1.25_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_compute_includes_sentinels() {
        let data = array![[-9999.0, 10.0], [20.0, 30.0]];
        let stats = BandStatistics::compute(data.view());

        assert_eq!(stats.minimum, -9999.0);
        assert!(stats.mean < 0.0);
    }

    #[test]
    fn test_nan_propagates() {
        let data = array![[1.0, f64::NAN], [3.0, 4.0]];
        let stats = BandStatistics::compute(data.view());

        assert!(stats.minimum.is_nan());
        assert!(stats.maximum.is_nan());
        assert!(stats.mean.is_nan());
        assert!(stats.std_dev.is_nan());
    }

    #[test]
    fn test_gdal_metadata_roundtrip() {
        let data = array![[0.5, 1.25], [-3.0, 7.0]];
        let stats = BandStatistics::compute(data.view());

        let xml = stats.to_gdal_metadata();
        assert!(xml.contains("<Item name=\"STATISTICS_MINIMUM\" sample=\"0\">-3</Item>"));

        assert_eq!(BandStatistics::from_gdal_metadata(&xml).unwrap(), stats);
    }

    #[test]
    fn test_gdal_metadata_missing_item() {
        let xml = "<GDALMetadata><Item name=\"STATISTICS_MEAN\" sample=\"0\">1</Item></GDALMetadata>";
        assert!(matches!(
            BandStatistics::from_gdal_metadata(xml),
            Err(GridProcessorError::InvalidMetadata(_))
        ));
    }
}
