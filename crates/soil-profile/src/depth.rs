//! Standard soil depth layers and the depth-weighted profile mean.
//!
//! SoilGrids reports properties at seven depths. Values are treated as
//! point samples at the layer depths and integrated with the trapezoid
//! rule over the six intervals between them (Hengl et al. 2017,
//! doi:10.1371/journal.pone.0169748).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Depths of the seven layers in centimeters.
pub const DEPTH_BOUNDARIES_CM: [f64; 7] = [0.0, 5.0, 15.0, 30.0, 60.0, 100.0, 200.0];

/// Total profile depth in centimeters.
pub const TOTAL_DEPTH_CM: f64 = 200.0;

/// One of the seven standard depth layers, `sl1` (surface) to `sl7` (200 cm).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilLayer {
    Sl1,
    Sl2,
    Sl3,
    Sl4,
    Sl5,
    Sl6,
    Sl7,
}

impl SoilLayer {
    /// All layers, shallowest first.
    pub const ALL: [SoilLayer; 7] = [
        SoilLayer::Sl1,
        SoilLayer::Sl2,
        SoilLayer::Sl3,
        SoilLayer::Sl4,
        SoilLayer::Sl5,
        SoilLayer::Sl6,
        SoilLayer::Sl7,
    ];

    /// Zero-based position in [`SoilLayer::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Layer from its number, 1 to 7.
    pub fn from_number(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Column tag, e.g. `"sl3"`.
    pub fn tag(self) -> &'static str {
        match self {
            SoilLayer::Sl1 => "sl1",
            SoilLayer::Sl2 => "sl2",
            SoilLayer::Sl3 => "sl3",
            SoilLayer::Sl4 => "sl4",
            SoilLayer::Sl5 => "sl5",
            SoilLayer::Sl6 => "sl6",
            SoilLayer::Sl7 => "sl7",
        }
    }

    /// Parse a column tag. Tags are lowercase.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layer| layer.tag() == tag)
    }

    /// Sampling depth in centimeters.
    pub fn depth_cm(self) -> f64 {
        DEPTH_BOUNDARIES_CM[self.index()]
    }
}

impl fmt::Display for SoilLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Thickness of each of the six intervals between layers.
pub fn interval_thicknesses() -> [f64; 6] {
    std::array::from_fn(|i| DEPTH_BOUNDARIES_CM[i + 1] - DEPTH_BOUNDARIES_CM[i])
}

/// Thickness-weighted trapezoidal mean over the full profile.
///
/// `values` are in layer order `sl1..sl7`. A NaN in any layer makes the
/// result NaN.
pub fn depth_weighted_mean(values: &[f64; 7]) -> f64 {
    let integral: f64 = interval_thicknesses()
        .iter()
        .zip(values.windows(2))
        .map(|(thickness, pair)| thickness * (pair[0] + pair[1]) / 2.0)
        .sum();

    integral / TOTAL_DEPTH_CM
}
