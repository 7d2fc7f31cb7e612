//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in degrees (EPSG:4326).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Width of the bounding box in degrees.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in degrees.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if a point is contained within this bbox.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Check if this bbox lies entirely within valid geographic coordinates.
    pub fn is_geographic(&self) -> bool {
        self.min_x >= -180.0 && self.max_x <= 180.0 && self.min_y >= -90.0 && self.max_y <= 90.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let bbox = BoundingBox::new(73.0, 18.0, 136.0, 54.0);
        assert_eq!(bbox.width(), 63.0);
        assert_eq!(bbox.height(), 36.0);
    }

    #[test]
    fn test_contains_point() {
        let bbox = BoundingBox::new(-10.0, -10.0, 10.0, 10.0);
        assert!(bbox.contains_point(0.0, 0.0));
        assert!(bbox.contains_point(10.0, -10.0));
        assert!(!bbox.contains_point(10.5, 0.0));
    }

    #[test]
    fn test_is_geographic() {
        assert!(BoundingBox::new(-180.0, -90.0, 180.0, 90.0).is_geographic());
        assert!(!BoundingBox::new(-181.0, -90.0, 180.0, 90.0).is_geographic());
    }
}
