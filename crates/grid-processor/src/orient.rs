//! Reorientation of 2D grids.
//!
//! Source products store rows in different orders than the target grid
//! expects. Steps are applied in sequence; each is a view reversal, so the
//! only copy happens once at the end.

use ndarray::{s, Array2, ArrayView2};
use serde::{Deserialize, Serialize};

/// One reorientation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientStep {
    /// Rotate by 180 degrees (reverse both axes)
    Rotate180,
    /// Mirror left-right (reverse column order)
    FlipHorizontal,
    /// Mirror top-bottom (reverse row order)
    FlipVertical,
}

/// Apply `steps` to `data` in order.
pub fn apply_orientation(data: ArrayView2<f64>, steps: &[OrientStep]) -> Array2<f64> {
    steps
        .iter()
        .fold(data, |view, step| match step {
            OrientStep::Rotate180 => view.slice_move(s![..;-1, ..;-1]),
            OrientStep::FlipHorizontal => view.slice_move(s![.., ..;-1]),
            OrientStep::FlipVertical => view.slice_move(s![..;-1, ..]),
        })
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_rotate_180() {
        let data = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let out = apply_orientation(data.view(), &[OrientStep::Rotate180]);
        assert_eq!(out, array![[6.0, 5.0, 4.0], [3.0, 2.0, 1.0]]);
    }

    #[test]
    fn test_flips() {
        let data = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        assert_eq!(
            apply_orientation(data.view(), &[OrientStep::FlipHorizontal]),
            array![[3.0, 2.0, 1.0], [6.0, 5.0, 4.0]]
        );
        assert_eq!(
            apply_orientation(data.view(), &[OrientStep::FlipVertical]),
            array![[4.0, 5.0, 6.0], [1.0, 2.0, 3.0]]
        );
    }

    #[test]
    fn test_rotate_then_mirror_is_vertical_flip() {
        let data = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let combined = apply_orientation(
            data.view(),
            &[OrientStep::Rotate180, OrientStep::FlipHorizontal],
        );
        assert_eq!(combined, apply_orientation(data.view(), &[OrientStep::FlipVertical]));
    }

    #[test]
    fn test_no_steps_is_identity() {
        let data = array![[1.0, 2.0], [3.0, 4.0]];
        assert_eq!(apply_orientation(data.view(), &[]), data);
    }
}
