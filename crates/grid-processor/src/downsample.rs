//! Block downsampling of 2D grids.
//!
//! Reduces resolution by an integer factor: each output cell summarizes a
//! `factor` x `factor` block of input cells. Trailing rows and columns that
//! do not fill a whole block are dropped.

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{GridProcessorError, Result};

/// Method used to summarize each block.
///
/// - **Mean**: area average, for continuous soil properties
/// - **Max**: preserves peaks
/// - **Nearest**: top-left cell, preserves exact values (categorical data)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DownsampleMethod {
    /// Average of the block
    #[default]
    Mean,
    /// Maximum of the block
    Max,
    /// Top-left value of the block
    Nearest,
}

impl DownsampleMethod {
    /// Parse from string (case-insensitive), defaulting to Mean.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "max" => Self::Max,
            "nearest" => Self::Nearest,
            _ => Self::Mean,
        }
    }
}

/// Downsample a 2D grid by `factor` in both directions.
///
/// Output shape is `(rows / factor, cols / factor)`, rounded down.
///
/// # Errors
///
/// Returns [`GridProcessorError::InvalidFactor`] if `factor` is zero or the
/// output would be empty.
pub fn downsample(
    data: ArrayView2<f64>,
    factor: usize,
    method: DownsampleMethod,
) -> Result<Array2<f64>> {
    let (rows, cols) = data.dim();

    if factor == 0 || rows / factor == 0 || cols / factor == 0 {
        return Err(GridProcessorError::InvalidFactor { factor, rows, cols });
    }

    if factor == 1 {
        return Ok(data.to_owned());
    }

    let out_shape = (rows / factor, cols / factor);
    let values: Vec<f64> = data
        .exact_chunks((factor, factor))
        .into_iter()
        .map(|block| match method {
            DownsampleMethod::Mean => mean_of_block(block),
            DownsampleMethod::Max => max_of_block(block),
            DownsampleMethod::Nearest => block[[0, 0]],
        })
        .collect();

    Array2::from_shape_vec(out_shape, values)
        .map_err(|e| GridProcessorError::invalid_metadata(e.to_string()))
}

/// Calculate mean of a block, handling NaN values.
///
/// If all values are NaN, returns NaN.
/// Otherwise, returns the mean of valid (non-NaN) values.
#[inline]
fn mean_of_block(block: ArrayView2<f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;

    for &v in block.iter() {
        if !v.is_nan() {
            sum += v;
            count += 1;
        }
    }

    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Calculate maximum of a block, handling NaN values.
#[inline]
fn max_of_block(block: ArrayView2<f64>) -> f64 {
    block
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
        .unwrap_or(f64::NAN)
}
