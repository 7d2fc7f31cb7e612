//! Test data generators for synthetic soil grids and depth profiles.
//!
//! These generators create predictable, verifiable test data patterns
//! that can be used across the test suite.

use ndarray::Array2;

/// Creates a test grid with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`
///
/// This makes it easy to verify that data is being read/written correctly,
/// and that flips and rotations moved cells where expected, by checking
/// that grid[[row, col]] == col * 1000 + row.
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(5, 10);
/// assert_eq!(grid.dim(), (5, 10));
/// assert_eq!(grid[[0, 0]], 0.0);
/// assert_eq!(grid[[0, 1]], 1000.0);
/// assert_eq!(grid[[1, 0]], 1.0);
/// ```
pub fn create_test_grid(rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(row, col)| (col * 1000 + row) as f64)
}

/// Creates a grid filled with a single value.
pub fn create_constant_grid(rows: usize, cols: usize, value: f64) -> Array2<f64> {
    Array2::from_elem((rows, cols), value)
}

/// Creates a sand-fraction-like grid (percent, 0-100) with a sentinel block.
///
/// Values rise smoothly from west to east; the top-left `sentinel_rows` x
/// `sentinel_cols` block holds `sentinel`, mimicking the ocean mask of
/// gridded soil products.
pub fn create_masked_grid(
    rows: usize,
    cols: usize,
    sentinel: f64,
    sentinel_rows: usize,
    sentinel_cols: usize,
) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(row, col)| {
        if row < sentinel_rows && col < sentinel_cols {
            sentinel
        } else {
            10.0 + 80.0 * col as f64 / cols.max(1) as f64
        }
    })
}

/// Creates a grid with NaN at the given (row, col) positions.
pub fn create_grid_with_nans(
    rows: usize,
    cols: usize,
    base_value: f64,
    nan_positions: &[(usize, usize)],
) -> Array2<f64> {
    let mut grid = create_constant_grid(rows, cols, base_value);
    for &(row, col) in nan_positions {
        if row < rows && col < cols {
            grid[[row, col]] = f64::NAN;
        }
    }
    grid
}

/// Column names of the seven standard layers of a soil property.
///
/// # Example
///
/// ```
/// use test_utils::layer_columns;
///
/// let cols = layer_columns("SA", "mean");
/// assert_eq!(cols[0], "SA_sl1_mean");
/// assert_eq!(cols[6], "SA_sl7_mean");
/// ```
pub fn layer_columns(property: &str, statistic: &str) -> Vec<String> {
    (1..=7)
        .map(|layer| format!("{}_sl{}_{}", property, layer, statistic))
        .collect()
}

/// A depth profile that increases linearly with depth: `start + step * i`.
pub fn linear_profile(start: f64, step: f64) -> [f64; 7] {
    std::array::from_fn(|i| start + step * i as f64)
}
