//! Coordinate grid definitions for converted soil rasters.
//!
//! A [`CoordinateGrid`] fully specifies the lattice a 2D array is written
//! onto: upper-left origin, signed cell sizes, shape and CRS. Grids are
//! never inferred from source files; each known source dataset has a named
//! [`GridPreset`], and a [`GridCatalog`] lets callers register more.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{SoilCommonError, SoilCommonResult};
use crate::{BoundingBox, CrsCode};

/// A regular lat/lon lattice with an explicit affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateGrid {
    /// X coordinate of the raster origin (upper-left corner of cell 0,0)
    pub origin_x: f64,
    /// Y coordinate of the raster origin
    pub origin_y: f64,
    /// Cell width in degrees
    pub cell_size_x: f64,
    /// Cell height in degrees; negative when rows run north to south
    pub cell_size_y: f64,
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
    #[serde(default)]
    pub crs: CrsCode,
}

impl CoordinateGrid {
    /// Create a new WGS84 grid.
    pub fn new(
        origin_x: f64,
        origin_y: f64,
        cell_size_x: f64,
        cell_size_y: f64,
        rows: usize,
        cols: usize,
    ) -> Self {
        Self {
            origin_x,
            origin_y,
            cell_size_x,
            cell_size_y,
            rows,
            cols,
            crs: CrsCode::Epsg4326,
        }
    }

    /// Affine transform in GDAL order: `[ulx, xres, 0, uly, 0, yres]`.
    pub fn geo_transform(&self) -> [f64; 6] {
        [
            self.origin_x,
            self.cell_size_x,
            0.0,
            self.origin_y,
            0.0,
            self.cell_size_y,
        ]
    }

    /// Rows are ordered north to south.
    pub fn is_north_up(&self) -> bool {
        self.cell_size_y < 0.0
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Check if grid is empty.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Geographic extent covered by the grid's cells.
    pub fn bbox(&self) -> BoundingBox {
        let far_x = self.origin_x + self.cols as f64 * self.cell_size_x;
        let far_y = self.origin_y + self.rows as f64 * self.cell_size_y;

        BoundingBox::new(
            self.origin_x.min(far_x),
            self.origin_y.min(far_y),
            self.origin_x.max(far_x),
            self.origin_y.max(far_y),
        )
    }

    /// Coordinates of the centre of cell (row, col).
    pub fn cell_center(&self, row: usize, col: usize) -> Option<(f64, f64)> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some((
            self.origin_x + (col as f64 + 0.5) * self.cell_size_x,
            self.origin_y + (row as f64 + 0.5) * self.cell_size_y,
        ))
    }

    /// Fail unless an array of `rows` x `cols` can be written onto this grid.
    pub fn check_shape(&self, rows: usize, cols: usize) -> SoilCommonResult<()> {
        if rows != self.rows || cols != self.cols {
            return Err(SoilCommonError::ShapeMismatch {
                expected_rows: self.rows,
                expected_cols: self.cols,
                actual_rows: rows,
                actual_cols: cols,
            });
        }
        Ok(())
    }

    /// Validate the grid definition.
    pub fn validate(&self, name: &str) -> SoilCommonResult<()> {
        let invalid = |message: &str| SoilCommonError::InvalidGrid {
            name: name.to_string(),
            message: message.to_string(),
        };

        if self.is_empty() {
            return Err(invalid("rows and cols must be > 0"));
        }
        if !self.origin_x.is_finite() || !self.origin_y.is_finite() {
            return Err(invalid("origin must be finite"));
        }
        if !(self.cell_size_x.is_finite() && self.cell_size_x > 0.0) {
            return Err(invalid("cell_size_x must be a positive number"));
        }
        if !self.cell_size_y.is_finite() || self.cell_size_y == 0.0 {
            return Err(invalid("cell_size_y must be non-zero"));
        }
        Ok(())
    }
}

/// Grids of the source datasets this workspace knows how to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridPreset {
    /// Global 5 arc-minute grid anchored at (-180, -90), rows south to north.
    ///
    /// Target of the Dai et al. (2019) soil hydraulic/thermal binaries after
    /// 10x downsampling of their native 30 arc-second grid.
    Global5Arcmin,
    /// China 30 arc-second grid of the Shangguan et al. (2013) NetCDF files.
    China30Arcsec,
}

impl GridPreset {
    /// Every built-in preset.
    pub const ALL: [GridPreset; 2] = [GridPreset::Global5Arcmin, GridPreset::China30Arcsec];

    /// Catalog name of this preset.
    pub fn name(&self) -> &'static str {
        match self {
            GridPreset::Global5Arcmin => "global_5arcmin",
            GridPreset::China30Arcsec => "china_30arcsec",
        }
    }

    /// Look up a preset by catalog name.
    pub fn from_name(name: &str) -> SoilCommonResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| SoilCommonError::UnknownPreset(name.to_string()))
    }

    /// The grid definition of this preset.
    pub fn grid(&self) -> CoordinateGrid {
        match self {
            GridPreset::Global5Arcmin => {
                CoordinateGrid::new(-180.0, -90.0, 1.0 / 12.0, 1.0 / 12.0, 2160, 4320)
            }
            // Cell sizes are the native steps of the source product; the
            // latitude step differs slightly from the longitude step.
            GridPreset::China30Arcsec => CoordinateGrid::new(
                73.004166,
                18.004168,
                0.0083333,
                0.008331404166666667,
                4320,
                7560,
            ),
        }
    }
}

/// Named table of coordinate grids.
///
/// Starts with the built-in presets; additional source datasets are
/// registered as data (see `ingestion::config::load_grid_catalog`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridCatalog {
    grids: BTreeMap<String, CoordinateGrid>,
}

impl GridCatalog {
    /// Catalog containing every built-in preset.
    pub fn builtin() -> Self {
        let grids = GridPreset::ALL
            .into_iter()
            .map(|p| (p.name().to_string(), p.grid()))
            .collect();
        Self { grids }
    }

    /// Register (or replace) a named grid after validating it.
    pub fn insert(&mut self, name: impl Into<String>, grid: CoordinateGrid) -> SoilCommonResult<()> {
        let name = name.into();
        grid.validate(&name)?;
        self.grids.insert(name, grid);
        Ok(())
    }

    /// Merge every grid of `other` into this catalog.
    pub fn extend(&mut self, other: GridCatalog) -> SoilCommonResult<()> {
        for (name, grid) in other.grids {
            self.insert(name, grid)?;
        }
        Ok(())
    }

    /// Look up a grid by name.
    pub fn get(&self, name: &str) -> SoilCommonResult<&CoordinateGrid> {
        self.grids
            .get(name)
            .ok_or_else(|| SoilCommonError::UnknownPreset(name.to_string()))
    }

    /// Registered grid names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.grids.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }
}
