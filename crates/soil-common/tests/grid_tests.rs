//! Tests for coordinate grids and the preset catalog.

use soil_common::{CoordinateGrid, GridCatalog, GridPreset, SoilCommonError};

// ============================================================================
// Preset tests
// ============================================================================

#[test]
fn test_presets_are_valid() {
    for preset in GridPreset::ALL {
        preset.grid().validate(preset.name()).unwrap();
    }
}

#[test]
fn test_global_preset_matches_downsampled_binary_shape() {
    // 21600 x 43200 source cells, downsampled by 10
    let grid = GridPreset::Global5Arcmin.grid();
    assert_eq!(grid.rows, 21600 / 10);
    assert_eq!(grid.cols, 43200 / 10);
    assert_eq!(grid.geo_transform()[0], -180.0);
    assert_eq!(grid.geo_transform()[3], -90.0);
    assert_eq!(grid.cell_size_x, 180.0 / 2160.0);
}

#[test]
fn test_global_cell_centers_span_the_globe() {
    let grid = GridPreset::Global5Arcmin.grid();
    let (x0, y0) = grid.cell_center(0, 0).unwrap();
    let (x1, y1) = grid.cell_center(grid.rows - 1, grid.cols - 1).unwrap();

    assert!((x0 - (-180.0 + 1.0 / 24.0)).abs() < 1e-9);
    assert!((y0 - (-90.0 + 1.0 / 24.0)).abs() < 1e-9);
    assert!((x1 - (180.0 - 1.0 / 24.0)).abs() < 1e-9);
    assert!((y1 - (90.0 - 1.0 / 24.0)).abs() < 1e-9);
}

// ============================================================================
// Catalog tests
// ============================================================================

#[test]
fn test_catalog_extend_replaces_existing_names() {
    let mut catalog = GridCatalog::builtin();
    let mut extra = GridCatalog::default();
    extra
        .insert("global_5arcmin", CoordinateGrid::new(-180.0, 90.0, 0.5, -0.5, 360, 720))
        .unwrap();

    catalog.extend(extra).unwrap();

    let grid = catalog.get("global_5arcmin").unwrap();
    assert_eq!(grid.rows, 360);
    assert!(grid.is_north_up());
}

#[test]
fn test_catalog_rejects_invalid_grid() {
    let mut catalog = GridCatalog::default();
    let result = catalog.insert("broken", CoordinateGrid::new(0.0, 0.0, 0.0, 1.0, 1, 1));
    assert!(matches!(result, Err(SoilCommonError::InvalidGrid { .. })));
    assert!(catalog.is_empty());
}

#[test]
fn test_catalog_unknown_name() {
    let catalog = GridCatalog::builtin();
    match catalog.get("soilgrids_250m") {
        Err(SoilCommonError::UnknownPreset(name)) => assert_eq!(name, "soilgrids_250m"),
        other => panic!("expected UnknownPreset, got {:?}", other),
    }
}

#[test]
fn test_grid_serde_defaults_crs() {
    let json = r#"{"origin_x":0.0,"origin_y":0.0,"cell_size_x":1.0,"cell_size_y":-1.0,"rows":2,"cols":3}"#;
    let grid: CoordinateGrid = serde_json::from_str(json).unwrap();
    assert_eq!(grid.crs, soil_common::CrsCode::Epsg4326);
    assert_eq!(grid.len(), 6);
}
