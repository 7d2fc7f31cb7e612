//! Integration tests: write small NetCDF files and read them back.

use netcdf_parser::{
    read_variable, read_variables, try_read_variables, variable_descriptions, NetCdfError,
};
use test_utils::{
    assert_approx_eq, create_test_grid, temp_test_dir, write_netcdf_fixture, NcFixtureVariable,
};

fn soil_fixture(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("soil.nc");
    let sand = create_test_grid(3, 4);

    write_netcdf_fixture(
        &path,
        &[
            NcFixtureVariable::grid("SA", &sand)
                .with_attr("longname", "Sand content")
                .with_attr("units", "% of weight"),
            NcFixtureVariable::new("lat", &[("lat", 3)], vec![18.0, 18.5, 19.0])
                .with_attr("long_name", "latitude"),
            NcFixtureVariable::new("lon", &[("lon", 4)], vec![73.0, 73.5, 74.0, 74.5]),
        ],
    );
    path
}

#[test]
fn test_read_all_variables() {
    let dir = temp_test_dir();
    let path = soil_fixture(dir.path());

    let set = read_variables(&path).unwrap();

    assert_eq!(set.len(), 3);
    assert_eq!(set.path(), path.as_path());

    let sand = set.get("SA").unwrap();
    assert_eq!(sand.shape(), &[3, 4]);
    // Cell (row 2, col 3) of the test grid holds col * 1000 + row
    assert_approx_eq!(sand.data[[2, 3]], 3002.0, 1e-12);
}

#[test]
fn test_descriptions_and_units() {
    let dir = temp_test_dir();
    let path = soil_fixture(dir.path());

    let set = read_variables(&path).unwrap();
    let descriptions = set.descriptions();

    assert_eq!(descriptions["SA"], Some("Sand content"));
    // Falls back to the CF-style attribute name
    assert_eq!(descriptions["lat"], Some("latitude"));
    assert_eq!(descriptions["lon"], None);

    let units = set.units();
    assert_eq!(units.len(), 1);
    assert_eq!(units["SA"], "% of weight");

    // Every mapping carries the same variable identifiers
    let array_keys: Vec<_> = set.arrays().into_keys().collect();
    let description_keys: Vec<_> = descriptions.into_keys().collect();
    assert_eq!(array_keys, description_keys);
}

#[test]
fn test_values_are_not_masked() {
    let dir = temp_test_dir();
    let path = dir.path().join("masked.nc");

    write_netcdf_fixture(
        &path,
        &[NcFixtureVariable::new("BD", &[("lat", 2), ("lon", 2)], vec![-999.0, 1.2, 1.3, -999.0])],
    );

    let bd = read_variable(&path, "BD").unwrap();
    assert_eq!(bd.data[[0, 0]], -999.0);
    assert_eq!(bd.data[[1, 1]], -999.0);
    assert!(bd.description.is_none());
    assert!(bd.units.is_none());
}

#[test]
fn test_three_dimensional_variable_keeps_rank() {
    let dir = temp_test_dir();
    let path = dir.path().join("layered.nc");
    let values: Vec<f64> = (0..2 * 3 * 4).map(|v| v as f64).collect();

    write_netcdf_fixture(
        &path,
        &[NcFixtureVariable::new("SA", &[("depth", 2), ("lat", 3), ("lon", 4)], values)],
    );

    let sand = read_variable(&path, "SA").unwrap();
    assert_eq!(sand.ndim(), 3);
    assert_eq!(sand.data[[1, 0, 0]], 12.0);
}

#[test]
fn test_missing_variable() {
    let dir = temp_test_dir();
    let path = soil_fixture(dir.path());

    let err = read_variable(&path, "CL").unwrap_err();
    assert!(matches!(err, NetCdfError::VariableNotFound { ref variable, .. } if variable == "CL"));
}

#[test]
fn test_unreadable_file() {
    let dir = temp_test_dir();
    let path = dir.path().join("not_netcdf.nc");
    std::fs::write(&path, b"this is not a netcdf file").unwrap();

    assert!(matches!(read_variables(&path), Err(NetCdfError::OpenFailed { .. })));
    assert!(try_read_variables(&path).is_none());
    assert!(try_read_variables(dir.path().join("missing.nc")).is_none());
}

#[test]
fn test_variable_descriptions_only() {
    let dir = temp_test_dir();
    let path = soil_fixture(dir.path());

    let descriptions = variable_descriptions(&path).unwrap();
    assert_eq!(descriptions.len(), 3);
    assert_eq!(descriptions["SA"].as_deref(), Some("Sand content"));
    assert_eq!(descriptions["lon"], None);
}
