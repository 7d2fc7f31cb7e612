//! Collapse per-layer attribute columns into depth-weighted means.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::depth::{depth_weighted_mean, SoilLayer};
use crate::error::{ProfileError, Result};
use crate::layer::LayerKey;
use crate::table::AttributeTable;

/// The seven layer columns of one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthProfile {
    pub property: String,
    /// Column positions in layer order `sl1..sl7`.
    pub columns: [usize; 7],
    /// Position of the property's leftmost layer column.
    pub first_column: usize,
}

#[derive(Debug)]
struct PartialProfile {
    property: String,
    columns: [Option<usize>; 7],
    first_column: usize,
}

/// Group layer columns by property.
///
/// Properties are returned in order of their first column. Every property
/// needs each of the seven layers exactly once.
///
/// # Errors
///
/// - [`ProfileError::DuplicateLayer`] if two columns parse to the same key
/// - [`ProfileError::MissingLayers`] if a property lacks any layer
pub fn find_depth_profiles(table: &AttributeTable) -> Result<Vec<DepthProfile>> {
    let mut partials: Vec<PartialProfile> = Vec::new();
    let mut by_property: HashMap<String, usize> = HashMap::new();

    for (position, name) in table.column_names().enumerate() {
        let Some(key) = LayerKey::parse(name) else {
            continue;
        };

        let slot = *by_property.entry(key.property.clone()).or_insert_with(|| {
            partials.push(PartialProfile {
                property: key.property.clone(),
                columns: [None; 7],
                first_column: position,
            });
            partials.len() - 1
        });

        let partial = &mut partials[slot];
        if let Some(existing) = partial.columns[key.layer.index()] {
            return Err(ProfileError::DuplicateLayer {
                property: key.property,
                layer: key.layer,
                first: table.columns()[existing].name.clone(),
                second: name.to_string(),
            });
        }
        partial.columns[key.layer.index()] = Some(position);
    }

    partials.into_iter().map(complete_profile).collect()
}

fn complete_profile(partial: PartialProfile) -> Result<DepthProfile> {
    let missing: Vec<SoilLayer> = SoilLayer::ALL
        .into_iter()
        .filter(|layer| partial.columns[layer.index()].is_none())
        .collect();
    if !missing.is_empty() {
        return Err(ProfileError::MissingLayers {
            property: partial.property,
            missing,
        });
    }

    let mut columns = [0; 7];
    for (slot, column) in columns.iter_mut().zip(partial.columns) {
        *slot = column.unwrap_or_default();
    }

    Ok(DepthProfile {
        property: partial.property,
        columns,
        first_column: partial.first_column,
    })
}

/// Replace each property's seven layer columns by its depth-weighted mean.
///
/// The aggregated column is named after the property and takes the place
/// of the property's leftmost layer column. Other columns and the index
/// pass through in order. Layer values are always read in depth order,
/// whatever their order in the table.
///
/// # Errors
///
/// Besides the errors of [`find_depth_profiles`],
/// [`ProfileError::NameConflict`] if a non-layer column already carries a
/// property's name.
pub fn aggregate_depth_profiles(table: &AttributeTable) -> Result<AttributeTable> {
    let profiles = find_depth_profiles(table)?;

    for profile in &profiles {
        let conflict = table
            .column_names()
            .any(|name| name == profile.property && LayerKey::parse(name).is_none());
        if conflict {
            return Err(ProfileError::NameConflict(profile.property.clone()));
        }
    }

    let layer_columns: Vec<bool> = table
        .column_names()
        .map(|name| LayerKey::parse(name).is_some())
        .collect();

    let mut output = table.empty_like();
    for (position, column) in table.columns().iter().enumerate() {
        if !layer_columns[position] {
            output.push_column(column.name.clone(), column.values.clone())?;
            continue;
        }

        if let Some(profile) = profiles.iter().find(|p| p.first_column == position) {
            let values = aggregate_profile(table, profile);
            debug!(
                property = %profile.property,
                rows = values.len(),
                "Aggregated depth profile"
            );
            output.push_column(profile.property.clone(), values)?;
        }
    }

    info!(
        properties = profiles.len(),
        rows = output.n_rows(),
        columns_in = table.n_columns(),
        columns_out = output.n_columns(),
        "Aggregated soil depth profiles"
    );
    Ok(output)
}

fn aggregate_profile(table: &AttributeTable, profile: &DepthProfile) -> Vec<f64> {
    let columns = table.columns();
    (0..table.n_rows())
        .map(|row| {
            let values: [f64; 7] =
                std::array::from_fn(|i| columns[profile.columns[i]].values[row]);
            depth_weighted_mean(&values)
        })
        .collect()
}

/// Read a CSV table, aggregate its depth profiles and write the result.
pub fn aggregate_csv(input: &Path, output: &Path, index_column: Option<&str>) -> Result<()> {
    let table = AttributeTable::from_csv_path(input, index_column)?;
    let aggregated = aggregate_depth_profiles(&table)?;
    aggregated.to_csv_path(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[(&str, f64)]) -> AttributeTable {
        let mut table = AttributeTable::new();
        for (name, value) in columns {
            table.push_column(*name, vec![*value]).unwrap();
        }
        table
    }

    fn full_profile(property: &str) -> Vec<(String, f64)> {
        SoilLayer::ALL
            .into_iter()
            .map(|layer| (format!("{}_{}", property, layer), layer.index() as f64 * 10.0))
            .collect()
    }

    #[test]
    fn test_find_profiles_in_column_order() {
        let mut columns = vec![("area".to_string(), 1.0)];
        columns.extend(full_profile("clay"));
        columns.extend(full_profile("sand"));
        let refs: Vec<(&str, f64)> = columns.iter().map(|(n, v)| (n.as_str(), *v)).collect();

        let profiles = find_depth_profiles(&table(&refs)).unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].property, "clay");
        assert_eq!(profiles[0].first_column, 1);
        assert_eq!(profiles[0].columns, [1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(profiles[1].property, "sand");
        assert_eq!(profiles[1].first_column, 8);
    }

    #[test]
    fn test_missing_layers_listed() {
        let t = table(&[("x_sl1", 0.0), ("x_sl2", 0.0), ("x_sl5", 0.0)]);
        match find_depth_profiles(&t).unwrap_err() {
            ProfileError::MissingLayers { property, missing } => {
                assert_eq!(property, "x");
                assert_eq!(
                    missing,
                    vec![SoilLayer::Sl3, SoilLayer::Sl4, SoilLayer::Sl6, SoilLayer::Sl7]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_property_without_sl1_still_detected() {
        let t = table(&[("x_sl2", 0.0)]);
        assert!(matches!(
            find_depth_profiles(&t),
            Err(ProfileError::MissingLayers { .. })
        ));
    }

    #[test]
    fn test_duplicate_layer() {
        let mut columns = full_profile("SA");
        columns.push(("SA_sl3_mean".to_string(), 1.0));
        let refs: Vec<(&str, f64)> = columns.iter().map(|(n, v)| (n.as_str(), *v)).collect();

        match find_depth_profiles(&table(&refs)).unwrap_err() {
            ProfileError::DuplicateLayer {
                property,
                layer,
                first,
                second,
            } => {
                assert_eq!(property, "SA");
                assert_eq!(layer, SoilLayer::Sl3);
                assert_eq!(first, "SA_sl3");
                assert_eq!(second, "SA_sl3_mean");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_name_conflict() {
        let mut columns = vec![("x".to_string(), 1.0)];
        columns.extend(full_profile("x"));
        let refs: Vec<(&str, f64)> = columns.iter().map(|(n, v)| (n.as_str(), *v)).collect();

        assert!(matches!(
            aggregate_depth_profiles(&table(&refs)),
            Err(ProfileError::NameConflict(name)) if name == "x"
        ));
    }

    #[test]
    fn test_table_without_layers_unchanged() {
        let t = table(&[("area", 1.0), ("slope", 0.2)]);
        assert_eq!(aggregate_depth_profiles(&t).unwrap(), t);
    }
}
