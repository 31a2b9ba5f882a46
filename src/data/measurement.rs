//! Joining measurement rows with their types

use std::collections::{BTreeMap, HashMap};

use log::warn;

use crate::client::models::{Measurement, MeasurementRow, MeasurementType};

/// Result of joining rows with measurement types
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinedMeasurements {
    pub measurements: Vec<Measurement>,
    /// Rows whose `measurement_type_id` matched no known type
    pub dropped: usize,
}

/// Attach type and category to each row; rows with an unknown type are
/// dropped and counted.
pub fn join_measurements(rows: &[MeasurementRow], types: &[MeasurementType]) -> JoinedMeasurements {
    let types_by_id: HashMap<u32, &MeasurementType> = types.iter().map(|t| (t.id, t)).collect();

    let mut joined = JoinedMeasurements::default();
    for row in rows {
        match types_by_id.get(&row.measurement_type_id) {
            Some(measurement_type) => joined.measurements.push(Measurement {
                id: row.id,
                value: row.value,
                year: row.year,
                district_id: row.district_id,
                school_id: row.school_id,
                measurement_type_id: row.measurement_type_id,
                category: measurement_type.category.clone(),
                measurement_type: (*measurement_type).clone(),
            }),
            None => {
                warn!(
                    "Dropping measurement {}: unknown measurement type {}",
                    row.id, row.measurement_type_id
                );
                joined.dropped += 1;
            }
        }
    }
    joined
}

/// Most recent measurement of each type, grouped by category.
///
/// Categories and the types within them are ordered by name.
pub fn latest_by_category(measurements: &[Measurement]) -> BTreeMap<String, Vec<&Measurement>> {
    let mut latest: HashMap<u32, &Measurement> = HashMap::new();
    for measurement in measurements {
        latest
            .entry(measurement.measurement_type_id)
            .and_modify(|current| {
                if measurement.year > current.year {
                    *current = measurement;
                }
            })
            .or_insert(measurement);
    }

    let mut grouped: BTreeMap<String, Vec<&Measurement>> = BTreeMap::new();
    for measurement in latest.into_values() {
        grouped
            .entry(measurement.category.clone())
            .or_default()
            .push(measurement);
    }
    for items in grouped.values_mut() {
        items.sort_by(|a, b| a.measurement_type.name.cmp(&b.measurement_type.name));
    }
    grouped
}
