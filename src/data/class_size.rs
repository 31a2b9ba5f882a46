//! Average class sizes per grade band

use std::collections::BTreeMap;

use serde::Serialize;

use super::trend::{round_to, weighted_average};
use crate::client::models::ClassSizeRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassSizeRow {
    pub year: i32,
    pub grade_band: String,
    pub average_size: f64,
    pub state_average: Option<f64>,
}

fn averages(records: &[ClassSizeRecord]) -> BTreeMap<(i32, String), f64> {
    let mut grouped: BTreeMap<(i32, String), Vec<f64>> = BTreeMap::new();
    for record in records {
        grouped
            .entry((record.year, record.grade_band.clone()))
            .or_default()
            .push(record.average_size);
    }
    grouped
        .into_iter()
        .filter_map(|(key, sizes)| {
            weighted_average(sizes.into_iter().map(|s| (s, 1.0))).map(|avg| (key, round_to(avg, 1)))
        })
        .collect()
}

/// Class sizes ordered by year then grade band, with the state average
pub fn class_sizes(records: &[ClassSizeRecord], state_records: &[ClassSizeRecord]) -> Vec<ClassSizeRow> {
    let state = averages(state_records);

    averages(records)
        .into_iter()
        .map(|((year, grade_band), average_size)| {
            let state_average = state.get(&(year, grade_band.clone())).copied();
            ClassSizeRow {
                year,
                grade_band,
                average_size,
                state_average,
            }
        })
        .collect()
}
