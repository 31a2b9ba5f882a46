//! Measurement resources (demographic and other per-entity metrics)

use serde::{Deserialize, Serialize};

use crate::data::HasYear;

/// Metric definition, e.g. "Free/reduced lunch eligible (%)"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementType {
    pub id: u32,

    pub name: String,

    /// Grouping shown on the overview, e.g. "Demographics"
    pub category: String,
}

/// One data point as returned by `measurements/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRow {
    pub id: u32,

    pub value: f64,

    pub year: i32,

    #[serde(default)]
    pub district_id: Option<u32>,

    #[serde(default)]
    pub school_id: Option<u32>,

    pub measurement_type_id: u32,
}

/// Measurement row joined with its type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub id: u32,
    pub value: f64,
    pub year: i32,
    pub district_id: Option<u32>,
    pub school_id: Option<u32>,
    pub measurement_type_id: u32,
    pub category: String,
    pub measurement_type: MeasurementType,
}

impl HasYear for MeasurementRow {
    fn year(&self) -> i32 {
        self.year
    }
}

impl HasYear for Measurement {
    fn year(&self) -> i32 {
        self.year
    }
}
