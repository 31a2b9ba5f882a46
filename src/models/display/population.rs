//! Enrollment and measurement display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{format_change, format_count, format_percent, or_missing};
use crate::client::models::Measurement;
use crate::data::{YearDelta, percentage, round_to};

/// Total enrollment for one year
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct EnrollmentYearDisplay {
    #[tabled(rename = "YEAR")]
    pub year: i32,

    #[tabled(rename = "STUDENTS")]
    pub students: String,

    #[tabled(rename = "CHANGE")]
    pub change: String,

    #[tabled(rename = "% CHANGE")]
    pub percent_change: String,
}

impl From<&YearDelta> for EnrollmentYearDisplay {
    fn from(delta: &YearDelta) -> Self {
        Self {
            year: delta.year,
            students: format_count(delta.value.max(0.0) as u32),
            change: or_missing(delta.change, |c| format_change(c, 0)),
            percent_change: or_missing(delta.percent_change, |p| {
                format!("{}%", format_change(p, 1))
            }),
        }
    }
}

/// Enrollment of one grade in one year
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct GradeEnrollmentDisplay {
    #[tabled(rename = "GRADE")]
    pub grade: u32,

    #[tabled(rename = "STUDENTS")]
    pub students: String,

    #[tabled(rename = "SHARE")]
    pub share: String,
}

impl GradeEnrollmentDisplay {
    pub fn new(grade: u32, students: u32, total: u32) -> Self {
        Self {
            grade,
            students: format_count(students),
            share: format_percent(percentage(students.into(), total.into(), 1)),
        }
    }
}

/// Latest value of one measurement type
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MeasurementDisplay {
    #[tabled(rename = "CATEGORY")]
    pub category: String,

    #[tabled(rename = "MEASURE")]
    pub measure: String,

    #[tabled(rename = "YEAR")]
    pub year: i32,

    #[tabled(rename = "VALUE")]
    pub value: String,
}

impl From<&Measurement> for MeasurementDisplay {
    fn from(measurement: &Measurement) -> Self {
        Self {
            category: measurement.category.clone(),
            measure: measurement.measurement_type.name.clone(),
            year: measurement.year,
            value: round_to(measurement.value, 2).to_string(),
        }
    }
}
