//! Assessment display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{format_change, or_missing};
use crate::data::assessment::ProficiencyPoint;

/// One year of a proficiency trend
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ProficiencyDisplay {
    #[tabled(rename = "YEAR")]
    pub year: i32,

    /// Students at or above proficient; censored values show as "<10%"/">90%"
    #[tabled(rename = "PROFICIENT")]
    pub proficient: String,

    /// Percentage points since the previous exact value
    #[tabled(rename = "CHANGE")]
    pub change: String,

    #[tabled(rename = "STATE")]
    pub state: String,
}

impl From<&ProficiencyPoint> for ProficiencyDisplay {
    fn from(point: &ProficiencyPoint) -> Self {
        Self {
            year: point.year,
            proficient: point.proficiency.to_string(),
            change: or_missing(point.change, |c| format_change(c, 1)),
            state: or_missing(point.state, |s| s.to_string()),
        }
    }
}
