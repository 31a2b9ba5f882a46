//! Safety display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{MISSING, format_count, or_missing};
use crate::client::models::SafetyCategory;
use crate::data::safety::SafetyYear;

/// Incidents of one category for one year
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SafetyYearDisplay {
    #[tabled(rename = "YEAR")]
    pub year: i32,

    #[tabled(rename = "INCIDENTS")]
    pub incidents: String,

    #[tabled(rename = "ENROLLMENT")]
    pub enrollment: String,

    #[tabled(rename = "PER 100")]
    pub per_100: String,

    #[tabled(rename = "STATE PER 100")]
    pub state_per_100: String,

    /// Most frequent classification
    #[tabled(rename = "MOST COMMON")]
    pub most_common: String,
}

impl From<&SafetyYear> for SafetyYearDisplay {
    fn from(year: &SafetyYear) -> Self {
        Self {
            year: year.year,
            incidents: format_count(year.total),
            enrollment: or_missing(year.enrollment, format_count),
            per_100: or_missing(year.per_100, |r| format!("{:.1}", r)),
            state_per_100: or_missing(year.state_per_100, |r| format!("{:.1}", r)),
            most_common: year
                .top_classification()
                .map(|(name, _)| name.to_string())
                .unwrap_or_else(|| MISSING.to_string()),
        }
    }
}

/// Latest year of one category, for the all-categories summary
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SafetySummaryDisplay {
    #[tabled(rename = "CATEGORY")]
    pub category: String,

    #[tabled(rename = "YEAR")]
    pub year: String,

    #[tabled(rename = "INCIDENTS")]
    pub incidents: String,

    #[tabled(rename = "PER 100")]
    pub per_100: String,

    #[tabled(rename = "STATE PER 100")]
    pub state_per_100: String,
}

impl SafetySummaryDisplay {
    pub fn new(category: SafetyCategory, latest: Option<&SafetyYear>) -> Self {
        Self {
            category: category.to_string(),
            year: or_missing(latest, |y| y.year.to_string()),
            incidents: or_missing(latest, |y| format_count(y.total)),
            per_100: or_missing(latest.and_then(|y| y.per_100), |r| format!("{:.1}", r)),
            state_per_100: or_missing(latest.and_then(|y| y.state_per_100), |r| {
                format!("{:.1}", r)
            }),
        }
    }
}

/// Incident count of one classification
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ClassificationDisplay {
    #[tabled(rename = "CLASSIFICATION")]
    pub classification: String,

    #[tabled(rename = "INCIDENTS")]
    pub incidents: String,
}

impl ClassificationDisplay {
    /// Rows for one year, most incidents first
    pub fn rows(year: &SafetyYear) -> Vec<Self> {
        let mut counts: Vec<(&String, &u32)> = year.classifications.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        counts
            .into_iter()
            .map(|(name, count)| Self {
                classification: name.clone(),
                incidents: format_count(*count),
            })
            .collect()
    }
}
