//! Assessment (state test) resources

use serde::{Deserialize, Serialize};

use crate::data::HasYear;

/// Tested subject, e.g. "mat", "ela", "sci"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSubject {
    pub id: u32,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Demographic slice of the tested population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSubgroup {
    pub id: u32,

    pub name: String,
}

/// One assessment result row.
///
/// The same shape is returned at state, district and school level. A row
/// with no `grade_id` is the all-grades aggregate for its year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRow {
    pub year: i32,

    #[serde(default)]
    pub district_id: Option<u32>,

    #[serde(default)]
    pub school_id: Option<u32>,

    pub assessment_subject_id: u32,

    #[serde(default)]
    pub assessment_subject: Option<String>,

    pub assessment_subgroup_id: u32,

    #[serde(default)]
    pub assessment_subgroup: Option<String>,

    #[serde(default)]
    pub grade_id: Option<u32>,

    #[serde(default)]
    pub grade: Option<String>,

    /// Percent of students at or above proficient
    #[serde(default)]
    pub above_proficient_percentage: Option<f64>,

    /// Censoring flag such as `SCORE_UNDER_10`
    #[serde(default)]
    pub above_proficient_percentage_exception: Option<String>,
}

impl HasYear for AssessmentRow {
    fn year(&self) -> i32 {
        self.year
    }
}
