//! Student outcome resources

use serde::{Deserialize, Serialize};

use crate::data::HasYear;

/// Four-year graduation cohort for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraduationRecord {
    pub year: i32,

    #[serde(default)]
    pub district_id: Option<u32>,

    #[serde(default)]
    pub school_id: Option<u32>,

    pub cohort_size: u32,

    pub graduated: u32,

    #[serde(default)]
    pub dropped_out: u32,
}

/// Reported plans of graduating students, e.g. "Four-year college"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostGraduationRecord {
    pub year: i32,

    #[serde(default)]
    pub district_id: Option<u32>,

    #[serde(default)]
    pub school_id: Option<u32>,

    pub plan: String,

    pub count: u32,
}

impl HasYear for GraduationRecord {
    fn year(&self) -> i32 {
        self.year
    }
}

impl HasYear for PostGraduationRecord {
    fn year(&self) -> i32 {
        self.year
    }
}
