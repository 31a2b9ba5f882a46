//! Staffing and class size resources

use serde::{Deserialize, Serialize};

use crate::data::HasYear;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffRecord {
    pub year: i32,

    #[serde(default)]
    pub district_id: Option<u32>,

    #[serde(default)]
    pub school_id: Option<u32>,

    /// Full-time-equivalent teachers
    pub teacher_fte: f64,

    /// Nominal dollars
    #[serde(default)]
    pub average_salary: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSizeRecord {
    pub year: i32,

    #[serde(default)]
    pub district_id: Option<u32>,

    #[serde(default)]
    pub school_id: Option<u32>,

    /// Grade band as reported, e.g. "Grades 1-2"
    pub grade_band: String,

    pub average_size: f64,
}

impl HasYear for StaffRecord {
    fn year(&self) -> i32 {
        self.year
    }
}

impl HasYear for ClassSizeRecord {
    fn year(&self) -> i32 {
        self.year
    }
}
