//! Enrollment resources

use serde::{Deserialize, Serialize};

use crate::data::HasYear;

/// Enrollment count for one year; `grade_id` of `None` is the entity total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    pub year: i32,

    #[serde(default)]
    pub district_id: Option<u32>,

    #[serde(default)]
    pub school_id: Option<u32>,

    #[serde(default)]
    pub grade_id: Option<u32>,

    pub count: u32,
}

impl HasYear for EnrollmentRecord {
    fn year(&self) -> i32 {
        self.year
    }
}
