//! Outcome, staffing and class size display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{format_count, format_dollars, format_percent, or_missing};
use crate::data::class_size::ClassSizeRow;
use crate::data::outcome::{GraduationYear, PlanShare};
use crate::data::staff::StaffYear;

/// Graduation cohort outcome for one year
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct GraduationDisplay {
    #[tabled(rename = "YEAR")]
    pub year: i32,

    #[tabled(rename = "COHORT")]
    pub cohort: String,

    #[tabled(rename = "GRADUATED")]
    pub graduation_rate: String,

    #[tabled(rename = "DROPPED OUT")]
    pub dropout_rate: String,

    #[tabled(rename = "STATE GRADUATED")]
    pub state_graduation_rate: String,
}

impl From<&GraduationYear> for GraduationDisplay {
    fn from(year: &GraduationYear) -> Self {
        Self {
            year: year.year,
            cohort: format_count(year.cohort_size),
            graduation_rate: format_percent(year.graduation_rate),
            dropout_rate: format_percent(year.dropout_rate),
            state_graduation_rate: or_missing(year.state_graduation_rate, format_percent),
        }
    }
}

/// Post-graduation plan share
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PlanDisplay {
    #[tabled(rename = "PLAN")]
    pub plan: String,

    #[tabled(rename = "STUDENTS")]
    pub students: String,

    #[tabled(rename = "SHARE")]
    pub share: String,
}

impl From<&PlanShare> for PlanDisplay {
    fn from(share: &PlanShare) -> Self {
        Self {
            plan: share.plan.clone(),
            students: format_count(share.count),
            share: format_percent(share.percent),
        }
    }
}

/// Teacher staffing for one year
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct StaffDisplay {
    #[tabled(rename = "YEAR")]
    pub year: i32,

    /// Full-time-equivalent teachers
    #[tabled(rename = "TEACHERS (FTE)")]
    pub teachers: String,

    #[tabled(rename = "AVG SALARY")]
    pub average_salary: String,

    /// Average salary in fiscal-year dollars
    #[tabled(rename = "REAL SALARY")]
    pub adjusted_salary: String,

    #[tabled(rename = "STUDENTS/TEACHER")]
    pub students_per_teacher: String,
}

impl From<&StaffYear> for StaffDisplay {
    fn from(year: &StaffYear) -> Self {
        Self {
            year: year.year,
            teachers: format!("{:.1}", year.teacher_fte),
            average_salary: or_missing(year.average_salary, format_dollars),
            adjusted_salary: or_missing(year.adjusted_salary, format_dollars),
            students_per_teacher: or_missing(year.students_per_teacher, |r| format!("{:.1}", r)),
        }
    }
}

/// Average class size of one grade band
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ClassSizeDisplay {
    #[tabled(rename = "YEAR")]
    pub year: i32,

    #[tabled(rename = "GRADE BAND")]
    pub grade_band: String,

    #[tabled(rename = "AVG SIZE")]
    pub average_size: String,

    #[tabled(rename = "STATE AVG")]
    pub state_average: String,
}

impl From<&ClassSizeRow> for ClassSizeDisplay {
    fn from(row: &ClassSizeRow) -> Self {
        Self {
            year: row.year,
            grade_band: row.grade_band.clone(),
            average_size: format!("{:.1}", row.average_size),
            state_average: or_missing(row.state_average, |s| format!("{:.1}", s)),
        }
    }
}
