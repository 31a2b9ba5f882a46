//! Test fixtures and builders for API model types
//!
//! Provides builder patterns for creating test data with sensible defaults.
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)]

use super::models::{
    AssessmentRow, AssessmentSubgroup, AssessmentSubject, ClassSizeRecord, District, EfaEntry,
    EnrollmentRecord, FinanceEntry, FinanceEntryType, GraduationRecord, MeasurementRow,
    MeasurementType, PostGraduationRecord, SafetyRecord, Sau, School, StaffRecord, Town,
};

pub fn district(id: u32, name: &str) -> District {
    District {
        id,
        name: name.to_string(),
        sau_id: None,
        town_ids: Vec::new(),
    }
}

pub fn school(id: u32, name: &str, district_id: u32) -> School {
    School {
        id,
        name: name.to_string(),
        district_id: Some(district_id),
        sau_id: None,
        grades: None,
    }
}

pub fn sau(id: u32, name: &str) -> Sau {
    Sau {
        id,
        name: name.to_string(),
    }
}

pub fn town(id: u32, name: &str, district_id: u32) -> Town {
    Town {
        id,
        name: name.to_string(),
        district_id: Some(district_id),
    }
}

pub fn subject(id: u32, name: &str) -> AssessmentSubject {
    AssessmentSubject {
        id,
        name: name.to_string(),
        description: None,
    }
}

pub fn subgroup(id: u32, name: &str) -> AssessmentSubgroup {
    AssessmentSubgroup {
        id,
        name: name.to_string(),
    }
}

pub fn measurement_type(id: u32, name: &str, category: &str) -> MeasurementType {
    MeasurementType {
        id,
        name: name.to_string(),
        category: category.to_string(),
    }
}

pub fn measurement(id: u32, type_id: u32, district_id: u32, year: i32, value: f64) -> MeasurementRow {
    MeasurementRow {
        id,
        value,
        year,
        district_id: Some(district_id),
        school_id: None,
        measurement_type_id: type_id,
    }
}

/// District-level total enrollment
pub fn enrollment(district_id: u32, year: i32, count: u32) -> EnrollmentRecord {
    EnrollmentRecord {
        year,
        district_id: Some(district_id),
        school_id: None,
        grade_id: None,
        count,
    }
}

pub fn safety(district_id: Option<u32>, year: i32, classification: &str, count: u32) -> SafetyRecord {
    SafetyRecord {
        year,
        district_id,
        school_id: None,
        classification: classification.to_string(),
        count,
    }
}

pub fn finance(
    district_id: u32,
    year: i32,
    entry_type: FinanceEntryType,
    category: &str,
    value: f64,
) -> FinanceEntry {
    FinanceEntry {
        year,
        district_id: Some(district_id),
        entry_type,
        category: category.to_string(),
        value,
    }
}

pub fn efa(town_id: u32, year: i32, student_count: u32, total_grant: f64) -> EfaEntry {
    EfaEntry {
        year,
        town_id,
        student_count,
        total_grant,
    }
}

/// Per-grade enrollment; `None` district is a state row
pub fn grade_enrollment(district_id: Option<u32>, year: i32, grade_id: u32, count: u32) -> EnrollmentRecord {
    EnrollmentRecord {
        year,
        district_id,
        school_id: None,
        grade_id: Some(grade_id),
        count,
    }
}

pub fn graduation(
    district_id: Option<u32>,
    year: i32,
    cohort_size: u32,
    graduated: u32,
    dropped_out: u32,
) -> GraduationRecord {
    GraduationRecord {
        year,
        district_id,
        school_id: None,
        cohort_size,
        graduated,
        dropped_out,
    }
}

pub fn post_graduation(district_id: u32, year: i32, plan: &str, count: u32) -> PostGraduationRecord {
    PostGraduationRecord {
        year,
        district_id: Some(district_id),
        school_id: None,
        plan: plan.to_string(),
        count,
    }
}

pub fn staff(district_id: Option<u32>, year: i32, teacher_fte: f64, average_salary: Option<f64>) -> StaffRecord {
    StaffRecord {
        year,
        district_id,
        school_id: None,
        teacher_fte,
        average_salary,
    }
}

pub fn class_size(district_id: Option<u32>, year: i32, grade_band: &str, average_size: f64) -> ClassSizeRecord {
    ClassSizeRecord {
        year,
        district_id,
        school_id: None,
        grade_band: grade_band.to_string(),
        average_size,
    }
}

// ============================================================================
// AssessmentRowBuilder
// ============================================================================

/// Builder for assessment rows.
///
/// Defaults to a state-level, all-grades row for subject 1 and subgroup 1.
///
/// # Example
/// ```ignore
/// let row = AssessmentRowBuilder::new(2024)
///     .district(5)
///     .percentage(63.3)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct AssessmentRowBuilder {
    row: AssessmentRow,
}

impl AssessmentRowBuilder {
    pub fn new(year: i32) -> Self {
        Self {
            row: AssessmentRow {
                year,
                district_id: None,
                school_id: None,
                assessment_subject_id: 1,
                assessment_subject: None,
                assessment_subgroup_id: 1,
                assessment_subgroup: None,
                grade_id: None,
                grade: None,
                above_proficient_percentage: None,
                above_proficient_percentage_exception: None,
            },
        }
    }

    pub fn district(mut self, id: u32) -> Self {
        self.row.district_id = Some(id);
        self
    }

    pub fn school(mut self, id: u32, district_id: u32) -> Self {
        self.row.school_id = Some(id);
        self.row.district_id = Some(district_id);
        self
    }

    pub fn subject(mut self, id: u32) -> Self {
        self.row.assessment_subject_id = id;
        self
    }

    pub fn subgroup(mut self, id: u32) -> Self {
        self.row.assessment_subgroup_id = id;
        self
    }

    pub fn grade(mut self, id: u32) -> Self {
        self.row.grade_id = Some(id);
        self.row.grade = Some(id.to_string());
        self
    }

    pub fn percentage(mut self, pct: f64) -> Self {
        self.row.above_proficient_percentage = Some(pct);
        self
    }

    /// Censoring flag such as `SCORE_UNDER_10`
    pub fn exception(mut self, flag: &str) -> Self {
        self.row.above_proficient_percentage_exception = Some(flag.to_string());
        self
    }

    pub fn build(self) -> AssessmentRow {
        self.row
    }
}
