//! Enrollment aggregation

use std::collections::BTreeMap;

use crate::client::models::EnrollmentRecord;

/// Total enrollment per year.
///
/// An explicit total row (no grade) is used when present; otherwise the
/// per-grade rows for the year are summed.
pub fn enrollment_totals(records: &[EnrollmentRecord]) -> BTreeMap<i32, u32> {
    let mut explicit: BTreeMap<i32, u32> = BTreeMap::new();
    let mut summed: BTreeMap<i32, u32> = BTreeMap::new();

    for record in records {
        match record.grade_id {
            None => {
                explicit.entry(record.year).or_insert(record.count);
            }
            Some(_) => *summed.entry(record.year).or_default() += record.count,
        }
    }

    for (year, total) in explicit {
        summed.insert(year, total);
    }
    summed
}

/// Per-grade counts for one year, keyed by grade id
pub fn enrollment_by_grade(records: &[EnrollmentRecord], year: i32) -> BTreeMap<u32, u32> {
    let mut grades = BTreeMap::new();
    for record in records.iter().filter(|r| r.year == year) {
        if let Some(grade_id) = record.grade_id {
            *grades.entry(grade_id).or_default() += record.count;
        }
    }
    grades
}

/// Enrollment of a single grade per year
pub fn enrollment_for_grade(records: &[EnrollmentRecord], grade_id: u32) -> BTreeMap<i32, u32> {
    let mut years = BTreeMap::new();
    for record in records.iter().filter(|r| r.grade_id == Some(grade_id)) {
        *years.entry(record.year).or_default() += record.count;
    }
    years
}
