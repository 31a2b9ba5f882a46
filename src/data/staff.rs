//! Teacher staffing and salaries

use std::collections::BTreeMap;

use serde::Serialize;

use super::finance::maybe_adjust;
use super::trend::{round_to, weighted_average};
use crate::client::models::StaffRecord;
use crate::error::DataError;

/// Staffing for one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffYear {
    pub year: i32,
    pub teacher_fte: f64,
    pub average_salary: Option<f64>,
    /// Average salary in the target year's dollars
    pub adjusted_salary: Option<f64>,
    pub students_per_teacher: Option<f64>,
}

/// Sum FTE per year, weight salaries by FTE and join enrollment
pub fn staff_by_year(
    records: &[StaffRecord],
    enrollment: &BTreeMap<i32, u32>,
    adjust_to: Option<i32>,
) -> Result<Vec<StaffYear>, DataError> {
    let mut by_year: BTreeMap<i32, Vec<&StaffRecord>> = BTreeMap::new();
    for record in records {
        by_year.entry(record.year).or_default().push(record);
    }

    by_year
        .into_iter()
        .map(|(year, rows)| {
            let teacher_fte: f64 = rows.iter().map(|r| r.teacher_fte).sum();
            let average_salary = weighted_average(
                rows.iter()
                    .filter_map(|r| r.average_salary.map(|salary| (salary, r.teacher_fte))),
            );
            let adjusted_salary = match (average_salary, adjust_to) {
                (Some(salary), Some(_)) => Some(round_to(maybe_adjust(salary, year, adjust_to)?, 0)),
                _ => None,
            };
            let students_per_teacher = enrollment
                .get(&year)
                .filter(|_| teacher_fte > 0.0)
                .map(|students| round_to(f64::from(*students) / teacher_fte, 1));

            Ok(StaffYear {
                year,
                teacher_fte: round_to(teacher_fte, 1),
                average_salary: average_salary.map(|s| round_to(s, 0)),
                adjusted_salary,
                students_per_teacher,
            })
        })
        .collect()
}
