//! Graduation and post-graduation outcomes

use std::collections::BTreeMap;

use serde::Serialize;

use super::trend::percentage;
use crate::client::models::{GraduationRecord, PostGraduationRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Cohort {
    size: u32,
    graduated: u32,
    dropped_out: u32,
}

fn cohorts(records: &[GraduationRecord]) -> BTreeMap<i32, Cohort> {
    let mut by_year: BTreeMap<i32, Cohort> = BTreeMap::new();
    for record in records {
        let cohort = by_year.entry(record.year).or_default();
        cohort.size += record.cohort_size;
        cohort.graduated += record.graduated;
        cohort.dropped_out += record.dropped_out;
    }
    by_year
}

/// Graduation outcome for one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraduationYear {
    pub year: i32,
    pub cohort_size: u32,
    pub graduation_rate: f64,
    pub dropout_rate: f64,
    pub state_graduation_rate: Option<f64>,
}

/// Graduation and dropout rates per year with the state rate, sorted by year
pub fn graduation_by_year(
    records: &[GraduationRecord],
    state_records: &[GraduationRecord],
) -> Vec<GraduationYear> {
    let state = cohorts(state_records);

    cohorts(records)
        .into_iter()
        .map(|(year, cohort)| GraduationYear {
            year,
            cohort_size: cohort.size,
            graduation_rate: percentage(cohort.graduated.into(), cohort.size.into(), 1),
            dropout_rate: percentage(cohort.dropped_out.into(), cohort.size.into(), 1),
            state_graduation_rate: state
                .get(&year)
                .map(|s| percentage(s.graduated.into(), s.size.into(), 1)),
        })
        .collect()
}

/// Share of the graduating class reporting a plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanShare {
    pub plan: String,
    pub count: u32,
    pub percent: f64,
}

/// Plans for one year, most common first.
///
/// Percentages are of the graduating-grade enrollment when known, otherwise
/// of all reported plans.
pub fn post_graduation_plans(
    records: &[PostGraduationRecord],
    year: i32,
    graduating_enrollment: Option<u32>,
) -> Vec<PlanShare> {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for record in records.iter().filter(|r| r.year == year) {
        *counts.entry(record.plan.as_str()).or_default() += record.count;
    }

    let denominator = graduating_enrollment
        .filter(|students| *students > 0)
        .unwrap_or_else(|| counts.values().sum());

    let mut shares: Vec<PlanShare> = counts
        .into_iter()
        .map(|(plan, count)| PlanShare {
            plan: plan.to_string(),
            count,
            percent: percentage(count.into(), denominator.into(), 1),
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.plan.cmp(&b.plan)));
    shares
}
