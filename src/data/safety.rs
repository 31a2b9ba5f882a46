//! Safety incident aggregation and per-100-student rates

use std::collections::BTreeMap;

use serde::Serialize;

use super::trend::round_to;
use crate::client::models::SafetyRecord;

/// Decimal places used for displayed safety rates
pub const RATE_DECIMALS: u32 = 1;

/// `count / enrollment × 100` rounded to `decimals`; 0 when enrollment is 0
pub fn per_100_students(count: u32, enrollment: u32, decimals: u32) -> f64 {
    if enrollment == 0 {
        return 0.0;
    }
    round_to(f64::from(count) / f64::from(enrollment) * 100.0, decimals)
}

/// Incidents for one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafetyYear {
    pub year: i32,
    pub total: u32,
    pub enrollment: Option<u32>,
    pub per_100: Option<f64>,
    pub state_per_100: Option<f64>,
    pub classifications: BTreeMap<String, u32>,
}

impl SafetyYear {
    /// Classification with the most incidents
    pub fn top_classification(&self) -> Option<(&str, u32)> {
        self.classifications
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(name, count)| (name.as_str(), *count))
    }
}

/// Incident totals per year
pub fn safety_totals(records: &[SafetyRecord]) -> BTreeMap<i32, u32> {
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(record.year).or_default() += record.count;
    }
    totals
}

/// Per-100-student rates per year for the years with known enrollment
pub fn safety_rates(
    records: &[SafetyRecord],
    enrollment: &BTreeMap<i32, u32>,
    decimals: u32,
) -> BTreeMap<i32, f64> {
    safety_totals(records)
        .into_iter()
        .filter_map(|(year, total)| {
            enrollment
                .get(&year)
                .map(|students| (year, per_100_students(total, *students, decimals)))
        })
        .collect()
}

/// Group records by year, join enrollment and the state rate, sorted by year
pub fn safety_by_year(
    records: &[SafetyRecord],
    enrollment: &BTreeMap<i32, u32>,
    state_rates: &BTreeMap<i32, f64>,
) -> Vec<SafetyYear> {
    let mut by_year: BTreeMap<i32, BTreeMap<String, u32>> = BTreeMap::new();
    for record in records {
        *by_year
            .entry(record.year)
            .or_default()
            .entry(record.classification.clone())
            .or_default() += record.count;
    }

    by_year
        .into_iter()
        .map(|(year, classifications)| {
            let total = classifications.values().sum();
            let students = enrollment.get(&year).copied();
            SafetyYear {
                year,
                total,
                enrollment: students,
                per_100: students.map(|s| per_100_students(total, s, RATE_DECIMALS)),
                state_per_100: state_rates.get(&year).copied(),
                classifications,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, classification: &str, count: u32) -> SafetyRecord {
        SafetyRecord {
            year,
            district_id: Some(5),
            school_id: None,
            classification: classification.to_string(),
            count,
        }
    }

    #[test]
    fn test_per_100_students_zero_enrollment() {
        assert_eq!(per_100_students(5, 0, 0), 0.0);
        assert_eq!(per_100_students(5, 0, 2), 0.0);
    }

    #[test]
    fn test_per_100_students_rounding() {
        assert_eq!(per_100_students(5, 200, 0), 3.0);
        assert_eq!(per_100_students(1, 3, 1), 33.3);
        assert_eq!(per_100_students(2, 3, 2), 66.67);
    }

    #[test]
    fn test_safety_by_year_sorted_and_joined() {
        let records = vec![
            record(2024, "Physical", 3),
            record(2023, "Cyber", 2),
            record(2024, "Cyber", 5),
        ];
        let enrollment = BTreeMap::from([(2023, 400), (2024, 500)]);
        let state = BTreeMap::from([(2024, 1.2)]);

        let years = safety_by_year(&records, &enrollment, &state);

        assert_eq!(years.len(), 2);
        assert_eq!(years[0].year, 2023);
        assert_eq!(years[1].total, 8);
        assert_eq!(years[1].per_100, Some(1.6));
        assert_eq!(years[1].state_per_100, Some(1.2));
        assert_eq!(years[0].state_per_100, None);
        assert_eq!(years[1].top_classification(), Some(("Cyber", 5)));
    }

    #[test]
    fn test_safety_by_year_without_enrollment() {
        let years = safety_by_year(&[record(2022, "Verbal", 4)], &BTreeMap::new(), &BTreeMap::new());
        assert_eq!(years[0].enrollment, None);
        assert_eq!(years[0].per_100, None);
    }

    #[test]
    fn test_safety_rates_skip_unknown_enrollment() {
        let records = vec![record(2023, "A", 10), record(2024, "A", 20)];
        let enrollment = BTreeMap::from([(2024, 1000)]);
        let rates = safety_rates(&records, &enrollment, 1);
        assert_eq!(rates.len(), 1);
        assert_eq!(rates.get(&2024), Some(&2.0));
    }
}
