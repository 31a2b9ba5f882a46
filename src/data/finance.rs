//! District finance aggregation and CPI inflation adjustment

use std::collections::BTreeMap;

use serde::Serialize;

use super::trend::round_to;
use crate::client::models::{FinanceEntry, FinanceEntryType};
use crate::error::DataError;

/// First year in the CPI table
pub const CPI_FIRST_YEAR: i32 = 2000;

/// Last year in the CPI table
pub const CPI_LAST_YEAR: i32 = 2025;

/// Year amounts are expressed in when no target is given
pub const DEFAULT_TARGET_YEAR: i32 = CPI_LAST_YEAR;

/// CPI-U annual averages (1982-84 = 100), 2000 through 2025
const CPI_U: [f64; 26] = [
    172.2, 177.1, 179.9, 184.0, 188.9, 195.3, 201.6, 207.342, 215.303, 214.537, // 2000-2009
    218.056, 224.939, 229.594, 232.957, 236.736, 237.017, 240.007, 245.120, 251.107,
    255.657, // 2010-2019
    258.811, 270.970, 292.655, 304.702, 313.689, 321.500, // 2020-2025
];

/// CPI-U annual average for a year in the table
pub fn cpi(year: i32) -> Result<f64, DataError> {
    if !(CPI_FIRST_YEAR..=CPI_LAST_YEAR).contains(&year) {
        return Err(DataError::YearOutOfRange {
            year,
            min: CPI_FIRST_YEAR,
            max: CPI_LAST_YEAR,
        });
    }
    Ok(CPI_U[(year - CPI_FIRST_YEAR) as usize])
}

/// Express `amount` in `from_year` dollars as `to_year` dollars
pub fn inflation_adjusted_amount(amount: f64, from_year: i32, to_year: i32) -> Result<f64, DataError> {
    if !amount.is_finite() {
        return Err(DataError::NonFiniteAmount(amount));
    }
    let from = cpi(from_year)?;
    let to = cpi(to_year)?;
    if from_year == to_year {
        return Ok(amount);
    }
    Ok(amount * to / from)
}

/// Adjust when a target year is given, otherwise pass the amount through
pub fn maybe_adjust(amount: f64, year: i32, target: Option<i32>) -> Result<f64, DataError> {
    match target {
        Some(to_year) => inflation_adjusted_amount(amount, year, to_year),
        None => Ok(amount),
    }
}

/// One year of a district's finances
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinanceYear {
    pub year: i32,
    pub expenditures: f64,
    pub revenues: f64,
    pub enrollment: Option<u32>,
    pub per_pupil: Option<f64>,
}

/// Per-year expenditure and revenue totals with per-pupil spending.
///
/// Amounts are converted to `adjust_to` dollars when given.
pub fn finance_by_year(
    entries: &[FinanceEntry],
    enrollment: &BTreeMap<i32, u32>,
    adjust_to: Option<i32>,
) -> Result<Vec<FinanceYear>, DataError> {
    let mut totals: BTreeMap<i32, (f64, f64)> = BTreeMap::new();
    for entry in entries {
        let value = maybe_adjust(entry.value, entry.year, adjust_to)?;
        let (expenditures, revenues) = totals.entry(entry.year).or_default();
        match entry.entry_type {
            FinanceEntryType::Expenditure => *expenditures += value,
            FinanceEntryType::Revenue => *revenues += value,
        }
    }

    Ok(totals
        .into_iter()
        .map(|(year, (expenditures, revenues))| {
            let students = enrollment.get(&year).copied();
            FinanceYear {
                year,
                expenditures: round_to(expenditures, 0),
                revenues: round_to(revenues, 0),
                enrollment: students,
                per_pupil: students
                    .filter(|s| *s > 0)
                    .map(|s| round_to(expenditures / f64::from(s), 0)),
            }
        })
        .collect())
}

/// Category totals for one year and entry type, largest first
pub fn category_breakdown(
    entries: &[FinanceEntry],
    year: i32,
    entry_type: FinanceEntryType,
) -> Vec<(String, f64)> {
    let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
    for entry in entries
        .iter()
        .filter(|e| e.year == year && e.entry_type == entry_type)
    {
        *by_category.entry(entry.category.as_str()).or_default() += entry.value;
    }

    let mut categories: Vec<(String, f64)> = by_category
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();
    categories.sort_by(|a, b| b.1.total_cmp(&a.1));
    categories
}
