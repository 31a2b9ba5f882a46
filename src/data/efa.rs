//! Education Freedom Account aggregation

use std::collections::BTreeMap;

use serde::Serialize;

use super::finance::maybe_adjust;
use super::trend::{round_to, weighted_average};
use crate::client::models::EfaEntry;
use crate::error::DataError;

/// EFA totals across a set of towns for one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfaYear {
    pub year: i32,
    pub student_count: u32,
    pub total_grant: f64,
    pub average_grant: Option<f64>,
}

/// Sum town entries per year; the average grant is weighted by students.
///
/// Amounts are converted to `adjust_to` dollars when given.
pub fn efa_by_year(entries: &[EfaEntry], adjust_to: Option<i32>) -> Result<Vec<EfaYear>, DataError> {
    let mut by_year: BTreeMap<i32, Vec<(u32, f64)>> = BTreeMap::new();
    for entry in entries {
        let grant = maybe_adjust(entry.total_grant, entry.year, adjust_to)?;
        by_year
            .entry(entry.year)
            .or_default()
            .push((entry.student_count, grant));
    }

    Ok(by_year
        .into_iter()
        .map(|(year, towns)| {
            let student_count = towns.iter().map(|(students, _)| students).sum();
            let total_grant: f64 = towns.iter().map(|(_, grant)| grant).sum();
            let average_grant = weighted_average(
                towns
                    .iter()
                    .filter(|(students, _)| *students > 0)
                    .map(|(students, grant)| (grant / f64::from(*students), f64::from(*students))),
            )
            .map(|avg| round_to(avg, 0));

            EfaYear {
                year,
                student_count,
                total_grant: round_to(total_grant, 0),
                average_grant,
            }
        })
        .collect())
}
