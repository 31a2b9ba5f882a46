//! Finance and EFA display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{format_count, format_dollars, format_percent, or_missing};
use crate::data::efa::EfaYear;
use crate::data::finance::FinanceYear;
use crate::data::percentage;

/// District finances for one year
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct FinanceYearDisplay {
    #[tabled(rename = "YEAR")]
    pub year: i32,

    #[tabled(rename = "EXPENDITURES")]
    pub expenditures: String,

    #[tabled(rename = "REVENUES")]
    pub revenues: String,

    #[tabled(rename = "ENROLLMENT")]
    pub enrollment: String,

    /// Expenditures per enrolled student
    #[tabled(rename = "PER PUPIL")]
    pub per_pupil: String,
}

impl From<&FinanceYear> for FinanceYearDisplay {
    fn from(year: &FinanceYear) -> Self {
        Self {
            year: year.year,
            expenditures: format_dollars(year.expenditures),
            revenues: format_dollars(year.revenues),
            enrollment: or_missing(year.enrollment, format_count),
            per_pupil: or_missing(year.per_pupil, format_dollars),
        }
    }
}

/// One spending or revenue category
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CategoryDisplay {
    #[tabled(rename = "CATEGORY")]
    pub category: String,

    #[tabled(rename = "AMOUNT")]
    pub amount: String,

    /// Share of the year's total
    #[tabled(rename = "SHARE")]
    pub share: String,
}

impl CategoryDisplay {
    pub fn rows(categories: &[(String, f64)]) -> Vec<Self> {
        let total: f64 = categories.iter().map(|(_, value)| value).sum();
        categories
            .iter()
            .map(|(category, value)| Self {
                category: category.clone(),
                amount: format_dollars(*value),
                share: format_percent(percentage(*value, total, 1)),
            })
            .collect()
    }
}

/// Education Freedom Account grants for one year
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct EfaYearDisplay {
    #[tabled(rename = "YEAR")]
    pub year: i32,

    #[tabled(rename = "STUDENTS")]
    pub students: String,

    #[tabled(rename = "TOTAL GRANTS")]
    pub total_grants: String,

    #[tabled(rename = "AVG GRANT")]
    pub average_grant: String,
}

impl From<&EfaYear> for EfaYearDisplay {
    fn from(year: &EfaYear) -> Self {
        Self {
            year: year.year,
            students: format_count(year.student_count),
            total_grants: format_dollars(year.total_grant),
            average_grant: or_missing(year.average_grant, format_dollars),
        }
    }
}
