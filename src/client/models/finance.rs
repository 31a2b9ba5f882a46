//! Finance and Education Freedom Account resources

use serde::{Deserialize, Serialize};

use crate::data::HasYear;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinanceEntryType {
    Expenditure,
    Revenue,
}

/// One line of a district's annual financial report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceEntry {
    pub year: i32,

    #[serde(default)]
    pub district_id: Option<u32>,

    pub entry_type: FinanceEntryType,

    /// Reporting category, e.g. "Instruction" or "Local property tax"
    pub category: String,

    /// Nominal dollars
    pub value: f64,
}

/// Education Freedom Account totals for one town and year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfaEntry {
    pub year: i32,

    pub town_id: u32,

    pub student_count: u32,

    /// Nominal dollars granted across all students
    pub total_grant: f64,
}

impl HasYear for FinanceEntry {
    fn year(&self) -> i32 {
        self.year
    }
}

impl HasYear for EfaEntry {
    fn year(&self) -> i32 {
        self.year
    }
}
