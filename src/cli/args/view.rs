//! Arguments shared by the district, school and state views

use clap::Args;

use crate::client::LocationParams;
use crate::data::assessment::GradeFilter;

/// Filters for `district list` and `school list`
#[derive(Args, Debug, Default, Clone)]
pub struct ListArgs {
    /// Only entries in this School Administrative Unit
    #[arg(long)]
    pub sau: Option<u32>,

    /// Only this district (district list) or its schools (school list)
    #[arg(long)]
    pub district: Option<u32>,

    /// Case-insensitive substring of the name
    #[arg(long)]
    pub name: Option<String>,

    /// Maximum results to return
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

impl ListArgs {
    /// Query parameters for the district listing
    pub fn district_params(&self) -> LocationParams {
        LocationParams {
            id: self.district,
            district_id: None,
            sau_id: self.sau,
        }
    }

    /// Query parameters for the school listing
    pub fn school_params(&self) -> LocationParams {
        LocationParams {
            id: None,
            district_id: self.district,
            sau_id: self.sau,
        }
    }

    /// Whether `name` passes the `--name` filter
    pub fn matches_name(&self, name: &str) -> bool {
        self.name
            .as_deref()
            .is_none_or(|needle| name.to_lowercase().contains(&needle.to_lowercase()))
    }
}

/// Subject, subgroup and grade selection for the academic view
#[derive(Args, Debug, Clone)]
pub struct AcademicArgs {
    /// Assessment subject name (defaults to the first subject)
    pub subject: Option<String>,

    /// Student subgroup name (defaults to "All Students")
    #[arg(long)]
    pub subgroup: Option<String>,

    /// Grade id, or "all" for the all-grades aggregate
    #[arg(long, default_value = "all")]
    pub grade: GradeFilter,
}
