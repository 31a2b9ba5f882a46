//! District and school display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{MISSING, or_missing};
use crate::client::models::{District, School};

/// District display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct DistrictDisplay {
    #[tabled(rename = "ID")]
    pub id: u32,

    #[tabled(rename = "NAME")]
    pub name: String,

    /// School Administrative Unit
    #[tabled(rename = "SAU")]
    pub sau: String,

    /// Number of towns served
    #[tabled(rename = "TOWNS")]
    pub towns: usize,
}

impl From<&District> for DistrictDisplay {
    fn from(district: &District) -> Self {
        Self {
            id: district.id,
            name: district.name.clone(),
            sau: or_missing(district.sau_id, |id| id.to_string()),
            towns: district.town_ids.len(),
        }
    }
}

/// School display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SchoolDisplay {
    #[tabled(rename = "ID")]
    pub id: u32,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "DISTRICT")]
    pub district: String,

    /// Grade span (e.g., "K-5")
    #[tabled(rename = "GRADES")]
    pub grades: String,
}

impl From<&School> for SchoolDisplay {
    fn from(school: &School) -> Self {
        Self {
            id: school.id,
            name: school.name.clone(),
            district: or_missing(school.district_id, |id| id.to_string()),
            grades: school
                .grades
                .clone()
                .filter(|g| !g.is_empty())
                .unwrap_or_else(|| MISSING.to_string()),
        }
    }
}
