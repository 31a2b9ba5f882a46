//! School safety resources

use serde::{Deserialize, Serialize};

use crate::client::params::{QueryParams, ScopeParams};
use crate::data::HasYear;

/// Safety data category; each has its own endpoint
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SafetyCategory {
    Bullying,
    Harassment,
    Discipline,
    Truancy,
    Restraint,
    Seclusion,
}

impl SafetyCategory {
    pub const ALL: [SafetyCategory; 6] = [
        SafetyCategory::Bullying,
        SafetyCategory::Harassment,
        SafetyCategory::Discipline,
        SafetyCategory::Truancy,
        SafetyCategory::Restraint,
        SafetyCategory::Seclusion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyCategory::Bullying => "bullying",
            SafetyCategory::Harassment => "harassment",
            SafetyCategory::Discipline => "discipline",
            SafetyCategory::Truancy => "truancy",
            SafetyCategory::Restraint => "restraint",
            SafetyCategory::Seclusion => "seclusion",
        }
    }
}

impl std::fmt::Display for SafetyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters for `safety/{level}/{category}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SafetyParams {
    pub category: SafetyCategory,
    pub scope: ScopeParams,
}

impl SafetyParams {
    pub fn new(category: SafetyCategory, scope: ScopeParams) -> Self {
        Self { category, scope }
    }
}

impl QueryParams for SafetyParams {
    fn query_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        self.scope.query_pairs()
    }
}

/// Per-year incident count for one classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyRecord {
    pub year: i32,

    #[serde(default)]
    pub district_id: Option<u32>,

    #[serde(default)]
    pub school_id: Option<u32>,

    /// Incident type, e.g. "Cyberbullying" or "Out-of-school suspension"
    pub classification: String,

    pub count: u32,
}

impl HasYear for SafetyRecord {
    fn year(&self) -> i32 {
        self.year
    }
}
