//! Location resources: districts, schools, towns and SAUs

use serde::{Deserialize, Serialize};

/// School district
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct District {
    pub id: u32,

    pub name: String,

    /// School Administrative Unit the district belongs to
    #[serde(default)]
    pub sau_id: Option<u32>,

    /// Towns served by the district
    #[serde(default)]
    pub town_ids: Vec<u32>,
}

/// Public school
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: u32,

    pub name: String,

    #[serde(default)]
    pub district_id: Option<u32>,

    #[serde(default)]
    pub sau_id: Option<u32>,

    /// Grade span as reported, e.g. "K-5"
    #[serde(default)]
    pub grades: Option<String>,
}

/// Town (EFA data is reported per town)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Town {
    pub id: u32,

    pub name: String,

    #[serde(default)]
    pub district_id: Option<u32>,
}

/// School Administrative Unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sau {
    pub id: u32,

    pub name: String,
}
