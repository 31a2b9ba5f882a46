//! Typed request parameters
//!
//! Every endpoint takes a parameter record instead of a loose option map. The
//! records derive `Hash + Eq` so the store can key its entries by them, and
//! implement [`QueryParams`] to produce query strings and the canonical
//! options key.

use serde::{Deserialize, Serialize};

use crate::cache::options_key;

/// Conversion of a parameter record into query-string pairs.
pub trait QueryParams {
    /// Every parameter as `(name, value)`, with `None` for unset fields.
    fn query_pairs(&self) -> Vec<(&'static str, Option<String>)>;

    /// Query-string pairs for the fields that are set.
    fn to_query(&self) -> Vec<(&'static str, String)> {
        self.query_pairs()
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k, v)))
            .collect()
    }

    /// Canonical, order-independent key for these parameters.
    fn options_key(&self) -> String {
        options_key(&self.query_pairs())
    }
}

/// Reporting level of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    State,
    District,
    School,
}

impl Level {
    /// Path segment used by leveled endpoints (`enrollment/district`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::State => "state",
            Level::District => "district",
            Level::School => "school",
        }
    }

    /// Query parameter naming the entity at this level
    pub fn id_param(&self) -> Option<&'static str> {
        match self {
            Level::State => None,
            Level::District => Some("district_id"),
            Level::School => Some("school_id"),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn opt<T: ToString>(value: Option<T>) -> Option<String> {
    value.map(|v| v.to_string())
}

/// Entity scope shared by most leveled endpoints.
///
/// `entity_id` of `None` at district or school level means "every entity at
/// this level", which is how peer data for rankings is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeParams {
    pub level: Level,
    pub entity_id: Option<u32>,
    pub year: Option<i32>,
}

impl ScopeParams {
    pub fn new(level: Level, entity_id: Option<u32>) -> Self {
        Self {
            level,
            entity_id: if level == Level::State {
                None
            } else {
                entity_id
            },
            year: None,
        }
    }

    pub fn state() -> Self {
        Self::new(Level::State, None)
    }

    #[cfg(test)]
    pub fn district(id: u32) -> Self {
        Self::new(Level::District, Some(id))
    }

    #[cfg(test)]
    pub fn school(id: u32) -> Self {
        Self::new(Level::School, Some(id))
    }

    /// Restrict to a single year.
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }
}

impl QueryParams for ScopeParams {
    fn query_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(param) = self.level.id_param() {
            pairs.push((param, opt(self.entity_id)));
        }
        pairs.push(("year", opt(self.year)));
        pairs
    }
}

/// Filters for the location endpoints (districts, schools, towns, SAUs)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LocationParams {
    pub id: Option<u32>,
    pub district_id: Option<u32>,
    pub sau_id: Option<u32>,
}

impl LocationParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn district_id(mut self, id: u32) -> Self {
        self.district_id = Some(id);
        self
    }
}

impl QueryParams for LocationParams {
    fn query_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("id", opt(self.id)),
            ("district_id", opt(self.district_id)),
            ("sau_id", opt(self.sau_id)),
        ]
    }
}

/// Filters for `measurements/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MeasurementParams {
    pub district_id: Option<u32>,
    pub school_id: Option<u32>,
    pub year: Option<i32>,
    pub measurement_type_id: Option<u32>,
}

impl MeasurementParams {
    pub fn district(id: u32) -> Self {
        Self {
            district_id: Some(id),
            ..Self::default()
        }
    }

    pub fn school(id: u32) -> Self {
        Self {
            school_id: Some(id),
            ..Self::default()
        }
    }
}

impl QueryParams for MeasurementParams {
    fn query_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("district_id", opt(self.district_id)),
            ("school_id", opt(self.school_id)),
            ("year", opt(self.year)),
            ("measurement_type_id", opt(self.measurement_type_id)),
        ]
    }
}

/// Filters for `assessments/{level}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssessmentParams {
    pub scope: ScopeParams,
    pub subject_id: Option<u32>,
    pub subgroup_id: Option<u32>,
}

impl AssessmentParams {
    pub fn new(scope: ScopeParams) -> Self {
        Self {
            scope,
            subject_id: None,
            subgroup_id: None,
        }
    }

    pub fn subject(mut self, subject_id: u32) -> Self {
        self.subject_id = Some(subject_id);
        self
    }

    pub fn subgroup(mut self, subgroup_id: Option<u32>) -> Self {
        self.subgroup_id = subgroup_id;
        self
    }
}

impl QueryParams for AssessmentParams {
    fn query_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        let mut pairs = self.scope.query_pairs();
        pairs.push(("subject_id", opt(self.subject_id)));
        pairs.push(("subgroup_id", opt(self.subgroup_id)));
        pairs
    }
}

/// Filters for `enrollment/{level}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnrollmentParams {
    pub scope: ScopeParams,
    pub grade_id: Option<u32>,
}

impl EnrollmentParams {
    pub fn new(scope: ScopeParams) -> Self {
        Self {
            scope,
            grade_id: None,
        }
    }

    pub fn grade(mut self, grade_id: u32) -> Self {
        self.grade_id = Some(grade_id);
        self
    }
}

impl QueryParams for EnrollmentParams {
    fn query_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        let mut pairs = self.scope.query_pairs();
        pairs.push(("grade_id", opt(self.grade_id)));
        pairs
    }
}

/// Filters for `education-freedom-account/`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EfaParams {
    pub town_id: Option<u32>,
    pub year: Option<i32>,
}

impl EfaParams {
    pub fn town(town_id: u32) -> Self {
        Self {
            town_id: Some(town_id),
            year: None,
        }
    }
}

impl QueryParams for EfaParams {
    fn query_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![("town_id", opt(self.town_id)), ("year", opt(self.year))]
    }
}
