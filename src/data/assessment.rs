//! Assessment filtering, proficiency and ranking

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::trend::round_to;
use crate::client::models::AssessmentRow;

/// Exception flag for proficiency below 10%
pub const SCORE_UNDER_10: &str = "SCORE_UNDER_10";

/// Exception flag for proficiency above 90%
pub const SCORE_OVER_90: &str = "SCORE_OVER_90";

/// Grade selector for assessment rows.
///
/// `Aggregate` selects the all-grades rows, which carry no grade at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeFilter {
    #[default]
    Aggregate,
    PerGrade(u32),
}

impl GradeFilter {
    pub fn matches(&self, grade_id: Option<u32>) -> bool {
        match self {
            GradeFilter::Aggregate => grade_id.is_none(),
            GradeFilter::PerGrade(id) => grade_id == Some(*id),
        }
    }
}

impl FromStr for GradeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(GradeFilter::Aggregate);
        }
        s.parse::<u32>()
            .map(GradeFilter::PerGrade)
            .map_err(|_| format!("invalid grade '{}': expected a grade id or 'all'", s))
    }
}

impl fmt::Display for GradeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeFilter::Aggregate => f.write_str("All grades"),
            GradeFilter::PerGrade(id) => write!(f, "Grade {}", id),
        }
    }
}

/// Partial filter over assessment rows; unset fields match everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssessmentFilter {
    pub year: Option<i32>,
    pub subject_id: Option<u32>,
    pub subgroup_id: Option<u32>,
    pub grade: Option<GradeFilter>,
}

impl AssessmentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn subject(mut self, subject_id: u32) -> Self {
        self.subject_id = Some(subject_id);
        self
    }

    pub fn subgroup(mut self, subgroup_id: Option<u32>) -> Self {
        self.subgroup_id = subgroup_id;
        self
    }

    pub fn grade(mut self, grade: GradeFilter) -> Self {
        self.grade = Some(grade);
        self
    }

    pub fn matches(&self, row: &AssessmentRow) -> bool {
        self.year.is_none_or(|y| row.year == y)
            && self.subject_id.is_none_or(|id| row.assessment_subject_id == id)
            && self.subgroup_id.is_none_or(|id| row.assessment_subgroup_id == id)
            && self.grade.is_none_or(|g| g.matches(row.grade_id))
    }
}

/// Rows matching every set field of `filter`, in input order
pub fn filter_assessment_results<'a>(
    rows: &'a [AssessmentRow],
    filter: &AssessmentFilter,
) -> Vec<&'a AssessmentRow> {
    rows.iter().filter(|row| filter.matches(row)).collect()
}

/// Direction of a censored proficiency value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Censor {
    Under10,
    Over90,
}

/// Proficiency of one result row.
///
/// Censored values take part in ordering (under-10 sorts as 9, over-90 as
/// 91) without exposing the exact figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Proficiency {
    Exact(f64),
    Censored(Censor),
    Missing,
}

impl Proficiency {
    /// Build from the raw API fields. A recognised exception wins over the
    /// percentage.
    pub fn from_parts(percentage: Option<f64>, exception: Option<&str>) -> Self {
        match exception {
            Some(SCORE_UNDER_10) => Proficiency::Censored(Censor::Under10),
            Some(SCORE_OVER_90) => Proficiency::Censored(Censor::Over90),
            _ => match percentage {
                Some(p) if p.is_finite() => Proficiency::Exact(p),
                _ => Proficiency::Missing,
            },
        }
    }

    pub fn of(row: &AssessmentRow) -> Self {
        Self::from_parts(
            row.above_proficient_percentage,
            row.above_proficient_percentage_exception.as_deref(),
        )
    }

    /// Comparable integer for ranking; `None` when unrankable
    pub fn range_index(&self) -> Option<i32> {
        match self {
            Proficiency::Censored(Censor::Under10) => Some(9),
            Proficiency::Censored(Censor::Over90) => Some(91),
            Proficiency::Exact(p) => Some(p.round() as i32),
            Proficiency::Missing => None,
        }
    }

    pub fn exact(&self) -> Option<f64> {
        match self {
            Proficiency::Exact(p) => Some(*p),
            _ => None,
        }
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Proficiency::Exact(p) => write!(f, "{}%", round_to(*p, 1)),
            Proficiency::Censored(Censor::Under10) => f.write_str("<10%"),
            Proficiency::Censored(Censor::Over90) => f.write_str(">90%"),
            Proficiency::Missing => f.write_str("N/A"),
        }
    }
}

/// Map a raw or censored percentage to a comparable integer.
///
/// `SCORE_UNDER_10` → 9, `SCORE_OVER_90` → 91, otherwise the percentage
/// rounded to the nearest integer; `None` when there is nothing to rank.
pub fn proficiency_range_index(percentage: Option<f64>, exception: Option<&str>) -> Option<i32> {
    Proficiency::from_parts(percentage, exception).range_index()
}

/// Position of one entity among its peers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankInfo {
    /// 1-based; entities strictly above + 1
    pub rank: usize,
    /// Entities with a rankable value
    pub total: usize,
}

/// Rank an entity among the entities present in `rows`.
///
/// Only the first row per entity is considered, so callers pass rows already
/// filtered to one year/subject/subgroup/grade. Ties share a rank and the
/// next distinct value skips (80, 70, 70, 60 rank 1, 2, 2, 4). Returns `None`
/// when the entity has no rankable value.
pub fn entity_rank_info<'a, I, F>(rows: I, entity_id: u32, entity_of: F) -> Option<RankInfo>
where
    I: IntoIterator<Item = &'a AssessmentRow>,
    F: Fn(&AssessmentRow) -> Option<u32>,
{
    let mut first_by_entity: BTreeMap<u32, Option<i32>> = BTreeMap::new();
    for row in rows {
        if let Some(id) = entity_of(row) {
            first_by_entity
                .entry(id)
                .or_insert_with(|| Proficiency::of(row).range_index());
        }
    }

    let target = first_by_entity.get(&entity_id).copied().flatten()?;
    let ranked: Vec<i32> = first_by_entity.values().filter_map(|v| *v).collect();

    Some(RankInfo {
        rank: ranked.iter().filter(|v| **v > target).count() + 1,
        total: ranked.len(),
    })
}

pub fn district_rank_info<'a, I>(rows: I, district_id: u32) -> Option<RankInfo>
where
    I: IntoIterator<Item = &'a AssessmentRow>,
{
    entity_rank_info(rows, district_id, |row| row.district_id)
}

pub fn school_rank_info<'a, I>(rows: I, school_id: u32) -> Option<RankInfo>
where
    I: IntoIterator<Item = &'a AssessmentRow>,
{
    entity_rank_info(rows, school_id, |row| row.school_id)
}

/// One year of an entity's proficiency trend
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProficiencyPoint {
    pub year: i32,
    pub proficiency: Proficiency,
    pub state: Option<Proficiency>,
    /// Percentage-point change from the previous year with an exact value
    pub change: Option<f64>,
}

/// Per-year proficiency sorted ascending, joined with state values.
///
/// Both inputs should already be filtered to one subject, subgroup and
/// grade; the first row per year is used.
pub fn proficiency_trend<'a, E, S>(entity_rows: E, state_rows: S) -> Vec<ProficiencyPoint>
where
    E: IntoIterator<Item = &'a AssessmentRow>,
    S: IntoIterator<Item = &'a AssessmentRow>,
{
    let mut by_year: BTreeMap<i32, Proficiency> = BTreeMap::new();
    for row in entity_rows {
        by_year.entry(row.year).or_insert_with(|| Proficiency::of(row));
    }

    let mut state_by_year: BTreeMap<i32, Proficiency> = BTreeMap::new();
    for row in state_rows {
        state_by_year
            .entry(row.year)
            .or_insert_with(|| Proficiency::of(row));
    }

    let mut previous_exact: Option<f64> = None;
    by_year
        .into_iter()
        .map(|(year, proficiency)| {
            let change = match (proficiency.exact(), previous_exact) {
                (Some(current), Some(previous)) => Some(round_to(current - previous, 1)),
                _ => None,
            };
            if let Some(exact) = proficiency.exact() {
                previous_exact = Some(exact);
            }
            ProficiencyPoint {
                year,
                proficiency,
                state: state_by_year.get(&year).copied(),
                change,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(district_id: u32, year: i32, grade_id: Option<u32>, pct: Option<f64>) -> AssessmentRow {
        AssessmentRow {
            year,
            district_id: Some(district_id),
            school_id: None,
            assessment_subject_id: 1,
            assessment_subject: Some("mat".to_string()),
            assessment_subgroup_id: 1,
            assessment_subgroup: Some("All Students".to_string()),
            grade_id,
            grade: grade_id.map(|g| g.to_string()),
            above_proficient_percentage: pct,
            above_proficient_percentage_exception: None,
        }
    }

    fn censored(district_id: u32, exception: &str) -> AssessmentRow {
        AssessmentRow {
            above_proficient_percentage_exception: Some(exception.to_string()),
            ..row(district_id, 2024, None, None)
        }
    }

    #[test]
    fn test_aggregate_filter_matches_only_null_grade() {
        let rows = vec![
            row(1, 2024, None, Some(50.0)),
            row(1, 2024, Some(3), Some(40.0)),
            row(1, 2024, Some(4), Some(45.0)),
            row(2, 2024, None, Some(60.0)),
        ];

        let filtered = filter_assessment_results(
            &rows,
            &AssessmentFilter::new().grade(GradeFilter::Aggregate),
        );

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.grade_id.is_none()));
    }

    #[test]
    fn test_filter_combines_fields() {
        let mut rows = vec![
            row(1, 2023, None, Some(50.0)),
            row(1, 2024, None, Some(55.0)),
            row(1, 2024, Some(3), Some(40.0)),
        ];
        rows.push(AssessmentRow {
            assessment_subject_id: 2,
            ..row(1, 2024, None, Some(70.0))
        });

        let filter = AssessmentFilter::new()
            .year(2024)
            .subject(1)
            .grade(GradeFilter::PerGrade(3));
        let filtered = filter_assessment_results(&rows, &filter);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].above_proficient_percentage, Some(40.0));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let rows = vec![row(1, 2023, None, None), row(2, 2024, Some(5), None)];
        assert_eq!(
            filter_assessment_results(&rows, &AssessmentFilter::new()).len(),
            2
        );
    }

    #[test]
    fn test_proficiency_range_index() {
        assert_eq!(proficiency_range_index(None, Some(SCORE_UNDER_10)), Some(9));
        assert_eq!(proficiency_range_index(None, Some(SCORE_OVER_90)), Some(91));
        assert_eq!(proficiency_range_index(None, None), None);
        assert_eq!(proficiency_range_index(Some(63.4), None), Some(63));
        assert_eq!(proficiency_range_index(Some(63.5), None), Some(64));
    }

    #[test]
    fn test_exception_wins_over_percentage() {
        assert_eq!(
            Proficiency::from_parts(Some(95.0), Some(SCORE_OVER_90)),
            Proficiency::Censored(Censor::Over90)
        );
        assert_eq!(
            Proficiency::from_parts(Some(42.0), Some("UNKNOWN_FLAG")),
            Proficiency::Exact(42.0)
        );
    }

    #[test]
    fn test_proficiency_display() {
        assert_eq!(Proficiency::Exact(63.25).to_string(), "63.3%");
        assert_eq!(Proficiency::Censored(Censor::Under10).to_string(), "<10%");
        assert_eq!(Proficiency::Censored(Censor::Over90).to_string(), ">90%");
        assert_eq!(Proficiency::Missing.to_string(), "N/A");
    }

    #[test]
    fn test_district_rank_distinct_values() {
        let rows = vec![
            row(1, 2024, None, Some(80.0)),
            row(2, 2024, None, Some(70.0)),
            row(3, 2024, None, Some(60.0)),
        ];

        assert_eq!(
            district_rank_info(&rows, 1),
            Some(RankInfo { rank: 1, total: 3 })
        );
        assert_eq!(district_rank_info(&rows, 2).unwrap().rank, 2);
        assert_eq!(district_rank_info(&rows, 3).unwrap().rank, 3);
    }

    #[test]
    fn test_district_rank_ties_share_rank() {
        let rows = vec![
            row(1, 2024, None, Some(80.0)),
            row(2, 2024, None, Some(70.0)),
            row(3, 2024, None, Some(70.0)),
            row(4, 2024, None, Some(60.0)),
        ];

        assert_eq!(district_rank_info(&rows, 2).unwrap().rank, 2);
        assert_eq!(district_rank_info(&rows, 3).unwrap().rank, 2);
        assert_eq!(district_rank_info(&rows, 4).unwrap().rank, 4);
    }

    #[test]
    fn test_rank_with_censored_and_missing_values() {
        let rows = vec![
            censored(1, SCORE_OVER_90),
            row(2, 2024, None, Some(90.4)),
            censored(3, SCORE_UNDER_10),
            row(4, 2024, None, None),
        ];

        assert_eq!(
            district_rank_info(&rows, 1),
            Some(RankInfo { rank: 1, total: 3 })
        );
        assert_eq!(district_rank_info(&rows, 3).unwrap().rank, 3);
        assert_eq!(district_rank_info(&rows, 4), None);
        assert_eq!(district_rank_info(&rows, 99), None);
    }

    #[test]
    fn test_rank_uses_first_row_per_entity() {
        let rows = vec![
            row(1, 2024, None, Some(50.0)),
            row(1, 2024, None, Some(99.0)),
            row(2, 2024, None, Some(60.0)),
        ];

        assert_eq!(
            district_rank_info(&rows, 1),
            Some(RankInfo { rank: 2, total: 2 })
        );
    }

    #[test]
    fn test_school_rank_uses_school_id() {
        let mut a = row(1, 2024, None, Some(50.0));
        a.school_id = Some(10);
        let mut b = row(1, 2024, None, Some(65.0));
        b.school_id = Some(11);
        let rows = vec![a, b];

        assert_eq!(school_rank_info(&rows, 10).unwrap().rank, 2);
        assert_eq!(school_rank_info(&rows, 11).unwrap().rank, 1);
    }

    #[test]
    fn test_proficiency_trend_sorted_with_state_and_change() {
        let entity = vec![
            row(5, 2024, None, Some(58.0)),
            row(5, 2019, None, Some(52.5)),
            AssessmentRow {
                above_proficient_percentage_exception: Some(SCORE_UNDER_10.to_string()),
                ..row(5, 2021, None, None)
            },
        ];
        let state = vec![AssessmentRow {
            district_id: None,
            ..row(0, 2024, None, Some(48.0))
        }];

        let trend = proficiency_trend(&entity, &state);
        let years: Vec<i32> = trend.iter().map(|p| p.year).collect();

        assert_eq!(years, vec![2019, 2021, 2024]);
        assert_eq!(trend[0].change, None);
        assert_eq!(trend[1].change, None);
        assert_eq!(trend[2].change, Some(5.5));
        assert_eq!(trend[2].state, Some(Proficiency::Exact(48.0)));
        assert_eq!(trend[0].state, None);
    }

    #[test]
    fn test_grade_filter_from_str() {
        assert_eq!("all".parse::<GradeFilter>(), Ok(GradeFilter::Aggregate));
        assert_eq!("ALL".parse::<GradeFilter>(), Ok(GradeFilter::Aggregate));
        assert_eq!("4".parse::<GradeFilter>(), Ok(GradeFilter::PerGrade(4)));
        assert!("fourth".parse::<GradeFilter>().is_err());
    }
}
