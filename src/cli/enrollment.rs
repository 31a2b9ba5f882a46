//! Enrollment trend and grade breakdown

use std::collections::BTreeMap;

use serde::Serialize;

use super::entity::{self, EntityInfo};
use crate::cli::CommandContext;
use crate::client::{EducationApi, EnrollmentParams, ScopeParams};
use crate::data::enrollment::{enrollment_by_grade, enrollment_totals};
use crate::data::{YearDelta, YearValue, year_over_year};
use crate::error::Result;
use crate::models::{EnrollmentYearDisplay, GradeEnrollmentDisplay};
use crate::output::Report;

#[derive(Debug, Serialize)]
pub struct EnrollmentView {
    pub entity: EntityInfo,
    pub years: Vec<YearDelta>,
    /// Year of the grade breakdown, the latest with data
    pub grade_year: Option<i32>,
    pub grades: BTreeMap<u32, u32>,
}

pub async fn build<C: EducationApi + 'static>(
    ctx: &CommandContext<C>,
    scope: ScopeParams,
) -> Result<Report<EnrollmentView>> {
    let (entity, records) = futures::try_join!(
        entity::resolve(ctx, scope),
        ctx.store
            .enrollment
            .fetch_enrollment(EnrollmentParams::new(scope), ctx.refresh),
    )?;

    let totals = enrollment_totals(&records);
    let values: Vec<YearValue> = totals
        .iter()
        .map(|(year, count)| YearValue::new(*year, f64::from(*count)))
        .collect();
    let grade_year = totals.last_key_value().map(|(year, _)| *year);
    let grades = grade_year
        .map(|year| enrollment_by_grade(&records, year))
        .unwrap_or_default();

    let view = EnrollmentView {
        entity,
        years: year_over_year(&values),
        grade_year,
        grades,
    };

    let rows: Vec<EnrollmentYearDisplay> = view.years.iter().map(EnrollmentYearDisplay::from).collect();
    let latest_total = grade_year.and_then(|year| totals.get(&year).copied()).unwrap_or(0);
    let grade_rows: Vec<GradeEnrollmentDisplay> = view
        .grades
        .iter()
        .map(|(grade, students)| GradeEnrollmentDisplay::new(*grade, *students, latest_total))
        .collect();
    let grade_title = match grade_year {
        Some(year) => format!("By grade ({})", year),
        None => "By grade".to_string(),
    };
    let title = format!("{}: enrollment", view.entity.name);

    Ok(Report::new(title, view)
        .table("Students by year", &rows)
        .table(grade_title, &grade_rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::cli::context::testing::context;
    use crate::client::MockEducationClient;
    use crate::client::fixtures::{district, enrollment, grade_enrollment};
    use crate::output::Formattable;

    #[tokio::test]
    async fn test_trend_and_latest_grades() {
        let ctx = context(
            MockEducationClient::new()
                .with_districts(vec![district(5, "Bedford")])
                .with_enrollment(vec![
                    enrollment(5, 2023, 4000),
                    grade_enrollment(Some(5), 2024, 1, 300),
                    grade_enrollment(Some(5), 2024, 2, 100),
                    grade_enrollment(None, 2024, 1, 12_000),
                ]),
        );

        let report = build(&ctx, ScopeParams::district(5)).await.unwrap();
        let view = report.data();

        assert_eq!(view.years.len(), 2);
        assert_eq!(view.years[1].value, 400.0);
        assert_eq!(view.years[1].change, Some(-3600.0));
        assert_eq!(view.years[1].percent_change, Some(-90.0));
        assert_eq!(view.grade_year, Some(2024));
        assert_eq!(view.grades, BTreeMap::from([(1, 300), (2, 100)]));

        let output = report.format(OutputFormat::Table).unwrap();
        assert!(output.contains("By grade (2024)"));
        assert!(output.contains("75.0%"));
    }

    #[tokio::test]
    async fn test_no_records_renders_placeholders() {
        let ctx = context(MockEducationClient::new());

        let report = build(&ctx, ScopeParams::state()).await.unwrap();

        assert!(report.data().years.is_empty());
        assert_eq!(report.data().grade_year, None);
        let output = report.format(OutputFormat::Table).unwrap();
        assert!(output.contains("New Hampshire: enrollment"));
        assert!(output.contains("By grade"));
    }
}
