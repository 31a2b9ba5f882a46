//! District and school overview: identity, enrollment and latest measurements

use std::collections::BTreeMap;

use serde::Serialize;

use super::entity::{self, EntityInfo};
use crate::cli::CommandContext;
use crate::client::models::Measurement;
use crate::client::{
    EducationApi, EnrollmentParams, Level, LocationParams, MeasurementParams, ScopeParams,
};
use crate::data::enrollment::enrollment_totals;
use crate::data::measurement::latest_by_category;
use crate::error::Result;
use crate::models::{MeasurementDisplay, format_count, or_missing};
use crate::output::Report;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatestEnrollment {
    pub year: i32,
    pub students: u32,
}

#[derive(Debug, Serialize)]
pub struct OverviewView {
    pub entity: EntityInfo,
    /// Name of the entity's School Administrative Unit
    pub sau_name: Option<String>,
    pub enrollment: Option<LatestEnrollment>,
    /// Latest value of each measurement type, by category
    pub measurements: BTreeMap<String, Vec<Measurement>>,
    /// Rows left out because their measurement type is unknown
    pub dropped_measurements: usize,
}

pub async fn build<C: EducationApi + 'static>(
    ctx: &CommandContext<C>,
    scope: ScopeParams,
) -> Result<Report<OverviewView>> {
    let measurement_params = match (scope.level, scope.entity_id) {
        (Level::School, Some(id)) => MeasurementParams::school(id),
        (Level::District, Some(id)) => MeasurementParams::district(id),
        _ => MeasurementParams::default(),
    };

    let (entity, joined, enrollment) = futures::try_join!(
        entity::resolve(ctx, scope),
        ctx.store
            .measurement
            .fetch_all_measurements(measurement_params, ctx.refresh),
        ctx.store
            .enrollment
            .fetch_enrollment(EnrollmentParams::new(scope), ctx.refresh),
    )?;

    let sau_name = match entity.sau_id {
        Some(id) => ctx
            .store
            .location
            .fetch_saus(LocationParams::new().id(id), ctx.refresh)
            .await?
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.clone()),
        None => None,
    };

    let enrollment = enrollment_totals(&enrollment)
        .last_key_value()
        .map(|(year, students)| LatestEnrollment {
            year: *year,
            students: *students,
        });

    let grouped = latest_by_category(&joined.measurements);
    let rows: Vec<MeasurementDisplay> = grouped
        .values()
        .flatten()
        .map(|m| MeasurementDisplay::from(*m))
        .collect();
    let measurements = grouped
        .into_iter()
        .map(|(category, items)| (category, items.into_iter().cloned().collect()))
        .collect();

    let mut report = Report::new(entity.name.clone(), OverviewView {
        entity: entity.clone(),
        sau_name: sau_name.clone(),
        enrollment,
        measurements,
        dropped_measurements: joined.dropped,
    })
    .fact("ID", entity.label());

    if let Some(sau) = entity.sau_id {
        let label = match sau_name {
            Some(name) => format!("{} ({})", sau, name),
            None => sau.to_string(),
        };
        report = report.fact("SAU", label);
    }
    match entity.level {
        Level::District => {
            report = report.fact("Towns", entity.town_ids.len().to_string());
        }
        Level::School => {
            report = report
                .fact("District", or_missing(entity.district_id, |id| id.to_string()))
                .fact("Grades", or_missing(entity.grades.clone(), |g| g));
        }
        Level::State => {}
    }
    report = report
        .fact(
            "Enrollment",
            or_missing(enrollment, |e| {
                format!("{} ({})", format_count(e.students), e.year)
            }),
        )
        .table("Latest measurements", &rows);

    if joined.dropped > 0 {
        report = report.note(format!(
            "{} measurement(s) with an unknown type were left out.",
            joined.dropped
        ));
    }

    Ok(report)
}
