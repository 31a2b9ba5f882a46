//! Teacher staffing, salaries and student-teacher ratio

use serde::Serialize;

use super::entity::{self, EntityInfo};
use crate::cli::CommandContext;
use crate::client::{EducationApi, EnrollmentParams, ScopeParams};
use crate::data::enrollment::enrollment_totals;
use crate::data::staff::{StaffYear, staff_by_year};
use crate::error::Result;
use crate::models::StaffDisplay;
use crate::output::Report;

#[derive(Debug, Serialize)]
pub struct StaffView {
    pub entity: EntityInfo,
    pub dollars_of: Option<i32>,
    pub years: Vec<StaffYear>,
}

pub async fn build<C: EducationApi + 'static>(
    ctx: &CommandContext<C>,
    scope: ScopeParams,
) -> Result<Report<StaffView>> {
    let (entity, records, enrollment) = futures::try_join!(
        entity::resolve(ctx, scope),
        ctx.store.staff.fetch_staff(scope, ctx.refresh),
        ctx.store
            .enrollment
            .fetch_enrollment(EnrollmentParams::new(scope), ctx.refresh),
    )?;

    let adjust_to = ctx.adjust_to();
    let view = StaffView {
        entity,
        dollars_of: adjust_to,
        years: staff_by_year(&records, &enrollment_totals(&enrollment), adjust_to)?,
    };

    let rows: Vec<StaffDisplay> = view.years.iter().map(StaffDisplay::from).collect();
    let title = format!("{}: teaching staff", view.entity.name);
    let mut report = Report::new(title, view).table("Staff by year", &rows);
    if let Some(year) = adjust_to {
        report = report.note(format!("Real salaries are in {} dollars.", year));
    }
    Ok(report)
}
