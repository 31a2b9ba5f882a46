//! Graduation rates and post-graduation plans

use serde::Serialize;

use super::entity::{self, EntityInfo};
use crate::cli::CommandContext;
use crate::client::{EducationApi, EnrollmentParams, ScopeParams};
use crate::data::enrollment::enrollment_for_grade;
use crate::data::latest_year;
use crate::data::outcome::{GraduationYear, PlanShare, graduation_by_year, post_graduation_plans};
use crate::error::Result;
use crate::models::{GraduationDisplay, PlanDisplay, format_count, or_missing};
use crate::output::Report;

#[derive(Debug, Serialize)]
pub struct OutcomesView {
    pub entity: EntityInfo,
    pub graduation: Vec<GraduationYear>,
    pub plans_year: Option<i32>,
    /// Enrollment of the graduating grade in `plans_year`
    pub graduating_enrollment: Option<u32>,
    pub plans: Vec<PlanShare>,
}

pub async fn build<C: EducationApi + 'static>(
    ctx: &CommandContext<C>,
    scope: ScopeParams,
) -> Result<Report<OutcomesView>> {
    let outcome = &ctx.store.outcome;
    let grade = ctx.config.graduation_grade;

    let (entity, graduation, state_graduation, post_graduation, enrollment) = futures::try_join!(
        entity::resolve(ctx, scope),
        outcome.fetch_graduation(scope, ctx.refresh),
        outcome.fetch_graduation(ScopeParams::state(), ctx.refresh),
        outcome.fetch_post_graduation(scope, ctx.refresh),
        ctx.store
            .enrollment
            .fetch_enrollment(EnrollmentParams::new(scope).grade(grade), ctx.refresh),
    )?;

    let plans_year = latest_year(post_graduation.as_slice());
    let graduating_enrollment =
        plans_year.and_then(|year| enrollment_for_grade(&enrollment, grade).get(&year).copied());
    let plans = plans_year
        .map(|year| post_graduation_plans(&post_graduation, year, graduating_enrollment))
        .unwrap_or_default();

    let view = OutcomesView {
        entity,
        graduation: graduation_by_year(&graduation, &state_graduation),
        plans_year,
        graduating_enrollment,
        plans,
    };

    let graduation_rows: Vec<GraduationDisplay> =
        view.graduation.iter().map(GraduationDisplay::from).collect();
    let plan_rows: Vec<PlanDisplay> = view.plans.iter().map(PlanDisplay::from).collect();
    let plans_title = match plans_year {
        Some(year) => format!("Post-graduation plans ({})", year),
        None => "Post-graduation plans".to_string(),
    };
    let title = format!("{}: outcomes", view.entity.name);

    Ok(Report::new(title, view)
        .fact(
            format!("Grade {} enrollment", grade),
            or_missing(graduating_enrollment, format_count),
        )
        .table("Graduation by cohort year", &graduation_rows)
        .table(plans_title, &plan_rows))
}
