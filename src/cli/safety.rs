//! Safety incidents per category with per-100-student rates

use serde::Serialize;

use super::entity::{self, EntityInfo};
use crate::cli::CommandContext;
use crate::client::models::{SafetyCategory, SafetyParams};
use crate::client::{EducationApi, EnrollmentParams, ScopeParams};
use crate::data::enrollment::enrollment_totals;
use crate::data::safety::{RATE_DECIMALS, SafetyYear, safety_by_year, safety_rates};
use crate::error::Result;
use crate::models::{ClassificationDisplay, SafetySummaryDisplay, SafetyYearDisplay};
use crate::output::Report;

#[derive(Debug, Serialize)]
pub struct CategorySafety {
    pub category: SafetyCategory,
    pub years: Vec<SafetyYear>,
}

#[derive(Debug, Serialize)]
pub struct SafetyView {
    pub entity: EntityInfo,
    pub categories: Vec<CategorySafety>,
}

/// Safety view for one category, or every category when `category` is `None`
pub async fn build<C: EducationApi + 'static>(
    ctx: &CommandContext<C>,
    scope: ScopeParams,
    category: Option<SafetyCategory>,
) -> Result<Report<SafetyView>> {
    let categories: Vec<SafetyCategory> = match category {
        Some(category) => vec![category],
        None => SafetyCategory::ALL.to_vec(),
    };
    let state = ScopeParams::state();
    let slice = &ctx.store.safety;

    let per_category = categories.iter().map(|category| async move {
        futures::try_join!(
            slice.fetch_safety(SafetyParams::new(*category, scope), ctx.refresh),
            slice.fetch_safety(SafetyParams::new(*category, state), ctx.refresh),
        )
    });

    let (entity, records, enrollment, state_enrollment) = futures::try_join!(
        entity::resolve(ctx, scope),
        futures::future::try_join_all(per_category),
        ctx.store
            .enrollment
            .fetch_enrollment(EnrollmentParams::new(scope), ctx.refresh),
        ctx.store
            .enrollment
            .fetch_enrollment(EnrollmentParams::new(state), ctx.refresh),
    )?;

    let totals = enrollment_totals(&enrollment);
    let state_totals = enrollment_totals(&state_enrollment);

    let categories = categories
        .into_iter()
        .zip(records)
        .map(|(category, (entity_records, state_records))| {
            let state_rates = safety_rates(&state_records, &state_totals, RATE_DECIMALS);
            CategorySafety {
                category,
                years: safety_by_year(&entity_records, &totals, &state_rates),
            }
        })
        .collect();

    Ok(render(SafetyView { entity, categories }))
}

fn render(view: SafetyView) -> Report<SafetyView> {
    match view.categories.as_slice() {
        [single] => {
            let title = format!("{}: {} incidents", view.entity.name, single.category);
            let years: Vec<SafetyYearDisplay> =
                single.years.iter().map(SafetyYearDisplay::from).collect();
            let latest = single.years.last();
            let breakdown = latest.map(ClassificationDisplay::rows).unwrap_or_default();
            let top = latest
                .and_then(|y| y.top_classification())
                .map(|(name, count)| format!("{} ({})", name, count));
            let breakdown_title = match latest {
                Some(y) => format!("Classifications ({})", y.year),
                None => "Classifications".to_string(),
            };

            let mut report = Report::new(title, view);
            if let Some(top) = top {
                report = report.fact("Most common", top);
            }
            report
                .table("Incidents by year", &years)
                .table(breakdown_title, &breakdown)
        }
        categories => {
            let title = format!("{}: safety incidents", view.entity.name);
            let rows: Vec<SafetySummaryDisplay> = categories
                .iter()
                .map(|c| SafetySummaryDisplay::new(c.category, c.years.last()))
                .collect();
            Report::new(title, view)
                .table("Latest year by category", &rows)
                .note("Rates are incidents per 100 enrolled students.")
        }
    }
}
