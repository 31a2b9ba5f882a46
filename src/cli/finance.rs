//! District finances: spending, revenue and per-pupil cost

use serde::Serialize;

use super::entity::{self, EntityInfo};
use crate::cli::CommandContext;
use crate::client::models::{FinanceEntry, FinanceEntryType};
use crate::client::{EducationApi, EnrollmentParams, ScopeParams};
use crate::data::enrollment::enrollment_totals;
use crate::data::finance::{FinanceYear, category_breakdown, finance_by_year, maybe_adjust};
use crate::error::Result;
use crate::models::{CategoryDisplay, FinanceYearDisplay, format_dollars, or_missing};
use crate::output::Report;

#[derive(Debug, Serialize)]
pub struct Category {
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Serialize)]
pub struct FinanceView {
    pub entity: EntityInfo,
    /// Year amounts are expressed in; `None` for nominal dollars
    pub dollars_of: Option<i32>,
    pub years: Vec<FinanceYear>,
    pub breakdown_year: i32,
    pub expenditures: Vec<Category>,
    pub revenues: Vec<Category>,
}

fn categories(
    entries: &[FinanceEntry],
    year: i32,
    entry_type: FinanceEntryType,
    adjust_to: Option<i32>,
) -> Result<Vec<Category>> {
    category_breakdown(entries, year, entry_type)
        .into_iter()
        .map(|(name, amount)| {
            Ok(Category {
                name,
                amount: maybe_adjust(amount, year, adjust_to)?,
            })
        })
        .collect()
}

pub async fn build<C: EducationApi + 'static>(
    ctx: &CommandContext<C>,
    scope: ScopeParams,
) -> Result<Report<FinanceView>> {
    let entity = entity::resolve(ctx, scope).await?;
    entity::require_district_data(&entity, "Finance", "finance")?;

    let (entries, enrollment) = futures::try_join!(
        ctx.store.finance.fetch_finance(scope, ctx.refresh),
        ctx.store
            .enrollment
            .fetch_enrollment(EnrollmentParams::new(scope), ctx.refresh),
    )?;

    let fiscal_years = ctx.config.fiscal_years();
    let entries: Vec<_> = entries
        .iter()
        .filter(|e| fiscal_years.contains(&e.year))
        .cloned()
        .collect();
    let adjust_to = ctx.adjust_to();
    let breakdown_year = ctx.config.fiscal_year;

    let view = FinanceView {
        entity,
        dollars_of: adjust_to,
        years: finance_by_year(&entries, &enrollment_totals(&enrollment), adjust_to)?,
        breakdown_year,
        expenditures: categories(
            &entries,
            breakdown_year,
            FinanceEntryType::Expenditure,
            adjust_to,
        )?,
        revenues: categories(&entries, breakdown_year, FinanceEntryType::Revenue, adjust_to)?,
    };

    Ok(render(view))
}

fn render(view: FinanceView) -> Report<FinanceView> {
    let years: Vec<FinanceYearDisplay> = view.years.iter().map(FinanceYearDisplay::from).collect();
    let as_pairs = |categories: &[Category]| -> Vec<(String, f64)> {
        categories
            .iter()
            .map(|c| (c.name.clone(), c.amount))
            .collect()
    };
    let expenditures = CategoryDisplay::rows(&as_pairs(&view.expenditures));
    let revenues = CategoryDisplay::rows(&as_pairs(&view.revenues));
    let dollars = match view.dollars_of {
        Some(year) => format!("{} dollars", year),
        None => "nominal".to_string(),
    };
    let per_pupil = view
        .years
        .iter()
        .find(|y| y.year == view.breakdown_year)
        .and_then(|y| y.per_pupil);
    let title = format!("{}: finances", view.entity.name);
    let year = view.breakdown_year;

    Report::new(title, view)
        .fact("Amounts", dollars)
        .fact(format!("Per pupil ({})", year), or_missing(per_pupil, format_dollars))
        .table("Finances by year", &years)
        .table(format!("Expenditures ({})", year), &expenditures)
        .table(format!("Revenues ({})", year), &revenues)
}
