//! Education Freedom Account grants for a district's towns or the state

use serde::Serialize;

use super::entity::{self, EntityInfo};
use crate::cli::CommandContext;
use crate::client::{EducationApi, EfaParams, Level, LocationParams, ScopeParams};
use crate::data::efa::{EfaYear, efa_by_year};
use crate::error::Result;
use crate::models::EfaYearDisplay;
use crate::output::Report;

#[derive(Debug, Serialize)]
pub struct EfaView {
    pub entity: EntityInfo,
    /// Towns summed; empty at state level
    pub town_ids: Vec<u32>,
    pub dollars_of: Option<i32>,
    pub years: Vec<EfaYear>,
}

pub async fn build<C: EducationApi + 'static>(
    ctx: &CommandContext<C>,
    scope: ScopeParams,
) -> Result<Report<EfaView>> {
    let entity = entity::resolve(ctx, scope).await?;
    entity::require_district_data(&entity, "EFA", "efa")?;

    let (town_ids, entries) = match (entity.level, entity.id) {
        (Level::District, Some(district_id)) => {
            let town_ids = if entity.town_ids.is_empty() {
                ctx.store
                    .location
                    .fetch_towns(LocationParams::new().district_id(district_id), ctx.refresh)
                    .await?
                    .iter()
                    .map(|t| t.id)
                    .collect()
            } else {
                entity.town_ids.clone()
            };
            let entries = ctx
                .store
                .efa
                .fetch_efa_for_towns(&town_ids, ctx.refresh)
                .await?;
            (town_ids, entries)
        }
        _ => {
            let entries = ctx
                .store
                .efa
                .fetch_efa(EfaParams::default(), ctx.refresh)
                .await?;
            (Vec::new(), entries.to_vec())
        }
    };

    let fiscal_years = ctx.config.fiscal_years();
    let entries: Vec<_> = entries
        .into_iter()
        .filter(|e| fiscal_years.contains(&e.year))
        .collect();
    let adjust_to = ctx.adjust_to();

    let view = EfaView {
        entity,
        town_ids,
        dollars_of: adjust_to,
        years: efa_by_year(&entries, adjust_to)?,
    };

    let rows: Vec<EfaYearDisplay> = view.years.iter().map(EfaYearDisplay::from).collect();
    let towns = match view.entity.level {
        Level::State => "all".to_string(),
        _ => view.town_ids.len().to_string(),
    };
    let dollars = match adjust_to {
        Some(year) => format!("{} dollars", year),
        None => "nominal".to_string(),
    };
    let title = format!("{}: Education Freedom Accounts", view.entity.name);

    Ok(Report::new(title, view)
        .fact("Towns", towns)
        .fact("Amounts", dollars)
        .table("Grants by year", &rows))
}
