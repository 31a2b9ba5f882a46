//! Average class sizes against the state

use serde::Serialize;

use super::entity::{self, EntityInfo};
use crate::cli::CommandContext;
use crate::client::{EducationApi, ScopeParams};
use crate::data::class_size::{ClassSizeRow, class_sizes};
use crate::error::Result;
use crate::models::ClassSizeDisplay;
use crate::output::Report;

#[derive(Debug, Serialize)]
pub struct ClassSizeView {
    pub entity: EntityInfo,
    pub rows: Vec<ClassSizeRow>,
}

pub async fn build<C: EducationApi + 'static>(
    ctx: &CommandContext<C>,
    scope: ScopeParams,
) -> Result<Report<ClassSizeView>> {
    let slice = &ctx.store.class_size;
    let (entity, records, state_records) = futures::try_join!(
        entity::resolve(ctx, scope),
        slice.fetch_class_sizes(scope, ctx.refresh),
        slice.fetch_class_sizes(ScopeParams::state(), ctx.refresh),
    )?;

    let view = ClassSizeView {
        entity,
        rows: class_sizes(&records, &state_records),
    };
    let rows: Vec<ClassSizeDisplay> = view.rows.iter().map(ClassSizeDisplay::from).collect();
    let title = format!("{}: class sizes", view.entity.name);

    Ok(Report::new(title, view).table("Average class size", &rows))
}
