//! Resolve the state, district or school a view is about

use serde::Serialize;

use crate::cli::CommandContext;
use crate::client::{EducationApi, Level, LocationParams, ScopeParams};
use crate::error::{ApiError, Error, Result};

/// Display name of the state-level entity
pub const STATE_NAME: &str = "New Hampshire";

/// Subject of a view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityInfo {
    pub level: Level,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub name: String,
    /// School Administrative Unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sau_id: Option<u32>,
    /// A school's district
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district_id: Option<u32>,
    /// Towns served by a district
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub town_ids: Vec<u32>,
    /// A school's grade span
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grades: Option<String>,
}

impl EntityInfo {
    pub fn state() -> Self {
        Self {
            level: Level::State,
            id: None,
            name: STATE_NAME.to_string(),
            sau_id: None,
            district_id: None,
            town_ids: Vec::new(),
            grades: None,
        }
    }

    /// "district 5"-style label for messages
    pub fn label(&self) -> String {
        match self.id {
            Some(id) => format!("{} {}", self.level, id),
            None => self.level.to_string(),
        }
    }
}

/// Look up the entity named by `scope`.
///
/// State scope needs no request. Unknown district or school ids are
/// [`ApiError::NotFound`].
pub async fn resolve<C: EducationApi + 'static>(
    ctx: &CommandContext<C>,
    scope: ScopeParams,
) -> Result<EntityInfo> {
    let location = &ctx.store.location;

    match (scope.level, scope.entity_id) {
        (Level::District, Some(id)) => {
            let districts = location
                .fetch_districts(LocationParams::new().id(id), ctx.refresh)
                .await?;
            let district = districts
                .iter()
                .find(|d| d.id == id)
                .ok_or_else(|| ApiError::NotFound(format!("district {}", id)))?;
            Ok(EntityInfo {
                level: Level::District,
                id: Some(id),
                name: district.name.clone(),
                sau_id: district.sau_id,
                district_id: None,
                town_ids: district.town_ids.clone(),
                grades: None,
            })
        }
        (Level::School, Some(id)) => {
            let schools = location
                .fetch_schools(LocationParams::new().id(id), ctx.refresh)
                .await?;
            let school = schools
                .iter()
                .find(|s| s.id == id)
                .ok_or_else(|| ApiError::NotFound(format!("school {}", id)))?;
            Ok(EntityInfo {
                level: Level::School,
                id: Some(id),
                name: school.name.clone(),
                sau_id: school.sau_id,
                district_id: school.district_id,
                town_ids: Vec::new(),
                grades: school.grades.clone(),
            })
        }
        _ => Ok(EntityInfo::state()),
    }
}

/// Reject school scope for data published per district only, pointing at
/// the school's district instead
pub fn require_district_data(entity: &EntityInfo, topic: &str, command: &str) -> Result<()> {
    if entity.level != Level::School {
        return Ok(());
    }
    let hint = match entity.district_id {
        Some(id) => format!("nhschools district {} {}", command, id),
        None => "nhschools district list".to_string(),
    };
    Err(Error::Other(format!(
        "{} data is reported per district. Try: {}",
        topic, hint
    )))
}
