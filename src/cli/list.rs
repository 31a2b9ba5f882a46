//! District and school listings

use log::debug;

use crate::cli::CommandContext;
use crate::cli::args::ListArgs;
use crate::client::EducationApi;
use crate::error::Result;
use crate::models::{DistrictDisplay, SchoolDisplay};

/// Districts matching the filters, ordered by name
pub async fn districts<C: EducationApi + 'static>(
    ctx: &CommandContext<C>,
    args: &ListArgs,
) -> Result<Vec<DistrictDisplay>> {
    let districts = ctx
        .store
        .location
        .fetch_districts(args.district_params(), ctx.refresh)
        .await?;
    debug!("Fetched {} districts", districts.len());

    let mut matching: Vec<_> = districts
        .iter()
        .filter(|d| args.matches_name(&d.name))
        .collect();
    matching.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

    Ok(matching
        .into_iter()
        .take(args.limit.unwrap_or(usize::MAX))
        .map(DistrictDisplay::from)
        .collect())
}

/// Schools matching the filters, ordered by name
pub async fn schools<C: EducationApi + 'static>(
    ctx: &CommandContext<C>,
    args: &ListArgs,
) -> Result<Vec<SchoolDisplay>> {
    let schools = ctx
        .store
        .location
        .fetch_schools(args.school_params(), ctx.refresh)
        .await?;
    debug!("Fetched {} schools", schools.len());

    let mut matching: Vec<_> = schools
        .iter()
        .filter(|s| args.matches_name(&s.name))
        .collect();
    matching.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

    Ok(matching
        .into_iter()
        .take(args.limit.unwrap_or(usize::MAX))
        .map(SchoolDisplay::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::context::testing::context;
    use crate::client::MockEducationClient;
    use crate::client::fixtures::{district, school};

    #[tokio::test]
    async fn test_districts_sorted_filtered_and_limited() {
        let ctx = context(MockEducationClient::new().with_districts(vec![
            district(7, "Concord"),
            district(5, "Bedford"),
            district(9, "Bow"),
        ]));

        let args = ListArgs {
            name: Some("b".to_string()),
            limit: Some(1),
            ..ListArgs::default()
        };
        let rows = districts(&ctx, &args).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Bedford");
    }

    #[tokio::test]
    async fn test_schools_of_one_district() {
        let ctx = context(MockEducationClient::new().with_schools(vec![
            school(41, "Memorial School", 5),
            school(42, "Riddle Brook School", 5),
            school(90, "Rundlett Middle School", 7),
        ]));

        let args = ListArgs {
            district: Some(5),
            ..ListArgs::default()
        };
        let rows = schools(&ctx, &args).await.unwrap();

        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Memorial School", "Riddle Brook School"]);
    }
}
