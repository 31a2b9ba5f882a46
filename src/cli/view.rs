//! Dispatch of district, school and state view commands

use std::future::Future;

use serde::Serialize;

use crate::cli::args::GlobalOptions;
use crate::cli::{
    CommandContext, EntityCommands, StateCommands, academic, class_size, efa, enrollment,
    finance, list, outcomes, overview, safety, staff,
};
use crate::client::{Level, ScopeParams};
use crate::error::{Error, Result};
use crate::output::{self, Report};

/// Build a report behind a spinner, then print it
async fn show<D, F>(ctx: &CommandContext, message: &str, build: F) -> Result<()>
where
    D: Serialize,
    F: Future<Output = Result<Report<D>>>,
{
    let report = match ctx.with_spinner(message, build).await {
        Ok(report) => report,
        Err(err) => {
            for (slice, failure) in other_failures(ctx.store.errors(), &err) {
                log::warn!("{} data also failed to load: {}", slice, failure);
            }
            return Err(err);
        }
    };
    output::print(&report, ctx.format)
}

/// Slice errors not already described by `err`, which `main` prints
fn other_failures(
    errors: Vec<(&'static str, String)>,
    err: &Error,
) -> Vec<(&'static str, String)> {
    let reported = err.to_string();
    errors
        .into_iter()
        .filter(|(_, failure)| !reported.contains(failure.as_str()))
        .collect()
}

/// Run a `district` or `school` subcommand
pub async fn run_entity(opts: &GlobalOptions, level: Level, command: EntityCommands) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let scope = |id: u32| ScopeParams::new(level, Some(id));

    match command {
        EntityCommands::List(args) => match level {
            Level::School => {
                let rows = ctx
                    .with_spinner("Loading schools", list::schools(&ctx, &args))
                    .await?;
                output::print(&rows, ctx.format)
            }
            _ => {
                let rows = ctx
                    .with_spinner("Loading districts", list::districts(&ctx, &args))
                    .await?;
                output::print(&rows, ctx.format)
            }
        },
        EntityCommands::Overview { id } => {
            show(&ctx, "Loading overview", overview::build(&ctx, scope(id))).await
        }
        EntityCommands::Academic { id, args } => {
            show(
                &ctx,
                "Loading assessments",
                academic::build(&ctx, scope(id), &args),
            )
            .await
        }
        EntityCommands::Safety { id, category } => {
            show(
                &ctx,
                "Loading safety data",
                safety::build(&ctx, scope(id), category),
            )
            .await
        }
        EntityCommands::Finance { id } => {
            show(&ctx, "Loading finances", finance::build(&ctx, scope(id))).await
        }
        EntityCommands::Efa { id } => {
            show(&ctx, "Loading EFA grants", efa::build(&ctx, scope(id))).await
        }
        EntityCommands::Enrollment { id } => {
            show(&ctx, "Loading enrollment", enrollment::build(&ctx, scope(id))).await
        }
        EntityCommands::Outcomes { id } => {
            show(&ctx, "Loading outcomes", outcomes::build(&ctx, scope(id))).await
        }
        EntityCommands::Staff { id } => {
            show(&ctx, "Loading staff", staff::build(&ctx, scope(id))).await
        }
        EntityCommands::ClassSize { id } => {
            show(&ctx, "Loading class sizes", class_size::build(&ctx, scope(id))).await
        }
    }
}

/// Run a `state` subcommand
pub async fn run_state(opts: &GlobalOptions, command: StateCommands) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let scope = ScopeParams::state();

    match command {
        StateCommands::Academic(args) => {
            show(&ctx, "Loading assessments", academic::build(&ctx, scope, &args)).await
        }
        StateCommands::Safety { category } => {
            show(&ctx, "Loading safety data", safety::build(&ctx, scope, category)).await
        }
        StateCommands::Finance => show(&ctx, "Loading finances", finance::build(&ctx, scope)).await,
        StateCommands::Efa => show(&ctx, "Loading EFA grants", efa::build(&ctx, scope)).await,
        StateCommands::Enrollment => {
            show(&ctx, "Loading enrollment", enrollment::build(&ctx, scope)).await
        }
        StateCommands::Outcomes => {
            show(&ctx, "Loading outcomes", outcomes::build(&ctx, scope)).await
        }
        StateCommands::Staff => show(&ctx, "Loading staff", staff::build(&ctx, scope)).await,
        StateCommands::ClassSize => {
            show(&ctx, "Loading class sizes", class_size::build(&ctx, scope)).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::context::testing::context;
    use crate::client::MockEducationClient;
    use crate::error::ApiError;

    #[tokio::test]
    async fn test_other_failures_skips_reported_error() {
        let mock = MockEducationClient::new()
            .with_error(ApiError::ServerError("enrollment down".to_string()));
        let ctx = context(mock);

        let err = enrollment::build(&ctx, ScopeParams::state()).await.unwrap_err();
        let errors = ctx.store.errors();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, "enrollment");
        assert!(other_failures(errors, &err).is_empty());
    }

    #[test]
    fn test_other_failures_keeps_unrelated_errors() {
        let err = Error::Fetch {
            resource: "staff",
            message: "Server error: staff down".to_string(),
        };
        let errors = vec![
            ("staff", "Server error: staff down".to_string()),
            ("finance", "Network error: offline".to_string()),
        ];

        assert_eq!(
            other_failures(errors, &err),
            vec![("finance", "Network error: offline".to_string())]
        );
    }
}
