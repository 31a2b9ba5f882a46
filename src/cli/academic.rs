//! Assessment proficiency: trend against the state and rank among peers

use serde::Serialize;

use super::entity::{self, EntityInfo};
use crate::cli::CommandContext;
use crate::cli::args::AcademicArgs;
use crate::client::models::{AssessmentRow, AssessmentSubgroup, AssessmentSubject};
use crate::client::{AssessmentParams, EducationApi, Level, ScopeParams};
use crate::data::assessment::{
    AssessmentFilter, GradeFilter, ProficiencyPoint, RankInfo, district_rank_info,
    filter_assessment_results, proficiency_trend, school_rank_info,
};
use crate::error::{Error, Result};
use crate::models::{ProficiencyDisplay, or_missing};
use crate::output::Report;
use crate::store::assessment::{default_subgroup, select_subject};

#[derive(Debug, Serialize)]
pub struct AcademicView {
    pub entity: EntityInfo,
    pub subject: Option<AssessmentSubject>,
    pub subgroup: Option<AssessmentSubgroup>,
    pub grade: GradeFilter,
    /// Year the peer ranking is computed for
    pub rank_year: i32,
    pub rank: Option<RankInfo>,
    pub trend: Vec<ProficiencyPoint>,
}

fn resolve_subject<'a>(
    subjects: &'a [AssessmentSubject],
    name: Option<&str>,
) -> Result<Option<&'a AssessmentSubject>> {
    match (select_subject(subjects, name), name) {
        (Some(subject), _) => Ok(Some(subject)),
        (None, Some(name)) => Err(Error::Other(format!(
            "Unknown subject '{}'. Available: {}",
            name,
            subjects
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ))),
        (None, None) => Ok(None),
    }
}

fn resolve_subgroup<'a>(
    subgroups: &'a [AssessmentSubgroup],
    name: Option<&str>,
) -> Result<Option<&'a AssessmentSubgroup>> {
    match name {
        Some(name) => subgroups
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .map(Some)
            .ok_or_else(|| Error::Other(format!("Unknown subgroup '{}'", name))),
        None => Ok(default_subgroup(subgroups).or_else(|| subgroups.first())),
    }
}

fn rank_among_peers(entity: &EntityInfo, peers: &[&AssessmentRow]) -> Option<RankInfo> {
    let id = entity.id?;
    match entity.level {
        Level::District => district_rank_info(peers.iter().copied(), id),
        Level::School => school_rank_info(peers.iter().copied(), id),
        Level::State => None,
    }
}

pub async fn build<C: EducationApi + 'static>(
    ctx: &CommandContext<C>,
    scope: ScopeParams,
    args: &AcademicArgs,
) -> Result<Report<AcademicView>> {
    let store = &ctx.store.assessment;
    let rank_year = ctx.config.fiscal_year;

    let (entity, subjects, subgroups) = futures::try_join!(
        entity::resolve(ctx, scope),
        store.fetch_subjects(ctx.refresh),
        store.fetch_subgroups(ctx.refresh),
    )?;

    let subject = resolve_subject(&subjects, args.subject.as_deref())?.cloned();
    let subgroup = resolve_subgroup(&subgroups, args.subgroup.as_deref())?.cloned();

    let mut view = AcademicView {
        entity,
        subject,
        subgroup,
        grade: args.grade,
        rank_year,
        rank: None,
        trend: Vec::new(),
    };

    let Some(subject) = view.subject.clone() else {
        return Ok(render(view));
    };

    let subgroup_id = view.subgroup.as_ref().map(|s| s.id);
    let results_for = |scope: ScopeParams| {
        AssessmentParams::new(scope)
            .subject(subject.id)
            .subgroup(subgroup_id)
    };
    let peers_params = match scope.level {
        Level::State => None,
        level => Some(results_for(ScopeParams::new(level, None).year(rank_year))),
    };
    let (history, state, peers) = futures::try_join!(
        store.fetch_results(results_for(scope), ctx.refresh),
        store.fetch_results(results_for(ScopeParams::state()), ctx.refresh),
        async {
            match peers_params {
                Some(params) => store.fetch_results(params, ctx.refresh).await.map(Some),
                None => Ok(None),
            }
        },
    )?;

    let filter = AssessmentFilter::new()
        .subject(subject.id)
        .subgroup(subgroup_id)
        .grade(args.grade);

    view.trend = proficiency_trend(
        filter_assessment_results(&history, &filter),
        filter_assessment_results(&state, &filter),
    );
    if let Some(peers) = peers {
        let peer_rows = filter_assessment_results(&peers, &filter.year(rank_year));
        view.rank = rank_among_peers(&view.entity, &peer_rows);
    }

    Ok(render(view))
}

fn render(view: AcademicView) -> Report<AcademicView> {
    let title = match &view.subject {
        Some(subject) => format!("{}: {} proficiency", view.entity.name, subject.name),
        None => format!("{}: proficiency", view.entity.name),
    };
    let rows: Vec<ProficiencyDisplay> = view.trend.iter().map(ProficiencyDisplay::from).collect();
    let subgroup = or_missing(view.subgroup.as_ref(), |s| s.name.clone());
    let grade = view.grade.to_string();
    let rank = (view.entity.level != Level::State).then(|| {
        or_missing(view.rank, |r| format!("{} of {}", r.rank, r.total))
    });
    let rank_label = format!("Rank ({})", view.rank_year);
    let no_subjects = view.subject.is_none();

    let mut report = Report::new(title, view)
        .fact("Subgroup", subgroup)
        .fact("Grades", grade);
    if let Some(rank) = rank {
        report = report.fact(rank_label, rank);
    }
    report = report.table("Proficiency by year", &rows);
    if no_subjects {
        report = report.note("No assessment subjects are published.");
    }
    report
}
