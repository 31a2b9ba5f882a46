//! Assessment slice: subjects, subgroups and results

use std::sync::Arc;

use super::keyed::{SliceError, Store, StoreConfig};
use crate::client::models::{AssessmentRow, AssessmentSubgroup, AssessmentSubject};
use crate::client::{AcademicApi, AssessmentParams};
use crate::error::Result;

/// Subgroup selected when none is requested
pub const DEFAULT_SUBGROUP_NAME: &str = "All Students";

pub struct AssessmentSlice<C> {
    client: Arc<C>,
    error: Arc<SliceError>,
    pub subjects: Store<(), Vec<AssessmentSubject>>,
    pub subgroups: Store<(), Vec<AssessmentSubgroup>>,
    pub results: Store<AssessmentParams, Vec<AssessmentRow>>,
}

impl<C: AcademicApi + 'static> AssessmentSlice<C> {
    pub fn new(client: Arc<C>, config: &StoreConfig) -> Self {
        let error = Arc::new(SliceError::default());
        Self {
            client,
            subjects: Store::new("assessment subjects", error.clone(), config.clone()),
            subgroups: Store::new("assessment subgroups", error.clone(), config.clone()),
            results: Store::new("assessment results", error.clone(), config.clone()),
            error,
        }
    }

    pub async fn fetch_subjects(&self, force_refresh: bool) -> Result<Arc<Vec<AssessmentSubject>>> {
        let client = Arc::clone(&self.client);
        self.subjects
            .fetch((), force_refresh, move |()| async move {
                client.list_assessment_subjects(force_refresh).await
            })
            .await
    }

    pub async fn fetch_subgroups(
        &self,
        force_refresh: bool,
    ) -> Result<Arc<Vec<AssessmentSubgroup>>> {
        let client = Arc::clone(&self.client);
        self.subgroups
            .fetch((), force_refresh, move |()| async move {
                client.list_assessment_subgroups(force_refresh).await
            })
            .await
    }

    pub async fn fetch_results(
        &self,
        params: AssessmentParams,
        force_refresh: bool,
    ) -> Result<Arc<Vec<AssessmentRow>>> {
        let client = Arc::clone(&self.client);
        self.results
            .fetch(params, force_refresh, move |p| async move {
                client.list_assessments(&p, force_refresh).await
            })
            .await
    }

    pub fn last_error(&self) -> Option<String> {
        self.error.get()
    }
}

/// Subject whose name matches `name` case-insensitively, else the first one
pub fn select_subject<'a>(
    subjects: &'a [AssessmentSubject],
    name: Option<&str>,
) -> Option<&'a AssessmentSubject> {
    match name {
        Some(name) => subjects.iter().find(|s| s.name.eq_ignore_ascii_case(name)),
        None => subjects.first(),
    }
}

/// The "All Students" subgroup when present
pub fn default_subgroup(subgroups: &[AssessmentSubgroup]) -> Option<&AssessmentSubgroup> {
    subgroups
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(DEFAULT_SUBGROUP_NAME))
}
