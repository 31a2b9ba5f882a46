//! Academic API trait: measurements, assessments and outcomes

use async_trait::async_trait;

use crate::client::models::{
    AssessmentRow, AssessmentSubgroup, AssessmentSubject, GraduationRecord, MeasurementRow,
    MeasurementType, PostGraduationRecord,
};
use crate::client::params::{AssessmentParams, MeasurementParams, ScopeParams};
use crate::error::Result;

#[async_trait]
pub trait AcademicApi: Send + Sync {
    // ========================================================================
    // Measurements
    // ========================================================================

    /// `GET measurements/types`
    async fn list_measurement_types(&self, force_refresh: bool) -> Result<Vec<MeasurementType>>;

    /// `GET measurements/`
    async fn list_measurements(
        &self,
        params: &MeasurementParams,
        force_refresh: bool,
    ) -> Result<Vec<MeasurementRow>>;

    // ========================================================================
    // Assessments
    // ========================================================================

    /// `GET assessments/subjects`
    async fn list_assessment_subjects(&self, force_refresh: bool)
    -> Result<Vec<AssessmentSubject>>;

    /// `GET assessments/subgroups`
    async fn list_assessment_subgroups(
        &self,
        force_refresh: bool,
    ) -> Result<Vec<AssessmentSubgroup>>;

    /// `GET assessments/{level}`
    async fn list_assessments(
        &self,
        params: &AssessmentParams,
        force_refresh: bool,
    ) -> Result<Vec<AssessmentRow>>;

    // ========================================================================
    // Outcomes
    // ========================================================================

    /// `GET outcomes/graduation/{level}`
    async fn list_graduation(
        &self,
        params: &ScopeParams,
        force_refresh: bool,
    ) -> Result<Vec<GraduationRecord>>;

    /// `GET outcomes/post-graduation/{level}`
    async fn list_post_graduation(
        &self,
        params: &ScopeParams,
        force_refresh: bool,
    ) -> Result<Vec<PostGraduationRecord>>;
}
