//! Mock school statistics API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls. Leveled endpoints filter the configured
//! records by scope the way the real API does.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::api::{AcademicApi, FinanceApi, LocationApi, PopulationApi, SafetyApi};
use super::endpoints;
use super::models::{
    AssessmentRow, AssessmentSubgroup, AssessmentSubject, ClassSizeRecord, District, EfaEntry,
    EnrollmentRecord, FinanceEntry, GraduationRecord, MeasurementRow, MeasurementType,
    PostGraduationRecord, SafetyCategory, SafetyParams, SafetyRecord, Sau, School, StaffRecord,
    Town,
};
use super::params::{
    AssessmentParams, EfaParams, EnrollmentParams, Level, LocationParams, MeasurementParams,
    QueryParams, ScopeParams,
};
use crate::data::HasYear;
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockEducationClient::new()
///     .with_districts(vec![district(5, "Bedford")]);
///
/// let districts = mock.list_districts(&LocationParams::new(), false).await?;
/// assert_eq!(districts.len(), 1);
/// ```
#[derive(Default)]
pub struct MockEducationClient {
    districts: Mutex<Vec<District>>,
    schools: Mutex<Vec<School>>,
    towns: Mutex<Vec<Town>>,
    saus: Mutex<Vec<Sau>>,
    measurement_types: Mutex<Vec<MeasurementType>>,
    measurements: Mutex<Vec<MeasurementRow>>,
    subjects: Mutex<Vec<AssessmentSubject>>,
    subgroups: Mutex<Vec<AssessmentSubgroup>>,
    assessments: Mutex<Vec<AssessmentRow>>,
    safety: Mutex<HashMap<SafetyCategory, Vec<SafetyRecord>>>,
    finance: Mutex<Vec<FinanceEntry>>,
    efa: Mutex<Vec<EfaEntry>>,
    enrollment: Mutex<Vec<EnrollmentRecord>>,
    graduation: Mutex<Vec<GraduationRecord>>,
    post_graduation: Mutex<Vec<PostGraduationRecord>>,
    staff: Mutex<Vec<StaffRecord>>,
    class_sizes: Mutex<Vec<ClassSizeRecord>>,
    /// Error to return (if any) - consumed on first use
    error: Mutex<Option<ApiError>>,
    /// Simulated response latency
    delay: Option<Duration>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub list_districts: usize,
    pub list_schools: usize,
    pub list_towns: usize,
    pub list_saus: usize,
    pub list_measurement_types: usize,
    pub list_measurements: usize,
    pub list_assessment_subjects: usize,
    pub list_assessment_subgroups: usize,
    pub list_assessments: usize,
    pub list_safety: usize,
    pub list_finance: usize,
    pub list_efa: usize,
    pub list_enrollment: usize,
    pub list_graduation: usize,
    pub list_post_graduation: usize,
    pub list_staff: usize,
    pub list_class_sizes: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.list_districts
            + self.list_schools
            + self.list_towns
            + self.list_saus
            + self.list_measurement_types
            + self.list_measurements
            + self.list_assessment_subjects
            + self.list_assessment_subgroups
            + self.list_assessments
            + self.list_safety
            + self.list_finance
            + self.list_efa
            + self.list_enrollment
            + self.list_graduation
            + self.list_post_graduation
            + self.list_staff
            + self.list_class_sizes
    }
}

/// A request seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    pub endpoint: String,
    pub options_key: String,
}

/// Records carrying the entity columns used for scope filtering
trait Scoped: HasYear {
    fn district_id(&self) -> Option<u32>;
    fn school_id(&self) -> Option<u32>;
}

macro_rules! impl_scoped {
    ($($record:ty),* $(,)?) => {
        $(
            impl Scoped for $record {
                fn district_id(&self) -> Option<u32> {
                    self.district_id
                }

                fn school_id(&self) -> Option<u32> {
                    self.school_id
                }
            }
        )*
    };
}

impl_scoped!(
    AssessmentRow,
    SafetyRecord,
    EnrollmentRecord,
    GraduationRecord,
    PostGraduationRecord,
    StaffRecord,
    ClassSizeRecord,
);

impl Scoped for FinanceEntry {
    fn district_id(&self) -> Option<u32> {
        self.district_id
    }

    fn school_id(&self) -> Option<u32> {
        None
    }
}

/// Whether a record belongs to the requested level, entity and year
fn in_scope<R: Scoped>(scope: &ScopeParams, record: &R) -> bool {
    let at_level = match scope.level {
        Level::State => record.district_id().is_none() && record.school_id().is_none(),
        Level::District => {
            record.school_id().is_none()
                && record.district_id().is_some()
                && scope
                    .entity_id
                    .is_none_or(|id| record.district_id() == Some(id))
        }
        Level::School => {
            record.school_id().is_some()
                && scope
                    .entity_id
                    .is_none_or(|id| record.school_id() == Some(id))
        }
    };
    at_level && scope.year.is_none_or(|year| record.year() == year)
}

impl MockEducationClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_districts(mut self, districts: Vec<District>) -> Self {
        *self.districts.get_mut() = districts;
        self
    }

    pub fn with_schools(mut self, schools: Vec<School>) -> Self {
        *self.schools.get_mut() = schools;
        self
    }

    pub fn with_towns(mut self, towns: Vec<Town>) -> Self {
        *self.towns.get_mut() = towns;
        self
    }

    pub fn with_saus(mut self, saus: Vec<Sau>) -> Self {
        *self.saus.get_mut() = saus;
        self
    }

    pub fn with_measurement_types(mut self, types: Vec<MeasurementType>) -> Self {
        *self.measurement_types.get_mut() = types;
        self
    }

    pub fn with_measurements(mut self, rows: Vec<MeasurementRow>) -> Self {
        *self.measurements.get_mut() = rows;
        self
    }

    pub fn with_subjects(mut self, subjects: Vec<AssessmentSubject>) -> Self {
        *self.subjects.get_mut() = subjects;
        self
    }

    pub fn with_subgroups(mut self, subgroups: Vec<AssessmentSubgroup>) -> Self {
        *self.subgroups.get_mut() = subgroups;
        self
    }

    pub fn with_assessments(mut self, rows: Vec<AssessmentRow>) -> Self {
        *self.assessments.get_mut() = rows;
        self
    }

    pub fn with_safety(mut self, category: SafetyCategory, records: Vec<SafetyRecord>) -> Self {
        self.safety.get_mut().insert(category, records);
        self
    }

    pub fn with_finance(mut self, entries: Vec<FinanceEntry>) -> Self {
        *self.finance.get_mut() = entries;
        self
    }

    pub fn with_efa(mut self, entries: Vec<EfaEntry>) -> Self {
        *self.efa.get_mut() = entries;
        self
    }

    pub fn with_enrollment(mut self, records: Vec<EnrollmentRecord>) -> Self {
        *self.enrollment.get_mut() = records;
        self
    }

    pub fn with_graduation(mut self, records: Vec<GraduationRecord>) -> Self {
        *self.graduation.get_mut() = records;
        self
    }

    pub fn with_post_graduation(mut self, records: Vec<PostGraduationRecord>) -> Self {
        *self.post_graduation.get_mut() = records;
        self
    }

    pub fn with_staff(mut self, records: Vec<StaffRecord>) -> Self {
        *self.staff.get_mut() = records;
        self
    }

    pub fn with_class_sizes(mut self, records: Vec<ClassSizeRecord>) -> Self {
        *self.class_sizes.get_mut() = records;
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub fn with_error(mut self, error: ApiError) -> Self {
        *self.error.get_mut() = Some(error);
        self
    }

    /// Delay every response, so concurrent callers overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Shared handle on the call counts, still readable once the mock has
    /// been moved into a store.
    pub fn call_counter(&self) -> Arc<Mutex<CallCounts>> {
        Arc::clone(&self.call_count)
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Count and capture the call, wait out the delay, then surface any
    /// pending error.
    async fn begin(
        &self,
        endpoint: &str,
        params: &(dyn QueryParams + Sync),
        bump: impl FnOnce(&mut CallCounts),
    ) -> Result<()> {
        bump(&mut *self.call_count.lock().await);
        self.captured_requests.lock().await.push(CapturedRequest {
            endpoint: endpoint.to_string(),
            options_key: params.options_key(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(e) = self.error.lock().await.take() {
            return Err(e.into());
        }
        Ok(())
    }
}

/// Parameters of endpoints that take none
struct NoParams;

impl QueryParams for NoParams {
    fn query_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        Vec::new()
    }
}

fn scoped<R: Scoped + Clone>(records: &[R], scope: &ScopeParams) -> Vec<R> {
    records
        .iter()
        .filter(|r| in_scope(scope, *r))
        .cloned()
        .collect()
}

// ============================================================================
// LocationApi Implementation
// ============================================================================

#[async_trait]
impl LocationApi for MockEducationClient {
    async fn list_districts(
        &self,
        params: &LocationParams,
        _force_refresh: bool,
    ) -> Result<Vec<District>> {
        self.begin(endpoints::DISTRICTS, params, |c| c.list_districts += 1)
            .await?;
        Ok(self
            .districts
            .lock()
            .await
            .iter()
            .filter(|d| params.id.is_none_or(|id| d.id == id))
            .filter(|d| params.sau_id.is_none_or(|sau| d.sau_id == Some(sau)))
            .cloned()
            .collect())
    }

    async fn list_schools(
        &self,
        params: &LocationParams,
        _force_refresh: bool,
    ) -> Result<Vec<School>> {
        self.begin(endpoints::SCHOOLS, params, |c| c.list_schools += 1)
            .await?;
        Ok(self
            .schools
            .lock()
            .await
            .iter()
            .filter(|s| params.id.is_none_or(|id| s.id == id))
            .filter(|s| {
                params
                    .district_id
                    .is_none_or(|district| s.district_id == Some(district))
            })
            .cloned()
            .collect())
    }

    async fn list_towns(&self, params: &LocationParams, _force_refresh: bool) -> Result<Vec<Town>> {
        self.begin(endpoints::TOWNS, params, |c| c.list_towns += 1)
            .await?;
        Ok(self
            .towns
            .lock()
            .await
            .iter()
            .filter(|t| {
                params
                    .district_id
                    .is_none_or(|district| t.district_id == Some(district))
            })
            .cloned()
            .collect())
    }

    async fn list_saus(&self, params: &LocationParams, _force_refresh: bool) -> Result<Vec<Sau>> {
        self.begin(endpoints::SAUS, params, |c| c.list_saus += 1)
            .await?;
        Ok(self
            .saus
            .lock()
            .await
            .iter()
            .filter(|s| params.id.is_none_or(|id| s.id == id))
            .cloned()
            .collect())
    }
}

// ============================================================================
// AcademicApi Implementation
// ============================================================================

#[async_trait]
impl AcademicApi for MockEducationClient {
    async fn list_measurement_types(&self, _force_refresh: bool) -> Result<Vec<MeasurementType>> {
        self.begin(endpoints::MEASUREMENT_TYPES, &NoParams, |c| {
            c.list_measurement_types += 1
        })
        .await?;
        Ok(self.measurement_types.lock().await.clone())
    }

    async fn list_measurements(
        &self,
        params: &MeasurementParams,
        _force_refresh: bool,
    ) -> Result<Vec<MeasurementRow>> {
        self.begin(endpoints::MEASUREMENTS, params, |c| c.list_measurements += 1)
            .await?;
        Ok(self
            .measurements
            .lock()
            .await
            .iter()
            .filter(|m| params.district_id.is_none_or(|id| m.district_id == Some(id)))
            .filter(|m| params.school_id.is_none_or(|id| m.school_id == Some(id)))
            .filter(|m| params.year.is_none_or(|year| m.year == year))
            .filter(|m| {
                params
                    .measurement_type_id
                    .is_none_or(|id| m.measurement_type_id == id)
            })
            .cloned()
            .collect())
    }

    async fn list_assessment_subjects(
        &self,
        _force_refresh: bool,
    ) -> Result<Vec<AssessmentSubject>> {
        self.begin(endpoints::ASSESSMENT_SUBJECTS, &NoParams, |c| {
            c.list_assessment_subjects += 1
        })
        .await?;
        Ok(self.subjects.lock().await.clone())
    }

    async fn list_assessment_subgroups(
        &self,
        _force_refresh: bool,
    ) -> Result<Vec<AssessmentSubgroup>> {
        self.begin(endpoints::ASSESSMENT_SUBGROUPS, &NoParams, |c| {
            c.list_assessment_subgroups += 1
        })
        .await?;
        Ok(self.subgroups.lock().await.clone())
    }

    async fn list_assessments(
        &self,
        params: &AssessmentParams,
        _force_refresh: bool,
    ) -> Result<Vec<AssessmentRow>> {
        let endpoint = endpoints::assessments(params.scope.level);
        self.begin(&endpoint, params, |c| c.list_assessments += 1)
            .await?;
        Ok(scoped(&self.assessments.lock().await, &params.scope)
            .into_iter()
            .filter(|r| {
                params
                    .subject_id
                    .is_none_or(|id| r.assessment_subject_id == id)
            })
            .filter(|r| {
                params
                    .subgroup_id
                    .is_none_or(|id| r.assessment_subgroup_id == id)
            })
            .collect())
    }

    async fn list_graduation(
        &self,
        params: &ScopeParams,
        _force_refresh: bool,
    ) -> Result<Vec<GraduationRecord>> {
        self.begin(&endpoints::graduation(params.level), params, |c| {
            c.list_graduation += 1
        })
        .await?;
        Ok(scoped(&self.graduation.lock().await, params))
    }

    async fn list_post_graduation(
        &self,
        params: &ScopeParams,
        _force_refresh: bool,
    ) -> Result<Vec<PostGraduationRecord>> {
        self.begin(&endpoints::post_graduation(params.level), params, |c| {
            c.list_post_graduation += 1
        })
        .await?;
        Ok(scoped(&self.post_graduation.lock().await, params))
    }
}

// ============================================================================
// SafetyApi Implementation
// ============================================================================

#[async_trait]
impl SafetyApi for MockEducationClient {
    async fn list_safety(
        &self,
        params: &SafetyParams,
        _force_refresh: bool,
    ) -> Result<Vec<SafetyRecord>> {
        let endpoint = endpoints::safety(params.category, params.scope.level);
        self.begin(&endpoint, params, |c| c.list_safety += 1)
            .await?;
        let safety = self.safety.lock().await;
        Ok(safety
            .get(&params.category)
            .map(|records| scoped(records, &params.scope))
            .unwrap_or_default())
    }
}

// ============================================================================
// FinanceApi Implementation
// ============================================================================

#[async_trait]
impl FinanceApi for MockEducationClient {
    async fn list_finance(
        &self,
        params: &ScopeParams,
        _force_refresh: bool,
    ) -> Result<Vec<FinanceEntry>> {
        self.begin(&endpoints::finance(params.level), params, |c| {
            c.list_finance += 1
        })
        .await?;
        Ok(scoped(&self.finance.lock().await, params))
    }

    async fn list_efa(&self, params: &EfaParams, _force_refresh: bool) -> Result<Vec<EfaEntry>> {
        self.begin(endpoints::EFA, params, |c| c.list_efa += 1).await?;
        Ok(self
            .efa
            .lock()
            .await
            .iter()
            .filter(|e| params.town_id.is_none_or(|id| e.town_id == id))
            .filter(|e| params.year.is_none_or(|year| e.year == year))
            .cloned()
            .collect())
    }
}

// ============================================================================
// PopulationApi Implementation
// ============================================================================

#[async_trait]
impl PopulationApi for MockEducationClient {
    async fn list_enrollment(
        &self,
        params: &EnrollmentParams,
        _force_refresh: bool,
    ) -> Result<Vec<EnrollmentRecord>> {
        let endpoint = endpoints::enrollment(params.scope.level);
        self.begin(&endpoint, params, |c| c.list_enrollment += 1)
            .await?;
        Ok(scoped(&self.enrollment.lock().await, &params.scope)
            .into_iter()
            .filter(|r| params.grade_id.is_none_or(|id| r.grade_id == Some(id)))
            .collect())
    }

    async fn list_staff(
        &self,
        params: &ScopeParams,
        _force_refresh: bool,
    ) -> Result<Vec<StaffRecord>> {
        self.begin(&endpoints::staff(params.level), params, |c| {
            c.list_staff += 1
        })
        .await?;
        Ok(scoped(&self.staff.lock().await, params))
    }

    async fn list_class_sizes(
        &self,
        params: &ScopeParams,
        _force_refresh: bool,
    ) -> Result<Vec<ClassSizeRecord>> {
        self.begin(&endpoints::class_size(params.level), params, |c| {
            c.list_class_sizes += 1
        })
        .await?;
        Ok(scoped(&self.class_sizes.lock().await, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::{AssessmentRowBuilder, district, enrollment};

    #[tokio::test]
    async fn test_mock_counts_and_captures() {
        let mock = MockEducationClient::new().with_districts(vec![district(5, "Bedford")]);

        let districts = mock
            .list_districts(&LocationParams::new(), false)
            .await
            .unwrap();

        assert_eq!(districts.len(), 1);
        assert_eq!(mock.call_counts().await.list_districts, 1);
        assert_eq!(
            mock.captured_requests().await,
            vec![CapturedRequest {
                endpoint: "location/districts".to_string(),
                options_key: "_default".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_mock_error_consumed_once() {
        let mock = MockEducationClient::new().with_error(ApiError::NotFound("x".to_string()));

        assert!(mock.list_saus(&LocationParams::new(), false).await.is_err());
        assert!(mock.list_saus(&LocationParams::new(), false).await.is_ok());
        assert_eq!(mock.call_counts().await.total(), 2);
    }

    #[tokio::test]
    async fn test_mock_filters_by_scope() {
        let mock = MockEducationClient::new()
            .with_enrollment(vec![enrollment(5, 2024, 3000), enrollment(6, 2024, 1200)])
            .with_assessments(vec![
                AssessmentRowBuilder::new(2024).percentage(50.0).build(),
                AssessmentRowBuilder::new(2024).district(5).percentage(60.0).build(),
                AssessmentRowBuilder::new(2024).school(41, 5).percentage(70.0).build(),
            ]);

        let district = mock
            .list_enrollment(&EnrollmentParams::new(ScopeParams::district(5)), false)
            .await
            .unwrap();
        assert_eq!(district.len(), 1);
        assert_eq!(district[0].count, 3000);

        let state = mock
            .list_assessments(&AssessmentParams::new(ScopeParams::state()), false)
            .await
            .unwrap();
        assert_eq!(state.len(), 1);
        assert_eq!(state[0].above_proficient_percentage, Some(50.0));

        let all_districts = ScopeParams::new(Level::District, None);
        let peers = mock
            .list_assessments(&AssessmentParams::new(all_districts), false)
            .await
            .unwrap();
        assert_eq!(peers.len(), 1);
    }
}
