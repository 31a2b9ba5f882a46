//! In-process store of fetched API data
//!
//! One slice per resource family. Each slice owns a [`Store`] per resource,
//! keyed by the typed parameter record, so a view asking twice for the same
//! data (or two views sharing a resource) performs one request. Fetch
//! methods are `fetch_*`.

pub mod assessment;
pub mod class_size;
pub mod clock;
pub mod efa;
pub mod enrollment;
pub mod finance;
pub mod keyed;
pub mod location;
pub mod measurement;
pub mod outcome;
pub mod safety;
pub mod staff;

use std::sync::Arc;

use crate::client::EducationApi;

pub use keyed::StoreConfig;

/// Every slice, sharing one API client
pub struct EducationStore<C> {
    pub location: location::LocationSlice<C>,
    pub measurement: measurement::MeasurementSlice<C>,
    pub assessment: assessment::AssessmentSlice<C>,
    pub safety: safety::SafetySlice<C>,
    pub finance: finance::FinanceSlice<C>,
    pub efa: efa::EfaSlice<C>,
    pub enrollment: enrollment::EnrollmentSlice<C>,
    pub outcome: outcome::OutcomeSlice<C>,
    pub staff: staff::StaffSlice<C>,
    pub class_size: class_size::ClassSizeSlice<C>,
}

impl<C: EducationApi + 'static> EducationStore<C> {
    pub fn new(client: C, config: StoreConfig) -> Self {
        let client = Arc::new(client);
        Self {
            location: location::LocationSlice::new(client.clone(), &config),
            measurement: measurement::MeasurementSlice::new(client.clone(), &config),
            assessment: assessment::AssessmentSlice::new(client.clone(), &config),
            safety: safety::SafetySlice::new(client.clone(), &config),
            finance: finance::FinanceSlice::new(client.clone(), &config),
            efa: efa::EfaSlice::new(client.clone(), &config),
            enrollment: enrollment::EnrollmentSlice::new(client.clone(), &config),
            outcome: outcome::OutcomeSlice::new(client.clone(), &config),
            staff: staff::StaffSlice::new(client.clone(), &config),
            class_size: class_size::ClassSizeSlice::new(client, &config),
        }
    }

    /// Errors currently recorded by any slice, labelled by slice
    pub fn errors(&self) -> Vec<(&'static str, String)> {
        [
            ("location", self.location.last_error()),
            ("measurement", self.measurement.last_error()),
            ("assessment", self.assessment.last_error()),
            ("safety", self.safety.last_error()),
            ("finance", self.finance.last_error()),
            ("efa", self.efa.last_error()),
            ("enrollment", self.enrollment.last_error()),
            ("outcome", self.outcome.last_error()),
            ("staff", self.staff.last_error()),
            ("class_size", self.class_size.last_error()),
        ]
        .into_iter()
        .filter_map(|(slice, error)| error.map(|e| (slice, e)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::enrollment;
    use crate::client::{EnrollmentParams, MockEducationClient, ScopeParams};
    use crate::error::ApiError;

    #[tokio::test]
    async fn test_slices_share_client() {
        let mock = MockEducationClient::new()
            .with_enrollment(vec![enrollment(5, 2024, 3000)])
            .with_error(ApiError::NotFound("staff/district".to_string()));
        let store = EducationStore::new(mock, StoreConfig::default());

        assert!(store.staff.fetch_staff(ScopeParams::district(5), false).await.is_err());
        let records = store
            .enrollment
            .fetch_enrollment(EnrollmentParams::new(ScopeParams::district(5)), false)
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        let errors = store.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, "staff");
    }
}
