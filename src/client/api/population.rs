//! Population API trait: enrollment, staffing, class sizes

use async_trait::async_trait;

use crate::client::models::{ClassSizeRecord, EnrollmentRecord, StaffRecord};
use crate::client::params::{EnrollmentParams, ScopeParams};
use crate::error::Result;

#[async_trait]
pub trait PopulationApi: Send + Sync {
    /// `GET enrollment/{level}`
    async fn list_enrollment(
        &self,
        params: &EnrollmentParams,
        force_refresh: bool,
    ) -> Result<Vec<EnrollmentRecord>>;

    /// `GET staff/{level}`
    async fn list_staff(&self, params: &ScopeParams, force_refresh: bool)
    -> Result<Vec<StaffRecord>>;

    /// `GET class-size/{level}`
    async fn list_class_sizes(
        &self,
        params: &ScopeParams,
        force_refresh: bool,
    ) -> Result<Vec<ClassSizeRecord>>;
}
