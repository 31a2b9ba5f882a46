//! Enrollment slice

use std::sync::Arc;

use super::keyed::{SliceError, Store, StoreConfig};
use crate::client::models::EnrollmentRecord;
use crate::client::{EnrollmentParams, PopulationApi};
use crate::error::Result;

pub struct EnrollmentSlice<C> {
    client: Arc<C>,
    error: Arc<SliceError>,
    pub records: Store<EnrollmentParams, Vec<EnrollmentRecord>>,
}

impl<C: PopulationApi + 'static> EnrollmentSlice<C> {
    pub fn new(client: Arc<C>, config: &StoreConfig) -> Self {
        let error = Arc::new(SliceError::default());
        Self {
            client,
            records: Store::new("enrollment", error.clone(), config.clone()),
            error,
        }
    }

    pub async fn fetch_enrollment(
        &self,
        params: EnrollmentParams,
        force_refresh: bool,
    ) -> Result<Arc<Vec<EnrollmentRecord>>> {
        let client = Arc::clone(&self.client);
        self.records
            .fetch(params, force_refresh, move |p| async move {
                client.list_enrollment(&p, force_refresh).await
            })
            .await
    }

    pub fn last_error(&self) -> Option<String> {
        self.error.get()
    }
}
