//! Staff slice

use std::sync::Arc;

use super::keyed::{SliceError, Store, StoreConfig};
use crate::client::models::StaffRecord;
use crate::client::{PopulationApi, ScopeParams};
use crate::error::Result;

pub struct StaffSlice<C> {
    client: Arc<C>,
    error: Arc<SliceError>,
    pub records: Store<ScopeParams, Vec<StaffRecord>>,
}

impl<C: PopulationApi + 'static> StaffSlice<C> {
    pub fn new(client: Arc<C>, config: &StoreConfig) -> Self {
        let error = Arc::new(SliceError::default());
        Self {
            client,
            records: Store::new("staff data", error.clone(), config.clone()),
            error,
        }
    }

    pub async fn fetch_staff(
        &self,
        params: ScopeParams,
        force_refresh: bool,
    ) -> Result<Arc<Vec<StaffRecord>>> {
        let client = Arc::clone(&self.client);
        self.records
            .fetch(params, force_refresh, move |p| async move {
                client.list_staff(&p, force_refresh).await
            })
            .await
    }

    pub fn last_error(&self) -> Option<String> {
        self.error.get()
    }
}
