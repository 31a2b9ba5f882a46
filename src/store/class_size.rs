//! Class size slice

use std::sync::Arc;

use super::keyed::{SliceError, Store, StoreConfig};
use crate::client::models::ClassSizeRecord;
use crate::client::{PopulationApi, ScopeParams};
use crate::error::Result;

pub struct ClassSizeSlice<C> {
    client: Arc<C>,
    error: Arc<SliceError>,
    pub records: Store<ScopeParams, Vec<ClassSizeRecord>>,
}

impl<C: PopulationApi + 'static> ClassSizeSlice<C> {
    pub fn new(client: Arc<C>, config: &StoreConfig) -> Self {
        let error = Arc::new(SliceError::default());
        Self {
            client,
            records: Store::new("class sizes", error.clone(), config.clone()),
            error,
        }
    }

    pub async fn fetch_class_sizes(
        &self,
        params: ScopeParams,
        force_refresh: bool,
    ) -> Result<Arc<Vec<ClassSizeRecord>>> {
        let client = Arc::clone(&self.client);
        self.records
            .fetch(params, force_refresh, move |p| async move {
                client.list_class_sizes(&p, force_refresh).await
            })
            .await
    }

    pub fn last_error(&self) -> Option<String> {
        self.error.get()
    }
}
