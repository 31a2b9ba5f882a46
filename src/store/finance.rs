//! Finance slice

use std::sync::Arc;

use super::keyed::{SliceError, Store, StoreConfig};
use crate::client::models::FinanceEntry;
use crate::client::{FinanceApi, ScopeParams};
use crate::error::Result;

pub struct FinanceSlice<C> {
    client: Arc<C>,
    error: Arc<SliceError>,
    pub entries: Store<ScopeParams, Vec<FinanceEntry>>,
}

impl<C: FinanceApi + 'static> FinanceSlice<C> {
    pub fn new(client: Arc<C>, config: &StoreConfig) -> Self {
        let error = Arc::new(SliceError::default());
        Self {
            client,
            entries: Store::new("finance data", error.clone(), config.clone()),
            error,
        }
    }

    pub async fn fetch_finance(
        &self,
        params: ScopeParams,
        force_refresh: bool,
    ) -> Result<Arc<Vec<FinanceEntry>>> {
        let client = Arc::clone(&self.client);
        self.entries
            .fetch(params, force_refresh, move |p| async move {
                client.list_finance(&p, force_refresh).await
            })
            .await
    }

    pub fn last_error(&self) -> Option<String> {
        self.error.get()
    }
}
