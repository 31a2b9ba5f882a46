//! Education Freedom Account slice

use std::sync::Arc;

use super::keyed::{SliceError, Store, StoreConfig};
use crate::client::models::EfaEntry;
use crate::client::{EfaParams, FinanceApi};
use crate::error::Result;

pub struct EfaSlice<C> {
    client: Arc<C>,
    error: Arc<SliceError>,
    pub entries: Store<EfaParams, Vec<EfaEntry>>,
}

impl<C: FinanceApi + 'static> EfaSlice<C> {
    pub fn new(client: Arc<C>, config: &StoreConfig) -> Self {
        let error = Arc::new(SliceError::default());
        Self {
            client,
            entries: Store::new("EFA data", error.clone(), config.clone()),
            error,
        }
    }

    pub async fn fetch_efa(
        &self,
        params: EfaParams,
        force_refresh: bool,
    ) -> Result<Arc<Vec<EfaEntry>>> {
        let client = Arc::clone(&self.client);
        self.entries
            .fetch(params, force_refresh, move |p| async move {
                client.list_efa(&p, force_refresh).await
            })
            .await
    }

    /// Entries for every town, fetched concurrently and concatenated
    pub async fn fetch_efa_for_towns(
        &self,
        town_ids: &[u32],
        force_refresh: bool,
    ) -> Result<Vec<EfaEntry>> {
        let fetches = town_ids
            .iter()
            .map(|id| self.fetch_efa(EfaParams::town(*id), force_refresh));
        let per_town = futures::future::try_join_all(fetches).await?;
        Ok(per_town
            .iter()
            .flat_map(|entries| entries.iter().cloned())
            .collect())
    }

    pub fn last_error(&self) -> Option<String> {
        self.error.get()
    }
}
