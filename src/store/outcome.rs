//! Outcome slice: graduation and post-graduation plans

use std::sync::Arc;

use super::keyed::{SliceError, Store, StoreConfig};
use crate::client::models::{GraduationRecord, PostGraduationRecord};
use crate::client::{AcademicApi, ScopeParams};
use crate::error::Result;

pub struct OutcomeSlice<C> {
    client: Arc<C>,
    error: Arc<SliceError>,
    pub graduation: Store<ScopeParams, Vec<GraduationRecord>>,
    pub post_graduation: Store<ScopeParams, Vec<PostGraduationRecord>>,
}

impl<C: AcademicApi + 'static> OutcomeSlice<C> {
    pub fn new(client: Arc<C>, config: &StoreConfig) -> Self {
        let error = Arc::new(SliceError::default());
        Self {
            client,
            graduation: Store::new("graduation data", error.clone(), config.clone()),
            post_graduation: Store::new("post-graduation data", error.clone(), config.clone()),
            error,
        }
    }

    pub async fn fetch_graduation(
        &self,
        params: ScopeParams,
        force_refresh: bool,
    ) -> Result<Arc<Vec<GraduationRecord>>> {
        let client = Arc::clone(&self.client);
        self.graduation
            .fetch(params, force_refresh, move |p| async move {
                client.list_graduation(&p, force_refresh).await
            })
            .await
    }

    pub async fn fetch_post_graduation(
        &self,
        params: ScopeParams,
        force_refresh: bool,
    ) -> Result<Arc<Vec<PostGraduationRecord>>> {
        let client = Arc::clone(&self.client);
        self.post_graduation
            .fetch(params, force_refresh, move |p| async move {
                client.list_post_graduation(&p, force_refresh).await
            })
            .await
    }

    pub fn last_error(&self) -> Option<String> {
        self.error.get()
    }
}
