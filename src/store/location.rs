//! Location slice: districts, schools, towns and SAUs

use std::sync::Arc;

use super::keyed::{SliceError, Store, StoreConfig};
use crate::client::models::{District, Sau, School, Town};
use crate::client::{LocationApi, LocationParams};
use crate::error::Result;

pub struct LocationSlice<C> {
    client: Arc<C>,
    error: Arc<SliceError>,
    pub districts: Store<LocationParams, Vec<District>>,
    pub schools: Store<LocationParams, Vec<School>>,
    pub towns: Store<LocationParams, Vec<Town>>,
    pub saus: Store<LocationParams, Vec<Sau>>,
}

impl<C: LocationApi + 'static> LocationSlice<C> {
    pub fn new(client: Arc<C>, config: &StoreConfig) -> Self {
        let error = Arc::new(SliceError::default());
        Self {
            client,
            districts: Store::new("districts", error.clone(), config.clone()),
            schools: Store::new("schools", error.clone(), config.clone()),
            towns: Store::new("towns", error.clone(), config.clone()),
            saus: Store::new("SAUs", error.clone(), config.clone()),
            error,
        }
    }

    pub async fn fetch_districts(
        &self,
        params: LocationParams,
        force_refresh: bool,
    ) -> Result<Arc<Vec<District>>> {
        let client = Arc::clone(&self.client);
        self.districts
            .fetch(params, force_refresh, move |p| async move {
                client.list_districts(&p, force_refresh).await
            })
            .await
    }

    pub async fn fetch_schools(
        &self,
        params: LocationParams,
        force_refresh: bool,
    ) -> Result<Arc<Vec<School>>> {
        let client = Arc::clone(&self.client);
        self.schools
            .fetch(params, force_refresh, move |p| async move {
                client.list_schools(&p, force_refresh).await
            })
            .await
    }

    pub async fn fetch_towns(
        &self,
        params: LocationParams,
        force_refresh: bool,
    ) -> Result<Arc<Vec<Town>>> {
        let client = Arc::clone(&self.client);
        self.towns
            .fetch(params, force_refresh, move |p| async move {
                client.list_towns(&p, force_refresh).await
            })
            .await
    }

    pub async fn fetch_saus(
        &self,
        params: LocationParams,
        force_refresh: bool,
    ) -> Result<Arc<Vec<Sau>>> {
        let client = Arc::clone(&self.client);
        self.saus
            .fetch(params, force_refresh, move |p| async move {
                client.list_saus(&p, force_refresh).await
            })
            .await
    }

    pub fn last_error(&self) -> Option<String> {
        self.error.get()
    }
}
