//! Location API trait

use async_trait::async_trait;

use crate::client::models::{District, Sau, School, Town};
use crate::client::params::LocationParams;
use crate::error::Result;

#[async_trait]
pub trait LocationApi: Send + Sync {
    /// `GET location/districts`
    async fn list_districts(
        &self,
        params: &LocationParams,
        force_refresh: bool,
    ) -> Result<Vec<District>>;

    /// `GET location/schools`
    async fn list_schools(&self, params: &LocationParams, force_refresh: bool)
    -> Result<Vec<School>>;

    /// `GET location/towns`
    async fn list_towns(&self, params: &LocationParams, force_refresh: bool) -> Result<Vec<Town>>;

    /// `GET location/saus`
    async fn list_saus(&self, params: &LocationParams, force_refresh: bool) -> Result<Vec<Sau>>;
}
