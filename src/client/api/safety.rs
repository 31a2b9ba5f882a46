//! Safety API trait

use async_trait::async_trait;

use crate::client::models::{SafetyParams, SafetyRecord};
use crate::error::Result;

#[async_trait]
pub trait SafetyApi: Send + Sync {
    /// `GET safety/{level}/{category}`
    async fn list_safety(
        &self,
        params: &SafetyParams,
        force_refresh: bool,
    ) -> Result<Vec<SafetyRecord>>;
}
