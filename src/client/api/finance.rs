//! Finance API trait

use async_trait::async_trait;

use crate::client::models::{EfaEntry, FinanceEntry};
use crate::client::params::{EfaParams, ScopeParams};
use crate::error::Result;

#[async_trait]
pub trait FinanceApi: Send + Sync {
    /// `GET finance/{level}`
    async fn list_finance(
        &self,
        params: &ScopeParams,
        force_refresh: bool,
    ) -> Result<Vec<FinanceEntry>>;

    /// `GET education-freedom-account/`
    async fn list_efa(&self, params: &EfaParams, force_refresh: bool) -> Result<Vec<EfaEntry>>;
}
