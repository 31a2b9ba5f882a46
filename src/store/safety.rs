//! Safety slice

use std::sync::Arc;

use super::keyed::{SliceError, Store, StoreConfig};
use crate::client::SafetyApi;
use crate::client::models::{SafetyParams, SafetyRecord};
use crate::error::Result;

pub struct SafetySlice<C> {
    client: Arc<C>,
    error: Arc<SliceError>,
    pub records: Store<SafetyParams, Vec<SafetyRecord>>,
}

impl<C: SafetyApi + 'static> SafetySlice<C> {
    pub fn new(client: Arc<C>, config: &StoreConfig) -> Self {
        let error = Arc::new(SliceError::default());
        Self {
            client,
            records: Store::new("safety data", error.clone(), config.clone()),
            error,
        }
    }

    pub async fn fetch_safety(
        &self,
        params: SafetyParams,
        force_refresh: bool,
    ) -> Result<Arc<Vec<SafetyRecord>>> {
        let client = Arc::clone(&self.client);
        self.records
            .fetch(params, force_refresh, move |p| async move {
                client.list_safety(&p, force_refresh).await
            })
            .await
    }

    pub fn last_error(&self) -> Option<String> {
        self.error.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::safety;
    use crate::client::models::SafetyCategory;
    use crate::client::{MockEducationClient, ScopeParams};

    #[tokio::test]
    async fn test_categories_cached_separately() {
        let mock = Arc::new(
            MockEducationClient::new()
                .with_safety(SafetyCategory::Bullying, vec![safety(Some(5), 2024, "Cyberbullying", 3)])
                .with_safety(SafetyCategory::Truancy, vec![safety(Some(5), 2024, "Habitual truancy", 9)]),
        );
        let slice = SafetySlice::new(mock.clone(), &StoreConfig::default());
        let bullying = SafetyParams::new(SafetyCategory::Bullying, ScopeParams::district(5));
        let truancy = SafetyParams::new(SafetyCategory::Truancy, ScopeParams::district(5));

        let b = slice.fetch_safety(bullying, false).await.unwrap();
        let t = slice.fetch_safety(truancy, false).await.unwrap();
        let _ = slice.fetch_safety(bullying, false).await.unwrap();

        assert_eq!(b[0].count, 3);
        assert_eq!(t[0].count, 9);
        assert_eq!(mock.call_counts().await.list_safety, 2);
        assert!(slice.records.select(&truancy).is_some());
    }
}
