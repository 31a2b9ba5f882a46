//! Cached wrapper for the school statistics API client
//!
//! Provides transparent disk caching for every API response using SQLite
//! storage. A `force_refresh` call skips the read but still stores the fresh
//! response, so the next plain call sees it.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::cache::{CacheStorage, CacheTtl, cache_key};
use crate::client::api::{AcademicApi, FinanceApi, LocationApi, PopulationApi, SafetyApi};
use crate::client::endpoints;
use crate::client::models::{
    AssessmentRow, AssessmentSubgroup, AssessmentSubject, ClassSizeRecord, District, EfaEntry,
    EnrollmentRecord, FinanceEntry, GraduationRecord, MeasurementRow, MeasurementType,
    PostGraduationRecord, SafetyParams, SafetyRecord, Sau, School, StaffRecord, Town,
};
use crate::client::params::{
    AssessmentParams, EfaParams, EnrollmentParams, LocationParams, MeasurementParams, QueryParams,
    ScopeParams,
};
use crate::error::Result;

/// Cached wrapper for any [`EducationApi`](crate::client::EducationApi)
/// implementation.
///
/// Cache can be disabled via the `enabled` flag (for `--no-cache`). The
/// storage is wrapped in a Mutex for thread-safety.
pub struct CachedEducationClient<C> {
    inner: Arc<C>,
    cache: Option<Mutex<CacheStorage>>,
}

impl<C> CachedEducationClient<C> {
    /// Create a new cached client wrapper.
    ///
    /// # Arguments
    /// * `inner` - The underlying API client to wrap
    /// * `enabled` - Whether caching is enabled (false for --no-cache)
    pub fn new(inner: C, enabled: bool) -> Self {
        let cache = if enabled {
            match CacheStorage::open() {
                Ok(storage) => Some(Mutex::new(storage)),
                Err(e) => {
                    log::warn!("Response cache unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };
        Self {
            inner: Arc::new(inner),
            cache,
        }
    }

    /// Wrap `inner` with storage opened elsewhere
    #[cfg(test)]
    pub fn with_storage(inner: C, storage: CacheStorage) -> Self {
        Self {
            inner: Arc::new(inner),
            cache: Some(Mutex::new(storage)),
        }
    }

    /// The wrapped client
    #[cfg(test)]
    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn get_cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cache = self.cache.as_ref()?;
        let guard = cache.lock().ok()?;
        guard
            .get(key)
            .ok()
            .flatten()
            .and_then(|data| serde_json::from_slice(&data).ok())
    }

    fn set_cached<T: Serialize>(
        &self,
        key: &str,
        data: &T,
        endpoint: &str,
        options_key: &str,
        ttl: Duration,
    ) {
        if let Some(ref cache) = self.cache
            && let Ok(guard) = cache.lock()
            && let Ok(json) = serde_json::to_vec(data)
            && let Err(e) = guard.put(key, &json, endpoint, options_key, ttl)
        {
            log::debug!("Failed to cache {}: {}", endpoint, e);
        }
    }

    /// Serve `endpoint` from cache or fetch and store it.
    async fn cached<T, F, Fut>(
        &self,
        endpoint: &str,
        params: &(dyn QueryParams + Sync),
        ttl: Duration,
        force_refresh: bool,
        fetch: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
    {
        let options_key = params.options_key();
        let key = cache_key(endpoint, &options_key);

        if !force_refresh && let Some(cached) = self.get_cached(&key) {
            log::debug!("Cache hit: {} [{}]", endpoint, options_key);
            return Ok(cached);
        }

        let result = fetch().await?;
        self.set_cached(&key, &result, endpoint, &options_key, ttl);
        Ok(result)
    }
}

/// Parameters of endpoints that take none
struct NoParams;

impl QueryParams for NoParams {
    fn query_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        Vec::new()
    }
}

#[async_trait]
impl<C: LocationApi + 'static> LocationApi for CachedEducationClient<C> {
    async fn list_districts(
        &self,
        params: &LocationParams,
        force_refresh: bool,
    ) -> Result<Vec<District>> {
        self.cached(endpoints::DISTRICTS, params, CacheTtl::LOCATION, force_refresh, || {
            self.inner.list_districts(params, force_refresh)
        })
        .await
    }

    async fn list_schools(
        &self,
        params: &LocationParams,
        force_refresh: bool,
    ) -> Result<Vec<School>> {
        self.cached(endpoints::SCHOOLS, params, CacheTtl::LOCATION, force_refresh, || {
            self.inner.list_schools(params, force_refresh)
        })
        .await
    }

    async fn list_towns(&self, params: &LocationParams, force_refresh: bool) -> Result<Vec<Town>> {
        self.cached(endpoints::TOWNS, params, CacheTtl::LOCATION, force_refresh, || {
            self.inner.list_towns(params, force_refresh)
        })
        .await
    }

    async fn list_saus(&self, params: &LocationParams, force_refresh: bool) -> Result<Vec<Sau>> {
        self.cached(endpoints::SAUS, params, CacheTtl::LOCATION, force_refresh, || {
            self.inner.list_saus(params, force_refresh)
        })
        .await
    }
}

#[async_trait]
impl<C: AcademicApi + 'static> AcademicApi for CachedEducationClient<C> {
    async fn list_measurement_types(&self, force_refresh: bool) -> Result<Vec<MeasurementType>> {
        self.cached(
            endpoints::MEASUREMENT_TYPES,
            &NoParams,
            CacheTtl::REFERENCE,
            force_refresh,
            || self.inner.list_measurement_types(force_refresh),
        )
        .await
    }

    async fn list_measurements(
        &self,
        params: &MeasurementParams,
        force_refresh: bool,
    ) -> Result<Vec<MeasurementRow>> {
        self.cached(
            endpoints::MEASUREMENTS,
            params,
            CacheTtl::STATISTICS,
            force_refresh,
            || self.inner.list_measurements(params, force_refresh),
        )
        .await
    }

    async fn list_assessment_subjects(
        &self,
        force_refresh: bool,
    ) -> Result<Vec<AssessmentSubject>> {
        self.cached(
            endpoints::ASSESSMENT_SUBJECTS,
            &NoParams,
            CacheTtl::REFERENCE,
            force_refresh,
            || self.inner.list_assessment_subjects(force_refresh),
        )
        .await
    }

    async fn list_assessment_subgroups(
        &self,
        force_refresh: bool,
    ) -> Result<Vec<AssessmentSubgroup>> {
        self.cached(
            endpoints::ASSESSMENT_SUBGROUPS,
            &NoParams,
            CacheTtl::REFERENCE,
            force_refresh,
            || self.inner.list_assessment_subgroups(force_refresh),
        )
        .await
    }

    async fn list_assessments(
        &self,
        params: &AssessmentParams,
        force_refresh: bool,
    ) -> Result<Vec<AssessmentRow>> {
        let endpoint = endpoints::assessments(params.scope.level);
        self.cached(&endpoint, params, CacheTtl::STATISTICS, force_refresh, || {
            self.inner.list_assessments(params, force_refresh)
        })
        .await
    }

    async fn list_graduation(
        &self,
        params: &ScopeParams,
        force_refresh: bool,
    ) -> Result<Vec<GraduationRecord>> {
        let endpoint = endpoints::graduation(params.level);
        self.cached(&endpoint, params, CacheTtl::STATISTICS, force_refresh, || {
            self.inner.list_graduation(params, force_refresh)
        })
        .await
    }

    async fn list_post_graduation(
        &self,
        params: &ScopeParams,
        force_refresh: bool,
    ) -> Result<Vec<PostGraduationRecord>> {
        let endpoint = endpoints::post_graduation(params.level);
        self.cached(&endpoint, params, CacheTtl::STATISTICS, force_refresh, || {
            self.inner.list_post_graduation(params, force_refresh)
        })
        .await
    }
}

#[async_trait]
impl<C: SafetyApi + 'static> SafetyApi for CachedEducationClient<C> {
    async fn list_safety(
        &self,
        params: &SafetyParams,
        force_refresh: bool,
    ) -> Result<Vec<SafetyRecord>> {
        let endpoint = endpoints::safety(params.category, params.scope.level);
        self.cached(&endpoint, params, CacheTtl::STATISTICS, force_refresh, || {
            self.inner.list_safety(params, force_refresh)
        })
        .await
    }
}

#[async_trait]
impl<C: FinanceApi + 'static> FinanceApi for CachedEducationClient<C> {
    async fn list_finance(
        &self,
        params: &ScopeParams,
        force_refresh: bool,
    ) -> Result<Vec<FinanceEntry>> {
        let endpoint = endpoints::finance(params.level);
        self.cached(&endpoint, params, CacheTtl::STATISTICS, force_refresh, || {
            self.inner.list_finance(params, force_refresh)
        })
        .await
    }

    async fn list_efa(&self, params: &EfaParams, force_refresh: bool) -> Result<Vec<EfaEntry>> {
        self.cached(endpoints::EFA, params, CacheTtl::STATISTICS, force_refresh, || {
            self.inner.list_efa(params, force_refresh)
        })
        .await
    }
}

#[async_trait]
impl<C: PopulationApi + 'static> PopulationApi for CachedEducationClient<C> {
    async fn list_enrollment(
        &self,
        params: &EnrollmentParams,
        force_refresh: bool,
    ) -> Result<Vec<EnrollmentRecord>> {
        let endpoint = endpoints::enrollment(params.scope.level);
        self.cached(&endpoint, params, CacheTtl::STATISTICS, force_refresh, || {
            self.inner.list_enrollment(params, force_refresh)
        })
        .await
    }

    async fn list_staff(
        &self,
        params: &ScopeParams,
        force_refresh: bool,
    ) -> Result<Vec<StaffRecord>> {
        let endpoint = endpoints::staff(params.level);
        self.cached(&endpoint, params, CacheTtl::STATISTICS, force_refresh, || {
            self.inner.list_staff(params, force_refresh)
        })
        .await
    }

    async fn list_class_sizes(
        &self,
        params: &ScopeParams,
        force_refresh: bool,
    ) -> Result<Vec<ClassSizeRecord>> {
        let endpoint = endpoints::class_size(params.level);
        self.cached(&endpoint, params, CacheTtl::STATISTICS, force_refresh, || {
            self.inner.list_class_sizes(params, force_refresh)
        })
        .await
    }
}
