//! HTTP implementation of the school statistics API

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

use super::api::{AcademicApi, FinanceApi, LocationApi, PopulationApi, SafetyApi};
use super::endpoints;
use super::models::{
    AssessmentRow, AssessmentSubgroup, AssessmentSubject, ClassSizeRecord, District, EfaEntry,
    EnrollmentRecord, FinanceEntry, GraduationRecord, MeasurementRow, MeasurementType,
    PostGraduationRecord, SafetyParams, SafetyRecord, Sau, School, StaffRecord, Town,
};
use super::params::{
    AssessmentParams, EfaParams, EnrollmentParams, LocationParams, MeasurementParams, QueryParams,
    ScopeParams,
};
use crate::error::{ApiError, ConfigError, Result};

/// Outbound request cap; the API is a small public service
const RATE_LIMIT_PER_SECOND: u32 = 20;

/// Plain HTTP client for the school statistics API.
///
/// Builds `base_url/path?query` from typed parameters and performs GET
/// requests. Never caches; wrap it in
/// [`CachedEducationClient`](crate::cache::CachedEducationClient) for that.
pub struct SchoolDataClient {
    http: HttpClient,
    base_url: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl SchoolDataClient {
    /// Create a client for the given API base URL
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|_| ConfigError::InvalidBaseUrl(base_url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_string()).into());
        }

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota =
            Quota::per_second(NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN));

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// Full URL for an API path such as `enrollment/district`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Perform a GET request and decode the JSON body
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T> {
        self.rate_limiter.until_ready().await;

        let url = self.url(path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let data = response.json::<T>().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse {}: {}", path, e))
                })?;
                Ok(data)
            }
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(path.to_string()).into()),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }

    async fn get_with<T: DeserializeOwned, P: QueryParams + ?Sized>(
        &self,
        path: &str,
        params: &P,
    ) -> Result<T> {
        self.get(path, &params.to_query()).await
    }
}

#[async_trait]
impl LocationApi for SchoolDataClient {
    async fn list_districts(
        &self,
        params: &LocationParams,
        _force_refresh: bool,
    ) -> Result<Vec<District>> {
        self.get_with(endpoints::DISTRICTS, params).await
    }

    async fn list_schools(
        &self,
        params: &LocationParams,
        _force_refresh: bool,
    ) -> Result<Vec<School>> {
        self.get_with(endpoints::SCHOOLS, params).await
    }

    async fn list_towns(&self, params: &LocationParams, _force_refresh: bool) -> Result<Vec<Town>> {
        self.get_with(endpoints::TOWNS, params).await
    }

    async fn list_saus(&self, params: &LocationParams, _force_refresh: bool) -> Result<Vec<Sau>> {
        self.get_with(endpoints::SAUS, params).await
    }
}

#[async_trait]
impl AcademicApi for SchoolDataClient {
    async fn list_measurement_types(&self, _force_refresh: bool) -> Result<Vec<MeasurementType>> {
        self.get(endpoints::MEASUREMENT_TYPES, &[]).await
    }

    async fn list_measurements(
        &self,
        params: &MeasurementParams,
        _force_refresh: bool,
    ) -> Result<Vec<MeasurementRow>> {
        self.get_with(endpoints::MEASUREMENTS, params).await
    }

    async fn list_assessment_subjects(
        &self,
        _force_refresh: bool,
    ) -> Result<Vec<AssessmentSubject>> {
        self.get(endpoints::ASSESSMENT_SUBJECTS, &[]).await
    }

    async fn list_assessment_subgroups(
        &self,
        _force_refresh: bool,
    ) -> Result<Vec<AssessmentSubgroup>> {
        self.get(endpoints::ASSESSMENT_SUBGROUPS, &[]).await
    }

    async fn list_assessments(
        &self,
        params: &AssessmentParams,
        _force_refresh: bool,
    ) -> Result<Vec<AssessmentRow>> {
        self.get_with(&endpoints::assessments(params.scope.level), params)
            .await
    }

    async fn list_graduation(
        &self,
        params: &ScopeParams,
        _force_refresh: bool,
    ) -> Result<Vec<GraduationRecord>> {
        self.get_with(&endpoints::graduation(params.level), params)
            .await
    }

    async fn list_post_graduation(
        &self,
        params: &ScopeParams,
        _force_refresh: bool,
    ) -> Result<Vec<PostGraduationRecord>> {
        self.get_with(&endpoints::post_graduation(params.level), params)
            .await
    }
}

#[async_trait]
impl SafetyApi for SchoolDataClient {
    async fn list_safety(
        &self,
        params: &SafetyParams,
        _force_refresh: bool,
    ) -> Result<Vec<SafetyRecord>> {
        let path = endpoints::safety(params.category, params.scope.level);
        self.get_with(&path, params).await
    }
}

#[async_trait]
impl FinanceApi for SchoolDataClient {
    async fn list_finance(
        &self,
        params: &ScopeParams,
        _force_refresh: bool,
    ) -> Result<Vec<FinanceEntry>> {
        self.get_with(&endpoints::finance(params.level), params).await
    }

    async fn list_efa(&self, params: &EfaParams, _force_refresh: bool) -> Result<Vec<EfaEntry>> {
        self.get_with(endpoints::EFA, params).await
    }
}

#[async_trait]
impl PopulationApi for SchoolDataClient {
    async fn list_enrollment(
        &self,
        params: &EnrollmentParams,
        _force_refresh: bool,
    ) -> Result<Vec<EnrollmentRecord>> {
        self.get_with(&endpoints::enrollment(params.scope.level), params)
            .await
    }

    async fn list_staff(
        &self,
        params: &ScopeParams,
        _force_refresh: bool,
    ) -> Result<Vec<StaffRecord>> {
        self.get_with(&endpoints::staff(params.level), params).await
    }

    async fn list_class_sizes(
        &self,
        params: &ScopeParams,
        _force_refresh: bool,
    ) -> Result<Vec<ClassSizeRecord>> {
        self.get_with(&endpoints::class_size(params.level), params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::SafetyCategory;
    use crate::error::Error;
    use mockito::Matcher;

    #[test]
    fn test_client_creation() {
        let client = SchoolDataClient::new("http://localhost:8000/api/");
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_rejects_invalid_base_url() {
        let result = SchoolDataClient::new("not a url");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidBaseUrl(_)))
        ));

        let result = SchoolDataClient::new("ftp://example.com");
        assert!(result.is_err());
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = SchoolDataClient::new("http://localhost:8000/api/").unwrap();
        assert_eq!(
            client.url("enrollment/district"),
            "http://localhost:8000/api/enrollment/district"
        );
        assert_eq!(
            client.url("/measurements/"),
            "http://localhost:8000/api/measurements/"
        );
    }

    #[tokio::test]
    async fn test_list_districts_sends_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/location/districts")
            .match_query(Matcher::UrlEncoded("sau_id".into(), "16".into()))
            .with_status(200)
            .with_body(r#"[{"id": 5, "name": "Bedford", "sau_id": 16}]"#)
            .create_async()
            .await;

        let client = SchoolDataClient::new(&server.url()).unwrap();
        let by_sau = LocationParams {
            sau_id: Some(16),
            ..LocationParams::new()
        };
        let districts = client.list_districts(&by_sau, false).await.unwrap();

        mock.assert_async().await;
        assert_eq!(districts.len(), 1);
        assert_eq!(districts[0].name, "Bedford");
    }

    #[tokio::test]
    async fn test_safety_path_includes_level_and_category() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/safety/school/truancy")
            .match_query(Matcher::UrlEncoded("school_id".into(), "41".into()))
            .with_status(200)
            .with_body(
                r#"[{"year": 2023, "school_id": 41, "classification": "Habitual truancy", "count": 12}]"#,
            )
            .create_async()
            .await;

        let client = SchoolDataClient::new(&server.url()).unwrap();
        let params = SafetyParams::new(SafetyCategory::Truancy, ScopeParams::school(41));
        let records = client.list_safety(&params, false).await.unwrap();

        mock.assert_async().await;
        assert_eq!(records[0].count, 12);
    }

    #[tokio::test]
    async fn test_server_error_maps_to_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/measurements/types")
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let client = SchoolDataClient::new(&server.url()).unwrap();
        let result = client.list_measurement_types(false).await;

        match result {
            Err(Error::Api(ApiError::ServerError(msg))) => assert_eq!(msg, "maintenance"),
            other => panic!("Expected ServerError, got {:?}", other.map(|v| v.len())),
        }
    }

    #[tokio::test]
    async fn test_not_found_maps_to_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/staff/district")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let client = SchoolDataClient::new(&server.url()).unwrap();
        let result = client.list_staff(&ScopeParams::district(5), false).await;

        assert!(matches!(result, Err(Error::Api(ApiError::NotFound(_)))));
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/assessments/subjects")
            .with_status(200)
            .with_body(r#"{"not": "an array"}"#)
            .create_async()
            .await;

        let client = SchoolDataClient::new(&server.url()).unwrap();
        let result = client.list_assessment_subjects(false).await;

        assert!(matches!(
            result,
            Err(Error::Api(ApiError::InvalidResponse(_)))
        ));
    }
}
