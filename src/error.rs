//! Error types for the nhschools CLI

use std::time::Duration;
use thiserror::Error;

/// Result type alias for nhschools operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Data(#[from] DataError),

    /// A store fetch failed; the message is what the store recorded for the entry
    #[error("Failed to load {resource}: {message}")]
    Fetch {
        resource: &'static str,
        message: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid API base URL '{0}'. Set NHSCHOOLS_API_BASE_URL or pass --api-url.")]
    InvalidBaseUrl(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Local response cache errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Could not determine cache directory")]
    NoHome,

    #[error("Cache I/O error: {0}")]
    Io(String),

    #[error("Cache database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Errors raised by the data-processing layer
#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("Amount must be a finite number, got {0}")]
    NonFiniteAmount(f64),

    #[error("Year {year} is outside the supported range {min}-{max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_not_found() {
        let err = ApiError::NotFound("assessments/district".to_string());
        assert!(err.to_string().contains("assessments/district"));
    }

    #[test]
    fn test_api_error_rate_limit() {
        let err = ApiError::RateLimit(Duration::from_secs(30));
        let msg = err.to_string();
        assert!(msg.contains("Rate limit"));
        assert!(msg.contains("30"));
    }

    #[test]
    fn test_api_error_server_error() {
        let err = ApiError::ServerError("Internal error".to_string());
        assert!(err.to_string().contains("Internal error"));
    }

    #[test]
    fn test_api_error_invalid_response() {
        let err = ApiError::InvalidResponse("missing field `year`".to_string());
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_config_error_invalid_base_url() {
        let err = ConfigError::InvalidBaseUrl("not a url".to_string());
        let msg = err.to_string();
        assert!(msg.contains("not a url"));
        assert!(msg.contains("NHSCHOOLS_API_BASE_URL"));
    }

    #[test]
    fn test_data_error_year_out_of_range() {
        let err = DataError::YearOutOfRange {
            year: 1999,
            min: 2000,
            max: 2025,
        };
        assert!(err.to_string().contains("1999"));
        assert!(err.to_string().contains("2000-2025"));
    }

    #[test]
    fn test_fetch_error_names_resource() {
        let err = Error::Fetch {
            resource: "enrollment",
            message: "Server error: boom".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to load enrollment: Server error: boom"
        );
    }

    #[test]
    fn test_error_from_api_error() {
        let err: Error = ApiError::BadRequest("bad year".to_string()).into();

        match err {
            Error::Api(ApiError::BadRequest(msg)) => assert_eq!(msg, "bad year"),
            _ => panic!("Expected Error::Api(ApiError::BadRequest)"),
        }
    }

    #[test]
    fn test_error_from_data_error() {
        let err: Error = DataError::NonFiniteAmount(f64::NAN).into();
        assert!(matches!(err, Error::Data(DataError::NonFiniteAmount(_))));
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}
