//! Local disk cache for API responses
//!
//! Provides SQLite-backed caching with file blob storage for large responses.
//! School statistics are published yearly, so entries live for hours to days.

pub mod client;
pub mod key;
pub mod storage;

use std::time::Duration;

/// Cache TTL per kind of API response
pub struct CacheTtl;

impl CacheTtl {
    /// Districts, schools, towns and SAUs
    pub const LOCATION: Duration = Duration::from_secs(7 * 24 * 60 * 60); // 7 days

    /// Measurement types, assessment subjects and subgroups
    pub const REFERENCE: Duration = Duration::from_secs(7 * 24 * 60 * 60); // 7 days

    /// Yearly statistics; corrections are published occasionally
    pub const STATISTICS: Duration = Duration::from_secs(24 * 60 * 60); // 24 hr
}

pub use client::CachedEducationClient;
pub use key::{cache_key, options_key};
pub use storage::CacheStorage;
