//! Cache key generation
//!
//! Two keys exist: the human-readable options key (`district_id=5&year=2024`)
//! used by the in-memory store and shown in debug logs, and the SHA-256 disk
//! key derived from endpoint plus options key.

use sha2::{Digest, Sha256};

/// Options key used when no parameter is set
pub const DEFAULT_OPTIONS_KEY: &str = "_default";

/// Canonical key for a set of request options.
///
/// Unset options are dropped and the rest sorted by name, so two option sets
/// differing only in field order or in absent fields produce the same key.
pub fn options_key<K: AsRef<str>>(pairs: &[(K, Option<String>)]) -> String {
    let mut set: Vec<(&str, &str)> = pairs
        .iter()
        .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_ref(), v)))
        .collect();

    if set.is_empty() {
        return DEFAULT_OPTIONS_KEY.to_string();
    }

    set.sort_by(|a, b| a.0.cmp(b.0));
    set.iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Deterministic disk cache key for an endpoint and its options key.
pub fn cache_key(endpoint: &str, options_key: &str) -> String {
    let mut hasher = Sha256::new();

    hasher.update(endpoint.as_bytes());
    hasher.update(b"|");
    hasher.update(options_key.as_bytes());

    format!("{:x}", hasher.finalize())
}
