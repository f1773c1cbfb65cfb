//! Storage module for persisting fetched catalog data
//!
//! This module handles the on-disk response cache:
//! - Content-addressed entries keyed by a digest of the request URL
//! - Serving cached payloads without network access
//! - Persisting only successful fetches, so failures are retried later

mod response_cache;

pub use response_cache::{cache_key, CacheStats, ResponseCache};
