//! Crawler module for catalog fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with failure classification
//! - The four-level catalog walk
//! - Whole-crawl restarts on transient failures

mod controller;
mod fetcher;
mod walker;

pub use controller::{CrawlReport, RunController};
pub use fetcher::{build_http_client, decode_payload, FetchOutcome, Fetcher};
pub use walker::CatalogWalker;

use crate::config::Config;
use crate::CatalogError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client and open the response cache
/// 2. Walk the catalog, restarting on transient failures
/// 3. Return the records of the first clean traversal
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed cleanly
/// * `Err(CatalogError)` - Crawl failed
pub async fn crawl(config: &Config) -> Result<CrawlReport, CatalogError> {
    RunController::new(config)?.run().await
}
