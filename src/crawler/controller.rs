//! Run controller - whole-crawl restart orchestration
//!
//! A traversal attempt is only trusted if no transient fetch failure happened
//! anywhere in it. Otherwise its state is dropped and the catalog is walked
//! again from the schools index; the response cache makes the repeat walk
//! cheap. Attempts are bounded by `run.max-attempts`.

use crate::catalog::Endpoints;
use crate::config::Config;
use crate::crawler::walker::CatalogWalker;
use crate::crawler::Fetcher;
use crate::output::SectionRecord;
use crate::state::CrawlState;
use crate::storage::{CacheStats, ResponseCache};
use crate::CatalogError;
use chrono::{DateTime, Utc};

/// Outcome of a clean crawl
#[derive(Debug)]
pub struct CrawlReport {
    /// Records of the clean attempt, in accumulation order
    pub records: Vec<SectionRecord>,

    /// Number of attempts made, including the clean one
    pub attempts: u32,

    /// Cache counters over all attempts
    pub cache_stats: CacheStats,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

/// Owns the response cache and repeats traversals until one is clean
pub struct RunController {
    cache: ResponseCache,
    endpoints: Endpoints,
    max_attempts: u32,
}

impl RunController {
    /// Creates a controller from the configuration
    ///
    /// Builds the HTTP client and opens (creating if needed) the cache
    /// directory.
    ///
    /// # Returns
    ///
    /// * `Ok(RunController)` - Ready to run
    /// * `Err(CatalogError)` - Client construction or cache directory failure
    pub fn new(config: &Config) -> Result<Self, CatalogError> {
        let fetcher = Fetcher::new(&config.fetch)?;
        let cache = ResponseCache::open(&config.output.cache_dir, fetcher)?;
        Ok(Self::with_parts(
            cache,
            Endpoints::from_config(&config.catalog),
            config.run.max_attempts,
        ))
    }

    pub fn with_parts(cache: ResponseCache, endpoints: Endpoints, max_attempts: u32) -> Self {
        Self {
            cache,
            endpoints,
            max_attempts,
        }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Runs traversal attempts until one completes without transient failures
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - Records of the first clean attempt
    /// * `Err(CatalogError::RestartsExhausted)` - No clean attempt within the limit
    /// * `Err(CatalogError)` - Schema violation or cache I/O failure
    pub async fn run(&mut self) -> Result<CrawlReport, CatalogError> {
        let started_at = Utc::now();

        for attempt in 1..=self.max_attempts {
            tracing::info!(attempt, "Starting traversal");

            let mut state = CrawlState::new(attempt);
            CatalogWalker::new(&mut self.cache, &self.endpoints)
                .walk(&mut state)
                .await?;

            if state.needs_restart() {
                tracing::warn!(
                    attempt,
                    discarded = state.records().len(),
                    reason = %state.run_state(),
                    "Restarting crawl"
                );
                continue;
            }

            tracing::info!(
                attempt,
                sections = state.records().len(),
                "Traversal completed cleanly"
            );

            return Ok(CrawlReport {
                records: state.into_records(),
                attempts: attempt,
                cache_stats: self.cache.stats(),
                started_at,
                finished_at: Utc::now(),
            });
        }

        Err(CatalogError::RestartsExhausted {
            attempts: self.max_attempts,
        })
    }
}
