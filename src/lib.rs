//! Catalog-Crawl: a course-catalog harvester
//!
//! This crate walks a public course-catalog API (school → subject → class →
//! section), caches every decoded response on disk, normalizes each section
//! into a flat record and exports the records as CSV.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod normalize;
pub mod output;
pub mod state;
pub mod storage;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Catalog-Crawl operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Cache I/O error at {}: {source}", path.display())]
    CacheIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Output I/O error at {}: {source}", path.display())]
    OutputIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Upstream schema violation in {level}: {detail}")]
    Schema { level: state::Level, detail: String },

    #[error("Crawl did not complete cleanly after {attempts} attempts")]
    RestartsExhausted { attempts: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Process exit code for this error
    ///
    /// | Code | Meaning |
    /// |------|---------|
    /// | 1 | Configuration or other error |
    /// | 2 | Fatal I/O on the cache or output paths |
    /// | 3 | Upstream schema violation |
    /// | 4 | Restart attempts exhausted |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::CacheIo { .. } | Self::OutputIo { .. } | Self::Io(_) => 2,
            Self::Schema { .. } => 3,
            Self::RestartsExhausted { .. } => 4,
            Self::Config(_) | Self::Http(_) => 1,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Catalog-Crawl operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::Endpoints;
pub use config::Config;
pub use crawler::{crawl, CrawlReport, RunController};
pub use output::{export_csv, SectionRecord};
pub use state::{CrawlState, RunState};
