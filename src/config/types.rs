use serde::Deserialize;

/// Main configuration structure for Catalog-Crawl
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub fetch: FetchConfig,
    pub run: RunConfig,
    pub output: OutputConfig,
}

/// Upstream catalog location
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Scheme and host of the catalog API, without a trailing slash
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Academic term identifier embedded in the index URLs
    pub term: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.northwestern.edu".to_string(),
            term: "4780".to_string(),
        }
    }
}

/// HTTP fetch behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout (milliseconds)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 1000,
            user_agent: format!("catalog-crawl/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Run controller limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Maximum number of full traversal attempts before giving up
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { max_attempts: 25 }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory holding one cached payload per fetched URL
    #[serde(rename = "cache-dir")]
    pub cache_dir: String,

    /// Path to the CSV export
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            cache_dir: "./cache".to_string(),
            csv_path: "./results.csv".to_string(),
        }
    }
}
