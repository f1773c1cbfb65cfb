//! Configuration module for Catalog-Crawl
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every section and key has a default, so a crawl can run
//! without any file at all.
//!
//! # Example
//!
//! ```no_run
//! use catalog_crawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("catalog.toml")).unwrap();
//! println!("Crawling term {}", config.catalog.term);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CatalogConfig, Config, FetchConfig, OutputConfig, RunConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
