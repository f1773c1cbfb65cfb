//! State module for tracking crawl progress
//!
//! This module holds the per-attempt state of a crawl.
//!
//! # Components
//!
//! - `RunState`: whether the current attempt is still trusted or must be redone
//! - `CrawlState`: accumulated records and visited section paths of one attempt
//! - `Level`: the four levels of the catalog hierarchy

mod crawl_state;
mod run_state;

// Re-export main types
pub use crawl_state::{CrawlState, Level};
pub use run_state::{RunState, TransientKind};
