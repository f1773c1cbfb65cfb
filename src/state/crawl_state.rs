//! Per-attempt crawl state
//!
//! A restart replaces the whole `CrawlState`; nothing from an abandoned attempt
//! survives except what the response cache persisted.

use crate::output::SectionRecord;
use crate::state::{RunState, TransientKind};
use std::collections::HashSet;
use std::fmt;

/// Level of the catalog hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    School,
    Subject,
    Class,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::School => "school",
            Self::Subject => "subject",
            Self::Class => "class",
        };
        f.write_str(name)
    }
}

/// Accumulated results of one traversal attempt
#[derive(Debug, Default)]
pub struct CrawlState {
    attempt: u32,
    records: Vec<SectionRecord>,
    visited: HashSet<String>,
    run_state: RunState,
}

impl CrawlState {
    /// Creates an empty state for the given attempt number (1-based)
    pub fn new(attempt: u32) -> Self {
        Self {
            attempt,
            ..Self::default()
        }
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Returns true if the section path was already processed in this attempt
    pub fn is_visited(&self, path: &str) -> bool {
        self.visited.contains(path)
    }

    /// Marks a section path as processed
    pub fn mark_visited(&mut self, path: &str) {
        self.visited.insert(path.to_string());
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn push_record(&mut self, record: SectionRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[SectionRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<SectionRecord> {
        self.records
    }

    pub fn run_state(&self) -> &RunState {
        &self.run_state
    }

    /// Flags the attempt for restart after a transient fetch failure
    pub fn request_restart(&mut self, url: &str, kind: TransientKind) {
        self.run_state.request_restart(url, kind);
    }

    pub fn needs_restart(&self) -> bool {
        self.run_state.is_restart_requested()
    }
}
