//! URL builders for the catalog API
//!
//! Every endpoint returns a JSON array whose final element is a sentinel that
//! the fetcher discards.

use crate::config::CatalogConfig;

/// Builds the four URL shapes used by the catalog API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
    term: String,
}

impl Endpoints {
    /// Creates endpoint builders for a base URL (no trailing slash) and term
    pub fn new(base_url: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            term: term.into(),
        }
    }

    /// Creates endpoint builders from the catalog configuration
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.base_url.clone(), config.term.clone())
    }

    /// Index of all schools for the term
    pub fn schools(&self) -> String {
        format!("{}/class-descriptions/{}/index-v2.json", self.base_url, self.term)
    }

    /// Index of the subjects offered by one school
    pub fn subjects(&self, school_id: &str) -> String {
        format!(
            "{}/class-descriptions/{}/{}/index-v2.json",
            self.base_url, self.term, school_id
        )
    }

    /// Children of an upstream path (a subject's classes, a class's sections)
    pub fn path_info(&self, path: &str) -> String {
        format!("{}{}/index-v2.json", self.base_url, path)
    }

    /// Detail document for one section path
    pub fn section(&self, path: &str) -> String {
        format!("{}{}-v2.json", self.base_url, path)
    }
}
