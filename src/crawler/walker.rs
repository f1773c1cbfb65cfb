//! Four-level catalog traversal
//!
//! Walks schools → subjects → classes → sections depth-first. Schools,
//! subjects and classes are visited in name order; sections keep upstream
//! order. Nodes missing their identifying key are skipped silently.

use crate::catalog::{sort_by_name, CatalogNode, Endpoints, SectionInfo};
use crate::crawler::FetchOutcome;
use crate::output::{RecordContext, SectionRecord};
use crate::state::{CrawlState, Level};
use crate::storage::ResponseCache;
use crate::CatalogError;
use serde_json::Value;

/// Drives one traversal attempt over the catalog
pub struct CatalogWalker<'a> {
    cache: &'a mut ResponseCache,
    endpoints: &'a Endpoints,
}

impl<'a> CatalogWalker<'a> {
    pub fn new(cache: &'a mut ResponseCache, endpoints: &'a Endpoints) -> Self {
        Self { cache, endpoints }
    }

    /// Walks the whole catalog, accumulating records into `state`
    ///
    /// Transient fetch failures flag `state` for restart but do not stop the
    /// walk. Only schema violations and cache I/O errors abort it.
    pub async fn walk(&mut self, state: &mut CrawlState) -> Result<(), CatalogError> {
        tracing::debug!(attempt = state.attempt(), "Walking catalog");

        let url = self.endpoints.schools();
        let mut schools = CatalogNode::from_payload(&self.fetch(&url, state).await?);
        sort_by_name(&mut schools);

        for school in &schools {
            self.process_school(school, state).await?;
        }

        Ok(())
    }

    /// Fetches through the cache, recording transient failures on the state
    async fn fetch(&mut self, url: &str, state: &mut CrawlState) -> Result<Vec<Value>, CatalogError> {
        let outcome = self.cache.get_or_fetch(url).await?;
        if let FetchOutcome::Transient { kind, .. } = &outcome {
            state.request_restart(url, *kind);
        }
        Ok(outcome.into_payload())
    }

    async fn process_school(
        &mut self,
        school: &CatalogNode,
        state: &mut CrawlState,
    ) -> Result<(), CatalogError> {
        let Some(school_id) = school.id.as_deref() else {
            return Ok(());
        };
        let name = school
            .name
            .as_deref()
            .ok_or_else(|| schema_violation(Level::School, format!("school '{}' has no name", school_id)))?;

        tracing::info!(school = name, "Crawling school");

        let url = self.endpoints.subjects(school_id);
        let mut subjects = CatalogNode::from_payload(&self.fetch(&url, state).await?);
        sort_by_name(&mut subjects);

        for subject in &subjects {
            self.process_subject(subject, school_id, state).await?;
        }

        Ok(())
    }

    async fn process_subject(
        &mut self,
        subject: &CatalogNode,
        school_id: &str,
        state: &mut CrawlState,
    ) -> Result<(), CatalogError> {
        let Some(name) = subject.name.as_deref() else {
            return Ok(());
        };
        let path = subject
            .path
            .as_deref()
            .ok_or_else(|| schema_violation(Level::Subject, format!("subject '{}' has no path", name)))?;

        tracing::info!(subject = name, "    Crawling subject");

        let url = self.endpoints.path_info(path);
        let mut classes = CatalogNode::from_payload(&self.fetch(&url, state).await?);
        sort_by_name(&mut classes);

        for class in &classes {
            self.process_class(class, school_id, name, state).await?;
        }

        Ok(())
    }

    async fn process_class(
        &mut self,
        class: &CatalogNode,
        school_id: &str,
        subject_name: &str,
        state: &mut CrawlState,
    ) -> Result<(), CatalogError> {
        let Some(name) = class.name.as_deref() else {
            return Ok(());
        };
        let path = class
            .path
            .as_deref()
            .ok_or_else(|| schema_violation(Level::Class, format!("class '{}' has no path", name)))?;

        tracing::debug!(class = name, "Crawling class");

        let context = RecordContext {
            school: school_id.to_string(),
            subject: subject_name.to_string(),
            class: name.to_string(),
        };

        let url = self.endpoints.path_info(path);
        let sections = CatalogNode::from_payload(&self.fetch(&url, state).await?);

        for section in &sections {
            self.process_section(section, &context, state).await?;
        }

        Ok(())
    }

    async fn process_section(
        &mut self,
        section: &CatalogNode,
        context: &RecordContext,
        state: &mut CrawlState,
    ) -> Result<(), CatalogError> {
        let Some(path) = section.path.as_deref() else {
            return Ok(());
        };

        if state.is_visited(path) {
            tracing::trace!(path, "Section already visited");
            return Ok(());
        }

        let url = self.endpoints.section(path);
        let payload = self.fetch(&url, state).await?;
        state.mark_visited(path);

        let info = SectionInfo::from_payload(&payload);

        tracing::debug!(path, "Recorded section");
        state.push_record(SectionRecord::from_info(context.clone(), &info));

        Ok(())
    }
}

fn schema_violation(level: Level, detail: String) -> CatalogError {
    CatalogError::Schema { level, detail }
}
