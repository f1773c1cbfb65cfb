//! Catalog API model
//!
//! This module describes the upstream course catalog:
//! - URL builders for the four endpoint shapes
//! - Loosely-typed hierarchy nodes (school, subject, class, section)
//! - The typed section detail document

mod endpoints;
mod node;
mod section;

pub use endpoints::Endpoints;
pub use node::{sort_by_name, CatalogNode};
pub use section::{Description, Instructor, MeetingInfo, SectionInfo};
