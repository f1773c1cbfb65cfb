//! Output module for flattened section records
//!
//! This module handles:
//! - The flattened `SectionRecord` built for every section
//! - Projecting records onto the fixed CSV column set
//! - Reporting record keys the export leaves out

mod csv;
mod record;

pub use self::csv::{export_csv, unused_keys, write_csv, write_row, ExportSummary, COLUMNS};
pub use record::{RecordContext, SectionRecord};
