//! Field normalizers
//!
//! Rule engines that turn the free-text fields of a section detail document
//! into structured columns:
//! - `meeting`: meeting-time strings → days per week, minutes per week
//! - `requirements`: enrollment requirement text → canonical tags
//! - `descriptions`: named description blocks → canonical columns

mod descriptions;
mod meeting;
mod requirements;

pub use descriptions::{remap_descriptions, DescriptionFields};
pub use meeting::{parse_meeting_time, MeetingLoad, TBA};
pub use requirements::{classify_clause, classify_requirements, RequirementTag};
