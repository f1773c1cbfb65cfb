//! Flattened per-section output records

use crate::catalog::SectionInfo;
use crate::normalize::{
    classify_requirements, parse_meeting_time, remap_descriptions, DescriptionFields,
    RequirementTag, TBA,
};
use serde_json::Value;

/// Ancestor context copied into every section record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordContext {
    /// School identifier (the school's `id`, not its display name)
    pub school: String,
    pub subject: String,
    pub class: String,
}

/// One flattened section
///
/// Optional fields that are `None` are absent keys: they produce empty cells
/// and are not reported as observed keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionRecord {
    pub context: RecordContext,
    pub title: Option<String>,
    pub topic: Option<String>,
    pub time: Option<String>,
    pub days_per_week: Option<u32>,
    pub minutes_per_week: Option<i64>,
    pub location: Option<String>,
    pub descriptions: DescriptionFields,
    pub instructors: Option<Vec<String>>,
    pub requirements: Option<Vec<RequirementTag>>,
    pub attributes: Option<Value>,
}

impl SectionRecord {
    /// Creates a record holding only the ancestor context
    pub fn new(context: RecordContext) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }

    /// Builds a record by layering normalized section fields over the context
    pub fn from_info(context: RecordContext, info: &SectionInfo) -> Self {
        let mut record = Self::new(context);

        if let Some(title) = &info.title {
            let prefix = format!("{} ", record.context.school);
            record.title = Some(title.replace(&prefix, ""));
        }
        record.topic = info.topic.clone();

        if let Some(meeting) = info.first_meeting() {
            if let Some(meet_t) = &meeting.meet_t {
                record.time = Some(meet_t.clone());
                if meet_t != TBA {
                    match parse_meeting_time(meet_t) {
                        Some(load) => {
                            record.days_per_week = Some(load.days_per_week);
                            record.minutes_per_week = Some(load.minutes_per_week);
                        }
                        None => {
                            tracing::warn!(time = %meet_t, "Unrecognized meeting time format");
                        }
                    }
                }
            }
            record.location = meeting.meet_l.clone();
        }

        if let Some(descriptions) = &info.descriptions {
            record.descriptions = remap_descriptions(descriptions);
        }

        record.instructors = info.instructors.as_ref().map(|instructors| {
            instructors
                .iter()
                .filter_map(|i| i.instructor_name.clone())
                .collect()
        });

        record.requirements = info
            .enrl_requirement
            .as_deref()
            .map(classify_requirements);

        record.attributes = info.class_attributes.clone();

        record
    }

    /// Present keys and their rendered cell values, in a fixed order
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("school", self.context.school.clone()),
            ("subject", self.context.subject.clone()),
            ("class", self.context.class.clone()),
        ];

        let mut push = |key: &'static str, value: Option<String>| {
            if let Some(value) = value {
                fields.push((key, value));
            }
        };

        push("title", self.title.clone());
        push("topic", self.topic.clone());
        push("time", self.time.clone());
        push(
            "custom_days_per_week",
            self.days_per_week.map(|d| d.to_string()),
        );
        push(
            "custom_minutes_per_week",
            self.minutes_per_week.map(|m| m.to_string()),
        );
        push("location", self.location.clone());

        let d = &self.descriptions;
        push("description_overview", d.overview.clone());
        push(
            "description_materials_required",
            d.materials_required.clone(),
        );
        push(
            "description_materials_suggested",
            d.materials_suggested.clone(),
        );
        push("description_objectives", d.objectives.clone());
        push("description_teaching_method", d.teaching_method.clone());
        push("description_evaluation_method", d.evaluation_method.clone());
        push(
            "description_registration_requirements",
            d.registration_requirements.clone(),
        );
        push("description_notes", d.notes.clone());

        push("instructors", self.instructors.as_deref().map(render_list));
        push(
            "requirements",
            self.requirements.as_ref().map(|tags| {
                let names: Vec<&str> = tags.iter().map(|t| t.as_str()).collect();
                render_list(&names)
            }),
        );
        push("attributes", self.attributes.as_ref().map(render_json));

        fields
    }

    /// Names of the keys present on this record
    pub fn keys(&self) -> Vec<&'static str> {
        self.fields().into_iter().map(|(key, _)| key).collect()
    }

    /// Rendered value of one key, if present
    pub fn cell(&self, key: &str) -> Option<String> {
        self.fields()
            .into_iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value)
    }
}

/// Lists render as a compact JSON array of strings
fn render_list<S: AsRef<str>>(items: &[S]) -> String {
    let values: Vec<Value> = items
        .iter()
        .map(|s| Value::String(s.as_ref().to_string()))
        .collect();
    Value::Array(values).to_string()
}

/// Strings render verbatim, anything else as compact JSON
fn render_json(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
