//! Section detail document

use crate::catalog::node::string_field;
use serde_json::Value;

/// Detail object fetched for one section path
///
/// Every field is read on its own: a field that is absent, null or of an
/// unexpected type is `None` and leaves the other fields untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionInfo {
    pub title: Option<String>,
    pub topic: Option<String>,
    pub class_mtg_info: Option<Vec<MeetingInfo>>,
    pub descriptions: Option<Vec<Description>>,
    pub instructors: Option<Vec<Instructor>>,
    pub enrl_requirement: Option<String>,
    pub class_attributes: Option<Value>,
}

/// One meeting time/location entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingInfo {
    pub meet_t: Option<String>,
    pub meet_l: Option<String>,
}

/// A named free-text description block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instructor {
    pub instructor_name: Option<String>,
}

impl SectionInfo {
    /// Reads the detail document from a trimmed payload
    ///
    /// The upstream wraps the object in a single-element array. Payloads of any
    /// other length carry no usable detail and yield an empty `SectionInfo`.
    pub fn from_payload(payload: &[Value]) -> Self {
        match payload {
            [single] => Self::from_value(single),
            _ => Self::default(),
        }
    }

    /// Reads a detail object field by field
    pub fn from_value(value: &Value) -> Self {
        Self {
            title: string_field(value, "title"),
            topic: string_field(value, "topic"),
            class_mtg_info: list_field(value, "class_mtg_info", |v| Some(MeetingInfo::from_value(v))),
            descriptions: list_field(value, "descriptions", Description::from_value),
            instructors: list_field(value, "instructors", |v| Some(Instructor::from_value(v))),
            enrl_requirement: string_field(value, "enrl_requirement"),
            class_attributes: value.get("class_attributes").filter(|v| !v.is_null()).cloned(),
        }
    }

    /// First meeting entry, the only one consulted
    pub fn first_meeting(&self) -> Option<&MeetingInfo> {
        self.class_mtg_info.as_ref()?.first()
    }
}

impl MeetingInfo {
    pub fn from_value(value: &Value) -> Self {
        Self {
            meet_t: string_field(value, "meet_t"),
            meet_l: string_field(value, "meet_l"),
        }
    }
}

impl Description {
    /// Reads a block; blocks without a string name and value are dropped
    pub fn from_value(value: &Value) -> Option<Self> {
        Some(Self {
            name: value.get("name")?.as_str()?.to_string(),
            value: value.get("value")?.as_str()?.to_string(),
        })
    }
}

impl Instructor {
    pub fn from_value(value: &Value) -> Self {
        Self {
            instructor_name: string_field(value, "instructor_name"),
        }
    }
}

/// Reads an array field, mapping each element and skipping the ones `read` rejects
///
/// A non-array value is treated like an absent field.
fn list_field<T>(value: &Value, key: &str, read: impl Fn(&Value) -> Option<T>) -> Option<Vec<T>> {
    match value.get(key)? {
        Value::Array(items) => Some(items.iter().filter_map(read).collect()),
        Value::Null => None,
        other => {
            tracing::debug!(field = key, value = %other, "Ignoring non-list section field");
            None
        }
    }
}
