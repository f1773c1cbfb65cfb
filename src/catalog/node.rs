//! Hierarchy nodes returned by the index endpoints

use serde_json::Value;

/// A school, subject, class or section entry from an index payload
///
/// Only the identifying keys are read; everything else in the upstream object
/// is ignored. Numeric values are accepted and rendered as decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogNode {
    pub id: Option<String>,
    pub name: Option<String>,
    pub path: Option<String>,
}

impl CatalogNode {
    /// Reads a node from one element of an index payload
    ///
    /// Non-object elements produce a node with no keys, which every traversal
    /// level skips.
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: string_field(value, "id"),
            name: string_field(value, "name"),
            path: string_field(value, "path"),
        }
    }

    /// Reads every element of an index payload
    pub fn from_payload(payload: &[Value]) -> Vec<Self> {
        payload.iter().map(Self::from_value).collect()
    }

    /// Display name, or the empty string when absent
    pub fn sort_key(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// Reads a string field, accepting numbers as their decimal rendering
pub(crate) fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Sorts nodes by display name (byte order, stable)
pub fn sort_by_name(nodes: &mut [CatalogNode]) {
    nodes.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
}
