//! Description block remapping

use crate::catalog::Description;

/// Canonical description columns of a section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionFields {
    pub overview: Option<String>,
    pub materials_required: Option<String>,
    pub materials_suggested: Option<String>,
    pub objectives: Option<String>,
    pub teaching_method: Option<String>,
    pub evaluation_method: Option<String>,
    pub registration_requirements: Option<String>,
    pub notes: Option<String>,
}

/// Maps named description blocks onto canonical columns
///
/// Labels are compared after lower-casing; unknown labels are dropped and a
/// repeated label keeps the last value. The evaluation method has its `<br/>`
/// separators replaced with `;`.
pub fn remap_descriptions(descriptions: &[Description]) -> DescriptionFields {
    let mut fields = DescriptionFields::default();

    for description in descriptions {
        let value = description.value.clone();
        let slot = match description.name.to_lowercase().as_str() {
            "overview of class" => &mut fields.overview,
            "class materials (required)" => &mut fields.materials_required,
            "class materials (suggested)" => &mut fields.materials_suggested,
            "learning objectives" => &mut fields.objectives,
            "teaching method" => &mut fields.teaching_method,
            "evaluation method" => {
                fields.evaluation_method = Some(value.replace("<br/>", ";"));
                continue;
            }
            "registration requirements" => &mut fields.registration_requirements,
            "class notes" => &mut fields.notes,
            other => {
                tracing::trace!(label = other, "Dropping unrecognized description block");
                continue;
            }
        };
        *slot = Some(value);
    }

    fields
}
