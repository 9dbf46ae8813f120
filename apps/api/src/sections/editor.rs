//! Editor facet of the section registry.
//!
//! An editor is described to the front end as a form (which fields, what kind
//! of input) and enforced on the way back in by `normalize`, which coerces the
//! submitted JSON into the section's payload shape before the store sees it.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::models::document::SectionType;
use crate::models::payloads::SectionPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    Url,
    Month,
    TextArea,
    Checkbox,
    Tags,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        required: false,
    }
}

const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        required: true,
    }
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("invalid {section_type} data: {source}")]
    Shape {
        section_type: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Normalizer = fn(&SectionType, Value) -> Result<Value, EditorError>;

pub struct EditorSpec {
    pub implemented: bool,
    /// Set when `fields` describe one entry of a list held under this key.
    pub collection: Option<&'static str>,
    pub fields: &'static [FieldSpec],
    pub normalize: Normalizer,
}

/// What the front end receives to build the form for a section type.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorForm {
    pub section_type: String,
    pub implemented: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<&'static str>,
    pub fields: &'static [FieldSpec],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
}

impl EditorSpec {
    pub fn form(&self, section_type: &SectionType) -> EditorForm {
        EditorForm {
            section_type: section_type.to_string(),
            implemented: self.implemented,
            collection: self.collection,
            fields: self.fields,
            notice: (!self.implemented).then_some("Section type not implemented"),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Editor table
// ────────────────────────────────────────────────────────────────────────────

pub static CONTACT: EditorSpec = EditorSpec {
    implemented: true,
    collection: None,
    fields: &[
        required("fullName", "Full Name", FieldKind::Text),
        required("email", "Email", FieldKind::Email),
        field("phone", "Phone", FieldKind::Phone),
        field("location", "Location", FieldKind::Text),
        field("website", "Website", FieldKind::Url),
        field("linkedin", "LinkedIn", FieldKind::Url),
        field("github", "GitHub", FieldKind::Url),
    ],
    normalize: normalize_payload,
};

pub static SUMMARY: EditorSpec = EditorSpec {
    implemented: true,
    collection: None,
    fields: &[field("content", "Professional Summary", FieldKind::TextArea)],
    normalize: normalize_payload,
};

pub static EXPERIENCE: EditorSpec = EditorSpec {
    implemented: true,
    collection: Some("items"),
    fields: &[
        required("position", "Position", FieldKind::Text),
        required("company", "Company", FieldKind::Text),
        field("location", "Location", FieldKind::Text),
        field("startDate", "Start Date", FieldKind::Month),
        field("endDate", "End Date", FieldKind::Month),
        field("current", "I currently work here", FieldKind::Checkbox),
        field("description", "Description", FieldKind::TextArea),
    ],
    normalize: normalize_payload,
};

pub static EDUCATION: EditorSpec = EditorSpec {
    implemented: true,
    collection: Some("items"),
    fields: &[
        required("institution", "Institution", FieldKind::Text),
        required("degree", "Degree", FieldKind::Text),
        field("field", "Field of Study", FieldKind::Text),
        field("location", "Location", FieldKind::Text),
        field("startDate", "Start Date", FieldKind::Month),
        field("endDate", "End Date", FieldKind::Month),
        field("gpa", "GPA", FieldKind::Text),
        field("description", "Description", FieldKind::TextArea),
    ],
    normalize: normalize_payload,
};

pub static SKILLS: EditorSpec = EditorSpec {
    implemented: true,
    collection: None,
    fields: &[field("items", "Skills", FieldKind::Tags)],
    normalize: normalize_payload,
};

pub static PROJECTS: EditorSpec = EditorSpec {
    implemented: true,
    collection: Some("items"),
    fields: &[
        required("name", "Project Name", FieldKind::Text),
        field("description", "Description", FieldKind::TextArea),
        field("technologies", "Technologies", FieldKind::Tags),
        field("url", "Live URL", FieldKind::Url),
        field("github", "Repository", FieldKind::Url),
        field("startDate", "Start Date", FieldKind::Month),
        field("endDate", "End Date", FieldKind::Month),
    ],
    normalize: normalize_payload,
};

pub static CERTIFICATIONS: EditorSpec = EditorSpec {
    implemented: true,
    collection: Some("items"),
    fields: &[
        required("name", "Certification", FieldKind::Text),
        field("issuer", "Issuer", FieldKind::Text),
        field("date", "Date", FieldKind::Month),
        field("url", "Credential URL", FieldKind::Url),
    ],
    normalize: normalize_payload,
};

pub static LANGUAGES: EditorSpec = EditorSpec {
    implemented: true,
    collection: Some("items"),
    fields: &[
        required("language", "Language", FieldKind::Text),
        field("proficiency", "Proficiency", FieldKind::Text),
    ],
    normalize: normalize_payload,
};

pub static HOBBIES: EditorSpec = EditorSpec {
    implemented: true,
    collection: None,
    fields: &[field("items", "Hobbies", FieldKind::Tags)],
    normalize: normalize_payload,
};

pub static PLACEHOLDER: EditorSpec = EditorSpec {
    implemented: false,
    collection: None,
    fields: &[],
    normalize: passthrough,
};

// ────────────────────────────────────────────────────────────────────────────
// Normalizers
// ────────────────────────────────────────────────────────────────────────────

/// Decodes into the typed payload, gives list entries without an id a fresh
/// one, drops blank tags, and re-encodes.
fn normalize_payload(section_type: &SectionType, data: Value) -> Result<Value, EditorError> {
    let shape_error = |source| EditorError::Shape {
        section_type: section_type.to_string(),
        source,
    };

    let mut payload = SectionPayload::decode(section_type, &data).map_err(shape_error)?;
    match &mut payload {
        SectionPayload::Experience(list) => list.items.iter_mut().for_each(|i| assign_id(&mut i.id)),
        SectionPayload::Education(list) => list.items.iter_mut().for_each(|i| assign_id(&mut i.id)),
        SectionPayload::Projects(list) => list.items.iter_mut().for_each(|i| {
            assign_id(&mut i.id);
            clean_tags(&mut i.technologies);
        }),
        SectionPayload::Certifications(list) => {
            list.items.iter_mut().for_each(|i| assign_id(&mut i.id))
        }
        SectionPayload::Languages(list) => list.items.iter_mut().for_each(|i| assign_id(&mut i.id)),
        SectionPayload::Skills(list) | SectionPayload::Hobbies(list) => clean_tags(&mut list.items),
        SectionPayload::Contact(_) | SectionPayload::Summary(_) | SectionPayload::Unknown(_) => {}
    }
    payload.to_value().map_err(shape_error)
}

fn passthrough(_section_type: &SectionType, data: Value) -> Result<Value, EditorError> {
    Ok(data)
}

fn assign_id(id: &mut String) {
    if id.trim().is_empty() {
        *id = Uuid::new_v4().to_string();
    }
}

fn clean_tags(tags: &mut Vec<String>) {
    *tags = tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
}
