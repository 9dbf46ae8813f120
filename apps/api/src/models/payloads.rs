//! Typed payload shapes for each section type.
//!
//! Every field defaults when missing or null, so partially filled editor data decodes
//! cleanly. An empty string means "not provided" throughout.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::document::SectionType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub linkedin: String,
    pub github: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryData {
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceItem {
    pub id: String,
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationItem {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationItem {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageItem {
    pub id: String,
    pub language: String,
    pub proficiency: String,
}

/// `{ "items": [...] }`, the shape shared by every list-valued section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemList<T> {
    pub items: Vec<T>,
}

pub type ExperienceData = ItemList<ExperienceItem>;
pub type EducationData = ItemList<EducationItem>;
pub type SkillsData = ItemList<String>;
pub type ProjectsData = ItemList<ProjectItem>;
pub type CertificationsData = ItemList<CertificationItem>;
pub type LanguagesData = ItemList<LanguageItem>;
pub type HobbiesData = ItemList<String>;

/// A section payload decoded into its typed shape.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionPayload {
    Contact(ContactInfo),
    Summary(SummaryData),
    Experience(ExperienceData),
    Education(EducationData),
    Skills(SkillsData),
    Projects(ProjectsData),
    Certifications(CertificationsData),
    Languages(LanguagesData),
    Hobbies(HobbiesData),
    Unknown(Value),
}

impl SectionPayload {
    /// Decodes raw section data according to `section_type`.
    /// `null` decodes to the type's empty payload.
    pub fn decode(section_type: &SectionType, data: &Value) -> Result<Self, serde_json::Error> {
        Ok(match section_type {
            SectionType::Contact => SectionPayload::Contact(decode_or_default(data)?),
            SectionType::Summary => SectionPayload::Summary(decode_or_default(data)?),
            SectionType::Experience => SectionPayload::Experience(decode_or_default(data)?),
            SectionType::Education => SectionPayload::Education(decode_or_default(data)?),
            SectionType::Skills => SectionPayload::Skills(decode_or_default(data)?),
            SectionType::Projects => SectionPayload::Projects(decode_or_default(data)?),
            SectionType::Certifications => {
                SectionPayload::Certifications(decode_or_default(data)?)
            }
            SectionType::Languages => SectionPayload::Languages(decode_or_default(data)?),
            SectionType::Hobbies => SectionPayload::Hobbies(decode_or_default(data)?),
            SectionType::Other(_) => SectionPayload::Unknown(data.clone()),
        })
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        match self {
            SectionPayload::Contact(p) => serde_json::to_value(p),
            SectionPayload::Summary(p) => serde_json::to_value(p),
            SectionPayload::Experience(p) => serde_json::to_value(p),
            SectionPayload::Education(p) => serde_json::to_value(p),
            SectionPayload::Skills(p) => serde_json::to_value(p),
            SectionPayload::Projects(p) => serde_json::to_value(p),
            SectionPayload::Certifications(p) => serde_json::to_value(p),
            SectionPayload::Languages(p) => serde_json::to_value(p),
            SectionPayload::Hobbies(p) => serde_json::to_value(p),
            SectionPayload::Unknown(v) => Ok(v.clone()),
        }
    }
}

/// Decodes `data` into `T`, treating `null` as absent at every depth: a null
/// payload is the empty payload, a null field takes its default and a null
/// list entry is skipped.
pub fn decode_or_default<T: DeserializeOwned + Default>(data: &Value) -> Result<T, serde_json::Error> {
    if data.is_null() {
        return Ok(T::default());
    }
    T::deserialize(without_nulls(data))
}

fn without_nulls(value: &Value) -> Value {
    match value {
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), without_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items.iter().filter(|v| !v.is_null()).map(without_nulls).collect(),
        ),
        other => other.clone(),
    }
}
