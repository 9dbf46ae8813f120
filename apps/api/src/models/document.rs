use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub const DEFAULT_TITLE: &str = "Untitled Resume";
pub const DEFAULT_ACCENT_COLOR: &str = "#7C5CFF";

// ────────────────────────────────────────────────────────────────────────────
// Section type
// ────────────────────────────────────────────────────────────────────────────

/// Tag selecting a section's payload shape, editor and renderer.
///
/// Tags this build does not know are kept verbatim in `Other` so that data
/// written by a newer front end survives a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionType {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
    Hobbies,
    Other(String),
}

impl SectionType {
    /// The five types every new document starts with, in display order.
    pub const DEFAULT_SET: [SectionType; 5] = [
        SectionType::Contact,
        SectionType::Summary,
        SectionType::Experience,
        SectionType::Education,
        SectionType::Skills,
    ];

    pub fn parse(tag: &str) -> Self {
        match tag {
            "contact" => SectionType::Contact,
            "summary" => SectionType::Summary,
            "experience" => SectionType::Experience,
            "education" => SectionType::Education,
            "skills" => SectionType::Skills,
            "projects" => SectionType::Projects,
            "certifications" => SectionType::Certifications,
            "languages" => SectionType::Languages,
            "hobbies" => SectionType::Hobbies,
            other => SectionType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SectionType::Contact => "contact",
            SectionType::Summary => "summary",
            SectionType::Experience => "experience",
            SectionType::Education => "education",
            SectionType::Skills => "skills",
            SectionType::Projects => "projects",
            SectionType::Certifications => "certifications",
            SectionType::Languages => "languages",
            SectionType::Hobbies => "hobbies",
            SectionType::Other(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SectionType::Other(_))
    }

    /// Heading a freshly added section of this type gets.
    pub fn default_title(&self) -> String {
        match self {
            SectionType::Contact => "Contact Information".to_string(),
            SectionType::Summary => "Professional Summary".to_string(),
            SectionType::Experience => "Experience".to_string(),
            SectionType::Education => "Education".to_string(),
            SectionType::Skills => "Skills".to_string(),
            SectionType::Projects => "Projects".to_string(),
            SectionType::Certifications => "Certifications".to_string(),
            SectionType::Languages => "Languages".to_string(),
            SectionType::Hobbies => "Hobbies".to_string(),
            SectionType::Other(tag) => tag.clone(),
        }
    }
}

impl From<String> for SectionType {
    fn from(tag: String) -> Self {
        SectionType::parse(&tag)
    }
}

impl From<SectionType> for String {
    fn from(section_type: SectionType) -> Self {
        section_type.as_str().to_string()
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Template + theme
// ────────────────────────────────────────────────────────────────────────────

/// Visual layout selector. Unrecognised stored values resolve to `Minimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TemplateId {
    #[default]
    Minimal,
    Modern,
    Creative,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [TemplateId::Minimal, TemplateId::Modern, TemplateId::Creative];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Minimal => "minimal",
            TemplateId::Modern => "modern",
            TemplateId::Creative => "creative",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TemplateId::Minimal => "Minimal",
            TemplateId::Modern => "Modern",
            TemplateId::Creative => "Creative",
        }
    }
}

impl From<String> for TemplateId {
    fn from(value: String) -> Self {
        match value.as_str() {
            "minimal" => TemplateId::Minimal,
            "modern" => TemplateId::Modern,
            "creative" => TemplateId::Creative,
            other => {
                tracing::warn!("Unknown template id '{other}', falling back to minimal");
                TemplateId::Minimal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Sm,
    #[default]
    Md,
    Lg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    Compact,
    #[default]
    Normal,
    Relaxed,
}

/// Presentation-only settings, read by the template projector and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeSettings {
    #[serde(deserialize_with = "accent_or_default")]
    pub accent_color: String,
    pub font_size: FontSize,
    pub spacing: Spacing,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            font_size: FontSize::default(),
            spacing: Spacing::default(),
        }
    }
}

/// Whether `value` is a colour the templates may interpolate into inline
/// styles: `#` followed by 3, 4, 6 or 8 hex digits, or a bare CSS colour
/// keyword. Anything else could close the declaration it lands in.
pub fn is_css_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => (1..=32).contains(&value.len()) && value.chars().all(|c| c.is_ascii_alphabetic()),
    }
}

fn accent_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value {
        Some(color) if is_css_color(&color) => Ok(color),
        Some(color) => {
            tracing::warn!("Rejecting accent colour '{color}', using default");
            Ok(DEFAULT_ACCENT_COLOR.to_string())
        }
        None => Ok(DEFAULT_ACCENT_COLOR.to_string()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section + document
// ────────────────────────────────────────────────────────────────────────────

/// One editable block of a document. `data` is opaque here; only the section
/// registry interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub title: String,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub data: Value,
}

fn visible_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub template_id: TemplateId,
    #[serde(default)]
    pub theme_settings: ThemeSettings,
    pub sections: Vec<Section>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    /// False when two sections share an id.
    pub fn has_unique_section_ids(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.sections.len());
        self.sections.iter().all(|s| seen.insert(s.id.as_str()))
    }
}
