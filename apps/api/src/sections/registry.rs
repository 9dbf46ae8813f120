//! Section registry: the single extension point tying a section type to its
//! default payload, its editor and its renderer.
//!
//! Adding a section type means adding one `SectionCapabilities` entry here;
//! every template and the editor pick it up through `capabilities`.

use serde_json::{json, Value};
use uuid::Uuid;

use crate::models::document::{Section, SectionType, ThemeSettings};
use crate::render::bodies;
use crate::render::node::Node;
use crate::sections::editor::{self, EditorSpec};

/// Draws a section body (heading excluded) for the given theme.
pub type Renderer = fn(&Section, &ThemeSettings) -> Node;

pub struct SectionCapabilities {
    pub default_data: fn() -> Value,
    pub editor: &'static EditorSpec,
    pub renderer: Renderer,
}

static CONTACT: SectionCapabilities = SectionCapabilities {
    default_data: empty_contact,
    editor: &editor::CONTACT,
    renderer: bodies::contact,
};

static SUMMARY: SectionCapabilities = SectionCapabilities {
    default_data: empty_summary,
    editor: &editor::SUMMARY,
    renderer: bodies::summary,
};

static EXPERIENCE: SectionCapabilities = SectionCapabilities {
    default_data: empty_items,
    editor: &editor::EXPERIENCE,
    renderer: bodies::experience,
};

static EDUCATION: SectionCapabilities = SectionCapabilities {
    default_data: empty_items,
    editor: &editor::EDUCATION,
    renderer: bodies::education,
};

static SKILLS: SectionCapabilities = SectionCapabilities {
    default_data: empty_items,
    editor: &editor::SKILLS,
    renderer: bodies::skills,
};

static PROJECTS: SectionCapabilities = SectionCapabilities {
    default_data: empty_items,
    editor: &editor::PROJECTS,
    renderer: bodies::projects,
};

static CERTIFICATIONS: SectionCapabilities = SectionCapabilities {
    default_data: empty_items,
    editor: &editor::CERTIFICATIONS,
    renderer: bodies::certifications,
};

static LANGUAGES: SectionCapabilities = SectionCapabilities {
    default_data: empty_items,
    editor: &editor::LANGUAGES,
    renderer: bodies::languages,
};

static HOBBIES: SectionCapabilities = SectionCapabilities {
    default_data: empty_items,
    editor: &editor::HOBBIES,
    renderer: bodies::hobbies,
};

static PLACEHOLDER: SectionCapabilities = SectionCapabilities {
    default_data: empty_object,
    editor: &editor::PLACEHOLDER,
    renderer: bodies::not_implemented,
};

fn empty_contact() -> Value {
    json!({
        "fullName": "",
        "email": "",
        "phone": "",
        "location": "",
        "website": "",
        "linkedin": "",
        "github": ""
    })
}

fn empty_summary() -> Value {
    json!({ "content": "" })
}

fn empty_items() -> Value {
    json!({ "items": [] })
}

fn empty_object() -> Value {
    json!({})
}

pub fn capabilities(section_type: &SectionType) -> &'static SectionCapabilities {
    match section_type {
        SectionType::Contact => &CONTACT,
        SectionType::Summary => &SUMMARY,
        SectionType::Experience => &EXPERIENCE,
        SectionType::Education => &EDUCATION,
        SectionType::Skills => &SKILLS,
        SectionType::Projects => &PROJECTS,
        SectionType::Certifications => &CERTIFICATIONS,
        SectionType::Languages => &LANGUAGES,
        SectionType::Hobbies => &HOBBIES,
        SectionType::Other(_) => &PLACEHOLDER,
    }
}

pub fn get_default_data(section_type: &SectionType) -> Value {
    (capabilities(section_type).default_data)()
}

pub fn get_editor(section_type: &SectionType) -> &'static EditorSpec {
    capabilities(section_type).editor
}

pub fn get_renderer(section_type: &SectionType) -> Renderer {
    capabilities(section_type).renderer
}

/// A fresh section of `section_type` carrying the registry's default payload.
/// `order` is left at 0; callers place it.
pub fn new_section(section_type: SectionType, id: Option<String>, title: Option<String>) -> Section {
    Section {
        id: id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        title: title.unwrap_or_else(|| section_type.default_title()),
        visible: true,
        order: 0,
        data: get_default_data(&section_type),
        section_type,
    }
}
