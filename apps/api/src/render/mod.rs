// Template projector: Document -> render tree, one module per layout.
// Pure functions only. No store access, no I/O; the same document always
// projects to the same tree.

pub mod bodies;
pub mod creative;
pub mod handlers;
pub mod minimal;
pub mod modern;
pub mod node;
pub mod theme;

use std::borrow::Cow;

use tracing::debug;

use crate::models::document::{
    is_css_color, Document, Section, SectionType, TemplateId, ThemeSettings, DEFAULT_ACCENT_COLOR,
};
use crate::models::payloads::{decode_or_default, ContactInfo};
use crate::render::node::{Element, Node};
use crate::render::theme::{base_font_px, px};
use crate::sections::{ordering, registry};

/// Element id the PDF exporter grabs to rasterize the preview.
pub const PREVIEW_ELEMENT_ID: &str = "cv-preview";

pub const NAME_PLACEHOLDER: &str = "Your Name";

/// Projects `document` through the layout selected by its `template_id`.
pub fn project(document: &Document) -> Node {
    let document = with_safe_accent(document);
    let document = document.as_ref();
    let visible = ordering::visible_in_order(&document.sections);
    let slots = Slots::assign(document, &visible);
    match document.template_id {
        TemplateId::Minimal => minimal::render(document, &slots),
        TemplateId::Modern => modern::render(document, &slots),
        TemplateId::Creative => creative::render(document, &slots),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Slot assignment
// ────────────────────────────────────────────────────────────────────────────

/// Visible sections split into the fixed slots a template may special-case
/// and the remainder, which is laid out generically in display order.
///
/// Each fixed slot takes the first visible section of its type; any further
/// sections of the same type land in `rest`.
pub struct Slots<'a> {
    pub contact: Option<&'a Section>,
    pub summary: Option<&'a Section>,
    pub experience: Option<&'a Section>,
    pub education: Option<&'a Section>,
    pub skills: Option<&'a Section>,
    pub rest: Vec<&'a Section>,
    /// Every visible section in display order, slotted ones included.
    pub in_order: Vec<&'a Section>,
    /// The document has no contact section at all (hidden does not count).
    pub contact_missing: bool,
}

impl<'a> Slots<'a> {
    fn assign(document: &'a Document, visible: &[&'a Section]) -> Self {
        let mut slots = Slots {
            contact: None,
            summary: None,
            experience: None,
            education: None,
            skills: None,
            rest: Vec::new(),
            in_order: visible.to_vec(),
            contact_missing: !document
                .sections
                .iter()
                .any(|s| s.section_type == SectionType::Contact),
        };
        for &section in visible {
            let slot = match section.section_type {
                SectionType::Contact => &mut slots.contact,
                SectionType::Summary => &mut slots.summary,
                SectionType::Experience => &mut slots.experience,
                SectionType::Education => &mut slots.education,
                SectionType::Skills => &mut slots.skills,
                _ => {
                    slots.rest.push(section);
                    continue;
                }
            };
            if slot.is_none() {
                *slot = Some(section);
            } else {
                slots.rest.push(section);
            }
        }
        slots
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared building blocks
// ────────────────────────────────────────────────────────────────────────────

fn root(document: &Document) -> Element {
    Element::new("div")
        .attr("id", PREVIEW_ELEMENT_ID)
        .attr("data-template", document.template_id.as_str())
        .style("background-color", "#ffffff")
        .style("color", "#111827")
        .style("font-size", px(base_font_px(document.theme_settings.font_size)))
        .style("line-height", "1.5")
}

/// Swaps an accent colour that is not a plain hex value or keyword for the
/// default before it reaches any inline style.
fn with_safe_accent(document: &Document) -> Cow<'_, Document> {
    if is_css_color(&document.theme_settings.accent_color) {
        return Cow::Borrowed(document);
    }
    debug!("Document {} has an unusable accent colour, rendering with default", document.id);
    let mut sanitized = document.clone();
    sanitized.theme_settings.accent_color = DEFAULT_ACCENT_COLOR.to_string();
    Cow::Owned(sanitized)
}

/// Wrapper every rendered section sits in, tagged with its id and type.
fn section_frame(section: &Section) -> Element {
    Element::new("section")
        .attr("data-section-id", section.id.as_str())
        .attr("data-section-type", section.section_type.as_str())
}

/// The registry's body renderer for the section's type.
fn section_body(section: &Section, theme: &ThemeSettings) -> Node {
    registry::get_renderer(&section.section_type)(section, theme)
}

fn contact_info(section: &Section) -> ContactInfo {
    decode_or_default(&section.data).unwrap_or_default()
}

fn display_name(contact: &ContactInfo) -> &str {
    if contact.full_name.trim().is_empty() {
        NAME_PLACEHOLDER
    } else {
        &contact.full_name
    }
}
