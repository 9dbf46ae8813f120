//! Minimal: centered header, then every visible section stacked in display
//! order under an accent heading. The only layout where `fontSize` and
//! `spacing` drive the whole page.

use crate::models::document::{Document, Section, ThemeSettings};
use crate::render::bodies::contact_details;
use crate::render::node::{Element, Node};
use crate::render::theme::{heading_px, px, section_gap_px, with_alpha};
use crate::render::{contact_info, display_name, root, section_body, section_frame, Slots};

pub fn render(document: &Document, slots: &Slots<'_>) -> Node {
    let theme = &document.theme_settings;

    let header = match slots.contact {
        Some(contact) => Some(header(contact, theme)),
        None if slots.contact_missing => Some(placeholder_header(theme)),
        None => None,
    };

    let body = Element::new("div")
        .class("sections")
        .style("display", "flex")
        .style("flex-direction", "column")
        .style("gap", px(section_gap_px(theme.spacing)))
        .children(
            slots
                .in_order
                .iter()
                .filter(|s| !slots.contact.is_some_and(|c| std::ptr::eq(c, **s)))
                .map(|s| section_block(s, theme)),
        );

    root(document)
        .style("padding", "32px")
        .child_opt(header)
        .child(body)
        .into()
}

fn name_heading(name: &str, theme: &ThemeSettings) -> Element {
    Element::new("h1")
        .class("name")
        .style("color", theme.accent_color.as_str())
        .style("font-size", px(heading_px(theme.font_size, 1)))
        .style("font-weight", "700")
        .text(name)
}

fn header(section: &Section, theme: &ThemeSettings) -> Element {
    let contact = contact_info(section);
    Element::new("header")
        .attr("data-section-id", section.id.as_str())
        .attr("data-section-type", section.section_type.as_str())
        .style("text-align", "center")
        .style("margin-bottom", px(section_gap_px(theme.spacing) + 8))
        .child(name_heading(display_name(&contact), theme))
        .child(
            Element::new("div")
                .class("contact-line")
                .style("display", "flex")
                .style("flex-wrap", "wrap")
                .style("justify-content", "center")
                .style("gap", "16px")
                .style("color", "#4b5563")
                .children(
                    contact_details(&contact, false)
                        .into_iter()
                        .map(|d| Element::new("span").text(d)),
                ),
        )
}

fn placeholder_header(theme: &ThemeSettings) -> Element {
    Element::new("header")
        .attr("data-placeholder", "contact")
        .style("text-align", "center")
        .child(name_heading(crate::render::NAME_PLACEHOLDER, theme))
}

fn section_block(section: &Section, theme: &ThemeSettings) -> Element {
    let accent = theme.accent_color.as_str();
    section_frame(section)
        .child(
            Element::new("h2")
                .class("section-title")
                .style("color", accent)
                .style("font-size", px(heading_px(theme.font_size, 2)))
                .style("border-bottom", format!("1px solid {}", with_alpha(accent, "40")))
                .style("padding-bottom", "4px")
                .style("margin-bottom", "12px")
                .text(section.title.as_str()),
        )
        .child(section_body(section, theme))
}

#[cfg(test)]
mod tests {
    use crate::models::document::{FontSize, Spacing, TemplateId};
    use crate::render::project;
    use crate::render::test_support::sample_document;

    #[test]
    fn test_hidden_summary_omits_heading_and_body() {
        let mut doc = sample_document(TemplateId::Minimal);
        let summary = doc.sections.iter_mut().find(|s| s.id == "summary").unwrap();
        summary.visible = false;
        let tree = project(&doc);
        let text = tree.text_content();
        assert!(!text.contains("Professional Summary"));
        assert!(!text.contains("Pioneering computer scientist"));
        assert!(tree.find_by_attr("data-section-id", "summary").is_none());
        // the rest is still there
        assert!(text.contains("Experience"));
    }

    #[test]
    fn test_contact_not_repeated_in_body() {
        let tree = project(&sample_document(TemplateId::Minimal));
        let header = tree.find_by_attr("data-section-id", "contact").unwrap();
        assert_eq!(header.tag, "header");
        assert!(!tree.text_content().contains("Contact Information"));
    }

    #[test]
    fn test_font_size_and_spacing_scale_output() {
        let mut small = sample_document(TemplateId::Minimal);
        small.theme_settings.font_size = FontSize::Sm;
        small.theme_settings.spacing = Spacing::Compact;
        let mut large = sample_document(TemplateId::Minimal);
        large.theme_settings.font_size = FontSize::Lg;
        large.theme_settings.spacing = Spacing::Relaxed;

        let small_root = project(&small);
        let large_root = project(&large);
        assert_eq!(small_root.as_element().unwrap().style["font-size"], "12px");
        assert_eq!(large_root.as_element().unwrap().style["font-size"], "16px");

        let gap = |tree: &crate::render::node::Node| {
            tree.elements()
                .into_iter()
                .find(|e| e.attrs.get("class").map(String::as_str) == Some("sections"))
                .map(|e| e.style["gap"].clone())
                .unwrap()
        };
        assert_eq!(gap(&small_root), "16px");
        assert_eq!(gap(&large_root), "32px");
    }

    #[test]
    fn test_accent_applied_to_headings() {
        let mut doc = sample_document(TemplateId::Minimal);
        doc.theme_settings.accent_color = "#0a0b0c".to_string();
        let tree = project(&doc);
        let headings: Vec<_> = tree.elements().into_iter().filter(|e| e.tag == "h2").collect();
        assert!(!headings.is_empty());
        assert!(headings.iter().all(|h| h.style["color"] == "#0a0b0c"));
        assert!(headings
            .iter()
            .all(|h| h.style["border-bottom"] == "1px solid #0a0b0c40"));
    }
}
