//! Creative: gradient banner carrying name, tagline and contact line, a
//! centered summary, then a two-column grid (experience left, skills and
//! education right). Anything else follows full-width.

use crate::models::document::{Document, Section, ThemeSettings};
use crate::models::payloads::{
    decode_or_default, EducationData, ExperienceData, SkillsData, SummaryData,
};
use crate::render::bodies::{chip, contact_details, date_range, text_el};
use crate::render::node::{Element, Node};
use crate::render::theme::{
    banner_gradient, heading_px, item_gap_px, px, section_gap_px, with_alpha,
};
use crate::render::{
    contact_info, display_name, root, section_body, section_frame, Slots, NAME_PLACEHOLDER,
};

const TAGLINE_CHARS: usize = 100;
const TAGLINE_FALLBACK: &str = "Professional Title";

pub fn render(document: &Document, slots: &Slots<'_>) -> Node {
    let theme = &document.theme_settings;
    let gap = px(section_gap_px(theme.spacing));

    let banner = match slots.contact {
        Some(contact) => Some(banner(Some(contact), slots.summary, theme)),
        None if slots.contact_missing => Some(banner(None, slots.summary, theme)),
        None => None,
    };

    let left = Element::new("div")
        .attr("data-slot", "left")
        .child_opt(slots.experience.map(|s| experience(s, theme)));
    let right = Element::new("div")
        .attr("data-slot", "right")
        .style("display", "flex")
        .style("flex-direction", "column")
        .style("gap", gap.clone())
        .child_opt(slots.skills.map(|s| skills(s, theme)))
        .child_opt(slots.education.map(|s| education(s, theme)));

    let body = Element::new("div")
        .class("body")
        .style("padding", "32px")
        .style("display", "flex")
        .style("flex-direction", "column")
        .style("gap", gap.clone())
        .child_opt(slots.summary.map(|s| summary(s, theme)))
        .child(
            Element::new("div")
                .class("grid")
                .style("display", "grid")
                .style("grid-template-columns", "2fr 1fr")
                .style("gap", gap)
                .child(left)
                .child(right),
        )
        .children(slots.rest.iter().map(|s| generic(s, theme)));

    root(document).child_opt(banner).child(body).into()
}

/// First [`TAGLINE_CHARS`] characters of the summary with an ellipsis, or a
/// stock title when there is no summary text to borrow from.
fn tagline(summary: Option<&Section>) -> String {
    let content = summary
        .and_then(|s| decode_or_default::<SummaryData>(&s.data).ok())
        .map(|s| s.content)
        .unwrap_or_default();
    if content.trim().is_empty() {
        return TAGLINE_FALLBACK.to_string();
    }
    let cut: String = content.chars().take(TAGLINE_CHARS).collect();
    format!("{cut}...")
}

fn banner(contact: Option<&Section>, summary: Option<&Section>, theme: &ThemeSettings) -> Element {
    let info = contact.map(contact_info).unwrap_or_default();
    let name = if contact.is_some() { display_name(&info) } else { NAME_PLACEHOLDER };

    let header = Element::new("header").attr("data-slot", "banner");
    let header = match contact {
        Some(s) => header
            .attr("data-section-id", s.id.as_str())
            .attr("data-section-type", s.section_type.as_str()),
        None => header.attr("data-placeholder", "contact"),
    };
    header
        .style("background", banner_gradient(&theme.accent_color))
        .style("color", "#ffffff")
        .style("text-align", "center")
        .style("padding", "48px 32px")
        .child(
            Element::new("h1")
                .class("name")
                .style("font-size", px(heading_px(theme.font_size, 1) + 8))
                .style("font-weight", "700")
                .text(name),
        )
        .child(
            Element::new("p")
                .class("tagline")
                .style("opacity", "0.9")
                .text(tagline(summary)),
        )
        .child(
            Element::new("div")
                .class("contact-line")
                .style("display", "flex")
                .style("flex-wrap", "wrap")
                .style("justify-content", "center")
                .style("gap", "24px")
                .children(
                    contact_details(&info, false)
                        .into_iter()
                        .map(|d| Element::new("span").text(d)),
                ),
        )
}

fn summary(section: &Section, theme: &ThemeSettings) -> Element {
    section_frame(section)
        .style("text-align", "center")
        .style("max-width", "768px")
        .style("margin", "0 auto")
        .child(
            Element::new("h2")
                .class("section-title")
                .style("font-size", px(heading_px(theme.font_size, 2) + 4))
                .style("font-weight", "700")
                .text(section.title.as_str()),
        )
        .child(
            Element::new("div")
                .class("accent-bar")
                .style("background-color", theme.accent_color.as_str())
                .style("width", "64px")
                .style("height", "4px")
                .style("margin", "0 auto 16px"),
        )
        .child(section_body(section, theme))
}

/// Heading drawn as a pill filled with the accent colour.
fn pill_heading(text: &str, theme: &ThemeSettings) -> Element {
    Element::new("h2")
        .class("section-title pill")
        .style("background-color", theme.accent_color.as_str())
        .style("color", "#ffffff")
        .style("border-radius", "9999px")
        .style("display", "inline-block")
        .style("padding", "4px 16px")
        .style("font-size", px(heading_px(theme.font_size, 2)))
        .text(text)
}

/// Heading underlined with an accent rule.
fn ruled_heading(text: &str, theme: &ThemeSettings) -> Element {
    Element::new("h2")
        .class("section-title")
        .style("color", theme.accent_color.as_str())
        .style("border-bottom", format!("2px solid {}", theme.accent_color))
        .style("padding-bottom", "4px")
        .style("font-size", px(heading_px(theme.font_size, 2)))
        .text(text)
}

fn card() -> Element {
    Element::new("div")
        .style("background-color", "#f9fafb")
        .style("border-radius", "8px")
        .style("padding", "16px")
}

fn experience(section: &Section, theme: &ThemeSettings) -> Element {
    let frame = section_frame(section).child(pill_heading(&section.title, theme));
    let Ok(data) = decode_or_default::<ExperienceData>(&section.data) else {
        return frame.child(section_body(section, theme));
    };
    frame.child(
        Element::new("div")
            .class("section-body cards")
            .style("display", "flex")
            .style("flex-direction", "column")
            .style("gap", px(item_gap_px(theme.spacing)))
            .children(data.items.iter().map(|item| {
                card()
                    .class("entry experience-entry")
                    .attr("data-entry-id", item.id.as_str())
                    .child_opt(text_el("h3", "entry-title", &item.position))
                    .child_opt(
                        text_el("p", "entry-org", &item.company)
                            .map(|e| e.style("color", theme.accent_color.as_str())),
                    )
                    .child_opt(
                        date_range(&item.start_date, &item.end_date, item.current)
                            .and_then(|d| text_el("p", "entry-dates", &d)),
                    )
                    .child_opt(text_el("p", "entry-description", &item.description))
            })),
    )
}

fn skills(section: &Section, theme: &ThemeSettings) -> Element {
    let frame = section_frame(section).child(ruled_heading(&section.title, theme));
    let Ok(data) = decode_or_default::<SkillsData>(&section.data) else {
        return frame.child(section_body(section, theme));
    };
    frame.child(
        Element::new("div")
            .class("section-body chips")
            .style("display", "flex")
            .style("flex-wrap", "wrap")
            .style("gap", "8px")
            .children(data.items.iter().map(|skill| {
                chip(skill, theme.accent_color.clone(), "#ffffff".to_string())
            })),
    )
}

fn education(section: &Section, theme: &ThemeSettings) -> Element {
    let frame = section_frame(section).child(ruled_heading(&section.title, theme));
    let Ok(data) = decode_or_default::<EducationData>(&section.data) else {
        return frame.child(section_body(section, theme));
    };
    frame.child(
        Element::new("div")
            .class("section-body cards")
            .style("display", "flex")
            .style("flex-direction", "column")
            .style("gap", px(item_gap_px(theme.spacing)))
            .children(data.items.iter().map(|item| {
                let dates = date_range(&item.start_date, &item.end_date, false).unwrap_or_default();
                card()
                    .class("entry education-entry")
                    .attr("data-entry-id", item.id.as_str())
                    .child_opt(text_el("h3", "entry-title", &item.degree))
                    .child_opt(text_el("p", "entry-org", &item.institution))
                    .child_opt(text_el("p", "entry-dates", &dates))
                    .child_opt(
                        item.gpa
                            .as_deref()
                            .and_then(|gpa| text_el("p", "entry-gpa", &format!("GPA: {gpa}"))),
                    )
            })),
    )
}

fn generic(section: &Section, theme: &ThemeSettings) -> Element {
    section_frame(section)
        .style("border-left", format!("4px solid {}", with_alpha(&theme.accent_color, "40")))
        .style("padding-left", "16px")
        .child(ruled_heading(&section.title, theme))
        .child(section_body(section, theme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::TemplateId;
    use crate::render::project;
    use crate::render::test_support::sample_document;
    use serde_json::json;

    #[test]
    fn test_banner_background_derives_from_accent() {
        let mut doc = sample_document(TemplateId::Creative);
        doc.theme_settings.accent_color = "#112233".to_string();
        let tree = project(&doc);
        let banner = tree.find_by_attr("data-slot", "banner").unwrap();
        assert_eq!(banner.tag, "header");
        assert!(banner.style["background"].contains("#112233"));
        assert_eq!(
            banner.style["background"],
            "linear-gradient(135deg, #112233 0%, #112233dd 100%)"
        );
    }

    #[test]
    fn test_tagline_truncates_summary() {
        let long = "x".repeat(150);
        let mut doc = sample_document(TemplateId::Creative);
        doc.sections[1].data = json!({ "content": long });
        assert_eq!(tagline(doc.section("summary")), format!("{}...", "x".repeat(100)));

        assert_eq!(
            tagline(sample_document(TemplateId::Creative).section("summary")),
            "Pioneering computer scientist and rear admiral...."
        );
    }

    #[test]
    fn test_tagline_falls_back_without_summary() {
        assert_eq!(tagline(None), TAGLINE_FALLBACK);

        let mut doc = sample_document(TemplateId::Creative);
        doc.sections[1].visible = false;
        let tree = project(&doc);
        let tagline_el = tree
            .elements()
            .into_iter()
            .find(|e| e.attrs.get("class").map(String::as_str) == Some("tagline"))
            .cloned()
            .unwrap();
        assert_eq!(Node::from(tagline_el).text_content(), TAGLINE_FALLBACK);
    }

    #[test]
    fn test_grid_columns_hold_expected_sections() {
        let tree = project(&sample_document(TemplateId::Creative));
        let left: Node = tree.find_by_attr("data-slot", "left").cloned().unwrap().into();
        let right: Node = tree.find_by_attr("data-slot", "right").cloned().unwrap().into();
        assert!(left.find_by_attr("data-section-id", "experience").is_some());
        assert!(right.find_by_attr("data-section-id", "skills").is_some());
        assert!(right.find_by_attr("data-section-id", "education").is_some());
        assert!(right.text_content().contains("GPA: 4.0"));
    }
}
