//! Modern: accent-filled sidebar (profile, contact, skills) beside a main
//! column (summary, experience timeline, education, then everything else).

use crate::models::document::{Document, Section, ThemeSettings};
use crate::models::payloads::{decode_or_default, ExperienceData, SkillsData};
use crate::render::bodies::{contact_details, date_range, education, text_el};
use crate::render::node::{Element, Node};
use crate::render::theme::{heading_px, item_gap_px, px, section_gap_px, with_alpha};
use crate::render::{
    contact_info, display_name, root, section_body, section_frame, Slots, NAME_PLACEHOLDER,
};

pub fn render(document: &Document, slots: &Slots<'_>) -> Node {
    let theme = &document.theme_settings;
    let gap = px(section_gap_px(theme.spacing));

    let mut sidebar = Element::new("aside")
        .attr("data-slot", "sidebar")
        .style("width", "33%")
        .style("padding", "24px")
        .style("background-color", theme.accent_color.as_str())
        .style("color", "#ffffff")
        .style("display", "flex")
        .style("flex-direction", "column")
        .style("gap", gap.clone());

    match slots.contact {
        Some(contact) => {
            sidebar = sidebar
                .child(profile(Some(contact), theme))
                .child(contact_block(contact));
        }
        None if slots.contact_missing => sidebar = sidebar.child(profile(None, theme)),
        None => {}
    }
    if let Some(skills) = slots.skills {
        sidebar = sidebar.child(skills_block(skills));
    }

    let main = Element::new("main")
        .attr("data-slot", "main")
        .style("width", "67%")
        .style("padding", "32px")
        .style("display", "flex")
        .style("flex-direction", "column")
        .style("gap", gap)
        .child_opt(slots.summary.map(|s| main_section(s, theme, section_body(s, theme))))
        .child_opt(slots.experience.map(|s| main_section(s, theme, timeline(s, theme))))
        .child_opt(slots.education.map(|s| main_section(s, theme, education(s, theme))))
        .children(slots.rest.iter().map(|s| main_section(s, theme, section_body(s, theme))));

    root(document)
        .style("display", "flex")
        .child(sidebar)
        .child(main)
        .into()
}

fn sidebar_heading(text: &str) -> Element {
    Element::new("h2")
        .style("font-size", "18px")
        .style("font-weight", "700")
        .style("text-transform", "uppercase")
        .style("letter-spacing", "0.05em")
        .style("margin-bottom", "12px")
        .text(text)
}

fn profile(section: Option<&Section>, theme: &ThemeSettings) -> Element {
    let contact = section.map(contact_info).unwrap_or_default();
    let initial = contact
        .full_name
        .trim()
        .chars()
        .next()
        .map_or_else(|| "U".to_string(), |c| c.to_string());
    let name = if section.is_some() {
        display_name(&contact).to_string()
    } else {
        NAME_PLACEHOLDER.to_string()
    };

    let block = Element::new("div").attr("data-slot", "profile");
    let block = match section {
        Some(s) => block
            .attr("data-section-id", s.id.as_str())
            .attr("data-section-type", s.section_type.as_str()),
        None => block.attr("data-placeholder", "contact"),
    };
    block
        .style("text-align", "center")
        .child(
            Element::new("div")
                .class("avatar")
                .style("width", "96px")
                .style("height", "96px")
                .style("border-radius", "9999px")
                .style("margin", "0 auto 16px")
                .style("background-color", "rgba(255, 255, 255, 0.2)")
                .child(
                    Element::new("span")
                        .style("font-size", px(heading_px(theme.font_size, 2) + 4))
                        .style("font-weight", "700")
                        .text(initial),
                ),
        )
        .child(
            Element::new("h1")
                .class("name")
                .style("font-size", px(heading_px(theme.font_size, 2) + 4))
                .style("font-weight", "700")
                .text(name),
        )
}

fn contact_block(section: &Section) -> Element {
    let contact = contact_info(section);
    Element::new("div")
        .attr("data-slot", "contact")
        .attr("data-section-id", section.id.as_str())
        .attr("data-section-type", section.section_type.as_str())
        .child(sidebar_heading("Contact"))
        .children(
            contact_details(&contact, false)
                .into_iter()
                .map(|d| Element::new("p").style("word-break", "break-word").text(d)),
        )
}

fn skills_block(section: &Section) -> Element {
    let skills: SkillsData = decode_or_default(&section.data).unwrap_or_default();
    section_frame(section)
        .child(sidebar_heading(&section.title))
        .children(skills.items.iter().map(|skill| {
            Element::new("div")
                .class("skill")
                .child(Element::new("p").text(skill.as_str()))
                .child(
                    Element::new("div")
                        .class("skill-track")
                        .style("background-color", "rgba(255, 255, 255, 0.2)")
                        .style("border-radius", "9999px")
                        .style("height", "8px")
                        .child(
                            Element::new("div")
                                .class("skill-bar")
                                .style("background-color", "#ffffff")
                                .style("border-radius", "9999px")
                                .style("height", "8px")
                                .style("width", "85%"),
                        ),
                )
        }))
}

fn main_section(section: &Section, theme: &ThemeSettings, body: impl Into<Node>) -> Element {
    section_frame(section)
        .child(
            Element::new("h2")
                .class("section-title")
                .style("color", theme.accent_color.as_str())
                .style("font-size", px(heading_px(theme.font_size, 2) + 4))
                .style("font-weight", "700")
                .style("margin-bottom", "16px")
                .text(section.title.as_str()),
        )
        .child(body)
}

/// Experience entries hung off a vertical line of accent dots.
fn timeline(section: &Section, theme: &ThemeSettings) -> Node {
    let Ok(data) = decode_or_default::<ExperienceData>(&section.data) else {
        return section_body(section, theme);
    };
    let accent = theme.accent_color.as_str();
    let last = data.items.len().saturating_sub(1);
    Element::new("div")
        .class("section-body timeline")
        .style("display", "flex")
        .style("flex-direction", "column")
        .style("gap", px(item_gap_px(theme.spacing)))
        .children(data.items.iter().enumerate().map(|(index, item)| {
            let meta = [
                date_range(&item.start_date, &item.end_date, item.current).unwrap_or_default(),
                item.location.clone(),
            ]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" • ");
            Element::new("div")
                .class("entry experience-entry")
                .attr("data-entry-id", item.id.as_str())
                .style("position", "relative")
                .style("padding-left", "24px")
                .child(
                    Element::new("div")
                        .class("timeline-dot")
                        .style("background-color", accent)
                        .style("border-radius", "9999px")
                        .style("width", "12px")
                        .style("height", "12px")
                        .style("position", "absolute")
                        .style("left", "0")
                        .style("top", "8px"),
                )
                .child_opt((index < last).then(|| {
                    Element::new("div")
                        .class("timeline-line")
                        .style("background-color", with_alpha(accent, "40"))
                        .style("width", "2px")
                        .style("position", "absolute")
                        .style("left", "5px")
                        .style("top", "24px")
                        .style("bottom", "0")
                }))
                .child_opt(text_el("h3", "entry-title", &item.position))
                .child_opt(text_el("p", "entry-org", &item.company))
                .child_opt(text_el("p", "entry-meta", &meta))
                .child_opt(text_el("p", "entry-description", &item.description))
        }))
        .into()
}
