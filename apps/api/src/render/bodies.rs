//! Default body renderers for each section type, as registered in the
//! section registry. Templates use these for every section they do not lay
//! out themselves.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::document::{Section, ThemeSettings};
use crate::models::payloads::{
    decode_or_default, CertificationsData, ContactInfo, EducationData, EducationItem,
    ExperienceData, ExperienceItem, HobbiesData, LanguagesData, ProjectsData, SkillsData,
    SummaryData,
};
use crate::render::node::{Element, Node};
use crate::render::theme::{item_gap_px, px, with_alpha};

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

/// Decodes the section payload and draws it, or draws an inert notice when
/// the payload does not match the section type.
fn render_with<T, F>(section: &Section, draw: F) -> Node
where
    T: DeserializeOwned + Default,
    F: FnOnce(T) -> Element,
{
    match decode_or_default::<T>(&section.data) {
        Ok(data) => draw(data).into(),
        Err(err) => {
            debug!(
                "Section {} holds malformed {} data: {err}",
                section.id, section.section_type
            );
            body("malformed")
                .attr("data-placeholder", "malformed")
                .child(Element::new("p").text("This section could not be displayed"))
                .into()
        }
    }
}

fn body(kind: &str) -> Element {
    Element::new("div").class(&format!("section-body {kind}"))
}

/// `Some(element)` holding `text`, or `None` when the text is blank.
pub fn text_el(tag: &'static str, class: &str, text: &str) -> Option<Element> {
    (!text.trim().is_empty()).then(|| Element::new(tag).class(class).text(text))
}

/// "start - end", "start - Present" when current; `None` when there are no dates.
pub fn date_range(start: &str, end: &str, current: bool) -> Option<String> {
    let end = if current { "Present" } else { end };
    match (start.is_empty(), end.is_empty()) {
        (true, true) => None,
        (false, true) => Some(start.to_string()),
        (true, false) => Some(end.to_string()),
        (false, false) => Some(format!("{start} - {end}")),
    }
}

/// Non-empty contact details in display order.
pub fn contact_details(contact: &ContactInfo, with_links: bool) -> Vec<&str> {
    let mut details = vec![
        contact.email.as_str(),
        contact.phone.as_str(),
        contact.location.as_str(),
        contact.website.as_str(),
    ];
    if with_links {
        details.push(contact.linkedin.as_str());
        details.push(contact.github.as_str());
    }
    details.into_iter().filter(|d| !d.trim().is_empty()).collect()
}

pub fn chip(text: &str, background: String, color: String) -> Element {
    Element::new("span")
        .class("chip")
        .style("background-color", background)
        .style("color", color)
        .style("border-radius", "9999px")
        .style("padding", "2px 8px")
        .text(text)
}

fn entry_list(theme: &ThemeSettings) -> Element {
    Element::new("div")
        .class("entries")
        .style("display", "flex")
        .style("flex-direction", "column")
        .style("gap", px(item_gap_px(theme.spacing)))
}

// ────────────────────────────────────────────────────────────────────────────
// Entry renderers shared with templates
// ────────────────────────────────────────────────────────────────────────────

pub fn experience_entry(item: &ExperienceItem) -> Element {
    Element::new("div")
        .class("entry experience-entry")
        .attr("data-entry-id", item.id.as_str())
        .child(
            Element::new("div")
                .class("entry-head")
                .child(
                    Element::new("div")
                        .child_opt(text_el("h3", "entry-title", &item.position))
                        .child_opt(text_el("p", "entry-org", &item.company)),
                )
                .child(
                    Element::new("div")
                        .class("entry-meta")
                        .child_opt(text_el("p", "entry-location", &item.location))
                        .child_opt(
                            date_range(&item.start_date, &item.end_date, item.current)
                                .and_then(|d| text_el("p", "entry-dates", &d)),
                        ),
                ),
        )
        .child_opt(text_el("p", "entry-description", &item.description))
}

pub fn education_entry(item: &EducationItem) -> Element {
    Element::new("div")
        .class("entry education-entry")
        .attr("data-entry-id", item.id.as_str())
        .child(
            Element::new("div")
                .child_opt(text_el("h3", "entry-title", &item.degree))
                .child_opt(text_el("p", "entry-org", &item.institution))
                .child_opt(text_el("p", "entry-field", &item.field))
                .child_opt(
                    item.gpa
                        .as_deref()
                        .and_then(|gpa| text_el("p", "entry-gpa", &format!("GPA: {gpa}"))),
                ),
        )
        .child(
            Element::new("div")
                .class("entry-meta")
                .child_opt(text_el("p", "entry-location", &item.location))
                .child_opt(
                    date_range(&item.start_date, &item.end_date, false)
                        .and_then(|d| text_el("p", "entry-dates", &d)),
                ),
        )
        .child_opt(text_el("p", "entry-description", &item.description))
}

// ────────────────────────────────────────────────────────────────────────────
// Registered renderers
// ────────────────────────────────────────────────────────────────────────────

pub fn contact(section: &Section, _theme: &ThemeSettings) -> Node {
    render_with(section, |contact: ContactInfo| {
        body("contact")
            .child_opt(text_el("p", "contact-name", &contact.full_name))
            .children(
                contact_details(&contact, true)
                    .into_iter()
                    .map(|d| Element::new("span").class("contact-detail").text(d)),
            )
    })
}

pub fn summary(section: &Section, _theme: &ThemeSettings) -> Node {
    render_with(section, |summary: SummaryData| {
        body("summary").child_opt(text_el("p", "summary-text", &summary.content))
    })
}

pub fn experience(section: &Section, theme: &ThemeSettings) -> Node {
    render_with(section, |data: ExperienceData| {
        body("experience").child(entry_list(theme).children(data.items.iter().map(experience_entry)))
    })
}

pub fn education(section: &Section, theme: &ThemeSettings) -> Node {
    render_with(section, |data: EducationData| {
        body("education").child(entry_list(theme).children(data.items.iter().map(education_entry)))
    })
}

pub fn skills(section: &Section, theme: &ThemeSettings) -> Node {
    let accent = theme.accent_color.as_str();
    render_with(section, |data: SkillsData| {
        body("skills").style("display", "flex").style("flex-wrap", "wrap").style("gap", "8px").children(
            data.items
                .iter()
                .map(|skill| chip(skill, with_alpha(accent, "20"), accent.to_string())),
        )
    })
}

pub fn projects(section: &Section, theme: &ThemeSettings) -> Node {
    let accent = theme.accent_color.as_str();
    render_with(section, |data: ProjectsData| {
        body("projects").child(entry_list(theme).children(data.items.iter().map(|item| {
            Element::new("div")
                .class("entry project-entry")
                .attr("data-entry-id", item.id.as_str())
                .child_opt(text_el("h3", "entry-title", &item.name))
                .child_opt(
                    date_range(&item.start_date, &item.end_date, false)
                        .and_then(|d| text_el("p", "entry-dates", &d)),
                )
                .child_opt(text_el("p", "entry-description", &item.description))
                .child_opt((!item.technologies.is_empty()).then(|| {
                    Element::new("p")
                        .class("entry-technologies")
                        .style("color", accent)
                        .text(item.technologies.join(" · "))
                }))
                .child_opt(item.url.as_deref().and_then(|u| text_el("p", "entry-link", u)))
                .child_opt(item.github.as_deref().and_then(|u| text_el("p", "entry-link", u)))
        })))
    })
}

pub fn certifications(section: &Section, theme: &ThemeSettings) -> Node {
    render_with(section, |data: CertificationsData| {
        body("certifications").child(entry_list(theme).children(data.items.iter().map(|item| {
            let issued = [item.issuer.as_str(), item.date.as_str()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" · ");
            Element::new("div")
                .class("entry certification-entry")
                .attr("data-entry-id", item.id.as_str())
                .child_opt(text_el("h3", "entry-title", &item.name))
                .child_opt(text_el("p", "entry-org", &issued))
                .child_opt(item.url.as_deref().and_then(|u| text_el("p", "entry-link", u)))
        })))
    })
}

pub fn languages(section: &Section, _theme: &ThemeSettings) -> Node {
    render_with(section, |data: LanguagesData| {
        body("languages").child(Element::new("ul").children(data.items.iter().filter(|i| !i.language.is_empty()).map(
            |item| {
                let line = if item.proficiency.is_empty() {
                    item.language.clone()
                } else {
                    format!("{} - {}", item.language, item.proficiency)
                };
                Element::new("li").attr("data-entry-id", item.id.as_str()).text(line)
            },
        )))
    })
}

pub fn hobbies(section: &Section, _theme: &ThemeSettings) -> Node {
    render_with(section, |data: HobbiesData| {
        body("hobbies").child_opt(
            (!data.items.is_empty()).then(|| Element::new("p").text(data.items.join(" · "))),
        )
    })
}

pub fn not_implemented(_section: &Section, _theme: &ThemeSettings) -> Node {
    body("placeholder")
        .attr("data-placeholder", "not-implemented")
        .style("color", "#9ca3af")
        .text("Section type not implemented")
        .into()
}
