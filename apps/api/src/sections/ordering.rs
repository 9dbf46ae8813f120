//! Reorder and show/hide logic for a document's section list.
//!
//! Every function here is copy-on-write: it takes the current list by
//! reference and returns a new one, leaving the input untouched.

use crate::models::document::Section;

/// Sections in display order. The sort is stable, so equal `order` values
/// keep their insertion order.
pub fn sorted_by_order(sections: &[Section]) -> Vec<&Section> {
    let mut sorted: Vec<&Section> = sections.iter().collect();
    sorted.sort_by_key(|s| s.order);
    sorted
}

/// Visible sections in display order, as the templates lay them out.
pub fn visible_in_order(sections: &[Section]) -> Vec<&Section> {
    sorted_by_order(sections)
        .into_iter()
        .filter(|s| s.visible)
        .collect()
}

/// Rewrites every `order` to its position (0-based, contiguous).
pub fn renumber(sections: Vec<Section>) -> Vec<Section> {
    sections
        .into_iter()
        .enumerate()
        .map(|(index, section)| Section {
            order: index as i64,
            ..section
        })
        .collect()
}

/// Moves the section at display position `from` to display position `to`.
///
/// Positions refer to the list as the editor shows it (sorted by `order`).
/// The result is in its new positional sequence with `order` renumbered to
/// match. Returns `None` when either index is out of range.
pub fn move_section(sections: &[Section], from: usize, to: usize) -> Option<Vec<Section>> {
    if from >= sections.len() || to >= sections.len() {
        return None;
    }
    let mut reordered: Vec<Section> = sorted_by_order(sections).into_iter().cloned().collect();
    let moved = reordered.remove(from);
    reordered.insert(to, moved);
    Some(renumber(reordered))
}

/// Flips `visible` on one section; order and every other section are untouched.
/// Returns `None` when no section has that id.
pub fn toggle_visibility(sections: &[Section], section_id: &str) -> Option<Vec<Section>> {
    if !sections.iter().any(|s| s.id == section_id) {
        return None;
    }
    Some(
        sections
            .iter()
            .map(|s| {
                if s.id == section_id {
                    Section {
                        visible: !s.visible,
                        ..s.clone()
                    }
                } else {
                    s.clone()
                }
            })
            .collect(),
    )
}

/// Appends a section after the current last one in display order.
pub fn append_section(sections: &[Section], section: Section) -> Vec<Section> {
    let next_order = sections.iter().map(|s| s.order).max().map_or(0, |max| max.saturating_add(1));
    let mut appended = sections.to_vec();
    appended.push(Section {
        order: next_order,
        ..section
    });
    appended
}

/// Drops one section. Remaining `order` values are left as they are.
pub fn remove_section(sections: &[Section], section_id: &str) -> Option<Vec<Section>> {
    let remaining: Vec<Section> = sections
        .iter()
        .filter(|s| s.id != section_id)
        .cloned()
        .collect();
    (remaining.len() != sections.len()).then_some(remaining)
}
