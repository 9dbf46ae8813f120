//! Maps theme settings onto concrete typographic and colour values.

use crate::models::document::{FontSize, Spacing};

/// Base body font size in px.
pub fn base_font_px(size: FontSize) -> u32 {
    match size {
        FontSize::Sm => 12,
        FontSize::Md => 14,
        FontSize::Lg => 16,
    }
}

/// Heading sizes scale with the body size so `sm`/`lg` shift the whole page.
pub fn heading_px(size: FontSize, level: u8) -> u32 {
    let base = base_font_px(size);
    match level {
        1 => base * 2 + base / 7 * 2,
        2 => base + base / 2 - 1,
        _ => base + 2,
    }
}

/// Vertical gap between sections in px.
pub fn section_gap_px(spacing: Spacing) -> u32 {
    match spacing {
        Spacing::Compact => 16,
        Spacing::Normal => 24,
        Spacing::Relaxed => 32,
    }
}

/// Gap between entries inside a section in px.
pub fn item_gap_px(spacing: Spacing) -> u32 {
    section_gap_px(spacing) * 2 / 3
}

pub fn px(value: u32) -> String {
    format!("{value}px")
}

/// Appends a two-digit hex alpha channel to a hex colour.
///
/// `#abc` is expanded to `#aabbcc` first. Colours that are not hex notation
/// (named colours, `rgb(...)`) come back unchanged since they cannot carry a
/// suffix.
pub fn with_alpha(color: &str, alpha: &str) -> String {
    let Some(hex) = color.strip_prefix('#') else {
        return color.to_string();
    };
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return color.to_string();
    }
    match hex.len() {
        3 => {
            let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
            format!("#{expanded}{alpha}")
        }
        6 => format!("#{hex}{alpha}"),
        _ => color.to_string(),
    }
}

/// Background for the creative template's header banner.
pub fn banner_gradient(accent: &str) -> String {
    format!(
        "linear-gradient(135deg, {accent} 0%, {} 100%)",
        with_alpha(accent, "dd")
    )
}
