//! Shared UI helpers.

use ratatui::style::{Color, Modifier, Style};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub(crate) const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub(crate) fn primary() -> Color {
    Color::Rgb(0xc7, 0x7d, 0xff)
}

pub(crate) fn muted() -> Color {
    Color::DarkGray
}

pub(crate) fn success() -> Color {
    Color::Green
}

pub(crate) fn failure() -> Color {
    Color::Red
}

pub(crate) fn highlight() -> Color {
    Color::Yellow
}

pub(crate) fn title_style() -> Style {
    Style::default().fg(primary()).add_modifier(Modifier::BOLD)
}

pub(crate) fn hint_style() -> Style {
    Style::default().fg(muted())
}

pub(crate) fn spinner_frame(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

pub(crate) fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Cut `text` to at most `max_width` columns, marking the cut with `…`.
pub(crate) fn truncate_to_display_width(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + width > budget {
            break;
        }
        used += width;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Break `text` into rows of at most `width` columns, ignoring word boundaries.
/// Always returns at least one row so blank input still occupies a line.
pub(crate) fn wrap_to_display_width(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > width && !row.is_empty() {
            rows.push(std::mem::take(&mut row));
            used = 0;
        }
        row.push(ch);
        used += ch_width;
    }
    rows.push(row);
    rows
}

#[cfg(test)]
#[path = "../../test/tui/ui/theme.rs"]
mod tests;
