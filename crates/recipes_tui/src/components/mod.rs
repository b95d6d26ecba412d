//! Reusable rendering pieces.
//!
//! Everything here works on display width (via `unicode-width`) rather than
//! byte or char counts, and ignores ANSI escape sequences when measuring, so
//! styled text lines up the same as plain text.

mod card;
mod detail_modal;
mod text_input;

pub use card::{CARD_HEIGHT, CONTROL_ROW, VIEW_CONTROL, render_card};
pub use detail_modal::{DetailModal, ModalHit, Rect};
pub use text_input::{EchoMode, TextInput};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::Theme;

/// Remove CSI escape sequences.
#[must_use]
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            if chars.peek() == Some(&'[') {
                chars.next();
                // Parameters and intermediates, then one final byte in @..=~.
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}

/// Columns `s` occupies once escapes are removed.
#[must_use]
pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

/// Cut plain `text` to at most `width` columns, ending in "…" if cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Pad (possibly styled) `s` with spaces to `width` columns.
#[must_use]
pub fn pad_right(s: &str, width: usize) -> String {
    let w = visible_width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - w))
    }
}

/// Center (possibly styled) `s` in `width` columns.
#[must_use]
pub fn center(s: &str, width: usize) -> String {
    let w = visible_width(s);
    if w >= width {
        return s.to_string();
    }
    let left = (width - w) / 2;
    format!("{}{s}{}", " ".repeat(left), " ".repeat(width - w - left))
}

/// Greedy word wrap of plain `text` to `width` columns. Words longer than
/// the width are truncated.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let word = truncate(word, width);
        let needed = if line.is_empty() {
            UnicodeWidthStr::width(word.as_str())
        } else {
            UnicodeWidthStr::width(line.as_str()) + 1 + UnicodeWidthStr::width(word.as_str())
        };
        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&word);
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// Draw a rounded border around `lines`, `width` columns wide in total.
///
/// An optional `title` is set into the top edge. Lines wider than the inner
/// width must be truncated by the caller.
#[must_use]
pub fn boxed(
    theme: &Theme,
    lines: &[String],
    width: usize,
    title: Option<&str>,
    focused: bool,
) -> Vec<String> {
    let border = theme.border_style(focused);
    let inner = width.saturating_sub(4);
    let rule = width.saturating_sub(2);

    let top = match title {
        Some(title) => {
            let title = truncate(title, rule.saturating_sub(3));
            let used = UnicodeWidthStr::width(title.as_str()) + 2;
            format!(
                "{}{}{}",
                border.render("╭─"),
                theme.title_style().render(&format!(" {title} ")),
                border.render(&format!("{}╮", "─".repeat(rule.saturating_sub(used + 1))))
            )
        }
        None => border.render(&format!("╭{}╮", "─".repeat(rule))),
    };

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(top);
    let side = border.render("│");
    for line in lines {
        out.push(format!("{side} {} {side}", pad_right(line, inner)));
    }
    out.push(border.render(&format!("╰{}╯", "─".repeat(rule))));
    out
}

/// Fit `lines` into exactly `height` rows of `width` columns.
#[must_use]
pub fn fill(lines: Vec<String>, width: usize, height: usize) -> Vec<String> {
    let mut lines: Vec<String> = lines
        .into_iter()
        .take(height)
        .map(|l| pad_right(&l, width))
        .collect();
    while lines.len() < height {
        lines.push(" ".repeat(width));
    }
    lines
}
