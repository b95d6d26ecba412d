//! Colors and text styles.
//!
//! A [`Theme`] maps semantic roles (title, muted, error, ...) to crossterm
//! colors. Every style goes through [`Theme`] so that turning color off is a
//! single switch: with color disabled, [`Style::render`] returns its input
//! unchanged and the stars fall back to ASCII.

use std::fmt;

use crossterm::style::{Color, ContentStyle, Stylize};
use serde::{Deserialize, Serialize};

/// Layout constants.
pub mod spacing {
    /// Header height.
    pub const HEADER_HEIGHT: usize = 1;
    /// Footer height.
    pub const FOOTER_HEIGHT: usize = 1;
    /// Widest a card or the login form grows.
    pub const MAX_CONTENT_WIDTH: usize = 72;
    /// Widest the detail overlay grows.
    pub const MAX_MODAL_WIDTH: usize = 80;
    /// First screen row of page content: the header, then a blank row.
    pub const CONTENT_TOP: usize = HEADER_HEIGHT + 1;

    /// Rows left for page content on a terminal `height` rows tall.
    #[must_use]
    pub const fn content_height(height: usize) -> usize {
        height.saturating_sub(CONTENT_TOP + FOOTER_HEIGHT)
    }
}

/// Theme preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    /// Light text on a dark terminal.
    #[default]
    Dark,
    /// Dark text on a light terminal.
    Light,
}

impl ThemePreset {
    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for ThemePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

/// Semantic color tokens.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Which preset produced these colors.
    pub preset: ThemePreset,
    /// Whether styles emit escape sequences at all.
    pub color: bool,
    /// Brand accent: titles, focused borders.
    pub primary: Color,
    /// Tag chips.
    pub secondary: Color,
    /// Confirmation messages.
    pub success: Color,
    /// Star glyphs.
    pub warning: Color,
    /// Failures.
    pub error: Color,
    /// Controls such as "show more".
    pub info: Color,
    /// Body text.
    pub text: Color,
    /// Hints and secondary labels.
    pub text_muted: Color,
    /// Unfocused borders.
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark preset.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            preset: ThemePreset::Dark,
            color: true,
            primary: rgb(0xE8, 0x6A, 0x33),
            secondary: rgb(0xFF, 0x9F, 0x68),
            success: rgb(0x50, 0xC8, 0x78),
            warning: rgb(0xF5, 0xC2, 0x42),
            error: rgb(0xFF, 0x55, 0x55),
            info: rgb(0x5E, 0xB8, 0xFF),
            text: rgb(0xF0, 0xF0, 0xF0),
            text_muted: rgb(0x80, 0x80, 0x80),
            border: rgb(0x4A, 0x4A, 0x4A),
        }
    }

    /// Light preset.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            preset: ThemePreset::Light,
            color: true,
            primary: rgb(0xC0, 0x4B, 0x16),
            secondary: rgb(0xB8, 0x5C, 0x00),
            success: rgb(0x2F, 0x85, 0x5A),
            warning: rgb(0xB7, 0x79, 0x1F),
            error: rgb(0xC5, 0x30, 0x30),
            info: rgb(0x2B, 0x6C, 0xB0),
            text: rgb(0x1A, 0x20, 0x2C),
            text_muted: rgb(0x71, 0x80, 0x96),
            border: rgb(0xCB, 0xD5, 0xE0),
        }
    }

    /// Theme for a preset.
    #[must_use]
    pub const fn from_preset(preset: ThemePreset) -> Self {
        match preset {
            ThemePreset::Dark => Self::dark(),
            ThemePreset::Light => Self::light(),
        }
    }

    /// Same colors, escape sequences switched on or off.
    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// A theme that never emits escape sequences. Used by tests and headless
    /// output.
    #[must_use]
    pub const fn plain() -> Self {
        Self::dark().with_color(false)
    }

    fn style(&self, fg: Color) -> Style {
        Style {
            inner: ContentStyle::new().with(fg),
            enabled: self.color,
        }
    }

    /// Page and overlay titles.
    #[must_use]
    pub fn title_style(&self) -> Style {
        self.style(self.primary).bold()
    }

    /// Card names and section headings.
    #[must_use]
    pub fn heading_style(&self) -> Style {
        self.style(self.text).bold()
    }

    /// Body text.
    #[must_use]
    pub fn text_style(&self) -> Style {
        self.style(self.text)
    }

    /// Hints, labels, footers.
    #[must_use]
    pub fn muted_style(&self) -> Style {
        self.style(self.text_muted)
    }

    /// Positive messages.
    #[must_use]
    pub fn success_style(&self) -> Style {
        self.style(self.success)
    }

    /// Failure messages.
    #[must_use]
    pub fn error_style(&self) -> Style {
        self.style(self.error).bold()
    }

    /// Stars.
    #[must_use]
    pub fn star_style(&self) -> Style {
        self.style(self.warning)
    }

    /// Tag chips.
    #[must_use]
    pub fn chip_style(&self) -> Style {
        self.style(self.secondary).italic()
    }

    /// Actionable controls.
    #[must_use]
    pub fn control_style(&self) -> Style {
        self.style(self.info).underlined()
    }

    /// Borders; `focused` picks the accent.
    #[must_use]
    pub fn border_style(&self, focused: bool) -> Style {
        self.style(if focused { self.primary } else { self.border })
    }

    /// Star glyphs for a rating, ASCII when color is off.
    #[must_use]
    pub fn stars(&self, stars: recipes_core::StarRating) -> String {
        if self.color {
            self.star_style().render(&stars.to_string())
        } else {
            stars.to_ascii()
        }
    }
}

/// A foreground color plus attributes.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    inner: ContentStyle,
    enabled: bool,
}

impl Style {
    /// Bold.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.inner = self.inner.bold();
        self
    }

    /// Italic.
    #[must_use]
    pub fn italic(mut self) -> Self {
        self.inner = self.inner.italic();
        self
    }

    /// Underlined.
    #[must_use]
    pub fn underlined(mut self) -> Self {
        self.inner = self.inner.underlined();
        self
    }

    /// Reverse video, for the selected card marker.
    #[must_use]
    pub fn reverse(mut self) -> Self {
        self.inner = self.inner.reverse();
        self
    }

    /// Apply to `text`.
    #[must_use]
    pub fn render(&self, text: &str) -> String {
        if !self.enabled || text.is_empty() {
            return text.to_string();
        }
        self.inner.apply(text).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipes_core::StarRating;

    #[test]
    fn plain_theme_renders_verbatim() {
        let theme = Theme::plain();
        assert_eq!(theme.title_style().render("Recipes"), "Recipes");
        assert_eq!(theme.stars(StarRating::from_rating(3.5)), "***+.");
    }

    #[test]
    fn colored_theme_emits_escapes() {
        let theme = Theme::dark();
        let out = theme.error_style().render("boom");
        assert!(out.contains('\u{1b}'));
        assert!(out.contains("boom"));
        assert_eq!(theme.stars(StarRating::from_rating(5.0)), theme.star_style().render("★★★★★"));
    }

    #[test]
    fn presets_differ() {
        assert_ne!(
            format!("{:?}", Theme::dark().primary),
            format!("{:?}", Theme::light().primary)
        );
        assert_eq!(Theme::from_preset(ThemePreset::Light).preset, ThemePreset::Light);
        assert_eq!(ThemePreset::default().to_string(), "dark");
    }
}
