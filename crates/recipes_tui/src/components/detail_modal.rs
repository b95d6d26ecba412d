//! Full-recipe overlay.
//!
//! The overlay covers the whole screen: a centered bordered panel over an
//! empty backdrop. Its geometry is a pure function of the terminal size so
//! mouse clicks can be classified without keeping render state around.

use recipes_core::RecipeDetail;
use unicode_width::UnicodeWidthStr;

use super::{boxed, pad_right, truncate, wrap};
use crate::theme::{Theme, spacing};

/// Close control label, drawn at the right end of the header row.
pub const CLOSE_CONTROL: &str = "[x]";

const HINT: &str = "Esc, x or click outside to close · j/k scroll";

/// A screen rectangle in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left column.
    pub x: usize,
    /// Top row.
    pub y: usize,
    /// Columns.
    pub width: usize,
    /// Rows.
    pub height: usize,
}

impl Rect {
    /// Whether the cell is inside.
    #[must_use]
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Where a click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalHit {
    /// On the close control.
    CloseControl,
    /// Inside the panel.
    Panel,
    /// Outside the panel.
    Backdrop,
}

/// Scroll state for the overlay.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailModal {
    scroll: usize,
}

impl DetailModal {
    /// Overlay scrolled to the top.
    #[must_use]
    pub const fn new() -> Self {
        Self { scroll: 0 }
    }

    /// The panel's rectangle on a `width` x `height` screen.
    #[must_use]
    pub fn layout(width: usize, height: usize) -> Rect {
        let w = width
            .saturating_sub(4)
            .min(spacing::MAX_MODAL_WIDTH)
            .max(width.min(20));
        let h = height.saturating_sub(2).max(height.min(6));
        Rect {
            x: (width - w) / 2,
            y: (height - h) / 2,
            width: w,
            height: h,
        }
    }

    /// The close control's rectangle within `panel`.
    #[must_use]
    pub const fn close_control(panel: Rect) -> Rect {
        Rect {
            x: (panel.x + panel.width).saturating_sub(2 + 3),
            y: panel.y + 1,
            width: 3,
            height: 1,
        }
    }

    /// Classify a click at `(x, y)`.
    #[must_use]
    pub fn hit(width: usize, height: usize, x: usize, y: usize) -> ModalHit {
        let panel = Self::layout(width, height);
        if Self::close_control(panel).contains(x, y) {
            ModalHit::CloseControl
        } else if panel.contains(x, y) {
            ModalHit::Panel
        } else {
            ModalHit::Backdrop
        }
    }

    /// Current scroll offset.
    #[must_use]
    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    /// Back to the top.
    pub const fn reset(&mut self) {
        self.scroll = 0;
    }

    /// Scroll up by `n` rows.
    pub const fn scroll_up(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    /// Scroll down by `n` rows, stopping at the last page of `detail`.
    pub fn scroll_down(&mut self, n: usize, detail: &RecipeDetail, width: usize, height: usize) {
        let max = Self::max_scroll(detail, width, height);
        self.scroll = (self.scroll + n).min(max);
    }

    fn body_height(panel: Rect) -> usize {
        // Border top/bottom, header row, hint row.
        panel.height.saturating_sub(4)
    }

    fn max_scroll(detail: &RecipeDetail, width: usize, height: usize) -> usize {
        let panel = Self::layout(width, height);
        let lines = body_lines(&Theme::plain(), detail, panel.width.saturating_sub(4));
        lines.len().saturating_sub(Self::body_height(panel))
    }

    /// Render the full screen.
    #[must_use]
    pub fn view(&self, theme: &Theme, detail: &RecipeDetail, width: usize, height: usize) -> String {
        let panel = Self::layout(width, height);
        let inner = panel.width.saturating_sub(4);
        let body_height = Self::body_height(panel);

        let body = body_lines(theme, detail, inner);
        let scroll = self.scroll.min(body.len().saturating_sub(body_height));

        let mut rows = Vec::with_capacity(panel.height);
        let name = truncate(&detail.name, inner.saturating_sub(CLOSE_CONTROL.len() + 1));
        let gap = inner.saturating_sub(UnicodeWidthStr::width(name.as_str()) + CLOSE_CONTROL.len());
        rows.push(format!(
            "{}{}{}",
            theme.title_style().render(&name),
            " ".repeat(gap),
            theme.control_style().render(CLOSE_CONTROL)
        ));
        rows.extend(body.into_iter().skip(scroll).take(body_height));
        while rows.len() < body_height + 1 {
            rows.push(String::new());
        }
        rows.push(theme.muted_style().render(&truncate(HINT, inner)));

        let boxed = boxed(theme, &rows, panel.width, Some("Recipe"), true);
        let left = " ".repeat(panel.x);

        let mut screen = Vec::with_capacity(height);
        for _ in 0..panel.y {
            screen.push(" ".repeat(width));
        }
        for line in boxed {
            screen.push(pad_right(&format!("{left}{line}"), width));
        }
        while screen.len() < height {
            screen.push(" ".repeat(width));
        }
        screen.join("\n")
    }
}

fn section(theme: &Theme, out: &mut Vec<String>, title: &str) {
    out.push(String::new());
    out.push(theme.heading_style().render(title));
}

/// The scrollable body of the overlay, each line at most `width` columns.
fn body_lines(theme: &Theme, detail: &RecipeDetail, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let muted = theme.muted_style();

    out.push(muted.render(&truncate(
        &format!("{} · {}", detail.cuisine, detail.difficulty),
        width,
    )));
    out.push(format!(
        "{} {:.1} {}",
        theme.stars(detail.stars),
        detail.rating,
        muted.render(&format!("({} reviews)", detail.reviews))
    ));
    out.push(truncate(
        &format!(
            "Prep {} min · Cook {} min · Servings {} · {} kcal/serving",
            detail.prep_minutes, detail.cook_minutes, detail.servings, detail.calories
        ),
        width,
    ));
    if !detail.meal_types.is_empty() {
        out.push(truncate(&format!("Meal: {}", detail.meal_types.join(", ")), width));
    }
    out.push(muted.render(&truncate(&format!("Image: {}", detail.image), width)));

    section(theme, &mut out, "Ingredients");
    for ingredient in &detail.ingredients {
        for (i, line) in wrap(ingredient, width.saturating_sub(4)).into_iter().enumerate() {
            let bullet = if i == 0 { "  • " } else { "    " };
            out.push(format!("{bullet}{line}"));
        }
    }

    section(theme, &mut out, "Instructions");
    for (n, step) in detail.instructions.iter().enumerate() {
        let marker = format!("{:>3}. ", n + 1);
        let indent = " ".repeat(marker.len());
        for (i, line) in wrap(step, width.saturating_sub(marker.len())).into_iter().enumerate() {
            let prefix = if i == 0 { marker.as_str() } else { indent.as_str() };
            out.push(format!("{prefix}{line}"));
        }
    }

    if !detail.tags.is_empty() {
        section(theme, &mut out, "Tags");
        let tags = detail
            .tags
            .iter()
            .map(|t| format!("#{t}"))
            .collect::<Vec<_>>()
            .join(" ");
        for line in wrap(&tags, width) {
            out.push(theme.chip_style().render(&line));
        }
    }
    out
}
