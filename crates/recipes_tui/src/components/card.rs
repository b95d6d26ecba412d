//! Recipe card.

use recipes_core::CardView;
use unicode_width::UnicodeWidthStr;

use super::{boxed, truncate};
use crate::theme::Theme;

/// Rows one card occupies, borders included.
pub const CARD_HEIGHT: usize = 8;

/// Row of the card, from its top border, holding [`VIEW_CONTROL`].
pub const CONTROL_ROW: usize = CARD_HEIGHT - 2;

/// Label of the per-card control that opens the detail overlay.
pub const VIEW_CONTROL: &str = "[ View full recipe ]";

/// Render `card` as a bordered block `width` columns wide.
///
/// The selected card gets the accent border and an active control.
#[must_use]
pub fn render_card(theme: &Theme, card: &CardView, width: usize, selected: bool) -> Vec<String> {
    let inner = width.saturating_sub(4);

    let chip = format!("#{}", card.chip);
    let chip_w = UnicodeWidthStr::width(chip.as_str());
    let name_room = inner.saturating_sub(chip_w + 1);
    let name = truncate(&card.name, name_room);
    let gap = inner.saturating_sub(UnicodeWidthStr::width(name.as_str()) + chip_w);
    let title = if chip_w < inner {
        format!(
            "{}{}{}",
            theme.heading_style().render(&name),
            " ".repeat(gap),
            theme.chip_style().render(&chip)
        )
    } else {
        theme.heading_style().render(&truncate(&card.name, inner))
    };

    let meta = truncate(
        &format!(
            "{} · {} · Prep {} min · Cook {} min",
            card.cuisine, card.difficulty, card.prep_minutes, card.cook_minutes
        ),
        inner,
    );

    let rating = format!("{} {:.1}", theme.stars(card.stars), card.rating);

    let ingredients = truncate(&format!("Ingredients: {}", card.ingredient_preview), inner);
    let image = truncate(&format!("Image: {}", card.image), inner);

    let control = if selected {
        theme.control_style().reverse().render(VIEW_CONTROL)
    } else {
        theme.control_style().render(VIEW_CONTROL)
    };

    let lines = vec![
        title,
        theme.muted_style().render(&meta),
        rating,
        theme.text_style().render(&ingredients),
        theme.muted_style().render(&image),
        control,
    ];
    boxed(theme, &lines, width, None, selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::visible_width;
    use recipes_core::Recipe;

    fn card() -> CardView {
        CardView::from_recipe(
            &Recipe::new(7, "Chicken Tikka Masala")
                .with_cuisine("Indian")
                .with_difficulty("Medium")
                .with_times(30, 40)
                .with_rating(4.3)
                .with_tags(["Curry", "Dinner"])
                .with_ingredients(["chicken", "yogurt", "garam masala", "tomato", "cream", "rice"]),
        )
    }

    #[test]
    fn card_has_fixed_height_and_width() {
        let lines = render_card(&Theme::plain(), &card(), 60, false);
        assert_eq!(lines.len(), CARD_HEIGHT);
        for line in &lines {
            assert_eq!(visible_width(line), 60, "{line:?}");
        }
    }

    #[test]
    fn card_shows_every_field() {
        let text = render_card(&Theme::plain(), &card(), 80, true).join("\n");
        assert!(text.contains("Chicken Tikka Masala"));
        assert!(text.contains("#curry"));
        assert!(text.contains("Indian · Medium · Prep 30 min · Cook 40 min"));
        assert!(text.contains("****+ 4.3"));
        assert!(text.contains("chicken, yogurt, garam masala, tomato, cream, …"));
        assert!(text.contains(VIEW_CONTROL));
    }

    #[test]
    fn narrow_card_truncates_instead_of_overflowing() {
        let lines = render_card(&Theme::plain(), &card(), 24, false);
        for line in &lines {
            assert_eq!(visible_width(line), 24, "{line:?}");
        }
    }
}
