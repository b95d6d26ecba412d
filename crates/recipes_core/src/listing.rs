//! Display projections of recipes.
//!
//! These types carry exactly what the presentation layer paints, so the
//! rendering rules (preview length, placeholders, star rounding, show-more
//! visibility) are decided and tested here rather than in the terminal code.

use crate::rating::StarRating;
use crate::recipe::{PLACEHOLDER, Recipe, RecipeId};

/// Ingredients shown on a card before truncation.
pub const INGREDIENT_PREVIEW: usize = 5;

/// Placeholder shown when the filtered collection is empty.
pub const NO_RESULTS: &str = "No recipes found matching your criteria.";

/// One card in the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    /// Identifier carried by the "view full recipe" control.
    pub id: RecipeId,
    /// Recipe name.
    pub name: String,
    /// Cuisine label.
    pub cuisine: String,
    /// Image URL.
    pub image: String,
    /// Preparation minutes.
    pub prep_minutes: u32,
    /// Cooking minutes.
    pub cook_minutes: u32,
    /// Difficulty label.
    pub difficulty: String,
    /// Raw rating.
    pub rating: f64,
    /// Rounded stars.
    pub stars: StarRating,
    /// First ingredients, comma separated, with an ellipsis if truncated.
    pub ingredient_preview: String,
    /// First tag, lowercased, or "recipe".
    pub chip: String,
}

impl CardView {
    /// Project a recipe into a card.
    #[must_use]
    pub fn from_recipe(recipe: &Recipe) -> Self {
        let mut preview = recipe
            .ingredients
            .iter()
            .take(INGREDIENT_PREVIEW)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        if preview.is_empty() {
            preview.push_str(PLACEHOLDER);
        } else if recipe.ingredients.len() > INGREDIENT_PREVIEW {
            preview.push_str(", …");
        }

        Self {
            id: recipe.id,
            name: recipe.display_name().to_string(),
            cuisine: recipe.display_cuisine().to_string(),
            image: recipe.display_image().to_string(),
            prep_minutes: recipe.prep_minutes(),
            cook_minutes: recipe.cook_minutes(),
            difficulty: recipe.display_difficulty().to_string(),
            rating: recipe.rating,
            stars: StarRating::from_rating(recipe.rating),
            ingredient_preview: preview,
            chip: recipe
                .tags
                .first()
                .map_or_else(|| "recipe".to_string(), |t| t.to_lowercase()),
        }
    }
}

/// The bounded, rendered view of the filtered collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Exactly `min(window, filtered)` cards, in collection order.
    pub cards: Vec<CardView>,
    /// Whether the "show more" control is visible.
    pub show_more: bool,
    /// Placeholder text shown instead of an empty list.
    pub placeholder: Option<&'static str>,
    /// Size of the filtered collection.
    pub matched: usize,
}

impl Listing {
    /// Status line: "Showing N of M recipes" or "No recipes found".
    #[must_use]
    pub fn status_line(&self) -> String {
        if self.matched == 0 {
            "No recipes found".to_string()
        } else {
            format!("Showing {} of {} recipes", self.cards.len(), self.matched)
        }
    }
}

/// All fields of one recipe, for the detail overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDetail {
    /// Identifier.
    pub id: RecipeId,
    /// Name.
    pub name: String,
    /// Image URL.
    pub image: String,
    /// Cuisine.
    pub cuisine: String,
    /// Difficulty.
    pub difficulty: String,
    /// Preparation minutes.
    pub prep_minutes: u32,
    /// Cooking minutes.
    pub cook_minutes: u32,
    /// Raw rating.
    pub rating: f64,
    /// Rounded stars.
    pub stars: StarRating,
    /// Review count, "-" when unknown.
    pub reviews: String,
    /// Servings, "-" when unknown.
    pub servings: String,
    /// Calories per serving, "-" when unknown.
    pub calories: String,
    /// Meal types.
    pub meal_types: Vec<String>,
    /// Every ingredient.
    pub ingredients: Vec<String>,
    /// Every tag.
    pub tags: Vec<String>,
    /// Ordered instructions.
    pub instructions: Vec<String>,
}

impl RecipeDetail {
    /// Project a recipe into its full detail.
    #[must_use]
    pub fn from_recipe(recipe: &Recipe) -> Self {
        let or_dash = |v: Option<u32>| v.map_or_else(|| PLACEHOLDER.to_string(), |n| n.to_string());
        Self {
            id: recipe.id,
            name: recipe.display_name().to_string(),
            image: recipe.display_image().to_string(),
            cuisine: recipe.display_cuisine().to_string(),
            difficulty: recipe.display_difficulty().to_string(),
            prep_minutes: recipe.prep_minutes(),
            cook_minutes: recipe.cook_minutes(),
            rating: recipe.rating,
            stars: StarRating::from_rating(recipe.rating),
            reviews: or_dash(recipe.review_count),
            servings: or_dash(recipe.servings),
            calories: or_dash(recipe.calories_per_serving),
            meal_types: recipe.meal_type.clone(),
            ingredients: recipe.ingredients.clone(),
            tags: recipe.tags.clone(),
            instructions: recipe.instructions.clone(),
        }
    }
}
