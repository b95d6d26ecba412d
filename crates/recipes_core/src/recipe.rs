//! Recipe records as served by the remote API.
//!
//! Field names follow the API's camelCase JSON. Anything the API may omit is
//! optional or defaulted, and the accessor methods substitute neutral
//! placeholders so that a sparse record never fails to render.

use serde::{Deserialize, Serialize};

/// Unique recipe identifier.
pub type RecipeId = u64;

/// Placeholder shown for missing text fields.
pub const PLACEHOLDER: &str = "-";

/// One recipe, immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique identifier.
    pub id: RecipeId,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Cuisine, used as the filter category.
    #[serde(default)]
    pub cuisine: Option<String>,
    /// Ingredient lines.
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Ordered instruction steps.
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Average rating, nominally 0 to 5.
    #[serde(default)]
    pub rating: f64,
    /// Preparation time in minutes.
    #[serde(default)]
    pub prep_time_minutes: Option<u32>,
    /// Cooking time in minutes.
    #[serde(default)]
    pub cook_time_minutes: Option<u32>,
    /// Difficulty label ("Easy", "Medium", ...).
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Number of servings.
    #[serde(default)]
    pub servings: Option<u32>,
    /// Number of reviews behind the rating.
    #[serde(default)]
    pub review_count: Option<u32>,
    /// Calories per serving.
    #[serde(default)]
    pub calories_per_serving: Option<u32>,
    /// Meal types ("Dinner", "Snack", ...).
    #[serde(default)]
    pub meal_type: Vec<String>,
}

impl Recipe {
    /// Create a recipe with only an identifier and a name.
    pub fn new(id: RecipeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            cuisine: None,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            tags: Vec::new(),
            rating: 0.0,
            prep_time_minutes: None,
            cook_time_minutes: None,
            difficulty: None,
            image: None,
            servings: None,
            review_count: None,
            calories_per_serving: None,
            meal_type: Vec::new(),
        }
    }

    /// Set the cuisine.
    #[must_use]
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    /// Set the ingredient list.
    #[must_use]
    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    /// Set the instruction steps.
    #[must_use]
    pub fn with_instructions<I, S>(mut self, instructions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.instructions = instructions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the rating.
    #[must_use]
    pub const fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Set preparation and cooking times.
    #[must_use]
    pub const fn with_times(mut self, prep_minutes: u32, cook_minutes: u32) -> Self {
        self.prep_time_minutes = Some(prep_minutes);
        self.cook_time_minutes = Some(cook_minutes);
        self
    }

    /// Set the difficulty label.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    /// Set the image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Name, or "Untitled".
    pub fn display_name(&self) -> &str {
        non_empty(self.name.as_deref()).unwrap_or("Untitled")
    }

    /// Cuisine, or the placeholder.
    pub fn display_cuisine(&self) -> &str {
        non_empty(self.cuisine.as_deref()).unwrap_or(PLACEHOLDER)
    }

    /// Difficulty, or the placeholder.
    pub fn display_difficulty(&self) -> &str {
        non_empty(self.difficulty.as_deref()).unwrap_or(PLACEHOLDER)
    }

    /// Image URL, or the placeholder.
    pub fn display_image(&self) -> &str {
        non_empty(self.image.as_deref()).unwrap_or(PLACEHOLDER)
    }

    /// Preparation time, 0 when unknown.
    pub fn prep_minutes(&self) -> u32 {
        self.prep_time_minutes.unwrap_or(0)
    }

    /// Cooking time, 0 when unknown.
    pub fn cook_minutes(&self) -> u32 {
        self.cook_time_minutes.unwrap_or(0)
    }

    /// The cuisine used for exact-match filtering; empty when unknown.
    pub fn cuisine_key(&self) -> &str {
        self.cuisine.as_deref().unwrap_or("")
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// One page of the recipe collection, as returned by `/recipes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipePage {
    /// Recipes on this page, in server order.
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    /// Size of the whole collection as reported by the server.
    #[serde(default)]
    pub total: usize,
    /// Offset of this page.
    #[serde(default)]
    pub skip: usize,
    /// Page size the server applied.
    #[serde(default)]
    pub limit: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": 1,
        "name": "Classic Margherita Pizza",
        "ingredients": ["Pizza dough", "Tomato sauce", "Fresh mozzarella cheese"],
        "instructions": ["Preheat the oven to 475F.", "Bake for 12-15 minutes."],
        "prepTimeMinutes": 20,
        "cookTimeMinutes": 15,
        "servings": 4,
        "difficulty": "Easy",
        "cuisine": "Italian",
        "caloriesPerServing": 300,
        "tags": ["Pizza", "Italian"],
        "userId": 166,
        "image": "https://cdn.dummyjson.com/recipe-images/1.webp",
        "rating": 4.6,
        "reviewCount": 98,
        "mealType": ["Dinner"]
    }"#;

    #[test]
    fn deserializes_api_record() {
        let recipe: Recipe = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(recipe.id, 1);
        assert_eq!(recipe.display_name(), "Classic Margherita Pizza");
        assert_eq!(recipe.display_cuisine(), "Italian");
        assert_eq!(recipe.ingredients.len(), 3);
        assert_eq!(recipe.instructions.len(), 2);
        assert_eq!(recipe.prep_minutes(), 20);
        assert_eq!(recipe.cook_minutes(), 15);
        assert_eq!(recipe.review_count, Some(98));
        assert_eq!(recipe.calories_per_serving, Some(300));
        assert_eq!(recipe.meal_type, vec!["Dinner".to_string()]);
        assert!((recipe.rating - 4.6).abs() < f64::EPSILON);
    }

    #[test]
    fn sparse_record_uses_placeholders() {
        let recipe: Recipe = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(recipe.display_name(), "Untitled");
        assert_eq!(recipe.display_cuisine(), "-");
        assert_eq!(recipe.display_difficulty(), "-");
        assert_eq!(recipe.display_image(), "-");
        assert_eq!(recipe.prep_minutes(), 0);
        assert_eq!(recipe.cook_minutes(), 0);
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.tags.is_empty());
        assert!(recipe.rating.abs() < f64::EPSILON);
    }

    #[test]
    fn blank_strings_fall_back_to_placeholders() {
        let recipe: Recipe =
            serde_json::from_str(r#"{"id": 3, "name": "  ", "cuisine": ""}"#).unwrap();
        assert_eq!(recipe.display_name(), "Untitled");
        assert_eq!(recipe.display_cuisine(), "-");
    }

    #[test]
    fn page_deserializes_with_total() {
        let json = format!(r#"{{"recipes": [{SAMPLE}], "total": 50, "skip": 0, "limit": 1}}"#);
        let page: RecipePage = serde_json::from_str(&json).unwrap();
        assert_eq!(page.recipes.len(), 1);
        assert_eq!(page.total, 50);
    }

    #[test]
    fn builder_sets_fields() {
        let recipe = Recipe::new(2, "Soup")
            .with_cuisine("Thai")
            .with_tags(["spicy"])
            .with_times(5, 25)
            .with_difficulty("Medium");
        assert_eq!(recipe.cuisine_key(), "Thai");
        assert_eq!(recipe.tags, vec!["spicy".to_string()]);
        assert_eq!(recipe.cook_minutes(), 25);
        assert_eq!(recipe.display_difficulty(), "Medium");
    }
}
