//! Search and cuisine filtering over the in-memory collection.

use crate::recipe::Recipe;

/// Current search text and cuisine selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Free-text query as typed (normalized when matching).
    pub query: String,
    /// Exact cuisine to keep, or `None` for all cuisines.
    pub cuisine: Option<String>,
}

impl FilterCriteria {
    /// Criteria that keep every recipe.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Criteria with only a text query.
    #[must_use]
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            cuisine: None,
        }
    }

    /// Add a cuisine constraint.
    #[must_use]
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    /// The query trimmed and lowercased, as used for matching.
    #[must_use]
    pub fn normalized_query(&self) -> String {
        self.query.trim().to_lowercase()
    }

    /// Whether these criteria keep everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cuisine.is_none() && self.query.trim().is_empty()
    }

    /// Whether a recipe satisfies the criteria.
    #[must_use]
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.matches_normalized(recipe, &self.normalized_query())
    }

    fn matches_normalized(&self, recipe: &Recipe, needle: &str) -> bool {
        if let Some(cuisine) = &self.cuisine {
            if recipe.cuisine_key() != cuisine {
                return false;
            }
        }
        needle.is_empty() || searchable_fields(recipe).iter().any(|f| f.contains(needle))
    }

    /// Indices of matching recipes, in collection order.
    #[must_use]
    pub fn apply(&self, recipes: &[Recipe]) -> Vec<usize> {
        let needle = self.normalized_query();
        recipes
            .iter()
            .enumerate()
            .filter(|(_, r)| self.matches_normalized(r, &needle))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Lowercased name, cuisine, joined ingredients and joined tags.
fn searchable_fields(recipe: &Recipe) -> [String; 4] {
    [
        recipe.name.as_deref().unwrap_or("").to_lowercase(),
        recipe.cuisine_key().to_lowercase(),
        recipe.ingredients.join(" ").to_lowercase(),
        recipe.tags.join(" ").to_lowercase(),
    ]
}

/// Distinct cuisines in first-seen order, skipping blanks.
#[must_use]
pub fn distinct_cuisines(recipes: &[Recipe]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for recipe in recipes {
        let cuisine = recipe.cuisine_key();
        if !cuisine.trim().is_empty() && !seen.iter().any(|c| c == cuisine) {
            seen.push(cuisine.to_string());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Recipe> {
        vec![
            Recipe::new(1, "Chicken Alfredo")
                .with_cuisine("Italian")
                .with_ingredients(["Fettuccine", "Chicken breast"]),
            Recipe::new(2, "Veggie Stir-Fry")
                .with_cuisine("Asian")
                .with_ingredients(["Tofu", "Broccoli"])
                .with_tags(["Vegetarian", "Quick"]),
            Recipe::new(3, "Margherita Pizza")
                .with_cuisine("Italian")
                .with_tags(["Pizza"]),
            Recipe::new(4, "Pad Thai")
                .with_cuisine("Thai")
                .with_ingredients(["Rice noodles", "Shrimp"]),
        ]
    }

    #[test]
    fn empty_criteria_keep_everything() {
        let recipes = sample();
        assert_eq!(FilterCriteria::all().apply(&recipes), vec![0, 1, 2, 3]);
        assert_eq!(FilterCriteria::query("   ").apply(&recipes), vec![0, 1, 2, 3]);
    }

    #[test]
    fn query_is_case_insensitive_and_trimmed() {
        let recipes = sample();
        assert_eq!(FilterCriteria::query("  CHICKEN ").apply(&recipes), vec![0]);
    }

    #[test]
    fn query_matches_every_searchable_field() {
        let recipes = sample();
        // name
        assert_eq!(FilterCriteria::query("pizza").apply(&recipes), vec![2]);
        // cuisine
        assert_eq!(FilterCriteria::query("thai").apply(&recipes), vec![3]);
        // ingredients
        assert_eq!(FilterCriteria::query("tofu").apply(&recipes), vec![1]);
        // tags
        assert_eq!(FilterCriteria::query("vegetarian").apply(&recipes), vec![1]);
    }

    #[test]
    fn cuisine_is_exact_and_combines_with_query() {
        let recipes = sample();
        let italian = FilterCriteria::all().with_cuisine("Italian");
        assert_eq!(italian.apply(&recipes), vec![0, 2]);

        let italian_pizza = FilterCriteria::query("pizza").with_cuisine("Italian");
        assert_eq!(italian_pizza.apply(&recipes), vec![2]);

        let lowercase = FilterCriteria::all().with_cuisine("italian");
        assert!(lowercase.apply(&recipes).is_empty());
    }

    #[test]
    fn no_match_yields_empty() {
        let recipes = sample();
        assert!(FilterCriteria::query("sushi").apply(&recipes).is_empty());
    }

    #[test]
    fn distinct_cuisines_in_first_seen_order() {
        let mut recipes = sample();
        recipes.push(Recipe::new(5, "Mystery"));
        assert_eq!(distinct_cuisines(&recipes), vec!["Italian", "Asian", "Thai"]);
    }

    #[test]
    fn is_empty_reflects_constraints() {
        assert!(FilterCriteria::all().is_empty());
        assert!(FilterCriteria::query(" ").is_empty());
        assert!(!FilterCriteria::query("a").is_empty());
        assert!(!FilterCriteria::all().with_cuisine("Thai").is_empty());
    }
}
