//! The recipes page controller.
//!
//! [`RecipeBrowser`] owns the full collection for the page's lifetime and
//! derives everything else from it: the filtered subset, the revealed window,
//! the card listing and the detail overlay. All mutation goes through its
//! methods; there is no ambient state.

use tracing::{debug, warn};

use crate::error::ApiError;
use crate::filter::{FilterCriteria, distinct_cuisines};
use crate::listing::{CardView, Listing, NO_RESULTS, RecipeDetail};
use crate::recipe::{Recipe, RecipeId};
use crate::window::ViewWindow;

/// Where the collection is in its fetch lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The full collection is in memory.
    Loaded,
    /// The last fetch failed; the message is user-facing.
    Failed(String),
}

/// How the detail overlay was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// The explicit close control.
    CloseControl,
    /// A click outside the overlay content.
    Backdrop,
    /// The escape key.
    Escape,
}

/// The detail overlay. Holds content only while open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailOverlay {
    content: Option<RecipeDetail>,
}

impl DetailOverlay {
    /// Whether the overlay is showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.content.is_some()
    }

    /// The recipe being shown.
    #[must_use]
    pub const fn content(&self) -> Option<&RecipeDetail> {
        self.content.as_ref()
    }

    fn show(&mut self, detail: RecipeDetail) -> &RecipeDetail {
        self.content.insert(detail)
    }

    /// Close and clear. Returns whether it was open.
    pub fn dismiss(&mut self, reason: DismissReason) -> bool {
        let was_open = self.content.take().is_some();
        if was_open {
            debug!(?reason, "detail overlay dismissed");
        }
        was_open
    }
}

/// Page controller for the recipes surface.
#[derive(Debug, Clone, Default)]
pub struct RecipeBrowser {
    all: Vec<Recipe>,
    filtered: Vec<usize>,
    criteria: FilterCriteria,
    window: ViewWindow,
    cuisines: Vec<String>,
    overlay: DetailOverlay,
    state: LoadState,
}

impl RecipeBrowser {
    /// Empty browser with the default window (12, step 12).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty browser with a custom window.
    #[must_use]
    pub fn with_window(window: ViewWindow) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    /// Mark a fetch as started.
    pub fn begin_loading(&mut self) {
        self.state = LoadState::Loading;
    }

    /// Install a freshly fetched collection.
    pub fn load(&mut self, recipes: Vec<Recipe>) {
        debug!(count = recipes.len(), "recipe collection loaded");
        self.cuisines = distinct_cuisines(&recipes);
        self.all = recipes;
        self.state = LoadState::Loaded;
        self.refilter();
    }

    /// Record a failed fetch. The collection is left empty.
    pub fn fail(&mut self, error: &ApiError) {
        warn!(%error, "recipe fetch failed");
        self.all.clear();
        self.filtered.clear();
        self.cuisines.clear();
        self.overlay = DetailOverlay::default();
        self.window.reset();
        self.state = LoadState::Failed(error.user_message());
    }

    /// Apply the outcome of a fetch.
    pub fn apply_fetch(&mut self, result: Result<Vec<Recipe>, ApiError>) {
        match result {
            Ok(recipes) => self.load(recipes),
            Err(e) => self.fail(&e),
        }
    }

    /// Replace the criteria and recompute. Resets the window.
    pub fn set_filter(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refilter();
    }

    /// Replace only the text query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.criteria.query = query.into();
        self.refilter();
    }

    /// Replace only the cuisine constraint.
    pub fn set_cuisine(&mut self, cuisine: Option<String>) {
        self.criteria.cuisine = cuisine;
        self.refilter();
    }

    /// Step through "all cuisines" and each distinct cuisine.
    pub fn cycle_cuisine(&mut self, forward: bool) {
        let n = self.cuisines.len();
        if n == 0 {
            self.set_cuisine(None);
            return;
        }
        // Position 0 is "all", 1..=n are the cuisines.
        let current = self
            .criteria
            .cuisine
            .as_ref()
            .and_then(|c| self.cuisines.iter().position(|x| x == c))
            .map_or(0, |i| i + 1);
        let next = if forward {
            (current + 1) % (n + 1)
        } else {
            (current + n) % (n + 1)
        };
        let cuisine = next.checked_sub(1).map(|i| self.cuisines[i].clone());
        self.set_cuisine(cuisine);
    }

    fn refilter(&mut self) {
        self.filtered = self.criteria.apply(&self.all);
        self.window.reset();
        debug!(
            query = %self.criteria.query,
            cuisine = ?self.criteria.cuisine,
            matched = self.filtered.len(),
            "filter recomputed"
        );
    }

    /// Reveal one more step. Returns false when nothing was hidden.
    pub fn show_more(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.window.grow();
        true
    }

    /// Whether the "show more" control is visible.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.window.has_more(self.filtered.len())
    }

    /// The revealed recipes, in collection order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Recipe> {
        self.window
            .slice(&self.filtered)
            .iter()
            .map(|&i| &self.all[i])
            .collect()
    }

    /// Every recipe passing the current criteria.
    pub fn filtered(&self) -> impl Iterator<Item = &Recipe> + '_ {
        self.filtered.iter().map(|&i| &self.all[i])
    }

    /// Size of the filtered collection.
    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Project the revealed slice into cards.
    #[must_use]
    pub fn listing(&self) -> Listing {
        let cards: Vec<CardView> = self
            .visible()
            .into_iter()
            .map(CardView::from_recipe)
            .collect();
        Listing {
            placeholder: cards.is_empty().then_some(NO_RESULTS),
            show_more: self.has_more(),
            matched: self.filtered.len(),
            cards,
        }
    }

    /// Look a recipe up in the full collection.
    #[must_use]
    pub fn find(&self, id: RecipeId) -> Option<&Recipe> {
        self.all.iter().find(|r| r.id == id)
    }

    /// Open the overlay for `id`, looked up in the unfiltered collection.
    pub fn open_detail(&mut self, id: RecipeId) -> Option<&RecipeDetail> {
        let detail = RecipeDetail::from_recipe(self.find(id)?);
        debug!(id, "detail overlay opened");
        Some(self.overlay.show(detail))
    }

    /// Dismiss the overlay. Returns whether it was open.
    pub fn close_detail(&mut self, reason: DismissReason) -> bool {
        self.overlay.dismiss(reason)
    }

    /// The overlay state.
    #[must_use]
    pub const fn overlay(&self) -> &DetailOverlay {
        &self.overlay
    }

    /// The full collection.
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.all
    }

    /// Distinct cuisines in first-seen order.
    #[must_use]
    pub fn cuisines(&self) -> &[String] {
        &self.cuisines
    }

    /// Current criteria.
    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Current window.
    #[must_use]
    pub const fn window(&self) -> &ViewWindow {
        &self.window
    }

    /// Fetch lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipes(n: u64) -> Vec<Recipe> {
        (1..=n)
            .map(|id| {
                Recipe::new(id, format!("Recipe {id}"))
                    .with_cuisine(if id % 2 == 0 { "Italian" } else { "Mexican" })
            })
            .collect()
    }

    #[test]
    fn load_shows_initial_window() {
        let mut b = RecipeBrowser::new();
        b.load(recipes(20));
        assert_eq!(b.state(), &LoadState::Loaded);
        assert_eq!(b.visible().len(), 12);
        assert!(b.has_more());
    }

    #[test]
    fn show_more_caps_at_collection() {
        let mut b = RecipeBrowser::new();
        b.load(recipes(20));
        assert!(b.show_more());
        assert_eq!(b.visible().len(), 20);
        assert!(!b.has_more());
        assert!(!b.show_more());
        assert_eq!(b.window().visible(), 24);
    }

    #[test]
    fn show_more_keeps_criteria() {
        let mut b = RecipeBrowser::new();
        b.load(recipes(40));
        b.set_cuisine(Some("Italian".into()));
        assert_eq!(b.filtered_len(), 20);
        b.show_more();
        assert_eq!(b.criteria().cuisine.as_deref(), Some("Italian"));
        assert_eq!(b.visible().len(), 20);
    }

    #[test]
    fn every_recompute_resets_window() {
        let mut b = RecipeBrowser::new();
        b.load(recipes(40));
        b.show_more();
        b.set_query("recipe");
        assert_eq!(b.window().visible(), 12);
        b.show_more();
        b.set_cuisine(None);
        assert_eq!(b.window().visible(), 12);
        b.show_more();
        b.set_filter(FilterCriteria::all());
        assert_eq!(b.window().visible(), 12);
    }

    #[test]
    fn cycle_cuisine_wraps_through_all() {
        let mut b = RecipeBrowser::new();
        b.load(recipes(4));
        assert_eq!(b.cuisines(), ["Mexican", "Italian"]);
        b.cycle_cuisine(true);
        assert_eq!(b.criteria().cuisine.as_deref(), Some("Mexican"));
        b.cycle_cuisine(true);
        assert_eq!(b.criteria().cuisine.as_deref(), Some("Italian"));
        b.cycle_cuisine(true);
        assert_eq!(b.criteria().cuisine, None);
        b.cycle_cuisine(false);
        assert_eq!(b.criteria().cuisine.as_deref(), Some("Italian"));
    }

    #[test]
    fn fail_leaves_collection_empty() {
        let mut b = RecipeBrowser::new();
        b.load(recipes(5));
        b.apply_fetch(Err(ApiError::status(500, "Internal Server Error")));
        assert!(b.recipes().is_empty());
        assert!(matches!(b.state(), LoadState::Failed(msg) if msg.contains("500")));
        let listing = b.listing();
        assert!(listing.cards.is_empty());
        assert_eq!(listing.placeholder, Some(NO_RESULTS));
        assert!(!listing.show_more);
    }

    #[test]
    fn detail_and_dismiss() {
        let mut b = RecipeBrowser::new();
        b.load(recipes(3));
        assert_eq!(b.open_detail(2).map(|d| d.name.clone()).as_deref(), Some("Recipe 2"));
        assert!(b.overlay().is_open());
        assert!(b.close_detail(DismissReason::Backdrop));
        assert!(b.overlay().content().is_none());
        assert!(!b.close_detail(DismissReason::Escape));
    }

    #[test]
    fn unknown_detail_does_not_open() {
        let mut b = RecipeBrowser::new();
        b.load(recipes(3));
        assert!(b.open_detail(99).is_none());
        assert!(!b.overlay().is_open());
    }
}
