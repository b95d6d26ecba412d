//! Non-interactive commands.
//!
//! Same data path as the browser (fetch, filter, window) rendered as plain
//! text for scripts and pipes.

use recipes_core::{
    ApiError, FetchStrategy, FilterCriteria, RecipeBrowser, RecipeSource, SessionGate,
    SessionStore, ViewWindow, fetch_all,
};

use crate::cli::ListArgs;
use crate::pages::REDIRECT_NOTICE;

/// Why `list` produced no listing.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    /// No session marker.
    #[error("{REDIRECT_NOTICE} Run `recipes` to log in.")]
    NotLoggedIn,
    /// The fetch failed.
    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),
}

/// Fetch, filter and render the listing as text.
///
/// # Errors
///
/// Returns [`ListError::NotLoggedIn`] without fetching when there is no
/// session, or [`ListError::Api`] when the fetch fails.
pub fn list<S: SessionStore + ?Sized>(
    source: &dyn RecipeSource,
    gate: &SessionGate<S>,
    strategy: FetchStrategy,
    window: ViewWindow,
    args: &ListArgs,
) -> Result<String, ListError> {
    if !gate.is_authenticated() {
        return Err(ListError::NotLoggedIn);
    }
    let recipes = fetch_all(source, strategy)?;

    let mut browser = RecipeBrowser::with_window(window);
    browser.load(recipes);
    let mut criteria = FilterCriteria::query(args.query.clone().unwrap_or_default());
    if let Some(cuisine) = &args.cuisine {
        criteria = criteria.with_cuisine(cuisine.clone());
    }
    browser.set_filter(criteria);
    if args.all {
        while browser.show_more() {}
    }

    let listing = browser.listing();
    let mut out = Vec::with_capacity(listing.cards.len() + 2);
    for card in &listing.cards {
        out.push(format!(
            "{:>4}  {}  [{}, {}, {:.1}]",
            card.id, card.name, card.cuisine, card.difficulty, card.rating
        ));
    }
    if let Some(placeholder) = listing.placeholder {
        out.push(placeholder.to_string());
    }
    out.push(listing.status_line());
    if listing.show_more {
        out.push("(use --all to list every match)".to_string());
    }
    Ok(out.join("\n"))
}

/// Text for `whoami`.
pub fn whoami<S: SessionStore + ?Sized>(gate: &SessionGate<S>) -> String {
    gate.session().map_or_else(
        || "Not logged in.".to_string(),
        |s| format!("Logged in as {}.", s.first_name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeSource, sample_recipes};
    use recipes_core::{MemorySessionStore, Session};
    use std::sync::Arc;

    fn gate(session: Option<Session>) -> SessionGate<MemorySessionStore> {
        SessionGate::new(Arc::new(
            session.map_or_else(MemorySessionStore::new, MemorySessionStore::with_session),
        ))
    }

    #[test]
    fn requires_session_and_does_not_fetch() {
        let source = FakeSource::new(sample_recipes());
        let err = list(
            &source,
            &gate(None),
            FetchStrategy::Single,
            ViewWindow::default(),
            &ListArgs::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ListError::NotLoggedIn));
        assert!(source.requests().is_empty());
    }

    #[test]
    fn lists_first_window_then_all() {
        let source = FakeSource::new(sample_recipes());
        let g = gate(Some(Session::new("Emily")));
        let text = list(&source, &g, FetchStrategy::Single, ViewWindow::default(), &ListArgs::default())
            .unwrap();
        assert!(text.contains("Showing 12 of 20 recipes"));
        assert!(text.contains("--all"));

        let all = ListArgs {
            all: true,
            ..ListArgs::default()
        };
        let text = list(&source, &g, FetchStrategy::Single, ViewWindow::default(), &all).unwrap();
        assert!(text.contains("Showing 20 of 20 recipes"));
    }

    #[test]
    fn query_and_cuisine() {
        let source = FakeSource::new(sample_recipes());
        let g = gate(Some(Session::new("Emily")));
        let args = ListArgs {
            query: Some("chicken".into()),
            ..ListArgs::default()
        };
        let text = list(&source, &g, FetchStrategy::Paged { page_size: 20 }, ViewWindow::default(), &args)
            .unwrap();
        assert!(text.contains("Chicken Alfredo"));
        assert!(text.ends_with("Showing 3 of 3 recipes"));

        let args = ListArgs {
            query: Some("chicken".into()),
            cuisine: Some("Mexican".into()),
            all: false,
        };
        let text = list(&source, &g, FetchStrategy::Single, ViewWindow::default(), &args).unwrap();
        assert!(text.contains("No recipes found matching your criteria."));
    }

    #[test]
    fn fetch_failure_is_user_facing() {
        let source = FakeSource::new(sample_recipes());
        source.fail_with(Some(500));
        let err = list(
            &source,
            &gate(Some(Session::new("Emily"))),
            FetchStrategy::Single,
            ViewWindow::default(),
            &ListArgs::default(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Failed to load recipes (500). Please try again.");
    }

    #[test]
    fn whoami_text() {
        assert_eq!(whoami(&gate(None)), "Not logged in.");
        assert_eq!(whoami(&gate(Some(Session::new("Emily")))), "Logged in as Emily.");
    }
}
