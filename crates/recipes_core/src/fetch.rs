//! Retrieving the full recipe collection.
//!
//! Two strategies produce the same result, the whole collection in server
//! order:
//!
//! | Strategy | Requests |
//! |----------|----------|
//! | [`FetchStrategy::Single`] | one request with `limit=0` (no limit) |
//! | [`FetchStrategy::Paged`] | `limit=N&skip=0`, then `skip=N`, `skip=2N`, ... until `total` |
//!
//! Failures are fail-fast: the first error aborts the remaining requests and
//! discards anything already fetched.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::recipe::{Recipe, RecipePage};

/// Default page size for [`FetchStrategy::Paged`].
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// A paged source of recipes.
pub trait RecipeSource {
    /// Fetch one page. `limit == 0` means "no limit".
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status, or an
    /// unexpected body.
    fn fetch_page(&self, limit: usize, skip: usize) -> Result<RecipePage, ApiError>;
}

impl<S: RecipeSource + ?Sized> RecipeSource for &S {
    fn fetch_page(&self, limit: usize, skip: usize) -> Result<RecipePage, ApiError> {
        (**self).fetch_page(limit, skip)
    }
}

impl<S: RecipeSource + ?Sized> RecipeSource for std::sync::Arc<S> {
    fn fetch_page(&self, limit: usize, skip: usize) -> Result<RecipePage, ApiError> {
        (**self).fetch_page(limit, skip)
    }
}

/// How to retrieve the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum FetchStrategy {
    /// One unbounded request.
    Single,
    /// Sequential fixed-size pages.
    Paged {
        /// Recipes per request.
        page_size: usize,
    },
}

impl Default for FetchStrategy {
    fn default() -> Self {
        Self::Paged {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Fetch the whole collection using `strategy`.
///
/// # Errors
///
/// Returns the first [`ApiError`] encountered; nothing partial is returned.
pub fn fetch_all<S: RecipeSource + ?Sized>(
    source: &S,
    strategy: FetchStrategy,
) -> Result<Vec<Recipe>, ApiError> {
    let recipes = match strategy {
        FetchStrategy::Single => source.fetch_page(0, 0)?.recipes,
        FetchStrategy::Paged { page_size } => fetch_paged(source, page_size.max(1))?,
    };
    info!(count = recipes.len(), ?strategy, "recipe collection fetched");
    Ok(recipes)
}

fn fetch_paged<S: RecipeSource + ?Sized>(
    source: &S,
    page_size: usize,
) -> Result<Vec<Recipe>, ApiError> {
    let first = source.fetch_page(page_size, 0)?;
    let total = first.total;
    let mut skip = page_size;
    let mut acc = first.recipes;
    debug!(total, fetched = acc.len(), "first recipe page");

    while skip < total {
        let page = source.fetch_page(page_size, skip)?;
        if page.recipes.is_empty() {
            debug!(skip, total, "empty page before reported total; stopping");
            break;
        }
        acc.extend(page.recipes);
        skip += page_size;
        debug!(skip, total, fetched = acc.len(), "recipe page");
    }

    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// In-memory source recording every request.
    struct FakeSource {
        recipes: Vec<Recipe>,
        reported_total: usize,
        fail_at_skip: Option<usize>,
        requests: Mutex<Vec<(usize, usize)>>,
    }

    impl FakeSource {
        fn with(n: u64) -> Self {
            let recipes: Vec<Recipe> = (1..=n)
                .map(|id| Recipe::new(id, format!("Recipe {id}")))
                .collect();
            Self {
                reported_total: recipes.len(),
                recipes,
                fail_at_skip: None,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl RecipeSource for FakeSource {
        fn fetch_page(&self, limit: usize, skip: usize) -> Result<RecipePage, ApiError> {
            self.requests.lock().push((limit, skip));
            if self.fail_at_skip == Some(skip) {
                return Err(ApiError::status(500, "Internal Server Error"));
            }
            let end = if limit == 0 {
                self.recipes.len()
            } else {
                (skip + limit).min(self.recipes.len())
            };
            Ok(RecipePage {
                recipes: self.recipes.get(skip..end).unwrap_or_default().to_vec(),
                total: self.reported_total,
                skip,
                limit,
            })
        }
    }

    fn ids(recipes: &[Recipe]) -> Vec<u64> {
        recipes.iter().map(|r| r.id).collect()
    }

    #[test]
    fn single_strategy_makes_one_request() {
        let source = FakeSource::with(50);
        let recipes = fetch_all(&source, FetchStrategy::Single).unwrap();
        assert_eq!(recipes.len(), 50);
        assert_eq!(*source.requests.lock(), vec![(0, 0)]);
    }

    #[test]
    fn paged_strategy_concatenates_in_offset_order() {
        let source = FakeSource::with(50);
        let recipes = fetch_all(&source, FetchStrategy::Paged { page_size: 20 }).unwrap();
        assert_eq!(ids(&recipes), (1..=50).collect::<Vec<_>>());
        assert_eq!(*source.requests.lock(), vec![(20, 0), (20, 20), (20, 40)]);
    }

    #[test]
    fn paged_strategy_with_exact_multiple() {
        let source = FakeSource::with(40);
        fetch_all(&source, FetchStrategy::Paged { page_size: 20 }).unwrap();
        assert_eq!(source.requests.lock().len(), 2);
    }

    #[test]
    fn later_page_failure_discards_everything() {
        let mut source = FakeSource::with(50);
        source.fail_at_skip = Some(20);
        let err = fetch_all(&source, FetchStrategy::Paged { page_size: 20 }).unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        // No request after the failing one.
        assert_eq!(*source.requests.lock(), vec![(20, 0), (20, 20)]);
    }

    #[test]
    fn first_page_failure() {
        let mut source = FakeSource::with(5);
        source.fail_at_skip = Some(0);
        assert!(fetch_all(&source, FetchStrategy::default()).is_err());
    }

    #[test]
    fn overstated_total_stops_on_empty_page() {
        let mut source = FakeSource::with(25);
        source.reported_total = 1000;
        let recipes = fetch_all(&source, FetchStrategy::Paged { page_size: 20 }).unwrap();
        assert_eq!(recipes.len(), 25);
        assert_eq!(source.requests.lock().len(), 3);
    }

    #[test]
    fn empty_collection() {
        let source = FakeSource::with(0);
        let recipes = fetch_all(&source, FetchStrategy::default()).unwrap();
        assert!(recipes.is_empty());
        assert_eq!(source.requests.lock().len(), 1);
    }

    #[test]
    fn strategy_serde_roundtrip_names() {
        let json = serde_json::to_string(&FetchStrategy::default()).unwrap();
        assert_eq!(json, r#"{"kind":"paged","page_size":20}"#);
        let single: FetchStrategy = serde_json::from_str(r#"{"kind":"single"}"#).unwrap();
        assert_eq!(single, FetchStrategy::Single);
    }
}
