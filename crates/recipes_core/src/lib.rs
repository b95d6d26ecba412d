#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Recipes Core
//!
//! The data layer behind the recipe browser: everything that can be exercised
//! without a terminal.
//!
//! - **Session gate**: a persisted display name decides which surface is shown
//! - **Login flow**: validation, a loading guard, and pluggable authenticators
//! - **Recipe fetch**: one unbounded request or sequential fixed-size pages
//! - **Filter engine**: case-insensitive search plus an exact cuisine match
//! - **Listing**: a bounded, incrementally revealed projection into cards
//! - **Detail overlay**: full recipe lookup by identifier
//!
//! ## Example
//!
//! ```rust
//! use recipes_core::{Recipe, RecipeBrowser};
//!
//! let recipes: Vec<Recipe> = (1..=20)
//!     .map(|id| Recipe::new(id, format!("Recipe {id}")))
//!     .collect();
//!
//! let mut browser = RecipeBrowser::new();
//! browser.load(recipes);
//!
//! let listing = browser.listing();
//! assert_eq!(listing.cards.len(), 12);
//! assert!(listing.show_more);
//!
//! browser.show_more();
//! assert_eq!(browser.listing().cards.len(), 20);
//! assert!(!browser.listing().show_more);
//! ```

pub mod api;
pub mod browser;
pub mod debounce;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod listing;
pub mod login;
pub mod rating;
pub mod recipe;
pub mod session;
pub mod window;

pub use api::{ApiClient, ApiConfig, DEFAULT_BASE_URL};
pub use browser::{DetailOverlay, DismissReason, LoadState, RecipeBrowser};
pub use debounce::{DebounceTicket, Debouncer};
pub use error::ApiError;
pub use fetch::{FetchStrategy, RecipeSource, fetch_all};
pub use filter::FilterCriteria;
pub use listing::{CardView, Listing, NO_RESULTS, RecipeDetail};
pub use login::{
    Authenticator, Credentials, Identity, LoginError, LoginForm, LoginStrategy, ValidationError,
};
pub use rating::StarRating;
pub use recipe::{Recipe, RecipeId, RecipePage};
pub use session::{
    FileSessionStore, MemorySessionStore, Route, Session, SessionError, SessionGate, SessionStore,
    Surface,
};
pub use window::ViewWindow;
