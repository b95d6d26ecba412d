//! End-to-end behaviour of the data layer against an in-memory API.

use std::sync::Arc;

use parking_lot::Mutex;
use recipes_core::{
    ApiError, Authenticator, Credentials, DismissReason, FetchStrategy, Identity, LoadState,
    LoginError, LoginForm, MemorySessionStore, NO_RESULTS, Recipe, RecipeBrowser, RecipePage,
    RecipeSource, Route, Session, SessionGate, Surface, fetch_all,
};

/// Fake remote API: serves recipes and users, counts every request.
struct FakeApi {
    recipes: Vec<Recipe>,
    status: Option<u16>,
    users: Vec<(&'static str, &'static str)>,
    requests: Mutex<usize>,
}

impl FakeApi {
    fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes,
            status: None,
            users: vec![("emilys", "Emily"), ("michaelw", "Michael")],
            requests: Mutex::new(0),
        }
    }

    fn failing(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Self::new(Vec::new())
        }
    }

    fn requests(&self) -> usize {
        *self.requests.lock()
    }
}

impl RecipeSource for FakeApi {
    fn fetch_page(&self, limit: usize, skip: usize) -> Result<RecipePage, ApiError> {
        *self.requests.lock() += 1;
        if let Some(status) = self.status {
            return Err(ApiError::status(status, "Internal Server Error"));
        }
        let end = if limit == 0 {
            self.recipes.len()
        } else {
            (skip + limit).min(self.recipes.len())
        };
        Ok(RecipePage {
            recipes: self.recipes.get(skip..end).unwrap_or_default().to_vec(),
            total: self.recipes.len(),
            skip,
            limit,
        })
    }
}

impl Authenticator for FakeApi {
    fn authenticate(&self, credentials: &Credentials) -> Result<Identity, LoginError> {
        *self.requests.lock() += 1;
        self.users
            .iter()
            .find(|(u, _)| u.eq_ignore_ascii_case(&credentials.username))
            .map(|(_, first)| Identity {
                first_name: (*first).to_string(),
                token: None,
            })
            .ok_or(LoginError::UnknownUser)
    }
}

fn twenty_recipes() -> Vec<Recipe> {
    (1..=20)
        .map(|id| {
            let name = match id {
                3 => "Chicken Alfredo".to_string(),
                9 => "Grilled Chicken Salad".to_string(),
                n => format!("Recipe {n}"),
            };
            let mut r = Recipe::new(id, name).with_cuisine("Italian");
            if id == 15 {
                r = r.with_ingredients(["rice", "chicken stock"]);
            }
            r
        })
        .collect()
}

#[test]
fn twenty_recipes_reveal_twelve_then_all() {
    let api = FakeApi::new(twenty_recipes());
    let mut browser = RecipeBrowser::new();
    browser.apply_fetch(fetch_all(&api, FetchStrategy::default()));

    let listing = browser.listing();
    assert_eq!(listing.cards.len(), 12);
    assert!(listing.show_more);
    assert_eq!(listing.status_line(), "Showing 12 of 20 recipes");

    assert!(browser.show_more());
    let listing = browser.listing();
    assert_eq!(listing.cards.len(), 20);
    assert!(!listing.show_more);
}

#[test]
fn chicken_search_matches_three_in_order() {
    let mut browser = RecipeBrowser::new();
    browser.load(twenty_recipes());
    browser.set_query("  CHICKEN ");

    let ids: Vec<u64> = browser.listing().cards.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![3, 9, 15]);
    assert!(!browser.listing().show_more);
}

#[test]
fn detail_uses_unfiltered_collection() {
    let mut browser = RecipeBrowser::new();
    browser.load(twenty_recipes());
    browser.set_query("chicken");
    assert!(browser.open_detail(20).is_some());
    assert_eq!(
        browser.overlay().content().map(|d| d.name.as_str()),
        Some("Recipe 20")
    );
    assert!(browser.close_detail(DismissReason::CloseControl));
}

#[test]
fn server_error_shows_message_and_placeholder() {
    let api = FakeApi::failing(500);
    let mut browser = RecipeBrowser::new();
    browser.begin_loading();
    browser.apply_fetch(fetch_all(&api, FetchStrategy::default()));

    match browser.state() {
        LoadState::Failed(msg) => assert!(msg.contains("500")),
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(browser.recipes().is_empty());
    let first = browser.listing();
    assert_eq!(first.placeholder, Some(NO_RESULTS));
    assert!(!first.show_more);
    assert_eq!(browser.listing(), first);
    assert_eq!(api.requests(), 1);
}

#[test]
fn empty_password_never_reaches_the_api() {
    let api = FakeApi::new(Vec::new());
    let mut form = LoginForm::default();
    form.username = "emilys".into();
    let err = form.submit(&api).unwrap_err();
    assert_eq!(err.user_message(), "Password must not be empty.");
    assert_eq!(api.requests(), 0);
}

#[test]
fn login_persists_session_and_routes_to_recipes() {
    let api = FakeApi::new(Vec::new());
    let store = Arc::new(MemorySessionStore::new());
    let gate = SessionGate::new(Arc::clone(&store));
    assert_eq!(gate.route(Surface::Recipes), Route::Redirect(Surface::Login));

    let mut form = LoginForm::default();
    form.username = "EmilyS".into();
    form.password = "anything".into();
    let identity = form.submit(&api).unwrap();
    gate.login(&Session::from(identity)).unwrap();

    assert_eq!(gate.landing(), Surface::Recipes);
    assert_eq!(gate.route(Surface::Login), Route::Redirect(Surface::Recipes));
    assert_eq!(gate.session().map(|s| s.greeting()).as_deref(), Some("Hi, Emily"));
}

#[test]
fn failed_login_persists_nothing() {
    let api = FakeApi::new(Vec::new());
    let store = Arc::new(MemorySessionStore::new());
    let gate = SessionGate::new(Arc::clone(&store));
    let mut form = LoginForm::default();
    form.username = "nobody".into();
    form.password = "pw".into();
    assert!(matches!(form.submit(&api), Err(LoginError::UnknownUser)));
    assert!(!gate.is_authenticated());
    assert!(!form.is_loading());
}
