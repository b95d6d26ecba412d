// Test infrastructure; clarity over pedantry.
#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]

//! Headless test harness.
//!
//! [`TestHarness`] drives the whole [`App`] through a [`ProgramSimulator`]
//! with in-memory services, so scenarios read like a user session:
//!
//! ```rust
//! use recipes_tui::runtime::KeyType;
//! use recipes_tui::test_support::TestHarness;
//!
//! let mut h = TestHarness::new("login_then_browse");
//! h.type_text("emilys");
//! h.press_special(KeyType::Tab);
//! h.type_text("emilyspass");
//! h.press_special(KeyType::Enter);
//! h.assert_contains("Hi, Emily");
//! h.assert_contains("Showing 12 of 20 recipes");
//! h.finish().unwrap();
//! ```
//!
//! Every input is logged as a step and every assertion is recorded; a failed
//! [`TestHarness::finish`] returns the step log with the last frame.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use recipes_core::{
    ApiError, Authenticator, Credentials, FetchStrategy, Identity, LoginError,
    MemorySessionStore, Recipe, RecipePage, RecipeSource, Session, SessionStore, Surface,
    ViewWindow,
};

use crate::app::{App, AppSettings, Services};
use crate::components::strip_ansi;
use crate::pages::RecipesSettings;
use crate::runtime::{
    KeyMsg, KeyType, Message, MouseMsg, ProgramSimulator, SimulationStats, WindowSizeMsg,
};
use crate::theme::Theme;

/// Twenty recipes; three mention chicken (two by name, one by ingredient).
pub fn sample_recipes() -> Vec<Recipe> {
    const CUISINES: [&str; 4] = ["Italian", "Asian", "Mexican", "American"];
    let mut recipes: Vec<Recipe> = (1..=20u64)
        .map(|id| {
            let cuisine = CUISINES[(id as usize - 1) % CUISINES.len()];
            Recipe::new(id, format!("{cuisine} Dish {id}"))
                .with_cuisine(cuisine)
                .with_ingredients(["Salt", "Olive oil", "Garlic"])
                .with_instructions(["Prepare the ingredients.", "Cook until done."])
                .with_tags([cuisine.to_lowercase()])
                .with_rating(4.0 + (id % 10) as f64 / 10.0)
                .with_times(10, 20)
                .with_difficulty("Easy")
                .with_image(format!("https://cdn.dummyjson.com/recipe-images/{id}.webp"))
        })
        .collect();
    recipes[0].name = Some("Chicken Alfredo".into());
    recipes[5].name = Some("Chicken Karaage".into());
    recipes[9].ingredients = vec!["Chicken thighs".into(), "Rice".into()];
    recipes
}

/// In-memory recipe source that records requests.
#[derive(Debug)]
pub struct FakeSource {
    recipes: Vec<Recipe>,
    failure: Mutex<Option<u16>>,
    requests: Mutex<Vec<(usize, usize)>>,
}

impl FakeSource {
    /// Serve `recipes`.
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes,
            failure: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with `status` until cleared.
    pub fn fail_with(&self, status: Option<u16>) {
        *self.failure.lock() = status;
    }

    /// `(limit, skip)` of every request so far.
    pub fn requests(&self) -> Vec<(usize, usize)> {
        self.requests.lock().clone()
    }
}

impl RecipeSource for FakeSource {
    fn fetch_page(&self, limit: usize, skip: usize) -> Result<RecipePage, ApiError> {
        self.requests.lock().push((limit, skip));
        if let Some(status) = *self.failure.lock() {
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

/// Authenticator over a fixed user table.
#[derive(Debug)]
pub struct FakeAuth {
    users: Vec<(String, String)>,
    outage: Mutex<bool>,
    calls: Mutex<usize>,
}

impl FakeAuth {
    /// Users as `(username, first name)`.
    pub fn new(users: &[(&str, &str)]) -> Self {
        Self {
            users: users
                .iter()
                .map(|(u, n)| ((*u).to_string(), (*n).to_string()))
                .collect(),
            outage: Mutex::new(false),
            calls: Mutex::new(0),
        }
    }

    /// Make every call fail at the transport level.
    pub fn set_outage(&self, outage: bool) {
        *self.outage.lock() = outage;
    }

    /// Calls so far.
    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }
}

impl Authenticator for FakeAuth {
    fn authenticate(&self, credentials: &Credentials) -> Result<Identity, LoginError> {
        *self.calls.lock() += 1;
        if *self.outage.lock() {
            return Err(ApiError::Transport("connection refused".into()).into());
        }
        self.users
            .iter()
            .find(|(username, _)| *username == credentials.username.trim())
            .map(|(_, first_name)| Identity {
                first_name: first_name.clone(),
                token: None,
            })
            .ok_or(LoginError::UnknownUser)
    }
}

/// Headless driver for the whole app.
pub struct TestHarness {
    sim: ProgramSimulator<App>,
    source: Arc<FakeSource>,
    auth: Arc<FakeAuth>,
    store: Arc<MemorySessionStore>,
    scenario: String,
    steps: Vec<String>,
    failures: Vec<String>,
}

impl TestHarness {
    /// Logged out, twenty sample recipes, user `emilys`, 100x40 terminal.
    pub fn new(scenario: impl Into<String>) -> Self {
        Self::with_parts(scenario, sample_recipes(), None)
    }

    /// Start with a session for `first_name`.
    pub fn logged_in(scenario: impl Into<String>, first_name: &str) -> Self {
        Self::with_parts(scenario, sample_recipes(), Some(Session::new(first_name)))
    }

    /// Full control over the data and initial session.
    pub fn with_parts(
        scenario: impl Into<String>,
        recipes: Vec<Recipe>,
        session: Option<Session>,
    ) -> Self {
        let source = Arc::new(FakeSource::new(recipes));
        let auth = Arc::new(FakeAuth::new(&[("emilys", "Emily"), ("michaelw", "Michael")]));
        let store = Arc::new(session.map_or_else(MemorySessionStore::new, MemorySessionStore::with_session));
        let mut harness = Self {
            sim: ProgramSimulator::new(App::new(
                Services {
                    recipes: source.clone(),
                    auth: auth.clone(),
                    sessions: store.clone(),
                },
                Self::settings(),
            )),
            source,
            auth,
            store,
            scenario: scenario.into(),
            steps: Vec::new(),
            failures: Vec::new(),
        };
        harness.resize(100, 40);
        harness
    }

    /// Deterministic settings: no delays, paged fetch, 12/12 window, no color.
    pub fn settings() -> AppSettings {
        AppSettings {
            recipes: RecipesSettings {
                fetch_strategy: FetchStrategy::Paged { page_size: 20 },
                window: ViewWindow::default(),
                search_debounce: Duration::ZERO,
            },
            redirect_delay: Duration::ZERO,
            theme: Theme::plain(),
        }
    }

    fn dispatch(&mut self, step: String, msg: Message) {
        self.steps.push(step);
        self.sim.send(msg);
        self.sim.run_until_empty();
    }

    /// Press a character key.
    pub fn press_key(&mut self, c: char) {
        self.dispatch(format!("press {c:?}"), Message::new(KeyMsg::from_char(c)));
    }

    /// Press each character of `keys` in turn.
    pub fn press_keys(&mut self, keys: &str) {
        for c in keys.chars() {
            self.press_key(c);
        }
    }

    /// Press a non-character key.
    pub fn press_special(&mut self, key_type: KeyType) {
        self.dispatch(format!("press {key_type:?}"), Message::new(KeyMsg::from_type(key_type)));
    }

    /// Paste `text` into whatever has focus.
    pub fn type_text(&mut self, text: &str) {
        self.dispatch(format!("type {text:?}"), Message::new(KeyMsg::paste(text)));
    }

    /// Left click at a screen cell.
    pub fn click(&mut self, x: u16, y: u16) {
        self.dispatch(format!("click ({x}, {y})"), Message::new(MouseMsg::click(x, y)));
    }

    /// Resize the terminal.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.dispatch(
            format!("resize {width}x{height}"),
            Message::new(WindowSizeMsg { width, height }),
        );
    }

    /// Send an arbitrary message.
    pub fn send(&mut self, label: &str, msg: Message) {
        self.dispatch(label.to_string(), msg);
    }

    /// Log in as `username` through the form.
    pub fn log_in(&mut self, username: &str) {
        self.type_text(username);
        self.press_special(KeyType::Tab);
        self.type_text("secret");
        self.press_special(KeyType::Enter);
    }

    /// Latest frame, ANSI stripped.
    pub fn view(&self) -> String {
        strip_ansi(self.sim.last_view().unwrap_or_default())
    }

    fn record(&mut self, name: String, ok: bool) -> bool {
        self.steps.push(format!("assert {name}: {}", if ok { "ok" } else { "FAILED" }));
        if !ok {
            self.failures.push(name);
        }
        ok
    }

    /// The current frame contains `text`.
    pub fn assert_contains(&mut self, text: &str) -> bool {
        let ok = self.view().contains(text);
        self.record(format!("view contains {text:?}"), ok)
    }

    /// The current frame does not contain `text`.
    pub fn assert_not_contains(&mut self, text: &str) -> bool {
        let ok = !self.view().contains(text);
        self.record(format!("view does not contain {text:?}"), ok)
    }

    /// The app shows `expected`.
    pub fn assert_surface(&mut self, expected: Surface) -> bool {
        let actual = self.sim.model().current();
        self.record(format!("surface is {expected:?} (was {actual:?})"), actual == Some(expected))
    }

    /// The raw frame has no escape sequences.
    pub fn assert_no_ansi(&mut self) -> bool {
        let ok = !self.sim.last_view().unwrap_or_default().contains("\x1b[");
        self.record("no ANSI escape codes".to_string(), ok)
    }

    /// The app model.
    pub fn model(&self) -> &App {
        self.sim.model()
    }

    /// Simulator counters.
    pub fn stats(&self) -> &SimulationStats {
        self.sim.stats()
    }

    /// Whether the app asked to exit.
    pub fn is_quit(&self) -> bool {
        self.sim.is_quit()
    }

    /// The recipe source.
    pub fn source(&self) -> &FakeSource {
        &self.source
    }

    /// The authenticator.
    pub fn auth(&self) -> &FakeAuth {
        &self.auth
    }

    /// The persisted session, read straight from the store.
    pub fn stored_session(&self) -> Option<Session> {
        self.store.load().ok().flatten()
    }

    /// `Ok` if every assertion passed, otherwise the step log and last frame.
    pub fn finish(self) -> Result<(), String> {
        if self.failures.is_empty() {
            return Ok(());
        }
        Err(format!(
            "scenario {:?}: {} assertion(s) failed\n\nsteps:\n  {}\n\nlast frame:\n{}",
            self.scenario,
            self.failures.len(),
            self.steps.join("\n  "),
            self.view()
        ))
    }
}
