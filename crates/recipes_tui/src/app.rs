//! Top-level model and routing.
//!
//! `App` owns both surfaces and the session gate. Every surface switch goes
//! through [`App::navigate`], which asks the gate first: the recipes surface
//! without a session bounces to login (no fetch is started), and the login
//! surface with a session goes straight to recipes.

use std::sync::Arc;
use std::time::Duration;

use chrono::Datelike;
use recipes_core::{
    Authenticator, RecipeSource, Route, SessionGate, SessionStore, Surface,
};
use tracing::{info, warn};

use crate::components::{fill, pad_right, truncate, visible_width};
use crate::messages::{AppMsg, Notice};
use crate::pages::{LoginPage, PageModel, REDIRECT_NOTICE, RecipesPage};
use crate::runtime::{Cmd, Message, Model, MouseMsg, WindowSizeMsg, quit};
use crate::theme::{Theme, spacing};

pub use crate::pages::RecipesSettings;

/// Application name shown in the header and footer.
pub const APP_NAME: &str = "Recipe Book";

/// The outside world, behind traits so tests can substitute fakes.
#[derive(Clone)]
pub struct Services {
    /// Where recipes come from.
    pub recipes: Arc<dyn RecipeSource + Send + Sync>,
    /// Who verifies logins.
    pub auth: Arc<dyn Authenticator + Send + Sync>,
    /// Where the session marker lives.
    pub sessions: Arc<dyn SessionStore>,
}

/// Behavior knobs resolved from configuration.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Recipes surface settings.
    pub recipes: RecipesSettings,
    /// Pause between a successful login and the switch to recipes.
    pub redirect_delay: Duration,
    /// Colors.
    pub theme: Theme,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            recipes: RecipesSettings::default(),
            redirect_delay: Duration::from_millis(800),
            theme: Theme::default(),
        }
    }
}

/// The application model.
pub struct App {
    current: Option<Surface>,
    login: LoginPage,
    recipes: RecipesPage,
    gate: SessionGate<dyn SessionStore>,
    theme: Theme,
    width: usize,
    height: usize,
}

impl App {
    /// Build the app over `services`.
    pub fn new(services: Services, settings: AppSettings) -> Self {
        let gate: SessionGate<dyn SessionStore> = SessionGate::new(services.sessions);
        Self {
            current: None,
            login: LoginPage::new(services.auth, gate.clone(), settings.redirect_delay),
            recipes: RecipesPage::new(services.recipes, gate.clone(), settings.recipes),
            gate,
            theme: settings.theme,
            width: 80,
            height: 24,
        }
    }

    /// The surface on screen, once the first navigation happened.
    #[must_use]
    pub const fn current(&self) -> Option<Surface> {
        self.current
    }

    /// The login surface.
    #[must_use]
    pub const fn login(&self) -> &LoginPage {
        &self.login
    }

    /// The recipes surface.
    #[must_use]
    pub const fn recipes(&self) -> &RecipesPage {
        &self.recipes
    }

    fn page(&self, surface: Surface) -> &dyn PageModel {
        match surface {
            Surface::Login => &self.login,
            Surface::Recipes => &self.recipes,
        }
    }

    fn page_mut(&mut self, surface: Surface) -> &mut dyn PageModel {
        match surface {
            Surface::Login => &mut self.login,
            Surface::Recipes => &mut self.recipes,
        }
    }

    /// Show `requested`, or wherever the session gate sends it instead.
    fn navigate(&mut self, requested: Surface) -> Option<Cmd> {
        let target = match self.gate.route(requested) {
            Route::Stay => requested,
            Route::Redirect(target) => {
                info!(?requested, ?target, "redirected by session gate");
                if target == Surface::Login {
                    self.login.set_notice(Notice::info(REDIRECT_NOTICE));
                }
                target
            }
        };
        if let Some(previous) = self.current {
            self.page_mut(previous).on_leave();
        }
        self.current = Some(target);
        self.page_mut(target).on_enter()
    }

    fn logout(&mut self) -> Option<Cmd> {
        if let Err(e) = self.gate.logout() {
            warn!(error = %e, "logout failed");
            self.recipes
                .set_notice(Notice::error(format!("Could not log out: {e}")));
            return None;
        }
        let cmd = self.navigate(Surface::Login);
        self.login.set_notice(Notice::info("You have been logged out."));
        cmd
    }

    fn header(&self) -> String {
        let title = self.theme.title_style().render(APP_NAME);
        let greeting = match self.current {
            Some(Surface::Recipes) => self.recipes.greeting().unwrap_or_default(),
            _ => "",
        };
        let greeting = self.theme.heading_style().render(greeting);
        let gap = self
            .width
            .saturating_sub(visible_width(&title) + visible_width(&greeting));
        format!("{title}{}{greeting}", " ".repeat(gap))
    }

    fn footer(&self, hints: &str) -> String {
        let copyright = format!("© {} {APP_NAME}", chrono::Local::now().year());
        let room = self.width.saturating_sub(copyright.chars().count() + 2);
        let hints = truncate(hints, room);
        let gap = self
            .width
            .saturating_sub(hints.chars().count() + copyright.chars().count());
        format!(
            "{}{}{}",
            self.theme.muted_style().render(&hints),
            " ".repeat(gap),
            self.theme.muted_style().render(&copyright)
        )
    }
}

impl Model for App {
    fn init(&self) -> Option<Cmd> {
        let landing = self.gate.landing();
        Some(Cmd::new(move || AppMsg::Navigate(landing).into_message()))
    }

    fn update(&mut self, msg: Message) -> Option<Cmd> {
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.width = usize::from(size.width);
            self.height = usize::from(size.height);
            self.login.resize(self.width, self.height);
            self.recipes.resize(self.width, self.height);
            return None;
        }

        let msg = match msg.try_downcast::<AppMsg>() {
            Ok(AppMsg::Navigate(surface)) => return self.navigate(surface),
            Ok(AppMsg::Logout) => return self.logout(),
            Ok(AppMsg::Quit) => return Some(quit()),
            Err(msg) => msg,
        };

        let current = self.current?;
        if let Some(mouse) = msg.downcast_ref::<MouseMsg>()
            && !self.page(current).has_overlay()
        {
            // Pages see content-relative rows; clicks on the header are dropped.
            let top = u16::try_from(spacing::CONTENT_TOP).unwrap_or(u16::MAX);
            let y = mouse.y.checked_sub(top)?;
            let local = MouseMsg { y, ..*mouse };
            return self.page_mut(current).update(Message::new(local));
        }
        self.page_mut(current).update(msg)
    }

    fn view(&self) -> String {
        let Some(current) = self.current else {
            return String::new();
        };
        let page = self.page(current);
        if let Some(overlay) = page.overlay(self.width, self.height, &self.theme) {
            return overlay;
        }

        let content_height = spacing::content_height(self.height);
        let content = page.view(self.width, content_height, &self.theme);

        let mut lines = vec![pad_right(&self.header(), self.width), String::new()];
        lines.extend(fill(
            content.lines().map(str::to_string).collect(),
            self.width,
            content_height,
        ));
        lines.push(self.footer(page.hints()));
        lines.join("\n")
    }
}
