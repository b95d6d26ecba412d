//! Recipes surface: search, cuisine filter, cards, show more, detail overlay.

use std::sync::Arc;
use std::time::Duration;

use recipes_core::{
    Debouncer, DismissReason, FetchStrategy, LoadState, RecipeBrowser, RecipeSource, SessionGate,
    SessionStore, Surface, ViewWindow, fetch_all,
};
use tracing::debug;

use super::PageModel;
use crate::components::{
    CARD_HEIGHT, CONTROL_ROW, DetailModal, ModalHit, TextInput, render_card, truncate,
};
use crate::messages::{AppMsg, Notice, RecipesMsg};
use crate::runtime::{Cmd, KeyMsg, KeyType, Message, MouseButton, MouseMsg, quit, tick};
use crate::theme::{Theme, spacing};

/// Rows above the card list: search bar, status line, message region.
const CHROME_ROWS: usize = 3;

/// Label of the "show more" control.
pub const SHOW_MORE: &str = "[ Show more ]";

/// How the recipes surface loads and filters.
#[derive(Debug, Clone, Copy)]
pub struct RecipesSettings {
    /// Single request or sequential pages.
    pub fetch_strategy: FetchStrategy,
    /// Initial window and growth step.
    pub window: ViewWindow,
    /// Quiet period before a typed query is applied.
    pub search_debounce: Duration,
}

impl Default for RecipesSettings {
    fn default() -> Self {
        Self {
            fetch_strategy: FetchStrategy::default(),
            window: ViewWindow::default(),
            search_debounce: recipes_core::debounce::DEFAULT_DELAY,
        }
    }
}

/// The recipe listing.
pub struct RecipesPage {
    browser: RecipeBrowser,
    search: TextInput,
    debouncer: Debouncer<String>,
    selected: usize,
    modal: DetailModal,
    greeting: Option<String>,
    notice: Option<Notice>,
    generation: u64,
    source: Arc<dyn RecipeSource + Send + Sync>,
    gate: SessionGate<dyn SessionStore>,
    settings: RecipesSettings,
    width: usize,
    height: usize,
}

impl RecipesPage {
    /// Recipes surface fetching from `source`.
    pub fn new(
        source: Arc<dyn RecipeSource + Send + Sync>,
        gate: SessionGate<dyn SessionStore>,
        settings: RecipesSettings,
    ) -> Self {
        let mut search = TextInput::new("Search");
        search.set_placeholder("name, cuisine, ingredient or tag  (press /)");
        search.set_char_limit(100);
        Self {
            browser: RecipeBrowser::with_window(settings.window),
            search,
            debouncer: Debouncer::new(settings.search_debounce),
            selected: 0,
            modal: DetailModal::new(),
            greeting: None,
            notice: None,
            generation: 0,
            source,
            gate,
            settings,
            width: 80,
            height: 24,
        }
    }

    /// The page controller.
    #[must_use]
    pub const fn browser(&self) -> &RecipeBrowser {
        &self.browser
    }

    /// Index of the selected card.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// "Hi, {name}" for the header, once entered with a session.
    #[must_use]
    pub fn greeting(&self) -> Option<&str> {
        self.greeting.as_deref()
    }

    /// Whether the search field has focus.
    #[must_use]
    pub const fn is_searching(&self) -> bool {
        self.search.focused()
    }

    /// Show a notice in the message region.
    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// Drop everything tied to the current load. Any fetch still in flight
    /// will be ignored when it lands.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.browser = RecipeBrowser::with_window(self.settings.window);
        self.search.reset();
        self.search.blur();
        self.debouncer.cancel();
        self.selected = 0;
        self.modal.reset();
        self.notice = None;
        self.greeting = None;
    }

    fn load(&mut self) -> Cmd {
        self.generation += 1;
        self.browser.begin_loading();
        let generation = self.generation;
        let source = Arc::clone(&self.source);
        let strategy = self.settings.fetch_strategy;
        debug!(generation, ?strategy, "fetching recipes");
        Cmd::new(move || {
            RecipesMsg::Fetched {
                generation,
                result: fetch_all(&*source, strategy),
            }
            .into_message()
        })
    }

    fn visible_count(&self) -> usize {
        self.browser.window().shown(self.browser.filtered_len())
    }

    fn select(&mut self, delta: isize) {
        let n = self.visible_count();
        if n == 0 {
            self.selected = 0;
            return;
        }
        self.selected = self.selected.saturating_add_signed(delta).min(n - 1);
    }

    fn selected_id(&self) -> Option<u64> {
        self.browser.visible().get(self.selected).map(|r| r.id)
    }

    fn open_selected(&mut self) {
        if let Some(id) = self.selected_id()
            && self.browser.open_detail(id).is_some()
        {
            self.modal.reset();
        }
    }

    fn close_detail(&mut self, reason: DismissReason) {
        self.browser.close_detail(reason);
        self.modal.reset();
    }

    fn show_more(&mut self) {
        let first_new = self.visible_count();
        if self.browser.show_more() {
            self.selected = first_new;
        }
    }

    fn apply_query_now(&mut self) {
        self.debouncer.cancel();
        self.browser.set_query(self.search.value());
        self.selected = 0;
    }

    fn clear_search(&mut self) {
        self.search.reset();
        self.apply_query_now();
    }

    fn handle_overlay_key(&mut self, key: &KeyMsg) {
        let Some(detail) = self.browser.overlay().content().cloned() else {
            return;
        };
        let page = self.height.saturating_sub(6).max(1);
        match (key.key_type, key.char()) {
            (KeyType::Esc, _) => self.close_detail(DismissReason::Escape),
            (_, Some('x' | 'q')) => self.close_detail(DismissReason::CloseControl),
            (KeyType::Down, _) | (_, Some('j')) => {
                self.modal.scroll_down(1, &detail, self.width, self.height);
            }
            (KeyType::Up, _) | (_, Some('k')) => self.modal.scroll_up(1),
            (KeyType::PgDown | KeyType::Space, _) => {
                self.modal.scroll_down(page, &detail, self.width, self.height);
            }
            (KeyType::PgUp, _) => self.modal.scroll_up(page),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        match key.key_type {
            KeyType::Esc => {
                self.search.blur();
                None
            }
            KeyType::Enter => {
                self.search.blur();
                self.apply_query_now();
                None
            }
            KeyType::CtrlU => {
                self.clear_search();
                None
            }
            KeyType::Down | KeyType::Up => {
                self.search.blur();
                self.select(if key.key_type == KeyType::Down { 1 } else { -1 });
                None
            }
            _ => {
                if !self.search.handle_key(key) {
                    return None;
                }
                let ticket = self.debouncer.schedule(self.search.value());
                Some(tick(ticket.delay(), move |_| {
                    RecipesMsg::SearchDue(ticket).into_message()
                }))
            }
        }
    }

    fn handle_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        if self.browser.overlay().is_open() {
            self.handle_overlay_key(key);
            return None;
        }
        if self.search.focused() {
            return self.handle_search_key(key);
        }
        match (key.key_type, key.char()) {
            (KeyType::CtrlU, _) => self.clear_search(),
            (KeyType::Down, _) | (_, Some('j')) => self.select(1),
            (KeyType::Up, _) | (_, Some('k')) => self.select(-1),
            (KeyType::Home, _) | (_, Some('g')) => self.selected = 0,
            (KeyType::End, _) | (_, Some('G')) => self.select(isize::MAX),
            (KeyType::Enter, _) => self.open_selected(),
            (_, Some('/')) => self.search.focus(),
            (_, Some('c')) => {
                self.browser.cycle_cuisine(true);
                self.selected = 0;
            }
            (_, Some('C')) => {
                self.browser.cycle_cuisine(false);
                self.selected = 0;
            }
            (_, Some('m')) => self.show_more(),
            (_, Some('r')) => {
                if matches!(self.browser.state(), LoadState::Failed(_)) {
                    return Some(self.load());
                }
            }
            (_, Some('L')) => return Some(Cmd::new(|| AppMsg::Logout.into_message())),
            (_, Some('q')) => return Some(quit()),
            _ => {}
        }
        None
    }

    fn handle_mouse(&mut self, mouse: &MouseMsg) {
        if let Some(detail) = self.browser.overlay().content().cloned() {
            match mouse.button {
                MouseButton::WheelDown => {
                    self.modal.scroll_down(3, &detail, self.width, self.height);
                }
                MouseButton::WheelUp => self.modal.scroll_up(3),
                _ if mouse.is_click() => {
                    match DetailModal::hit(self.width, self.height, mouse.x.into(), mouse.y.into())
                    {
                        ModalHit::CloseControl => self.close_detail(DismissReason::CloseControl),
                        ModalHit::Backdrop => self.close_detail(DismissReason::Backdrop),
                        ModalHit::Panel => {}
                    }
                }
                _ => {}
            }
            return;
        }
        match mouse.button {
            MouseButton::WheelDown => self.select(1),
            MouseButton::WheelUp => self.select(-1),
            _ if mouse.is_click() => self.click_listing(usize::from(mouse.y)),
            _ => {}
        }
    }

    /// A click on content row `row`: the search bar focuses search, a card
    /// selects it (its control also opens it), the trailing control shows more.
    fn click_listing(&mut self, row: usize) {
        if row == 0 {
            self.search.focus();
            return;
        }
        let Some(line) = row.checked_sub(CHROME_ROWS) else {
            return;
        };
        self.search.blur();
        let rows = spacing::content_height(self.height).saturating_sub(CHROME_ROWS);
        let index = self.scroll_offset(rows, self.list_line_count()) + line;
        let cards_end = self.visible_count() * CARD_HEIGHT;
        if index < cards_end {
            self.selected = index / CARD_HEIGHT;
            if index % CARD_HEIGHT == CONTROL_ROW {
                self.open_selected();
            }
        } else if index == cards_end && self.browser.has_more() {
            self.show_more();
        }
    }

    fn shows_placeholder(&self) -> bool {
        !matches!(self.browser.state(), LoadState::Loading | LoadState::Idle)
    }

    fn cuisine_label(&self) -> String {
        let current = self.browser.criteria().cuisine.as_deref().unwrap_or("All");
        format!("Cuisine: ‹ {current} ›")
    }

    fn card_lines(&self, theme: &Theme, width: usize) -> Vec<String> {
        let listing = self.browser.listing();
        let mut lines = Vec::new();
        for (i, card) in listing.cards.iter().enumerate() {
            lines.extend(render_card(theme, card, width, i == self.selected));
        }
        if listing.show_more {
            lines.push(format!(
                "{}  {}",
                theme.control_style().render(SHOW_MORE),
                theme.muted_style().render("(m)")
            ));
        }
        if let Some(placeholder) = listing.placeholder
            && self.shows_placeholder()
        {
            lines.push(theme.muted_style().render(placeholder));
        }
        lines
    }

    /// Rows [`Self::card_lines`] produces.
    fn list_line_count(&self) -> usize {
        let listing = self.browser.listing();
        listing.cards.len() * CARD_HEIGHT
            + usize::from(listing.show_more)
            + usize::from(listing.placeholder.is_some() && self.shows_placeholder())
    }

    /// First row of the card list to show so the selected card is in view.
    fn scroll_offset(&self, rows: usize, total: usize) -> usize {
        let top = self.selected * CARD_HEIGHT;
        let mut bottom = top + CARD_HEIGHT;
        if self.selected + 1 == self.visible_count() {
            // Keep the trailing control in view with the last card.
            bottom = total;
        }
        bottom.saturating_sub(rows).min(top)
    }
}

impl PageModel for RecipesPage {
    fn update(&mut self, msg: Message) -> Option<Cmd> {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key);
        }
        if let Some(mouse) = msg.downcast_ref::<MouseMsg>() {
            self.handle_mouse(mouse);
            return None;
        }
        match msg.downcast::<RecipesMsg>()? {
            RecipesMsg::Fetched { generation, result } => {
                if generation != self.generation {
                    debug!(generation, current = self.generation, "discarding stale fetch");
                    return None;
                }
                self.browser.apply_fetch(result);
                self.selected = 0;
            }
            RecipesMsg::SearchDue(ticket) => {
                if let Some(query) = self.debouncer.fire(ticket) {
                    self.browser.set_query(query);
                    self.selected = 0;
                }
            }
        }
        None
    }

    fn view(&self, width: usize, height: usize, theme: &Theme) -> String {
        let content_width = width.min(spacing::MAX_CONTENT_WIDTH);
        let cuisine = self.cuisine_label();
        let search_width = content_width.saturating_sub(cuisine.chars().count() + 3 + 9);
        let search = self.search.view(theme, search_width);
        let gap = content_width
            .saturating_sub(crate::components::visible_width(&search) + cuisine.chars().count());
        let mut out = vec![
            format!(
                "{search}{}{}",
                " ".repeat(gap.max(1)),
                theme.muted_style().render(&cuisine)
            ),
        ];

        let status = match self.browser.state() {
            LoadState::Idle | LoadState::Loading => "Loading recipes…".to_string(),
            _ => self.browser.listing().status_line(),
        };
        out.push(theme.muted_style().render(&status));

        let message = match (self.browser.state(), &self.notice) {
            (LoadState::Failed(error), _) => theme
                .error_style()
                .render(&truncate(&format!("{error} Press r to retry."), content_width)),
            (_, Some(notice)) => notice.render(theme),
            _ => String::new(),
        };
        out.push(message);

        let rows = height.saturating_sub(CHROME_ROWS);
        let lines = self.card_lines(theme, content_width);
        let offset = self.scroll_offset(rows, lines.len());
        out.extend(lines.into_iter().skip(offset).take(rows));
        out.join("\n")
    }

    fn surface(&self) -> Surface {
        Surface::Recipes
    }

    fn hints(&self) -> &'static str {
        if self.browser.overlay().is_open() {
            "j/k scroll  x close  Esc close"
        } else if self.search.focused() {
            "Enter apply  Esc done  Ctrl+U clear"
        } else {
            "/ search  c cuisine  j/k select  Enter view  m more  L logout  q quit"
        }
    }

    fn has_overlay(&self) -> bool {
        self.browser.overlay().is_open()
    }

    fn overlay(&self, width: usize, height: usize, theme: &Theme) -> Option<String> {
        let detail = self.browser.overlay().content()?;
        Some(self.modal.view(theme, detail, width, height))
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    fn on_enter(&mut self) -> Option<Cmd> {
        self.reset();
        self.greeting = self.gate.session().map(|s| s.greeting());
        Some(self.load())
    }

    fn on_leave(&mut self) {
        self.reset();
    }
}
