//! The two surfaces.
//!
//! Each implements [`PageModel`] so the router can delegate without knowing
//! what a surface does.

mod login;
mod recipes;

pub use login::{LoginPage, REDIRECT_NOTICE};
pub use recipes::{RecipesPage, RecipesSettings, SHOW_MORE};

use recipes_core::Surface;

use crate::runtime::{Cmd, Message};
use crate::theme::Theme;

/// A routable surface.
///
/// Mouse rows are relative to the content area while no overlay is open, and
/// screen rows while one is.
pub trait PageModel {
    /// Handle a message.
    fn update(&mut self, msg: Message) -> Option<Cmd>;

    /// Render into the content area (header and footer excluded).
    fn view(&self, width: usize, height: usize, theme: &Theme) -> String;

    /// Which surface this is.
    fn surface(&self) -> Surface;

    /// Key hints for the footer.
    fn hints(&self) -> &'static str;

    /// Whether a full-screen overlay is open.
    fn has_overlay(&self) -> bool {
        false
    }

    /// A full-screen overlay replacing all chrome, if one is open.
    fn overlay(&self, _width: usize, _height: usize, _theme: &Theme) -> Option<String> {
        None
    }

    /// The terminal size changed. Sizes are full-screen.
    fn resize(&mut self, _width: usize, _height: usize) {}

    /// The surface became active.
    fn on_enter(&mut self) -> Option<Cmd> {
        None
    }

    /// The surface is being left.
    fn on_leave(&mut self) {}
}
