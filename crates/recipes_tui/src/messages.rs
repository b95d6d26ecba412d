//! Application messages.
//!
//! Everything the app's own commands produce is one of these enums, so the
//! router and pages downcast to a small, closed set of types.

use recipes_core::{ApiError, DebounceTicket, Identity, LoginError, Recipe, Surface};

use crate::runtime::Message;

/// Router-level messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMsg {
    /// Show a surface, subject to the session gate.
    Navigate(Surface),
    /// Clear the session and return to the login surface.
    Logout,
    /// Exit.
    Quit,
}

impl AppMsg {
    /// Wrap for the runtime.
    #[must_use]
    pub fn into_message(self) -> Message {
        Message::new(self)
    }
}

/// Login surface messages.
#[derive(Debug)]
pub enum LoginMsg {
    /// The authentication request finished.
    Finished(Result<Identity, LoginError>),
}

impl LoginMsg {
    /// Wrap for the runtime.
    #[must_use]
    pub fn into_message(self) -> Message {
        Message::new(self)
    }
}

/// Recipes surface messages.
#[derive(Debug)]
pub enum RecipesMsg {
    /// A collection fetch finished.
    Fetched {
        /// Which load this answers; stale generations are dropped.
        generation: u64,
        /// All recipes, or the first failure.
        result: Result<Vec<Recipe>, ApiError>,
    },
    /// The search debounce delay elapsed.
    SearchDue(DebounceTicket),
}

impl RecipesMsg {
    /// Wrap for the runtime.
    #[must_use]
    pub fn into_message(self) -> Message {
        Message::new(self)
    }
}

/// Severity of an inline notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Neutral information.
    Info,
    /// Something worked.
    Success,
    /// Something failed.
    Error,
}

/// A message shown in a surface's message region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Text.
    pub text: String,
}

impl Notice {
    /// Informational notice.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    /// Success notice.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    /// Error notice.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    /// Styled for display.
    #[must_use]
    pub fn render(&self, theme: &crate::theme::Theme) -> String {
        match self.level {
            NoticeLevel::Info => theme.text_style().render(&self.text),
            NoticeLevel::Success => theme.success_style().render(&self.text),
            NoticeLevel::Error => theme.error_style().render(&self.text),
        }
    }
}
