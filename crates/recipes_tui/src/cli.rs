//! Command-line interface for `recipes`.
//!
//! # Examples
//!
//! ```bash
//! # Open the browser (default)
//! recipes
//!
//! # Against a local mock, logging to a file
//! recipes --api-url http://localhost:8080 --log-file /tmp/recipes.log -vv
//!
//! # Headless listing for scripts
//! recipes list --query chicken --cuisine Italian
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use recipes_core::LoginStrategy;

/// Recipe Book - browse recipes from the terminal.
#[derive(Parser, Debug, Clone)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "CLI flags are naturally bools"
)]
#[command(
    name = "recipes",
    author,
    version,
    about = "Recipe Book - browse recipes from the terminal",
    long_about = "Log in, then search, filter and read recipes from a dummyjson-compatible API."
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, short = 'c', env = "RECIPES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the recipes API
    #[arg(long, env = "RECIPES_API_URL")]
    pub api_url: Option<String>,

    /// Where the session marker is stored
    #[arg(long, env = "RECIPES_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Write logs to this file
    ///
    /// The terminal belongs to the UI, so the browser only logs to a file.
    #[arg(long, env = "RECIPES_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Theme preset (dark, light)
    #[arg(long, short = 't')]
    pub theme: Option<String>,

    /// Recipes per request when fetching in pages
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Fetch the whole collection in one request
    #[arg(long)]
    pub single_fetch: bool,

    /// How logins are verified
    #[arg(long, value_enum)]
    pub login: Option<LoginArg>,

    /// Force color output off
    ///
    /// Respects the `NO_COLOR` environment variable
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Force color output on (overrides `NO_COLOR`)
    #[arg(long, conflicts_with = "no_color")]
    pub force_color: bool,

    /// Run in the main terminal buffer
    #[arg(long)]
    pub no_alt_screen: bool,

    /// Ignore the mouse (the detail backdrop can then only be closed by key)
    #[arg(long)]
    pub no_mouse: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Optional subcommand
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the interactive browser (default)
    Browse,

    /// Print who is logged in
    Whoami,

    /// Clear the stored session
    Logout,

    /// Fetch, filter and print the listing without a UI
    List(ListArgs),

    /// Print the effective configuration
    Config,
}

/// Arguments for the `list` subcommand.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ListArgs {
    /// Free-text search over name, cuisine, ingredients and tags
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Exact cuisine
    #[arg(long)]
    pub cuisine: Option<String>,

    /// Print every match instead of the first window
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// `--login` values.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginArg {
    /// Match the username against the user list
    UserLookup,
    /// Post the credentials to the auth endpoint
    Credentials,
}

impl From<LoginArg> for LoginStrategy {
    fn from(arg: LoginArg) -> Self {
        match arg {
            LoginArg::UserLookup => Self::UserLookup,
            LoginArg::Credentials => Self::Credentials,
        }
    }
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// The subcommand to run; no subcommand means `browse`.
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Browse)
    }

    /// Whether the command takes over the terminal.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.command() == Command::Browse
    }
}
