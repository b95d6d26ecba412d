//! Runtime configuration for `recipes`.
//!
//! [`Config`] is the single source of truth for every setting. It is resolved
//! in layers: built-in defaults, then the TOML file, then the command line
//! (clap folds the `RECIPES_*` environment variables into the CLI layer, so a
//! flag beats its variable and both beat the file).
//!
//! # Examples
//!
//! ```rust
//! use recipes_tui::config::{Config, FetchMode};
//!
//! let config = Config::from_toml_str("fetch_strategy = \"single\"\npage_size = 50\n").unwrap();
//! assert_eq!(config.fetch_strategy, FetchMode::Single);
//! assert_eq!(config.initial_window, 12);
//! ```

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use recipes_core::fetch::DEFAULT_PAGE_SIZE;
use recipes_core::window::{DEFAULT_INITIAL, DEFAULT_STEP};
use recipes_core::{
    ApiConfig, DEFAULT_BASE_URL, FetchStrategy, FileSessionStore, LoginStrategy, ViewWindow,
};
use serde::{Deserialize, Serialize};

use crate::app::AppSettings;
use crate::cli::Cli;
use crate::pages::RecipesSettings;
use crate::theme::{Theme, ThemePreset};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    // ========================================================================
    // API
    // ========================================================================
    /// Base URL of the recipes API.
    pub api_base_url: String,

    /// One request or sequential pages.
    pub fetch_strategy: FetchMode,

    /// Recipes per request in paged mode.
    pub page_size: usize,

    /// How logins are verified.
    pub login_strategy: LoginStrategy,

    /// Per-request timeout.
    pub request_timeout_secs: u64,

    // ========================================================================
    // Listing
    // ========================================================================
    /// Cards shown after every filter change.
    pub initial_window: usize,

    /// Cards added by "show more".
    pub window_step: usize,

    /// Quiet period before a typed search is applied.
    pub search_debounce_ms: u64,

    /// Pause between a successful login and the recipes surface.
    pub redirect_delay_ms: u64,

    // ========================================================================
    // Files
    // ========================================================================
    /// Session marker location; platform data dir when unset.
    pub session_file: Option<PathBuf>,

    /// Log file; logging is off for the browser when unset.
    pub log_file: Option<PathBuf>,

    // ========================================================================
    // Display
    // ========================================================================
    /// Color output mode.
    pub color_mode: ColorMode,

    /// Theme preset.
    pub theme: ThemePreset,

    /// Whether to use the alternate screen.
    pub alt_screen: bool,

    /// Whether mouse input is captured.
    pub mouse: bool,

    /// Log verbosity (0=warn, 1=info, 2=debug, 3+=trace).
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            fetch_strategy: FetchMode::Paged,
            page_size: DEFAULT_PAGE_SIZE,
            login_strategy: LoginStrategy::default(),
            request_timeout_secs: 30,
            initial_window: DEFAULT_INITIAL,
            window_step: DEFAULT_STEP,
            search_debounce_ms: 300,
            redirect_delay_ms: 800,
            session_file: None,
            log_file: None,
            color_mode: ColorMode::Auto,
            theme: ThemePreset::Dark,
            alt_screen: true,
            mouse: true,
            verbosity: 0,
        }
    }
}

impl Config {
    /// Default config file location.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "recipes", "recipes")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })
    }

    /// Read a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            message: e.to_string(),
        })
    }

    /// Resolve the effective configuration for `cli`.
    ///
    /// An explicit `--config` path must exist; the default location is
    /// optional.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed, or the
    /// result fails [`Config::validate`].
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_cli(cli)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay command-line (and environment) settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTheme`] for an unknown theme name.
    pub fn apply_cli(&mut self, cli: &Cli) -> Result<(), ConfigError> {
        if let Some(url) = &cli.api_url {
            self.api_base_url.clone_from(url);
        }
        if let Some(path) = &cli.session_file {
            self.session_file = Some(path.clone());
        }
        if let Some(path) = &cli.log_file {
            self.log_file = Some(path.clone());
        }
        if let Some(name) = &cli.theme {
            self.theme = match name.to_ascii_lowercase().as_str() {
                "dark" => ThemePreset::Dark,
                "light" => ThemePreset::Light,
                _ => return Err(ConfigError::InvalidTheme(name.clone())),
            };
        }
        if let Some(size) = cli.page_size {
            self.page_size = size;
        }
        if cli.single_fetch {
            self.fetch_strategy = FetchMode::Single;
        }
        if let Some(login) = cli.login {
            self.login_strategy = login.into();
        }
        if cli.force_color {
            self.color_mode = ColorMode::Always;
        } else if cli.no_color {
            self.color_mode = ColorMode::Never;
        }
        if cli.no_alt_screen {
            self.alt_screen = false;
        }
        if cli.no_mouse {
            self.mouse = false;
        }
        self.verbosity = self.verbosity.max(cli.verbose);
        Ok(())
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if self.page_size == 0 {
            return Err(ConfigError::Zero("page_size"));
        }
        if self.initial_window == 0 {
            return Err(ConfigError::Zero("initial_window"));
        }
        if self.window_step == 0 {
            return Err(ConfigError::Zero("window_step"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Zero("request_timeout_secs"));
        }
        Ok(())
    }

    /// Check if colors should be used.
    #[must_use]
    pub fn use_color(&self) -> bool {
        match self.color_mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
            }
        }
    }

    /// The effective fetch strategy.
    #[must_use]
    pub const fn fetch_strategy(&self) -> FetchStrategy {
        match self.fetch_strategy {
            FetchMode::Single => FetchStrategy::Single,
            FetchMode::Paged => FetchStrategy::Paged {
                page_size: self.page_size,
            },
        }
    }

    /// Session file location, if one can be determined.
    #[must_use]
    pub fn session_path(&self) -> Option<PathBuf> {
        self.session_file
            .clone()
            .or_else(FileSessionStore::default_path)
    }

    /// HTTP client settings.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_base_url.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
            login_strategy: self.login_strategy,
        }
    }

    /// Recipes surface settings.
    #[must_use]
    pub fn recipes_settings(&self) -> RecipesSettings {
        RecipesSettings {
            fetch_strategy: self.fetch_strategy(),
            window: ViewWindow::new(self.initial_window, self.window_step),
            search_debounce: Duration::from_millis(self.search_debounce_ms),
        }
    }

    /// The theme with color resolved.
    #[must_use]
    pub fn theme(&self) -> Theme {
        Theme::from_preset(self.theme).with_color(self.use_color())
    }

    /// Everything the app model needs.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            recipes: self.recipes_settings(),
            redirect_delay: Duration::from_millis(self.redirect_delay_ms),
            theme: self.theme(),
        }
    }

    /// Export configuration as a diagnostic string.
    #[must_use]
    pub fn to_diagnostic_string(&self) -> String {
        let on_off = |b: bool| if b { "on" } else { "off" };
        let path = |p: Option<&Path>| p.map_or_else(|| "-".to_string(), |p| p.display().to_string());

        let mut lines = Vec::new();
        lines.push(format!("API base URL: {}", self.api_base_url));
        lines.push(format!("Fetch strategy: {}", self.fetch_strategy.name()));
        lines.push(format!("Page size: {}", self.page_size));
        lines.push(format!("Login strategy: {:?}", self.login_strategy));
        lines.push(format!("Request timeout: {}s", self.request_timeout_secs));
        lines.push(format!(
            "Window: {} (+{})",
            self.initial_window, self.window_step
        ));
        lines.push(format!("Search debounce: {}ms", self.search_debounce_ms));
        lines.push(format!("Redirect delay: {}ms", self.redirect_delay_ms));
        lines.push(format!(
            "Session file: {}",
            path(self.session_path().as_deref())
        ));
        lines.push(format!("Log file: {}", path(self.log_file.as_deref())));
        lines.push(format!("Color mode: {:?}", self.color_mode));
        lines.push(format!("Theme: {}", self.theme));
        lines.push(format!("Alt screen: {}", on_off(self.alt_screen)));
        lines.push(format!("Mouse: {}", on_off(self.mouse)));
        lines.push(format!("Verbosity: {}", self.verbosity));
        lines.join("\n")
    }
}

/// `fetch_strategy` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// Sequential pages of `page_size`.
    #[default]
    Paged,
    /// One unbounded request.
    Single,
}

impl FetchMode {
    /// Config-file spelling.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Paged => "paged",
            Self::Single => "single",
        }
    }
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color on a terminal unless `NO_COLOR` is set.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors (ASCII stars).
    Never,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file unreadable.
    #[error("cannot read config file {}: {source}", .path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Malformed TOML or an unknown key.
    #[error("invalid config{}: {message}", located(.path.as_deref()))]
    Parse {
        /// File that failed, if any.
        path: Option<PathBuf>,
        /// Parser message.
        message: String,
    },

    /// Invalid theme name.
    #[error("Invalid theme name: {0} (expected dark or light)")]
    InvalidTheme(String),

    /// Base URL missing.
    #[error("api_base_url must not be empty")]
    EmptyBaseUrl,

    /// A count that must be positive was zero.
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

fn located(path: Option<&Path>) -> String {
    path.map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["recipes"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn config_default() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "https://dummyjson.com");
        assert_eq!(
            config.fetch_strategy(),
            FetchStrategy::Paged { page_size: 20 }
        );
        assert_eq!(config.login_strategy, LoginStrategy::UserLookup);
        assert_eq!((config.initial_window, config.window_step), (12, 12));
        assert_eq!(config.search_debounce_ms, 300);
        assert!(config.alt_screen);
        assert!(config.mouse);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_from_toml() {
        let config = Config::from_toml_str(
            r#"
            api_base_url = "http://localhost:9000"
            fetch_strategy = "single"
            login_strategy = "credentials"
            initial_window = 6
            window_step = 3
            color_mode = "never"
            theme = "light"
            "#,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:9000");
        assert_eq!(config.fetch_strategy(), FetchStrategy::Single);
        assert_eq!(config.login_strategy, LoginStrategy::Credentials);
        assert_eq!(config.recipes_settings().window, ViewWindow::new(6, 3));
        assert!(!config.use_color());
        assert_eq!(config.theme, ThemePreset::Light);
        assert_eq!(config.page_size, 20, "unset keys keep defaults");
    }

    #[test]
    fn config_rejects_unknown_keys() {
        let err = Config::from_toml_str("colour = \"never\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "page_size = 5\napi_base_url = \"http://file\"\n").unwrap();

        let path_arg = path.to_string_lossy().to_string();
        let config = Config::resolve(&cli(&[
            "--config",
            &path_arg,
            "--api-url",
            "http://flag",
            "--no-mouse",
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "http://flag");
        assert_eq!(config.page_size, 5);
        assert!(!config.mouse);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Config::resolve(&cli(&["--config", "/nonexistent/recipes.toml"])).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn validate_rejects_zero_counts() {
        let mut config = Config::default();
        config.page_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Zero("page_size"))));

        let mut config = Config::default();
        config.window_step = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.api_base_url = "  ".into();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyBaseUrl)));
    }

    #[test]
    fn invalid_theme_name() {
        let mut config = Config::default();
        let err = config.apply_cli(&cli(&["--theme", "neon"])).unwrap_err();
        assert!(err.to_string().contains("neon"));
    }

    #[test]
    fn color_flags() {
        let mut config = Config::default();
        config.apply_cli(&cli(&["--force-color"])).unwrap();
        assert!(config.use_color());
        config.apply_cli(&cli(&["--no-color"])).unwrap();
        assert!(!config.use_color());
    }

    #[test]
    fn diagnostic_string_lists_settings() {
        let config = Config {
            session_file: Some(PathBuf::from("/tmp/s.json")),
            ..Config::default()
        };
        let text = config.to_diagnostic_string();
        assert!(text.contains("API base URL: https://dummyjson.com"));
        assert!(text.contains("Fetch strategy: paged"));
        assert!(text.contains("Session file: /tmp/s.json"));
        assert!(text.contains("Log file: -"));
    }
}
