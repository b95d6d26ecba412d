//! Tracing subscriber setup.
//!
//! The browser owns the terminal, so it only ever logs to a file. Headless
//! commands may log to stderr. `RUST_LOG` overrides the `-v` level.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// No subscriber is installed.
    Off,
    /// Standard error (headless commands only).
    Stderr,
    /// Appended to a file.
    File(PathBuf),
}

impl LogTarget {
    /// Pick a target. A log file always wins; otherwise headless commands log
    /// to stderr when `-v` was given, and the browser logs nowhere.
    #[must_use]
    pub fn choose(log_file: Option<&Path>, verbosity: u8, interactive: bool) -> Self {
        match log_file {
            Some(path) => Self::File(path.to_path_buf()),
            None if verbosity > 0 && !interactive => Self::Stderr,
            None => Self::Off,
        }
    }
}

/// Default filter directive for a `-v` count.
#[must_use]
pub const fn level_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Failure to install logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log file could not be opened.
    #[error("cannot open log file {}: {source}", .path.display())]
    Open {
        /// Requested file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// A global subscriber was already set.
    #[error("logging already initialized: {0}")]
    Install(String),
}

/// Install the global subscriber for `target`.
///
/// # Errors
///
/// Returns [`LoggingError`] if the file cannot be opened or a subscriber is
/// already installed.
pub fn init(target: &LogTarget, verbosity: u8) -> Result<(), LoggingError> {
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_directive(verbosity)))
    };
    let result = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init(),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .try_init()
        }
    };
    result.map_err(|e| LoggingError::Install(e.to_string()))?;
    tracing::debug!(?target, "logging initialized");
    Ok(())
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    let open = || -> std::io::Result<File> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(path)
    };
    open().map_err(|source| LoggingError::Open {
        path: path.to_path_buf(),
        source,
    })
}
