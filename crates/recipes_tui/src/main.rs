#![forbid(unsafe_code)]

//! # Recipe Book
//!
//! Terminal recipe browser.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p recipes_tui
//! cargo run -p recipes_tui -- list --query chicken
//! ```

use std::sync::Arc;

use anyhow::Context;
use recipes_core::{ApiClient, FileSessionStore, SessionGate, SessionStore};
use tracing::info;

use recipes_tui::app::{App, Services};
use recipes_tui::cli::{Cli, Command, ListArgs};
use recipes_tui::config::Config;
use recipes_tui::headless;
use recipes_tui::logging::{self, LogTarget};
use recipes_tui::runtime::{Program, ProgramOptions};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let config = Config::resolve(&cli).context("invalid configuration")?;

    let target = LogTarget::choose(
        config.log_file.as_deref(),
        config.verbosity,
        cli.is_interactive(),
    );
    logging::init(&target, config.verbosity)?;

    match cli.command() {
        Command::Browse => browse(&config),
        Command::Whoami => {
            println!("{}", headless::whoami(&gate(&config)?));
            Ok(())
        }
        Command::Logout => {
            gate(&config)?.logout().context("could not clear the session")?;
            println!("Logged out.");
            Ok(())
        }
        Command::List(args) => list(&config, &args),
        Command::Config => {
            println!("{}", config.to_diagnostic_string());
            Ok(())
        }
    }
}

fn session_store(config: &Config) -> anyhow::Result<Arc<dyn SessionStore>> {
    let path = config
        .session_path()
        .context("no place to store the session; pass --session-file")?;
    Ok(Arc::new(FileSessionStore::new(path)))
}

fn gate(config: &Config) -> anyhow::Result<SessionGate<dyn SessionStore>> {
    Ok(SessionGate::new(session_store(config)?))
}

fn browse(config: &Config) -> anyhow::Result<()> {
    let client = Arc::new(ApiClient::new(config.api_config()).context("cannot build HTTP client")?);
    let services = Services {
        recipes: client.clone(),
        auth: client,
        sessions: session_store(config)?,
    };
    info!(api = %config.api_base_url, "starting browser");

    Program::new(App::new(services, config.app_settings()))
        .with_options(ProgramOptions {
            alt_screen: config.alt_screen,
            mouse: config.mouse,
            ..ProgramOptions::default()
        })
        .run()?;
    Ok(())
}

fn list(config: &Config, args: &ListArgs) -> anyhow::Result<()> {
    let client = ApiClient::new(config.api_config()).context("cannot build HTTP client")?;
    let settings = config.recipes_settings();
    let text = headless::list(
        &client,
        &gate(config)?,
        settings.fetch_strategy,
        settings.window,
        args,
    )?;
    println!("{text}");
    Ok(())
}
