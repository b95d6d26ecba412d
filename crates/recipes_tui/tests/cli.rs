//! Binary tests for the headless commands.
//!
//! Each test points the session file and config at a temp dir so the user's
//! real state is never read or touched.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "").unwrap();
        Self { dir }
    }

    fn session_file(&self) -> PathBuf {
        self.dir.path().join("session.json")
    }

    fn config_file(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn write_session(&self, first_name: &str) {
        std::fs::write(
            self.session_file(),
            format!(r#"{{ "firstName": "{first_name}" }}"#),
        )
        .unwrap();
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("recipes").unwrap();
        cmd.env_remove("RECIPES_API_URL")
            .env_remove("RECIPES_LOG_FILE")
            .env("RECIPES_CONFIG", self.config_file())
            .env("RECIPES_SESSION_FILE", self.session_file());
        cmd
    }
}

fn exists(path: &Path) -> bool {
    path.try_exists().unwrap_or(false)
}

#[test]
fn help_lists_commands() {
    Command::cargo_bin("recipes")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Recipe Book"))
        .stdout(predicate::str::contains("whoami"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn whoami_without_session() {
    let env = Env::new();
    env.cmd()
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn whoami_with_session() {
    let env = Env::new();
    env.write_session("Emily");
    env.cmd()
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as Emily."));
}

#[test]
fn logout_removes_session_file() {
    let env = Env::new();
    env.write_session("Emily");
    env.cmd()
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));
    assert!(!exists(&env.session_file()));

    // Logging out twice is fine.
    env.cmd().arg("logout").assert().success();
}

#[test]
fn list_requires_session() {
    let env = Env::new();
    env.cmd()
        .args(["--api-url", "http://127.0.0.1:9", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("You must be logged in"));
}

#[test]
fn list_reports_unreachable_api() {
    let env = Env::new();
    env.write_session("Emily");
    env.cmd()
        .args(["--api-url", "http://127.0.0.1:9", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not reach the recipe service"));
}

#[test]
fn config_shows_precedence() {
    let env = Env::new();
    std::fs::write(
        env.config_file(),
        "api_base_url = \"http://from-file\"\npage_size = 7\n",
    )
    .unwrap();
    env.cmd()
        .env("RECIPES_API_URL", "http://from-env")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("API base URL: http://from-env"))
        .stdout(predicate::str::contains("Page size: 7"));

    env.cmd()
        .env("RECIPES_API_URL", "http://from-env")
        .args(["--api-url", "http://from-flag", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("API base URL: http://from-flag"));
}

#[test]
fn invalid_config_fails() {
    let env = Env::new();
    std::fs::write(env.config_file(), "page_size = 0\n").unwrap();
    env.cmd()
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("page_size must be greater than zero"));
}
