//! HTTP client for the public recipe/user API.
//!
//! Wraps a blocking `reqwest` client. Three endpoints are used:
//!
//! - `GET {base}/recipes?limit=L&skip=S`: a page of recipes plus `total`
//! - `GET {base}/users?limit=0`: every user, for username lookup
//! - `POST {base}/auth/login`: credential check returning `firstName`/token

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::fetch::RecipeSource;
use crate::login::{Authenticator, Credentials, Identity, LoginError, LoginStrategy};
use crate::recipe::RecipePage;

/// Public API used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Display name used when a user record has no first name.
const FALLBACK_NAME: &str = "User";

/// Configuration for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
    /// How [`Authenticator::authenticate`] verifies a login.
    pub login_strategy: LoginStrategy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            login_strategy: LoginStrategy::default(),
        }
    }
}

/// A user record from `/users`; only the fields the login flow reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Login name.
    #[serde(default)]
    pub username: String,
    /// Given name, used as the display name.
    #[serde(default)]
    pub first_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsersResponse {
    #[serde(default)]
    users: Vec<UserRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default, alias = "token")]
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Blocking client for the recipe API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialize).
    pub fn new(mut config: ApiConfig) -> Result<Self, ApiError> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// The active configuration.
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// URL of one recipe page.
    pub fn recipes_url(&self, limit: usize, skip: usize) -> String {
        format!("{}/recipes?limit={limit}&skip={skip}", self.config.base_url)
    }

    /// URL of the full user list.
    pub fn users_url(&self) -> String {
        format!("{}/users?limit=0", self.config.base_url)
    }

    /// URL of the credential check.
    pub fn login_url(&self) -> String {
        format!("{}/auth/login", self.config.base_url)
    }

    fn get(&self, url: &str) -> Result<Response, ApiError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, concat!("recipes-tui/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json")
            .send()?;
        ensure_success(response)
    }

    /// Fetch every user.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx, or bad JSON.
    pub fn fetch_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        let body: UsersResponse = self.get(&self.users_url())?.json()?;
        Ok(body.users)
    }

    fn authenticate_by_lookup(&self, credentials: &Credentials) -> Result<Identity, LoginError> {
        let users = self.fetch_users()?;
        let user = find_user(&users, &credentials.username).ok_or(LoginError::UnknownUser)?;
        Ok(identity_from_user(user))
    }

    fn authenticate_by_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<Identity, LoginError> {
        let url = self.login_url();
        debug!(url, "POST");
        let response = self
            .client
            .post(&url)
            .header(USER_AGENT, concat!("recipes-tui/", env!("CARGO_PKG_VERSION")))
            .json(&serde_json::json!({
                "username": credentials.username,
                "password": credentials.password,
            }))
            .send()
            .map_err(ApiError::from)?;

        let status = response.status();
        let body = response.text().map_err(ApiError::from)?;
        parse_login_response(status.as_u16(), &body)
    }
}

impl RecipeSource for ApiClient {
    fn fetch_page(&self, limit: usize, skip: usize) -> Result<RecipePage, ApiError> {
        let page: RecipePage = self.get(&self.recipes_url(limit, skip))?.json()?;
        Ok(page)
    }
}

impl Authenticator for ApiClient {
    fn authenticate(&self, credentials: &Credentials) -> Result<Identity, LoginError> {
        let identity = match self.config.login_strategy {
            LoginStrategy::UserLookup => self.authenticate_by_lookup(credentials),
            LoginStrategy::Credentials => self.authenticate_by_credentials(credentials),
        }?;
        info!(username = %credentials.username, "login succeeded");
        Ok(identity)
    }
}

fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(ApiError::status(
        status.as_u16(),
        error_message(&body)
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_default(),
    ))
}

/// `message` field of a JSON error body, if present.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

/// Case-insensitive username match.
pub fn find_user<'a>(users: &'a [UserRecord], username: &str) -> Option<&'a UserRecord> {
    let wanted = username.trim().to_lowercase();
    users.iter().find(|u| u.username.to_lowercase() == wanted)
}

fn identity_from_user(user: &UserRecord) -> Identity {
    let first_name = user
        .first_name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(FALLBACK_NAME);
    Identity {
        first_name: first_name.to_string(),
        token: None,
    }
}

/// Interpret a `/auth/login` response.
///
/// # Errors
///
/// Non-2xx statuses become [`LoginError::Rejected`] carrying the server's
/// message; malformed success bodies become [`LoginError::Api`].
pub fn parse_login_response(status: u16, body: &str) -> Result<Identity, LoginError> {
    if !(200..300).contains(&status) {
        let message = error_message(body).unwrap_or_else(|| "Login failed!".to_string());
        return Err(LoginError::Rejected(message));
    }
    let parsed: LoginResponse =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(Identity {
        first_name: parsed
            .first_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_NAME.to_string()),
        token: parsed.access_token,
    })
}
