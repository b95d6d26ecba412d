//! Login form state and authentication.
//!
//! The form validates locally before anything touches the network: an empty
//! username or password is reported inline and no request is made. A
//! submission in flight blocks further submissions until [`LoginForm::finish`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Submit control label while idle.
pub const LOGIN_LABEL: &str = "Login";

/// Submit control label while a request is in flight.
pub const LOADING_LABEL: &str = "Logging in...";

/// A validated username/password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Trimmed, non-empty username.
    pub username: String,
    /// Non-empty password, sent as typed.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Who logged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Display name shown in the greeting.
    pub first_name: String,
    /// Opaque token, if the authenticator issued one.
    pub token: Option<String>,
}

impl Identity {
    /// Message shown after a successful login.
    pub fn welcome(&self) -> String {
        format!("Login successful. Welcome, {}!", self.first_name)
    }
}

/// A local validation failure. Never involves the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Username empty after trimming.
    #[error("Username is required.")]
    EmptyUsername,
    /// Password empty.
    #[error("Password must not be empty.")]
    EmptyPassword,
}

/// Why a login attempt did not produce an [`Identity`].
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// The form failed local validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A submission is already in flight.
    #[error("login already in progress")]
    InProgress,

    /// No user with that username exists.
    #[error("unknown username")]
    UnknownUser,

    /// The server refused the credentials.
    #[error("login rejected: {0}")]
    Rejected(String),

    /// The request itself failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl LoginError {
    /// Message for the login surface's message region.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(v) => v.to_string(),
            Self::InProgress => "Please wait, logging in...".to_string(),
            Self::UnknownUser => "Username not found or incorrect.".to_string(),
            Self::Rejected(message) => message.clone(),
            Self::Api(_) => "Could not connect to the API. Please try again.".to_string(),
        }
    }
}

/// How a login is verified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoginStrategy {
    /// Fetch the user list and match the username; the password is only
    /// required to be non-empty.
    #[default]
    UserLookup,
    /// Post the credentials to the auth endpoint.
    Credentials,
}

/// Something that can turn credentials into an identity.
pub trait Authenticator {
    /// Verify `credentials`. Makes at most one network request.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::UnknownUser`], [`LoginError::Rejected`] or
    /// [`LoginError::Api`] depending on how the attempt failed.
    fn authenticate(&self, credentials: &Credentials) -> Result<Identity, LoginError>;
}

impl<A: Authenticator + ?Sized> Authenticator for &A {
    fn authenticate(&self, credentials: &Credentials) -> Result<Identity, LoginError> {
        (**self).authenticate(credentials)
    }
}

impl<A: Authenticator + ?Sized> Authenticator for Arc<A> {
    fn authenticate(&self, credentials: &Credentials) -> Result<Identity, LoginError> {
        (**self).authenticate(credentials)
    }
}

/// The login form.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    /// Username as typed.
    pub username: String,
    /// Password as typed.
    pub password: String,
    loading: bool,
}

impl LoginForm {
    /// Empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a submission is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Label for the submit control.
    #[must_use]
    pub const fn button_label(&self) -> &'static str {
        if self.loading {
            LOADING_LABEL
        } else {
            LOGIN_LABEL
        }
    }

    /// Check the fields without submitting.
    ///
    /// # Errors
    ///
    /// Username is checked first, then password.
    pub fn validate(&self) -> Result<Credentials, ValidationError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(ValidationError::EmptyUsername);
        }
        if self.password.is_empty() {
            return Err(ValidationError::EmptyPassword);
        }
        Ok(Credentials {
            username: username.to_string(),
            password: self.password.clone(),
        })
    }

    /// Validate and enter the loading state.
    ///
    /// # Errors
    ///
    /// [`LoginError::InProgress`] while loading, otherwise
    /// [`LoginError::Validation`]. Neither changes the loading state.
    pub fn begin_submit(&mut self) -> Result<Credentials, LoginError> {
        if self.loading {
            return Err(LoginError::InProgress);
        }
        let credentials = self.validate()?;
        self.loading = true;
        Ok(credentials)
    }

    /// Leave the loading state, re-enabling the submit control.
    pub fn finish(&mut self) {
        self.loading = false;
    }

    /// Validate, authenticate and finish in one step.
    ///
    /// # Errors
    ///
    /// Any [`LoginError`]; validation failures never reach `authenticator`.
    pub fn submit<A: Authenticator + ?Sized>(
        &mut self,
        authenticator: &A,
    ) -> Result<Identity, LoginError> {
        let credentials = self.begin_submit()?;
        let result = authenticator.authenticate(&credentials);
        self.finish();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Counts calls and answers from a fixed table.
    #[derive(Default)]
    struct CountingAuth {
        calls: Mutex<Vec<String>>,
    }

    impl Authenticator for CountingAuth {
        fn authenticate(&self, credentials: &Credentials) -> Result<Identity, LoginError> {
            self.calls.lock().push(credentials.username.clone());
            if credentials.username == "emilys" {
                Ok(Identity {
                    first_name: "Emily".into(),
                    token: None,
                })
            } else {
                Err(LoginError::UnknownUser)
            }
        }
    }

    fn form(username: &str, password: &str) -> LoginForm {
        LoginForm {
            username: username.into(),
            password: password.into(),
            ..LoginForm::default()
        }
    }

    #[test]
    fn empty_password_makes_no_request() {
        let auth = CountingAuth::default();
        let mut f = form("emilys", "");
        let err = f.submit(&auth).unwrap_err();
        assert!(matches!(
            err,
            LoginError::Validation(ValidationError::EmptyPassword)
        ));
        assert!(auth.calls.lock().is_empty());
        assert!(!f.is_loading());
    }

    #[test]
    fn blank_username_is_checked_first() {
        let mut f = form("   ", "");
        assert!(matches!(
            f.begin_submit(),
            Err(LoginError::Validation(ValidationError::EmptyUsername))
        ));
    }

    #[test]
    fn username_is_trimmed_password_is_not() {
        let creds = form("  emilys ", " pw ").validate().unwrap();
        assert_eq!(creds.username, "emilys");
        assert_eq!(creds.password, " pw ");
    }

    #[test]
    fn loading_blocks_resubmission() {
        let mut f = form("emilys", "pw");
        f.begin_submit().unwrap();
        assert!(f.is_loading());
        assert_eq!(f.button_label(), "Logging in...");
        assert!(matches!(f.begin_submit(), Err(LoginError::InProgress)));
        f.finish();
        assert_eq!(f.button_label(), "Login");
        assert!(f.begin_submit().is_ok());
    }

    #[test]
    fn submit_success_and_failure_reenable() {
        let auth = CountingAuth::default();
        let mut ok = form("emilys", "pw");
        let id = ok.submit(&auth).unwrap();
        assert_eq!(id.welcome(), "Login successful. Welcome, Emily!");
        assert!(!ok.is_loading());

        let mut bad = form("ghost", "pw");
        let err = bad.submit(&auth).unwrap_err();
        assert_eq!(err.user_message(), "Username not found or incorrect.");
        assert!(!bad.is_loading());
        assert_eq!(auth.calls.lock().len(), 2);
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = form("a", "hunter2").validate().unwrap();
        assert!(!format!("{creds:?}").contains("hunter2"));
    }

    #[test]
    fn api_errors_have_generic_message() {
        let err = LoginError::from(ApiError::status(503, "down"));
        assert_eq!(
            err.user_message(),
            "Could not connect to the API. Please try again."
        );
    }

    #[test]
    fn strategy_names() {
        let s: LoginStrategy = serde_json::from_str(r#""user-lookup""#).unwrap();
        assert_eq!(s, LoginStrategy::UserLookup);
        let s: LoginStrategy = serde_json::from_str(r#""credentials""#).unwrap();
        assert_eq!(s, LoginStrategy::Credentials);
    }
}
