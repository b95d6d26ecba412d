//! Persisted session marker and surface routing.
//!
//! A stored [`Session`] is the only thing that grants access to the recipes
//! surface. Its token, when present, is opaque and never validated.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::login::Identity;

/// File name used inside the platform data directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// The persisted login marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Display name for the greeting.
    pub first_name: String,
    /// Opaque token, never inspected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Session {
    /// Session for a display name without a token.
    pub fn new(first_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            token: None,
        }
    }

    /// Greeting line for the recipes surface.
    pub fn greeting(&self) -> String {
        format!("Hi, {}", self.first_name)
    }
}

impl From<Identity> for Session {
    fn from(identity: Identity) -> Self {
        Self {
            first_name: identity.first_name,
            token: identity.token,
        }
    }
}

/// Error reading or writing the session store.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Filesystem failure.
    #[error("session file error: {0}")]
    Io(#[from] io::Error),
    /// The file exists but is not a valid session.
    #[error("session file is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the session marker lives.
pub trait SessionStore: Send + Sync {
    /// The stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] when the store cannot be read.
    fn load(&self) -> Result<Option<Session>, SessionError>;

    /// Replace the stored session.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] when the store cannot be written.
    fn save(&self, session: &Session) -> Result<(), SessionError>;

    /// Remove the stored session. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] when the store cannot be modified.
    fn clear(&self) -> Result<(), SessionError>;
}

/// A JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location under the platform data directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "recipes", "recipes")
            .map(|dirs| dirs.data_dir().join(SESSION_FILE_NAME))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let session: Session = serde_json::from_str(&raw)?;
        Ok(Some(session).filter(|s| !s.first_name.is_empty()))
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// An in-process store, for tests and headless use.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that starts logged in.
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        Ok(self.inner.lock().clone())
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        *self.inner.lock() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.inner.lock().take();
        Ok(())
    }
}

/// The two surfaces of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Username/password form.
    Login,
    /// Recipe listing.
    Recipes,
}

/// Outcome of checking a surface against the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Show the requested surface.
    Stay,
    /// Show another surface instead; the requested one does nothing.
    Redirect(Surface),
}

/// Decides which surface a session may see.
pub struct SessionGate<S: SessionStore + ?Sized> {
    store: std::sync::Arc<S>,
}

impl<S: SessionStore + ?Sized> Clone for SessionGate<S> {
    fn clone(&self) -> Self {
        Self {
            store: std::sync::Arc::clone(&self.store),
        }
    }
}

impl<S: SessionStore + ?Sized> SessionGate<S> {
    /// Gate over a shared store.
    pub const fn new(store: std::sync::Arc<S>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The current session. An unreadable store counts as logged out.
    pub fn session(&self) -> Option<Session> {
        match self.store.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "session store unreadable; treating as logged out");
                None
            }
        }
    }

    /// Whether a session marker is present.
    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    /// Where a request for `surface` should go.
    pub fn route(&self, surface: Surface) -> Route {
        match (surface, self.is_authenticated()) {
            (Surface::Login, true) => Route::Redirect(Surface::Recipes),
            (Surface::Recipes, false) => Route::Redirect(Surface::Login),
            _ => Route::Stay,
        }
    }

    /// The surface to show first.
    pub fn landing(&self) -> Surface {
        if self.is_authenticated() {
            Surface::Recipes
        } else {
            Surface::Login
        }
    }

    /// Persist a successful login.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] when the store cannot be written.
    pub fn login(&self, session: &Session) -> Result<(), SessionError> {
        self.store.save(session)?;
        info!(first_name = %session.first_name, "session started");
        Ok(())
    }

    /// Clear the marker. The caller routes to [`Surface::Login`].
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] when the store cannot be modified.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.store.clear()?;
        info!("session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn file_store_roundtrip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/session.json"));
        assert_eq!(store.load().unwrap(), None);

        store.save(&Session::new("Emily")).unwrap();
        assert_eq!(store.load().unwrap().unwrap().first_name, "Emily");

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn file_store_uses_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        let store = FileSessionStore::new(&path);
        store
            .save(&Session {
                first_name: "Emily".into(),
                token: Some("t".into()),
            })
            .unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"firstName\""));
        assert!(raw.contains("\"token\""));
    }

    #[test]
    fn corrupt_file_is_an_error_but_gate_treats_it_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        fs::write(&path, "{not json").unwrap();
        let store = Arc::new(FileSessionStore::new(&path));
        assert!(matches!(store.load(), Err(SessionError::Json(_))));
        assert!(!SessionGate::new(store).is_authenticated());
    }

    #[test]
    fn gate_routes_both_ways() {
        let store = Arc::new(MemorySessionStore::new());
        let gate = SessionGate::new(Arc::clone(&store));
        assert_eq!(gate.route(Surface::Login), Route::Stay);
        assert_eq!(gate.route(Surface::Recipes), Route::Redirect(Surface::Login));
        assert_eq!(gate.landing(), Surface::Login);

        gate.login(&Session::new("Emily")).unwrap();
        assert_eq!(gate.route(Surface::Login), Route::Redirect(Surface::Recipes));
        assert_eq!(gate.route(Surface::Recipes), Route::Stay);
        assert_eq!(gate.session().unwrap().greeting(), "Hi, Emily");

        gate.logout().unwrap();
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn identity_becomes_session() {
        let session = Session::from(Identity {
            first_name: "Michael".into(),
            token: Some("abc".into()),
        });
        assert_eq!(session.first_name, "Michael");
        assert_eq!(session.token.as_deref(), Some("abc"));
    }
}
