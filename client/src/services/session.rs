//! # Session Store
//!
//! Persisted auth token + user cache, the native analog of the SPA's fixed
//! localStorage keys. The file is loaded once at startup, written on
//! login/signup and profile refresh, and cleared on logout or when the
//! backend rejects the token.
//!
//! [`SessionStore::expire`] is the single-redirect guard: under concurrent
//! 401 responses only the first caller observes the logged-in → logged-out
//! transition, so the session-expired event fires exactly once per expiry.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use shared::dto::auth::{AuthResponse, UserProfile};
use std::path::{Path, PathBuf};

/// Default location of the session file, next to the executable's cwd
const DEFAULT_SESSION_FILE: &str = "./jetpicks-session.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionData {
    token: Option<String>,
    user: Option<UserProfile>,
}

/// Thread-safe token/user cache with JSON file persistence
pub struct SessionStore {
    inner: RwLock<SessionData>,
    path: PathBuf,
}

impl SessionStore {
    /// Resolve the session file path (`JETPICKS_SESSION_FILE` overrides)
    pub fn default_path() -> PathBuf {
        std::env::var("JETPICKS_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE))
    }

    /// Load the session from `path`, starting empty if the file is missing
    /// or unreadable. Load failures are logged, never fatal.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<SessionData>(&raw) {
                Ok(data) => {
                    tracing::info!(path = %path.display(), "loaded stored session");
                    data
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "session file corrupt, starting logged out");
                    SessionData::default()
                }
            },
            Err(_) => SessionData::default(),
        };
        Self {
            inner: RwLock::new(data),
            path,
        }
    }

    /// Current bearer token, if logged in
    pub fn token(&self) -> Option<String> {
        self.inner.read().token.clone()
    }

    /// Cached user profile, if logged in
    pub fn user(&self) -> Option<UserProfile> {
        self.inner.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().token.is_some()
    }

    /// Store a fresh login/signup result and persist it. Re-arms the
    /// expire-once guard.
    pub fn store(&self, auth: &AuthResponse) {
        {
            let mut data = self.inner.write();
            data.token = Some(auth.token.clone());
            data.user = Some(auth.user.clone());
        }
        self.persist();
    }

    /// Refresh the cached user profile (token unchanged)
    pub fn update_user(&self, user: &UserProfile) {
        {
            let mut data = self.inner.write();
            data.user = Some(user.clone());
        }
        self.persist();
    }

    /// Explicit logout: clear memory and disk
    pub fn clear(&self) {
        {
            let mut data = self.inner.write();
            *data = SessionData::default();
        }
        self.persist();
    }

    /// Expire the session after a 401. Returns `true` only for the call
    /// that performed the logged-in → logged-out transition; concurrent
    /// callers get `false`.
    pub fn expire(&self) -> bool {
        let transitioned = {
            let mut data = self.inner.write();
            if data.token.is_some() {
                *data = SessionData::default();
                true
            } else {
                false
            }
        };
        if transitioned {
            self.persist();
        }
        transitioned
    }

    fn persist(&self) {
        let data = self.inner.read().clone();
        match serde_json::to_string_pretty(&data) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    tracing::warn!(path = %self.path.display(), error = %e, "failed to persist session");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to serialize session"),
        }
    }

    #[allow(dead_code)]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}
