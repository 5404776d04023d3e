// valet-client/src/session.rs
// Session token storage, JSON file in place of the browser's auth_token cookie

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Name of the stored auth token
pub const AUTH_TOKEN_NAME: &str = "auth_token";

/// Sessions expire one day after sign-in
pub fn session_ttl() -> Duration {
    Duration::days(1)
}

/// Stored session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// New session valid for [`session_ttl`] from `now`
    pub fn issued_at(token: impl Into<String>, user_id: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            user_id,
            expires_at: now + session_ttl(),
        }
    }

    pub fn new(token: impl Into<String>, user_id: Option<String>) -> Self {
        Self::issued_at(token, user_id, Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Session storage
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Session file lives at `{base_path}/auth_token.json`
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let path = base_path.into().join(format!("{AUTH_TOKEN_NAME}.json"));
        Self { path }
    }

    /// Write the session. The file is replaced in one step, a reader never
    /// sees a half-written token.
    pub fn save(&self, session: &Session) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, serde_json::to_vec_pretty(session)?)?;
        fs::rename(&staging, &self.path)
    }

    /// Load the session; expired or unreadable sessions yield `None`
    pub fn load(&self) -> Option<Session> {
        self.load_at(Utc::now())
    }

    pub fn load_at(&self, now: DateTime<Utc>) -> Option<Session> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Session file unreadable");
                return None;
            }
        };
        let session = match serde_json::from_slice::<Session>(&bytes) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Session file corrupt, ignoring");
                return None;
            }
        };
        if session.is_expired_at(now) {
            tracing::debug!(expires_at = %session.expires_at, "Stored session expired");
            return None;
        }
        Some(session)
    }

    /// Bearer token of the live session, if any
    pub fn token(&self) -> Option<String> {
        self.load().map(|s| s.token)
    }

    /// A session file is present (live or expired)
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Logout. Missing files are fine.
    pub fn clear(&self) -> std::io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
