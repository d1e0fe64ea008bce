//! # Credential Storage
//!
//! The session is two tokens:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Token           Lifetime            Used for                           │
//! │  ─────           ────────            ────────                           │
//! │  access token    max-age (1200 s)    Authorization header               │
//! │  refresh token   until logout        minting a new access token         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both are written in a single `save`, so a failed login or register can
//! never leave half a session behind.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClientResult;

/// Drops the `Bearer ` scheme the API puts in front of access tokens.
pub fn strip_bearer(token: &str) -> &str {
    token.strip_prefix("Bearer ").unwrap_or(token)
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCredentials {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub access_expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl StoredCredentials {
    /// Session as returned by login, register or a token refresh.
    ///
    /// An expiry past the end of the calendar saturates.
    pub fn issue(access_token: &str, refresh_token: &str, max_age: Duration) -> Self {
        let expires_at = Utc::now()
            .checked_add_signed(max_age)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        StoredCredentials {
            access_token: Some(strip_bearer(access_token).to_string()),
            access_expires_at: Some(expires_at),
            refresh_token: Some(refresh_token.to_string()),
        }
    }

    /// Access token if it has not expired at `now`.
    pub fn valid_access_token(&self, now: DateTime<Utc>) -> Option<&str> {
        let token = self.access_token.as_deref().filter(|t| !t.is_empty())?;
        match self.access_expires_at {
            Some(expires) if expires <= now => None,
            _ => Some(token),
        }
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Where the session lives between runs.
pub trait CredentialStore: Send + Sync {
    /// Missing storage loads as an empty session.
    fn load(&self) -> ClientResult<StoredCredentials>;

    fn save(&self, credentials: &StoredCredentials) -> ClientResult<()>;

    fn clear(&self) -> ClientResult<()>;

    fn access_token(&self) -> Option<String> {
        let credentials = self.load().ok()?;
        credentials.valid_access_token(Utc::now()).map(str::to_owned)
    }

    fn refresh_token(&self) -> Option<String> {
        self.load().ok()?.refresh_token().map(str::to_owned)
    }

    /// Something worth presenting to the API: a live access token or a
    /// refresh token that can mint one.
    fn has_session(&self) -> bool {
        self.access_token().is_some() || self.refresh_token().is_some()
    }
}

// =============================================================================
// File Store
// =============================================================================

/// JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCredentialStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> ClientResult<StoredCredentials> {
        if !self.path.exists() {
            return Ok(StoredCredentials::default());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, credentials: &StoredCredentials) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Write-then-rename keeps the previous session intact if the write fails.
        let staging = self.path.with_extension("json.tmp");
        std::fs::write(&staging, serde_json::to_vec_pretty(credentials)?)?;
        std::fs::rename(&staging, &self.path)?;
        debug!(path = ?self.path, "Session saved");
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = ?self.path, "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// Process-local session, for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<StoredCredentials>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: StoredCredentials) -> Self {
        MemoryCredentialStore {
            inner: Mutex::new(credentials),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> ClientResult<StoredCredentials> {
        Ok(self.inner.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, credentials: &StoredCredentials) -> ClientResult<()> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = credentials.clone();
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = StoredCredentials::default();
        Ok(())
    }
}
