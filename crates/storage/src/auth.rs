use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use quiz_core::Clock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use thiserror::Error;
use uuid::Uuid;

/// Lifetime of tokens issued by `StaticAuth`.
const STATIC_TOKEN_TTL_SECS: i64 = 3600;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Signed-in admin session as returned by the auth backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub email: String,
}

impl AuthSession {
    /// True if the access token is expired or will be within `margin_secs`.
    #[must_use]
    pub fn expires_within(&self, now: DateTime<Utc>, margin_secs: i64) -> bool {
        self.expires_at - now <= Duration::seconds(margin_secs)
    }
}

/// Bearer token shared between the auth service and request-signing backends.
#[derive(Debug, Clone, Default)]
pub struct AccessToken(Arc<RwLock<Option<String>>>);

impl AccessToken {
    pub fn set(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.0.write() {
            *guard = Some(token.into());
        }
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.0.write() {
            *guard = None;
        }
    }

    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.0.read().ok().and_then(|guard| guard.clone())
    }
}

//
// ─── GATEWAY ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthGatewayError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("session is no longer valid")]
    InvalidRefreshToken,

    #[error("auth backend returned {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("auth transport error: {0}")]
    Transport(String),

    #[error("auth response could not be decoded: {0}")]
    Decode(String),
}

/// Token-based authentication backend.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// # Errors
    ///
    /// Returns `AuthGatewayError::InvalidCredentials` on a bad email/password pair.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthGatewayError>;

    /// Exchange a refresh token for a new session.
    ///
    /// # Errors
    ///
    /// Returns `AuthGatewayError::InvalidRefreshToken` if the token was revoked or unknown.
    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthGatewayError>;

    /// Revoke the session server-side.
    ///
    /// # Errors
    ///
    /// Returns `AuthGatewayError` if the backend rejects the call.
    async fn sign_out(&self, session: &AuthSession) -> Result<(), AuthGatewayError>;
}

/// Accepts a single configured credential pair. Used with local backends.
pub struct StaticAuth {
    email: String,
    password: String,
    clock: Clock,
    refresh_tokens: Mutex<HashSet<String>>,
}

impl StaticAuth {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            clock: Clock::default(),
            refresh_tokens: Mutex::new(HashSet::new()),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn issue(&self) -> Result<AuthSession, AuthGatewayError> {
        let session = AuthSession {
            access_token: Uuid::new_v4().to_string(),
            refresh_token: Uuid::new_v4().to_string(),
            expires_at: self.clock.after_secs(STATIC_TOKEN_TTL_SECS),
            email: self.email.clone(),
        };
        self.refresh_tokens
            .lock()
            .map_err(|e| AuthGatewayError::Transport(e.to_string()))?
            .insert(session.refresh_token.clone());
        Ok(session)
    }
}

#[async_trait]
impl AuthGateway for StaticAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthGatewayError> {
        if !email.trim().eq_ignore_ascii_case(&self.email) || password != self.password {
            return Err(AuthGatewayError::InvalidCredentials);
        }
        self.issue()
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthGatewayError> {
        let known = self
            .refresh_tokens
            .lock()
            .map_err(|e| AuthGatewayError::Transport(e.to_string()))?
            .remove(refresh_token);
        if !known {
            return Err(AuthGatewayError::InvalidRefreshToken);
        }
        self.issue()
    }

    async fn sign_out(&self, session: &AuthSession) -> Result<(), AuthGatewayError> {
        self.refresh_tokens
            .lock()
            .map_err(|e| AuthGatewayError::Transport(e.to_string()))?
            .remove(&session.refresh_token);
        Ok(())
    }
}

//
// ─── SESSION PERSISTENCE ───────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionStoreError {
    #[error("session file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Client-local persistence of the signed-in session.
pub trait SessionStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `SessionStoreError` if stored data cannot be read.
    fn load(&self) -> Result<Option<AuthSession>, SessionStoreError>;

    /// # Errors
    ///
    /// Returns `SessionStoreError` if the session cannot be written.
    fn save(&self, session: &AuthSession) -> Result<(), SessionStoreError>;

    /// # Errors
    ///
    /// Returns `SessionStoreError` if stored data cannot be removed.
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// Stores the session as JSON in a single file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<AuthSession>, SessionStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, session: &AuthSession) -> Result<(), SessionStoreError> {
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keeps the session in memory only.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<AuthSession>>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<AuthSession>, SessionStoreError> {
        Ok(self.slot.lock().ok().and_then(|guard| guard.clone()))
    }

    fn save(&self, session: &AuthSession) -> Result<(), SessionStoreError> {
        if let Ok(mut guard) = self.slot.lock() {
            *guard = Some(session.clone());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        if let Ok(mut guard) = self.slot.lock() {
            *guard = None;
        }
        Ok(())
    }
}
