use std::sync::{Arc, RwLock};
use std::time::Duration;

use storage::auth::{AccessToken, AuthGateway, AuthSession, SessionStore, SessionStoreError};

use crate::Clock;
use crate::error::AuthError;

/// Refresh when the access token expires within this many seconds.
pub const REFRESH_MARGIN_SECS: i64 = 60;

/// Process-wide admin session: sign-in, persistence and token refresh.
#[derive(Clone)]
pub struct AuthService {
    clock: Clock,
    gateway: Arc<dyn AuthGateway>,
    store: Arc<dyn SessionStore>,
    token: AccessToken,
    current: Arc<RwLock<Option<AuthSession>>>,
}

impl AuthService {
    #[must_use]
    pub fn new(
        clock: Clock,
        gateway: Arc<dyn AuthGateway>,
        store: Arc<dyn SessionStore>,
        token: AccessToken,
    ) -> Self {
        Self {
            clock,
            gateway,
            store,
            token,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Load a persisted session and refresh it if needed.
    /// An unreadable session file is discarded.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the session file cannot be read or removed.
    pub async fn restore(&self) -> Result<Option<AuthSession>, AuthError> {
        let loaded = match self.store.load() {
            Ok(loaded) => loaded,
            Err(SessionStoreError::Corrupt(err)) => {
                log::warn!("discarding unreadable session: {err}");
                self.store.clear()?;
                None
            }
            Err(err) => return Err(err.into()),
        };
        let Some(session) = loaded else {
            return Ok(None);
        };
        self.install(session);
        self.ensure_fresh().await
    }

    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for a wrong email/password pair.
    /// Returns `AuthError::Gateway` or `AuthError::Store` on backend or file failures.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let session = self.gateway.sign_in(email.trim(), password).await?;
        self.store.save(&session)?;
        self.install(session.clone());
        log::info!("signed in as {}", session.email);
        Ok(session)
    }

    /// Revoke the session remotely (best effort) and forget it locally.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the persisted session cannot be removed.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(session) = self.current() {
            if let Err(err) = self.gateway.sign_out(&session).await {
                log::warn!("remote sign-out failed: {err}");
            }
        }
        self.forget()
    }

    /// Return a session whose token is valid for at least the refresh margin,
    /// refreshing it if necessary. A failed refresh signs the user out.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the refreshed session cannot be persisted.
    pub async fn ensure_fresh(&self) -> Result<Option<AuthSession>, AuthError> {
        let Some(session) = self.current() else {
            return Ok(None);
        };
        if !session.expires_within(self.clock.now(), REFRESH_MARGIN_SECS) {
            return Ok(Some(session));
        }
        match self.gateway.refresh(&session.refresh_token).await {
            Ok(renewed) => {
                self.store.save(&renewed)?;
                self.install(renewed.clone());
                log::debug!("refreshed session for {}", renewed.email);
                Ok(Some(renewed))
            }
            Err(err) => {
                log::warn!("session refresh failed, signing out: {err}");
                self.forget()?;
                Ok(None)
            }
        }
    }

    /// Time left before the current token enters the refresh margin.
    /// Zero once it has; `None` while signed out.
    #[must_use]
    pub fn refresh_due_in(&self) -> Option<Duration> {
        let session = self.current()?;
        let due = session.expires_at
            - chrono::Duration::seconds(REFRESH_MARGIN_SECS)
            - self.clock.now();
        Some(due.to_std().unwrap_or_default())
    }

    #[must_use]
    pub fn current(&self) -> Option<AuthSession> {
        self.current.read().ok().and_then(|guard| guard.clone())
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.current().is_some()
    }

    fn install(&self, session: AuthSession) {
        self.token.set(session.access_token.clone());
        if let Ok(mut guard) = self.current.write() {
            *guard = Some(session);
        }
    }

    fn forget(&self) -> Result<(), AuthError> {
        self.token.clear();
        if let Ok(mut guard) = self.current.write() {
            *guard = None;
        }
        self.store.clear()?;
        Ok(())
    }
}
