//! Admin authentication against Supabase Auth (GoTrue).
//!
//! The client keeps the current session in memory, refreshes it shortly before
//! the access token expires and broadcasts auth transitions to subscribers.

use crate::config::Config;
use serde::Deserialize;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Shown when the backend rejects a sign-in without a message.
pub const DEFAULT_SIGN_IN_ERROR: &str = "Invalid email or password";

/// Refresh this long before the access token runs out.
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend refused the credentials; carries its message text.
    #[error("{0}")]
    Rejected(String),

    #[error("auth request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl AuthError {
    /// Text to show on the login form.
    pub fn user_message(&self) -> &str {
        match self {
            AuthError::Rejected(message) => message,
            AuthError::Transport(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
    pub user: AuthUser,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Session),
    TokenRefreshed(Session),
    SignedOut,
}

/// A session plus the moment its access token expires.
#[derive(Debug, Clone)]
struct StoredSession {
    session: Session,
    expires_at: Option<Instant>,
}

impl StoredSession {
    fn new(session: Session) -> Self {
        let expires_at = session
            .expires_in
            .map(|secs| Instant::now() + Duration::from_secs(secs));
        Self {
            session,
            expires_at,
        }
    }

    fn needs_refresh(&self) -> bool {
        self.expires_at
            .is_some_and(|at| Instant::now() + REFRESH_MARGIN >= at)
    }
}

/// Error payloads differ between GoTrue versions.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
    }
}

/// Handle for an auth-state listener. Dropping it unsubscribes.
#[derive(Debug)]
pub struct AuthSubscription {
    handle: JoinHandle<()>,
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub struct AuthClient {
    client: reqwest::Client,
    auth_url: String,
    anon_key: String,
    session: RwLock<Option<StoredSession>>,
    events: broadcast::Sender<AuthEvent>,
}

impl AuthClient {
    pub fn new(supabase_url: &str, anon_key: &str) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            client: reqwest::Client::new(),
            auth_url: format!("{}/auth/v1", supabase_url.trim_end_matches('/')),
            anon_key: anon_key.to_string(),
            session: RwLock::new(None),
            events,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.supabase_url, &config.supabase_anon_key)
    }

    /// Sign in with email and password. The email is trimmed.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let email = email.trim();
        debug!("Signing in {}", email);

        let response = self
            .client
            .post(format!("{}/token", self.auth_url))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body: ErrorBody = response.json().await.unwrap_or_default();
            let message = body
                .into_message()
                .unwrap_or_else(|| DEFAULT_SIGN_IN_ERROR.to_string());
            warn!("Sign-in rejected ({}): {}", status, message);
            return Err(AuthError::Rejected(message));
        }

        let session: Session = response.json().await?;
        info!("Admin signed in: {}", session.user.email.as_deref().unwrap_or(&session.user.id));

        *self.session.write().await = Some(StoredSession::new(session.clone()));
        let _ = self.events.send(AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let response = self
            .client
            .post(format!("{}/token", self.auth_url))
            .query(&[("grant_type", "refresh_token")])
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body: ErrorBody = response.json().await.unwrap_or_default();
            let message = body.into_message().unwrap_or_else(|| status.to_string());
            return Err(AuthError::Rejected(message));
        }

        Ok(response.json().await?)
    }

    /// Sign out. Local state is cleared even when revoking the token
    /// remotely fails.
    pub async fn sign_out(&self) {
        let Some(StoredSession { session, .. }) = self.session.write().await.take() else {
            return;
        };

        let result = self
            .client
            .post(format!("{}/logout", self.auth_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => info!("Admin signed out"),
            Ok(response) => warn!("Remote sign-out returned {}", response.status()),
            Err(e) => warn!("Remote sign-out failed: {}", e),
        }

        let _ = self.events.send(AuthEvent::SignedOut);
    }

    /// The stored session as it is, without refreshing.
    pub async fn get_session(&self) -> Option<Session> {
        let guard = self.session.read().await;
        (*guard).as_ref().map(|stored| stored.session.clone())
    }

    /// The current session with a usable access token. A token close to
    /// expiry is refreshed first; if that fails the session is dropped and
    /// `SignedOut` is broadcast.
    pub async fn active_session(&self) -> Option<Session> {
        let mut guard = self.session.write().await;
        let stored = (*guard).as_ref()?;
        if !stored.needs_refresh() {
            return Some(stored.session.clone());
        }

        let result = match stored.session.refresh_token.clone() {
            Some(token) => self.refresh(&token).await,
            None => Err(AuthError::Rejected("session has no refresh token".to_string())),
        };

        match result {
            Ok(session) => {
                debug!("Access token refreshed");
                *guard = Some(StoredSession::new(session.clone()));
                let _ = self.events.send(AuthEvent::TokenRefreshed(session.clone()));
                Some(session)
            }
            Err(e) => {
                warn!("Session refresh failed, signing out: {}", e);
                *guard = None;
                drop(guard);
                let _ = self.events.send(AuthEvent::SignedOut);
                None
            }
        }
    }

    /// Call `listener` on every auth transition until the returned
    /// subscription is dropped.
    pub fn on_auth_state_change<F>(&self, listener: F) -> AuthSubscription
    where
        F: Fn(AuthEvent) + Send + 'static,
    {
        let mut receiver = self.events.subscribe();
        let handle = tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => listener(event),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Auth listener skipped {} events", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        AuthSubscription { handle }
    }
}
