//! Sign-in and session handling.
//!
//! Credentials are checked by an external identity provider behind the
//! [`AuthProvider`] trait. A successful sign-in yields a [`Session`], which
//! is persisted by [`SessionStore`] so later runs can resume it.

pub mod firebase;
pub mod session;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use secrecy::{ExposeSecret, SecretString};

use crate::error::{HelpdeskError, Result};

pub use firebase::FirebaseAuth;
pub use session::{SessionStore, resolve_session, sign_in};

/// Email and password as typed on the login form.
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let email = email.into().trim().to_string();
        let password: String = password.into();
        if email.is_empty() || password.is_empty() {
            return Err(HelpdeskError::Validation(
                "Please enter your email and password.".to_string(),
            ));
        }
        Ok(Self {
            email,
            password: SecretString::from(password),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// An authenticated identity.
pub struct Session {
    pub email: String,
    pub user_id: String,
    id_token: SecretString,
    refresh_token: Option<SecretString>,
    pub expires_at: Timestamp,
}

impl Session {
    pub fn new(
        email: impl Into<String>,
        user_id: impl Into<String>,
        id_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_at: Timestamp,
    ) -> Self {
        Self {
            email: email.into(),
            user_id: user_id.into(),
            id_token: SecretString::from(id_token.into()),
            refresh_token: refresh_token.filter(|t| !t.is_empty()).map(SecretString::from),
            expires_at,
        }
    }

    /// Local identity used when sign-in is switched off.
    pub fn guest() -> Self {
        Self::new("guest", "guest", "", None, Timestamp::MAX)
    }

    pub fn is_guest(&self) -> bool {
        self.user_id == "guest"
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at <= now
    }

    pub fn id_token(&self) -> &str {
        self.id_token.expose_secret()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_ref().map(|t| t.expose_secret())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("email", &self.email)
            .field("user_id", &self.user_id)
            .field("id_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Where the session gate currently stands.
#[derive(Debug, Clone, Default)]
pub enum SessionPhase {
    #[default]
    Resolving,
    Authenticated(Arc<Session>),
    Anonymous,
}

impl SessionPhase {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionPhase::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Arc<Session>> {
        match self {
            SessionPhase::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Exchange credentials for a session. Rejections are [`HelpdeskError::Auth`].
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session>;

    /// Obtain a fresh session from an expired one's refresh token.
    async fn refresh(&self, session: &Session) -> Result<Session>;
}
