//! Identity provider backed by the Firebase Auth REST API.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::{AuthProvider, Credentials, Session};
use crate::error::{HelpdeskError, Result};

const SIGN_IN_URL: &str = "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword";
const REFRESH_URL: &str = "https://securetoken.googleapis.com/v1/token";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    id_token: String,
    email: String,
    #[serde(default)]
    refresh_token: Option<String>,
    expires_in: String,
    local_id: String,
}

#[derive(Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
    user_id: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct FirebaseAuth {
    client: Client,
    api_key: Option<SecretString>,
}

impl FirebaseAuth {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key: api_key.filter(|k| !k.is_empty()).map(SecretString::from),
        }
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret())
            .ok_or_else(|| {
                HelpdeskError::Config(
                    "identity provider API key not configured. Set HELPDESK_API_KEY or run: helpdesk config set auth.api_key <key>".to_string(),
                )
            })
    }

    /// Turn a non-success response into an auth error carrying the provider's code.
    async fn rejection(response: reqwest::Response) -> HelpdeskError {
        let status = response.status();
        let detail = match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => envelope.error.message,
            Err(_) => format!("status {}", status),
        };
        tracing::debug!("identity provider rejected request: {}", detail);
        HelpdeskError::Auth(detail)
    }
}

fn expiry_from(expires_in: &str) -> Result<Timestamp> {
    let secs: i64 = expires_in
        .parse()
        .map_err(|_| HelpdeskError::Auth(format!("bad expiresIn '{}'", expires_in)))?;
    Timestamp::now()
        .checked_add(SignedDuration::from_secs(secs))
        .map_err(|e| HelpdeskError::Auth(e.to_string()))
}

#[async_trait]
impl AuthProvider for FirebaseAuth {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        let key = self.api_key()?;
        let response = self
            .client
            .post(SIGN_IN_URL)
            .query(&[("key", key)])
            .json(&serde_json::json!({
                "email": credentials.email(),
                "password": credentials.password(),
                "returnSecureToken": true,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let body: SignInResponse = response.json().await?;
        tracing::info!("signed in as {}", body.email);
        Ok(Session::new(
            body.email,
            body.local_id,
            body.id_token,
            body.refresh_token,
            expiry_from(&body.expires_in)?,
        ))
    }

    async fn refresh(&self, session: &Session) -> Result<Session> {
        let key = self.api_key()?;
        let refresh_token = session
            .refresh_token()
            .ok_or_else(|| HelpdeskError::Auth("no refresh token".to_string()))?;
        let response = self
            .client
            .post(REFRESH_URL)
            .query(&[("key", key)])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let body: RefreshResponse = response.json().await?;
        tracing::debug!("refreshed session for {}", session.email);
        Ok(Session::new(
            session.email.clone(),
            body.user_id,
            body.id_token,
            Some(body.refresh_token),
            expiry_from(&body.expires_in)?,
        ))
    }
}
