use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{AuthProvider, Credentials, Session, SessionPhase};
use crate::config::write_private;
use crate::error::{HelpdeskError, Result};

/// On-disk form of a [`Session`].
#[derive(Serialize, Deserialize)]
struct StoredSession {
    email: String,
    user_id: String,
    id_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    expires_at: String,
}

/// Persists the signed-in session as JSON with owner-only permissions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store inside the given data directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let stored: StoredSession = serde_json::from_str(&content)?;
        let expires_at: Timestamp = stored.expires_at.parse().map_err(|e| {
            HelpdeskError::Other(format!("corrupt session file {}: {}", self.path.display(), e))
        })?;
        Ok(Some(Session::new(
            stored.email,
            stored.user_id,
            stored.id_token,
            stored.refresh_token,
            expires_at,
        )))
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let stored = StoredSession {
            email: session.email.clone(),
            user_id: session.user_id.clone(),
            id_token: session.id_token().to_string(),
            refresh_token: session.refresh_token().map(str::to_string),
            expires_at: session.expires_at.to_string(),
        };
        write_private(&self.path, &serde_json::to_string_pretty(&stored)?)?;
        Ok(())
    }

    /// Remove the stored session. Missing files are not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Decide the gate's initial phase from what is on disk.
///
/// With sign-in disabled a guest session is issued straight away. Otherwise
/// an unexpired stored session is reused, an expired one is refreshed when
/// possible, and everything else falls back to anonymous.
pub async fn resolve_session(
    store: &SessionStore,
    provider: &dyn AuthProvider,
    auth_enabled: bool,
) -> SessionPhase {
    if !auth_enabled {
        return SessionPhase::Authenticated(Arc::new(Session::guest()));
    }

    let stored = match store.load() {
        Ok(Some(session)) => session,
        Ok(None) => return SessionPhase::Anonymous,
        Err(e) => {
            tracing::warn!("ignoring unreadable session: {}", e);
            return SessionPhase::Anonymous;
        }
    };

    if !stored.is_expired(Timestamp::now()) {
        return SessionPhase::Authenticated(Arc::new(stored));
    }

    if stored.refresh_token().is_none() {
        tracing::info!("stored session for {} expired", stored.email);
        return SessionPhase::Anonymous;
    }

    match provider.refresh(&stored).await {
        Ok(session) => {
            if let Err(e) = store.save(&session) {
                tracing::warn!("failed to persist refreshed session: {}", e);
            }
            SessionPhase::Authenticated(Arc::new(session))
        }
        Err(e) => {
            tracing::warn!("session refresh failed: {}", e);
            if let Err(e) = store.clear() {
                tracing::warn!("failed to clear session: {}", e);
            }
            SessionPhase::Anonymous
        }
    }
}

/// Sign in and persist the resulting session.
pub async fn sign_in(
    store: &SessionStore,
    provider: &dyn AuthProvider,
    credentials: &Credentials,
) -> Result<Arc<Session>> {
    let session = provider.sign_in(credentials).await?;
    if let Err(e) = store.save(&session) {
        tracing::warn!("signed in but could not persist session: {}", e);
    }
    Ok(Arc::new(session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use jiff::SignedDuration;

    struct FixedAuth {
        accept: bool,
    }

    #[async_trait]
    impl AuthProvider for FixedAuth {
        async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
            if self.accept {
                Ok(Session::new(credentials.email(), "u1", "tok", Some("ref".into()), Timestamp::MAX))
            } else {
                Err(HelpdeskError::Auth("INVALID_PASSWORD".to_string()))
            }
        }

        async fn refresh(&self, session: &Session) -> Result<Session> {
            if self.accept {
                Ok(Session::new(session.email.clone(), "u1", "tok2", Some("ref2".into()), Timestamp::MAX))
            } else {
                Err(HelpdeskError::Auth("TOKEN_EXPIRED".to_string()))
            }
        }
    }

    fn expired() -> Timestamp {
        Timestamp::now() - SignedDuration::from_secs(60)
    }

    #[test]
    fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::in_dir(dir.path());
        assert!(store.load().unwrap().is_none());

        let session = Session::new("a@b.co", "u1", "tok", Some("ref".into()), Timestamp::MAX);
        store.save(&session).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.email, "a@b.co");
        assert_eq!(loaded.id_token(), "tok");
        assert_eq!(loaded.refresh_token(), Some("ref"));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_session_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::in_dir(dir.path());
        store
            .save(&Session::new("a@b.co", "u1", "tok", None, Timestamp::MAX))
            .unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        // a file left readable by an older version is narrowed on save
        fs::set_permissions(store.path(), fs::Permissions::from_mode(0o644)).unwrap();
        store
            .save(&Session::new("a@b.co", "u1", "tok2", None, Timestamp::MAX))
            .unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().unwrap().unwrap().id_token(), "tok2");
    }

    #[tokio::test]
    async fn test_resolve_without_session_is_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::in_dir(dir.path());
        let phase = resolve_session(&store, &FixedAuth { accept: true }, true).await;
        assert!(matches!(phase, SessionPhase::Anonymous));
    }

    #[tokio::test]
    async fn test_resolve_with_auth_disabled_is_guest() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::in_dir(dir.path());
        let phase = resolve_session(&store, &FixedAuth { accept: false }, false).await;
        assert!(phase.session().unwrap().is_guest());
    }

    #[tokio::test]
    async fn test_resolve_refreshes_expired_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::in_dir(dir.path());
        store
            .save(&Session::new("a@b.co", "u1", "old", Some("ref".into()), expired()))
            .unwrap();

        let phase = resolve_session(&store, &FixedAuth { accept: true }, true).await;
        assert_eq!(phase.session().unwrap().id_token(), "tok2");
        assert_eq!(store.load().unwrap().unwrap().id_token(), "tok2");
    }

    #[tokio::test]
    async fn test_failed_refresh_clears_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::in_dir(dir.path());
        store
            .save(&Session::new("a@b.co", "u1", "old", Some("ref".into()), expired()))
            .unwrap();

        let phase = resolve_session(&store, &FixedAuth { accept: false }, true).await;
        assert!(matches!(phase, SessionPhase::Anonymous));
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_sign_in_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::in_dir(dir.path());
        let creds = Credentials::new("a@b.co", "pw").unwrap();

        let session = sign_in(&store, &FixedAuth { accept: true }, &creds).await.unwrap();
        assert_eq!(session.email, "a@b.co");
        assert!(store.load().unwrap().is_some());

        let err = sign_in(&store, &FixedAuth { accept: false }, &creds).await.unwrap_err();
        assert_eq!(err.user_message(), crate::error::INVALID_CREDENTIALS);
    }
}
