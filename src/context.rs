//! Explicitly constructed application context.
//!
//! Built once by a command and handed to whatever needs the configured
//! services. Tests build one from stub implementations with
//! [`AppContext::new`].

use std::sync::Arc;

use crate::auth::{AuthProvider, FirebaseAuth, SessionStore};
use crate::config::{Config, data_dir};
use crate::error::Result;
use crate::remote::{FileSource, FormRelay, HelpRelay, SheetClient, TicketSource, http_client};

pub struct AppContext {
    pub config: Config,
    pub client: reqwest::Client,
    pub tickets: Arc<dyn TicketSource>,
    pub auth: Arc<dyn AuthProvider>,
    pub relay: Arc<dyn HelpRelay>,
    pub sessions: SessionStore,
}

impl AppContext {
    pub fn new(
        config: Config,
        client: reqwest::Client,
        tickets: Arc<dyn TicketSource>,
        auth: Arc<dyn AuthProvider>,
        relay: Arc<dyn HelpRelay>,
        sessions: SessionStore,
    ) -> Self {
        Self {
            config,
            client,
            tickets,
            auth,
            relay,
            sessions,
        }
    }

    /// Wire up the real services from `config`.
    pub fn from_config(config: Config) -> Result<Self> {
        let client = http_client(&config)?;
        let tickets: Arc<dyn TicketSource> =
            Arc::new(SheetClient::new(client.clone(), config.tickets_url()));
        let auth: Arc<dyn AuthProvider> =
            Arc::new(FirebaseAuth::new(client.clone(), config.api_key()));
        let relay: Arc<dyn HelpRelay> = Arc::new(FormRelay::new(
            client.clone(),
            config.sources.help_relay_url.clone(),
        ));
        let sessions = SessionStore::in_dir(&data_dir());
        Ok(Self::new(config, client, tickets, auth, relay, sessions))
    }

    /// Load config from disk and wire up the real services.
    pub fn load() -> Result<Self> {
        Self::from_config(Config::load()?)
    }

    /// Replace the ticket source with rows read from a local file.
    pub fn with_ticket_file(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.tickets = Arc::new(FileSource::new(path));
        self
    }

    pub fn auth_enabled(&self) -> bool {
        self.config.auth.enabled
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("sessions", &self.sessions)
            .finish_non_exhaustive()
    }
}
