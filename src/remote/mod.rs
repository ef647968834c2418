//! Clients for the external services the dashboard reads from and posts to.
//!
//! - [`sheet`]: the ticket sheet proxy
//! - [`roster`]: the staff identity sheet
//! - [`relay`]: the "request help" form relay

pub mod relay;
pub mod roster;
pub mod sheet;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{HelpdeskError, Result};

pub use relay::{FormRelay, HelpRelay, HelpRequest};
pub use roster::{RosterEntry, drive_image_url, fetch_roster};
pub use sheet::{FileSource, SheetClient, TicketSource};

const USER_AGENT: &str = concat!("helpdesk/", env!("CARGO_PKG_VERSION"));

/// Build the shared HTTP client using the configured timeout.
pub fn http_client(config: &Config) -> Result<Client> {
    let timeout = config.request_timeout();
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(timeout.min(std::time::Duration::from_secs(10)))
        .build()?;
    Ok(client)
}

/// GET `url` and decode its JSON body. Non-success statuses are errors.
pub(crate) async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T> {
    tracing::debug!("GET {}", url);
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        tracing::warn!("GET {} returned {}", url, status);
        return Err(HelpdeskError::Status(status.as_u16()));
    }
    Ok(response.json().await?)
}
