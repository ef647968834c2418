use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::ticket::{SheetRow, map_rows};
use crate::types::Ticket;

/// Anything that can produce the current ticket rows.
#[async_trait]
pub trait TicketSource: Send + Sync {
    async fn fetch_rows(&self) -> Result<Vec<SheetRow>>;

    /// Fetch and map in one step.
    async fn fetch_tickets(&self) -> Result<Vec<Ticket>> {
        let rows = self.fetch_rows().await?;
        Ok(map_rows(rows))
    }
}

/// The spreadsheet proxy: one GET returning every row.
pub struct SheetClient {
    client: Client,
    url: String,
}

impl SheetClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TicketSource for SheetClient {
    async fn fetch_rows(&self) -> Result<Vec<SheetRow>> {
        super::get_json(&self.client, &self.url).await
    }
}

/// Rows read from a JSON file in the sheet proxy's format.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TicketSource for FileSource {
    async fn fetch_rows(&self) -> Result<Vec<SheetRow>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}
