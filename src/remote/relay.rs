//! "Request help" submissions.
//!
//! The relay is a form endpoint that accepts url-encoded `email` and
//! `message` fields. Its response is not meaningful, so a submission counts
//! as delivered as soon as the request itself goes through.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{HelpdeskError, Result};

pub const MISSING_EMAIL: &str = "Please enter your email.";
pub const MISSING_MESSAGE: &str = "Please enter a message.";
pub const SUBMITTED: &str = "Your request has been submitted. We'll get back to you soon.";
pub const SUBMIT_FAILED: &str = "Failed to submit request. Please try again later.";

/// A validated help request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpRequest {
    email: String,
    message: String,
}

impl HelpRequest {
    /// Validate the two fields. Email is checked first.
    pub fn new(email: &str, message: &str) -> Result<Self> {
        let email = email.trim();
        let message = message.trim();
        if email.is_empty() {
            return Err(HelpdeskError::Validation(MISSING_EMAIL.to_string()));
        }
        if message.is_empty() {
            return Err(HelpdeskError::Validation(MISSING_MESSAGE.to_string()));
        }
        Ok(Self {
            email: email.to_string(),
            message: message.to_string(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn form_fields(&self) -> [(&'static str, &str); 2] {
        [("email", self.email.as_str()), ("message", self.message.as_str())]
    }
}

#[async_trait]
pub trait HelpRelay: Send + Sync {
    async fn submit(&self, request: &HelpRequest) -> Result<()>;
}

pub struct FormRelay {
    client: Client,
    url: String,
}

impl FormRelay {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl HelpRelay for FormRelay {
    async fn submit(&self, request: &HelpRequest) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .form(&request.form_fields())
            .send()
            .await?;
        tracing::info!(
            "help request from {} relayed (status {})",
            request.email(),
            response.status()
        );
        Ok(())
    }
}
