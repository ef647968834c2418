//! `helpdesk request-help`

use serde_json::json;

use super::CommandOutput;
use crate::context::AppContext;
use crate::error::{HelpdeskError, Result};
use crate::remote::relay::{HelpRequest, SUBMIT_FAILED, SUBMITTED};

/// Send a help request to the relay. Needs no session.
pub async fn cmd_request_help(
    ctx: &AppContext,
    email: &str,
    message: &str,
    output_json: bool,
) -> Result<()> {
    let request = HelpRequest::new(email, message)?;
    if let Err(e) = ctx.relay.submit(&request).await {
        tracing::warn!("help request failed: {}", e);
        return Err(HelpdeskError::Other(SUBMIT_FAILED.to_string()));
    }
    CommandOutput::new(json!({
        "action": "request_help",
        "email": request.email(),
        "submitted": true,
    }))
    .with_text(SUBMITTED)
    .print(output_json)
}
