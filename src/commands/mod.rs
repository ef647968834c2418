//! Command implementations behind the CLI subcommands.

mod auth;
mod config;
mod dashboard;
mod help;
mod ls;
mod roster;
mod show;

pub use auth::{cmd_login, cmd_logout, cmd_whoami, read_password};
pub use config::{cmd_config_path, cmd_config_set, cmd_config_show};
pub use dashboard::cmd_dashboard;
pub use help::cmd_request_help;
pub use ls::{LsOptions, cmd_ls, render_ticket_table};
pub use roster::cmd_roster;
pub use show::{cmd_show, find_ticket, format_ticket_detail};

use owo_colors::OwoColorize;
use serde_json::Value;

use crate::auth::{SessionPhase, resolve_session};
use crate::context::AppContext;
use crate::error::{HelpdeskError, Result};
use crate::types::{Ticket, TicketPriority, TicketStatus};

/// Pretty-print a JSON value to stdout.
pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// A command result with a JSON form and an optional human-readable form.
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn print(self, as_json: bool) -> Result<()> {
        match (as_json, self.text) {
            (false, Some(text)) => {
                println!("{}", text);
                Ok(())
            }
            _ => print_json(&self.json),
        }
    }
}

/// Status label colored the same way as the dashboard.
pub fn colored_status(status: &TicketStatus) -> String {
    let label = status.label();
    match status {
        TicketStatus::New => label.blue().to_string(),
        TicketStatus::InProgress => label.yellow().to_string(),
        TicketStatus::Resolved => label.green().to_string(),
        TicketStatus::Other(_) => label.dimmed().to_string(),
    }
}

pub fn colored_priority(priority: TicketPriority) -> String {
    let label = priority.to_string();
    match priority {
        TicketPriority::High => label.red().to_string(),
        TicketPriority::Medium => label.yellow().to_string(),
        TicketPriority::Low => label.green().to_string(),
    }
}

pub fn ticket_json(ticket: &Ticket) -> Value {
    serde_json::json!({
        "id": ticket.id,
        "title": ticket.title,
        "description": ticket.description,
        "status": ticket.status_kind().to_string(),
        "raw_status": ticket.status,
        "priority": ticket.priority,
        "created_at": ticket.created_at,
        "assigned_to": ticket.assigned_to,
        "company": ticket.company,
    })
}

/// Fail with `NotLoggedIn` unless the remote sources may be read.
///
/// Reading a local `--input` file needs no session.
pub async fn require_session(ctx: &AppContext, local_input: bool) -> Result<()> {
    if local_input {
        return Ok(());
    }
    match resolve_session(&ctx.sessions, ctx.auth.as_ref(), ctx.auth_enabled()).await {
        SessionPhase::Authenticated(_) => Ok(()),
        _ => Err(HelpdeskError::NotLoggedIn),
    }
}
