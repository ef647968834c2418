//! `helpdesk login`, `logout` and `whoami`

use std::io::{self, BufRead, IsTerminal, Write};

use jiff::Timestamp;
use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::auth::{Credentials, sign_in};
use crate::context::AppContext;
use crate::error::{HelpdeskError, Result};

/// Read a password line from stdin, prompting when attached to a terminal.
pub fn read_password() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
        io::stderr().flush()?;
    }
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn cmd_login(
    ctx: &AppContext,
    email: &str,
    password: Option<String>,
    output_json: bool,
) -> Result<()> {
    if !ctx.auth_enabled() {
        return Err(HelpdeskError::Config(
            "sign-in is disabled (auth.enabled = false)".to_string(),
        ));
    }
    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };
    let credentials = Credentials::new(email, password)?;
    let session = sign_in(&ctx.sessions, ctx.auth.as_ref(), &credentials).await?;

    CommandOutput::new(json!({
        "action": "login",
        "email": session.email,
        "expires_at": session.expires_at.to_string(),
    }))
    .with_text(format!("Signed in as {}", session.email.cyan()))
    .print(output_json)
}

pub fn cmd_logout(ctx: &AppContext, output_json: bool) -> Result<()> {
    let had_session = ctx.sessions.load().ok().flatten().is_some();
    ctx.sessions.clear()?;
    let text = if had_session {
        "Signed out".to_string()
    } else {
        "Not signed in".dimmed().to_string()
    };
    CommandOutput::new(json!({
        "action": "logout",
        "had_session": had_session,
    }))
    .with_text(text)
    .print(output_json)
}

pub fn cmd_whoami(ctx: &AppContext, output_json: bool) -> Result<()> {
    if !ctx.auth_enabled() {
        return CommandOutput::new(json!({ "email": "guest", "guest": true }))
            .with_text("guest (sign-in disabled)")
            .print(output_json);
    }
    let session = ctx.sessions.load()?.ok_or(HelpdeskError::NotLoggedIn)?;
    let expired = session.is_expired(Timestamp::now());
    let text = if expired {
        format!("{} {}", session.email, "(session expired)".yellow())
    } else {
        format!("{} (until {})", session.email, session.expires_at)
    };
    CommandOutput::new(json!({
        "email": session.email,
        "user_id": session.user_id,
        "expires_at": session.expires_at.to_string(),
        "expired": expired,
    }))
    .with_text(text)
    .print(output_json)
}
