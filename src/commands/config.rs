//! Configuration commands
//!
//! - `config show`: display current configuration
//! - `config set`: set a value by dotted key
//! - `config path`: print the config file location

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::config::{API_KEY_ENV, Config, TICKETS_URL_ENV};
use crate::error::Result;

/// Mask a sensitive value by showing only the first 2 and last 2 characters
fn mask_sensitive_value(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > 4 {
        let first: String = value.chars().take(2).collect();
        let last: String = value.chars().skip(char_count - 2).collect();
        format!("{first}...{last}")
    } else {
        "****".to_string()
    }
}

pub fn cmd_config_show(output_json: bool) -> Result<()> {
    let config = Config::load()?;
    let api_key = config.api_key();
    let tickets_url = config.tickets_url();
    let overridden = tickets_url != config.sources.tickets_url;

    let json_output = json!({
        "sources": {
            "tickets_url": tickets_url,
            "roster_url": config.sources.roster_url,
            "help_relay_url": config.sources.help_relay_url,
        },
        "auth": {
            "enabled": config.auth.enabled,
            "api_key_configured": api_key.is_some(),
        },
        "company_order": config.company_order,
        "request_timeout": config.request_timeout,
        "config_file": Config::config_path().to_string_lossy(),
    });

    let mut text = String::new();
    text.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));

    text.push_str(&format!("{}:\n", "sources".cyan()));
    text.push_str(&format!("  tickets_url: {}", tickets_url));
    if overridden {
        text.push_str(&format!(" {}", format!("(from {TICKETS_URL_ENV})").dimmed()));
    }
    text.push('\n');
    text.push_str(&format!("  roster_url: {}\n", config.sources.roster_url));
    text.push_str(&format!("  help_relay_url: {}\n\n", config.sources.help_relay_url));

    text.push_str(&format!("{}:\n", "auth".cyan()));
    text.push_str(&format!("  enabled: {}\n", config.auth.enabled));
    let key_status = match &api_key {
        Some(key) if config.auth.api_key.as_ref() != Some(key) => {
            format!("{} (from {API_KEY_ENV})", mask_sensitive_value(key))
        }
        Some(key) => mask_sensitive_value(key),
        None => "not configured".dimmed().to_string(),
    };
    text.push_str(&format!("  api_key: {key_status}\n\n"));

    text.push_str(&format!(
        "{}: {}\n",
        "company_order".cyan(),
        config.company_order.join(", ")
    ));
    text.push_str(&format!(
        "{}: {}s\n\n",
        "request_timeout".cyan(),
        config.request_timeout
    ));
    text.push_str(&format!(
        "{}",
        format!("Config file: {}", Config::config_path().display()).dimmed()
    ));

    CommandOutput::new(json_output).with_text(text).print(output_json)
}

pub fn cmd_config_set(key: &str, value: &str, output_json: bool) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    let shown = if key == "auth.api_key" {
        mask_sensitive_value(value)
    } else {
        value.to_string()
    };
    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "success": true,
    }))
    .with_text(format!("Set {} = {}", key.cyan(), shown))
    .print(output_json)
}

pub fn cmd_config_path(output_json: bool) -> Result<()> {
    let path = Config::config_path();
    CommandOutput::new(json!({ "path": path.to_string_lossy() }))
        .with_text(path.display().to_string())
        .print(output_json)
}
