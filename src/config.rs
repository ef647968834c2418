//! Application configuration.
//!
//! Configuration is stored as YAML in the platform config directory (or the
//! file named by `HELPDESK_CONFIG`) and includes:
//! - Endpoints for the ticket sheet, the staff roster and the help relay
//! - Sign-in settings and the identity provider API key
//! - Company ordering for the filter bar

use std::env;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{HelpdeskError, Result};
use crate::filter::DEFAULT_COMPANY_ORDER;

pub const CONFIG_ENV: &str = "HELPDESK_CONFIG";
pub const TICKETS_URL_ENV: &str = "HELPDESK_TICKETS_URL";
pub const API_KEY_ENV: &str = "HELPDESK_API_KEY";

const DEFAULT_TICKETS_URL: &str =
    "https://api.sheetbest.com/sheets/53d1c70b-ebb2-4a25-8afd-32ffb7da9065";
const DEFAULT_ROSTER_URL: &str =
    "https://api.sheetbest.com/sheets/6877ea05-2698-489f-b0c0-b86385b6c308";
const DEFAULT_HELP_RELAY_URL: &str = "https://script.google.com/macros/s/AKfycbyBPusqS7raGi_x1-JsIBMEIjzNcFI0Ix878ij7WqR3cZhvTqeFys6cUdc0yor_0z84rw/exec";

/// Keys accepted by `helpdesk config set`.
pub const CONFIG_KEYS: &[&str] = &[
    "sources.tickets_url",
    "sources.roster_url",
    "sources.help_relay_url",
    "auth.enabled",
    "auth.api_key",
    "request_timeout",
];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    /// Company ordering for the filter bar; unlisted companies go last
    #[serde(default = "default_company_order")]
    pub company_order: Vec<String>,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: SourcesConfig::default(),
            auth: AuthConfig::default(),
            company_order: default_company_order(),
            request_timeout: default_request_timeout(),
        }
    }
}

fn default_company_order() -> Vec<String> {
    DEFAULT_COMPANY_ORDER.iter().map(|s| s.to_string()).collect()
}

fn default_request_timeout() -> u64 {
    30
}

/// External endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_tickets_url")]
    pub tickets_url: String,
    #[serde(default = "default_roster_url")]
    pub roster_url: String,
    #[serde(default = "default_help_relay_url")]
    pub help_relay_url: String,
}

fn default_tickets_url() -> String {
    DEFAULT_TICKETS_URL.to_string()
}

fn default_roster_url() -> String {
    DEFAULT_ROSTER_URL.to_string()
}

fn default_help_relay_url() -> String {
    DEFAULT_HELP_RELAY_URL.to_string()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            tickets_url: default_tickets_url(),
            roster_url: default_roster_url(),
            help_relay_url: default_help_relay_url(),
        }
    }
}

/// Sign-in configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// When false the dashboard opens without a login step
    #[serde(default = "default_auth_enabled")]
    pub enabled: bool,

    /// Identity provider web API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_auth_enabled() -> bool {
    true
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: default_auth_enabled(),
            api_key: None,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("enabled", &self.enabled)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "helpdesk")
}

/// Directory for session and log files.
pub fn data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".helpdesk"))
}

/// Write `contents` to `path`, readable by the owner only.
///
/// On Unix a new file is created with mode 0600, so the contents are never
/// visible under a wider mode. An existing file is narrowed before writing.
pub(crate) fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
        options.mode(0o600);
        if path.exists() {
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }
    }

    let mut file = options.open(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_ENV)
            && !path.is_empty()
        {
            return PathBuf::from(path);
        }
        project_dirs()
            .map(|dirs| dirs.config_dir().join("config.yaml"))
            .unwrap_or_else(|| PathBuf::from(".helpdesk").join("config.yaml"))
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            HelpdeskError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                HelpdeskError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        write_private(&path, &content).map_err(|e| {
            HelpdeskError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        Ok(())
    }

    /// Check that every endpoint is an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("sources.tickets_url", &self.sources.tickets_url),
            ("sources.roster_url", &self.sources.roster_url),
            ("sources.help_relay_url", &self.sources.help_relay_url),
        ] {
            validate_url(key, value)?;
        }
        Ok(())
    }

    /// Ticket sheet URL from environment or config
    pub fn tickets_url(&self) -> String {
        if let Ok(url) = env::var(TICKETS_URL_ENV)
            && !url.is_empty()
        {
            return url;
        }
        self.sources.tickets_url.clone()
    }

    /// Identity provider API key from environment or config
    pub fn api_key(&self) -> Option<String> {
        if let Ok(key) = env::var(API_KEY_ENV)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.auth.api_key.clone()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Set a value by dotted key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "sources.tickets_url" => {
                validate_url(key, value)?;
                self.sources.tickets_url = value.to_string();
            }
            "sources.roster_url" => {
                validate_url(key, value)?;
                self.sources.roster_url = value.to_string();
            }
            "sources.help_relay_url" => {
                validate_url(key, value)?;
                self.sources.help_relay_url = value.to_string();
            }
            "auth.enabled" => {
                self.auth.enabled = value.parse().map_err(|_| {
                    HelpdeskError::Config(format!(
                        "invalid value for {}: '{}' (expected true or false)",
                        key, value
                    ))
                })?;
            }
            "auth.api_key" => {
                self.auth.api_key = Some(value.to_string()).filter(|v| !v.is_empty());
            }
            "request_timeout" => {
                self.request_timeout = value.parse().map_err(|_| {
                    HelpdeskError::Config(format!(
                        "invalid value for {}: '{}' (expected seconds)",
                        key, value
                    ))
                })?;
            }
            _ => {
                return Err(HelpdeskError::Config(format!(
                    "unknown config key '{}'. Valid keys: {}",
                    key,
                    CONFIG_KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

fn validate_url(key: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)
        .map_err(|e| HelpdeskError::Config(format!("{} is not a valid URL: {}", key, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(HelpdeskError::Config(format!(
            "{} must use http or https, got '{}'",
            key,
            url.scheme()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[cfg(unix)]
    #[test]
    fn test_write_private_creates_owner_only_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        write_private(&path, "request_timeout: 45\n").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(fs::read_to_string(&path).unwrap(), "request_timeout: 45\n");
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.auth.enabled);
        assert!(config.auth.api_key.is_none());
        assert_eq!(config.request_timeout, 30);
        assert_eq!(config.company_order[0], "CITIMAX");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r#"
sources:
  tickets_url: https://example.test/sheet
auth:
  enabled: false
"#;
        let config: Config = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.sources.tickets_url, "https://example.test/sheet");
        assert_eq!(config.sources.roster_url, DEFAULT_ROSTER_URL);
        assert!(!config.auth.enabled);
        assert_eq!(config.company_order.len(), DEFAULT_COMPANY_ORDER.len());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut config = Config::default();
        config.auth.api_key = Some("AIzaSecret".to_string());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("AIzaSecret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_set_validates() {
        let mut config = Config::default();
        assert!(config.set("sources.tickets_url", "not a url").is_err());
        assert!(config.set("sources.tickets_url", "ftp://host/x").is_err());
        config
            .set("sources.tickets_url", "http://localhost:8080/rows")
            .unwrap();
        assert_eq!(config.sources.tickets_url, "http://localhost:8080/rows");
        assert!(config.set("auth.enabled", "maybe").is_err());
        config.set("request_timeout", "5").unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert!(config.set("nope", "1").is_err());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.auth.api_key = Some("from-file".to_string());
        unsafe {
            env::set_var(API_KEY_ENV, "from-env");
            env::set_var(TICKETS_URL_ENV, "https://env.test/rows");
        }
        assert_eq!(config.api_key().as_deref(), Some("from-env"));
        assert_eq!(config.tickets_url(), "https://env.test/rows");
        unsafe {
            env::remove_var(API_KEY_ENV);
            env::remove_var(TICKETS_URL_ENV);
        }
        assert_eq!(config.api_key().as_deref(), Some("from-file"));
        assert_eq!(config.tickets_url(), DEFAULT_TICKETS_URL);
    }

    #[test]
    #[serial]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        unsafe {
            env::set_var(CONFIG_ENV, &path);
        }
        let mut config = Config::default();
        config.set("request_timeout", "12").unwrap();
        config.save().unwrap();
        let loaded = Config::load().unwrap();
        unsafe {
            env::remove_var(CONFIG_ENV);
        }
        assert_eq!(loaded.request_timeout, 12);
        assert_eq!(loaded.sources, SourcesConfig::default());
    }
}
