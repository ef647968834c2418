use thiserror::Error;

/// The message shown for any rejected sign-in, whatever the provider said.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";

#[derive(Error, Debug)]
pub enum HelpdeskError {
    #[error("ticket '{0}' not found")]
    TicketNotFound(String),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("invalid priority '{0}'")]
    InvalidPriority(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    /// Sign-in or token refresh was rejected. Carries the provider detail,
    /// which is logged but never shown.
    #[error("authentication error: {0}")]
    Auth(String),

    #[error("not logged in (run `helpdesk login`)")]
    NotLoggedIn,

    #[error("{0}")]
    Validation(String),

    /// The upstream answered with a non-success status.
    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

impl HelpdeskError {
    /// Short text safe to show in the UI.
    pub fn user_message(&self) -> String {
        match self {
            HelpdeskError::Auth(_) => INVALID_CREDENTIALS.to_string(),
            HelpdeskError::Validation(msg) => msg.clone(),
            HelpdeskError::Status(code) => format!("HTTP error! status: {}", code),
            HelpdeskError::Http(e) if e.is_timeout() => "Request timed out".to_string(),
            HelpdeskError::Http(_) => "Network error".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HelpdeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_hides_provider_detail() {
        let err = HelpdeskError::Auth("EMAIL_NOT_FOUND".to_string());
        assert_eq!(err.user_message(), INVALID_CREDENTIALS);
        assert!(err.to_string().contains("EMAIL_NOT_FOUND"));
    }

    #[test]
    fn test_status_message() {
        assert_eq!(
            HelpdeskError::Status(503).user_message(),
            "HTTP error! status: 503"
        );
    }
}
