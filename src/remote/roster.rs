//! Staff identity roster.
//!
//! A second sheet holding one row per employee ID card. Government ID
//! number columns are present upstream but are never decoded.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ticket::row::lenient_string;

static DRIVE_FILE_ID: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"/d/([a-zA-Z0-9_-]+)/").ok());

/// Turn a Drive share link into a direct view link.
///
/// Empty input yields an empty string; links without a `/d/<id>/` segment
/// are returned unchanged.
pub fn drive_image_url(link: &str) -> String {
    if link.is_empty() {
        return String::new();
    }
    let id = DRIVE_FILE_ID
        .as_ref()
        .and_then(|re| re.captures(link))
        .and_then(|caps| caps.get(1));
    match id {
        Some(id) => format!("https://drive.google.com/uc?export=view&id={}", id.as_str()),
        None => link.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(rename = "Name", default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(rename = "Email", default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(rename = "Position", default, deserialize_with = "lenient_string")]
    pub position: Option<String>,
    #[serde(rename = "Company Name", default, deserialize_with = "lenient_string")]
    pub company_name: Option<String>,
    #[serde(rename = "ID Number", default, deserialize_with = "lenient_string")]
    pub id_number: Option<String>,
    #[serde(rename = "ID Photo", default, deserialize_with = "lenient_string")]
    pub id_photo: Option<String>,
    #[serde(rename = "E-Signature", default, deserialize_with = "lenient_string")]
    pub e_signature: Option<String>,
    #[serde(rename = "Timestamp", default, deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
}

impl RosterEntry {
    pub fn photo_url(&self) -> String {
        drive_image_url(self.id_photo.as_deref().unwrap_or_default())
    }

    pub fn signature_url(&self) -> String {
        drive_image_url(self.e_signature.as_deref().unwrap_or_default())
    }
}

pub async fn fetch_roster(client: &Client, url: &str) -> Result<Vec<RosterEntry>> {
    super::get_json(client, url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_share_link() {
        assert_eq!(
            drive_image_url("https://drive.google.com/file/d/1AbC_d-9/view?usp=sharing"),
            "https://drive.google.com/uc?export=view&id=1AbC_d-9"
        );
    }

    #[test]
    fn test_drive_passthrough() {
        assert_eq!(drive_image_url(""), "");
        assert_eq!(
            drive_image_url("https://example.com/photo.png"),
            "https://example.com/photo.png"
        );
        // no trailing slash after the id
        assert_eq!(
            drive_image_url("https://drive.google.com/file/d/abc"),
            "https://drive.google.com/file/d/abc"
        );
    }

    #[test]
    fn test_roster_decoding_ignores_extra_columns() {
        let rows: Vec<RosterEntry> = serde_json::from_str(
            r#"[{"Name":"Ana Reyes","Company Name":"Monte","TIN":"123","ID Number":1042,
                 "ID Photo":"https://drive.google.com/file/d/xyz/view"}]"#,
        )
        .unwrap();
        let entry = &rows[0];
        assert_eq!(entry.company_name.as_deref(), Some("Monte"));
        assert_eq!(entry.id_number.as_deref(), Some("1042"));
        assert_eq!(
            entry.photo_url(),
            "https://drive.google.com/uc?export=view&id=xyz"
        );
        assert_eq!(entry.signature_url(), "");
    }
}
