//! Mapping of spreadsheet rows onto [`Ticket`]s.
//!
//! The sheet proxy returns a JSON array of objects keyed by the column
//! headers. Any column may be missing, `null`, empty, or (for cells the sheet
//! considers numeric) a number. None of these fail the mapping.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::types::{TICKET_ID_BASE, Ticket, TicketPriority};

/// One raw row as delivered by the sheet proxy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SheetRow {
    #[serde(rename = "Subject", default, deserialize_with = "lenient_string")]
    pub subject: Option<String>,
    #[serde(rename = "Description", default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(rename = "Priority", default, deserialize_with = "lenient_string")]
    pub priority: Option<String>,
    #[serde(rename = "Timestamp", default, deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
    #[serde(rename = "Name", default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(rename = "Company", default, deserialize_with = "lenient_string")]
    pub company: Option<String>,
}

/// Accept strings, numbers and booleans as text; treat `null` as absent.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Derive a priority from the sheet's free-form cell.
///
/// Empty means low. Otherwise "low" anywhere wins, then "med", and anything
/// else (including typos and words like "urgent") is high.
pub fn map_priority(raw: Option<&str>) -> TicketPriority {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return TicketPriority::Low;
    };
    let lowered = raw.to_lowercase();
    if lowered.contains("low") {
        TicketPriority::Low
    } else if lowered.contains("med") {
        TicketPriority::Medium
    } else {
        TicketPriority::High
    }
}

/// Format a row position as a ticket id.
pub fn ticket_id(index: usize) -> String {
    format!("T-{}", TICKET_ID_BASE + index)
}

/// Map rows in order, stamping rows without a timestamp with `now`.
pub fn map_rows_at(rows: Vec<SheetRow>, now: &str) -> Vec<Ticket> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| Ticket {
            id: ticket_id(index),
            title: non_empty(&row.subject).unwrap_or("No subject").to_string(),
            description: non_empty(&row.description)
                .unwrap_or("No description")
                .to_string(),
            status: row.status.as_deref().unwrap_or_default().to_lowercase(),
            priority: map_priority(row.priority.as_deref()),
            created_at: non_empty(&row.timestamp).unwrap_or(now).to_string(),
            assigned_to: non_empty(&row.name).map(str::to_string),
            company: non_empty(&row.company).unwrap_or("Unknown").to_string(),
        })
        .collect()
}

/// Map rows in order using the current time for missing timestamps.
pub fn map_rows(rows: Vec<SheetRow>) -> Vec<Ticket> {
    let now = jiff::Timestamp::now().to_string();
    map_rows_at(rows, &now)
}
