use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HelpdeskError;

/// Offset added to a row's position to form its display id.
pub const TICKET_ID_BASE: usize = 1000;

/// Canonical ticket status.
///
/// Upstream statuses are free-form text typed into a spreadsheet, so the raw
/// value is kept on [`Ticket`] and this enum is derived from it. Anything that
/// is not recognisable lands in `Other` with the raw text preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TicketStatus {
    #[default]
    New,
    InProgress,
    Resolved,
    Other(String),
}

impl TicketStatus {
    /// Statuses offered by the detail editor's selector.
    pub const SELECTABLE: [TicketStatus; 3] = [
        TicketStatus::New,
        TicketStatus::InProgress,
        TicketStatus::Resolved,
    ];

    /// Map a raw upstream status onto the canonical set.
    ///
    /// Matching ignores case and surrounding whitespace. Spaces, hyphens and
    /// underscores between "in" and "progress" are all accepted.
    pub fn normalize(raw: &str) -> TicketStatus {
        let lowered = raw.trim().to_lowercase();
        let compact: String = lowered
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();
        match compact.as_str() {
            "new" | "open" => TicketStatus::New,
            "inprogress" => TicketStatus::InProgress,
            "resolved" | "closed" | "done" => TicketStatus::Resolved,
            _ => TicketStatus::Other(lowered),
        }
    }

    /// Human-facing label.
    pub fn label(&self) -> &str {
        match self {
            TicketStatus::New => "New",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Other(raw) if raw.is_empty() => "Unknown",
            TicketStatus::Other(raw) => raw,
        }
    }

    /// Next selectable status, wrapping around. `Other` moves to `New`.
    pub fn cycle_next(&self) -> TicketStatus {
        match self {
            TicketStatus::New => TicketStatus::InProgress,
            TicketStatus::InProgress => TicketStatus::Resolved,
            TicketStatus::Resolved | TicketStatus::Other(_) => TicketStatus::New,
        }
    }

    pub fn cycle_prev(&self) -> TicketStatus {
        match self {
            TicketStatus::New | TicketStatus::Other(_) => TicketStatus::Resolved,
            TicketStatus::InProgress => TicketStatus::New,
            TicketStatus::Resolved => TicketStatus::InProgress,
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketStatus::New => write!(f, "new"),
            TicketStatus::InProgress => write!(f, "in-progress"),
            TicketStatus::Resolved => write!(f, "resolved"),
            TicketStatus::Other(raw) => write!(f, "{}", raw),
        }
    }
}

impl FromStr for TicketStatus {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match TicketStatus::normalize(s) {
            TicketStatus::Other(_) => Err(HelpdeskError::InvalidStatus(s.to_string())),
            status => Ok(status),
        }
    }
}

pub const VALID_STATUSES: &[&str] = &["new", "in-progress", "resolved"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    #[default]
    Low,
    Medium,
    High,
}

impl TicketPriority {
    pub const ALL: [TicketPriority; 3] = [
        TicketPriority::High,
        TicketPriority::Medium,
        TicketPriority::Low,
    ];
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketPriority::Low => write!(f, "low"),
            TicketPriority::Medium => write!(f, "medium"),
            TicketPriority::High => write!(f, "high"),
        }
    }
}

impl FromStr for TicketPriority {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(TicketPriority::Low),
            "medium" => Ok(TicketPriority::Medium),
            "high" => Ok(TicketPriority::High),
            _ => Err(HelpdeskError::InvalidPriority(s.to_string())),
        }
    }
}

pub const VALID_PRIORITIES: &[&str] = &["high", "medium", "low"];

/// One support ticket, as mapped from a sheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Lower-cased upstream status; empty when the sheet had none.
    pub status: String,
    pub priority: TicketPriority,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    pub company: String,
}

impl Ticket {
    pub fn status_kind(&self) -> TicketStatus {
        TicketStatus::normalize(&self.status)
    }

    /// The created timestamp trimmed to its date part when it looks like one.
    pub fn created_date(&self) -> &str {
        self.created_at
            .split(['T', ' '])
            .next()
            .unwrap_or(&self.created_at)
    }
}

/// Initials for an assignee name: first letter of each word, upper-cased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_normalize_variants() {
        assert_eq!(TicketStatus::normalize("new"), TicketStatus::New);
        assert_eq!(TicketStatus::normalize("Open"), TicketStatus::New);
        for raw in ["in progress", "In-Progress", "in_progress", "inprogress"] {
            assert_eq!(TicketStatus::normalize(raw), TicketStatus::InProgress, "{raw}");
        }
        assert_eq!(TicketStatus::normalize("Closed"), TicketStatus::Resolved);
        assert_eq!(
            TicketStatus::normalize(""),
            TicketStatus::Other(String::new())
        );
        assert_eq!(
            TicketStatus::normalize("Waiting on vendor"),
            TicketStatus::Other("waiting on vendor".to_string())
        );
    }

    #[test]
    fn test_status_display_and_label() {
        assert_eq!(TicketStatus::InProgress.to_string(), "in-progress");
        assert_eq!(TicketStatus::InProgress.label(), "In Progress");
        assert_eq!(TicketStatus::Other(String::new()).label(), "Unknown");
    }

    #[test]
    fn test_status_from_str_rejects_unknown() {
        assert_eq!(
            "in progress".parse::<TicketStatus>().unwrap(),
            TicketStatus::InProgress
        );
        assert!("pending".parse::<TicketStatus>().is_err());
    }

    #[test]
    fn test_status_cycle() {
        let mut status = TicketStatus::New;
        for _ in 0..3 {
            status = status.cycle_next();
        }
        assert_eq!(status, TicketStatus::New);
        assert_eq!(TicketStatus::New.cycle_prev(), TicketStatus::Resolved);
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!("HIGH".parse::<TicketPriority>().unwrap(), TicketPriority::High);
        assert!("urgent".parse::<TicketPriority>().is_err());
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Maria Santos"), "MS");
        assert_eq!(initials("  jose  de la cruz "), "JDLC");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_created_date() {
        let mut ticket = Ticket {
            id: "T-1000".to_string(),
            title: String::new(),
            description: String::new(),
            status: String::new(),
            priority: TicketPriority::Low,
            created_at: "2024-03-01T08:00:00Z".to_string(),
            assigned_to: None,
            company: "Unknown".to_string(),
        };
        assert_eq!(ticket.created_date(), "2024-03-01");
        ticket.created_at = "3/1/2024 8:00:00".to_string();
        assert_eq!(ticket.created_date(), "3/1/2024");
    }
}
