//! Notification feed shown in the dashboard's side panel.
//!
//! Notifications live only for the session. Nothing here is persisted and
//! nothing is fetched; the feed starts from [`seed_notifications`].

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    StatusChange,
    Assignment,
    Comment,
}

impl NotificationKind {
    pub fn label(self) -> &'static str {
        match self {
            NotificationKind::StatusChange => "Status Update",
            NotificationKind::Assignment => "Assignment",
            NotificationKind::Comment => "Comment",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::StatusChange => write!(f, "status_change"),
            NotificationKind::Assignment => write!(f, "assignment"),
            NotificationKind::Comment => write!(f, "comment"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub time: String,
    pub read: bool,
    /// Loose reference to a ticket; may not exist in the current collection.
    pub ticket_id: String,
    pub kind: NotificationKind,
}

impl Notification {
    /// Ids under which the referenced ticket might appear.
    pub fn ticket_lookup_ids(&self) -> [String; 2] {
        let raw = self.ticket_id.trim_start_matches('#');
        [raw.to_string(), format!("T-{}", raw)]
    }
}

fn note(
    id: &str,
    title: &str,
    message: &str,
    time: &str,
    read: bool,
    ticket_id: &str,
    kind: NotificationKind,
) -> Notification {
    Notification {
        id: id.to_string(),
        title: title.to_string(),
        message: message.to_string(),
        time: time.to_string(),
        read,
        ticket_id: ticket_id.to_string(),
        kind,
    }
}

/// The feed every session starts with.
pub fn seed_notifications() -> Vec<Notification> {
    use NotificationKind::*;
    vec![
        note(
            "1",
            "Ticket Status Updated",
            "Ticket #1234 has been marked as In Progress",
            "5 minutes ago",
            false,
            "1234",
            StatusChange,
        ),
        note(
            "2",
            "New Assignment",
            "You have been assigned to Ticket #5678",
            "1 hour ago",
            false,
            "5678",
            Assignment,
        ),
        note(
            "3",
            "New Comment",
            "John Doe commented on Ticket #9012",
            "3 hours ago",
            true,
            "9012",
            Comment,
        ),
        note(
            "4",
            "Ticket Resolved",
            "Ticket #3456 has been marked as Resolved",
            "1 day ago",
            true,
            "3456",
            StatusChange,
        ),
        note(
            "5",
            "New Assignment",
            "You have been assigned to Ticket #7890",
            "2 days ago",
            true,
            "7890",
            Assignment,
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationFeed {
    items: Vec<Notification>,
}

impl Default for NotificationFeed {
    fn default() -> Self {
        Self::new(seed_notifications())
    }
}

impl NotificationFeed {
    pub fn new(items: Vec<Notification>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    pub fn mark_all_read(&mut self) {
        for item in &mut self.items {
            item.read = true;
        }
    }

    /// Mark one notification read and hand back the ticket it points at.
    pub fn open(&mut self, id: &str) -> Option<String> {
        let item = self.items.iter_mut().find(|n| n.id == id)?;
        item.read = true;
        Some(item.ticket_id.clone())
    }

    /// "{n} unread notification(s)"
    pub fn summary(&self) -> String {
        let unread = self.unread_count();
        if unread == 1 {
            "1 unread notification".to_string()
        } else {
            format!("{} unread notifications", unread)
        }
    }
}
