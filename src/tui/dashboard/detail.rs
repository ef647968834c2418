//! Local-only editor for a single ticket.
//!
//! The editor works on a copy of the ticket taken when it opens. Saving
//! yields a [`TicketDraft`] for the caller to log; nothing is written back
//! to the collection or upstream, and closing discards the copy.

use iocraft::prelude::{KeyCode, KeyModifiers};

use crate::tui::handlers::{TextKey, apply_text_key, classify_text_key};
use crate::types::{Ticket, TicketStatus, initials};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailField {
    #[default]
    Title,
    Description,
    Status,
    Assignee,
}

impl DetailField {
    const ORDER: [DetailField; 4] = [
        DetailField::Title,
        DetailField::Description,
        DetailField::Status,
        DetailField::Assignee,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> DetailField {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> DetailField {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn is_text(self) -> bool {
        !matches!(self, DetailField::Status)
    }
}

/// What the editor would save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub assignee: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailAction {
    NextField,
    PrevField,
    /// Switch the focused text field into edit mode
    BeginEdit,
    Edit(TextKey),
    /// Leave edit mode keeping the text
    CommitEdit,
    CycleStatus { forward: bool },
    Save,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailOutcome {
    Continue,
    Save(TicketDraft),
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailEditor {
    original: Ticket,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub assignee: String,
    pub focus: DetailField,
    pub editing: bool,
}

impl DetailEditor {
    pub fn open(ticket: &Ticket) -> Self {
        Self {
            original: ticket.clone(),
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            status: ticket.status_kind(),
            assignee: ticket.assigned_to.clone().unwrap_or_default(),
            focus: DetailField::default(),
            editing: false,
        }
    }

    pub fn ticket(&self) -> &Ticket {
        &self.original
    }

    pub fn assignee_initials(&self) -> String {
        initials(&self.assignee)
    }

    pub fn draft(&self) -> TicketDraft {
        let assignee = self.assignee.trim();
        TicketDraft {
            id: self.original.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
            assignee: (!assignee.is_empty()).then(|| assignee.to_string()),
        }
    }

    /// Names of the fields that differ from the opened ticket.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if self.title != self.original.title {
            changed.push("title");
        }
        if self.description != self.original.description {
            changed.push("description");
        }
        if self.status != self.original.status_kind() {
            changed.push("status");
        }
        if self.assignee.trim() != self.original.assigned_to.as_deref().unwrap_or_default() {
            changed.push("assignee");
        }
        changed
    }

    pub fn is_dirty(&self) -> bool {
        !self.changed_fields().is_empty()
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            DetailField::Title => Some(&mut self.title),
            DetailField::Description => Some(&mut self.description),
            DetailField::Assignee => Some(&mut self.assignee),
            DetailField::Status => None,
        }
    }

    pub fn apply(&mut self, action: DetailAction) -> DetailOutcome {
        match action {
            DetailAction::NextField => {
                self.editing = false;
                self.focus = self.focus.next();
            }
            DetailAction::PrevField => {
                self.editing = false;
                self.focus = self.focus.prev();
            }
            DetailAction::BeginEdit => {
                self.editing = self.focus.is_text();
            }
            DetailAction::Edit(key) => {
                if self.editing
                    && let Some(text) = self.focused_text()
                {
                    apply_text_key(text, key);
                }
            }
            DetailAction::CommitEdit => {
                self.editing = false;
            }
            DetailAction::CycleStatus { forward } => {
                if self.focus == DetailField::Status {
                    self.status = if forward {
                        self.status.cycle_next()
                    } else {
                        self.status.cycle_prev()
                    };
                }
            }
            DetailAction::Save => {
                self.editing = false;
                return DetailOutcome::Save(self.draft());
            }
            DetailAction::Close => return DetailOutcome::Close,
        }
        DetailOutcome::Continue
    }
}

/// Map a key press to an editor action.
pub fn detail_key_to_action(
    code: KeyCode,
    modifiers: KeyModifiers,
    editor: &DetailEditor,
) -> Option<DetailAction> {
    if editor.editing {
        return match classify_text_key(code, modifiers) {
            TextKey::Commit if editor.focus == DetailField::Description => {
                Some(DetailAction::Edit(TextKey::Insert('\n')))
            }
            TextKey::Commit | TextKey::Cancel => Some(DetailAction::CommitEdit),
            TextKey::NextField => Some(DetailAction::NextField),
            TextKey::PrevField => Some(DetailAction::PrevField),
            TextKey::Quit => Some(DetailAction::Close),
            TextKey::Ignore => None,
            key => Some(DetailAction::Edit(key)),
        };
    }

    let on_status = editor.focus == DetailField::Status;
    match (code, modifiers) {
        (KeyCode::Char('s'), m) if m.contains(KeyModifiers::CONTROL) => Some(DetailAction::Save),
        (KeyCode::Char('s'), KeyModifiers::NONE) => Some(DetailAction::Save),
        (KeyCode::Esc | KeyCode::Char('q'), _) => Some(DetailAction::Close),
        (KeyCode::Tab | KeyCode::Down | KeyCode::Char('j'), _) => Some(DetailAction::NextField),
        (KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k'), _) => Some(DetailAction::PrevField),
        (KeyCode::Left | KeyCode::Char('h'), _) if on_status => {
            Some(DetailAction::CycleStatus { forward: false })
        }
        (KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') | KeyCode::Enter, _)
            if on_status =>
        {
            Some(DetailAction::CycleStatus { forward: true })
        }
        (KeyCode::Enter | KeyCode::Char('e'), _) => Some(DetailAction::BeginEdit),
        _ => None,
    }
}
