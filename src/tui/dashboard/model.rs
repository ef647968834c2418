//! Dashboard model types for testable state management
//!
//! The dashboard component keeps a single [`DashboardState`] and drives it
//! through [`reduce`]. Anything needing I/O comes back out as an [`Effect`]
//! for the component to run, so all of the screen's behavior can be tested
//! without the iocraft runtime.

use iocraft::prelude::{KeyCode, KeyModifiers};

use crate::error::Result;
use crate::filter::{
    DashboardCounts, FilterCriteria, StatusTab, company_options, cycle_company, filter_tickets,
};
use crate::notifications::NotificationFeed;
use crate::ticket::{LoadState, LoadTicket, TicketStore};
use crate::tui::components::empty_state::EmptyStateKind;
use crate::tui::components::footer::{Shortcut, shortcuts};
use crate::tui::components::toast::Toast;
use crate::tui::handlers::{TextKey, apply_text_key, classify_text_key};
use crate::tui::navigation::ListCursor;
use crate::types::{Ticket, TicketPriority, TicketStatus, initials};

use super::detail::{DetailAction, DetailEditor, DetailOutcome, TicketDraft, detail_key_to_action};

pub const DASHBOARD_TITLE: &str = "Citimax IT Ticketing System";

// ============================================================================
// State Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Detail(DetailEditor),
    Notifications {
        selected: usize,
    },
    Help,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub store: TicketStore,
    pub criteria: FilterCriteria,
    pub company_order: Vec<String>,
    pub cursor: ListCursor,
    pub search_focused: bool,
    pub overlay: Overlay,
    pub notifications: NotificationFeed,
    pub toast: Option<Toast>,
    /// Signed-in user's email, shown in the header
    pub user: String,
}

impl DashboardState {
    pub fn new(user: impl Into<String>, company_order: Vec<String>) -> Self {
        Self {
            store: TicketStore::new(),
            criteria: FilterCriteria::default(),
            company_order,
            cursor: ListCursor::default(),
            search_focused: false,
            overlay: Overlay::None,
            notifications: NotificationFeed::default(),
            toast: None,
            user: user.into(),
        }
    }

    pub fn visible(&self) -> Vec<&Ticket> {
        filter_tickets(self.store.tickets(), &self.criteria)
    }

    pub fn selected_ticket(&self) -> Option<&Ticket> {
        self.visible().get(self.cursor.selected).copied()
    }

    pub fn companies(&self) -> Vec<String> {
        company_options(self.store.tickets(), &self.company_order)
    }

    pub fn detail(&self) -> Option<&DetailEditor> {
        match &self.overlay {
            Overlay::Detail(editor) => Some(editor),
            _ => None,
        }
    }
}

// ============================================================================
// Action Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardAction {
    // Navigation
    MoveUp,
    MoveDown,
    GoToTop,
    GoToBottom,
    PageUp,
    PageDown,

    // Filters
    SelectTab(StatusTab),
    NextTab,
    PrevTab,
    CyclePriority,
    CycleCompany,
    ClearFilters,

    // Search
    FocusSearch,
    SearchKey(TextKey),
    ExitSearch,
    ClearSearchAndExit,

    // Detail
    OpenDetail,
    Detail(DetailAction),

    // Notifications
    ShowNotifications,
    HideNotifications,
    NotificationUp,
    NotificationDown,
    OpenNotification,
    MarkAllRead,

    // Modals
    ShowHelp,
    HideHelp,

    // App
    Refresh,
    CopyId,
    Logout,
    Quit,
}

/// Work the component has to carry out after a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch(LoadTicket),
    CopyToClipboard(String),
    SaveDraft(TicketDraft),
    Logout,
    Exit,
}

// ============================================================================
// View Model Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardViewModel {
    pub header: HeaderViewModel,
    pub counts: DashboardCounts,
    pub tabs: Vec<TabViewModel>,
    pub filters: FilterBarViewModel,
    pub list: ListViewModel,
    pub overlay: OverlayViewModel,
    pub toast: Option<Toast>,
    pub shortcuts: Vec<Shortcut>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderViewModel {
    pub title: &'static str,
    pub user: String,
    pub loading: bool,
    pub unread: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabViewModel {
    pub key: char,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBarViewModel {
    pub query: String,
    pub search_focused: bool,
    pub priority: String,
    pub company: String,
    pub any_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRowViewModel {
    pub id: String,
    pub title: String,
    pub company: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub assignee: String,
    pub created: String,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewModel {
    pub rows: Vec<TicketRowViewModel>,
    pub visible_count: usize,
    pub total_count: usize,
    pub empty: Option<EmptyStateKind>,
    /// Banner shown above the list when a refresh failed
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailViewModel {
    pub id: String,
    pub company: String,
    pub priority: TicketPriority,
    pub created: String,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub assignee: String,
    pub initials: String,
    pub focus: super::detail::DetailField,
    pub editing: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRowViewModel {
    pub title: String,
    pub message: String,
    pub time: String,
    pub kind_label: &'static str,
    pub read: bool,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationsViewModel {
    pub summary: String,
    pub show_mark_all: bool,
    pub rows: Vec<NotificationRowViewModel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayViewModel {
    None,
    Detail(DetailViewModel),
    Notifications(NotificationsViewModel),
    Help,
}

// ============================================================================
// View Model Computation
// ============================================================================

pub fn compute_view_model(state: &DashboardState, list_height: usize) -> DashboardViewModel {
    let tickets = state.store.tickets();
    let visible = state.visible();
    let loading = state.store.is_loading();

    let rows = visible
        .iter()
        .enumerate()
        .skip(state.cursor.scroll)
        .take(list_height.max(1))
        .map(|(idx, t)| TicketRowViewModel {
            id: t.id.clone(),
            title: t.title.clone(),
            company: t.company.clone(),
            status: t.status_kind(),
            priority: t.priority,
            assignee: t.assigned_to.as_deref().map(initials).unwrap_or_default(),
            created: t.created_date().to_string(),
            is_selected: idx == state.cursor.selected,
        })
        .collect();

    let empty = if !visible.is_empty() {
        None
    } else if !tickets.is_empty() {
        Some(EmptyStateKind::NoMatches)
    } else {
        match state.store.state() {
            LoadState::Idle | LoadState::Loading => Some(EmptyStateKind::Loading),
            LoadState::Ready => Some(EmptyStateKind::NoTickets),
            LoadState::Failed(_) => Some(EmptyStateKind::LoadFailed),
        }
    };

    let overlay = match &state.overlay {
        Overlay::None => OverlayViewModel::None,
        Overlay::Help => OverlayViewModel::Help,
        Overlay::Detail(editor) => {
            let ticket = editor.ticket();
            OverlayViewModel::Detail(DetailViewModel {
                id: ticket.id.clone(),
                company: ticket.company.clone(),
                priority: ticket.priority,
                created: ticket.created_at.clone(),
                title: editor.title.clone(),
                description: editor.description.clone(),
                status: editor.status.clone(),
                assignee: editor.assignee.clone(),
                initials: editor.assignee_initials(),
                focus: editor.focus,
                editing: editor.editing,
                dirty: editor.is_dirty(),
            })
        }
        Overlay::Notifications { selected } => {
            let feed = &state.notifications;
            OverlayViewModel::Notifications(NotificationsViewModel {
                summary: feed.summary(),
                show_mark_all: feed.unread_count() > 0,
                rows: feed
                    .items()
                    .iter()
                    .enumerate()
                    .map(|(idx, n)| NotificationRowViewModel {
                        title: n.title.clone(),
                        message: n.message.clone(),
                        time: n.time.clone(),
                        kind_label: n.kind.label(),
                        read: n.read,
                        is_selected: idx == *selected,
                    })
                    .collect(),
            })
        }
    };

    DashboardViewModel {
        header: HeaderViewModel {
            title: DASHBOARD_TITLE,
            user: state.user.clone(),
            loading,
            unread: state.notifications.unread_count(),
        },
        counts: DashboardCounts::from_tickets(tickets),
        tabs: StatusTab::ALL
            .iter()
            .enumerate()
            .map(|(idx, tab)| TabViewModel {
                key: char::from(b'1' + idx as u8),
                label: tab.label(),
                active: *tab == state.criteria.status,
            })
            .collect(),
        filters: FilterBarViewModel {
            query: state.criteria.query.clone(),
            search_focused: state.search_focused,
            priority: state.criteria.priority.to_string(),
            company: state
                .criteria
                .company
                .clone()
                .unwrap_or_else(|| "all".to_string()),
            any_active: !state.criteria.is_default(),
        },
        list: ListViewModel {
            rows,
            visible_count: visible.len(),
            total_count: tickets.len(),
            empty,
            error: state.store.error().map(str::to_string),
        },
        overlay,
        toast: state.toast.clone(),
        shortcuts: compute_shortcuts(state),
    }
}

fn compute_shortcuts(state: &DashboardState) -> Vec<Shortcut> {
    match &state.overlay {
        Overlay::Help => shortcuts(&[("Esc", "Close")]),
        Overlay::Notifications { .. } => shortcuts(&[
            ("j/k", "Move"),
            ("Enter", "Open Ticket"),
            ("a", "Mark All Read"),
            ("Esc", "Close"),
        ]),
        Overlay::Detail(editor) if editor.editing => shortcuts(&[
            ("Enter", "Done"),
            ("Tab", "Next Field"),
            ("Esc", "Done"),
        ]),
        Overlay::Detail(_) => shortcuts(&[
            ("Tab", "Next Field"),
            ("Enter", "Edit"),
            ("←/→", "Status"),
            ("s", "Save Changes"),
            ("Esc", "Close"),
        ]),
        Overlay::None if state.search_focused => shortcuts(&[
            ("Enter", "Apply Search"),
            ("Esc", "Clear & Exit"),
            ("C-q", "Quit"),
        ]),
        Overlay::None => shortcuts(&[
            ("j/k", "Move"),
            ("/", "Search"),
            ("1-4", "Tab"),
            ("p", "Priority"),
            ("c", "Company"),
            ("x", "Clear Filters"),
            ("Enter", "Open"),
            ("n", "Notifications"),
            ("r", "Refresh"),
            ("y", "Copy ID"),
            ("L", "Log Out"),
            ("?", "Help"),
            ("q", "Quit"),
        ]),
    }
}

// ============================================================================
// State Reduction
// ============================================================================

/// Apply an action. Returns the side effect, if any, the component must run.
pub fn reduce(state: &mut DashboardState, action: DashboardAction, list_height: usize) -> Option<Effect> {
    state.toast = None;
    let visible_count = state.visible().len();

    let effect = match action {
        DashboardAction::MoveUp => {
            state.cursor.up();
            None
        }
        DashboardAction::MoveDown => {
            state.cursor.down(visible_count, list_height);
            None
        }
        DashboardAction::GoToTop => {
            state.cursor.top();
            None
        }
        DashboardAction::GoToBottom => {
            state.cursor.bottom(visible_count, list_height);
            None
        }
        DashboardAction::PageUp => {
            state.cursor.page_up(list_height);
            None
        }
        DashboardAction::PageDown => {
            state.cursor.page_down(visible_count, list_height);
            None
        }

        DashboardAction::SelectTab(tab) => {
            state.criteria.status = tab;
            state.cursor.top();
            None
        }
        DashboardAction::NextTab => {
            state.criteria.status = state.criteria.status.next();
            state.cursor.top();
            None
        }
        DashboardAction::PrevTab => {
            state.criteria.status = state.criteria.status.prev();
            state.cursor.top();
            None
        }
        DashboardAction::CyclePriority => {
            state.criteria.priority = state.criteria.priority.next();
            state.cursor.top();
            None
        }
        DashboardAction::CycleCompany => {
            let companies = state.companies();
            state.criteria.company = cycle_company(state.criteria.company.as_deref(), &companies);
            state.cursor.top();
            None
        }
        DashboardAction::ClearFilters => {
            state.criteria.clear();
            state.search_focused = false;
            state.cursor.top();
            None
        }

        DashboardAction::FocusSearch => {
            state.search_focused = true;
            None
        }
        DashboardAction::SearchKey(key) => {
            if apply_text_key(&mut state.criteria.query, key) {
                state.cursor.top();
            }
            None
        }
        DashboardAction::ExitSearch => {
            state.search_focused = false;
            None
        }
        DashboardAction::ClearSearchAndExit => {
            state.criteria.query.clear();
            state.search_focused = false;
            state.cursor.top();
            None
        }

        DashboardAction::OpenDetail => {
            if let Some(ticket) = state.selected_ticket() {
                state.overlay = Overlay::Detail(DetailEditor::open(ticket));
            }
            None
        }
        DashboardAction::Detail(detail_action) => {
            let Overlay::Detail(editor) = &mut state.overlay else {
                return None;
            };
            match editor.apply(detail_action) {
                DetailOutcome::Continue => None,
                DetailOutcome::Close => {
                    state.overlay = Overlay::None;
                    None
                }
                DetailOutcome::Save(draft) => {
                    state.overlay = Overlay::None;
                    state.toast = Some(Toast::info(format!(
                        "{} changes kept locally; the sheet was not updated",
                        draft.id
                    )));
                    Some(Effect::SaveDraft(draft))
                }
            }
        }

        DashboardAction::ShowNotifications => {
            state.overlay = Overlay::Notifications { selected: 0 };
            None
        }
        DashboardAction::HideNotifications => {
            state.overlay = Overlay::None;
            None
        }
        DashboardAction::NotificationUp => {
            if let Overlay::Notifications { selected } = &mut state.overlay {
                *selected = selected.saturating_sub(1);
            }
            None
        }
        DashboardAction::NotificationDown => {
            let len = state.notifications.len();
            if let Overlay::Notifications { selected } = &mut state.overlay
                && len > 0
            {
                *selected = (*selected + 1).min(len - 1);
            }
            None
        }
        DashboardAction::OpenNotification => {
            open_notification(state);
            None
        }
        DashboardAction::MarkAllRead => {
            state.notifications.mark_all_read();
            None
        }

        DashboardAction::ShowHelp => {
            state.overlay = Overlay::Help;
            None
        }
        DashboardAction::HideHelp => {
            state.overlay = Overlay::None;
            None
        }

        DashboardAction::Refresh => match state.store.begin_load() {
            Some(ticket) => Some(Effect::Fetch(ticket)),
            None => {
                state.toast = Some(Toast::info("Already loading tickets"));
                None
            }
        },
        DashboardAction::CopyId => match state.selected_ticket() {
            Some(ticket) => {
                let id = ticket.id.clone();
                state.toast = Some(Toast::success(format!("Copied {}", id)));
                Some(Effect::CopyToClipboard(id))
            }
            None => None,
        },
        DashboardAction::Logout => {
            state.store.cancel_load();
            state.overlay = Overlay::None;
            Some(Effect::Logout)
        }
        DashboardAction::Quit => {
            state.store.cancel_load();
            Some(Effect::Exit)
        }
    };

    let count = state.visible().len();
    state.cursor.clamp(count, list_height);
    effect
}

fn open_notification(state: &mut DashboardState) {
    let Overlay::Notifications { selected } = state.overlay else {
        return;
    };
    let Some(id) = state.notifications.items().get(selected).map(|n| n.id.clone()) else {
        return;
    };
    let lookup = state
        .notifications
        .items()
        .get(selected)
        .map(|n| n.ticket_lookup_ids());
    let Some(ticket_id) = state.notifications.open(&id) else {
        return;
    };

    let found = lookup
        .iter()
        .flatten()
        .find_map(|candidate| state.store.find(candidate))
        .map(DetailEditor::open);
    match found {
        Some(editor) => state.overlay = Overlay::Detail(editor),
        None => {
            state.toast = Some(Toast::warning(format!(
                "Ticket #{} is not in the current list",
                ticket_id
            )));
        }
    }
}

/// Feed a finished fetch into the state.
pub fn apply_load(
    state: &mut DashboardState,
    ticket: LoadTicket,
    result: Result<Vec<Ticket>>,
    list_height: usize,
) {
    if !state.store.finish_load(ticket, result) {
        return;
    }
    if let Some(msg) = state.store.error() {
        state.toast = Some(Toast::error(msg.to_string()));
    }
    if let Some(company) = state.criteria.company.as_deref()
        && !state.store.tickets().iter().any(|t| t.company == company)
    {
        state.criteria.company = None;
    }
    let count = state.visible().len();
    state.cursor.clamp(count, list_height);
}

// ============================================================================
// Key Mapping
// ============================================================================

/// Convert a key event to a DashboardAction (pure function)
pub fn key_to_action(
    code: KeyCode,
    modifiers: KeyModifiers,
    state: &DashboardState,
) -> Option<DashboardAction> {
    match &state.overlay {
        Overlay::Help => {
            return match code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    Some(DashboardAction::HideHelp)
                }
                _ => None,
            };
        }
        Overlay::Notifications { .. } => {
            return match code {
                KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('q') => {
                    Some(DashboardAction::HideNotifications)
                }
                KeyCode::Char('j') | KeyCode::Down => Some(DashboardAction::NotificationDown),
                KeyCode::Char('k') | KeyCode::Up => Some(DashboardAction::NotificationUp),
                KeyCode::Enter => Some(DashboardAction::OpenNotification),
                KeyCode::Char('a') => Some(DashboardAction::MarkAllRead),
                _ => None,
            };
        }
        Overlay::Detail(editor) => {
            return detail_key_to_action(code, modifiers, editor).map(DashboardAction::Detail);
        }
        Overlay::None => {}
    }

    if state.search_focused {
        return match classify_text_key(code, modifiers) {
            TextKey::Cancel => Some(DashboardAction::ClearSearchAndExit),
            TextKey::Commit | TextKey::NextField | TextKey::PrevField => {
                Some(DashboardAction::ExitSearch)
            }
            TextKey::Quit => Some(DashboardAction::Quit),
            TextKey::Ignore => None,
            key => Some(DashboardAction::SearchKey(key)),
        };
    }

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(DashboardAction::Quit),
            KeyCode::Char('d') => Some(DashboardAction::PageDown),
            KeyCode::Char('u') => Some(DashboardAction::PageUp),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('j') | KeyCode::Down => Some(DashboardAction::MoveDown),
        KeyCode::Char('k') | KeyCode::Up => Some(DashboardAction::MoveUp),
        KeyCode::Char('g') | KeyCode::Home => Some(DashboardAction::GoToTop),
        KeyCode::Char('G') | KeyCode::End => Some(DashboardAction::GoToBottom),
        KeyCode::PageUp => Some(DashboardAction::PageUp),
        KeyCode::PageDown => Some(DashboardAction::PageDown),

        KeyCode::Char(c @ '1'..='4') => {
            let idx = (c as usize) - ('1' as usize);
            Some(DashboardAction::SelectTab(StatusTab::ALL[idx]))
        }
        KeyCode::Tab => Some(DashboardAction::NextTab),
        KeyCode::BackTab => Some(DashboardAction::PrevTab),
        KeyCode::Char('p') => Some(DashboardAction::CyclePriority),
        KeyCode::Char('c') => Some(DashboardAction::CycleCompany),
        KeyCode::Char('x') => Some(DashboardAction::ClearFilters),

        KeyCode::Char('/') => Some(DashboardAction::FocusSearch),
        KeyCode::Esc if !state.criteria.query.is_empty() => {
            Some(DashboardAction::ClearSearchAndExit)
        }

        KeyCode::Enter => Some(DashboardAction::OpenDetail),
        KeyCode::Char('n') => Some(DashboardAction::ShowNotifications),
        KeyCode::Char('?') => Some(DashboardAction::ShowHelp),

        KeyCode::Char('r') => Some(DashboardAction::Refresh),
        KeyCode::Char('y') => Some(DashboardAction::CopyId),
        KeyCode::Char('L') => Some(DashboardAction::Logout),
        KeyCode::Char('q') => Some(DashboardAction::Quit),
        _ => None,
    }
}
