//! Modal overlays: ticket detail, notification panel and key help

use iocraft::prelude::*;

use crate::tui::components::{InputField, Modal, Select};
use crate::tui::dashboard::detail::DetailField;
use crate::tui::dashboard::model::{DetailViewModel, NotificationsViewModel, OverlayViewModel};
use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct DashboardOverlayProps {
    pub overlay: Option<OverlayViewModel>,
}

#[component]
pub fn DashboardOverlay(props: &DashboardOverlayProps) -> impl Into<AnyElement<'static>> {
    match props.overlay.clone() {
        Some(OverlayViewModel::Detail(detail)) => render_detail(detail),
        Some(OverlayViewModel::Notifications(panel)) => render_notifications(panel),
        Some(OverlayViewModel::Help) => render_help(),
        Some(OverlayViewModel::None) | None => element!(View).into_any(),
    }
}

fn render_detail(detail: DetailViewModel) -> AnyElement<'static> {
    let theme = theme();
    let focus = detail.focus;
    let editing = |field: DetailField| focus == field && detail.editing;
    let footer = if detail.dirty {
        "Unsaved changes. [s] save locally  [Esc] discard"
    } else {
        "[Tab] next field  [Enter] edit  [Esc] close"
    };
    let assignee_line = if detail.assignee.trim().is_empty() {
        "Unassigned".to_string()
    } else {
        format!("({}) {}", detail.initials, detail.assignee)
    };

    element! {
        Modal(
            title: Some(format!("Ticket {}", detail.id)),
            border_color: Some(theme.border_focused),
            footer_text: Some(footer.to_string()),
        ) {
            View(flex_direction: FlexDirection::Row, gap: 2, margin_bottom: 1) {
                Text(content: detail.company.clone(), color: theme.text_dimmed)
                Text(
                    content: format!("priority: {}", detail.priority),
                    color: theme.priority_color(detail.priority),
                )
                Text(content: format!("created: {}", detail.created), color: theme.text_dimmed)
            }

            InputField(
                label: "Title",
                value: detail.title.clone(),
                has_focus: editing(DetailField::Title),
            )
            #((focus == DetailField::Title && !detail.editing).then(|| element! {
                Text(content: "  ^ Enter to edit", color: theme.text_dimmed)
            }))

            View(
                flex_direction: FlexDirection::Column,
                border_style: BorderStyle::Round,
                border_color: if focus == DetailField::Description { theme.border_focused } else { theme.border },
                padding_left: 1,
                padding_right: 1,
                min_height: 5,
            ) {
                Text(content: "Description", color: theme.text_dimmed)
                Text(
                    content: if editing(DetailField::Description) {
                        format!("{}▏", detail.description)
                    } else {
                        detail.description.clone()
                    },
                    color: theme.text,
                )
            }

            View(margin_top: 1, margin_bottom: 1) {
                Select(
                    label: "Status",
                    value: detail.status.label(),
                    has_focus: focus == DetailField::Status,
                    value_color: Some(theme.status_color(&detail.status)),
                )
            }

            InputField(
                label: "Assigned",
                value: if editing(DetailField::Assignee) { detail.assignee.clone() } else { assignee_line },
                has_focus: editing(DetailField::Assignee),
                placeholder: Some("Unassigned".to_string()),
            )
            #((focus == DetailField::Assignee && !detail.editing).then(|| element! {
                Text(content: "  ^ Enter to edit", color: theme.text_dimmed)
            }))
        }
    }
    .into_any()
}

fn render_notifications(panel: NotificationsViewModel) -> AnyElement<'static> {
    let theme = theme();
    let footer = if panel.show_mark_all {
        "[a] mark all as read  [Enter] open ticket  [Esc] close"
    } else {
        "[Enter] open ticket  [Esc] close"
    };

    element! {
        Modal(
            title: Some("Notifications".to_string()),
            width: Some(64),
            footer_text: Some(footer.to_string()),
        ) {
            Text(content: panel.summary.clone(), color: theme.text_dimmed)
            #(panel.rows.iter().map(|row| {
                let marker = if row.read { " " } else { "●" };
                let title_color = if row.read { theme.text_dimmed } else { theme.text };
                element! {
                    View(
                        width: 100pct,
                        flex_direction: FlexDirection::Column,
                        padding_left: 1,
                        margin_top: 1,
                        background_color: if row.is_selected { Some(theme.selected_bg) } else { None },
                    ) {
                        View(flex_direction: FlexDirection::Row, gap: 1) {
                            Text(content: marker, color: theme.unread)
                            Text(content: row.title.clone(), color: title_color, weight: Weight::Bold)
                            View(flex_grow: 1.0)
                            Text(content: row.kind_label, color: theme.text_dimmed)
                        }
                        Text(content: format!("  {}", row.message), color: title_color)
                        Text(content: format!("  {}", row.time), color: theme.text_dimmed)
                    }
                }
            }))
        }
    }
    .into_any()
}

const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j / Down", "Move down"),
            ("k / Up", "Move up"),
            ("g / G", "First / last ticket"),
            ("C-d / C-u", "Half page down / up"),
        ],
    ),
    (
        "Filters",
        &[
            ("1-4, Tab", "Status tab"),
            ("/", "Search"),
            ("p", "Cycle priority"),
            ("c", "Cycle company"),
            ("x", "Clear filters"),
        ],
    ),
    (
        "Actions",
        &[
            ("Enter", "Open ticket"),
            ("n", "Notifications"),
            ("r", "Refresh"),
            ("y", "Copy ticket ID"),
            ("L", "Log out"),
            ("q", "Quit"),
        ],
    ),
];

fn render_help() -> AnyElement<'static> {
    let theme = theme();

    element! {
        Modal(title: Some("Keyboard Shortcuts".to_string()), width: Some(52)) {
            #(HELP_SECTIONS.iter().map(|(section, keys)| element! {
                View(flex_direction: FlexDirection::Column, margin_bottom: 1) {
                    Text(content: *section, color: Color::Cyan, weight: Weight::Bold)
                    #(keys.iter().map(|(key, action)| element! {
                        View(flex_direction: FlexDirection::Row) {
                            View(width: 14) {
                                Text(content: *key, color: theme.highlight)
                            }
                            Text(content: *action, color: theme.text)
                        }
                    }))
                }
            }))
        }
    }
    .into_any()
}
