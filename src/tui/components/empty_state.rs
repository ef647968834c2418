//! Placeholder shown in place of the ticket list.

use iocraft::prelude::*;

use crate::tui::theme::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyStateKind {
    #[default]
    Loading,
    /// The sheet returned no rows
    NoTickets,
    /// Rows exist but the filters hide all of them
    NoMatches,
    /// The fetch failed before anything was loaded
    LoadFailed,
}

impl EmptyStateKind {
    /// (icon, title, hint)
    pub fn text(self) -> (&'static str, &'static str, &'static str) {
        match self {
            EmptyStateKind::Loading => ("~", "Loading tickets...", ""),
            EmptyStateKind::NoTickets => ("i", "No tickets yet", "Press r to refresh."),
            EmptyStateKind::NoMatches => (
                "?",
                "No tickets found matching your criteria",
                "Press x to clear filters.",
            ),
            EmptyStateKind::LoadFailed => ("!", "Failed to load tickets", "Press r to retry."),
        }
    }
}

#[derive(Default, Props)]
pub struct EmptyStateProps {
    pub kind: EmptyStateKind,
    /// Extra line under the title, e.g. the error text
    pub detail: Option<String>,
}

#[component]
pub fn EmptyState(props: &EmptyStateProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let (icon, title, hint) = props.kind.text();
    let accent = if props.kind == EmptyStateKind::LoadFailed {
        theme.error
    } else {
        theme.border
    };

    element! {
        View(
            width: 100pct,
            flex_grow: 1.0,
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            padding: 2,
        ) {
            View(
                width: 5,
                height: 3,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border_style: BorderStyle::Round,
                border_color: accent,
                margin_bottom: 1,
            ) {
                Text(content: icon, color: accent, weight: Weight::Bold)
            }

            Text(content: title, color: theme.text, weight: Weight::Bold)

            #(props.detail.clone().map(|detail| element! {
                View(margin_top: 1, max_width: 60) {
                    Text(content: detail, color: theme.text_dimmed)
                }
            }))

            #((!hint.is_empty()).then(|| element! {
                View(margin_top: 2) {
                    Text(content: hint, color: theme.text_dimmed)
                }
            }))
        }
    }
}
