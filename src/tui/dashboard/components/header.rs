//! Dashboard header and summary counters

use iocraft::prelude::*;

use crate::filter::DashboardCounts;
use crate::tui::dashboard::model::HeaderViewModel;
use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct DashboardHeaderProps {
    pub header: Option<HeaderViewModel>,
}

/// Title row with the signed-in user and the unread badge
#[component]
pub fn DashboardHeader(props: &DashboardHeaderProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let Some(header) = props.header.clone() else {
        return element!(View).into_any();
    };

    let badge = if header.unread > 0 {
        format!("[n] {} unread", header.unread)
    } else {
        "[n] inbox".to_string()
    };
    let badge_color = if header.unread > 0 {
        theme.unread
    } else {
        theme.text_dimmed
    };

    element! {
        View(
            width: 100pct,
            flex_shrink: 0.0,
            padding_left: 1,
            padding_right: 1,
            flex_direction: FlexDirection::Row,
            gap: 2,
        ) {
            Text(content: header.title, color: Color::Cyan, weight: Weight::Bold)
            #(header.loading.then(|| element! {
                Text(content: "refreshing...", color: theme.text_dimmed)
            }))
            View(flex_grow: 1.0)
            Text(content: badge, color: badge_color)
            Text(content: header.user, color: theme.text_dimmed)
            Text(content: "[?]", color: theme.text_dimmed)
        }
    }
    .into_any()
}

#[derive(Default, Props)]
pub struct SummaryCardsProps {
    pub counts: DashboardCounts,
}

/// Four counters over the whole collection
#[component]
pub fn SummaryCards(props: &SummaryCardsProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let counts = props.counts;
    let cards = [
        ("Total Tickets", counts.total, theme.text),
        ("New", counts.new, theme.status_new),
        ("In Progress", counts.in_progress, theme.status_in_progress),
        ("Resolved", counts.resolved, theme.status_resolved),
    ];

    element! {
        View(width: 100pct, flex_shrink: 0.0, flex_direction: FlexDirection::Row) {
            #(cards.into_iter().map(|(label, value, color)| element! {
                View(
                    flex_grow: 1.0,
                    flex_direction: FlexDirection::Column,
                    border_style: BorderStyle::Round,
                    border_color: theme.border,
                    padding_left: 1,
                ) {
                    Text(content: label, color: theme.text_dimmed)
                    Text(content: value.to_string(), color: color, weight: Weight::Bold)
                }
            }))
        }
    }
}
