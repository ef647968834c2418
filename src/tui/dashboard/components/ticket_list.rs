//! Ticket table

use iocraft::prelude::*;

use crate::tui::components::EmptyState;
use crate::tui::dashboard::model::ListViewModel;
use crate::tui::theme::theme;

const TITLE_WIDTH: usize = 40;

/// Shorten to `width` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[derive(Default, Props)]
pub struct TicketListProps {
    pub list: Option<ListViewModel>,
}

#[component]
pub fn TicketList(props: &TicketListProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let Some(list) = props.list.clone() else {
        return element!(View).into_any();
    };

    element! {
        View(
            width: 100pct,
            flex_grow: 1.0,
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Round,
            border_color: theme.border_focused,
        ) {
            #(list.error.clone().filter(|_| list.empty.is_none()).map(|error| element! {
                View(width: 100pct, padding_left: 1, flex_shrink: 0.0) {
                    Text(content: error, color: theme.error)
                }
            }))

            View(width: 100pct, padding_left: 1, flex_shrink: 0.0) {
                Text(
                    content: format!(
                        "  {:<8} {:<width$} {:<14} {:<12} {:<7} {:<4} {}",
                        "ID", "Title", "Company", "Status", "Prio", "Who", "Created",
                        width = TITLE_WIDTH,
                    ),
                    color: theme.text_dimmed,
                    weight: Weight::Bold,
                )
            }

            #(match list.empty {
                Some(kind) => element! {
                    EmptyState(kind, detail: list.error.clone())
                }.into_any(),
                None => element! {
                    View(width: 100pct, flex_grow: 1.0, flex_direction: FlexDirection::Column) {
                        #(list.rows.iter().map(|row| {
                            let status_color = theme.status_color(&row.status);
                            let priority_color = theme.priority_color(row.priority);
                            let base = if row.is_selected { Color::White } else { theme.text };
                            element! {
                                View(
                                    height: 1,
                                    width: 100pct,
                                    padding_left: 1,
                                    background_color: if row.is_selected { Some(theme.selected_bg) } else { None },
                                ) {
                                    Text(content: if row.is_selected { "> " } else { "  " }, color: base)
                                    Text(content: format!("{:<8} ", row.id), color: theme.id_color)
                                    Text(
                                        content: format!("{:<width$} ", truncate(&row.title, TITLE_WIDTH), width = TITLE_WIDTH),
                                        color: base,
                                    )
                                    Text(content: format!("{:<14} ", truncate(&row.company, 14)), color: theme.text_dimmed)
                                    Text(content: format!("{:<12} ", row.status.label()), color: status_color)
                                    Text(content: format!("{:<7} ", row.priority), color: priority_color)
                                    Text(content: format!("{:<4} ", row.assignee), color: base)
                                    Text(content: row.created.clone(), color: theme.text_dimmed)
                                }
                            }
                        }))
                    }
                }.into_any(),
            })

            View(width: 100pct, padding_left: 1, flex_shrink: 0.0) {
                Text(
                    content: format!("{} of {} tickets", list.visible_count, list.total_count),
                    color: theme.text_dimmed,
                )
            }
        }
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer title", 10), "a much ...");
    }
}
