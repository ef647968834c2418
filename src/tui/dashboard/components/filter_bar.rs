//! Status tabs and the search/priority/company filter row

use iocraft::prelude::*;

use crate::tui::components::{InputField, Select};
use crate::tui::dashboard::model::{FilterBarViewModel, TabViewModel};
use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct TabBarProps {
    pub tabs: Vec<TabViewModel>,
}

#[component]
pub fn TabBar(props: &TabBarProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    element! {
        View(
            width: 100pct,
            flex_shrink: 0.0,
            padding_left: 1,
            gap: 2,
            border_edges: Edges::Bottom,
            border_style: BorderStyle::Single,
            border_color: theme.border,
        ) {
            #(props.tabs.iter().map(|tab| element! {
                Text(
                    content: format!("{} {}", tab.key, tab.label),
                    color: if tab.active { Color::Cyan } else { theme.text_dimmed },
                    weight: if tab.active { Weight::Bold } else { Weight::Normal },
                )
            }))
        }
    }
}

#[derive(Default, Props)]
pub struct FilterBarProps {
    pub filters: Option<FilterBarViewModel>,
}

#[component]
pub fn FilterBar(props: &FilterBarProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let Some(filters) = props.filters.clone() else {
        return element!(View).into_any();
    };

    element! {
        View(
            width: 100pct,
            flex_shrink: 0.0,
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            padding_right: 1,
            gap: 2,
        ) {
            View(flex_grow: 1.0) {
                InputField(
                    label: "/",
                    value: filters.query,
                    has_focus: filters.search_focused,
                    placeholder: Some("Search tickets...".to_string()),
                )
            }
            Select(label: "Priority", value: filters.priority, has_focus: false)
            Select(label: "Company", value: filters.company, has_focus: false)
            #(filters.any_active.then(|| element! {
                Text(content: "[x] clear", color: theme.text_dimmed)
            }))
        }
    }
    .into_any()
}
