//! Compact inline selector: `Label: ◀ value ▶`

use iocraft::prelude::*;

use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct SelectProps {
    pub label: String,
    pub value: String,
    pub has_focus: bool,
    pub value_color: Option<Color>,
}

#[component]
pub fn Select(props: &SelectProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let accent = if props.has_focus {
        theme.border_focused
    } else {
        theme.text_dimmed
    };
    let value_color = props.value_color.unwrap_or(theme.text);

    element! {
        View(flex_direction: FlexDirection::Row, gap: 1) {
            Text(content: format!("{}:", props.label), color: accent)
            Text(content: "◀", color: accent)
            Text(content: props.value.clone(), color: value_color, weight: Weight::Bold)
            Text(content: "▶", color: accent)
        }
    }
}
