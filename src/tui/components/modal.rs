//! Centered modal box drawn over the current screen.

use iocraft::prelude::*;

use crate::tui::theme::theme;

/// Standard backdrop color for all modals
pub const MODAL_BACKDROP: Color = Color::Rgb {
    r: 30,
    g: 30,
    b: 30,
};

#[derive(Default, Props)]
pub struct ModalProps<'a> {
    pub title: Option<String>,
    /// Column count; defaults to 70% of the terminal
    pub width: Option<u32>,
    pub border_color: Option<Color>,
    pub footer_text: Option<String>,
    pub children: Vec<AnyElement<'a>>,
}

#[component]
pub fn Modal<'a>(props: &mut ModalProps<'a>) -> impl Into<AnyElement<'a>> {
    let theme = theme();
    let border_color = props.border_color.unwrap_or(theme.border_focused);
    let width = match props.width {
        Some(n) => Size::Length(n),
        None => Size::Percent(70.0),
    };
    let title = props.title.clone();
    let footer = props.footer_text.clone();

    element! {
        View(
            width: 100pct,
            height: 100pct,
            position: Position::Absolute,
            top: 0,
            left: 0,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            background_color: MODAL_BACKDROP,
        ) {
            View(
                width: width,
                background_color: theme.background,
                border_style: BorderStyle::Double,
                border_color: border_color,
                padding: 1,
                flex_direction: FlexDirection::Column,
            ) {
                #(title.map(|title| element! {
                    View(
                        width: 100pct,
                        padding_bottom: 1,
                        border_edges: Edges::Bottom,
                        border_style: BorderStyle::Single,
                        border_color: theme.border,
                        flex_direction: FlexDirection::Row,
                    ) {
                        Text(content: title, color: Color::Cyan, weight: Weight::Bold)
                        View(flex_grow: 1.0)
                        Text(content: "Esc to close", color: theme.text_dimmed)
                    }
                }))

                View(
                    flex_grow: 1.0,
                    width: 100pct,
                    flex_direction: FlexDirection::Column,
                    overflow: Overflow::Hidden,
                ) {
                    #(std::mem::take(&mut props.children))
                }

                #(footer.map(|footer| element! {
                    View(
                        width: 100pct,
                        padding_top: 1,
                        border_edges: Edges::Top,
                        border_style: BorderStyle::Single,
                        border_color: theme.border,
                    ) {
                        Text(content: footer, color: theme.text_dimmed)
                    }
                }))
            }
        }
    }
}
