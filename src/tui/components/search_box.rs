//! Single-line labelled input box.
//!
//! The box only renders; keys are fed to the owning screen model through
//! [`crate::tui::handlers`]. Used for the dashboard search and the login and
//! help forms.

use iocraft::prelude::*;

use crate::tui::theme::theme;

const CURSOR: &str = "▏";

#[derive(Default, Props)]
pub struct InputFieldProps {
    /// Prefix shown before the value ("/" for search, "Email" on forms)
    pub label: String,
    pub value: String,
    pub has_focus: bool,
    /// Render the value as bullets
    pub masked: bool,
    pub placeholder: Option<String>,
}

/// What the box shows for a given value.
pub fn display_text(value: &str, masked: bool, has_focus: bool, placeholder: Option<&str>) -> String {
    let body = if value.is_empty() && !has_focus {
        placeholder.unwrap_or_default().to_string()
    } else if masked {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    if has_focus {
        format!("{}{}", body, CURSOR)
    } else {
        body
    }
}

#[component]
pub fn InputField(props: &InputFieldProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let (border_color, label_color) = if props.has_focus {
        (theme.border_focused, theme.border_focused)
    } else {
        (theme.border, theme.text_dimmed)
    };
    let value_color = if props.value.is_empty() && !props.has_focus {
        theme.text_dimmed
    } else {
        theme.text
    };
    let shown = display_text(
        &props.value,
        props.masked,
        props.has_focus,
        props.placeholder.as_deref(),
    );

    element! {
        View(
            flex_direction: FlexDirection::Row,
            border_style: BorderStyle::Round,
            border_color: border_color,
            padding_left: 1,
            padding_right: 1,
            height: 3,
            flex_shrink: 0.0,
        ) {
            View(margin_right: 1) {
                Text(content: props.label.clone(), color: label_color)
            }
            View(flex_grow: 1.0, overflow: Overflow::Hidden) {
                Text(content: shown, color: value_color)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_only_when_blurred_and_empty() {
        assert_eq!(display_text("", false, false, Some("Search")), "Search");
        assert_eq!(display_text("", false, true, Some("Search")), CURSOR);
    }

    #[test]
    fn test_masking() {
        assert_eq!(display_text("hunter2", true, false, None), "•••••••");
        assert_eq!(display_text("ab", true, true, None), format!("••{}", CURSOR));
    }
}
