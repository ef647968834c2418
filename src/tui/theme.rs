//! Theme system for TUI colors and styles
//!
//! Colors match the CLI table output in `commands/`.

use iocraft::prelude::Color;

use crate::tui::components::toast::ToastLevel;
use crate::types::{TicketPriority, TicketStatus};

const GRAY: Color = Color::Rgb {
    r: 120,
    g: 120,
    b: 120,
};

/// Theme configuration for TUI components
#[derive(Debug, Clone)]
pub struct Theme {
    // Status colors
    pub status_new: Color,
    pub status_in_progress: Color,
    pub status_resolved: Color,
    pub status_other: Color,

    // Priority colors
    pub priority_high: Color,
    pub priority_medium: Color,
    pub priority_low: Color,

    // UI colors
    pub border: Color,
    pub border_focused: Color,
    pub background: Color,
    pub text: Color,
    pub text_dimmed: Color,
    pub highlight: Color,
    pub selected_bg: Color,
    pub unread: Color,
    pub error: Color,
    pub success: Color,
    pub id_color: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            status_new: Color::Blue,
            status_in_progress: Color::Yellow,
            status_resolved: Color::Green,
            status_other: GRAY,

            priority_high: Color::Red,
            priority_medium: Color::Yellow,
            priority_low: Color::Green,

            border: GRAY,
            border_focused: Color::Blue,
            background: Color::Reset,
            text: Color::White,
            text_dimmed: GRAY,
            highlight: Color::Blue,
            selected_bg: Color::Rgb {
                r: 40,
                g: 48,
                b: 70,
            },
            unread: Color::Cyan,
            error: Color::Red,
            success: Color::Green,
            id_color: Color::Cyan,
        }
    }
}

impl Theme {
    /// Get the color for a ticket status
    pub fn status_color(&self, status: &TicketStatus) -> Color {
        match status {
            TicketStatus::New => self.status_new,
            TicketStatus::InProgress => self.status_in_progress,
            TicketStatus::Resolved => self.status_resolved,
            TicketStatus::Other(_) => self.status_other,
        }
    }

    /// Get the color for a ticket priority
    pub fn priority_color(&self, priority: TicketPriority) -> Color {
        match priority {
            TicketPriority::High => self.priority_high,
            TicketPriority::Medium => self.priority_medium,
            TicketPriority::Low => self.priority_low,
        }
    }

    pub fn toast_color(&self, level: ToastLevel) -> Color {
        match level {
            ToastLevel::Info => Color::Cyan,
            ToastLevel::Warning => Color::Yellow,
            ToastLevel::Error => self.error,
            ToastLevel::Success => self.success,
        }
    }
}

/// Global theme instance
pub static THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);

/// Get a reference to the global theme
pub fn theme() -> &'static Theme {
    &THEME
}
