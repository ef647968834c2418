//! Shared TUI components

pub mod empty_state;
pub mod footer;
pub mod modal;
pub mod search_box;
pub mod select;
pub mod toast;

pub use empty_state::{EmptyState, EmptyStateKind, EmptyStateProps};
pub use footer::{Footer, FooterProps, Shortcut, shortcuts};
pub use modal::{Modal, ModalProps};
pub use search_box::{InputField, InputFieldProps};
pub use select::{Select, SelectProps};
pub use toast::{Toast, ToastLevel, render_toast};
