//! Ticket dashboard screen
//!
//! - `model` - pure state, reducer and key mapping
//! - `detail` - the local-only ticket editor
//! - `view` - the iocraft component tree

pub mod components;
pub mod detail;
pub mod model;
pub mod view;

pub use detail::{DetailAction, DetailEditor, DetailField, DetailOutcome, TicketDraft};
pub use model::{DashboardAction, DashboardState, Effect, Overlay, apply_load, key_to_action, reduce};
pub use view::{Dashboard, DashboardProps};
