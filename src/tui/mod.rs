//! Full-screen terminal interface
//!
//! - `gate` - resolves the stored session and picks the screen
//! - `login` - sign-in and "request help" forms
//! - `dashboard` - ticket list, filters, detail editor and notifications

pub mod components;
pub mod dashboard;
pub mod gate;
pub mod handlers;
pub mod login;
pub mod navigation;
pub mod theme;

pub use dashboard::{Dashboard, DashboardProps};
pub use gate::{App, AppProps};
pub use login::{LoginScreen, LoginScreenProps};
pub use theme::Theme;
