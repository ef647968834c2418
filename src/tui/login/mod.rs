//! Sign-in and "request help" screen

pub mod model;
pub mod view;

pub use model::{LoginAction, LoginEffect, LoginField, LoginMode, LoginState, Notice};
pub use view::{LoginScreen, LoginScreenProps};
