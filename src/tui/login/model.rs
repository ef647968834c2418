//! Login screen model
//!
//! Two forms share the screen: sign-in and "request help". Like the
//! dashboard, all behavior lives in [`reduce`] and [`key_to_action`]; the
//! component only runs the returned [`LoginEffect`].

use iocraft::prelude::{KeyCode, KeyModifiers};

use crate::auth::Credentials;
use crate::error::{HelpdeskError, INVALID_CREDENTIALS};
use crate::remote::relay::{HelpRequest, SUBMIT_FAILED, SUBMITTED};
use crate::tui::components::footer::{Shortcut, shortcuts};
use crate::tui::handlers::{TextKey, apply_text_key, classify_text_key};

// ============================================================================
// State Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    SignIn,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
    HelpEmail,
    HelpMessage,
}

impl LoginField {
    fn fields(mode: LoginMode) -> [LoginField; 2] {
        match mode {
            LoginMode::SignIn => [LoginField::Email, LoginField::Password],
            LoginMode::Help => [LoginField::HelpEmail, LoginField::HelpMessage],
        }
    }

    fn is_last(self) -> bool {
        matches!(self, LoginField::Password | LoginField::HelpMessage)
    }
}

/// Outcome line under a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginState {
    pub mode: LoginMode,
    pub focus: LoginField,
    pub email: String,
    pub password: String,
    pub help_email: String,
    pub help_message: String,
    /// A sign-in or help submission is in flight
    pub submitting: bool,
    pub notice: Option<Notice>,
}

impl LoginState {
    fn field_mut(&mut self, field: LoginField) -> &mut String {
        match field {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
            LoginField::HelpEmail => &mut self.help_email,
            LoginField::HelpMessage => &mut self.help_message,
        }
    }
}

// ============================================================================
// Actions and Effects
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAction {
    Edit(TextKey),
    NextField,
    PrevField,
    /// Enter: next field, or submit from the last one
    Submit,
    ToggleMode,
    SignInFailed(String),
    HelpSent { delivered: bool },
    Quit,
}

#[derive(Debug)]
pub enum LoginEffect {
    SignIn(Credentials),
    SubmitHelp(HelpRequest),
    Exit,
}

// ============================================================================
// State Reduction
// ============================================================================

pub fn reduce(state: &mut LoginState, action: LoginAction) -> Option<LoginEffect> {
    match action {
        LoginAction::Edit(key) => {
            let focus = state.focus;
            if apply_text_key(state.field_mut(focus), key) && matches!(state.notice, Some(Notice::Error(_))) {
                state.notice = None;
            }
            None
        }
        LoginAction::NextField | LoginAction::PrevField => {
            let [first, second] = LoginField::fields(state.mode);
            state.focus = if state.focus == first { second } else { first };
            None
        }
        LoginAction::Submit if !state.focus.is_last() => {
            state.focus = LoginField::fields(state.mode)[1];
            None
        }
        LoginAction::Submit if state.submitting => None,
        LoginAction::Submit => submit(state),
        LoginAction::ToggleMode => {
            state.mode = match state.mode {
                LoginMode::SignIn => LoginMode::Help,
                LoginMode::Help => LoginMode::SignIn,
            };
            state.focus = LoginField::fields(state.mode)[0];
            state.notice = None;
            None
        }
        LoginAction::SignInFailed(detail) => {
            tracing::debug!("sign-in rejected: {}", detail);
            state.submitting = false;
            state.password.clear();
            state.notice = Some(Notice::Error(INVALID_CREDENTIALS.to_string()));
            None
        }
        LoginAction::HelpSent { delivered } => {
            state.submitting = false;
            if delivered {
                state.help_email.clear();
                state.help_message.clear();
                state.focus = LoginField::HelpEmail;
                state.notice = Some(Notice::Success(SUBMITTED.to_string()));
            } else {
                state.notice = Some(Notice::Error(SUBMIT_FAILED.to_string()));
            }
            None
        }
        LoginAction::Quit => Some(LoginEffect::Exit),
    }
}

fn submit(state: &mut LoginState) -> Option<LoginEffect> {
    let effect = match state.mode {
        LoginMode::SignIn => Credentials::new(state.email.as_str(), state.password.as_str())
            .map(LoginEffect::SignIn),
        LoginMode::Help => HelpRequest::new(&state.help_email, &state.help_message)
            .map(LoginEffect::SubmitHelp),
    };
    match effect {
        Ok(effect) => {
            state.submitting = true;
            state.notice = None;
            Some(effect)
        }
        Err(HelpdeskError::Validation(msg)) => {
            state.notice = Some(Notice::Error(msg));
            None
        }
        Err(e) => {
            state.notice = Some(Notice::Error(e.user_message()));
            None
        }
    }
}

// ============================================================================
// View Model and Key Mapping
// ============================================================================

pub fn compute_shortcuts(state: &LoginState) -> Vec<Shortcut> {
    match state.mode {
        LoginMode::SignIn => shortcuts(&[
            ("Tab", "Next Field"),
            ("Enter", "Sign In"),
            ("C-r", "Request Help"),
            ("C-q", "Quit"),
        ]),
        LoginMode::Help => shortcuts(&[
            ("Tab", "Next Field"),
            ("Enter", "Submit"),
            ("Esc", "Back to Sign In"),
            ("C-q", "Quit"),
        ]),
    }
}

pub fn key_to_action(code: KeyCode, modifiers: KeyModifiers, state: &LoginState) -> Option<LoginAction> {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('r') {
        return Some(LoginAction::ToggleMode);
    }
    match classify_text_key(code, modifiers) {
        TextKey::Quit => Some(LoginAction::Quit),
        TextKey::NextField => Some(LoginAction::NextField),
        TextKey::PrevField => Some(LoginAction::PrevField),
        TextKey::Commit => Some(LoginAction::Submit),
        TextKey::Cancel if state.mode == LoginMode::Help => Some(LoginAction::ToggleMode),
        TextKey::Cancel | TextKey::Ignore => None,
        _ if state.submitting => None,
        key => Some(LoginAction::Edit(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(state: &mut LoginState, text: &str) {
        for c in text.chars() {
            reduce(state, LoginAction::Edit(TextKey::Insert(c)));
        }
    }

    #[test]
    fn test_enter_on_email_moves_to_password() {
        let mut state = LoginState::default();
        type_text(&mut state, "ana@citimax.test");
        assert!(reduce(&mut state, LoginAction::Submit).is_none());
        assert_eq!(state.focus, LoginField::Password);
    }

    #[test]
    fn test_sign_in_requires_both_fields() {
        let mut state = LoginState::default();
        state.focus = LoginField::Password;
        assert!(reduce(&mut state, LoginAction::Submit).is_none());
        assert_eq!(
            state.notice,
            Some(Notice::Error("Please enter your email and password.".to_string()))
        );
        assert!(!state.submitting);
    }

    #[test]
    fn test_sign_in_effect_blocks_resubmit() {
        let mut state = LoginState::default();
        type_text(&mut state, "ana@citimax.test");
        reduce(&mut state, LoginAction::NextField);
        type_text(&mut state, "hunter2");

        let effect = reduce(&mut state, LoginAction::Submit);
        let Some(LoginEffect::SignIn(credentials)) = effect else {
            panic!("expected a sign-in effect");
        };
        assert_eq!(credentials.email(), "ana@citimax.test");
        assert!(state.submitting);
        assert!(reduce(&mut state, LoginAction::Submit).is_none());
    }

    #[test]
    fn test_rejection_shows_generic_message() {
        let mut state = LoginState {
            submitting: true,
            password: "wrong".to_string(),
            ..Default::default()
        };
        reduce(&mut state, LoginAction::SignInFailed("INVALID_PASSWORD".to_string()));
        assert_eq!(state.notice, Some(Notice::Error(INVALID_CREDENTIALS.to_string())));
        assert!(state.password.is_empty());
        assert!(!state.submitting);
    }

    #[test]
    fn test_help_validation_order() {
        let mut state = LoginState::default();
        reduce(&mut state, LoginAction::ToggleMode);
        assert_eq!(state.focus, LoginField::HelpEmail);
        state.focus = LoginField::HelpMessage;

        reduce(&mut state, LoginAction::Submit);
        assert_eq!(state.notice, Some(Notice::Error("Please enter your email.".to_string())));

        state.help_email = "ana@citimax.test".to_string();
        reduce(&mut state, LoginAction::Submit);
        assert_eq!(state.notice, Some(Notice::Error("Please enter a message.".to_string())));
    }

    #[test]
    fn test_help_success_clears_fields() {
        let mut state = LoginState {
            mode: LoginMode::Help,
            focus: LoginField::HelpMessage,
            help_email: "ana@citimax.test".to_string(),
            help_message: "Printer on fire".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            reduce(&mut state, LoginAction::Submit),
            Some(LoginEffect::SubmitHelp(_))
        ));
        reduce(&mut state, LoginAction::HelpSent { delivered: true });
        assert!(state.help_email.is_empty());
        assert!(state.help_message.is_empty());
        assert_eq!(state.notice, Some(Notice::Success(SUBMITTED.to_string())));
    }

    #[test]
    fn test_help_network_failure_keeps_fields() {
        let mut state = LoginState {
            mode: LoginMode::Help,
            help_email: "ana@citimax.test".to_string(),
            help_message: "Printer on fire".to_string(),
            submitting: true,
            ..Default::default()
        };
        reduce(&mut state, LoginAction::HelpSent { delivered: false });
        assert_eq!(state.help_message, "Printer on fire");
        assert_eq!(state.notice, Some(Notice::Error(SUBMIT_FAILED.to_string())));
    }

    #[test]
    fn test_key_mapping() {
        let mut state = LoginState::default();
        assert_eq!(
            key_to_action(KeyCode::Char('q'), KeyModifiers::NONE, &state),
            Some(LoginAction::Edit(TextKey::Insert('q')))
        );
        assert_eq!(
            key_to_action(KeyCode::Char('r'), KeyModifiers::CONTROL, &state),
            Some(LoginAction::ToggleMode)
        );
        assert_eq!(key_to_action(KeyCode::Esc, KeyModifiers::NONE, &state), None);

        state.mode = LoginMode::Help;
        assert_eq!(
            key_to_action(KeyCode::Esc, KeyModifiers::NONE, &state),
            Some(LoginAction::ToggleMode)
        );

        state.submitting = true;
        assert_eq!(key_to_action(KeyCode::Char('a'), KeyModifiers::NONE, &state), None);
    }
}
