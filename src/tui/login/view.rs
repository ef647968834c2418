//! Login screen component

#![allow(clippy::clone_on_copy)]

use std::sync::Arc;

use iocraft::prelude::*;

use crate::auth::{Credentials, SessionPhase, sign_in};
use crate::context::AppContext;
use crate::error::HelpdeskError;
use crate::remote::relay::HelpRequest;
use crate::tui::components::{Footer, InputField};
use crate::tui::theme::theme;

use super::model::{
    LoginAction, LoginEffect, LoginField, LoginMode, LoginState, Notice, compute_shortcuts,
    key_to_action, reduce,
};

const FORM_WIDTH: u32 = 56;

#[derive(Default, Props)]
pub struct LoginScreenProps {
    pub context: Option<Arc<AppContext>>,
    /// Set to `Authenticated` once sign-in succeeds
    pub on_session: Option<State<SessionPhase>>,
}

#[component]
pub fn LoginScreen<'a>(props: &LoginScreenProps, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();
    let theme = theme();

    let mut login = hooks.use_state(LoginState::default);
    let mut should_exit = hooks.use_state(|| false);

    let sign_in_handler: Handler<Credentials> = hooks.use_async_handler({
        let ctx = props.context.clone();
        let on_session = props.on_session;

        move |credentials: Credentials| {
            let ctx = ctx.clone();
            let mut login = login.clone();
            let on_session = on_session.clone();

            async move {
                let result = match ctx {
                    Some(ctx) => sign_in(&ctx.sessions, ctx.auth.as_ref(), &credentials).await,
                    None => Err(HelpdeskError::Config("no auth provider configured".to_string())),
                };
                match result {
                    Ok(session) => {
                        tracing::info!("signed in as {}", session.email);
                        if let Some(mut phase) = on_session {
                            phase.set(SessionPhase::Authenticated(session));
                        }
                    }
                    Err(e) => {
                        if let Some(mut state) = login.try_write() {
                            reduce(&mut state, LoginAction::SignInFailed(e.to_string()));
                        }
                    }
                }
            }
        }
    });

    let help_handler: Handler<HelpRequest> = hooks.use_async_handler({
        let ctx = props.context.clone();

        move |request: HelpRequest| {
            let ctx = ctx.clone();
            let mut login = login.clone();

            async move {
                let delivered = match ctx {
                    Some(ctx) => match ctx.relay.submit(&request).await {
                        Ok(()) => true,
                        Err(e) => {
                            tracing::warn!("help request failed: {}", e);
                            false
                        }
                    },
                    None => false,
                };
                if let Some(mut state) = login.try_write() {
                    reduce(&mut state, LoginAction::HelpSent { delivered });
                }
            }
        }
    });

    hooks.use_terminal_events({
        let sign_in_handler = sign_in_handler.clone();
        let help_handler = help_handler.clone();

        move |event| match event {
            TerminalEvent::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) if kind != KeyEventKind::Release => {
                let effect = {
                    let mut state = login.write();
                    let Some(action) = key_to_action(code, modifiers, &state) else {
                        return;
                    };
                    reduce(&mut state, action)
                };
                match effect {
                    Some(LoginEffect::SignIn(credentials)) => sign_in_handler(credentials),
                    Some(LoginEffect::SubmitHelp(request)) => help_handler(request),
                    Some(LoginEffect::Exit) => should_exit.set(true),
                    None => {}
                }
            }
            _ => {}
        }
    });

    if should_exit.get() {
        system.exit();
    }

    let state = login.read().clone();
    let shortcuts = compute_shortcuts(&state);
    let (title, subtitle) = match state.mode {
        LoginMode::SignIn => ("Sign In", "Citimax IT Ticketing System"),
        LoginMode::Help => ("Request Help", "Can't sign in? Leave a message for IT."),
    };
    let notice = state.notice.clone().map(|notice| match notice {
        Notice::Error(msg) => (msg, theme.error),
        Notice::Success(msg) => (msg, theme.success),
    });
    let focus = state.focus;

    element! {
        View(
            width,
            height,
            flex_direction: FlexDirection::Column,
            background_color: theme.background,
        ) {
            View(
                flex_grow: 1.0,
                width: 100pct,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
            ) {
                View(
                    width: FORM_WIDTH,
                    flex_direction: FlexDirection::Column,
                    border_style: BorderStyle::Round,
                    border_color: theme.border_focused,
                    padding: 1,
                ) {
                    Text(content: title, color: Color::Cyan, weight: Weight::Bold)
                    View(margin_bottom: 1) {
                        Text(content: subtitle, color: theme.text_dimmed)
                    }

                    #(match state.mode {
                        LoginMode::SignIn => element! {
                            View(flex_direction: FlexDirection::Column) {
                                InputField(
                                    label: "Email   ",
                                    value: state.email.clone(),
                                    has_focus: focus == LoginField::Email,
                                    placeholder: Some("you@company.com".to_string()),
                                )
                                InputField(
                                    label: "Password",
                                    value: state.password.clone(),
                                    has_focus: focus == LoginField::Password,
                                    masked: true,
                                )
                            }
                        }.into_any(),
                        LoginMode::Help => element! {
                            View(flex_direction: FlexDirection::Column) {
                                InputField(
                                    label: "Email  ",
                                    value: state.help_email.clone(),
                                    has_focus: focus == LoginField::HelpEmail,
                                    placeholder: Some("you@company.com".to_string()),
                                )
                                InputField(
                                    label: "Message",
                                    value: state.help_message.clone(),
                                    has_focus: focus == LoginField::HelpMessage,
                                    placeholder: Some("Describe the problem".to_string()),
                                )
                            }
                        }.into_any(),
                    })

                    #(state.submitting.then(|| element! {
                        Text(content: "Submitting...", color: theme.text_dimmed)
                    }))

                    #(notice.map(|(msg, color)| element! {
                        View(margin_top: 1) {
                            Text(content: msg, color: color)
                        }
                    }))
                }
            }
            Footer(shortcuts)
        }
    }
}
