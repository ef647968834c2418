//! Session gate: decides whether the login screen or the dashboard mounts.

#![allow(clippy::clone_on_copy)]

use std::sync::Arc;

use iocraft::prelude::*;

use crate::auth::{SessionPhase, resolve_session};
use crate::context::AppContext;
use crate::tui::dashboard::Dashboard;
use crate::tui::login::LoginScreen;
use crate::tui::theme::theme;

/// What the gate renders for a phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateScreen {
    Placeholder,
    Login,
    Dashboard { user: String },
}

pub fn screen_for(phase: &SessionPhase) -> GateScreen {
    match phase {
        SessionPhase::Resolving => GateScreen::Placeholder,
        SessionPhase::Anonymous => GateScreen::Login,
        SessionPhase::Authenticated(session) => GateScreen::Dashboard {
            user: session.email.clone(),
        },
    }
}

#[derive(Default, Props)]
pub struct AppProps {
    pub context: Option<Arc<AppContext>>,
}

#[component]
pub fn App<'a>(props: &AppProps, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();
    let theme = theme();

    let phase = hooks.use_state(SessionPhase::default);
    let mut should_exit = hooks.use_state(|| false);

    let resolve_handler: Handler<()> = hooks.use_async_handler({
        let ctx = props.context.clone();

        move |()| {
            let ctx = ctx.clone();
            let mut phase = phase.clone();

            async move {
                let resolved = match ctx {
                    Some(ctx) => {
                        resolve_session(&ctx.sessions, ctx.auth.as_ref(), ctx.auth_enabled()).await
                    }
                    None => SessionPhase::Anonymous,
                };
                tracing::debug!("session resolved: authenticated={}", resolved.is_authenticated());
                phase.set(resolved);
            }
        }
    });

    let mut resolve_started = hooks.use_state(|| false);
    if !resolve_started.get() {
        resolve_started.set(true);
        resolve_handler.clone()(());
    }

    // Only the placeholder needs its own way out
    hooks.use_terminal_events(move |event| match event {
        TerminalEvent::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) if kind != KeyEventKind::Release => {
            let quit = code == KeyCode::Char('q')
                || (modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c'));
            if quit && matches!(*phase.read(), SessionPhase::Resolving) {
                should_exit.set(true);
            }
        }
        _ => {}
    });

    if should_exit.get() {
        system.exit();
    }

    let screen = screen_for(&phase.read());
    match screen {
        GateScreen::Placeholder => element! {
            View(
                width,
                height,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                background_color: theme.background,
            ) {
                Text(content: "Loading...", color: theme.text_dimmed)
            }
        }
        .into_any(),
        GateScreen::Login => element! {
            LoginScreen(context: props.context.clone(), on_session: Some(phase))
        }
        .into_any(),
        GateScreen::Dashboard { user } => element! {
            Dashboard(context: props.context.clone(), user, on_session: Some(phase))
        }
        .into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Session;

    #[test]
    fn test_anonymous_gets_login_only() {
        assert_eq!(screen_for(&SessionPhase::Anonymous), GateScreen::Login);
        assert_eq!(screen_for(&SessionPhase::Resolving), GateScreen::Placeholder);
    }

    #[test]
    fn test_authenticated_gets_dashboard() {
        let phase = SessionPhase::Authenticated(Arc::new(Session::guest()));
        assert_eq!(
            screen_for(&phase),
            GateScreen::Dashboard {
                user: "guest".to_string()
            }
        );
    }
}
