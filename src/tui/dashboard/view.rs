//! Main dashboard component
//!
//! Owns a single [`DashboardState`], feeds key presses through the pure model
//! and carries out the effects it returns.

#![allow(clippy::clone_on_copy)]

use std::sync::Arc;

use clipboard_rs::Clipboard;
use iocraft::prelude::*;

use crate::auth::SessionPhase;
use crate::context::AppContext;
use crate::error::HelpdeskError;
use crate::ticket::{FetchScope, LoadTicket};
use crate::tui::components::{Footer, Toast, render_toast};
use crate::tui::theme::theme;

use super::components::{DashboardHeader, DashboardOverlay, FilterBar, SummaryCards, TabBar, TicketList};
use super::model::{DashboardState, Effect, apply_load, compute_view_model, key_to_action, reduce};

/// Rows taken by everything except the ticket rows
const CHROME_HEIGHT: u16 = 18;

#[derive(Default, Props)]
pub struct DashboardProps {
    pub context: Option<Arc<AppContext>>,
    /// Email shown in the header
    pub user: String,
    /// Set to `Anonymous` on logout
    pub on_session: Option<State<SessionPhase>>,
}

#[component]
pub fn Dashboard<'a>(props: &DashboardProps, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();
    let theme = theme();
    let list_height = height.saturating_sub(CHROME_HEIGHT).max(1) as usize;

    let company_order = props
        .context
        .as_ref()
        .map(|ctx| ctx.config.company_order.clone())
        .unwrap_or_default();
    let user = props.user.clone();
    let mut dashboard = hooks.use_state(move || DashboardState::new(user, company_order));

    // Cancels in-flight fetches when the dashboard unmounts
    let fetch_scope = hooks.use_state(FetchScope::new);
    let mut should_exit = hooks.use_state(|| false);

    let fetch_handler: Handler<(LoadTicket, usize)> = hooks.use_async_handler({
        let ctx = props.context.clone();
        let token = fetch_scope.read().token();

        move |(ticket, list_height): (LoadTicket, usize)| {
            let ctx = ctx.clone();
            let token = token.clone();
            let mut dashboard = dashboard.clone();

            async move {
                let result = match ctx {
                    Some(ctx) => token.run(ctx.tickets.fetch_tickets()).await,
                    None => Err(HelpdeskError::Config("no ticket source configured".to_string())),
                };
                if let Some(mut state) = dashboard.try_write() {
                    apply_load(&mut state, ticket, result, list_height);
                }
            }
        }
    });

    // Initial load on mount
    let mut fetch_started = hooks.use_state(|| false);
    if !fetch_started.get() {
        fetch_started.set(true);
        let ticket = dashboard.write().store.begin_load();
        if let Some(ticket) = ticket {
            fetch_handler.clone()((ticket, list_height));
        }
    }

    hooks.use_terminal_events({
        let ctx = props.context.clone();
        let on_session = props.on_session;
        let fetch_handler = fetch_handler.clone();

        move |event| match event {
            TerminalEvent::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) if kind != KeyEventKind::Release => {
                let effect = {
                    let mut state = dashboard.write();
                    let Some(action) = key_to_action(code, modifiers, &state) else {
                        return;
                    };
                    reduce(&mut state, action, list_height)
                };

                match effect {
                    Some(Effect::Fetch(ticket)) => fetch_handler((ticket, list_height)),
                    Some(Effect::CopyToClipboard(id)) => {
                        if clipboard_rs::ClipboardContext::new()
                            .and_then(|cb| cb.set_text(id))
                            .is_err()
                        {
                            dashboard.write().toast =
                                Some(Toast::warning("Clipboard is not available"));
                        }
                    }
                    Some(Effect::SaveDraft(draft)) => {
                        tracing::info!(
                            ticket = %draft.id,
                            status = %draft.status,
                            assignee = draft.assignee.as_deref().unwrap_or("-"),
                            "ticket edits kept locally"
                        );
                    }
                    Some(Effect::Logout) => {
                        if let Some(ctx) = &ctx
                            && let Err(e) = ctx.sessions.clear()
                        {
                            tracing::warn!("failed to clear session: {}", e);
                        }
                        tracing::info!("signed out");
                        match on_session {
                            Some(mut phase) => phase.set(SessionPhase::Anonymous),
                            None => should_exit.set(true),
                        }
                    }
                    Some(Effect::Exit) => should_exit.set(true),
                    None => {}
                }
            }
            _ => {}
        }
    });

    if should_exit.get() {
        system.exit();
    }

    let vm = compute_view_model(&dashboard.read(), list_height);
    let toast: Option<Toast> = vm.toast.clone();

    element! {
        View(
            width,
            height,
            flex_direction: FlexDirection::Column,
            background_color: theme.background,
        ) {
            DashboardHeader(header: Some(vm.header))
            SummaryCards(counts: vm.counts)
            TabBar(tabs: vm.tabs)
            FilterBar(filters: Some(vm.filters))
            TicketList(list: Some(vm.list))
            #(render_toast(&toast))
            Footer(shortcuts: vm.shortcuts)
            DashboardOverlay(overlay: Some(vm.overlay))
        }
    }
}
