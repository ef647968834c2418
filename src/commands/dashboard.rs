//! Full-screen dashboard (`helpdesk dashboard`, the default command)

use std::sync::Arc;

use iocraft::prelude::*;

use crate::context::AppContext;
use crate::error::{HelpdeskError, Result};
use crate::tui::App;

/// Launch the dashboard TUI behind the session gate
pub async fn cmd_dashboard(ctx: AppContext) -> Result<()> {
    tracing::info!("starting dashboard");
    element!(App(context: Some(Arc::new(ctx))))
        .fullscreen()
        .await
        .map_err(|e| HelpdeskError::Other(format!("TUI error: {e}")))
}
