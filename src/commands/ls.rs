//! `helpdesk ls`: print the filtered ticket list

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{CommandOutput, require_session, ticket_json};
use crate::context::AppContext;
use crate::error::Result;
use crate::filter::{DashboardCounts, FilterCriteria, PriorityFilter, StatusTab, filter_tickets};
use crate::types::{Ticket, initials};

/// Options for the ls command
#[derive(Debug, Clone, Default)]
pub struct LsOptions {
    pub status: StatusTab,
    pub priority: PriorityFilter,
    pub company: Option<String>,
    pub query: Option<String>,
    pub limit: Option<usize>,
    /// Rows came from a local file rather than the sheet
    pub local_input: bool,
    pub output_json: bool,
}

impl LsOptions {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            status: self.status,
            priority: self.priority,
            company: self.company.clone(),
            query: self.query.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct TicketRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
    #[tabled(rename = "Created")]
    created: String,
}

/// Render tickets as a plain (uncolored) table.
pub fn render_ticket_table(tickets: &[&Ticket]) -> String {
    let rows = tickets.iter().map(|t| TicketRow {
        id: t.id.clone(),
        title: t.title.clone(),
        company: t.company.clone(),
        status: t.status_kind().label().to_string(),
        priority: t.priority.to_string(),
        assignee: t
            .assigned_to
            .as_deref()
            .map(initials)
            .unwrap_or_else(|| "-".to_string()),
        created: t.created_date().to_string(),
    });
    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.to_string()
}

pub async fn cmd_ls(ctx: &AppContext, options: LsOptions) -> Result<()> {
    require_session(ctx, options.local_input).await?;
    let tickets = ctx.tickets.fetch_tickets().await?;
    let criteria = options.criteria();
    let mut visible = filter_tickets(&tickets, &criteria);
    let matched = visible.len();
    if let Some(limit) = options.limit {
        visible.truncate(limit);
    }

    let counts = DashboardCounts::from_tickets(&tickets);
    let json = serde_json::json!({
        "total": counts.total,
        "new": counts.new,
        "in_progress": counts.in_progress,
        "resolved": counts.resolved,
        "matched": matched,
        "tickets": visible.iter().map(|t| ticket_json(t)).collect::<Vec<_>>(),
    });

    let text = if visible.is_empty() {
        if tickets.is_empty() {
            "No tickets found.".to_string()
        } else {
            "No tickets found matching your criteria".to_string()
        }
    } else {
        format!(
            "{}\n\n{} of {} ticket(s)",
            render_ticket_table(&visible),
            matched,
            tickets.len()
        )
    };

    CommandOutput::new(json)
        .with_text(text)
        .print(options.output_json)
}
