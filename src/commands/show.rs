//! `helpdesk show <id>`

use owo_colors::OwoColorize;

use super::{CommandOutput, colored_priority, colored_status, require_session, ticket_json};
use crate::context::AppContext;
use crate::error::{HelpdeskError, Result};
use crate::types::Ticket;

/// Look a ticket up by id. Accepts `T-1004`, `t-1004` or `1004`.
pub fn find_ticket<'a>(tickets: &'a [Ticket], id: &str) -> Option<&'a Ticket> {
    let wanted = id.trim().trim_start_matches('#');
    tickets.iter().find(|t| {
        t.id.eq_ignore_ascii_case(wanted)
            || t.id.strip_prefix("T-").is_some_and(|num| num == wanted)
    })
}

pub fn format_ticket_detail(ticket: &Ticket) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", ticket.id.cyan().bold(), ticket.title.bold()));
    out.push_str(&format!("  {:<10} {}\n", "Status:", colored_status(&ticket.status_kind())));
    out.push_str(&format!("  {:<10} {}\n", "Priority:", colored_priority(ticket.priority)));
    out.push_str(&format!("  {:<10} {}\n", "Company:", ticket.company));
    out.push_str(&format!(
        "  {:<10} {}\n",
        "Assigned:",
        ticket.assigned_to.as_deref().unwrap_or("Unassigned")
    ));
    out.push_str(&format!("  {:<10} {}\n", "Created:", ticket.created_at));
    out.push('\n');
    out.push_str(&ticket.description);
    out
}

pub async fn cmd_show(ctx: &AppContext, id: &str, local_input: bool, output_json: bool) -> Result<()> {
    require_session(ctx, local_input).await?;
    let tickets = ctx.tickets.fetch_tickets().await?;
    let ticket =
        find_ticket(&tickets, id).ok_or_else(|| HelpdeskError::TicketNotFound(id.to_string()))?;

    CommandOutput::new(ticket_json(ticket))
        .with_text(format_ticket_detail(ticket))
        .print(output_json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TicketPriority;

    fn ticket(id: &str) -> Ticket {
        Ticket {
            id: id.to_string(),
            title: "Printer jam".to_string(),
            description: "Tray 2".to_string(),
            status: "new".to_string(),
            priority: TicketPriority::Low,
            created_at: "2024-03-01".to_string(),
            assigned_to: None,
            company: "CITIMAX".to_string(),
        }
    }

    #[test]
    fn test_find_ticket_accepts_bare_number() {
        let tickets = vec![ticket("T-1000"), ticket("T-1001")];
        assert_eq!(find_ticket(&tickets, "1001").map(|t| t.id.as_str()), Some("T-1001"));
        assert_eq!(find_ticket(&tickets, "t-1000").map(|t| t.id.as_str()), Some("T-1000"));
        assert_eq!(find_ticket(&tickets, "#1000").map(|t| t.id.as_str()), Some("T-1000"));
        assert!(find_ticket(&tickets, "2000").is_none());
    }
}
