//! `helpdesk roster`: staff identity rows

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{CommandOutput, require_session};
use crate::context::AppContext;
use crate::error::Result;
use crate::remote::{RosterEntry, fetch_roster};

#[derive(Tabled)]
struct RosterRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "ID Number")]
    id_number: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn cell(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or("-")
        .to_string()
}

fn entry_json(entry: &RosterEntry) -> serde_json::Value {
    serde_json::json!({
        "name": entry.name,
        "email": entry.email,
        "position": entry.position,
        "company": entry.company_name,
        "id_number": entry.id_number,
        "status": entry.status,
        "timestamp": entry.timestamp,
        "photo_url": entry.photo_url(),
        "signature_url": entry.signature_url(),
    })
}

pub async fn cmd_roster(ctx: &AppContext, output_json: bool) -> Result<()> {
    require_session(ctx, false).await?;
    let entries = fetch_roster(&ctx.client, &ctx.config.sources.roster_url).await?;

    let json = serde_json::json!(entries.iter().map(entry_json).collect::<Vec<_>>());
    let text = if entries.is_empty() {
        "No roster entries found.".to_string()
    } else {
        let rows = entries.iter().map(|e| RosterRow {
            name: cell(&e.name),
            email: cell(&e.email),
            position: cell(&e.position),
            company: cell(&e.company_name),
            id_number: cell(&e.id_number),
            status: cell(&e.status),
        });
        let mut table = Table::new(rows);
        table.with(Style::modern());
        format!("{table}\n\n{} entr{}", entries.len(), if entries.len() == 1 { "y" } else { "ies" })
    };

    CommandOutput::new(json).with_text(text).print(output_json)
}
