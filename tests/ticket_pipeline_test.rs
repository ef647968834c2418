//! Fetching rows through a ticket source, mapping them and filtering the result.

mod common;

use common::TestContext;
use helpdesk::filter::{DashboardCounts, company_options};
use helpdesk::{FilterCriteria, PriorityFilter, StatusTab, Ticket, TicketPriority, filter_tickets};

async fn fixture_tickets() -> Vec<Ticket> {
    let test = TestContext::new();
    test.ctx.tickets.fetch_tickets().await.unwrap()
}

fn ids(tickets: &[&Ticket]) -> Vec<String> {
    tickets.iter().map(|t| t.id.clone()).collect()
}

#[tokio::test]
async fn test_rows_map_in_order() {
    let tickets = fixture_tickets().await;

    let summary: Vec<String> = tickets
        .iter()
        .map(|t| {
            format!(
                "{} | {} | {} | {} | {}",
                t.id,
                t.status_kind().label(),
                t.priority,
                t.company,
                t.title
            )
        })
        .collect();
    insta::assert_snapshot!(summary.join("\n"), @r"
    T-1000 | New | high | CITIMAX | Printer jam on 3F
    T-1001 | In Progress | medium | PRIMEHOME | VPN drops
    T-1002 | Resolved | low | CITIMAX | Reset password
    T-1003 | Resolved | high | WORKPLUS | No subject
    T-1004 | Unknown | low | CITIMAX | New laptop
    ");
}

#[tokio::test]
async fn test_missing_cells_get_defaults() {
    let tickets = fixture_tickets().await;

    assert_eq!(tickets[1].description, "No description");
    assert_eq!(tickets[1].assigned_to, None);
    assert_eq!(tickets[0].assigned_to.as_deref(), Some("Ana Reyes"));
    // numeric timestamp cells are kept as text
    assert_eq!(tickets[3].created_at, "45123");
    // rows without a timestamp are stamped at fetch time
    assert!(!tickets[4].created_at.is_empty());
}

#[tokio::test]
async fn test_counts_only_track_known_statuses() {
    let tickets = fixture_tickets().await;
    let counts = DashboardCounts::from_tickets(&tickets);

    assert_eq!(counts.total, 5);
    assert_eq!(counts.new, 1);
    assert_eq!(counts.in_progress, 1);
    assert_eq!(counts.resolved, 2);
}

#[tokio::test]
async fn test_filters_are_a_conjunction() {
    let tickets = fixture_tickets().await;

    let criteria = FilterCriteria {
        status: StatusTab::Resolved,
        priority: PriorityFilter::Only(TicketPriority::High),
        ..Default::default()
    };
    assert_eq!(ids(&filter_tickets(&tickets, &criteria)), ["T-1003"]);

    let criteria = FilterCriteria {
        company: Some("CITIMAX".to_string()),
        query: "PASSWORD".to_string(),
        ..Default::default()
    };
    assert_eq!(ids(&filter_tickets(&tickets, &criteria)), ["T-1002"]);

    // the id is searchable too
    let criteria = FilterCriteria {
        query: "t-1004".to_string(),
        ..Default::default()
    };
    assert_eq!(ids(&filter_tickets(&tickets, &criteria)), ["T-1004"]);
}

#[tokio::test]
async fn test_all_tab_keeps_unknown_statuses() {
    let tickets = fixture_tickets().await;

    let all = filter_tickets(&tickets, &FilterCriteria::default());
    assert_eq!(all.len(), 5);

    for tab in [StatusTab::New, StatusTab::InProgress, StatusTab::Resolved] {
        let criteria = FilterCriteria {
            status: tab,
            ..Default::default()
        };
        assert!(!ids(&filter_tickets(&tickets, &criteria)).contains(&"T-1004".to_string()));
    }
}

#[tokio::test]
async fn test_company_options_follow_configured_order() {
    let tickets = fixture_tickets().await;

    assert_eq!(
        company_options(&tickets, &["WORKPLUS", "CITIMAX"]),
        ["WORKPLUS", "CITIMAX", "PRIMEHOME"]
    );
    assert_eq!(
        company_options::<&str>(&tickets, &[]),
        ["CITIMAX", "PRIMEHOME", "WORKPLUS"]
    );
}
