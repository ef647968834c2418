//! Filtering of the ticket collection.
//!
//! Everything here is pure: the same collection and criteria always give the
//! same visible list, in collection order.

use std::fmt;
use std::str::FromStr;

use crate::error::HelpdeskError;
use crate::types::{Ticket, TicketPriority, TicketStatus};

/// Fixed company ordering used when no order is configured.
pub const DEFAULT_COMPANY_ORDER: &[&str] = &[
    "CITIMAX",
    "DND ORE",
    "DND ETON",
    "DND Rallos",
    "DND Vertis",
    "DND Cebu",
    "DND Tanay",
    "Monte",
    "Compounding",
    "Laboratory",
    "Oriental",
    "Alishan",
    "Citinickel",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusTab {
    #[default]
    All,
    New,
    InProgress,
    Resolved,
}

impl StatusTab {
    pub const ALL: [StatusTab; 4] = [
        StatusTab::All,
        StatusTab::New,
        StatusTab::InProgress,
        StatusTab::Resolved,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatusTab::All => "All Tickets",
            StatusTab::New => "New",
            StatusTab::InProgress => "In Progress",
            StatusTab::Resolved => "Resolved",
        }
    }

    pub fn matches(self, status: &TicketStatus) -> bool {
        match self {
            StatusTab::All => true,
            StatusTab::New => *status == TicketStatus::New,
            StatusTab::InProgress => *status == TicketStatus::InProgress,
            StatusTab::Resolved => *status == TicketStatus::Resolved,
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> StatusTab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> StatusTab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for StatusTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusTab::All => write!(f, "all"),
            StatusTab::New => write!(f, "new"),
            StatusTab::InProgress => write!(f, "in-progress"),
            StatusTab::Resolved => write!(f, "resolved"),
        }
    }
}

impl FromStr for StatusTab {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(StatusTab::All);
        }
        match s.parse::<TicketStatus>()? {
            TicketStatus::New => Ok(StatusTab::New),
            TicketStatus::InProgress => Ok(StatusTab::InProgress),
            TicketStatus::Resolved => Ok(StatusTab::Resolved),
            TicketStatus::Other(_) => Err(HelpdeskError::InvalidStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(TicketPriority),
}

impl PriorityFilter {
    pub fn matches(self, priority: TicketPriority) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(p) => p == priority,
        }
    }

    /// all → high → medium → low → all
    pub fn next(self) -> PriorityFilter {
        match self {
            PriorityFilter::All => PriorityFilter::Only(TicketPriority::High),
            PriorityFilter::Only(TicketPriority::High) => {
                PriorityFilter::Only(TicketPriority::Medium)
            }
            PriorityFilter::Only(TicketPriority::Medium) => {
                PriorityFilter::Only(TicketPriority::Low)
            }
            PriorityFilter::Only(TicketPriority::Low) => PriorityFilter::All,
        }
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityFilter::All => write!(f, "all"),
            PriorityFilter::Only(p) => write!(f, "{}", p),
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(PriorityFilter::All)
        } else {
            Ok(PriorityFilter::Only(s.parse()?))
        }
    }
}

/// Conjunction of the four dashboard filters. `None` company means "all".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub status: StatusTab,
    pub priority: PriorityFilter,
    pub company: Option<String>,
    pub query: String,
}

impl FilterCriteria {
    pub fn is_default(&self) -> bool {
        *self == FilterCriteria::default()
    }

    pub fn clear(&mut self) {
        *self = FilterCriteria::default();
    }

    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.status.matches(&ticket.status_kind())
            && self.priority.matches(ticket.priority)
            && self
                .company
                .as_deref()
                .is_none_or(|company| ticket.company == company)
            && matches_query(ticket, &self.query)
    }
}

/// Case-insensitive substring match over title, description and id.
///
/// The query is used as typed; surrounding whitespace is part of the needle.
pub fn matches_query(ticket: &Ticket, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    [&ticket.title, &ticket.description, &ticket.id]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// The visible subsequence of `tickets` under `criteria`.
pub fn filter_tickets<'a>(tickets: &'a [Ticket], criteria: &FilterCriteria) -> Vec<&'a Ticket> {
    tickets.iter().filter(|t| criteria.matches(t)).collect()
}

/// Unique companies present in `tickets`, ordered by `order`.
///
/// Companies missing from `order` follow all listed ones, in the order they
/// were first seen.
pub fn company_options<S: AsRef<str>>(tickets: &[Ticket], order: &[S]) -> Vec<String> {
    let mut seen: Vec<&str> = Vec::new();
    for ticket in tickets {
        if !seen.contains(&ticket.company.as_str()) {
            seen.push(&ticket.company);
        }
    }

    let rank = |company: &str| {
        order
            .iter()
            .position(|o| o.as_ref() == company)
            .unwrap_or(order.len())
    };
    // stable sort keeps first-seen order among equal ranks
    seen.sort_by_key(|company| rank(company));
    seen.into_iter().map(str::to_string).collect()
}

/// Step through `options` with `None` standing for "all companies".
pub fn cycle_company(current: Option<&str>, options: &[String]) -> Option<String> {
    match current {
        None => options.first().cloned(),
        Some(company) => {
            let pos = options.iter().position(|o| o == company)?;
            options.get(pos + 1).cloned()
        }
    }
}

/// Counters shown above the ticket list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardCounts {
    pub total: usize,
    pub new: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

impl DashboardCounts {
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        let mut counts = DashboardCounts {
            total: tickets.len(),
            ..Default::default()
        };
        for ticket in tickets {
            match ticket.status_kind() {
                TicketStatus::New => counts.new += 1,
                TicketStatus::InProgress => counts.in_progress += 1,
                TicketStatus::Resolved => counts.resolved += 1,
                TicketStatus::Other(_) => {}
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(id: &str, title: &str, status: &str, priority: TicketPriority, company: &str) -> Ticket {
        Ticket {
            id: id.to_string(),
            title: title.to_string(),
            description: "No description".to_string(),
            status: status.to_string(),
            priority,
            created_at: "2024-01-01".to_string(),
            assigned_to: None,
            company: company.to_string(),
        }
    }

    fn sample() -> Vec<Ticket> {
        vec![
            ticket("T-1000", "Printer jam", "new", TicketPriority::High, "CITIMAX"),
            ticket("T-1001", "VPN down", "in progress", TicketPriority::Medium, "Monte"),
            ticket("T-1002", "Password reset", "resolved", TicketPriority::Low, "CITIMAX"),
            ticket("T-1003", "New laptop", "", TicketPriority::Low, "Alishan"),
        ]
    }

    fn ids(tickets: &[&Ticket]) -> Vec<String> {
        tickets.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_default_criteria_shows_everything() {
        let tickets = sample();
        assert_eq!(filter_tickets(&tickets, &FilterCriteria::default()).len(), 4);
    }

    #[test]
    fn test_query_matches_title_case_insensitive() {
        let tickets = sample();
        let criteria = FilterCriteria {
            query: "prin".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_tickets(&tickets, &criteria)), ["T-1000"]);
    }

    #[test]
    fn test_query_whitespace_is_significant() {
        let mut printer = ticket("T-1000", "Printer jam", "new", TicketPriority::High, "CITIMAX");
        printer.description = "Tray2".to_string();
        let mut mouse = ticket("T-1001", "Mouse", "new", TicketPriority::Low, "CITIMAX");
        mouse.description = "Wireless".to_string();
        let tickets = vec![printer, mouse];

        let blank = FilterCriteria {
            query: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_tickets(&tickets, &blank)), ["T-1000"]);

        let trailing = FilterCriteria {
            query: "mouse ".to_string(),
            ..Default::default()
        };
        assert!(filter_tickets(&tickets, &trailing).is_empty());
    }

    #[test]
    fn test_query_matches_id() {
        let tickets = sample();
        let criteria = FilterCriteria {
            query: "t-1002".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_tickets(&tickets, &criteria)), ["T-1002"]);
    }

    #[test]
    fn test_in_progress_tab_matches_spaced_status() {
        let tickets = sample();
        let criteria = FilterCriteria {
            status: StatusTab::InProgress,
            ..Default::default()
        };
        assert_eq!(ids(&filter_tickets(&tickets, &criteria)), ["T-1001"]);
    }

    #[test]
    fn test_combined_filters() {
        let tickets = sample();
        let criteria = FilterCriteria {
            priority: PriorityFilter::Only(TicketPriority::Low),
            company: Some("CITIMAX".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_tickets(&tickets, &criteria)), ["T-1002"]);
    }

    #[test]
    fn test_filter_is_idempotent_subsequence() {
        let tickets = sample();
        let criteria = FilterCriteria {
            priority: PriorityFilter::Only(TicketPriority::Low),
            ..Default::default()
        };
        let once: Vec<Ticket> = filter_tickets(&tickets, &criteria)
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<Ticket> = filter_tickets(&once, &criteria)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(once, twice);

        let mut positions = once
            .iter()
            .map(|t| tickets.iter().position(|orig| orig == t).unwrap());
        let mut last = positions.next().unwrap();
        for pos in positions {
            assert!(pos > last);
            last = pos;
        }
    }

    #[test]
    fn test_company_options_unique_and_ordered() {
        let tickets = vec![
            ticket("T-1000", "a", "new", TicketPriority::Low, "Monte"),
            ticket("T-1001", "b", "new", TicketPriority::Low, "Zeta Corp"),
            ticket("T-1002", "c", "new", TicketPriority::Low, "CITIMAX"),
            ticket("T-1003", "d", "new", TicketPriority::Low, "Monte"),
            ticket("T-1004", "e", "new", TicketPriority::Low, "Acme"),
        ];
        let options = company_options(&tickets, DEFAULT_COMPANY_ORDER);
        assert_eq!(options, ["CITIMAX", "Monte", "Zeta Corp", "Acme"]);
    }

    #[test]
    fn test_company_options_three_companies() {
        let tickets = vec![
            ticket("T-1000", "a", "new", TicketPriority::Low, "Alishan"),
            ticket("T-1001", "b", "new", TicketPriority::Low, "CITIMAX"),
            ticket("T-1002", "c", "new", TicketPriority::Low, "Alishan"),
            ticket("T-1003", "d", "new", TicketPriority::Low, "DND ORE"),
        ];
        let options = company_options(&tickets, DEFAULT_COMPANY_ORDER);
        assert_eq!(options, ["CITIMAX", "DND ORE", "Alishan"]);
    }

    #[test]
    fn test_cycle_company_wraps_to_all() {
        let options = vec!["CITIMAX".to_string(), "Monte".to_string()];
        assert_eq!(cycle_company(None, &options).as_deref(), Some("CITIMAX"));
        assert_eq!(cycle_company(Some("CITIMAX"), &options).as_deref(), Some("Monte"));
        assert_eq!(cycle_company(Some("Monte"), &options), None);
        assert_eq!(cycle_company(Some("Gone"), &options), None);
    }

    #[test]
    fn test_priority_filter_cycle() {
        let mut filter = PriorityFilter::All;
        let mut seen = Vec::new();
        for _ in 0..4 {
            filter = filter.next();
            seen.push(filter.to_string());
        }
        assert_eq!(seen, ["high", "medium", "low", "all"]);
    }

    #[test]
    fn test_status_tab_parse() {
        assert_eq!("in progress".parse::<StatusTab>().unwrap(), StatusTab::InProgress);
        assert_eq!("ALL".parse::<StatusTab>().unwrap(), StatusTab::All);
        assert!("blocked".parse::<StatusTab>().is_err());
        assert_eq!(StatusTab::Resolved.next(), StatusTab::All);
        assert_eq!(StatusTab::All.prev(), StatusTab::Resolved);
    }

    #[test]
    fn test_counts() {
        let counts = DashboardCounts::from_tickets(&sample());
        assert_eq!(
            counts,
            DashboardCounts {
                total: 4,
                new: 1,
                in_progress: 1,
                resolved: 1,
            }
        );
    }
}
