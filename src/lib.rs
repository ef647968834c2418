pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod logging;
pub mod notifications;
pub mod remote;
pub mod ticket;
pub mod tui;
pub mod types;

pub use auth::{AuthProvider, Credentials, Session, SessionPhase, SessionStore};
pub use config::Config;
pub use context::AppContext;
pub use error::{HelpdeskError, Result};
pub use filter::{FilterCriteria, PriorityFilter, StatusTab, filter_tickets};
pub use notifications::{Notification, NotificationFeed};
pub use remote::{HelpRelay, TicketSource};
pub use ticket::{SheetRow, TicketStore, map_rows};
pub use types::{Ticket, TicketPriority, TicketStatus};
