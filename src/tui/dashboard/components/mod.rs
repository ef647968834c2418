//! Dashboard sub-components

pub mod filter_bar;
pub mod header;
pub mod overlays;
pub mod ticket_list;

pub use filter_bar::{FilterBar, FilterBarProps, TabBar, TabBarProps};
pub use header::{DashboardHeader, DashboardHeaderProps, SummaryCards, SummaryCardsProps};
pub use overlays::{DashboardOverlay, DashboardOverlayProps};
pub use ticket_list::{TicketList, TicketListProps};
