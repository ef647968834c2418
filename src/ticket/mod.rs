pub mod row;
pub mod store;

pub use row::{SheetRow, map_priority, map_rows, map_rows_at};
pub use store::{CancelToken, FetchScope, LoadState, LoadTicket, TicketStore};
