//! In-memory ticket collection and its fetch lifecycle.
//!
//! The store never performs I/O itself. Callers ask for a [`LoadTicket`]
//! with [`TicketStore::begin_load`], run the fetch, and hand the outcome
//! back through [`TicketStore::finish_load`]. Results carrying a ticket that
//! is no longer current are dropped, which covers both cancelled fetches and
//! fetches that finish after the owning view has gone away.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

use crate::error::{HelpdeskError, Result};
use crate::types::Ticket;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    /// The last fetch failed. The previous collection is still available.
    Failed(String),
}

/// Proof that a load was started. Only the most recent ticket is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Default)]
pub struct TicketStore {
    tickets: Vec<Ticket>,
    state: LoadState,
    generation: u64,
    in_flight: Option<u64>,
    loaded_once: bool,
}

impl TicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn find(&self, id: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    /// Start a load. Returns `None` while another load is in flight.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.in_flight.is_some() {
            return None;
        }
        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.state = LoadState::Loading;
        Some(LoadTicket(self.generation))
    }

    /// Apply a fetch outcome. Returns false when the ticket was stale.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<Ticket>>) -> bool {
        if self.in_flight != Some(ticket.0) {
            tracing::debug!("discarding stale ticket load #{}", ticket.0);
            return false;
        }
        self.in_flight = None;
        match result {
            Ok(tickets) => {
                tracing::info!("loaded {} tickets", tickets.len());
                self.tickets = tickets;
                self.loaded_once = true;
                self.state = LoadState::Ready;
            }
            Err(HelpdeskError::Cancelled) => {
                self.state = self.settled_state();
            }
            Err(e) => {
                tracing::warn!("ticket load failed: {}", e);
                self.state = LoadState::Failed(format!("Failed to load tickets: {}", e.user_message()));
            }
        }
        true
    }

    /// Forget the in-flight load so its result will be discarded.
    pub fn cancel_load(&mut self) {
        if self.in_flight.take().is_some() {
            self.state = self.settled_state();
        }
    }

    fn settled_state(&self) -> LoadState {
        if self.loaded_once {
            LoadState::Ready
        } else {
            LoadState::Idle
        }
    }
}

struct CancelInner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Cooperative cancellation shared between a view and its fetch tasks.
#[derive(Clone)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

impl std::fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CancelInner {
                cancelled: AtomicBool::new(false),
                notify: Notify::new(),
            }),
        }
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }

    /// Race `fut` against cancellation.
    pub async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_cancelled() {
            return Err(HelpdeskError::Cancelled);
        }
        tokio::select! {
            _ = self.cancelled() => Err(HelpdeskError::Cancelled),
            result = fut => result,
        }
    }
}

/// Owns a [`CancelToken`] and cancels it when dropped.
///
/// The dashboard keeps one of these for as long as it is mounted.
#[derive(Debug, Default)]
pub struct FetchScope {
    token: CancelToken,
}

impl FetchScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }
}

impl Drop for FetchScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TicketPriority;

    fn ticket(id: &str) -> Ticket {
        Ticket {
            id: id.to_string(),
            title: "t".to_string(),
            description: "d".to_string(),
            status: "new".to_string(),
            priority: TicketPriority::Low,
            created_at: "2024-01-01".to_string(),
            assigned_to: None,
            company: "CITIMAX".to_string(),
        }
    }

    #[test]
    fn test_single_load_in_flight() {
        let mut store = TicketStore::new();
        let first = store.begin_load();
        assert!(first.is_some());
        assert!(store.begin_load().is_none());
        assert_eq!(store.state(), &LoadState::Loading);
    }

    #[test]
    fn test_success_replaces_collection() {
        let mut store = TicketStore::new();
        let load = store.begin_load().unwrap();
        assert!(store.finish_load(load, Ok(vec![ticket("T-1000"), ticket("T-1001")])));
        assert_eq!(store.tickets().len(), 2);

        let load = store.begin_load().unwrap();
        store.finish_load(load, Ok(vec![ticket("T-1000")]));
        assert_eq!(store.tickets().len(), 1);
        assert_eq!(store.state(), &LoadState::Ready);
    }

    #[test]
    fn test_failure_keeps_previous_collection() {
        let mut store = TicketStore::new();
        let load = store.begin_load().unwrap();
        store.finish_load(load, Ok(vec![ticket("T-1000")]));

        let load = store.begin_load().unwrap();
        store.finish_load(load, Err(HelpdeskError::Status(500)));
        assert_eq!(store.tickets().len(), 1);
        assert!(store.error().unwrap().starts_with("Failed to load tickets"));
        assert!(!store.is_loading());
    }

    #[test]
    fn test_stale_result_discarded() {
        let mut store = TicketStore::new();
        let load = store.begin_load().unwrap();
        store.cancel_load();
        assert_eq!(store.state(), &LoadState::Idle);
        assert!(!store.finish_load(load, Ok(vec![ticket("T-1000")])));
        assert!(store.tickets().is_empty());
    }

    #[test]
    fn test_find_by_id() {
        let mut store = TicketStore::new();
        let load = store.begin_load().unwrap();
        store.finish_load(load, Ok(vec![ticket("T-1000"), ticket("T-1001")]));
        assert!(store.find("T-1001").is_some());
        assert!(store.find("T-9999").is_none());
    }

    #[tokio::test]
    async fn test_dropped_scope_cancels_fetch() {
        let scope = FetchScope::new();
        let token = scope.token();
        drop(scope);
        let result: Result<()> = token
            .run(async {
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                Ok(())
            })
            .await;
        assert!(matches!(result, Err(HelpdeskError::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancel_wakes_pending_fetch() {
        let token = CancelToken::new();
        let waiter = token.clone();
        let task = tokio::spawn(async move {
            waiter
                .run(async {
                    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                    Ok(1)
                })
                .await
        });
        tokio::task::yield_now().await;
        token.cancel();
        let result = task.await.unwrap();
        assert!(matches!(result, Err(HelpdeskError::Cancelled)));
    }
}
