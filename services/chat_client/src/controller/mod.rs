//! services/chat_client/src/controller/mod.rs
//!
//! The chat/upload controller. It turns each user action into exactly one
//! backend request and reports the outcome as `ViewEvent`s.
//!
//! All shared state sits behind one lock that is never held across a backend
//! call, so overlapping actions only ever see each other's finished writes.

pub mod chat_task;
pub mod events;
pub mod state;
pub mod upload_task;

use chat_relay_core::domain::{RequestId, Status};
use chat_relay_core::ports::ChatBackend;
use events::ViewEvent;
use state::{ClientSnapshot, ClientState};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc::UnboundedSender, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Default lifetime of a status line.
pub const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(5);

pub struct ChatController {
    backend: Arc<dyn ChatBackend>,
    state: Arc<Mutex<ClientState>>,
    events: UnboundedSender<ViewEvent>,
    status_clear_after: Duration,
    next_request: AtomicU64,
}

impl ChatController {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        events: UnboundedSender<ViewEvent>,
        status_clear_after: Duration,
    ) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(ClientState::new())),
            events,
            status_clear_after,
            next_request: AtomicU64::new(0),
        }
    }

    pub async fn snapshot(&self) -> ClientSnapshot {
        self.state.lock().await.snapshot()
    }

    /// Shows `status` and arms its auto-clear timer.
    pub async fn show_status(&self, status: Status) {
        let mut state = self.state.lock().await;
        self.show_status_locked(&mut state, status);
    }

    fn next_request_id(&self) -> RequestId {
        RequestId(self.next_request.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn emit(&self, event: ViewEvent) {
        if self.events.send(event).is_err() {
            debug!("View event dropped: no renderer attached.");
        }
    }

    /// Replaces the visible status while the caller holds the state lock.
    ///
    /// The previous timer is cancelled and the board's generation bumped, so an
    /// older timer that already fired cannot clear this line either.
    fn show_status_locked(&self, state: &mut ClientState, status: Status) {
        state.status_timer.cancel();
        let token = CancellationToken::new();
        state.status_timer = token.clone();

        let generation = state.status.show(status.clone());
        self.emit(ViewEvent::StatusShown { status });

        let shared = self.state.clone();
        let events = self.events.clone();
        let delay = self.status_clear_after;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let mut state = shared.lock().await;
                    if state.status.clear_if_current(generation) {
                        if events.send(ViewEvent::StatusCleared).is_err() {
                            warn!("Status cleared but no renderer is attached.");
                        }
                    }
                }
            }
        });
    }
}
