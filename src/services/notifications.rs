use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use uuid::Uuid;

use crate::models::{Notification, Severity};

/// Default lifetime of a notification before it auto-expires.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3);

#[derive(Default)]
struct QueueState {
    /// Insertion order preserved; FIFO for display.
    items: Vec<Notification>,
    /// One expiry task per live notification, aborted on dismiss.
    timers: HashMap<Uuid, AbortHandle>,
}

/// In-memory queue of transient user-facing messages.
///
/// Every push schedules an independent expiry task keyed by the
/// notification id; manual dismissal aborts it. Dismissal and expiry
/// racing on the same id are both safe no-ops on the loser's side, and
/// removing one notification never affects another's timer.
#[derive(Clone)]
pub struct NotificationQueue {
    state: Arc<Mutex<QueueState>>,
    ttl: Duration,
}

impl NotificationQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(QueueState::default())),
            ttl,
        }
    }

    pub fn with_default_ttl() -> Self {
        Self::new(DEFAULT_TTL)
    }

    /// Append a notification and schedule its expiry.
    pub async fn push(&self, message: impl Into<String>, severity: Severity) -> Notification {
        let notification = Notification {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            created_at: chrono::Utc::now(),
        };

        let mut state = self.state.lock().await;
        state.items.push(notification.clone());

        let queue = self.clone();
        let id = notification.id;
        let ttl = self.ttl;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            queue.expire(id).await;
        });
        state.timers.insert(id, handle.abort_handle());

        tracing::debug!(
            "Notification {} pushed ({:?}): {}",
            notification.id,
            severity,
            notification.message
        );

        notification
    }

    /// Remove a notification by id and cancel its expiry timer.
    /// Returns false (not an error) when the id is already gone.
    pub async fn dismiss(&self, id: Uuid) -> bool {
        let mut state = self.state.lock().await;

        if let Some(timer) = state.timers.remove(&id) {
            timer.abort();
        }

        let before = state.items.len();
        state.items.retain(|n| n.id != id);
        let removed = state.items.len() < before;

        if removed {
            tracing::debug!("Notification {} dismissed", id);
        }
        removed
    }

    /// Called by the expiry task once the TTL elapses. No-op when the
    /// notification was dismissed first.
    async fn expire(&self, id: Uuid) {
        let mut state = self.state.lock().await;
        state.timers.remove(&id);

        let before = state.items.len();
        state.items.retain(|n| n.id != id);
        if state.items.len() < before {
            tracing::trace!("Notification {} expired", id);
        }
    }

    /// All live notifications in insertion order.
    pub async fn list(&self) -> Vec<Notification> {
        self.state.lock().await.items.clone()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.items.is_empty()
    }
}
