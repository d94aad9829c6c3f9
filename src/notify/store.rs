//! Pending notification queue.

use crate::types::{Notification, NotificationKey};
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Host-side queue of notifications waiting to be shown.
pub trait NotificationStore: Send + Sync {
    /// Remove `notification` from the pending queue for good.
    ///
    /// Calling this for a notification that is no longer pending is a no-op.
    fn mark_processed(&self, notification: &Notification);
}

/// Thread-safe in-memory pending queue.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    pending: Arc<DashMap<NotificationKey, Notification>>,
    processed: Arc<AtomicUsize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `notifications`.
    pub fn with_pending<I: IntoIterator<Item = Notification>>(notifications: I) -> Self {
        let store = Self::new();
        for notification in notifications {
            store.add(notification);
        }
        store
    }

    /// Queue a notification. A notification with the same key replaces the
    /// older one.
    pub fn add(&self, notification: Notification) {
        trace!(
            "Queueing {}/{}",
            notification.object_type, notification.object_id
        );
        self.pending.insert(notification.key(), notification);
    }

    /// Pending notifications in key order.
    pub fn pending(&self) -> Vec<Notification> {
        let mut items: Vec<(NotificationKey, Notification)> = self
            .pending
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        items.sort_by(|a, b| a.0.cmp(&b.0));
        items.into_iter().map(|(_, n)| n).collect()
    }

    pub fn contains(&self, notification: &Notification) -> bool {
        self.pending.contains_key(&notification.key())
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// How many notifications were actually removed by `mark_processed`.
    pub fn processed_count(&self) -> usize {
        self.processed.load(Ordering::SeqCst)
    }
}

impl NotificationStore for InMemoryStore {
    fn mark_processed(&self, notification: &Notification) {
        if self.pending.remove(&notification.key()).is_some() {
            self.processed.fetch_add(1, Ordering::SeqCst);
            debug!(
                "Marked {}/{} processed for {}",
                notification.object_type, notification.object_id, notification.user
            );
        }
    }
}
