/*!
 * Receiver Callback Registry
 * Ordered per-event receiver table
 */

use super::types::{DispatchError, DispatchResult, EventId, Kwargs};
use crate::core::limits::{FIRST_RECEIVER_ID, MAX_RECEIVERS_PER_EVENT};
use crate::core::types::ReceiverId;
use ahash::RandomState;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Receiver callback function type
pub type ReceiverFn<S> = Arc<dyn Fn(&EventId, &S, &Kwargs) -> anyhow::Result<()> + Send + Sync>;

/// A connected receiver
pub struct ReceiverEntry<S> {
    pub id: ReceiverId,
    pub uid: Option<String>,
    pub func: ReceiverFn<S>,
}

impl<S> Clone for ReceiverEntry<S> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            uid: self.uid.clone(),
            func: Arc::clone(&self.func),
        }
    }
}

/// Outcome of a registration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// Receiver appended to the event's sequence
    Added(ReceiverId),
    /// A receiver with the same uid was already connected
    Existing(ReceiverId),
}

impl Registration {
    pub fn id(&self) -> ReceiverId {
        match self {
            Registration::Added(id) | Registration::Existing(id) => *id,
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self, Registration::Added(_))
    }
}

/// Registration table: event -> receivers in insertion order
///
/// # Performance
/// - Cache-line aligned to prevent false sharing of atomic ID counter
#[repr(C, align(64))]
pub struct CallbackRegistry<S> {
    table: Arc<DashMap<EventId, Vec<ReceiverEntry<S>>, RandomState>>,
    next_id: Arc<AtomicU64>,
    limit: usize,
}

impl<S> Clone for CallbackRegistry<S> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            next_id: Arc::clone(&self.next_id),
            limit: self.limit,
        }
    }
}

impl<S> CallbackRegistry<S> {
    pub fn new() -> Self {
        Self::with_limit(MAX_RECEIVERS_PER_EVENT)
    }

    /// Create a registry with a custom per-event receiver limit
    pub fn with_limit(limit: usize) -> Self {
        Self {
            table: Arc::new(DashMap::with_hasher(RandomState::new())),
            next_id: Arc::new(AtomicU64::new(FIRST_RECEIVER_ID)),
            limit,
        }
    }

    /// Append a receiver to the event's sequence
    ///
    /// With a `uid`, at most one receiver per (event, uid) is kept; a repeat
    /// registration returns the existing ID and leaves the sequence untouched.
    pub fn register(
        &self,
        event: EventId,
        uid: Option<String>,
        func: ReceiverFn<S>,
    ) -> DispatchResult<Registration> {
        let mut entries = self.table.entry(event.clone()).or_default();

        if let Some(uid) = uid.as_deref() {
            if let Some(existing) = entries.iter().find(|e| e.uid.as_deref() == Some(uid)) {
                debug!(event = %event, uid, receiver = existing.id, "receiver already connected");
                return Ok(Registration::Existing(existing.id));
            }
        }

        if entries.len() >= self.limit {
            return Err(DispatchError::RegistryFull {
                event,
                limit: self.limit,
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        entries.push(ReceiverEntry { id, uid, func });
        info!(event = %event, receiver = id, position = entries.len(), "registered receiver");
        Ok(Registration::Added(id))
    }

    /// Remove a receiver by ID
    pub fn unregister(&self, event: &EventId, id: ReceiverId) -> bool {
        self.remove_where(event, |entry| entry.id == id)
    }

    /// Remove a receiver by uid
    pub fn unregister_uid(&self, event: &EventId, uid: &str) -> bool {
        self.remove_where(event, |entry| entry.uid.as_deref() == Some(uid))
    }

    fn remove_where<P>(&self, event: &EventId, predicate: P) -> bool
    where
        P: Fn(&ReceiverEntry<S>) -> bool,
    {
        let removed = match self.table.get_mut(event) {
            Some(mut entries) => {
                let before = entries.len();
                entries.retain(|entry| !predicate(entry));
                before - entries.len()
            }
            None => 0,
        };

        // Shard guard is released above; remove_if takes its own lock
        self.table.remove_if(event, |_, entries| entries.is_empty());

        if removed > 0 {
            info!(event = %event, removed, "unregistered receiver");
        }
        removed > 0
    }

    /// Copy of the event's receivers, in registration order
    ///
    /// The table lock is released before the copy is returned, so receivers
    /// invoked from it may register or unregister freely.
    pub fn snapshot(&self, event: &EventId) -> Vec<ReceiverEntry<S>> {
        self.table
            .get(event)
            .map(|entries| entries.value().clone())
            .unwrap_or_default()
    }

    /// Check if any receiver is connected to the event
    pub fn has_receivers(&self, event: &EventId) -> bool {
        self.table
            .get(event)
            .map_or(false, |entries| !entries.is_empty())
    }

    /// Receivers connected to the event
    pub fn count(&self, event: &EventId) -> usize {
        self.table.get(event).map_or(0, |entries| entries.len())
    }

    /// Receivers connected across all events
    pub fn total(&self) -> usize {
        self.table.iter().map(|entries| entries.len()).sum()
    }

    /// Events with at least one receiver
    pub fn events(&self) -> Vec<EventId> {
        let mut events: Vec<EventId> = self
            .table
            .iter()
            .filter(|entries| !entries.is_empty())
            .map(|entries| entries.key().clone())
            .collect();
        events.sort();
        events
    }

    /// Drop every receiver, returning how many were removed
    pub fn clear(&self) -> usize {
        let total = self.total();
        self.table.clear();
        total
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl<S> Default for CallbackRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}
