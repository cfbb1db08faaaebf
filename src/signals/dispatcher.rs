/*!
 * Signal Dispatcher
 * Synchronous, in-order delivery of events to connected receivers
 */

use super::atomic_stats::AtomicDispatchStats;
use super::callbacks::{CallbackRegistry, ReceiverEntry, ReceiverFn};
use super::traits::{ReceiverRegistry, SignalDispatch};
use super::types::{DispatchError, DispatchResult, DispatchStats, EventId, Kwargs};
use crate::core::types::ReceiverId;
use crate::monitoring::DispatchSpan;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Dispatcher for events about subjects of type `S`
///
/// Receivers run on the thread that raises the event, one after another, in
/// the order they were registered. `raise_event` does not return until the
/// last of them has.
pub struct Dispatcher<S> {
    callbacks: CallbackRegistry<S>,
    stats: Arc<AtomicDispatchStats>,
}

impl<S> Clone for Dispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            callbacks: self.callbacks.clone(),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<S> Dispatcher<S> {
    pub fn new() -> Self {
        Self::with_registry(CallbackRegistry::new())
    }

    /// Create a dispatcher with a custom per-event receiver limit
    pub fn with_limit(limit: usize) -> Self {
        Self::with_registry(CallbackRegistry::with_limit(limit))
    }

    fn with_registry(callbacks: CallbackRegistry<S>) -> Self {
        debug!(limit = callbacks.limit(), "Signal dispatcher initialized");
        Self {
            callbacks,
            stats: Arc::new(AtomicDispatchStats::new()),
        }
    }

    /// Get callback registry
    pub fn callbacks(&self) -> &CallbackRegistry<S> {
        &self.callbacks
    }

    /// Events that currently have receivers
    pub fn events(&self) -> Vec<EventId> {
        self.callbacks.events()
    }

    /// Disconnect every receiver
    pub fn clear(&self) -> usize {
        let removed = self.callbacks.clear();
        if removed > 0 {
            info!(removed, "Cleared all receivers");
        }
        removed
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats.snapshot(self.callbacks.total())
    }

    fn connect(
        &self,
        event: EventId,
        uid: Option<String>,
        func: ReceiverFn<S>,
    ) -> DispatchResult<ReceiverId> {
        let registration = self.callbacks.register(event, uid, func)?;
        Ok(registration.id())
    }

    fn invoke(
        &self,
        event: &EventId,
        entry: &ReceiverEntry<S>,
        subject: &S,
        kwargs: &Kwargs,
    ) -> DispatchResult<()> {
        self.stats.inc_receivers_invoked();
        debug!(event = %event, receiver = entry.id, "invoking receiver");

        (entry.func)(event, subject, kwargs).map_err(|err| {
            self.stats.inc_receiver_failures();
            let reason = format!("{:#}", err);
            warn!(event = %event, receiver = entry.id, error = %reason, "receiver failed");
            DispatchError::ReceiverFailed {
                event: event.clone(),
                receiver: entry.id,
                reason,
            }
        })
    }
}

impl<S> Default for Dispatcher<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ReceiverRegistry<S> for Dispatcher<S> {
    fn register<F>(&self, event: impl Into<EventId>, receiver: F) -> DispatchResult<ReceiverId>
    where
        F: Fn(&EventId, &S, &Kwargs) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.connect(event.into(), None, Arc::new(receiver))
    }

    fn register_with_uid<F>(
        &self,
        event: impl Into<EventId>,
        uid: impl Into<String>,
        receiver: F,
    ) -> DispatchResult<ReceiverId>
    where
        F: Fn(&EventId, &S, &Kwargs) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.connect(event.into(), Some(uid.into()), Arc::new(receiver))
    }

    fn unregister(&self, event: &EventId, id: ReceiverId) -> bool {
        self.callbacks.unregister(event, id)
    }

    fn unregister_uid(&self, event: &EventId, uid: &str) -> bool {
        self.callbacks.unregister_uid(event, uid)
    }

    fn has_receivers(&self, event: &EventId) -> bool {
        self.callbacks.has_receivers(event)
    }

    fn receiver_count(&self, event: &EventId) -> usize {
        self.callbacks.count(event)
    }
}

impl<S> SignalDispatch<S> for Dispatcher<S> {
    fn raise_event(&self, event: &EventId, subject: &S, kwargs: &Kwargs) -> DispatchResult<usize> {
        let span = DispatchSpan::new(event.as_str());
        let _entered = span.enter();

        let receivers = self.callbacks.snapshot(event);
        self.stats.inc_events_raised();
        span.record_receivers(receivers.len());
        debug!(event = %event, receivers = receivers.len(), "raising event");

        for entry in &receivers {
            if let Err(err) = self.invoke(event, entry, subject, kwargs) {
                span.record_error(&err.to_string());
                return Err(err);
            }
        }

        span.record_success();
        Ok(receivers.len())
    }

    fn raise_event_robust(
        &self,
        event: &EventId,
        subject: &S,
        kwargs: &Kwargs,
    ) -> Vec<(ReceiverId, DispatchResult<()>)> {
        let span = DispatchSpan::new(event.as_str());
        let _entered = span.enter();

        let receivers = self.callbacks.snapshot(event);
        self.stats.inc_events_raised();
        span.record_receivers(receivers.len());
        debug!(event = %event, receivers = receivers.len(), "raising event (robust)");

        let responses: Vec<_> = receivers
            .iter()
            .map(|entry| (entry.id, self.invoke(event, entry, subject, kwargs)))
            .collect();

        let failures = responses.iter().filter(|(_, r)| r.is_err()).count();
        if failures > 0 {
            span.record_error(&format!("{} of {} receivers failed", failures, responses.len()));
        } else {
            span.record_success();
        }
        responses
    }
}
