/*!
 * Signal Traits
 * Receiver registration and dispatch abstractions
 */

use super::types::{DispatchResult, EventId, Kwargs};
use crate::core::types::ReceiverId;

/// Receiver registration management
pub trait ReceiverRegistry<S>: Send + Sync {
    /// Append a receiver to the event's sequence
    fn register<F>(&self, event: impl Into<EventId>, receiver: F) -> DispatchResult<ReceiverId>
    where
        F: Fn(&EventId, &S, &Kwargs) -> anyhow::Result<()> + Send + Sync + 'static;

    /// Register at most once per (event, uid)
    fn register_with_uid<F>(
        &self,
        event: impl Into<EventId>,
        uid: impl Into<String>,
        receiver: F,
    ) -> DispatchResult<ReceiverId>
    where
        F: Fn(&EventId, &S, &Kwargs) -> anyhow::Result<()> + Send + Sync + 'static;

    /// Disconnect a receiver by ID
    fn unregister(&self, event: &EventId, id: ReceiverId) -> bool;

    /// Disconnect a receiver by uid
    fn unregister_uid(&self, event: &EventId, uid: &str) -> bool;

    /// Check if any receiver is connected
    fn has_receivers(&self, event: &EventId) -> bool;

    /// Number of connected receivers
    fn receiver_count(&self, event: &EventId) -> usize;
}

/// Synchronous event dispatch
pub trait SignalDispatch<S>: Send + Sync {
    /// Invoke every receiver in order on the calling thread
    ///
    /// Returns after the last receiver completes. The first failure aborts
    /// the remaining receivers and is returned to the caller.
    fn raise_event(&self, event: &EventId, subject: &S, kwargs: &Kwargs) -> DispatchResult<usize>;

    /// Invoke every receiver in order, collecting failures instead of aborting
    fn raise_event_robust(
        &self,
        event: &EventId,
        subject: &S,
        kwargs: &Kwargs,
    ) -> Vec<(ReceiverId, DispatchResult<()>)>;
}

/// Combined dispatcher trait
pub trait SignalDispatcher<S>: ReceiverRegistry<S> + SignalDispatch<S> {}

/// Implement SignalDispatcher for types that implement both halves
impl<T, S> SignalDispatcher<S> for T where T: ReceiverRegistry<S> + SignalDispatch<S> {}
