/*!
 * Signals Module
 * Synchronous observer-style dispatch of events to registered receivers
 */

mod atomic_stats;
pub mod callbacks;
mod dispatcher;
pub mod traits;
pub mod types;

// Re-export public API
pub use callbacks::{CallbackRegistry, ReceiverEntry, ReceiverFn, Registration};
pub use dispatcher::Dispatcher;
pub use traits::*;
pub use types::{DispatchError, DispatchResult, DispatchStats, EventId, Kwargs};
