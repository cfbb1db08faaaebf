/*!
 * Signal Dispatch Library
 * Synchronous signal dispatch exposed as a library
 *
 * Raising an event runs every connected receiver on the caller's thread, in
 * registration order, before control returns to the caller.
 */

pub mod core;
pub mod models;
pub mod monitoring;
pub mod signals;

// Re-exports
pub use crate::core::{ConfigError, ConfigResult, DemoConfig, ReceiverId, RecordId};
pub use models::{user_signals, Model, User};
pub use monitoring::{init_tracing, DispatchSpan};
pub use signals::{
    CallbackRegistry, DispatchError, DispatchResult, DispatchStats, Dispatcher, EventId, Kwargs,
    ReceiverRegistry, SignalDispatch, SignalDispatcher,
};
