/*!
 * Signal Types
 * Event identifiers, keyword payloads and result types
 */

use crate::core::types::ReceiverId;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Dispatch operation result
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Dispatch errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum DispatchError {
    #[error("Receiver {receiver} failed while handling '{event}': {reason}")]
    #[diagnostic(
        code(dispatch::receiver_failed),
        help("The triggering operation was aborted and later receivers were not invoked.")
    )]
    ReceiverFailed {
        event: EventId,
        receiver: ReceiverId,
        reason: String,
    },

    #[error("Registry full: event '{event}' already has {limit} receivers")]
    #[diagnostic(
        code(dispatch::registry_full),
        help("Unregister receivers that are no longer needed.")
    )]
    RegistryFull { event: EventId, limit: usize },
}

impl DispatchError {
    /// Receiver that caused the failure, if any
    pub fn receiver(&self) -> Option<ReceiverId> {
        match self {
            DispatchError::ReceiverFailed { receiver, .. } => Some(*receiver),
            DispatchError::RegistryFull { .. } => None,
        }
    }
}

/// Opaque key naming a class of occurrence
///
/// Built-in identifiers are borrowed from static strings; identifiers built at
/// runtime own their name. Both compare and hash by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Cow<'static, str>);

impl EventId {
    /// Raised before a model record is written
    pub const PRE_SAVE: EventId = EventId::from_static("pre_save");
    /// Raised after a model record is written
    pub const POST_SAVE: EventId = EventId::from_static("post_save");

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for EventId {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for EventId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Auxiliary keyword data handed to every receiver
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kwargs(Map<String, Value>);

impl Kwargs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Read a boolean keyword, treating anything else as false
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// Dispatcher statistics snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchStats {
    pub events_raised: u64,
    pub receivers_invoked: u64,
    pub receiver_failures: u64,
    pub receivers_registered: usize,
}
