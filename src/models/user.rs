/*!
 * User Model
 * Minimal user record; saving raises pre_save and post_save
 */

use super::Model;
use crate::core::types::RecordId;
use crate::signals::{DispatchResult, Dispatcher, EventId, Kwargs, SignalDispatch};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use tracing::debug;

/// Process-wide dispatcher for user signals
static USER_SIGNALS: OnceLock<Dispatcher<User>> = OnceLock::new();

/// Next ID handed to a user on its first save
static NEXT_USER_ID: AtomicU64 = AtomicU64::new(1);

/// Get the process-wide user dispatcher, initializing it empty on first use
pub fn user_signals() -> &'static Dispatcher<User> {
    USER_SIGNALS.get_or_init(Dispatcher::new)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: Option<RecordId>,
    username: String,
}

impl Model for User {
    const NAME: &'static str = "User";
}

impl User {
    /// Unsaved user with no ID
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
        }
    }

    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// Save through the process-wide dispatcher
    pub fn save(&mut self) -> DispatchResult<()> {
        self.save_with(user_signals(), None)
    }

    /// Save, raising `pre_save` and `post_save` on `signals`
    ///
    /// Both events are raised synchronously; this returns only after every
    /// receiver of both has finished. A failing `pre_save` receiver leaves the
    /// record untouched. A failing `post_save` receiver still fails the save,
    /// although the ID has been assigned by then.
    pub fn save_with<D>(&mut self, signals: &D, update_fields: Option<&[&str]>) -> DispatchResult<()>
    where
        D: SignalDispatch<User> + ?Sized,
    {
        let created = self.id.is_none();
        let update_fields = match update_fields {
            Some(fields) => Value::from(fields.iter().map(|f| f.to_string()).collect::<Vec<_>>()),
            None => Value::Null,
        };

        let pre = Kwargs::new()
            .with("sender", Self::NAME)
            .with("update_fields", update_fields.clone());
        signals.raise_event(&EventId::PRE_SAVE, self, &pre)?;

        if created {
            self.id = Some(NEXT_USER_ID.fetch_add(1, Ordering::SeqCst));
        }
        debug!(id = ?self.id, username = %self.username, created, "user saved");

        let post = Kwargs::new()
            .with("sender", Self::NAME)
            .with("created", created)
            .with("update_fields", update_fields);
        signals.raise_event(&EventId::POST_SAVE, self, &post)?;

        Ok(())
    }
}
