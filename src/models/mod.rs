/*!
 * Models
 * Subject records whose lifecycle raises signals
 */

pub mod user;

pub use user::{user_signals, User};

/// Records that announce themselves as a signal sender
pub trait Model {
    /// Sender name passed to receivers under the `sender` keyword
    const NAME: &'static str;
}
