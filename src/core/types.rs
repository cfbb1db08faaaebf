/*!
 * Core Types
 * Common types used across the dispatcher
 */

/// Receiver registration ID
pub type ReceiverId = u64;

/// Model record ID
pub type RecordId = u64;
