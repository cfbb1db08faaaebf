/*!
 * Limits and Constants
 *
 * Central location for dispatcher limits, thresholds and demo defaults.
 */

use std::time::Duration;

// =============================================================================
// REGISTRY LIMITS
// =============================================================================

/// Maximum receivers connected to a single event
/// Registration beyond this fails with `RegistryFull`
pub const MAX_RECEIVERS_PER_EVENT: usize = 256;

/// First receiver ID handed out by a fresh registry
pub const FIRST_RECEIVER_ID: u64 = 1;

// =============================================================================
// MONITORING
// =============================================================================

/// Dispatches slower than this are logged at warn level
pub const SLOW_DISPATCH_THRESHOLD: Duration = Duration::from_millis(100);

// =============================================================================
// DEMO DEFAULTS
// =============================================================================

/// Username saved by the demo binary
pub const DEFAULT_DEMO_USERNAME: &str = "test_user";

/// Blocking delay inside the demo receiver (5 seconds)
pub const DEFAULT_DEMO_DELAY: Duration = Duration::from_secs(5);
