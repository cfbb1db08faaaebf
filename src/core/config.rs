/*!
 * Demo Configuration
 * Environment-driven settings for the demo binary
 *
 * Environment variables:
 * - SIGNAL_DEMO_USERNAME: username to save (default: test_user)
 * - SIGNAL_DEMO_DELAY_MS: blocking delay inside the receiver (default: 5000)
 * - SIGNAL_DEMO_FAIL: make the receiver fail after its first line (default: false)
 * - SIGNAL_TRACE_JSON: emit logs as JSON (default: false)
 */

use super::errors::{ConfigError, ConfigResult};
use super::limits::{DEFAULT_DEMO_DELAY, DEFAULT_DEMO_USERNAME};
use std::time::Duration;

pub const ENV_USERNAME: &str = "SIGNAL_DEMO_USERNAME";
pub const ENV_DELAY_MS: &str = "SIGNAL_DEMO_DELAY_MS";
pub const ENV_FAIL: &str = "SIGNAL_DEMO_FAIL";
pub const ENV_TRACE_JSON: &str = "SIGNAL_TRACE_JSON";

/// Settings for the save-and-signal demo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub username: String,
    pub delay: Duration,
    pub fail: bool,
    pub trace_json: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_DEMO_USERNAME.to_string(),
            delay: DEFAULT_DEMO_DELAY,
            fail: false,
            trace_json: false,
        }
    }
}

impl DemoConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(username) = lookup(ENV_USERNAME) {
            if username.trim().is_empty() {
                return Err(ConfigError::invalid(
                    ENV_USERNAME,
                    &username,
                    "username must not be empty",
                ));
            }
            config.username = username;
        }

        if let Some(raw) = lookup(ENV_DELAY_MS) {
            let millis = raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::invalid(ENV_DELAY_MS, &raw, format!("expected milliseconds: {}", e))
            })?;
            config.delay = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup(ENV_FAIL) {
            config.fail = parse_flag(ENV_FAIL, &raw)?;
        }

        if let Some(raw) = lookup(ENV_TRACE_JSON) {
            config.trace_json = parse_flag(ENV_TRACE_JSON, &raw)?;
        }

        Ok(config)
    }
}

/// Parse a boolean environment flag
pub fn parse_flag(key: &str, raw: &str) -> ConfigResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(key, raw, "expected a boolean flag")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = DemoConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DemoConfig::default());
        assert_eq!(config.username, "test_user");
        assert_eq!(config.delay, Duration::from_secs(5));
        assert!(!config.fail);
        assert!(!config.trace_json);
    }

    #[test]
    fn test_overrides() {
        let config = DemoConfig::from_lookup(lookup(&[
            (ENV_USERNAME, "alice"),
            (ENV_DELAY_MS, "250"),
            (ENV_FAIL, "true"),
            (ENV_TRACE_JSON, "on"),
        ]))
        .unwrap();

        assert_eq!(config.username, "alice");
        assert_eq!(config.delay, Duration::from_millis(250));
        assert!(config.fail);
        assert!(config.trace_json);
    }

    #[test]
    fn test_invalid_trace_json() {
        let err = DemoConfig::from_lookup(lookup(&[(ENV_TRACE_JSON, "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == ENV_TRACE_JSON));
    }

    #[test]
    fn test_invalid_delay() {
        let err = DemoConfig::from_lookup(lookup(&[(ENV_DELAY_MS, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == ENV_DELAY_MS));
    }

    #[test]
    fn test_empty_username_rejected() {
        assert!(DemoConfig::from_lookup(lookup(&[(ENV_USERNAME, "  ")])).is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("X", "1").unwrap());
        assert!(parse_flag("X", "YES").unwrap());
        assert!(!parse_flag("X", "off").unwrap());
        assert!(!parse_flag("X", "").unwrap());
        assert!(parse_flag("X", "maybe").is_err());
    }
}
