//! Canonical schema constants for structured logging and configuration
//!
//! These constants keep diagnostics and config lookups consistent across crates.

// Field that carries the formatted message of a tracing event
pub const FIELD_MESSAGE: &str = "message";

// Canonical event names
pub const EVENT_LOGGER_CREATED: &str = "logger_created";
pub const EVENT_CLEAR: &str = "clear";
pub const EVENT_CLEAR_ALL: &str = "clear_all";
pub const EVENT_RESET: &str = "reset";
pub const EVENT_CONFIG_FALLBACK: &str = "config_fallback";

// Configuration sources
pub const CONFIG_FILE_NAME: &str = "logcapture.toml";
pub const CONFIG_KEY_PRINT_LEVEL: &str = "print_level";
pub const ENV_CONFIG_PATH: &str = "LOGCAPTURE_CONFIG";
pub const ENV_PRINT_LEVEL: &str = "LOGCAPTURE_PRINT_LEVEL";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_distinct() {
        let names = [
            EVENT_LOGGER_CREATED,
            EVENT_CLEAR,
            EVENT_CLEAR_ALL,
            EVENT_RESET,
            EVENT_CONFIG_FALLBACK,
        ];
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_env_vars_share_prefix() {
        assert!(ENV_CONFIG_PATH.starts_with("LOGCAPTURE_"));
        assert!(ENV_PRINT_LEVEL.starts_with("LOGCAPTURE_"));
    }
}
