//! Process-wide default registry
//!
//! The engine itself never reaches for a global; everything takes a
//! `Registry` explicitly. This module is the one boundary where a single
//! shared instance exists, for facade bindings such as the tracing bridge.

use std::sync::{Arc, OnceLock};

use crate::errors::{CaptureError, Result};
use crate::logger::Logger;
use crate::registry::Registry;

static DEFAULT_REGISTRY: OnceLock<std::result::Result<Arc<Registry>, CaptureError>> =
    OnceLock::new();

/// The process-wide registry, configured from `logcapture.toml` on first use
///
/// Every call returns the same instance.
///
/// # Errors
///
/// Returns `InvalidPrintLevel` if the configured threshold is invalid. The
/// failure is remembered; later calls return the same error.
pub fn default_registry() -> Result<Arc<Registry>> {
    DEFAULT_REGISTRY
        .get_or_init(|| Registry::from_env().map(Arc::new))
        .clone()
}

/// Logger called `name` from the default registry
///
/// # Errors
///
/// Returns `EmptyLoggerName` for an empty name, or the default registry's
/// configuration error.
pub fn logger(name: &str) -> Result<Logger> {
    default_registry()?.try_logger(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_is_a_singleton() {
        let (Ok(a), Ok(b)) = (default_registry(), default_registry()) else {
            return;
        };
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_logger_rejects_empty_name() {
        if default_registry().is_ok() {
            assert_eq!(logger("").unwrap_err(), CaptureError::EmptyLoggerName);
        }
    }
}
