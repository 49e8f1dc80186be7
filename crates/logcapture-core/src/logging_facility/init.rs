//! Logging initialisation
//!
//! One entry point sets up the process-wide `tracing` subscriber.

use std::sync::Once;

use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

use super::bridge::init_capture;

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Capture every `tracing` event into the default registry
    Test,
}

static INIT_ONCE: Once = Once::new();

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialise the logging facility
///
/// Only the first call has any effect. `RUST_LOG` overrides the profile's
/// default filter for the fmt profiles.
///
/// # Example
///
/// ```
/// use logcapture_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter("logcapture_core=debug"))
                .finish()
                .try_init()
                .ok();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter("logcapture_core=info"))
                .finish()
                .try_init()
                .ok();
        }
        Profile::Test => {
            // A bad print threshold leaves the process without a subscriber;
            // the error resurfaces from default_registry().
            init_capture().ok();
        }
    });
}
