//! LogCapture Core - in-memory log capture for tests
//!
//! Log calls are recorded as immutable [`Event`] values instead of being
//! written anywhere, so tests can assert on exactly what was logged. This
//! crate provides:
//! - [`Logger`]: named capture unit with per-thread and global event buffers
//!   and per-thread enabled levels
//! - [`Registry`]: get-or-create directory of loggers plus cross-logger views
//!   and clear/reset operations
//! - [`Event`]: equality over level, context, marker, error, template and
//!   arguments only, so hand-built expected events compare equal to captured ones
//! - A `tracing` layer that captures `tracing` events into a registry
//!
//! # Example
//!
//! ```
//! use logcapture_core::{Event, Level, Registry};
//!
//! let registry = Registry::new();
//! let logger = registry.logger("billing");
//! logger.set_enabled_levels(logcapture_core::LevelSet::WARN_LEVELS);
//!
//! logger.info("ignored", ());
//! logger.warn("low balance on {}", ("acct-1",));
//!
//! assert_eq!(
//!     logger.logging_events(),
//!     vec![Event::warn("low balance on {}", ("acct-1",))]
//! );
//! assert_eq!(logger.logging_events()[0].level(), Level::Warn);
//! ```

pub mod arg;
pub mod config;
pub mod context;
pub mod errors;
pub mod event;
pub mod facade;
pub mod format;
pub mod logger;
pub mod logging_facility;
pub mod marker;
pub mod registry;
pub mod testing;
mod thread_state;

// Re-export commonly used types
pub use arg::{Arg, IntoArgs};
pub use config::CaptureConfig;
pub use context::{mdc, ContextProvider, NoContext, ThreadContext};
pub use errors::{CaptureError, ExError, ExErrorKind, Result};
pub use event::{AttachedError, ContextMap, Event, EventBuilder};
pub use facade::default_registry;
pub use format::format_message;
pub use logcapture_core_types::{schema, Level, LevelSet, PrintLevel};
pub use logger::Logger;
pub use marker::Marker;
pub use registry::{Registry, RegistryBuilder};
pub use testing::{ClearGuard, LoggerExpectations};
