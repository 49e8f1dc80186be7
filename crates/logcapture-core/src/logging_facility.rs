//! Logging facility for the capture engine
//!
//! - Single initialisation point via `init(profile)`
//! - Diagnostic macros (`log_op!`, `log_op_warn!`) with canonical fields
//! - `CaptureLayer`, a `tracing` layer that captures events into a registry
//!
//! # Usage
//!
//! ```rust
//! use logcapture_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod bridge;
pub mod init;
pub mod macros;

pub use bridge::{init_capture, CaptureLayer};
pub use init::{init, Profile};
