//! Core types shared across the logcapture facilities
//!
//! This crate provides the value types used by the capture engine and by
//! anything that configures it:
//!
//! - **Levels**: `Level`, `PrintLevel` and the copyable `LevelSet`
//! - **Schema constants**: canonical field keys, config keys and env var names

pub mod level;
pub mod schema;

pub use level::{Level, LevelSet, ParseLevelError, PrintLevel};
