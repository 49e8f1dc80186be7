//! Print-threshold configuration
//!
//! Read once when a registry is built from config. The threshold comes from
//! `print_level` in `logcapture.toml` (path overridable with
//! `LOGCAPTURE_CONFIG`), and `LOGCAPTURE_PRINT_LEVEL` overrides the file.
//! A missing, unreadable or malformed file never stops capture; only a level
//! name that cannot be parsed is fatal.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use logcapture_core_types::schema::{
    CONFIG_FILE_NAME, ENV_CONFIG_PATH, ENV_PRINT_LEVEL, EVENT_CONFIG_FALLBACK,
};
use logcapture_core_types::PrintLevel;
use serde::Deserialize;

use crate::errors::{CaptureError, Result};
use crate::{log_op, log_op_warn};

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    print_level: Option<String>,
}

/// Resolved capture configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureConfig {
    pub print_level: PrintLevel,
}

impl CaptureConfig {
    /// Load from the process environment and the working directory
    ///
    /// # Errors
    ///
    /// Returns `InvalidPrintLevel` if the configured value is not a level name.
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load using `env` to look up environment variables
    ///
    /// # Errors
    ///
    /// Returns `InvalidPrintLevel` if the configured value is not a level name.
    pub fn load_with(env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let path = env(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        Self::load_from(&path, env)
    }

    /// Load the file at `path`, then apply the environment override
    ///
    /// # Errors
    ///
    /// Returns `InvalidPrintLevel` if the configured value is not a level name.
    pub fn load_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let from_file = match read_file(path) {
            Ok(raw) => raw.print_level,
            Err(err) => {
                log_op_warn!("load_config", EVENT_CONFIG_FALLBACK, reason = %err);
                None
            }
        };

        let value = env(ENV_PRINT_LEVEL).or(from_file);
        let print_level = match value {
            Some(value) => parse_print_level(&value)?,
            None => PrintLevel::default(),
        };
        Ok(Self { print_level })
    }
}

/// Parse TOML config text
///
/// # Errors
///
/// Returns `ConfigParse` for malformed TOML and `InvalidPrintLevel` for a bad
/// level name.
pub fn parse_config_str(content: &str) -> Result<CaptureConfig> {
    let raw: RawConfig = toml::from_str(content).map_err(|e| CaptureError::ConfigParse {
        path: "<inline>".to_string(),
        reason: e.to_string(),
    })?;
    let print_level = match raw.print_level {
        Some(value) => parse_print_level(&value)?,
        None => PrintLevel::default(),
    };
    Ok(CaptureConfig { print_level })
}

fn read_file(path: &Path) -> Result<RawConfig> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log_op!("load_config", EVENT_CONFIG_FALLBACK, path = %path.display());
            return Ok(RawConfig::default());
        }
        Err(e) => {
            return Err(CaptureError::ConfigRead {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
        }
    };

    toml::from_str(&content).map_err(|e| CaptureError::ConfigParse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn parse_print_level(value: &str) -> Result<PrintLevel> {
    value
        .parse()
        .map_err(|_| CaptureError::InvalidPrintLevel {
            value: value.to_string(),
        })
}
