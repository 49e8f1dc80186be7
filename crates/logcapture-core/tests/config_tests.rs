#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::PathBuf;

use logcapture_core::schema::{ENV_CONFIG_PATH, ENV_PRINT_LEVEL};
use logcapture_core::{CaptureConfig, CaptureError, ExError, ExErrorKind, Level, PrintLevel};

fn temp_config(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "logcapture-{}-{}.toml",
        std::process::id(),
        name
    ));
    fs::write(&path, content).unwrap();
    path
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn test_file_value_is_used() {
    let path = temp_config("file_value", "print_level = \"info\"\n");
    let config = CaptureConfig::load_from(&path, no_env).unwrap();
    assert_eq!(config.print_level, PrintLevel::At(Level::Info));
    fs::remove_file(path).ok();
}

#[test]
fn test_env_overrides_file() {
    let path = temp_config("env_override", "print_level = \"INFO\"\n");
    let env = |key: &str| (key == ENV_PRINT_LEVEL).then(|| "OFF".to_string());
    let config = CaptureConfig::load_from(&path, env).unwrap();
    assert_eq!(config.print_level, PrintLevel::Off);
    fs::remove_file(path).ok();
}

#[test]
fn test_config_path_from_env() {
    let path = temp_config("config_path", "print_level = \"debug\"\n");
    let path_str = path.display().to_string();
    let env = move |key: &str| (key == ENV_CONFIG_PATH).then(|| path_str.clone());
    let config = CaptureConfig::load_with(env).unwrap();
    assert_eq!(config.print_level, PrintLevel::At(Level::Debug));
    fs::remove_file(path).ok();
}

#[test]
fn test_malformed_file_falls_back_to_off() {
    let path = temp_config("malformed", "print_level = [");
    let config = CaptureConfig::load_from(&path, no_env).unwrap();
    assert_eq!(config.print_level, PrintLevel::Off);
    fs::remove_file(path).ok();
}

#[test]
fn test_unreadable_file_falls_back_to_off() {
    // A directory exists but cannot be read as a file.
    let config = CaptureConfig::load_from(&std::env::temp_dir(), no_env).unwrap();
    assert_eq!(config.print_level, PrintLevel::Off);
}

#[test]
fn test_invalid_level_is_fatal_and_names_both_sources() {
    let path = temp_config("invalid", "print_level = \"verbose\"\n");
    let err = CaptureConfig::load_from(&path, no_env).unwrap_err();
    fs::remove_file(path).ok();

    assert_eq!(
        err,
        CaptureError::InvalidPrintLevel {
            value: "verbose".to_string()
        }
    );
    let message = err.to_string();
    assert!(message.contains("logcapture.toml"));
    assert!(message.contains(ENV_PRINT_LEVEL));

    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::InvalidConfig);
    assert_eq!(ex.code(), "ERR_INVALID_CONFIG");
}

#[test]
fn test_invalid_env_value_is_fatal() {
    let path = std::env::temp_dir().join("logcapture-no-such-file.toml");
    let env = |key: &str| (key == ENV_PRINT_LEVEL).then(|| "LOUD".to_string());
    assert!(matches!(
        CaptureConfig::load_from(&path, env),
        Err(CaptureError::InvalidPrintLevel { .. })
    ));
}
