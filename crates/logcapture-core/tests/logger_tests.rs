#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{isolated_registry, levels, templates};
use logcapture_core::{args, Arg, Event, Level, LevelSet, Marker};

#[test]
fn test_enabled_calls_are_captured_in_order() {
    let registry = isolated_registry();
    let logger = registry.logger("orders");

    logger.trace("t", ());
    logger.debug("d", ());
    logger.info("i", ());
    logger.warn("w", ());
    logger.error("e", ());

    assert_eq!(
        levels(&logger.logging_events()),
        vec![Level::Trace, Level::Debug, Level::Info, Level::Warn, Level::Error]
    );
    assert_eq!(templates(&logger.logging_events()), vec!["t", "d", "i", "w", "e"]);
}

#[test]
fn test_set_enabled_levels_warn_filters_info() {
    let registry = isolated_registry();
    let logger = registry.logger("filter");
    logger.set_enabled_levels(Level::Warn);

    logger.info("not captured", ());
    assert!(logger.logging_events().is_empty());
    assert!(logger.all_logging_events().is_empty());
    assert!(registry.all_logging_events().is_empty());

    logger.warn("captured", ());
    assert_eq!(logger.logging_events(), vec![Event::warn("captured", ())]);
}

#[test]
fn test_conventional_hierarchy_constants() {
    let registry = isolated_registry();
    let logger = registry.logger("hierarchy");
    logger.set_enabled_levels(LevelSet::INFO_LEVELS);

    assert!(!logger.is_debug_enabled());
    assert!(logger.is_info_enabled());
    assert!(logger.is_warn_enabled());
    assert!(logger.is_error_enabled());

    logger.set_enabled_levels(LevelSet::OFF_LEVELS);
    for level in Level::ALL {
        assert!(!logger.is_enabled(level));
    }
}

#[test]
fn test_marker_and_error_are_recorded() {
    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct Refused;

    let registry = isolated_registry();
    let logger = registry.logger("net");
    let marker = Marker::new("NETWORK");

    logger.log_with_marker(Level::Info, &marker, "dialing {}", ("db",));
    logger.log_with_error(Level::Error, Refused, "dial failed", ());

    let events = logger.logging_events();
    assert_eq!(events[0].marker(), Some(&marker));
    assert_eq!(events[0].formatted_message(), "dialing db");
    let error = events[1].throwable().unwrap();
    assert!(error.downcast_ref::<Refused>().is_some());
    assert_eq!(error.chain(), vec!["connection refused".to_string()]);
}

#[test]
fn test_args_macro_and_vectors() {
    let registry = isolated_registry();
    let logger = registry.logger("args");

    logger.info("{} {} {}", args![1, "two", None::<i32>]);
    logger.info("{}", vec![Arg::from(2.5)]);

    let events = logger.logging_events();
    assert_eq!(events[0].formatted_message(), "1 two null");
    assert_eq!(events[1].arguments(), &[Arg::Float(2.5)][..]);
}

#[test]
fn test_clear_resets_events_and_levels() {
    let registry = isolated_registry();
    let logger = registry.logger("clear");
    logger.set_enabled_levels(Level::Error);
    logger.error("x", ());

    logger.clear();

    assert!(logger.logging_events().is_empty());
    assert_eq!(logger.enabled_levels(), LevelSet::ALL);
    // The global buffer keeps the event until clear_all
    assert_eq!(logger.all_logging_events().len(), 1);
}

#[test]
fn test_clear_all_resets_global_buffer() {
    let registry = isolated_registry();
    let logger = registry.logger("clear_all");
    logger.info("x", ());
    logger.set_enabled_levels(LevelSet::NONE);

    logger.clear_all();

    assert!(logger.all_logging_events().is_empty());
    assert_eq!(logger.enabled_levels(), LevelSet::ALL);
}

#[test]
fn test_set_enabled_levels_for_all_threads_becomes_default() {
    let registry = isolated_registry();
    let logger = registry.logger("defaults");
    logger.set_enabled_levels_for_all_threads(LevelSet::ERROR_LEVELS);

    let seen = std::thread::scope(|s| s.spawn(|| logger.enabled_levels()).join().unwrap());
    assert_eq!(seen, LevelSet::ERROR_LEVELS);

    logger.set_enabled_levels(LevelSet::ALL);
    logger.clear();
    assert_eq!(logger.enabled_levels(), LevelSet::ERROR_LEVELS);

    logger.clear_all();
    assert_eq!(logger.enabled_levels(), LevelSet::ALL);
}

#[test]
fn test_creating_logger_of_captured_event() {
    let registry = isolated_registry();
    let logger = registry.logger("creator");
    logger.warn("w", ());

    let captured = &logger.logging_events()[0];
    assert_eq!(captured.creating_logger().unwrap(), logger);
    assert_eq!(captured.logger_name(), Some("creator"));
}
