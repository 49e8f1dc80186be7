//! A named capture unit
//!
//! Each logger keeps a per-thread buffer (what `logging_events` and `clear`
//! see) and a global buffer across all threads (what `all_logging_events` and
//! `clear_all` see). That split lets tests that stay on the thread-local view
//! run in parallel.
//!
//! All levels start enabled. Level sets are never hierarchical: enabling
//! `INFO` does not imply `WARN` or `ERROR`. Pass one of the
//! `LevelSet::*_LEVELS` constants for conventional behaviour.

use std::fmt;
use std::sync::Arc;

use logcapture_core_types::{Level, LevelSet};
use parking_lot::RwLock;

use crate::arg::IntoArgs;
use crate::event::{AttachedError, Event};
use crate::marker::Marker;
use crate::registry::CaptureSink;
use crate::thread_state::ThreadScoped;

pub(crate) struct LoggerShared {
    name: Arc<str>,
    sink: Arc<CaptureSink>,
    thread_events: ThreadScoped<Vec<Event>>,
    all_events: RwLock<Vec<Event>>,
    enabled_levels: ThreadScoped<LevelSet>,
}

impl LoggerShared {
    pub(crate) fn name_arc(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }
}

/// Handle to a named capture unit; clones share the same logger
#[derive(Clone)]
pub struct Logger {
    shared: Arc<LoggerShared>,
}

impl Logger {
    pub(crate) fn new(name: Arc<str>, sink: Arc<CaptureSink>) -> Self {
        Self {
            shared: Arc::new(LoggerShared {
                name,
                sink,
                thread_events: ThreadScoped::new(Vec::new),
                all_events: RwLock::new(Vec::new()),
                enabled_levels: ThreadScoped::new(|| LevelSet::ALL),
            }),
        }
    }

    pub(crate) fn from_shared(shared: Arc<LoggerShared>) -> Self {
        Self { shared }
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// True if both handles refer to the same logger instance
    pub fn ptr_eq(a: &Logger, b: &Logger) -> bool {
        Arc::ptr_eq(&a.shared, &b.shared)
    }

    // ===== Log calls =====

    pub fn log(&self, level: Level, template: &str, args: impl IntoArgs) {
        self.log_full(level, None, None, template, args);
    }

    pub fn log_with_marker(&self, level: Level, marker: &Marker, template: &str, args: impl IntoArgs) {
        self.log_full(level, Some(marker), None, template, args);
    }

    pub fn log_with_error(
        &self,
        level: Level,
        error: impl Into<AttachedError>,
        template: &str,
        args: impl IntoArgs,
    ) {
        self.log_full(level, None, Some(error.into()), template, args);
    }

    /// Capture a call if `level` is enabled on this thread
    ///
    /// A disabled level builds nothing and touches no buffer.
    pub fn log_full(
        &self,
        level: Level,
        marker: Option<&Marker>,
        error: Option<AttachedError>,
        template: &str,
        args: impl IntoArgs,
    ) {
        if !self.is_enabled(level) {
            return;
        }

        let shared = &self.shared;
        let event = Event::captured(
            shared,
            level,
            shared.sink.context_snapshot(),
            marker.cloned(),
            error,
            template.to_string(),
            args.into_args(),
        );

        shared.all_events.write().push(event.clone());
        shared.thread_events.with(|events| events.push(event.clone()));
        shared.sink.record(event);
    }

    pub fn trace(&self, template: &str, args: impl IntoArgs) {
        self.log(Level::Trace, template, args);
    }

    pub fn debug(&self, template: &str, args: impl IntoArgs) {
        self.log(Level::Debug, template, args);
    }

    pub fn info(&self, template: &str, args: impl IntoArgs) {
        self.log(Level::Info, template, args);
    }

    pub fn warn(&self, template: &str, args: impl IntoArgs) {
        self.log(Level::Warn, template, args);
    }

    pub fn error(&self, template: &str, args: impl IntoArgs) {
        self.log(Level::Error, template, args);
    }

    // ===== Enablement =====

    /// Whether `level` is enabled for this logger on the calling thread
    pub fn is_enabled(&self, level: Level) -> bool {
        self.shared.enabled_levels.get().contains(level)
    }

    /// Same answer as `is_enabled`: markers never narrow or widen enablement
    pub fn is_enabled_for_marker(&self, level: Level, _marker: &Marker) -> bool {
        self.is_enabled(level)
    }

    pub fn is_trace_enabled(&self) -> bool {
        self.is_enabled(Level::Trace)
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.is_enabled(Level::Debug)
    }

    pub fn is_info_enabled(&self) -> bool {
        self.is_enabled(Level::Info)
    }

    pub fn is_warn_enabled(&self) -> bool {
        self.is_enabled(Level::Warn)
    }

    pub fn is_error_enabled(&self) -> bool {
        self.is_enabled(Level::Error)
    }

    /// Levels enabled for this logger on the calling thread
    pub fn enabled_levels(&self) -> LevelSet {
        self.shared.enabled_levels.get()
    }

    /// Replace the enabled levels for the calling thread only
    pub fn set_enabled_levels(&self, levels: impl Into<LevelSet>) {
        self.shared.enabled_levels.set(levels.into());
    }

    /// Replace the enabled levels for every thread, current and future
    pub fn set_enabled_levels_for_all_threads(&self, levels: impl Into<LevelSet>) {
        let levels = levels.into();
        self.shared.enabled_levels.reset_all_with(move || levels);
    }

    // ===== Inspection and reset =====

    /// Events captured by this logger on the calling thread, in call order
    pub fn logging_events(&self) -> Vec<Event> {
        self.shared.thread_events.get()
    }

    /// Events captured by this logger on any thread
    pub fn all_logging_events(&self) -> Vec<Event> {
        self.shared.all_events.read().clone()
    }

    /// Forget the calling thread's events and restore its default levels
    pub fn clear(&self) {
        self.shared.thread_events.remove();
        self.shared.enabled_levels.remove();
    }

    /// Forget every event and restore all-levels-enabled on every thread
    pub fn clear_all(&self) {
        self.shared.all_events.write().clear();
        self.shared.thread_events.reset_all();
        self.shared.enabled_levels.reset_all_with(|| LevelSet::ALL);
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        Logger::ptr_eq(self, other)
    }
}

impl Eq for Logger {}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.shared.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::NoContext;
    use logcapture_core_types::PrintLevel;
    use std::thread;

    fn logger(name: &str) -> Logger {
        let sink = Arc::new(CaptureSink::new(Arc::new(NoContext), PrintLevel::Off));
        Logger::new(Arc::from(name), sink)
    }

    #[test]
    fn test_captures_in_call_order() {
        let logger = logger("order");
        logger.info("first", ());
        logger.warn("second {}", (2,));

        assert_eq!(
            logger.logging_events(),
            vec![Event::info("first", ()), Event::warn("second {}", (2,))]
        );
    }

    #[test]
    fn test_disabled_level_is_not_captured() {
        let logger = logger("filtered");
        logger.set_enabled_levels(Level::Warn);

        logger.info("dropped", ());
        logger.warn("kept", ());

        assert_eq!(logger.logging_events(), vec![Event::warn("kept", ())]);
        assert_eq!(logger.all_logging_events().len(), 1);
    }

    #[test]
    fn test_marker_does_not_affect_enablement() {
        let logger = logger("marker");
        let marker = Marker::new("AUDIT");
        logger.set_enabled_levels(LevelSet::NONE);
        assert!(!logger.is_enabled_for_marker(Level::Error, &marker));

        logger.set_enabled_levels(Level::Error);
        assert!(logger.is_enabled_for_marker(Level::Error, &marker));
        assert!(!logger.is_enabled_for_marker(Level::Warn, &marker));
    }

    #[test]
    fn test_levels_are_not_hierarchical() {
        let logger = logger("flat");
        logger.set_enabled_levels(Level::Info);
        assert!(logger.is_info_enabled());
        assert!(!logger.is_warn_enabled());
        assert!(!logger.is_error_enabled());
        assert!(!logger.is_debug_enabled());
        assert!(!logger.is_trace_enabled());
    }

    #[test]
    fn test_clear_restores_all_levels() {
        let logger = logger("clear");
        logger.set_enabled_levels(LevelSet::NONE);
        logger.clear();
        assert_eq!(logger.enabled_levels(), LevelSet::ALL);
    }

    #[test]
    fn test_set_enabled_levels_is_thread_local() {
        let logger = logger("local");
        logger.set_enabled_levels(Level::Error);

        let other = thread::scope(|s| s.spawn(|| logger.enabled_levels()).join().unwrap());
        assert_eq!(other, LevelSet::ALL);
    }

    #[test]
    fn test_captured_event_knows_its_logger() {
        let logger = logger("creator");
        logger.info("m", ());
        let event = &logger.logging_events()[0];
        assert_eq!(event.creating_logger().unwrap(), logger);
        assert_eq!(event.logger_name(), Some("creator"));
    }

    #[test]
    fn test_events_do_not_keep_logger_alive() {
        let logger = logger("dropped");
        logger.info("m", ());
        let event = logger.all_logging_events().remove(0);
        drop(logger);

        assert!(matches!(
            event.creating_logger(),
            Err(crate::errors::CaptureError::CreatingLoggerDropped { .. })
        ));
    }

    #[test]
    fn test_debug_shows_name() {
        assert!(format!("{:?}", logger("dbg")).contains("dbg"));
    }
}
