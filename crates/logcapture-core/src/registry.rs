//! Directory of named loggers
//!
//! A `Registry` hands out one `Logger` per distinct name and mirrors every
//! event its loggers capture into its own per-thread and global buffers, so a
//! test can inspect or reset everything at once. Registries are ordinary
//! values: build one per test for full isolation, or use
//! [`default_registry`](crate::facade::default_registry) at the process boundary.

use std::any::type_name;
use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;
use logcapture_core_types::schema::{
    EVENT_CLEAR, EVENT_CLEAR_ALL, EVENT_LOGGER_CREATED, EVENT_RESET,
};
use logcapture_core_types::PrintLevel;
use parking_lot::RwLock;

use crate::config::CaptureConfig;
use crate::context::{ContextProvider, ThreadContext};
use crate::errors::{CaptureError, Result};
use crate::event::{ContextMap, Event};
use crate::log_op;
use crate::logger::Logger;
use crate::testing::ClearGuard;
use crate::thread_state::ThreadScoped;

/// State shared by a registry and every logger it created
pub(crate) struct CaptureSink {
    thread_events: ThreadScoped<Vec<Event>>,
    all_events: RwLock<Vec<Event>>,
    print_level: RwLock<PrintLevel>,
    context: Arc<dyn ContextProvider>,
}

impl CaptureSink {
    pub(crate) fn new(context: Arc<dyn ContextProvider>, print_level: PrintLevel) -> Self {
        Self {
            thread_events: ThreadScoped::new(Vec::new),
            all_events: RwLock::new(Vec::new()),
            print_level: RwLock::new(print_level),
            context,
        }
    }

    pub(crate) fn context_snapshot(&self) -> ContextMap {
        self.context.context_snapshot()
    }

    pub(crate) fn record(&self, event: Event) {
        let print = self.print_level.read().should_print(event.level());
        if print {
            event.print();
        }
        self.all_events.write().push(event.clone());
        self.thread_events.with(|events| events.push(event));
    }
}

/// Builder for a registry with non-default collaborators
pub struct RegistryBuilder {
    context: Arc<dyn ContextProvider>,
    print_level: PrintLevel,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self {
            context: Arc::new(ThreadContext),
            print_level: PrintLevel::Off,
        }
    }
}

impl RegistryBuilder {
    pub fn context_provider(mut self, provider: impl ContextProvider + 'static) -> Self {
        self.context = Arc::new(provider);
        self
    }

    pub fn print_level(mut self, print_level: PrintLevel) -> Self {
        self.print_level = print_level;
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            loggers: DashMap::new(),
            sink: Arc::new(CaptureSink::new(self.context, self.print_level)),
        }
    }
}

/// Process-lifetime directory of loggers plus cross-logger event views
pub struct Registry {
    loggers: DashMap<String, Logger>,
    sink: Arc<CaptureSink>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Registry reading context from the thread's MDC, never printing
    pub fn new() -> Self {
        RegistryBuilder::default().build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry whose print threshold comes from `config`
    pub fn from_config(config: &CaptureConfig) -> Self {
        RegistryBuilder::default()
            .print_level(config.print_level)
            .build()
    }

    /// Registry configured from `logcapture.toml` and the environment
    ///
    /// # Errors
    ///
    /// Returns `InvalidPrintLevel` if the configured threshold is not a level name.
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_config(&CaptureConfig::load()?))
    }

    /// Get the logger called `name`, creating it on first use
    ///
    /// Concurrent callers with the same name always receive the same instance.
    pub fn logger(&self, name: &str) -> Logger {
        if let Some(existing) = self.loggers.get(name) {
            return existing.clone();
        }
        let mut created = false;
        let logger = self
            .loggers
            .entry(name.to_string())
            .or_insert_with(|| {
                created = true;
                Logger::new(Arc::from(name), Arc::clone(&self.sink))
            })
            .clone();
        if created {
            log_op!("get_logger", EVENT_LOGGER_CREATED, logger = name);
        }
        logger
    }

    /// Like [`logger`](Self::logger) but rejects an empty name
    ///
    /// # Errors
    ///
    /// Returns `EmptyLoggerName` if `name` is empty.
    pub fn try_logger(&self, name: &str) -> Result<Logger> {
        if name.is_empty() {
            return Err(CaptureError::EmptyLoggerName);
        }
        Ok(self.logger(name))
    }

    /// Logger named after the type `T`
    pub fn logger_for<T: ?Sized>(&self) -> Logger {
        self.logger(type_name::<T>())
    }

    /// Snapshot of every registered logger at call time
    pub fn all_loggers(&self) -> BTreeMap<String, Logger> {
        self.loggers
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Events captured by any logger on the calling thread, in capture order
    pub fn logging_events(&self) -> Vec<Event> {
        self.sink.thread_events.get()
    }

    /// Events captured by any logger on any thread
    pub fn all_logging_events(&self) -> Vec<Event> {
        self.sink.all_events.read().clone()
    }

    /// Clear the calling thread's state in every logger and in this registry
    pub fn clear(&self) {
        for logger in self.snapshot_loggers() {
            logger.clear();
        }
        self.sink.thread_events.remove();
        log_op!("clear", EVENT_CLEAR);
    }

    /// Clear every thread's state in every logger and in this registry
    pub fn clear_all(&self) {
        for logger in self.snapshot_loggers() {
            logger.clear_all();
        }
        self.sink.thread_events.reset_all();
        self.sink.all_events.write().clear();
        log_op!("clear_all", EVENT_CLEAR_ALL);
    }

    /// `clear_all` and forget every logger name
    pub fn reset(&self) {
        self.clear_all();
        self.loggers.clear();
        log_op!("reset", EVENT_RESET);
    }

    /// Clear the calling thread now and again when the guard drops
    pub fn clear_guard(&self) -> ClearGuard<'_> {
        ClearGuard::new(self)
    }

    pub fn print_level(&self) -> PrintLevel {
        *self.sink.print_level.read()
    }

    pub fn set_print_level(&self, print_level: PrintLevel) {
        *self.sink.print_level.write() = print_level;
    }

    // Loggers are cloned out first so no map shard stays locked while
    // each logger resets.
    fn snapshot_loggers(&self) -> Vec<Logger> {
        self.loggers.iter().map(|entry| entry.value().clone()).collect()
    }
}
