//! Hooks for test bodies
//!
//! `ClearGuard` clears the calling thread's capture state before and after a
//! test. `LoggerExpectations` asserts that particular calls were captured and
//! clears the logger's thread state when it goes out of scope.

use std::any::type_name;
use std::fmt;

use logcapture_core_types::Level;

use crate::event::{AttachedError, Event};
use crate::logger::Logger;
use crate::registry::Registry;

/// Clears the calling thread's state on creation and again on drop
#[must_use = "the registry is cleared again when the guard drops"]
pub struct ClearGuard<'a> {
    registry: &'a Registry,
}

impl<'a> ClearGuard<'a> {
    pub(crate) fn new(registry: &'a Registry) -> Self {
        registry.clear();
        Self { registry }
    }
}

impl Drop for ClearGuard<'_> {
    fn drop(&mut self) {
        self.registry.clear();
    }
}

struct ErrorCheck {
    type_name: &'static str,
    matches: fn(&AttachedError) -> bool,
}

fn is_error_of<E: std::error::Error + 'static>(error: &AttachedError) -> bool {
    error.downcast_ref::<E>().is_some()
}

struct Expectation {
    level: Level,
    fragment: String,
    error: Option<ErrorCheck>,
}

impl Expectation {
    fn matches(&self, event: &Event) -> bool {
        if event.level() != self.level || !event.formatted_message().contains(&self.fragment) {
            return false;
        }
        match (&self.error, event.throwable()) {
            (None, _) => true,
            (Some(check), Some(error)) => (check.matches)(error),
            (Some(_), None) => false,
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} message containing '{}'", self.level, self.fragment)?;
        if let Some(check) = &self.error {
            write!(f, " with error {}", check.type_name)?;
        }
        Ok(())
    }
}

/// Expected calls on one logger, checked on the calling thread
pub struct LoggerExpectations {
    logger: Logger,
    expected: Vec<Expectation>,
}

impl LoggerExpectations {
    pub fn for_logger(logger: Logger) -> Self {
        Self {
            logger,
            expected: Vec::new(),
        }
    }

    /// Expect a call at `level` whose formatted message contains `fragment`
    pub fn expect(&mut self, level: Level, fragment: impl Into<String>) -> &mut Self {
        self.expected.push(Expectation {
            level,
            fragment: fragment.into(),
            error: None,
        });
        self
    }

    /// Like [`expect`](Self::expect), also requiring an attached error of type `E`
    pub fn expect_with_error<E>(&mut self, level: Level, fragment: impl Into<String>) -> &mut Self
    where
        E: std::error::Error + 'static,
    {
        self.expected.push(Expectation {
            level,
            fragment: fragment.into(),
            error: Some(ErrorCheck {
                type_name: type_name::<E>(),
                matches: is_error_of::<E>,
            }),
        });
        self
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Check every expectation against the calling thread's events
    ///
    /// # Panics
    ///
    /// Panics naming the first expectation that no captured event satisfies.
    pub fn verify(&self) {
        let events = self.logger.logging_events();
        for expectation in &self.expected {
            assert!(
                events.iter().any(|event| expectation.matches(event)),
                "Expected {} on logger '{}' but it was not captured; captured: {:?}",
                expectation,
                self.logger.name(),
                events
            );
        }
    }
}

impl Drop for LoggerExpectations {
    fn drop(&mut self) {
        self.logger.clear();
    }
}
