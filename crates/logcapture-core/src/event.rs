//! Immutable record of a single log call
//!
//! Equality and hashing cover only level, context, marker, error, template
//! and arguments. Timestamp, thread name and creating logger are incidental:
//! leaving them out lets a test build an "expected" event by hand and compare
//! it against one captured through a real logger.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io;
use std::sync::{Arc, Weak};

use chrono::{DateTime, SecondsFormat, Utc};
use logcapture_core_types::Level;

use crate::arg::{Arg, IntoArgs};
use crate::errors::{CaptureError, Result};
use crate::format::format_message;
use crate::logger::{Logger, LoggerShared};
use crate::marker::Marker;

/// Snapshot of the ambient key/value context at the time of a log call
pub type ContextMap = BTreeMap<String, String>;

/// An error attached to a log call
///
/// Compared by identity: two `AttachedError`s are equal when they share the
/// same allocation. Clone the handle to reuse an error in an expected event.
#[derive(Clone)]
pub struct AttachedError(Arc<dyn std::error::Error + Send + Sync + 'static>);

impl AttachedError {
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Arc::new(error))
    }

    /// Wrap an already shared error without changing its identity
    pub fn from_arc(error: Arc<dyn std::error::Error + Send + Sync + 'static>) -> Self {
        Self(error)
    }

    pub fn get(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.0
    }

    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }

    /// Rendered error followed by each `source()` in the chain
    pub fn chain(&self) -> Vec<String> {
        let mut out = vec![self.0.to_string()];
        let mut current = self.0.source();
        while let Some(source) = current {
            out.push(source.to_string());
            current = source.source();
        }
        out
    }
}

impl<E> From<E> for AttachedError
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl PartialEq for AttachedError {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for AttachedError {}

impl Hash for AttachedError {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as *const ()).hash(state);
    }
}

impl fmt::Debug for AttachedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[derive(Clone)]
struct EventData {
    level: Level,
    context: ContextMap,
    marker: Option<Marker>,
    error: Option<AttachedError>,
    template: String,
    arguments: Vec<Arg>,
    timestamp: DateTime<Utc>,
    thread_name: String,
    creator: Option<Creator>,
}

#[derive(Clone)]
struct Creator {
    name: Arc<str>,
    logger: Weak<LoggerShared>,
}

impl EventData {
    // Canonical constructor: every public and internal path ends here.
    fn new(
        level: Level,
        context: ContextMap,
        marker: Option<Marker>,
        error: Option<AttachedError>,
        template: String,
        arguments: Vec<Arg>,
        creator: Option<Creator>,
    ) -> Self {
        Self {
            level,
            context,
            marker,
            error,
            template,
            arguments,
            timestamp: Utc::now(),
            thread_name: current_thread_name(),
            creator,
        }
    }
}

pub(crate) fn current_thread_name() -> String {
    let thread = std::thread::current();
    match thread.name() {
        Some(name) => name.to_string(),
        None => format!("{:?}", thread.id()),
    }
}

/// One immutable captured (or expected) log call
#[derive(Clone)]
pub struct Event {
    inner: Arc<EventData>,
}

impl Event {
    /// Expected event with no context, marker or error
    pub fn new(level: Level, template: impl Into<String>, args: impl IntoArgs) -> Self {
        Self::from_data(EventData::new(
            level,
            ContextMap::new(),
            None,
            None,
            template.into(),
            args.into_args(),
            None,
        ))
    }

    pub fn trace(template: impl Into<String>, args: impl IntoArgs) -> Self {
        Self::new(Level::Trace, template, args)
    }

    pub fn debug(template: impl Into<String>, args: impl IntoArgs) -> Self {
        Self::new(Level::Debug, template, args)
    }

    pub fn info(template: impl Into<String>, args: impl IntoArgs) -> Self {
        Self::new(Level::Info, template, args)
    }

    pub fn warn(template: impl Into<String>, args: impl IntoArgs) -> Self {
        Self::new(Level::Warn, template, args)
    }

    pub fn error(template: impl Into<String>, args: impl IntoArgs) -> Self {
        Self::new(Level::Error, template, args)
    }

    /// Builder covering every combination of context, marker and error
    pub fn builder() -> EventBuilder {
        EventBuilder::default()
    }

    pub(crate) fn captured(
        creator: &Arc<LoggerShared>,
        level: Level,
        context: ContextMap,
        marker: Option<Marker>,
        error: Option<AttachedError>,
        template: String,
        arguments: Vec<Arg>,
    ) -> Self {
        let creator = Creator {
            name: creator.name_arc(),
            logger: Arc::downgrade(creator),
        };
        Self::from_data(EventData::new(
            level,
            context,
            marker,
            error,
            template,
            arguments,
            Some(creator),
        ))
    }

    fn from_data(data: EventData) -> Self {
        Self {
            inner: Arc::new(data),
        }
    }

    pub fn level(&self) -> Level {
        self.inner.level
    }

    pub fn context(&self) -> &ContextMap {
        &self.inner.context
    }

    pub fn marker(&self) -> Option<&Marker> {
        self.inner.marker.as_ref()
    }

    pub fn throwable(&self) -> Option<&AttachedError> {
        self.inner.error.as_ref()
    }

    /// The raw message template, placeholders unsubstituted
    pub fn message(&self) -> &str {
        &self.inner.template
    }

    pub fn arguments(&self) -> &[Arg] {
        &self.inner.arguments
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.inner.timestamp
    }

    pub fn thread_name(&self) -> &str {
        &self.inner.thread_name
    }

    /// The logger that captured this event
    ///
    /// # Errors
    ///
    /// Returns `NoCreatingLogger` for events built by hand, and
    /// `CreatingLoggerDropped` if the capturing logger no longer exists.
    pub fn creating_logger(&self) -> Result<Logger> {
        let creator = self
            .inner
            .creator
            .as_ref()
            .ok_or(CaptureError::NoCreatingLogger)?;
        creator
            .logger
            .upgrade()
            .map(Logger::from_shared)
            .ok_or_else(|| CaptureError::CreatingLoggerDropped {
                name: creator.name.to_string(),
            })
    }

    /// Name of the capturing logger, if any, without requiring it to be alive
    pub fn logger_name(&self) -> Option<&str> {
        self.inner.creator.as_ref().map(|c| &*c.name)
    }

    /// Template with arguments substituted
    pub fn formatted_message(&self) -> String {
        format_message(&self.inner.template, &self.inner.arguments)
    }

    /// Echo to stderr for WARN/ERROR and stdout otherwise
    pub(crate) fn print(&self) {
        let mut rendered = Vec::new();
        if self.write_to(&mut rendered).is_err() {
            return;
        }
        let text = String::from_utf8_lossy(&rendered);
        match PrintStream::for_level(self.inner.level) {
            PrintStream::Stderr => eprint!("{}", text),
            PrintStream::Stdout => print!("{}", text),
        }
    }

    /// The printed line, then the attached error and its `Caused by:` chain
    pub(crate) fn write_to(&self, out: &mut impl io::Write) -> io::Result<()> {
        writeln!(out, "{}", self)?;
        if let Some(error) = &self.inner.error {
            let mut chain = error.chain().into_iter();
            if let Some(head) = chain.next() {
                writeln!(out, "{}", head)?;
            }
            for cause in chain {
                writeln!(out, "Caused by: {}", cause)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PrintStream {
    Stdout,
    Stderr,
}

impl PrintStream {
    pub(crate) fn for_level(level: Level) -> Self {
        match level {
            Level::Warn | Level::Error => PrintStream::Stderr,
            Level::Trace | Level::Debug | Level::Info => PrintStream::Stdout,
        }
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (&*self.inner, &*other.inner);
        a.level == b.level
            && a.context == b.context
            && a.marker == b.marker
            && a.error == b.error
            && a.template == b.template
            && a.arguments == b.arguments
    }
}

impl Eq for Event {}

impl Hash for Event {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let data = &*self.inner;
        data.level.hash(state);
        data.context.hash(state);
        data.marker.hash(state);
        data.error.hash(state);
        data.template.hash(state);
        data.arguments.hash(state);
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("level", &self.inner.level)
            .field("context", &self.inner.context)
            .field("marker", &self.inner.marker)
            .field("error", &self.inner.error)
            .field("message", &self.inner.template)
            .field("arguments", &self.inner.arguments)
            .finish()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.inner
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            self.inner.thread_name,
            self.inner.level
        )?;
        if let Some(name) = self.logger_name() {
            write!(f, " {}", name)?;
        }
        write!(f, " - {}", self.formatted_message())
    }
}

/// Builder for expected events
///
/// Level and template are required; `build` rejects a builder missing either.
#[derive(Default)]
pub struct EventBuilder {
    level: Option<Level>,
    context: ContextMap,
    marker: Option<Marker>,
    error: Option<AttachedError>,
    template: Option<String>,
    arguments: Vec<Arg>,
}

impl EventBuilder {
    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn args(mut self, args: impl IntoArgs) -> Self {
        self.arguments = args.into_args();
        self
    }

    /// Copy `context` into the event
    pub fn context<K, V>(mut self, context: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.context = context
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn error(mut self, error: impl Into<AttachedError>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// # Errors
    ///
    /// Returns `MissingEventField` if level or template were never set.
    pub fn build(self) -> Result<Event> {
        let level = self
            .level
            .ok_or(CaptureError::MissingEventField { field: "level" })?;
        let template = self
            .template
            .ok_or(CaptureError::MissingEventField { field: "template" })?;
        Ok(Event::from_data(EventData::new(
            level,
            self.context,
            self.marker,
            self.error,
            template,
            self.arguments,
            None,
        )))
    }
}
