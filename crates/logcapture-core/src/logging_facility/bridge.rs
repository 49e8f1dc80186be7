//! Routes `tracing` events into a capture registry
//!
//! Each event becomes one captured call: the target names the logger, the
//! `message` field is the template and every other field, in declaration
//! order, is an argument. Events emitted by this crate are never captured.
//!
//! `tracing` formats the message itself, so placeholders meant for capture
//! are written escaped: `info!(user = "bob", "login {{}}")`.

use std::fmt;
use std::sync::{Arc, Once};

use logcapture_core_types::schema::FIELD_MESSAGE;
use logcapture_core_types::Level;
use tracing::field::{Field, Visit};
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::arg::Arg;
use crate::errors::Result;
use crate::facade::default_registry;
use crate::registry::Registry;

const OWN_TARGET: &str = "logcapture_core";

#[derive(Default)]
struct FieldVisitor {
    template: String,
    args: Vec<Arg>,
}

impl FieldVisitor {
    fn push(&mut self, field: &Field, arg: Arg) {
        if field.name() == FIELD_MESSAGE {
            self.template = arg.to_string();
        } else {
            self.args.push(arg);
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, Arg::debug(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, Arg::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, Arg::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, Arg::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, Arg::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, Arg::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.push(field, Arg::display(value));
    }
}

fn capture_level(level: &tracing::Level) -> Level {
    match *level {
        tracing::Level::TRACE => Level::Trace,
        tracing::Level::DEBUG => Level::Debug,
        tracing::Level::INFO => Level::Info,
        tracing::Level::WARN => Level::Warn,
        _ => Level::Error,
    }
}

fn is_own_target(target: &str) -> bool {
    target == OWN_TARGET
        || target
            .strip_prefix(OWN_TARGET)
            .is_some_and(|rest| rest.starts_with("::"))
}

/// Layer that captures every `tracing` event into a registry
pub struct CaptureLayer {
    registry: Arc<Registry>,
}

impl CaptureLayer {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if is_own_target(metadata.target()) {
            return;
        }

        let logger = self.registry.logger(metadata.target());
        let level = capture_level(metadata.level());
        if !logger.is_enabled(level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        logger.log(level, &visitor.template, visitor.args);
    }
}

static CAPTURE_INIT: Once = Once::new();

/// Install a global subscriber that captures into the default registry
///
/// Idempotent. If another global subscriber was installed first, capture
/// stays inactive but the default registry is still returned.
///
/// # Errors
///
/// Returns the default registry's configuration error.
pub fn init_capture() -> Result<Arc<Registry>> {
    let registry = default_registry()?;
    CAPTURE_INIT.call_once(|| {
        let layer = CaptureLayer::new(Arc::clone(&registry));
        tracing_subscriber::registry().with(layer).try_init().ok();
    });
    Ok(registry)
}
