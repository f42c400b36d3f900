//! Bridge from `tracing` events into a [`Logger`]
//!
//! Installing a [`SevlogLayer`] lets code instrumented with `tracing`
//! macros log through sevlog's sinks, context and reporters.

use std::fmt;

use sevlog_core_types::{ContextMap, Severity};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use crate::logger::Logger;
use crate::payload::Payload;
use crate::site::CallSite;

const MESSAGE_FIELD: &str = "message";
const INTERNAL_TARGET: &str = "sevlog";

struct FieldVisitor {
    message: Option<String>,
    fields: ContextMap,
}

impl FieldVisitor {
    fn new() -> Self {
        Self {
            message: None,
            fields: ContextMap::new(),
        }
    }

    fn insert(&mut self, field: &Field, value: String) {
        if field.name() == MESSAGE_FIELD {
            self.message = Some(value);
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, value.to_string());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, value.to_string());
    }
}

/// `tracing` layer that writes every event through a [`Logger`]
///
/// Levels map as `TRACE` → TRACE, `DEBUG`/`INFO` → DEBUG and
/// `WARN`/`ERROR` → ERROR. The `message` field is the log message and the
/// remaining fields join the context. Events from sevlog's own crates are
/// skipped.
#[derive(Debug, Clone)]
pub struct SevlogLayer {
    logger: Logger,
}

impl SevlogLayer {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

/// Severity for a `tracing` level
pub fn severity_for(level: &Level) -> Severity {
    match *level {
        Level::TRACE => Severity::Trace,
        Level::DEBUG | Level::INFO => Severity::Debug,
        _ => Severity::Error,
    }
}

fn is_internal(target: &str) -> bool {
    target == INTERNAL_TARGET
        || target
            .strip_prefix(INTERNAL_TARGET)
            .is_some_and(|rest| rest.starts_with('_'))
}

impl<S> Layer<S> for SevlogLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if is_internal(metadata.target()) {
            return;
        }

        let mut visitor = FieldVisitor::new();
        event.record(&mut visitor);

        let site = CallSite::new(
            metadata.file().unwrap_or_else(|| metadata.target()),
            metadata.line().unwrap_or(0),
        );
        self.logger.log_with(
            severity_for(metadata.level()),
            Payload::Message(visitor.message.unwrap_or_default()),
            site,
            &visitor.fields,
        );
    }
}
