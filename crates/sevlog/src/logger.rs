//! Per-prefix logger façade

use std::fmt;
use std::sync::Arc;

use sevlog_core_types::context::merge;
use sevlog_core_types::{ContextMap, Severity};
use sevlog_errors::{ChainError, ErrorRecord};

use crate::extract;
use crate::format::{format_record, Line};
use crate::payload::Payload;
use crate::registry::Registry;
use crate::render;
use crate::site::CallSite;
use crate::std_logger::StdLogger;
use crate::trace::TraceWriter;

/// Logger bound to a display prefix
///
/// A logger holds no mutable state of its own: sinks, reporters and the
/// fatal handler are looked up in its [`Registry`] on every call. Every
/// method records the caller's file and line.
#[derive(Clone)]
pub struct Logger {
    prefix: Arc<str>,
    registry: Arc<Registry>,
    trace_on: bool,
}

impl Logger {
    pub(crate) fn new(prefix: &str, registry: Arc<Registry>) -> Self {
        let trace_on = registry.trace_setting().enabled_for(prefix);
        Self {
            prefix: Arc::from(prefix),
            registry,
            trace_on,
        }
    }

    /// The display prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether [`trace_out`](Self::trace_out) forwards to the log
    pub fn is_trace_enabled(&self) -> bool {
        self.trace_on
    }

    /// Log a TRACE message
    #[track_caller]
    pub fn trace(&self, message: impl fmt::Display) {
        self.log(Severity::Trace, Payload::Message(message.to_string()), CallSite::caller());
    }

    /// Log a formatted TRACE message
    #[track_caller]
    pub fn tracef(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Trace, Payload::Message(args.to_string()), CallSite::caller());
    }

    /// Log a DEBUG message
    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Severity::Debug, Payload::Message(message.to_string()), CallSite::caller());
    }

    /// Log a formatted DEBUG message
    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Debug, Payload::Message(args.to_string()), CallSite::caller());
    }

    /// Log an ERROR and notify the reporters
    ///
    /// A [`ChainError`] (or any [`Payload::Chain`]) adds
    /// its error fields and stack block; plain text is logged as is.
    #[track_caller]
    pub fn error(&self, payload: impl Into<Payload>) {
        self.log(Severity::Error, payload.into(), CallSite::caller());
    }

    /// Log a formatted ERROR as an error chain and notify the reporters
    ///
    /// The text becomes a [`ChainError`] recorded at the caller, so the line
    /// carries error fields and a stack block. Prefer
    /// [`errorf!`](crate::errorf), which also keeps the template literal and
    /// accepts a cause.
    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Error, formatted_error(args), CallSite::caller());
    }

    /// Log a FATAL, notify the reporters, then run the fatal handler
    #[track_caller]
    pub fn fatal(&self, payload: impl Into<Payload>) {
        self.log(Severity::Fatal, payload.into(), CallSite::caller());
    }

    /// Formatted form of [`fatal`](Self::fatal), logged like [`errorf`](Self::errorf)
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Fatal, formatted_error(args), CallSite::caller());
    }

    /// Adapter exposing `print`/`printf` on the ERROR path
    pub fn as_std_logger(&self) -> StdLogger {
        StdLogger::new(self.clone())
    }

    /// Writer whose lines are logged at TRACE
    ///
    /// When tracing is off for this logger, writes are discarded.
    #[track_caller]
    pub fn trace_out(&self) -> TraceWriter {
        let site = CallSite::caller();
        if self.trace_on {
            TraceWriter::spawn(self.clone(), site)
        } else {
            TraceWriter::disabled()
        }
    }

    pub(crate) fn log(&self, severity: Severity, payload: Payload, site: CallSite) {
        self.log_with(severity, payload, site, &ContextMap::new());
    }

    /// Write one record, then run reporters and the fatal handler
    pub(crate) fn log_with(
        &self,
        severity: Severity,
        payload: Payload,
        site: CallSite,
        extra: &ContextMap,
    ) {
        let record = payload.as_chain().map(ErrorRecord::from_chain);

        let mut ctx = extract::line_context(&payload);
        merge(&mut ctx, extra);
        let trailing = match &record {
            Some(record) => {
                merge(&mut ctx, &render::error_fields(record));
                render::trailing_block(record)
            }
            None => Vec::new(),
        };

        let text = format_record(&Line {
            severity,
            prefix: &self.prefix,
            site,
            message: payload.text(),
            context: &ctx,
            trailing: &trailing,
        });

        let sink = self.registry.sink(severity.sink());
        if let Err(err) = sink.write_record(text.as_bytes()) {
            tracing::warn!(
                target: "sevlog",
                prefix = %self.prefix,
                error = %err,
                "unable to write log record"
            );
        }

        if severity.is_reported() {
            let reporter_ctx = extract::reporter_context(&ctx);
            for reporter in self.registry.reporters() {
                reporter.report(&payload, &self.prefix, severity, &reporter_ctx);
            }
        }

        if severity == Severity::Fatal {
            self.registry.fatal_handler().on_fatal(&payload);
        }
    }
}

// Arguments without placeholders still expose their literal as the template.
#[track_caller]
fn formatted_error(args: fmt::Arguments<'_>) -> Payload {
    let err = match args.as_str() {
        Some(literal) => ChainError::templated(literal, literal.to_string()),
        None => ChainError::new(args.to_string()),
    };
    Payload::from(err)
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("prefix", &self.prefix)
            .field("trace_on", &self.trace_on)
            .finish_non_exhaustive()
    }
}
