//! Severity-aware logging for sevlog
//!
//! This crate provides the logging engine with:
//! - Per-prefix [`Logger`] values with TRACE/DEBUG/ERROR/FATAL methods
//! - Call-site location on every line (`file:line` of the caller)
//! - Operation variables from [`sevlog_ops`] rendered as a sorted
//!   `[key=value ...]` segment
//! - Cause-chain unwinding with stack traces for [`ErrorChain`] errors
//! - Reporters invoked on every ERROR/FATAL and an overridable fatal handler
//! - A std-logger style adapter and a line-oriented trace sink
//!
//! # Usage
//!
//! ```rust
//! use sevlog::{debugf, CaptureBuffer, Registry};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(Registry::new());
//! let out = CaptureBuffer::new();
//! registry.set_outputs(std::io::sink(), out.clone());
//!
//! let log = registry.logger_for("myprefix");
//! log.debug("Hello world");
//! debugf!(log, "Hello {}", true);
//!
//! let lines = out.lines();
//! assert!(lines[0].starts_with("DEBUG myprefix: "));
//! assert!(lines[0].ends_with(" Hello world"));
//! assert!(lines[1].ends_with(" Hello true"));
//! ```
//!
//! The free functions ([`logger_for`], [`set_outputs`], ...) operate on the
//! process-wide [`Registry::global`] instance.

pub mod capture;
pub mod config;
pub mod extract;
pub mod format;
pub mod hooks;
pub mod layer;
pub mod logger;
pub mod macros;
pub mod payload;
pub mod profile;
pub mod registry;
pub mod render;
pub mod sink;
pub mod site;
pub mod std_logger;
pub mod trace;

pub use capture::CaptureBuffer;
pub use config::{ConfigError, TraceSetting};
pub use hooks::{ExitOnFatal, FatalHandler, IgnoreFatal, Reporter};
pub use layer::SevlogLayer;
pub use logger::Logger;
pub use payload::Payload;
pub use profile::{init, Profile};
pub use registry::Registry;
pub use sevlog_core_types::{ContextMap, Severity};
pub use sevlog_errors::{chain_error, ChainError, ErrorChain, ErrorRecord};
pub use sink::{Outputs, SharedSink, Sink};
pub use site::CallSite;
pub use std_logger::StdLogger;
pub use trace::{TraceError, TraceWriter};

/// Logger for `prefix` on the process-wide registry
pub fn logger_for(prefix: &str) -> Logger {
    Registry::global().logger_for(prefix)
}

/// Replace the process-wide error and debug sinks
pub fn set_outputs(error_out: impl Sink + 'static, debug_out: impl Sink + 'static) {
    Registry::global().set_outputs(error_out, debug_out);
}

/// Snapshot of the process-wide sinks
pub fn get_outputs() -> Outputs {
    Registry::global().outputs()
}

/// Add a reporter to the process-wide registry
pub fn register_reporter(reporter: impl Reporter + 'static) {
    Registry::global().register_reporter(reporter);
}

/// Replace the process-wide fatal handler
pub fn on_fatal(handler: impl FatalHandler + 'static) {
    Registry::global().on_fatal(handler);
}
