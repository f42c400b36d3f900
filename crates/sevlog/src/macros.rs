//! `format!`-style logging macros
//!
//! `tracef!` and `debugf!` forward `format_args!` to the matching formatted
//! method. `errorf!` and `fatalf!` build a templated error instead, so the
//! line carries error fields and a stack block. Every macro records the
//! invocation as its call site.

/// Log a formatted TRACE message
///
/// # Example
///
/// ```
/// # use std::sync::Arc;
/// # use sevlog::{tracef, CaptureBuffer, Registry};
/// let registry = Arc::new(Registry::new());
/// registry.set_outputs(std::io::sink(), CaptureBuffer::new());
/// let log = registry.logger_for("worker");
/// tracef!(log, "polled {} items", 3);
/// ```
#[macro_export]
macro_rules! tracef {
    ($logger:expr, $($arg:tt)+) => {
        $logger.tracef(::std::format_args!($($arg)+))
    };
}

/// Log a formatted DEBUG message
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted ERROR as a [`ChainError`](crate::ChainError)
///
/// The template literal, the macro's call site and stack, and the active
/// operation variables are recorded exactly as with
/// [`chain_error!`](crate::chain_error). A leading `cause = <expr>` moves a
/// chain-capable error in as the predecessor, so its captured variables and
/// its own stack appear in the line and its `Caused by:` block.
///
/// # Example
///
/// ```
/// # use std::sync::Arc;
/// # use sevlog::{errorf, CaptureBuffer, ChainError, Registry};
/// let registry = Arc::new(Registry::new());
/// let out = CaptureBuffer::new();
/// registry.set_outputs(out.clone(), std::io::sink());
/// let log = registry.logger_for("db");
///
/// let err = ChainError::new("connection reset");
/// errorf!(log, cause = err.clone(), "query failed: {}", err);
///
/// let lines = out.lines();
/// assert!(lines[0].contains(" query failed: connection reset [error=query failed: {} "));
/// assert!(lines.iter().any(|l| l.ends_with(" Caused by: connection reset")));
/// ```
#[macro_export]
macro_rules! errorf {
    ($logger:expr, cause = $cause:expr, $template:literal $($arg:tt)*) => {
        $logger.error($crate::chain_error!($template $($arg)*).with_source($cause))
    };
    ($logger:expr, $template:literal $($arg:tt)*) => {
        $logger.error($crate::chain_error!($template $($arg)*))
    };
}

/// Log a formatted FATAL as a [`ChainError`](crate::ChainError)
///
/// Accepts the same forms as [`errorf!`](crate::errorf).
#[macro_export]
macro_rules! fatalf {
    ($logger:expr, cause = $cause:expr, $template:literal $($arg:tt)*) => {
        $logger.fatal($crate::chain_error!($template $($arg)*).with_source($cause))
    };
    ($logger:expr, $template:literal $($arg:tt)*) => {
        $logger.fatal($crate::chain_error!($template $($arg)*))
    };
}
