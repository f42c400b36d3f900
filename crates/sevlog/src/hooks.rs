//! Reporter and fatal handler hooks
//!
//! Both hooks are registered on a [`Registry`](crate::Registry) and called
//! synchronously from the logging thread. Closures with the matching
//! signature implement the traits directly.

use sevlog_core_types::{ContextMap, Severity};

use crate::payload::Payload;

/// Hook invoked for every ERROR and FATAL log call
///
/// Reporters run after the line is written, in registration order, and
/// receive the payload whether or not it carries an error chain.
pub trait Reporter: Send + Sync {
    /// Handle one reported event
    ///
    /// # Arguments
    /// * `payload` - The message or error that was logged
    /// * `prefix` - The logger prefix
    /// * `severity` - `Error` or `Fatal`
    /// * `ctx` - The rendered context plus process-wide globals
    fn report(&self, payload: &Payload, prefix: &str, severity: Severity, ctx: &ContextMap);
}

impl<F> Reporter for F
where
    F: Fn(&Payload, &str, Severity, &ContextMap) + Send + Sync,
{
    fn report(&self, payload: &Payload, prefix: &str, severity: Severity, ctx: &ContextMap) {
        self(payload, prefix, severity, ctx)
    }
}

/// Action taken after a FATAL line has been written and reported
pub trait FatalHandler: Send + Sync {
    fn on_fatal(&self, payload: &Payload);
}

impl<F> FatalHandler for F
where
    F: Fn(&Payload) + Send + Sync,
{
    fn on_fatal(&self, payload: &Payload) {
        self(payload)
    }
}

/// Default fatal handler: terminate the process with status 1
///
/// # Example
/// ```no_run
/// use sevlog::{ExitOnFatal, FatalHandler, Payload};
///
/// ExitOnFatal.on_fatal(&Payload::from("unrecoverable"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExitOnFatal;

impl FatalHandler for ExitOnFatal {
    fn on_fatal(&self, _payload: &Payload) {
        std::process::exit(1);
    }
}

/// Fatal handler that returns control to the caller
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreFatal;

impl FatalHandler for IgnoreFatal {
    fn on_fatal(&self, _payload: &Payload) {}
}
