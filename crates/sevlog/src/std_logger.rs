//! `print`/`printf` adapter over the ERROR path

use std::fmt;

use crate::logger::Logger;

/// Std-logger style front for a [`Logger`]
///
/// Every call is an ERROR-level plain message on the wrapped logger; the
/// adapter does no formatting of its own.
#[derive(Debug, Clone)]
pub struct StdLogger {
    logger: Logger,
}

impl StdLogger {
    pub(crate) fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// Log `message` at ERROR
    #[track_caller]
    pub fn print(&self, message: impl fmt::Display) {
        self.logger.error(message.to_string());
    }

    /// Log a formatted message at ERROR, as plain text
    #[track_caller]
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.logger.error(args.to_string());
    }

    /// Same as [`print`](Self::print); lines are newline-terminated anyway
    #[track_caller]
    pub fn println(&self, message: impl fmt::Display) {
        self.logger.error(message.to_string());
    }

    /// The wrapped logger
    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}
