//! Call-site capture

use std::fmt;
use std::panic::Location;

use sevlog_errors::base_name;

/// Source position a log line is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    /// Position of the caller
    ///
    /// Every public logging method is `#[track_caller]`, so this resolves to
    /// the code that called the logger, not the logger itself.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line())
    }

    /// Site for an explicit path and line; only the base name is kept
    pub fn new(file: &'static str, line: u32) -> Self {
        Self {
            file: base_name(file),
            line,
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
