//! Log severities and their sink routing

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Log severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Trace,
    Debug,
    Error,
    Fatal,
}

/// Which of the two process-wide sinks a severity writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// Receives TRACE and DEBUG lines
    Debug,
    /// Receives ERROR and FATAL lines
    Error,
}

impl Severity {
    /// All severities in ascending order
    pub const ALL: [Severity; 4] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Error,
        Severity::Fatal,
    ];

    /// The canonical upper-case name printed at the start of each line
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// The sink this severity is routed to
    pub fn sink(&self) -> SinkKind {
        match self {
            Severity::Trace | Severity::Debug => SinkKind::Debug,
            Severity::Error | Severity::Fatal => SinkKind::Error,
        }
    }

    /// Whether registered reporters are invoked for this severity
    pub fn is_reported(&self) -> bool {
        self.sink() == SinkKind::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known severity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeverityError(String);

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown severity '{}'", self.0)
    }
}

impl std::error::Error for ParseSeverityError {}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|sev| sev.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSeverityError(s.to_string()))
    }
}
