//! Trace bridge configuration
//!
//! The `TRACE` environment variable turns the trace bridge on. It holds
//! either a boolean, applying to every logger, or a comma-separated list of
//! logger prefixes to enable individually.

use sevlog_core_types::schema::TRACE_ENV_VAR;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid boolean: {value}")]
    InvalidBool { value: String },
}

/// Which loggers get an active trace bridge
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TraceSetting {
    #[default]
    Off,
    All,
    Prefixes(Vec<String>),
}

impl TraceSetting {
    /// Read the setting from the `TRACE` environment variable
    ///
    /// Unset or empty means [`TraceSetting::Off`].
    pub fn from_env() -> Self {
        std::env::var(TRACE_ENV_VAR)
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    /// Parse a setting value: a boolean, or a list of prefixes
    pub fn parse(value: &str) -> Self {
        if value.trim().is_empty() {
            return TraceSetting::Off;
        }
        match parse_bool(value) {
            Ok(true) => TraceSetting::All,
            Ok(false) => TraceSetting::Off,
            Err(_) => TraceSetting::Prefixes(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|prefix| !prefix.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
        }
    }

    /// Whether a logger with `prefix` traces
    pub fn enabled_for(&self, prefix: &str) -> bool {
        match self {
            TraceSetting::Off => false,
            TraceSetting::All => true,
            TraceSetting::Prefixes(prefixes) => prefixes.iter().any(|p| p == prefix),
        }
    }
}

/// Parse the boolean spellings accepted in configuration values
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBool`] for anything else.
pub fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            value: value.to_string(),
        }),
    }
}
