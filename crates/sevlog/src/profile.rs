//! Process-wide initialization
//!
//! Provides a single initialization point that configures the global
//! [`Registry`] and installs a `tracing` subscriber for the crate's own
//! diagnostics.

use std::io;
use std::sync::Once;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::TraceSetting;
use crate::hooks::IgnoreFatal;
use crate::layer::SevlogLayer;
use crate::registry::Registry;
use crate::sink::Outputs;

/// Prefix of the logger that receives bridged `tracing` events
pub const TRACING_PREFIX: &str = "tracing";

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Standard streams, trace bridge from `TRACE`
    Development,
    /// Standard streams, trace bridge off, JSON diagnostics
    Production,
    /// Discarded output, fatal calls return, trace bridge on
    Test,
}

impl Profile {
    /// Configure `registry` for this profile
    pub fn apply(self, registry: &Registry) {
        match self {
            Profile::Development => {
                let outputs = Outputs::standard();
                registry.set_outputs(outputs.error_out, outputs.debug_out);
                registry.set_trace(TraceSetting::from_env());
            }
            Profile::Production => {
                let outputs = Outputs::standard();
                registry.set_outputs(outputs.error_out, outputs.debug_out);
                registry.set_trace(TraceSetting::Off);
            }
            Profile::Test => {
                let outputs = Outputs::discard();
                registry.set_outputs(outputs.error_out, outputs.debug_out);
                registry.on_fatal(IgnoreFatal);
                registry.set_trace(TraceSetting::All);
            }
        }
    }

    fn default_filter(self) -> &'static str {
        match self {
            Profile::Development => "sevlog=debug",
            Profile::Production | Profile::Test => "sevlog=warn",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the process-wide logging state
///
/// Applies `profile` to [`Registry::global`]. Outside the test profile it
/// also installs a global `tracing` subscriber that prints sevlog's own
/// diagnostics to stderr (filtered by `RUST_LOG`) and forwards all other
/// events to the `tracing` logger. Only the first call has any effect.
///
/// # Example
///
/// ```
/// use sevlog::{init, Profile};
///
/// init(Profile::Test);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let registry = Registry::global();
        profile.apply(registry);
        if profile == Profile::Test {
            return;
        }

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_filter()));
        let bridge = SevlogLayer::new(registry.logger_for(TRACING_PREFIX));
        let installed = if profile == Profile::Production {
            let diagnostics = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_filter(filter);
            tracing_subscriber::registry()
                .with(diagnostics)
                .with(bridge)
                .try_init()
        } else {
            let diagnostics = tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_filter(filter);
            tracing_subscriber::registry()
                .with(diagnostics)
                .with(bridge)
                .try_init()
        };
        if installed.is_err() {
            tracing::debug!(target: "sevlog", "global subscriber already set, keeping it");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureBuffer;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
        init(Profile::Production);
    }

    #[test]
    fn test_test_profile_discards_and_traces() {
        let registry = Registry::new();
        let capture = CaptureBuffer::new();
        registry.set_outputs(capture.clone(), capture.clone());

        Profile::Test.apply(&registry);
        assert_eq!(registry.trace_setting(), TraceSetting::All);

        let log = std::sync::Arc::new(registry).logger_for("p");
        log.fatal("not fatal here");
        assert!(capture.contents().is_empty());
    }

    #[test]
    fn test_production_ignores_trace_env() {
        let registry = Registry::new();
        registry.set_trace(TraceSetting::All);
        Profile::Production.apply(&registry);
        assert_eq!(registry.trace_setting(), TraceSetting::Off);
    }
}
