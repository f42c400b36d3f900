//! Process-wide logging state
//!
//! A `Registry` owns everything loggers share: the pair of sinks, the
//! reporter list, the fatal handler and the trace setting. Each slot has its
//! own lock, and a log call reads each slot once, so a concurrent setter is
//! seen either entirely or not at all (last write wins). Both sinks share one
//! slot, so a snapshot never pairs sinks from different `set_outputs` calls.

use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use sevlog_core_types::SinkKind;

use crate::config::TraceSetting;
use crate::hooks::{ExitOnFatal, FatalHandler, Reporter};
use crate::logger::Logger;
use crate::sink::{Outputs, SharedSink, Sink};

static GLOBAL: OnceLock<Arc<Registry>> = OnceLock::new();

/// Shared logging configuration injected into every [`Logger`]
pub struct Registry {
    outputs: RwLock<Outputs>,
    reporters: RwLock<Vec<Arc<dyn Reporter>>>,
    fatal: RwLock<Arc<dyn FatalHandler>>,
    trace: RwLock<TraceSetting>,
}

fn read<T: ?Sized>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T: ?Sized>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl Registry {
    /// Registry with standard sinks, no reporters, [`ExitOnFatal`], and the
    /// trace setting read from the environment
    pub fn new() -> Self {
        Self {
            outputs: RwLock::new(Outputs::standard()),
            reporters: RwLock::new(Vec::new()),
            fatal: RwLock::new(Arc::new(ExitOnFatal)),
            trace: RwLock::new(TraceSetting::from_env()),
        }
    }

    /// The process-lifetime registry behind the crate's free functions
    pub fn global() -> &'static Arc<Registry> {
        GLOBAL.get_or_init(|| Arc::new(Registry::new()))
    }

    /// Create a logger that writes through this registry
    ///
    /// Loggers with the same prefix are independent but behave identically.
    pub fn logger_for(self: &Arc<Self>, prefix: &str) -> Logger {
        Logger::new(prefix, Arc::clone(self))
    }

    /// Replace both sinks at once
    pub fn set_outputs(&self, error_out: impl Sink + 'static, debug_out: impl Sink + 'static) {
        let outputs = Outputs {
            error_out: Arc::new(error_out),
            debug_out: Arc::new(debug_out),
        };
        *write(&self.outputs) = outputs;
    }

    /// Snapshot of both sinks, always from the same `set_outputs` call
    pub fn outputs(&self) -> Outputs {
        read(&self.outputs).clone()
    }

    pub(crate) fn sink(&self, kind: SinkKind) -> SharedSink {
        Arc::clone(read(&self.outputs).sink(kind))
    }

    /// Append a reporter; reporters run in registration order
    pub fn register_reporter(&self, reporter: impl Reporter + 'static) {
        write(&self.reporters).push(Arc::new(reporter));
    }

    // Cloned so reporters run without holding the lock.
    pub(crate) fn reporters(&self) -> Vec<Arc<dyn Reporter>> {
        read(&self.reporters).clone()
    }

    /// Replace the fatal handler
    pub fn on_fatal(&self, handler: impl FatalHandler + 'static) {
        *write(&self.fatal) = Arc::new(handler);
    }

    pub(crate) fn fatal_handler(&self) -> Arc<dyn FatalHandler> {
        Arc::clone(&read(&self.fatal))
    }

    /// Replace the trace setting used by loggers created afterwards
    pub fn set_trace(&self, setting: TraceSetting) {
        *write(&self.trace) = setting;
    }

    /// The current trace setting
    pub fn trace_setting(&self) -> TraceSetting {
        read(&self.trace).clone()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("reporters", &read(&self.reporters).len())
            .field("trace", &*read(&self.trace))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureBuffer;
    use crate::hooks::IgnoreFatal;
    use crate::Payload;
    use sevlog_core_types::{ContextMap, Severity};
    use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

    #[test]
    fn test_set_outputs_replaces_both_sinks() {
        let registry = Registry::new();
        let error = CaptureBuffer::new();
        let debug = CaptureBuffer::new();
        registry.set_outputs(error.clone(), debug.clone());

        registry
            .sink(SinkKind::Error)
            .write_record(b"to error\n")
            .unwrap();
        registry
            .outputs()
            .debug_out
            .write_record(b"to debug\n")
            .unwrap();

        assert_eq!(error.contents(), "to error\n");
        assert_eq!(debug.contents(), "to debug\n");
    }

    /// Sink that records which pair it belongs to when written
    struct Tagged {
        pair: u8,
        seen: Arc<AtomicU8>,
    }

    impl Sink for Tagged {
        fn write_record(&self, _record: &[u8]) -> std::io::Result<()> {
            self.seen.store(self.pair, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_outputs_snapshot_is_never_torn() {
        let registry = Arc::new(Registry::new());
        let seen = Arc::new(AtomicU8::new(0));
        let done = Arc::new(AtomicBool::new(false));

        let setter = {
            let registry = Arc::clone(&registry);
            let seen = Arc::clone(&seen);
            let done = Arc::clone(&done);
            std::thread::spawn(move || {
                for i in 0..20_000u32 {
                    let pair = (i % 2) as u8;
                    let tagged = || Tagged {
                        pair,
                        seen: Arc::clone(&seen),
                    };
                    registry.set_outputs(tagged(), tagged());
                }
                done.store(true, Ordering::SeqCst);
            })
        };

        // Only this thread writes to the sinks, so `seen` names the pair just written.
        let mut torn = 0;
        while !done.load(Ordering::SeqCst) {
            let outputs = registry.outputs();
            let pair = |sink: &SharedSink| {
                sink.write_record(b"").unwrap();
                seen.load(Ordering::SeqCst)
            };
            let (error, debug) = (pair(&outputs.error_out), pair(&outputs.debug_out));
            if error != debug {
                torn += 1;
            }
        }
        setter.join().unwrap();

        assert_eq!(torn, 0);
    }

    #[test]
    fn test_reporters_accumulate() {
        let registry = Registry::new();
        let noop = |_: &Payload, _: &str, _: Severity, _: &ContextMap| {};
        registry.register_reporter(noop);
        registry.register_reporter(noop);
        assert_eq!(registry.reporters().len(), 2);
    }

    #[test]
    fn test_trace_setting_is_replaceable() {
        let registry = Registry::new();
        registry.set_trace(TraceSetting::All);
        assert_eq!(registry.trace_setting(), TraceSetting::All);
    }

    #[test]
    fn test_global_is_shared() {
        assert!(Arc::ptr_eq(Registry::global(), Registry::global()));
    }

    #[test]
    fn test_fatal_handler_is_replaceable() {
        let registry = Registry::new();
        registry.on_fatal(IgnoreFatal);
        registry.fatal_handler().on_fatal(&Payload::from("ignored"));
    }
}
