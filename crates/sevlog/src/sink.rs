//! Byte sinks that receive formatted log records

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use sevlog_core_types::SinkKind;

/// Destination for formatted log records
///
/// Each call receives one complete record (possibly several lines) and must
/// write it in one piece. Sinks are shared between threads, so they write
/// through `&self`; wrap plain writers in a `Mutex`.
pub trait Sink: Send + Sync {
    /// Write one complete record
    ///
    /// # Errors
    ///
    /// Returns the underlying writer's error.
    fn write_record(&self, record: &[u8]) -> io::Result<()>;
}

/// A sink shared across the registry and loggers
pub type SharedSink = Arc<dyn Sink>;

impl Sink for io::Stdout {
    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        let mut out = self.lock();
        out.write_all(record)?;
        out.flush()
    }
}

impl Sink for io::Stderr {
    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        self.lock().write_all(record)
    }
}

impl Sink for io::Sink {
    fn write_record(&self, _record: &[u8]) -> io::Result<()> {
        Ok(())
    }
}

impl<W: Write + Send> Sink for Mutex<W> {
    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .write_all(record)
    }
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        (**self).write_record(record)
    }
}

/// Consistent snapshot of both sinks
#[derive(Clone)]
pub struct Outputs {
    pub error_out: SharedSink,
    pub debug_out: SharedSink,
}

impl Outputs {
    /// Standard error for ERROR/FATAL, standard output for TRACE/DEBUG
    pub fn standard() -> Self {
        Self {
            error_out: Arc::new(io::stderr()),
            debug_out: Arc::new(io::stdout()),
        }
    }

    /// Both sinks discard everything
    pub fn discard() -> Self {
        Self {
            error_out: Arc::new(io::sink()),
            debug_out: Arc::new(io::sink()),
        }
    }

    /// The sink for `kind`
    pub fn sink(&self, kind: SinkKind) -> &SharedSink {
        match kind {
            SinkKind::Error => &self.error_out,
            SinkKind::Debug => &self.debug_out,
        }
    }
}

impl std::fmt::Debug for Outputs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Outputs").finish_non_exhaustive()
    }
}
