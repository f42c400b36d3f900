//! Trace bridge: a writer whose lines become TRACE log calls
//!
//! Bytes written to a [`TraceWriter`] travel over an in-memory pipe to one
//! background reader thread, which logs each complete line at TRACE in the
//! order written. The pipe holds at most [`PIPE_CAPACITY`] pending writes; a
//! writer that gets further ahead blocks until the reader catches up. When
//! the reader's input fails, including a clean end of
//! stream, it logs one final `TraceWriter closed due to unexpected error`
//! line and exits; later writes are discarded.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use sevlog_core_types::schema::TRACE_CLOSED_PREFIX;
use sevlog_core_types::Severity;
use thiserror::Error;

use crate::logger::Logger;
use crate::payload::Payload;
use crate::site::CallSite;

/// Writes buffered in the pipe before a writer blocks
pub const PIPE_CAPACITY: usize = 64;

/// Why the trace reader stopped
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("EOF")]
    Eof,
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Writer returned by [`Logger::trace_out`]
///
/// Dropping the writer closes the pipe; [`close`](Self::close) also waits
/// until the reader has logged everything, including its final line.
pub struct TraceWriter {
    pipe: Option<Pipe>,
}

struct Pipe {
    tx: Option<SyncSender<Vec<u8>>>,
    closed: Arc<AtomicBool>,
    reader: Option<JoinHandle<()>>,
}

impl TraceWriter {
    /// A writer that accepts and discards everything
    pub(crate) fn disabled() -> Self {
        Self { pipe: None }
    }

    pub(crate) fn spawn(logger: Logger, site: CallSite) -> Self {
        let (tx, rx) = pipe();
        let closed = Arc::new(AtomicBool::new(false));
        let reader_closed = Arc::clone(&closed);
        let name = format!("sevlog-trace-{}", logger.prefix());

        match thread::Builder::new()
            .name(name)
            .spawn(move || read_lines(&logger, site, rx, &reader_closed))
        {
            Ok(reader) => Self {
                pipe: Some(Pipe {
                    tx: Some(tx),
                    closed,
                    reader: Some(reader),
                }),
            },
            Err(err) => {
                tracing::warn!(target: "sevlog", error = %err, "unable to start trace reader");
                Self::disabled()
            }
        }
    }

    /// Whether writes are still forwarded to the log
    pub fn is_active(&self) -> bool {
        self.pipe
            .as_ref()
            .is_some_and(|pipe| pipe.tx.is_some() && !pipe.closed.load(Ordering::SeqCst))
    }

    /// Close the write side and wait for the reader to finish
    pub fn close(mut self) {
        self.shutdown(true);
    }

    fn shutdown(&mut self, wait: bool) {
        let Some(pipe) = self.pipe.as_mut() else {
            return;
        };
        drop(pipe.tx.take());
        if !wait {
            return;
        }
        if let Some(reader) = pipe.reader.take() {
            if reader.join().is_err() {
                tracing::warn!(target: "sevlog", "trace reader panicked");
            }
        }
    }
}

impl Write for TraceWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if let Some(pipe) = self.pipe.as_mut() {
            let open = !pipe.closed.load(Ordering::SeqCst);
            if let (true, Some(tx)) = (open, pipe.tx.as_ref()) {
                // Blocks while the pipe is full. A send error means the
                // reader is gone; the bytes are dropped.
                if tx.send(buf.to_vec()).is_err() {
                    pipe.closed.store(true, Ordering::SeqCst);
                }
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for TraceWriter {
    fn drop(&mut self) {
        self.shutdown(false);
    }
}

fn pipe() -> (SyncSender<Vec<u8>>, Receiver<Vec<u8>>) {
    mpsc::sync_channel(PIPE_CAPACITY)
}

impl std::fmt::Debug for TraceWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceWriter")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Read half of the pipe
struct PipeReader {
    rx: Receiver<Vec<u8>>,
    chunk: Vec<u8>,
    pos: usize,
}

impl Read for PipeReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        while self.pos >= self.chunk.len() {
            match self.rx.recv() {
                Ok(chunk) => {
                    self.chunk = chunk;
                    self.pos = 0;
                }
                // Every sender is gone: end of stream.
                Err(_) => return Ok(0),
            }
        }
        let n = buf.len().min(self.chunk.len() - self.pos);
        buf[..n].copy_from_slice(&self.chunk[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

fn read_lines(logger: &Logger, site: CallSite, rx: Receiver<Vec<u8>>, closed: &AtomicBool) {
    let mut reader = BufReader::new(PipeReader {
        rx,
        chunk: Vec::new(),
        pos: 0,
    });
    let mut line = Vec::new();

    let err = loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => break TraceError::Eof,
            Ok(_) => {
                if line.last() == Some(&b'\n') {
                    line.pop();
                }
                let text = String::from_utf8_lossy(&line).into_owned();
                logger.log(Severity::Trace, Payload::Message(text), site);
            }
            Err(err) => break TraceError::from(err),
        }
    };

    if !closed.swap(true, Ordering::SeqCst) {
        logger.log(
            Severity::Trace,
            Payload::Message(format!("{TRACE_CLOSED_PREFIX}: {err}")),
            site,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eof_displays_as_eof() {
        assert_eq!(TraceError::Eof.to_string(), "EOF");
    }

    #[test]
    fn test_io_error_displays_inner() {
        let err = TraceError::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe gone"));
        assert_eq!(err.to_string(), "pipe gone");
    }

    #[test]
    fn test_pipe_reader_reassembles_chunks() {
        let (tx, rx) = pipe();
        tx.send(b"ab".to_vec()).unwrap();
        tx.send(b"c\nd".to_vec()).unwrap();
        drop(tx);

        let mut reader = PipeReader {
            rx,
            chunk: Vec::new(),
            pos: 0,
        };
        let mut all = String::new();
        reader.read_to_string(&mut all).unwrap();
        assert_eq!(all, "abc\nd");
    }

    #[test]
    fn test_pipe_is_bounded() {
        let (tx, _rx) = pipe();
        for _ in 0..PIPE_CAPACITY {
            tx.try_send(b"x".to_vec()).unwrap();
        }
        assert!(matches!(
            tx.try_send(b"x".to_vec()),
            Err(mpsc::TrySendError::Full(_))
        ));
    }

    #[test]
    fn test_writes_after_reader_exit_do_not_block() {
        let (tx, rx) = pipe();
        drop(rx);
        let mut writer = TraceWriter {
            pipe: Some(Pipe {
                tx: Some(tx),
                closed: Arc::new(AtomicBool::new(false)),
                reader: None,
            }),
        };
        for _ in 0..PIPE_CAPACITY * 4 {
            assert_eq!(writer.write(b"late\n").unwrap(), 5);
        }
        assert!(!writer.is_active());
        writer.close();
    }

    #[test]
    fn test_disabled_writer_discards() {
        let mut writer = TraceWriter::disabled();
        assert_eq!(writer.write(b"ignored\n").unwrap(), 8);
        assert!(!writer.is_active());
        writer.close();
    }
}
