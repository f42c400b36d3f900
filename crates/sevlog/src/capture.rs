//! In-memory sink for deterministic assertions on log output

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use crate::sink::Sink;

/// Cloneable byte buffer that records everything written to it
///
/// Clones share the same buffer, so one clone can be handed to a
/// [`Registry`](crate::Registry) while another is inspected.
#[derive(Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything captured so far, lossily decoded
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Captured output split into lines, without terminators
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Discard everything captured so far
    pub fn clear(&self) {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Sink for CaptureBuffer {
    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(record);
        Ok(())
    }
}

impl std::fmt::Debug for CaptureBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureBuffer")
            .field("len", &self.bytes.lock().map(|b| b.len()).unwrap_or(0))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let capture = CaptureBuffer::new();
        let handle = capture.clone();
        handle.write_record(b"one\ntwo\n").unwrap();

        assert_eq!(capture.lines(), vec!["one", "two"]);
    }

    #[test]
    fn test_clear() {
        let capture = CaptureBuffer::new();
        capture.write_record(b"x\n").unwrap();
        capture.clear();
        assert!(capture.contents().is_empty());
    }
}
