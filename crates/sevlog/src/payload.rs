//! What an ERROR or FATAL call logs

use std::fmt;
use std::sync::Arc;

use sevlog_errors::{ChainError, ErrorChain};

/// A logged value: an opaque message, or an error exposing its chain
///
/// Only [`Payload::Chain`] contributes error fields and a stack block to
/// the log line; everything else is rendered as its text.
#[derive(Debug, Clone)]
pub enum Payload {
    Message(String),
    Chain(Arc<dyn ErrorChain>),
}

impl Payload {
    /// Wrap a chain-capable error
    pub fn chain(err: impl ErrorChain + 'static) -> Self {
        Payload::Chain(Arc::new(err))
    }

    /// Log any error by its message only
    pub fn opaque(err: &dyn std::error::Error) -> Self {
        Payload::Message(err.to_string())
    }

    /// The resolved message text
    pub fn text(&self) -> &str {
        match self {
            Payload::Message(message) => message,
            Payload::Chain(err) => err.message(),
        }
    }

    /// The error chain, if this payload has one
    pub fn as_chain(&self) -> Option<&dyn ErrorChain> {
        match self {
            Payload::Message(_) => None,
            Payload::Chain(err) => Some(err.as_ref()),
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl From<&str> for Payload {
    fn from(message: &str) -> Self {
        Payload::Message(message.to_string())
    }
}

impl From<String> for Payload {
    fn from(message: String) -> Self {
        Payload::Message(message)
    }
}

impl From<ChainError> for Payload {
    fn from(err: ChainError) -> Self {
        Payload::chain(err)
    }
}

impl From<Arc<dyn ErrorChain>> for Payload {
    fn from(err: Arc<dyn ErrorChain>) -> Self {
        Payload::Chain(err)
    }
}

/// Boxed errors carry no chain, so they log by message only
impl From<Box<dyn std::error::Error + Send + Sync>> for Payload {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Payload::opaque(err.as_ref())
    }
}
