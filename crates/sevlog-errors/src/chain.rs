use std::any::type_name;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use sevlog_core_types::context::merge;
use sevlog_core_types::ContextMap;

use crate::frame::Frame;
use crate::stack;

/// Capability of errors that carry a full causal chain
///
/// The logger checks for this capability to decide whether an error gets
/// extra context fields and a trailing stack block, or is logged as a plain
/// message.
pub trait ErrorChain: fmt::Display + fmt::Debug + Send + Sync {
    /// Format template the message was built from, if any
    fn template(&self) -> Option<&str>;

    /// Fully resolved message text
    fn message(&self) -> &str;

    /// Where the error was constructed
    fn location(&self) -> &Frame;

    /// Type tag describing the underlying error
    fn type_tag(&self) -> &str;

    /// Call stack at construction, innermost frame first
    fn stack(&self) -> &[Frame];

    /// The predecessor error, if any
    fn cause(&self) -> Option<&dyn ErrorChain>;

    /// Add the context this error captured to `ctx`
    fn fill_context(&self, _ctx: &mut ContextMap) {}
}

/// Structured error that records its origin
///
/// Building a `ChainError` captures the caller's file and line, the call
/// stack, and the operation variables active at that moment.
#[derive(Clone)]
pub struct ChainError {
    template: Option<String>,
    message: String,
    location: Frame,
    type_tag: String,
    stack: Vec<Frame>,
    context: ContextMap,
    cause: Option<Arc<dyn ErrorChain>>,
    wrapped: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl ChainError {
    /// Create an error from a literal message
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::build(None, message.into(), type_name::<Self>().to_string(), None)
    }

    /// Create an error from a template and its resolved text
    ///
    /// Normally reached through [`chain_error!`](crate::chain_error).
    #[track_caller]
    pub fn templated(template: &str, message: String) -> Self {
        Self::build(
            Some(template.to_string()),
            message,
            type_name::<Self>().to_string(),
            None,
        )
    }

    /// Wrap an existing error, taking its message and type name
    #[track_caller]
    pub fn wrap<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let message = err.to_string();
        Self::build(
            None,
            message,
            type_name::<E>().to_string(),
            Some(Arc::new(err)),
        )
    }

    #[track_caller]
    fn build(
        template: Option<String>,
        message: String,
        type_tag: String,
        wrapped: Option<Arc<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let caller = Location::caller();
        let stack = stack::capture();
        let location = Frame::new(stack::caller_function(&stack), caller.file(), caller.line());

        Self {
            template,
            message,
            location,
            type_tag,
            stack,
            context: sevlog_ops::current_variables(),
            cause: None,
            wrapped,
        }
    }

    /// Attach the predecessor error
    pub fn with_source(mut self, cause: impl ErrorChain + 'static) -> Self {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// Operation variables captured at construction
    pub fn context(&self) -> &ContextMap {
        &self.context
    }
}

impl ErrorChain for ChainError {
    fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn location(&self) -> &Frame {
        &self.location
    }

    fn type_tag(&self) -> &str {
        &self.type_tag
    }

    fn stack(&self) -> &[Frame] {
        &self.stack
    }

    fn cause(&self) -> Option<&dyn ErrorChain> {
        self.cause.as_deref()
    }

    fn fill_context(&self, ctx: &mut ContextMap) {
        if let Some(cause) = &self.cause {
            cause.fill_context(ctx);
        }
        merge(ctx, &self.context);
    }
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Debug for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainError")
            .field("template", &self.template)
            .field("message", &self.message)
            .field("location", &self.location)
            .field("type_tag", &self.type_tag)
            .field("cause", &self.cause)
            .finish_non_exhaustive()
    }
}

/// `source()` is the wrapped foreign error; the chain is reached through
/// [`ErrorChain::cause`].
impl std::error::Error for ChainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.wrapped
            .as_deref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}
