//! Error chains for sevlog
//!
//! This crate provides the error side of the logging facility:
//!
//! - **`ErrorChain`**: the capability the logger looks for. An error that
//!   implements it exposes a format template, a creation location, a type
//!   tag, a captured call stack and an optional predecessor.
//! - **`ChainError`**: the stock implementation. It captures its location,
//!   stack and the active operation variables when it is built.
//! - **`ErrorRecord`**: a plain, serializable snapshot of a whole chain.
//!
//! # Example
//!
//! ```
//! use sevlog_errors::{chain_error, ChainError, ErrorChain};
//!
//! let cause = ChainError::new("world");
//! let err = chain_error!("Hello {}", cause).with_source(cause.clone());
//!
//! assert_eq!(err.message(), "Hello world");
//! assert_eq!(err.template(), Some("Hello {}"));
//! assert_eq!(err.cause().map(|c| c.message()), Some("world"));
//! ```

mod chain;
mod frame;
mod record;
mod stack;

pub use chain::{ChainError, ErrorChain};
pub use frame::{base_name, Frame};
pub use record::ErrorRecord;
pub use stack::MAX_STACK_DEPTH;

/// Build a [`ChainError`] from a format string, keeping the literal as its template
///
/// The arguments are formatted with `format!`; the template literal is kept
/// so log lines can show both the template and the resolved text. Attach a
/// predecessor with [`ChainError::with_source`].
#[macro_export]
macro_rules! chain_error {
    ($template:literal $(,)?) => {
        $crate::ChainError::templated($template, ::std::format!($template))
    };
    ($template:literal, $($arg:tt)+) => {
        $crate::ChainError::templated($template, ::std::format!($template, $($arg)+))
    };
}
