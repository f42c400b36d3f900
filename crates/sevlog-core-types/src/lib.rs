//! Core types shared across sevlog facilities
//!
//! This crate provides foundational types used by the operation context,
//! the error chain facility and the logging engine:
//!
//! - **Severity**: the closed set of log levels and their sink routing
//! - **Context mapping**: the ordered key/value set rendered on log lines
//! - **Schema constants**: canonical context keys

pub mod context;
pub mod schema;
pub mod severity;

pub use context::ContextMap;
pub use severity::{ParseSeverityError, Severity, SinkKind};
