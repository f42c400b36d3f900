//! Operation context for sevlog
//!
//! Operations are named, nestable scopes that accumulate key/value
//! variables. Scopes live on a per-thread stack: `begin` pushes one, ending
//! (or dropping) the returned [`Op`] pops it. At any point the active chain
//! can be flattened into a [`ContextMap`] with [`current_variables`], which is
//! what log lines and errors record.
//!
//! # Usage
//!
//! ```rust
//! use sevlog_ops as ops;
//!
//! let op = ops::begin("checkout").set("user", "u-17");
//! let vars = ops::current_variables();
//! assert_eq!(vars.get("op").map(String::as_str), Some("checkout"));
//! assert_eq!(vars.get("user").map(String::as_str), Some("u-17"));
//! op.end();
//!
//! assert!(ops::current_variables().is_empty());
//! ```
//!
//! Scopes do not follow work onto other threads by themselves; use
//! [`OpContext::capture`] and [`OpContext::enter`], or [`spawn`], to carry
//! them across.

mod globals;
mod propagate;
mod scope;

pub use globals::{as_map, globals, set_global};
pub use propagate::{spawn, EnteredContext, OpContext};
pub use scope::{begin, current_variables, Op};
pub use sevlog_core_types::ContextMap;
