//! Process-wide context variables
//!
//! Globals are visible to every thread but never appear in
//! [`current_variables`](crate::current_variables); callers that want them
//! ask for [`as_map`] with `include_globals`.

use std::sync::{OnceLock, PoisonError, RwLock};

use sevlog_core_types::context::merge;
use sevlog_core_types::ContextMap;

use crate::scope::current_variables;

static GLOBALS: OnceLock<RwLock<ContextMap>> = OnceLock::new();

fn slot() -> &'static RwLock<ContextMap> {
    GLOBALS.get_or_init(|| RwLock::new(ContextMap::new()))
}

/// Set a process-wide context variable
pub fn set_global(key: impl Into<String>, value: impl ToString) {
    slot()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(key.into(), value.to_string());
}

/// Snapshot of all process-wide context variables
pub fn globals() -> ContextMap {
    slot()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Current operation variables, optionally layered over the globals
///
/// Operation variables win over globals with the same key.
pub fn as_map(include_globals: bool) -> ContextMap {
    if !include_globals {
        return current_variables();
    }
    let mut ctx = globals();
    merge(&mut ctx, &current_variables());
    ctx
}
