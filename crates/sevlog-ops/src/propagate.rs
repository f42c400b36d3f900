//! Carrying operation context across threads

use std::marker::PhantomData;
use std::thread::{self, JoinHandle};

use sevlog_core_types::ContextMap;

use crate::scope::{self, Scope};

/// Snapshot of a thread's active operation chain
///
/// A captured context is plain data and can be moved to another thread,
/// where [`enter`](OpContext::enter) re-installs it.
#[derive(Debug, Clone, Default)]
pub struct OpContext {
    scopes: Vec<Scope>,
}

impl OpContext {
    /// Capture the current thread's active operations
    pub fn capture() -> Self {
        Self {
            scopes: scope::snapshot(),
        }
    }

    /// Whether no operation was active at capture time
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// The flattened variables of the captured chain
    pub fn variables(&self) -> ContextMap {
        scope::flatten(&self.scopes)
    }

    /// Install the captured operations on the current thread
    ///
    /// They are pushed on top of whatever is already active and removed
    /// again when the returned guard drops.
    pub fn enter(&self) -> EnteredContext {
        let ids = self
            .scopes
            .iter()
            .map(|s| scope::push(s.name.clone(), s.vars.clone()))
            .collect();
        EnteredContext {
            ids,
            _not_send: PhantomData,
        }
    }
}

/// Guard for an entered [`OpContext`]
#[must_use = "dropping the guard leaves the context immediately"]
#[derive(Debug)]
pub struct EnteredContext {
    ids: Vec<u64>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for EnteredContext {
    fn drop(&mut self) {
        for id in self.ids.iter().rev() {
            scope::remove(*id);
        }
    }
}

/// Spawn a thread that inherits the caller's active operations
pub fn spawn<F, T>(f: F) -> JoinHandle<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let ctx = OpContext::capture();
    thread::spawn(move || {
        let _entered = ctx.enter();
        f()
    })
}
