//! Per-thread operation scope stack

use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use sevlog_core_types::context::merge;
use sevlog_core_types::schema::{FIELD_OP, FIELD_ROOT_OP};
use sevlog_core_types::ContextMap;

/// One open operation on a thread's stack
#[derive(Debug, Clone)]
pub(crate) struct Scope {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) vars: ContextMap,
}

thread_local! {
    static STACK: RefCell<Vec<Scope>> = const { RefCell::new(Vec::new()) };
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

pub(crate) fn push(name: String, vars: ContextMap) -> u64 {
    let id = next_id();
    STACK.with(|stack| stack.borrow_mut().push(Scope { id, name, vars }));
    id
}

pub(crate) fn remove(id: u64) {
    // The stack may already be gone when a guard drops during thread teardown.
    let removed = STACK
        .try_with(|stack| {
            let mut stack = stack.borrow_mut();
            match stack.iter().rposition(|scope| scope.id == id) {
                Some(pos) => {
                    stack.remove(pos);
                    true
                }
                None => false,
            }
        })
        .unwrap_or(true);

    if !removed {
        tracing::debug!(scope_id = id, "ending operation that is no longer on the stack");
    }
}

pub(crate) fn snapshot() -> Vec<Scope> {
    STACK
        .try_with(|stack| stack.borrow().clone())
        .unwrap_or_default()
}

/// Begin a named operation on the current thread
///
/// The operation stays active until the returned [`Op`] is ended or dropped.
pub fn begin(name: impl Into<String>) -> Op {
    let name = name.into();
    let id = push(name.clone(), ContextMap::new());
    Op {
        id,
        name,
        _not_send: PhantomData,
    }
}

/// Handle to an open operation scope
///
/// Ending is tied to this value, so binding it to `_` ends the scope at
/// once; bind it to a named variable (`let _op = ...`).
#[must_use = "dropping an Op ends the operation immediately"]
#[derive(Debug)]
pub struct Op {
    id: u64,
    name: String,
    // Scopes belong to the thread that opened them.
    _not_send: PhantomData<*const ()>,
}

impl Op {
    /// Record a variable on this operation, returning the operation for chaining
    pub fn set(self, key: impl Into<String>, value: impl ToString) -> Self {
        let (key, value) = (key.into(), value.to_string());
        STACK.with(|stack| {
            if let Some(scope) = stack
                .borrow_mut()
                .iter_mut()
                .rev()
                .find(|scope| scope.id == self.id)
            {
                scope.vars.insert(key, value);
            }
        });
        self
    }

    /// The operation name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// End the operation
    pub fn end(self) {
        drop(self);
    }
}

impl Drop for Op {
    fn drop(&mut self) {
        remove(self.id);
    }
}

/// Flatten the current thread's active operations into a context map
///
/// Variables merge outermost to innermost, later values winning. `op` names
/// the innermost operation and `root_op` the outermost. With no operation
/// active the map is empty.
pub fn current_variables() -> ContextMap {
    STACK
        .try_with(|stack| flatten(&stack.borrow()))
        .unwrap_or_default()
}

pub(crate) fn flatten(scopes: &[Scope]) -> ContextMap {
    let (Some(root), Some(innermost)) = (scopes.first(), scopes.last()) else {
        return ContextMap::new();
    };

    let mut ctx = ContextMap::new();
    for scope in scopes {
        merge(&mut ctx, &scope.vars);
    }
    ctx.insert(FIELD_OP.to_string(), innermost.name.clone());
    ctx.insert(FIELD_ROOT_OP.to_string(), root.name.clone());
    ctx
}
