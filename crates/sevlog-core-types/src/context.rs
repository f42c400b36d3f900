//! Context mapping carried on log lines
//!
//! A `ContextMap` is ordered by key, so iterating it yields the ascending
//! lexical order the formatter renders. Inserting an existing key replaces
//! its value (last write wins).

use std::collections::BTreeMap;

/// Ordered string-to-string context entries
pub type ContextMap = BTreeMap<String, String>;

/// Merge `overlay` into `base`, overlay values winning on key clashes
pub fn merge(base: &mut ContextMap, overlay: &ContextMap) {
    for (key, value) in overlay {
        base.insert(key.clone(), value.clone());
    }
}
