//! Context extraction at log time
//!
//! Reads the ambient operation context without modifying it.

use sevlog_core_types::context::merge;
use sevlog_core_types::ContextMap;

use crate::payload::Payload;

/// Variables of the operations active on the calling thread
///
/// Empty when no operation is active.
pub fn current_context() -> ContextMap {
    sevlog_ops::current_variables()
}

/// Context for a log line about `payload`
///
/// Variables an error captured when it was built come first (its causes'
/// before its own); the caller's current variables are layered on top.
pub fn line_context(payload: &Payload) -> ContextMap {
    let mut ctx = ContextMap::new();
    if let Some(err) = payload.as_chain() {
        err.fill_context(&mut ctx);
    }
    merge(&mut ctx, &current_context());
    ctx
}

/// Context handed to reporters: process-wide globals under the line context
pub fn reporter_context(line: &ContextMap) -> ContextMap {
    let mut ctx = sevlog_ops::globals();
    merge(&mut ctx, line);
    ctx
}

#[cfg(test)]
mod tests {
    use super::*;
    use sevlog_errors::ChainError;
    use sevlog_ops as ops;

    #[test]
    fn test_no_operation_gives_empty_context() {
        assert!(line_context(&Payload::from("msg")).is_empty());
    }

    #[test]
    fn test_current_operation_wins_over_captured() {
        let err = {
            let _op = ops::begin("name").set("cvarC", "c");
            ChainError::new("Hello")
        };
        let _op = ops::begin("name2").set("cvarA", "a");

        let ctx = line_context(&Payload::from(err));
        assert_eq!(ctx.get("op").map(String::as_str), Some("name2"));
        assert_eq!(ctx.get("cvarA").map(String::as_str), Some("a"));
        assert_eq!(ctx.get("cvarC").map(String::as_str), Some("c"));
    }

    #[test]
    fn test_reporter_context_includes_globals() {
        ops::set_global("extract_test_global", "g");
        let mut line = ContextMap::new();
        line.insert("op".to_string(), "x".to_string());

        let ctx = reporter_context(&line);
        assert_eq!(ctx.get("extract_test_global").map(String::as_str), Some("g"));
        assert_eq!(ctx.get("op").map(String::as_str), Some("x"));
        assert!(!line_context(&Payload::from("m")).contains_key("extract_test_global"));
    }
}
