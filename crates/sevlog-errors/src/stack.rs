//! Call stack capture

use backtrace::{Backtrace, BacktraceSymbol};

use crate::frame::Frame;

/// Maximum number of frames kept per error
pub const MAX_STACK_DEPTH: usize = 32;

// Frames from the unwinder, from error construction itself, and from the
// logger's formatted entry points that build errors on the caller's behalf.
const INTERNAL_PREFIXES: &[&str] = &[
    "backtrace::",
    "<backtrace::",
    "sevlog_errors::stack::",
    "sevlog_errors::chain::",
    "<sevlog_errors::chain::",
    "sevlog::logger::",
];

const UNKNOWN: &str = "<unknown>";

/// Capture the caller's stack, innermost frame first
///
/// Construction frames are skipped so the first frame is the code that
/// built the error.
#[inline(never)]
pub(crate) fn capture() -> Vec<Frame> {
    let backtrace = Backtrace::new();
    backtrace
        .frames()
        .iter()
        .flat_map(|frame| frame.symbols())
        .filter_map(to_frame)
        .skip_while(|frame| is_internal(&frame.function))
        .take(MAX_STACK_DEPTH)
        .collect()
}

fn to_frame(symbol: &BacktraceSymbol) -> Option<Frame> {
    let function = format!("{:#}", symbol.name()?);
    let file = symbol
        .filename()
        .and_then(|path| path.to_str())
        .unwrap_or(UNKNOWN);
    Some(Frame::new(function, file, symbol.lineno().unwrap_or(0)))
}

fn is_internal(function: &str) -> bool {
    INTERNAL_PREFIXES
        .iter()
        .any(|prefix| function.starts_with(prefix))
}

/// Function name for an error's location: the first captured frame
pub(crate) fn caller_function(stack: &[Frame]) -> String {
    stack
        .first()
        .map(|frame| frame.function.clone())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_prefixes() {
        assert!(is_internal("backtrace::capture::Backtrace::new"));
        assert!(is_internal("sevlog_errors::chain::ChainError::new"));
        assert!(is_internal("sevlog::logger::Logger::errorf"));
        assert!(!is_internal("my_app::handler"));
    }

    #[test]
    fn test_caller_function_of_empty_stack() {
        assert_eq!(caller_function(&[]), "<unknown>");
    }

    #[test]
    fn test_capture_respects_depth() {
        assert!(capture().len() <= MAX_STACK_DEPTH);
    }
}
