//! Canonical schema constants for log context
//!
//! These constants keep the context keys consistent between the operation
//! context, the error chain facility and the rendered log lines.

// Operation scope keys
pub const FIELD_OP: &str = "op";
pub const FIELD_ROOT_OP: &str = "root_op";

// Error fields
pub const FIELD_ERROR: &str = "error";
pub const FIELD_ERROR_LOCATION: &str = "error_location";
pub const FIELD_ERROR_TEXT: &str = "error_text";
pub const FIELD_ERROR_TYPE: &str = "error_type";

// Trace bridge
pub const TRACE_ENV_VAR: &str = "TRACE";
pub const TRACE_CLOSED_PREFIX: &str = "TraceWriter closed due to unexpected error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_fields_sort_after_error() {
        // Rendered brackets are key-sorted; the error fields stay grouped.
        let mut keys = [
            FIELD_ERROR_TYPE,
            FIELD_ERROR,
            FIELD_ERROR_TEXT,
            FIELD_ERROR_LOCATION,
        ];
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                FIELD_ERROR,
                FIELD_ERROR_LOCATION,
                FIELD_ERROR_TEXT,
                FIELD_ERROR_TYPE
            ]
        );
    }

    #[test]
    fn test_op_keys_are_distinct() {
        assert_ne!(FIELD_OP, FIELD_ROOT_OP);
        assert!(FIELD_OP < FIELD_ROOT_OP);
    }
}
