//! Error chain rendering
//!
//! Turns an [`ErrorRecord`] into the extra context fields and the trailing
//! `at ...` / `Caused by: ...` lines that follow the primary log line.

use sevlog_core_types::schema::{
    FIELD_ERROR, FIELD_ERROR_LOCATION, FIELD_ERROR_TEXT, FIELD_ERROR_TYPE,
};
use sevlog_core_types::ContextMap;
use sevlog_errors::{ErrorRecord, Frame};

/// The `error*` context fields describing the top error
pub fn error_fields(record: &ErrorRecord) -> ContextMap {
    let mut ctx = ContextMap::new();
    ctx.insert(
        FIELD_ERROR.to_string(),
        record.template_or_message().to_string(),
    );
    ctx.insert(FIELD_ERROR_LOCATION.to_string(), record.location.to_string());
    ctx.insert(FIELD_ERROR_TEXT.to_string(), record.message.clone());
    ctx.insert(FIELD_ERROR_TYPE.to_string(), record.type_tag.clone());
    ctx
}

/// Stack and cause lines, without the per-line header
///
/// The top error's frames come first, then each predecessor as a
/// `Caused by:` line followed by its own frames.
pub fn trailing_block(record: &ErrorRecord) -> Vec<String> {
    let mut lines = Vec::new();
    push_frames(&record.stack, &mut lines);
    for cause in record.causes() {
        lines.push(format!("Caused by: {}", cause.message));
        push_frames(&cause.stack, &mut lines);
    }
    lines
}

fn push_frames(stack: &[Frame], lines: &mut Vec<String>) {
    lines.extend(stack.iter().map(|frame| format!("  at {frame}")));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(message: &str, frames: &[(&str, u32)], cause: Option<ErrorRecord>) -> ErrorRecord {
        ErrorRecord {
            template: None,
            message: message.to_string(),
            location: Frame::new("app::origin", "app.rs", 1),
            type_tag: "app::Error".to_string(),
            stack: frames
                .iter()
                .map(|(f, line)| Frame::new(*f, "app.rs", *line))
                .collect(),
            cause: cause.map(Box::new),
        }
    }

    #[test]
    fn test_no_frames_no_cause_is_empty() {
        assert!(trailing_block(&record("lonely", &[], None)).is_empty());
    }

    #[test]
    fn test_frames_then_causes() {
        let chain = record(
            "top",
            &[("app::a", 1), ("app::b", 2)],
            Some(record("bottom", &[("app::c", 3)], None)),
        );

        assert_eq!(
            trailing_block(&chain),
            vec![
                "  at app::a (app.rs:1)",
                "  at app::b (app.rs:2)",
                "Caused by: bottom",
                "  at app::c (app.rs:3)",
            ]
        );
    }

    #[test]
    fn test_cause_without_frames_still_named() {
        let chain = record("top", &[], Some(record("bottom", &[], None)));
        assert_eq!(trailing_block(&chain), vec!["Caused by: bottom"]);
    }

    #[test]
    fn test_error_fields() {
        let mut rec = record("Hello world", &[], None);
        rec.template = Some("Hello {}".to_string());

        let fields = error_fields(&rec);
        assert_eq!(fields["error"], "Hello {}");
        assert_eq!(fields["error_location"], "app::origin (app.rs:1)");
        assert_eq!(fields["error_text"], "Hello world");
        assert_eq!(fields["error_type"], "app::Error");
    }
}
