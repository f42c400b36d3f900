use std::fmt;
use std::sync::Arc;

use regex::Regex;
use sevlog::{CaptureBuffer, ContextMap, ErrorChain, IgnoreFatal, Registry, TraceSetting};
use sevlog_errors::Frame;

/// A registry writing into two capture buffers
#[allow(dead_code)]
pub struct Harness {
    pub registry: Arc<Registry>,
    pub error: CaptureBuffer,
    pub debug: CaptureBuffer,
}

/// Private registry with captured sinks, fatal calls returning, trace off
#[allow(dead_code)]
pub fn harness() -> Harness {
    let registry = Arc::new(Registry::new());
    let error = CaptureBuffer::new();
    let debug = CaptureBuffer::new();
    registry.set_outputs(error.clone(), debug.clone());
    registry.on_fatal(IgnoreFatal);
    registry.set_trace(TraceSetting::Off);
    Harness {
        registry,
        error,
        debug,
    }
}

/// Replace the call-site line number of every header with `999`
///
/// Frame positions inside `at ...` lines are left alone.
#[allow(dead_code)]
pub fn normalize(output: &str) -> String {
    let header = Regex::new(r"(?m)^([A-Z]+ [^:]*: [^:\s]+):\d+ ").unwrap();
    header.replace_all(output, "${1}:999 ").into_owned()
}

/// Replace every `file.rs:line` position with `file.rs:999`
#[allow(dead_code)]
pub fn normalize_all(output: &str) -> String {
    let position = Regex::new(r"\.rs:\d+").unwrap();
    position.replace_all(output, ".rs:999").into_owned()
}

/// Chain error with fixed frames, for byte-exact rendering assertions
#[derive(Debug)]
#[allow(dead_code)]
pub struct FixedError {
    pub template: Option<String>,
    pub message: String,
    pub location: Frame,
    pub type_tag: String,
    pub stack: Vec<Frame>,
    pub context: ContextMap,
    pub cause: Option<Box<FixedError>>,
}

#[allow(dead_code)]
impl FixedError {
    pub fn new(message: &str, frames: &[(&str, &str, u32)]) -> Self {
        let stack: Vec<Frame> = frames
            .iter()
            .map(|(function, file, line)| Frame::new(*function, file, *line))
            .collect();
        Self {
            template: None,
            message: message.to_string(),
            location: stack
                .first()
                .cloned()
                .unwrap_or_else(|| Frame::new("app::unknown", "app.rs", 1)),
            type_tag: "app::FixedError".to_string(),
            stack,
            context: ContextMap::new(),
            cause: None,
        }
    }

    pub fn template(mut self, template: &str) -> Self {
        self.template = Some(template.to_string());
        self
    }

    pub fn var(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn caused_by(mut self, cause: FixedError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}

impl fmt::Display for FixedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl ErrorChain for FixedError {
    fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn location(&self) -> &Frame {
        &self.location
    }

    fn type_tag(&self) -> &str {
        &self.type_tag
    }

    fn stack(&self) -> &[Frame] {
        &self.stack
    }

    fn cause(&self) -> Option<&dyn ErrorChain> {
        self.cause.as_deref().map(|cause| cause as &dyn ErrorChain)
    }

    fn fill_context(&self, ctx: &mut ContextMap) {
        if let Some(cause) = &self.cause {
            cause.fill_context(ctx);
        }
        for (key, value) in &self.context {
            ctx.insert(key.clone(), value.clone());
        }
    }
}
