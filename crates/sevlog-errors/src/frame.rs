use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A single source position: qualified function plus file and line
///
/// `file` holds the base name only, which is what log lines show.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frame {
    pub function: String,
    pub file: String,
    pub line: u32,
}

impl Frame {
    /// Create a frame, reducing `file` to its base name
    pub fn new(function: impl Into<String>, file: impl AsRef<str>, line: u32) -> Self {
        Self {
            function: function.into(),
            file: base_name(file.as_ref()).to_string(),
            line,
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.function, self.file, self.line)
    }
}

/// The last path component of `path`, or `path` itself if it has none
pub fn base_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}
