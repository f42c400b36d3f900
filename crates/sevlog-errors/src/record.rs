//! Serializable snapshot of an error chain

use serde::Serialize;

use crate::chain::ErrorChain;
use crate::frame::Frame;

/// Everything needed to present one error and its predecessors
///
/// Built fresh from any [`ErrorChain`] each time it is needed; it holds
/// owned copies so it can outlive the error or be shipped as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub template: Option<String>,
    pub message: String,
    pub location: Frame,
    pub type_tag: String,
    pub stack: Vec<Frame>,
    pub cause: Option<Box<ErrorRecord>>,
}

impl ErrorRecord {
    /// Snapshot `err` and its whole cause chain
    pub fn from_chain(err: &dyn ErrorChain) -> Self {
        Self {
            template: err.template().map(str::to_string),
            message: err.message().to_string(),
            location: err.location().clone(),
            type_tag: err.type_tag().to_string(),
            stack: err.stack().to_vec(),
            cause: err.cause().map(|c| Box::new(Self::from_chain(c))),
        }
    }

    /// The template if there is one, else the literal message
    pub fn template_or_message(&self) -> &str {
        self.template.as_deref().unwrap_or(&self.message)
    }

    /// Iterate over the predecessors, nearest first
    pub fn causes(&self) -> impl Iterator<Item = &ErrorRecord> {
        std::iter::successors(self.cause.as_deref(), |record| record.cause.as_deref())
    }

    /// Render as a JSON value
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(message: &str, cause: Option<ErrorRecord>) -> ErrorRecord {
        ErrorRecord {
            template: None,
            message: message.to_string(),
            location: Frame::new("app::run", "main.rs", 1),
            type_tag: "app::Error".to_string(),
            stack: vec![Frame::new("app::run", "main.rs", 1)],
            cause: cause.map(Box::new),
        }
    }

    #[test]
    fn test_causes_nearest_first() {
        let chain = record("top", Some(record("middle", Some(record("bottom", None)))));
        let messages: Vec<_> = chain.causes().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, vec!["middle", "bottom"]);
    }

    #[test]
    fn test_template_falls_back_to_message() {
        let mut rec = record("Hello world", None);
        assert_eq!(rec.template_or_message(), "Hello world");

        rec.template = Some("Hello {}".to_string());
        assert_eq!(rec.template_or_message(), "Hello {}");
    }

    #[test]
    fn test_to_json_nests_cause() {
        let json = record("top", Some(record("bottom", None))).to_json().unwrap();

        assert_eq!(json["message"], "top");
        assert_eq!(json["cause"]["message"], "bottom");
        assert_eq!(json["cause"]["cause"], serde_json::Value::Null);
        assert_eq!(json["location"]["file"], "main.rs");
    }
}
