//! Success envelope
//!
//! Every successful response is `{success: true, ...data, message?}`.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Envelope<serde_json::Map<String, serde_json::Value>> {
    /// Envelope carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self::ok(serde_json::Map::new()).with_message(message)
    }
}
