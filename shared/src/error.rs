use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by an asynchronous handler.
///
/// Handlers either reject with a human-readable message, which the UI shows
/// as-is, or with nothing usable, in which case the caller picks a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ActionError {
    #[error("{0}")]
    Message(String),
    #[error("unknown failure")]
    Unknown,
}

impl ActionError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Text for an error banner. Falls back when the failure carried no message.
    pub fn banner_text(&self, fallback: &str) -> String {
        match self {
            ActionError::Message(message) => message.clone(),
            ActionError::Unknown => fallback.to_string(),
        }
    }
}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        ActionError::Message(message)
    }
}
