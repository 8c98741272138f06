//! Simple message response for mutating endpoints.

use serde::Serialize;

/// `{"message": ...}` body returned by update and delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
