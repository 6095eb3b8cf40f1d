//! Response envelope shared by every backend endpoint

use serde::{Deserialize, Serialize};

/// `{ success, message?, data? }` envelope
///
/// Only the envelope is interpreted by the client core; `data` is forwarded
/// unchanged to whoever asked for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Message to show when the call did not succeed
    pub fn failure_message(&self, fallback: &str) -> String {
        self.message
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}
