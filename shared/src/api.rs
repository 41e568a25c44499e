//! Request/response shapes for the todos REST surface.

use serde::{Deserialize, Serialize};

/// Path the list endpoints are mounted under unless configured otherwise.
pub const DEFAULT_PREFIX: &str = "/api/todos";

/// Body of every non-task response: delete confirmations and errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
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

/// Settings the server injects into the page for the browser app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    pub api_base: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_PREFIX.to_string(),
        }
    }
}
