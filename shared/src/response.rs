//! API Response types
//!
//! Envelope returned by the valet event endpoints:
//! ```json
//! {
//!     "status": 200,
//!     "message": "Event created",
//!     "data": { ... }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// `status` field of the envelope; the server sends either a number or a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseStatus {
    Code(u16),
    Text(String),
}

impl ResponseStatus {
    /// 2xx codes (numeric or numeric text) and "success"/"ok" count as success
    pub fn is_success(&self) -> bool {
        match self {
            Self::Code(code) => (200..300).contains(code),
            Self::Text(text) => {
                let text = text.trim();
                match text.parse::<u16>() {
                    Ok(code) => (200..300).contains(&code),
                    Err(_) => {
                        text.eq_ignore_ascii_case("success") || text.eq_ignore_ascii_case("ok")
                    }
                }
            }
        }
    }
}

impl Default for ResponseStatus {
    fn default() -> Self {
        Self::Code(200)
    }
}

/// Valet API response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub status: Option<ResponseStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

fn none<T>() -> Option<T> {
    None
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            status: Some(ResponseStatus::Code(200)),
            message: Some("Success".to_string()),
            data: Some(data),
        }
    }

    /// Create a response without data
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(ResponseStatus::Code(code)),
            message: Some(message.into()),
            data: None,
        }
    }

    /// A missing `status` is taken as success, the HTTP layer already
    /// rejected non-2xx responses
    pub fn is_success(&self) -> bool {
        self.status.as_ref().is_none_or(ResponseStatus::is_success)
    }
}
