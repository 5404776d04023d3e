//! Structured error body returned by the valet API
//!
//! ```json
//! {
//!     "error": {
//!         "status": 400,
//!         "header": "Bad Request",
//!         "description": "Event ID already exists",
//!         "timestamp": "2025-06-01T10:00:00Z",
//!         "path": "/api/v1/addValetEvent"
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Error details; `description` is the operator-facing message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub header: String,
    pub description: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub path: String,
}

/// Top-level wrapper around [`ErrorBody`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

impl ErrorEnvelope {
    pub fn new(status: u16, header: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                status,
                header: header.into(),
                description: description.into(),
                ..Default::default()
            },
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.error.path = path.into();
        self
    }
}
